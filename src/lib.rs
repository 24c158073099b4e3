/// Implemented RL algorithms
pub mod algo;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// Value tables and the spaces they are laid out over
pub mod ds;

/// Environment
pub mod env;

/// Errors
pub mod error;

/// Evaluation of learned estimates
pub mod eval;

/// Exploration policies
pub mod exploration;

/// Testing environments
#[cfg(feature = "gym")]
pub mod gym;

mod util;
