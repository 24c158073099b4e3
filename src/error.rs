/// Errors raised while declaring state and action spaces
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpaceError {
    #[error("state space must contain at least one state")]
    EmptyStateSpace,

    #[error("state at position {0} appears more than once in the state space")]
    DuplicateState(usize),

    #[error("action space must contain at least one action")]
    EmptyActionSpace,
}

/// Errors raised by invalid decay schedule parameters
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecayError {
    #[error("decay horizon must be positive and finite, got {0}")]
    InvalidHorizon(f64),

    #[error("initial value {vi} must not be below final value {vf}")]
    Increasing { vi: f64, vf: f64 },
}
