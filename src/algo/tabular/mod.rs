mod base;
pub mod control;
pub mod double_q;
pub mod expected_sarsa;
pub mod q_learning;
pub mod sarsa;
pub mod target;
pub mod td_zero;

pub use control::{ControlAgent, ControlConfig};
pub use double_q::{DoubleQAgent, Estimator, Selection};
pub use expected_sarsa::{ExpectedSarsa, ExpectedSarsaAgent};
pub use q_learning::{QLearning, QLearningAgent};
pub use sarsa::{Sarsa, SarsaAgent};
pub use target::{td_step, Bootstrap};
pub use td_zero::{TdConfig, TdZeroAgent};

/// A trait for state types that can be resolved to table indices through a [`HashMap`](std::collections::HashMap)
pub trait Hashable: Copy + Eq + std::hash::Hash {}

impl<T> Hashable for T where T: Copy + Eq + std::hash::Hash {}

/// Summary of a single episode run by an agent
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Episode {
    /// Number of environment steps taken
    pub steps: u32,
    /// Undiscounted sum of rewards
    pub reward: f64,
}

impl Episode {
    fn record(&mut self, reward: f64) {
        self.steps += 1;
        self.reward += reward;
    }
}
