/// Exploration policy result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Explore,
    Exploit,
}

mod epsilon_greedy;
mod random;

pub use epsilon_greedy::{expected_value, EpsilonGreedy};
pub use random::UniformRandom;
