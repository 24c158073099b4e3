use crate::{ds::QTable, exploration::expected_value};

/// How the successor estimate of a TD target is read from an action-value table
///
/// Every control rule in this crate has the shape
///
/// target = r + γ · bootstrap(Q, s')
///
/// and differs only in the bootstrap term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bootstrap {
    /// Value of the action that will actually be taken next (Sarsa)
    OnPolicy(usize),
    /// Value of the best next action (Q-learning)
    Max,
    /// Expected value under an epsilon greedy policy with the given epsilon (Expected Sarsa)
    Expected(f64),
}

impl Bootstrap {
    /// Successor estimate for state index `next_state`
    pub fn estimate(&self, q_table: &QTable, next_state: usize) -> f64 {
        match *self {
            Self::OnPolicy(next_action) => q_table[(next_state, next_action)],
            Self::Max => q_table.max(next_state),
            Self::Expected(epsilon) => expected_value(epsilon, q_table.row(next_state)),
        }
    }

    /// Bootstrapped target `reward + gamma * estimate`
    pub fn target(&self, q_table: &QTable, reward: f64, gamma: f64, next_state: usize) -> f64 {
        reward + gamma * self.estimate(q_table, next_state)
    }
}

/// Move `estimate` toward `target` by a fraction `alpha` of the TD error, returning the TD error
pub fn td_step(estimate: &mut f64, target: f64, alpha: f64) -> f64 {
    let delta = target - *estimate;
    *estimate += alpha * delta;
    delta
}
