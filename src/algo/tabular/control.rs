use std::marker::PhantomData;

use log::trace;
use rand::Rng;

use crate::ds::{Discrete, QTable, StateSpace};

use super::{
    base::ControlBase,
    target::{td_step, Bootstrap},
    Hashable,
};

/// Configuration for the epsilon greedy control agents
#[derive(Debug, Clone, PartialEq)]
pub struct ControlConfig {
    /// Step size α
    ///
    /// **Default**: `0.1`
    pub alpha: f64,
    /// Discount factor γ
    ///
    /// **Default**: `1.0`
    pub gamma: f64,
    /// Initial probability of taking a random action
    ///
    /// **Default**: `0.1`
    pub epsilon: f64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 1.0,
            epsilon: 0.1,
        }
    }
}

/// An epsilon greedy agent learning a single Q-table
///
/// The rule marker `U` ([`Sarsa`](super::Sarsa), [`QLearning`](super::QLearning) or
/// [`ExpectedSarsa`](super::ExpectedSarsa)) decides which `update_values` and `go` the agent exposes.
/// Everything else (the table, the behaviour policy, the epsilon schedule) is shared.
///
/// ### Generics
/// - `S` - The state type; every state the agent will see must be declared in its [`StateSpace`]
/// - `U` - The update rule
#[derive(Debug, Clone)]
pub struct ControlAgent<S: Hashable, U> {
    pub(super) base: ControlBase<S>,
    q_table: QTable,
    rule: PhantomData<U>,
}

impl<S: Hashable, U> ControlAgent<S, U> {
    /// Initialize a new agent with a zeroed Q-table over `states` × `actions`
    ///
    /// **Panics** if `alpha`, `gamma` or `epsilon` is not in the interval `[0,1]`
    pub fn new(config: ControlConfig, states: StateSpace<S>, actions: Discrete) -> Self {
        Self {
            q_table: QTable::zeros(states.len(), actions.n()),
            base: ControlBase::new(config, states, actions),
            rule: PhantomData,
        }
    }

    /// Choose an action for `state` with the epsilon greedy behaviour policy
    ///
    /// **Panics** if `state` is not part of the declared state space
    pub fn policy<R: Rng + ?Sized>(&self, state: S, rng: &mut R) -> usize {
        let s = self.base.states.index(&state);
        self.base.select(rng, self.q_table.row(s).iter().copied())
    }

    /// Decrease epsilon by `1 / episodes`, floored at zero
    ///
    /// Intended to be called once per completed episode; usage is optional.
    pub fn decrement_epsilon(&mut self, episodes: u32) {
        self.base.exploration.decrement(episodes);
    }

    pub fn epsilon(&self) -> f64 {
        self.base.exploration.epsilon()
    }

    /// Override epsilon, restarting the decay schedule from the new value
    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.base.exploration.set_epsilon(epsilon);
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Current estimate of `(state, action)`
    pub fn q_value(&self, state: S, action: usize) -> f64 {
        self.q_table[(self.base.states.index(&state), action)]
    }

    pub fn state_space(&self) -> &StateSpace<S> {
        &self.base.states
    }

    pub fn action_space(&self) -> Discrete {
        self.base.actions
    }

    /// Number of episodes completed through `go`
    pub fn episodes(&self) -> u32 {
        self.base.episodes()
    }

    /// Apply one TD update to `Q(state, action)` and return the TD error
    pub(super) fn learn(
        &mut self,
        state: S,
        action: usize,
        reward: f64,
        next_state: S,
        bootstrap: Bootstrap,
    ) -> f64 {
        let (s, next) = self.base.indices(&state, action, &next_state);
        let target = bootstrap.target(&self.q_table, reward, self.base.gamma, next);
        let delta = td_step(&mut self.q_table[(s, action)], target, self.base.alpha);
        trace!("state {s} action {action}: td error {delta:.5}");
        delta
    }

    #[cfg(test)]
    pub(super) fn q_table_mut(&mut self) -> &mut QTable {
        &mut self.q_table
    }
}
