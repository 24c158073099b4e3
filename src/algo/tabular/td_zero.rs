use log::{debug, trace};
use rand::Rng;

use crate::{
    assert_interval,
    ds::{Discrete, StateSpace, VTable},
    env::{Environment, Step},
    exploration::UniformRandom,
};

use super::{target::td_step, Episode, Hashable};

/// Configuration for the [`TdZeroAgent`]
#[derive(Debug, Clone, PartialEq)]
pub struct TdConfig {
    /// Step size α
    ///
    /// **Default**: `0.05`
    pub alpha: f64,
    /// Discount factor γ
    ///
    /// **Default**: `1.0`
    pub gamma: f64,
}

impl Default for TdConfig {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            gamma: 1.0,
        }
    }
}

/// TD(0) prediction of the state values of the equiprobable random policy
///
/// V(s) ← V(s) + α[r + γV(s') - V(s)]
#[derive(Debug, Clone)]
pub struct TdZeroAgent<S: Hashable> {
    states: StateSpace<S>,
    behaviour: UniformRandom,
    v_table: VTable,
    alpha: f64,
    gamma: f64,
    episode: u32,
}

impl<S: Hashable> TdZeroAgent<S> {
    /// Initialize a new `TdZeroAgent` with a zeroed value table over `states`
    ///
    /// **Panics** if `alpha` or `gamma` is not in the interval `[0,1]`
    pub fn new(config: TdConfig, states: StateSpace<S>, actions: Discrete) -> Self {
        assert_interval!(config.alpha, 0.0, 1.0);
        assert_interval!(config.gamma, 0.0, 1.0);
        Self {
            v_table: VTable::zeros(states.len()),
            states,
            behaviour: UniformRandom::new(actions),
            alpha: config.alpha,
            gamma: config.gamma,
            episode: 0,
        }
    }

    /// Choose an action uniformly at random; the state is ignored
    pub fn policy<R: Rng + ?Sized>(&self, _state: S, rng: &mut R) -> usize {
        self.behaviour.choose(rng)
    }

    /// Update `V(state)` toward `reward + γ V(next_state)` and return the TD error
    ///
    /// **Panics** if either state is not part of the declared state space
    pub fn update_values(&mut self, state: S, reward: f64, next_state: S) -> f64 {
        let s = self.states.index(&state);
        let next = self.states.index(&next_state);

        let target = reward + self.gamma * self.v_table[next];
        let delta = td_step(&mut self.v_table[s], target, self.alpha);
        trace!("state {s}: td error {delta:.5}");
        delta
    }

    pub fn v_table(&self) -> &VTable {
        &self.v_table
    }

    /// Current estimate of `state`
    pub fn value(&self, state: S) -> f64 {
        self.v_table[self.states.index(&state)]
    }

    pub fn state_space(&self) -> &StateSpace<S> {
        &self.states
    }

    /// Number of episodes completed through `go`
    pub fn episodes(&self) -> u32 {
        self.episode
    }

    /// Run the agent for one episode in the given environment
    pub fn go<E, R>(&mut self, env: &mut E, rng: &mut R) -> Episode
    where
        E: Environment<State = S>,
        R: Rng + ?Sized,
    {
        let mut summary = Episode::default();
        let mut state = env.reset();
        loop {
            let action = self.policy(state, rng);
            let Step {
                next_state,
                reward,
                done,
            } = env.step(action);

            self.update_values(state, reward, next_state);
            summary.record(reward);

            if done {
                break;
            }
            state = next_state;
        }

        self.episode += 1;
        debug!(
            "episode {}: {} steps, reward {:.3}",
            self.episode, summary.steps, summary.reward
        );
        summary
    }
}
