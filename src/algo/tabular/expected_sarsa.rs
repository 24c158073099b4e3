use rand::Rng;

use crate::env::{Environment, Step};

use super::{
    base::{ControlBase, Online},
    control::ControlAgent,
    target::Bootstrap,
    Episode, Hashable,
};

/// TD control bootstrapping from the expected next action value under the current epsilon greedy policy
///
/// Q(s,a) ← Q(s,a) + α[r + γ Σ<sub>a'</sub> π(a'|s')Q(s',a') - Q(s,a)]
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpectedSarsa;

/// A [`ControlAgent`] learning with the [`ExpectedSarsa`] rule
pub type ExpectedSarsaAgent<S> = ControlAgent<S, ExpectedSarsa>;

impl<S: Hashable> ControlAgent<S, ExpectedSarsa> {
    /// Update `Q(state, action)` toward `reward + γ E[Q(next_state, ·)]` and return the TD error
    ///
    /// The expectation is taken under the agent's epsilon at the time of the call.
    ///
    /// **Panics** if a state is undeclared or `action` is out of range
    pub fn update_values(&mut self, state: S, action: usize, reward: f64, next_state: S) -> f64 {
        let bootstrap = Bootstrap::Expected(self.epsilon());
        self.learn(state, action, reward, next_state, bootstrap)
    }

    /// Run the agent for one episode in the given environment
    pub fn go<E, R>(&mut self, env: &mut E, rng: &mut R) -> Episode
    where
        E: Environment<State = S>,
        R: Rng + ?Sized,
    {
        self.run_episode(env, rng)
    }
}

impl<S: Hashable> Online<S> for ControlAgent<S, ExpectedSarsa> {
    fn base_mut(&mut self) -> &mut ControlBase<S> {
        &mut self.base
    }

    fn behave<R: Rng + ?Sized>(&self, state: S, rng: &mut R) -> usize {
        self.policy(state, rng)
    }

    fn observe<R: Rng + ?Sized>(&mut self, state: S, action: usize, step: Step<S>, _rng: &mut R) {
        self.update_values(state, action, step.reward, step.next_state);
    }
}
