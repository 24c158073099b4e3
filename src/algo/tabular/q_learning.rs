use rand::Rng;

use crate::env::{Environment, Step};

use super::{
    base::{ControlBase, Online},
    control::ControlAgent,
    target::Bootstrap,
    Episode, Hashable,
};

/// Off-policy TD control: bootstrap from the best next action regardless of what is taken
///
/// Q(s,a) ← Q(s,a) + α[r + γ max<sub>a'</sub> Q(s',a') - Q(s,a)]
#[derive(Debug, Clone, Copy, Default)]
pub struct QLearning;

/// A [`ControlAgent`] learning with the [`QLearning`] rule
pub type QLearningAgent<S> = ControlAgent<S, QLearning>;

impl<S: Hashable> ControlAgent<S, QLearning> {
    /// Update `Q(state, action)` toward `reward + γ max_a Q(next_state, a)` and return the TD error
    ///
    /// **Panics** if a state is undeclared or `action` is out of range
    pub fn update_values(&mut self, state: S, action: usize, reward: f64, next_state: S) -> f64 {
        self.learn(state, action, reward, next_state, Bootstrap::Max)
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

impl<S: Hashable> Online<S> for ControlAgent<S, QLearning> {
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
