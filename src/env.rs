use crate::ds::Discrete;

/// A single transition produced by [`Environment::step`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step<S> {
    /// The state of the environment after the action is taken, terminal states included
    pub next_state: S,
    /// The reward received after taking the action
    pub reward: f64,
    /// Whether `next_state` ends the episode
    pub done: bool,
}

/// Represents a Markov decision process, defining the dynamics of an environment
/// in which an agent can operate.
///
/// This base trait represents the common case of a discrete-time MDP with one agent,
/// a finite state space and a finite action space `{0, ..., n - 1}`.
pub trait Environment {
    /// A representation of the state of the environment to be passed to an agent
    type State;

    /// Enumerate every state the environment can produce, terminal states included
    fn states(&self) -> Vec<Self::State>;

    /// The actions available to the agent
    fn action_space(&self) -> Discrete;

    /// Update the environment in response to an action taken by an agent, producing a new state and associated reward
    fn step(&mut self, action: usize) -> Step<Self::State>;

    /// Reset the environment to an initial state
    ///
    /// **Returns** the state
    fn reset(&mut self) -> Self::State;
}
