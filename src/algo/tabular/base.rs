use log::debug;
use rand::Rng;

use crate::{
    assert_interval,
    ds::{Discrete, StateSpace},
    env::{Environment, Step},
    exploration::EpsilonGreedy,
};

use super::{control::ControlConfig, Episode, Hashable};

/// Everything an epsilon greedy agent carries besides its value tables
#[derive(Debug, Clone)]
pub(super) struct ControlBase<S: Hashable> {
    pub(super) states: StateSpace<S>,
    pub(super) actions: Discrete,
    pub(super) exploration: EpsilonGreedy,
    pub(super) alpha: f64,
    pub(super) gamma: f64,
    episode: u32,
}

impl<S: Hashable> ControlBase<S> {
    /// **Panics** if `alpha`, `gamma` or `epsilon` is not in the interval `[0,1]`
    pub(super) fn new(config: ControlConfig, states: StateSpace<S>, actions: Discrete) -> Self {
        assert_interval!(config.alpha, 0.0, 1.0);
        assert_interval!(config.gamma, 0.0, 1.0);
        Self {
            states,
            actions,
            exploration: EpsilonGreedy::new(config.epsilon),
            alpha: config.alpha,
            gamma: config.gamma,
            episode: 0,
        }
    }

    /// Resolve a transition to table indices `(state, next_state)`
    ///
    /// **Panics** if a state is undeclared or `action` is out of range
    pub(super) fn indices(&self, state: &S, action: usize, next_state: &S) -> (usize, usize) {
        assert!(self.actions.contains(action), "Invalid action: {}", action);
        (self.states.index(state), self.states.index(next_state))
    }

    /// Epsilon greedy choice over one row of action values
    pub(super) fn select<R, I>(&self, rng: &mut R, values: I) -> usize
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = f64>,
    {
        self.exploration.select(rng, self.actions, values)
    }

    pub(super) fn episodes(&self) -> u32 {
        self.episode
    }

    pub(super) fn finish(&mut self, summary: Episode) -> Episode {
        self.episode += 1;
        debug!(
            "episode {}: {} steps, reward {:.3}, epsilon {:.4}",
            self.episode,
            summary.steps,
            summary.reward,
            self.exploration.epsilon()
        );
        summary
    }
}

/// An agent that learns from each transition as soon as it is observed
pub(super) trait Online<S: Hashable> {
    fn base_mut(&mut self) -> &mut ControlBase<S>;

    /// Behaviour policy
    fn behave<R: Rng + ?Sized>(&self, state: S, rng: &mut R) -> usize;

    fn observe<R: Rng + ?Sized>(&mut self, state: S, action: usize, step: Step<S>, rng: &mut R);

    /// Run one episode, updating after every step
    fn run_episode<E, R>(&mut self, env: &mut E, rng: &mut R) -> Episode
    where
        Self: Sized,
        E: Environment<State = S>,
        R: Rng + ?Sized,
    {
        let mut summary = Episode::default();
        let mut state = env.reset();
        loop {
            let action = self.behave(state, rng);
            let step = env.step(action);

            self.observe(state, action, step, rng);
            summary.record(step.reward);

            if step.done {
                break;
            }
            state = step.next_state;
        }

        self.base_mut().finish(summary)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::env::tests::MockEnv;

    fn base() -> ControlBase<usize> {
        ControlBase::new(
            ControlConfig::default(),
            StateSpace::new(0..4).unwrap(),
            Discrete::new(2).unwrap(),
        )
    }

    /// Always moves right and remembers what it observed
    struct Walker {
        base: ControlBase<usize>,
        seen: Vec<(usize, usize, usize)>,
    }

    impl Online<usize> for Walker {
        fn base_mut(&mut self) -> &mut ControlBase<usize> {
            &mut self.base
        }

        fn behave<R: Rng + ?Sized>(&self, _state: usize, _rng: &mut R) -> usize {
            1
        }

        fn observe<R: Rng + ?Sized>(
            &mut self,
            state: usize,
            action: usize,
            step: Step<usize>,
            _rng: &mut R,
        ) {
            self.seen.push((state, action, step.next_state));
        }
    }

    #[test]
    fn run_episode_observes_every_step() {
        let mut walker = Walker {
            base: base(),
            seen: Vec::new(),
        };
        let mut env = MockEnv::new(4);
        let mut rng = StdRng::seed_from_u64(0);

        let summary = walker.run_episode(&mut env, &mut rng);
        assert_eq!(summary.steps, 3);
        assert_eq!(summary.reward, 1.0);
        assert_eq!(walker.seen, [(0, 1, 1), (1, 1, 2), (2, 1, 3)]);
        assert_eq!(walker.base.episodes(), 1);

        walker.run_episode(&mut env, &mut rng);
        assert_eq!(walker.base.episodes(), 2);
    }

    #[test]
    fn indices_resolve_states() {
        assert_eq!(base().indices(&2, 1, &3), (2, 3));
    }

    #[test]
    #[should_panic(expected = "Invalid action: 2")]
    fn indices_reject_invalid_action() {
        base().indices(&0, 2, &1);
    }
}
