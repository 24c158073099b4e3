use rand::Rng;

use crate::env::{Environment, Step};

use super::{control::ControlAgent, target::Bootstrap, Episode, Hashable};

/// On-policy TD control: bootstrap from the action actually taken next
///
/// Q(s,a) ← Q(s,a) + α[r + γQ(s',a') - Q(s,a)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Sarsa;

/// A [`ControlAgent`] learning with the [`Sarsa`] rule
pub type SarsaAgent<S> = ControlAgent<S, Sarsa>;

impl<S: Hashable> ControlAgent<S, Sarsa> {
    /// Update `Q(state, action)` toward `reward + γ Q(next_state, next_action)`
    ///
    /// `next_action` must already have been chosen by the policy. Returns the TD error.
    ///
    /// **Panics** if a state is undeclared or an action is out of range
    pub fn update_values(
        &mut self,
        state: S,
        action: usize,
        reward: f64,
        next_state: S,
        next_action: usize,
    ) -> f64 {
        self.learn(
            state,
            action,
            reward,
            next_state,
            Bootstrap::OnPolicy(next_action),
        )
    }

    /// Run the agent for one episode in the given environment
    pub fn go<E, R>(&mut self, env: &mut E, rng: &mut R) -> Episode
    where
        E: Environment<State = S>,
        R: Rng + ?Sized,
    {
        let mut summary = Episode::default();
        let mut state = env.reset();
        let mut action = self.policy(state, rng);

        loop {
            let Step {
                next_state,
                reward,
                done,
            } = env.step(action);
            let next_action = self.policy(next_state, rng);

            self.update_values(state, action, reward, next_state, next_action);
            summary.record(reward);

            if done {
                break;
            }
            (state, action) = (next_state, next_action);
        }

        self.base.finish(summary)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{
        algo::tabular::ControlConfig,
        ds::{Discrete, StateSpace},
        env::tests::MockEnv,
    };

    fn agent(alpha: f64, gamma: f64, epsilon: f64) -> SarsaAgent<usize> {
        ControlAgent::new(
            ControlConfig {
                alpha,
                gamma,
                epsilon,
            },
            StateSpace::new(0..4).unwrap(),
            Discrete::new(2).unwrap(),
        )
    }

    #[test]
    fn sarsa_update_uses_next_action() {
        let mut agent = agent(0.5, 0.9, 0.0);
        agent.q_table_mut()[(1, 0)] = 10.0;
        agent.q_table_mut()[(1, 1)] = 2.0;

        let delta = agent.update_values(0, 1, 1.0, 1, 1);
        assert_eq!(delta, 1.0 + 0.9 * 2.0, "bootstraps from the chosen action, not the max");
        assert_eq!(agent.q_value(0, 1), 0.5 * (1.0 + 0.9 * 2.0));
    }

    #[test]
    fn sarsa_zero_target_shrinks_estimate() {
        let mut agent = agent(0.25, 0.0, 0.0);
        agent.q_table_mut()[(2, 0)] = 4.0;
        agent.q_table_mut()[(3, 1)] = 8.0;
        agent.update_values(2, 0, 0.0, 3, 1);
        assert_eq!(agent.q_value(2, 0), 3.0, "old * (1 - alpha)");
    }

    #[test]
    fn sarsa_zero_alpha_is_frozen() {
        let mut agent = agent(0.0, 1.0, 0.5);
        let mut env = MockEnv::new(4);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            agent.go(&mut env, &mut rng);
        }
        assert!(agent.q_table().values().iter().all(|&q| q == 0.0));
        assert_eq!(agent.episodes(), 20);
    }

    #[test]
    fn sarsa_learns_corridor() {
        let mut agent = agent(0.2, 0.9, 0.1);
        let mut env = MockEnv::new(4);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            agent.go(&mut env, &mut rng);
        }
        for state in 0..3 {
            assert!(
                agent.q_value(state, 1) > agent.q_value(state, 0),
                "moving right is preferred in state {state}"
            );
        }
    }

    #[test]
    #[should_panic(expected = "Invalid action: 2")]
    fn sarsa_rejects_invalid_next_action() {
        let mut agent = agent(0.5, 0.9, 0.0);
        agent.update_values(0, 1, 0.0, 1, 2);
    }
}
