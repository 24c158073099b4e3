use log::trace;
use rand::Rng;

use crate::{
    ds::{Discrete, QTable, StateSpace},
    env::{Environment, Step},
};

use super::{
    base::{ControlBase, Online},
    control::ControlConfig,
    target::{td_step, Bootstrap},
    Episode, Hashable,
};

/// One of the two tables of a [`DoubleQAgent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Estimator {
    First,
    Second,
}

impl Estimator {
    /// Map a uniform draw in `[0,1)` to the table it selects: `First` for `r ≤ 0.5`, `Second` otherwise
    pub fn from_draw(r: f64) -> Self {
        if r <= 0.5 {
            Self::First
        } else {
            Self::Second
        }
    }
}

/// Which action values the epsilon greedy policy of a [`DoubleQAgent`] acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Q1 + Q2, the behaviour policy
    Combined,
    /// Q1 alone
    First,
    /// Q2 alone
    Second,
}

impl From<Estimator> for Selection {
    fn from(estimator: Estimator) -> Self {
        match estimator {
            Estimator::First => Self::First,
            Estimator::Second => Self::Second,
        }
    }
}

/// Double Q-learning agent
///
/// Two independent tables decouple choosing the successor action from estimating its value. On each update a fair
/// coin picks the table to learn; its successor action is chosen epsilon greedily from its own values, but that
/// action is valued by the other table:
///
/// Q<sub>1</sub>(s,a) ← Q<sub>1</sub>(s,a) + α[r + γQ<sub>2</sub>(s', a') - Q<sub>1</sub>(s,a)], a' chosen on Q<sub>1</sub>(s', ·)
///
/// and symmetrically for Q<sub>2</sub>. Behaviour uses Q<sub>1</sub> + Q<sub>2</sub>.
#[derive(Debug, Clone)]
pub struct DoubleQAgent<S: Hashable> {
    base: ControlBase<S>,
    q1: QTable,
    q2: QTable,
}

impl<S: Hashable> DoubleQAgent<S> {
    /// Initialize a new `DoubleQAgent` with two zeroed Q-tables over `states` × `actions`
    ///
    /// **Panics** if `alpha`, `gamma` or `epsilon` is not in the interval `[0,1]`
    pub fn new(config: ControlConfig, states: StateSpace<S>, actions: Discrete) -> Self {
        let q_table = QTable::zeros(states.len(), actions.n());
        Self {
            q1: q_table.clone(),
            q2: q_table,
            base: ControlBase::new(config, states, actions),
        }
    }

    /// Choose an action for `state` epsilon greedily over the action values named by `selection`
    ///
    /// **Panics** if `state` is not part of the declared state space
    pub fn policy<R: Rng + ?Sized>(&self, state: S, selection: Selection, rng: &mut R) -> usize {
        self.select(self.base.states.index(&state), selection, rng)
    }

    /// Draw the coin and update one of the two tables, returning the TD error
    ///
    /// **Panics** if a state is undeclared or `action` is out of range
    pub fn update_values<R: Rng + ?Sized>(
        &mut self,
        state: S,
        action: usize,
        reward: f64,
        next_state: S,
        rng: &mut R,
    ) -> f64 {
        let learner = Estimator::from_draw(rng.gen::<f64>());
        self.update_with(learner, state, action, reward, next_state, rng)
    }

    /// Update the table named by `learner`, bootstrapping from the other one
    ///
    /// `rng` only drives the epsilon greedy choice of the successor action.
    pub fn update_with<R: Rng + ?Sized>(
        &mut self,
        learner: Estimator,
        state: S,
        action: usize,
        reward: f64,
        next_state: S,
        rng: &mut R,
    ) -> f64 {
        let (s, next) = self.base.indices(&state, action, &next_state);

        let next_action = self.select(next, learner.into(), rng);
        let (table, reference) = match learner {
            Estimator::First => (&mut self.q1, &self.q2),
            Estimator::Second => (&mut self.q2, &self.q1),
        };

        let target =
            Bootstrap::OnPolicy(next_action).target(reference, reward, self.base.gamma, next);
        let delta = td_step(&mut table[(s, action)], target, self.base.alpha);
        trace!("{learner:?} table, state {s} action {action}: td error {delta:.5}");
        delta
    }

    pub fn decrement_epsilon(&mut self, episodes: u32) {
        self.base.exploration.decrement(episodes);
    }

    pub fn epsilon(&self) -> f64 {
        self.base.exploration.epsilon()
    }

    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.base.exploration.set_epsilon(epsilon);
    }

    pub fn q1(&self) -> &QTable {
        &self.q1
    }

    pub fn q2(&self) -> &QTable {
        &self.q2
    }

    /// Combined estimate `Q1(state, action) + Q2(state, action)`
    pub fn q_value(&self, state: S, action: usize) -> f64 {
        let s = self.base.states.index(&state);
        self.q1[(s, action)] + self.q2[(s, action)]
    }

    pub fn state_space(&self) -> &StateSpace<S> {
        &self.base.states
    }

    pub fn action_space(&self) -> Discrete {
        self.base.actions
    }

    pub fn episodes(&self) -> u32 {
        self.base.episodes()
    }

    /// Run the agent for one episode in the given environment, behaving on Q1 + Q2
    pub fn go<E, R>(&mut self, env: &mut E, rng: &mut R) -> Episode
    where
        E: Environment<State = S>,
        R: Rng + ?Sized,
    {
        self.run_episode(env, rng)
    }

    fn select<R: Rng + ?Sized>(&self, s: usize, selection: Selection, rng: &mut R) -> usize {
        match selection {
            Selection::Combined => {
                let values = self.q1.row(s).iter().zip(self.q2.row(s)).map(|(a, b)| a + b);
                self.base.select(rng, values)
            }
            Selection::First => self.base.select(rng, self.q1.row(s).iter().copied()),
            Selection::Second => self.base.select(rng, self.q2.row(s).iter().copied()),
        }
    }
}

impl<S: Hashable> Online<S> for DoubleQAgent<S> {
    fn base_mut(&mut self) -> &mut ControlBase<S> {
        &mut self.base
    }

    fn behave<R: Rng + ?Sized>(&self, state: S, rng: &mut R) -> usize {
        self.policy(state, Selection::Combined, rng)
    }

    fn observe<R: Rng + ?Sized>(&mut self, state: S, action: usize, step: Step<S>, rng: &mut R) {
        self.update_values(state, action, step.reward, step.next_state, rng);
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::env::tests::MockEnv;

    fn agent(alpha: f64, gamma: f64, epsilon: f64) -> DoubleQAgent<usize> {
        DoubleQAgent::new(
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
    fn estimator_from_draw() {
        assert_eq!(Estimator::from_draw(0.0), Estimator::First);
        assert_eq!(Estimator::from_draw(0.5), Estimator::First, "boundary goes to the first table");
        assert_eq!(Estimator::from_draw(0.500001), Estimator::Second);
    }

    #[test]
    fn selection_modes() {
        let mut agent = agent(0.1, 1.0, 0.0);
        agent.q1[(0, 0)] = 3.0;
        agent.q2[(0, 1)] = 2.0;
        agent.q1[(0, 1)] = 2.0;
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(agent.policy(0, Selection::First, &mut rng), 0);
        assert_eq!(agent.policy(0, Selection::Second, &mut rng), 1);
        assert_eq!(agent.policy(0, Selection::Combined, &mut rng), 1, "3 + 0 < 2 + 2");
    }

    #[test]
    fn cross_table_bootstrap() {
        let mut agent = agent(1.0, 1.0, 0.0);
        // Q1 prefers action 1 in state 1, Q2 values it low
        agent.q1[(1, 0)] = 0.0;
        agent.q1[(1, 1)] = 5.0;
        agent.q2[(1, 0)] = 7.0;
        agent.q2[(1, 1)] = -1.0;
        let mut rng = StdRng::seed_from_u64(0);

        agent.update_with(Estimator::First, 0, 0, 2.0, 1, &mut rng);
        assert_eq!(agent.q1[(0, 0)], 1.0, "Q1's choice (action 1) valued by Q2: 2 + (-1)");
        assert_eq!(agent.q2[(0, 0)], 0.0, "Q2 untouched");

        agent.update_with(Estimator::Second, 0, 1, 2.0, 1, &mut rng);
        assert_eq!(agent.q2[(0, 1)], 2.0, "Q2's choice (action 0) valued by Q1: 2 + 0");
        assert_eq!(agent.q1[(0, 1)], 0.0, "Q1 untouched");
    }

    #[test]
    fn alternating_draws_split_updates() {
        let mut agent = agent(0.5, 0.9, 0.0);
        let mut rng = StdRng::seed_from_u64(0);
        let (mut first, mut second) = (0, 0);

        for i in 0..100 {
            let draw = if i % 2 == 0 { 0.25 } else { 0.75 };
            let (q1, q2) = (agent.q1.clone(), agent.q2.clone());
            agent.update_with(Estimator::from_draw(draw), i % 3, i % 2, 1.0, (i + 1) % 4, &mut rng);

            match Estimator::from_draw(draw) {
                Estimator::First => {
                    assert_ne!(agent.q1, q1, "Q1 learns on its half");
                    assert_eq!(agent.q2, q2, "Q2 is only read");
                    first += 1;
                }
                Estimator::Second => {
                    assert_ne!(agent.q2, q2, "Q2 learns on its half");
                    assert_eq!(agent.q1, q1, "Q1 is only read");
                    second += 1;
                }
            }
        }

        assert_eq!((first, second), (50, 50));
    }

    #[test]
    fn double_q_zero_target_shrinks_estimate() {
        let mut agent = agent(0.5, 0.0, 0.0);
        agent.q1[(2, 1)] = 3.0;
        agent.q2[(2, 1)] = -4.0;
        let mut rng = StdRng::seed_from_u64(0);

        agent.update_with(Estimator::First, 2, 1, 0.0, 3, &mut rng);
        agent.update_with(Estimator::Second, 2, 1, 0.0, 3, &mut rng);
        assert_eq!(agent.q1[(2, 1)], 1.5, "old * (1 - alpha)");
        assert_eq!(agent.q2[(2, 1)], -2.0, "old * (1 - alpha)");
    }

    #[test]
    fn double_q_zero_alpha_is_frozen() {
        let mut agent = agent(0.0, 1.0, 0.5);
        let mut env = MockEnv::new(4);
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..20 {
            agent.go(&mut env, &mut rng);
        }
        assert!(agent.q1().values().iter().all(|&q| q == 0.0));
        assert!(agent.q2().values().iter().all(|&q| q == 0.0));
        assert_eq!(agent.episodes(), 20);
    }

    #[test]
    fn double_q_random_coin_updates_both_tables() {
        let mut agent = agent(0.5, 1.0, 0.1);
        let mut env = MockEnv::new(4);
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..100 {
            agent.go(&mut env, &mut rng);
        }
        assert!(agent.q1()[(2, 1)] > 0.0, "Q1 learned the goal");
        assert!(agent.q2()[(2, 1)] > 0.0, "Q2 learned the goal");
    }
}
