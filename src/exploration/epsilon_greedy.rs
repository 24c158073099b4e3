use rand::Rng;

use crate::{
    assert_interval,
    decay::{Decay, Linear},
    ds::Discrete,
    util::argmax,
};

use super::Choice;

/// Epsilon greedy exploration policy with a linearly decaying epsilon threshold
///
/// The decay is anchored at the epsilon the policy was created with (or last [set](Self::set_epsilon) to),
/// so after `k` calls to [`decrement`](Self::decrement) with budget `N` epsilon is exactly `max(start - k/N, 0)`.
/// Changing the budget re-anchors the schedule at the current epsilon.
#[derive(Debug, Clone, PartialEq)]
pub struct EpsilonGreedy {
    start: f64,
    epsilon: f64,
    budget: Option<u32>,
    decrements: u32,
}

impl EpsilonGreedy {
    /// **Panics** if `epsilon` is not in the interval `[0,1]`
    pub fn new(epsilon: f64) -> Self {
        assert_interval!(epsilon, 0.0, 1.0);
        Self {
            start: epsilon,
            epsilon,
            budget: None,
            decrements: 0,
        }
    }

    /// Current exploration probability
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Override epsilon and restart the decay schedule from it
    ///
    /// **Panics** if `epsilon` is not in the interval `[0,1]`
    pub fn set_epsilon(&mut self, epsilon: f64) {
        *self = Self::new(epsilon);
    }

    /// Decrease epsilon by `1 / episodes`, never going below zero
    ///
    /// **Panics** if `episodes` is zero
    pub fn decrement(&mut self, episodes: u32) {
        assert!(episodes > 0, "Episode budget must be positive.");
        if self.budget != Some(episodes) {
            self.start = self.epsilon;
            self.budget = Some(episodes);
            self.decrements = 0;
        }
        let schedule = Linear::new(episodes as f64, self.start, 0.0)
            .expect("Horizon is positive and epsilon is never negative");
        self.decrements = self.decrements.saturating_add(1);
        self.epsilon = schedule.evaluate(self.decrements as f64);
    }

    /// Invoke epsilon greedy policy: explore when a uniform draw in `[0,1)` falls below epsilon
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Choice {
        if rng.gen::<f64>() < self.epsilon {
            Choice::Explore
        } else {
            Choice::Exploit
        }
    }

    /// Pick an action from the action values of one state
    ///
    /// Exploration samples `actions` uniformly, exploitation takes the first maximizing action.
    pub fn select<R, I>(&self, rng: &mut R, actions: Discrete, values: I) -> usize
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = f64>,
    {
        match self.choose(rng) {
            Choice::Explore => actions.sample(rng),
            Choice::Exploit => argmax(values),
        }
    }

    /// Expected action value of one state under this policy, see [`expected_value`]
    pub fn expected_value(&self, values: &[f64]) -> f64 {
        expected_value(self.epsilon, values)
    }
}

/// Expected action value under an epsilon greedy policy
///
/// Every action is explored with probability `ε / n`; the remaining `1 - ε` is split evenly
/// between the actions tied for the maximum:
///
/// π(a non-greedy action) = ε / n
///
/// π(a greedy action) = (1 - ε) / n<sub>greedy</sub> + ε / n
pub fn expected_value(epsilon: f64, values: &[f64]) -> f64 {
    assert!(!values.is_empty(), "`values` is not empty");
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let num_greedy = values.iter().filter(|&&v| v == max).count();

    let non_greedy_prob = epsilon / values.len() as f64;
    let greedy_prob = (1.0 - epsilon) / num_greedy as f64 + non_greedy_prob;

    values
        .iter()
        .map(|&v| {
            if v == max {
                greedy_prob * v
            } else {
                non_greedy_prob * v
            }
        })
        .sum()
}
