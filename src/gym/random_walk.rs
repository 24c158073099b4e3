use strum::{FromRepr, VariantArray};

use crate::{
    ds::Discrete,
    env::{Environment, Step},
};

/// Actions for the [`RandomWalk`] environment
#[derive(FromRepr, VariantArray, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    Left = 0,
    Right = 1,
}

/// The classic random walk prediction task
///
/// A row of states `0..n` with a terminal state at each end, starting in the middle:
///
/// `Terminal <- A <-> B <-> C <-> D <-> E -> Terminal`
///
/// Stepping into the right terminal pays `+1`, every other transition pays `0`. Under the equiprobable random
/// policy the value of interior state `i` is `i / (n - 1)`.
///
/// Intended for use with a [TdZeroAgent](crate::algo::TdZeroAgent)
#[derive(Debug, Clone)]
pub struct RandomWalk {
    num_states: usize,
    start: usize,
    state: usize,
}

impl RandomWalk {
    /// The standard walk with 5 interior states
    pub fn new() -> Self {
        Self::with_states(7)
    }

    /// A walk of `num_states` states, terminals included, starting in the middle
    ///
    /// **Panics** if `num_states` is less than 3
    pub fn with_states(num_states: usize) -> Self {
        assert!(
            num_states >= 3,
            "A random walk needs at least one non-terminal state."
        );
        let start = num_states / 2;
        Self {
            num_states,
            start,
            state: start,
        }
    }

    /// True state values under the equiprobable random policy, terminals valued at zero
    pub fn true_values(&self) -> Vec<f64> {
        let last = self.num_states - 1;
        (0..self.num_states)
            .map(|i| {
                if i == 0 || i == last {
                    0.0
                } else {
                    i as f64 / last as f64
                }
            })
            .collect()
    }
}

impl Default for RandomWalk {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for RandomWalk {
    type State = usize;

    fn states(&self) -> Vec<Self::State> {
        (0..self.num_states).collect()
    }

    fn action_space(&self) -> Discrete {
        Discrete::new(Move::VARIANTS.len()).expect("Move has variants")
    }

    fn step(&mut self, action: usize) -> Step<Self::State> {
        let last = self.num_states - 1;
        let (reward, done) = match Move::from_repr(action) {
            Some(Move::Left) => {
                self.state -= 1;
                (0.0, self.state == 0)
            }
            Some(Move::Right) => {
                self.state += 1;
                let done = self.state == last;
                (if done { 1.0 } else { 0.0 }, done)
            }
            None => panic!("Invalid action: {}", action),
        };

        Step {
            next_state: self.state,
            reward,
            done,
        }
    }

    fn reset(&mut self) -> Self::State {
        self.state = self.start;
        self.state
    }
}
