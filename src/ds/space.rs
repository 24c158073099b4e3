use std::{collections::HashMap, ops::Range};

use rand::Rng;

use crate::{algo::tabular::Hashable, error::SpaceError};

/// A finite, enumerable state space
///
/// Every state is resolved to a dense index once, at construction, and tables are laid out in that order.
#[derive(Debug, Clone)]
pub struct StateSpace<S: Hashable> {
    states: Vec<S>,
    index: HashMap<S, usize>,
}

impl<S: Hashable> StateSpace<S> {
    /// Declare a state space from a sequence of unique states
    ///
    /// **Errors** if the sequence is empty or contains a duplicate
    pub fn new(states: impl IntoIterator<Item = S>) -> Result<Self, SpaceError> {
        let states = states.into_iter().collect::<Vec<_>>();
        if states.is_empty() {
            return Err(SpaceError::EmptyStateSpace);
        }

        let mut index = HashMap::with_capacity(states.len());
        for (i, &state) in states.iter().enumerate() {
            if index.insert(state, i).is_some() {
                return Err(SpaceError::DuplicateState(i));
            }
        }

        Ok(Self { states, index })
    }

    /// Number of states
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// States in index order
    pub fn states(&self) -> &[S] {
        &self.states
    }

    pub fn contains(&self, state: &S) -> bool {
        self.index.contains_key(state)
    }

    /// Dense index of `state`, or `None` if it was never declared
    pub fn try_index(&self, state: &S) -> Option<usize> {
        self.index.get(state).copied()
    }

    /// Dense index of `state`
    ///
    /// **Panics** if `state` is not part of the declared space
    pub fn index(&self, state: &S) -> usize {
        self.try_index(state)
            .expect("State is outside the declared state space")
    }
}

/// A discrete action space `{0, 1, ..., n - 1}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discrete {
    n: usize,
}

impl Discrete {
    /// **Errors** if `n` is zero
    pub fn new(n: usize) -> Result<Self, SpaceError> {
        if n == 0 {
            return Err(SpaceError::EmptyActionSpace);
        }
        Ok(Self { n })
    }

    /// Number of actions
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn contains(&self, action: usize) -> bool {
        action < self.n
    }

    pub fn iter(&self) -> Range<usize> {
        0..self.n
    }

    /// Draw an action uniformly at random
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.gen_range(0..self.n)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn state_space_functional() {
        let space = StateSpace::new([10, 20, 30]).unwrap();
        assert_eq!(space.len(), 3, "length correct");
        assert_eq!(space.states(), [10, 20, 30], "order preserved");
        assert_eq!(space.index(&20), 1, "index resolved");
        assert_eq!(space.try_index(&40), None, "undeclared state");
        assert!(space.contains(&30));
    }

    #[test]
    fn state_space_rejects_invalid() {
        assert_eq!(
            StateSpace::<u8>::new([]).unwrap_err(),
            SpaceError::EmptyStateSpace
        );
        assert_eq!(
            StateSpace::new([(0, 0), (0, 1), (0, 0)]).unwrap_err(),
            SpaceError::DuplicateState(2)
        );
    }

    #[test]
    #[should_panic(expected = "outside the declared state space")]
    fn state_space_unknown_state_panics() {
        let space = StateSpace::new(0..3).unwrap();
        space.index(&3);
    }

    #[test]
    fn discrete_functional() {
        assert_eq!(Discrete::new(0), Err(SpaceError::EmptyActionSpace));

        let space = Discrete::new(3).unwrap();
        assert_eq!(space.iter().collect::<Vec<_>>(), [0, 1, 2], "actions enumerated");

        let mut rng = StdRng::seed_from_u64(0);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let action = space.sample(&mut rng);
            assert!(space.contains(action), "sampled action is valid");
            seen[action] = true;
        }
        assert_eq!(seen, [true; 3], "every action is eventually sampled");
    }
}
