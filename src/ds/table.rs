use std::ops::{Index, IndexMut};

use crate::util::argmax;

/// A state-value table V, one entry per state index
#[derive(Debug, Clone, PartialEq)]
pub struct VTable {
    values: Vec<f64>,
}

impl VTable {
    /// Constructs a table of zeros covering `num_states` states
    pub fn zeros(num_states: usize) -> Self {
        Self {
            values: vec![0.0; num_states],
        }
    }

    /// Number of states covered
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Get a slice view of the estimates in state index order
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl Index<usize> for VTable {
    type Output = f64;

    fn index(&self, state: usize) -> &Self::Output {
        &self.values[state]
    }
}

impl IndexMut<usize> for VTable {
    fn index_mut(&mut self, state: usize) -> &mut Self::Output {
        &mut self.values[state]
    }
}

/// An action-value table Q, stored densely in row-major `[state][action]` order
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    values: Vec<f64>,
    num_actions: usize,
}

impl QTable {
    /// Constructs a table of zeros covering every `(state, action)` pair
    pub fn zeros(num_states: usize, num_actions: usize) -> Self {
        Self {
            values: vec![0.0; num_states * num_actions],
            num_actions,
        }
    }

    pub fn num_states(&self) -> usize {
        self.values.len() / self.num_actions
    }

    pub fn num_actions(&self) -> usize {
        self.num_actions
    }

    /// Action values of a single state
    pub fn row(&self, state: usize) -> &[f64] {
        let start = state * self.num_actions;
        &self.values[start..start + self.num_actions]
    }

    /// Largest action value of `state`
    pub fn max(&self, state: usize) -> f64 {
        self.row(state)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Greedy action of `state`, ties going to the lowest action index
    pub fn greedy(&self, state: usize) -> usize {
        argmax(self.row(state).iter().copied())
    }

    /// Get a slice view of all estimates
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    fn offset(&self, (state, action): (usize, usize)) -> usize {
        assert!(action < self.num_actions, "Invalid action: {}", action);
        state * self.num_actions + action
    }
}

impl Index<(usize, usize)> for QTable {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.values[self.offset(index)]
    }
}

impl IndexMut<(usize, usize)> for QTable {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let offset = self.offset(index);
        &mut self.values[offset]
    }
}
