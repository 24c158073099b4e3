use rand::Rng;

use crate::ds::Discrete;

/// Equiprobable random policy that ignores every value estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformRandom {
    actions: Discrete,
}

impl UniformRandom {
    pub fn new(actions: Discrete) -> Self {
        Self { actions }
    }

    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.actions.sample(rng)
    }
}
