pub mod random_walk;
pub mod windy_gridworld;

pub use random_walk::RandomWalk;
pub use windy_gridworld::WindyGridworld;
