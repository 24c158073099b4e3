pub mod tabular;

pub use tabular::{
    ControlAgent, ControlConfig, DoubleQAgent, Episode, ExpectedSarsaAgent, QLearningAgent,
    SarsaAgent, TdConfig, TdZeroAgent,
};
