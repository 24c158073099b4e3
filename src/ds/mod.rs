mod space;
mod table;

pub use space::{Discrete, StateSpace};
pub use table::{QTable, VTable};
