use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Uniform};
use strum::{FromRepr, VariantArray};

use crate::{
    ds::Discrete,
    env::{Environment, Step},
};

/// Grid position as `(row, column)`, row 0 at the top
pub type Pos = (usize, usize);

const ROWS: usize = 7;
const COLS: usize = 10;
const START: Pos = (3, 0);
const GOAL: Pos = (3, 7);
/// Upward push of each column
const WIND: [i32; COLS] = [0, 0, 0, 1, 1, 1, 2, 2, 1, 0];

/// Actions for the [`WindyGridworld`]; which prefix of them is available depends on [`Moves`]
#[derive(FromRepr, VariantArray, Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Action {
    Up = 0,
    Left = 1,
    Down = 2,
    Right = 3,
    UpLeft = 4,
    DownLeft = 5,
    DownRight = 6,
    UpRight = 7,
    Stay = 8,
}

impl Action {
    /// `(row, column)` displacement before wind
    fn delta(self) -> (i32, i32) {
        match self {
            Action::Up => (-1, 0),
            Action::Left => (0, -1),
            Action::Down => (1, 0),
            Action::Right => (0, 1),
            Action::UpLeft => (-1, -1),
            Action::DownLeft => (1, -1),
            Action::DownRight => (1, 1),
            Action::UpRight => (-1, 1),
            Action::Stay => (0, 0),
        }
    }
}

/// Move set of a [`WindyGridworld`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Moves {
    /// Up, left, down, right
    #[default]
    Standard,
    /// The standard moves plus the four diagonals
    King,
    /// King's moves plus staying in place
    KingWithStay,
}

impl Moves {
    fn len(self) -> usize {
        match self {
            Moves::Standard => 4,
            Moves::King => 8,
            Moves::KingWithStay => Action::VARIANTS.len(),
        }
    }
}

#[derive(Debug, Clone)]
enum Wind {
    Steady,
    Stochastic { rng: StdRng, noise: Uniform<i32> },
}

/// The windy gridworld control task
///
/// A 7×10 grid with a crosswind pushing the agent upward by a column-dependent strength. Every step costs `-1`
/// until the goal is reached. Moves off the grid are clipped to its edge.
#[derive(Debug, Clone)]
pub struct WindyGridworld {
    pos: Pos,
    moves: Moves,
    wind: Wind,
}

impl WindyGridworld {
    pub fn new() -> Self {
        Self::with_moves(Moves::Standard)
    }

    pub fn with_moves(moves: Moves) -> Self {
        Self {
            pos: START,
            moves,
            wind: Wind::Steady,
        }
    }

    /// Make the wind in windy columns vary by one cell up or down, each with probability 1/3
    pub fn with_stochastic_wind(mut self, seed: u64) -> Self {
        self.wind = Wind::Stochastic {
            rng: StdRng::seed_from_u64(seed),
            noise: Uniform::new_inclusive(-1, 1),
        };
        self
    }

    pub fn goal(&self) -> Pos {
        GOAL
    }

    fn wind_at(&mut self, col: usize) -> i32 {
        let strength = WIND[col];
        match &mut self.wind {
            Wind::Stochastic { rng, noise } if strength > 0 => strength + noise.sample(rng),
            _ => strength,
        }
    }
}

impl Default for WindyGridworld {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for WindyGridworld {
    type State = Pos;

    fn states(&self) -> Vec<Self::State> {
        (0..ROWS)
            .flat_map(|row| (0..COLS).map(move |col| (row, col)))
            .collect()
    }

    fn action_space(&self) -> Discrete {
        Discrete::new(self.moves.len()).expect("every move set is non-empty")
    }

    fn step(&mut self, action: usize) -> Step<Self::State> {
        let Some(action) = Action::from_repr(action).filter(|_| action < self.moves.len()) else {
            panic!("Invalid action: {}", action);
        };

        let (row, col) = self.pos;
        let wind = self.wind_at(col);
        let (dr, dc) = action.delta();

        self.pos = (
            (row as i32 - wind + dr).clamp(0, ROWS as i32 - 1) as usize,
            (col as i32 + dc).clamp(0, COLS as i32 - 1) as usize,
        );

        let done = self.pos == GOAL;
        Step {
            next_state: self.pos,
            reward: -1.0,
            done,
        }
    }

    fn reset(&mut self) -> Self::State {
        self.pos = START;
        self.pos
    }
}
