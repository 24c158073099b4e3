use std::{error::Error, fs, path::Path};

use log::info;
use rand::{rngs::StdRng, SeedableRng};
use rl_td::{
    algo::{
        ControlAgent, ControlConfig, DoubleQAgent, Episode, ExpectedSarsaAgent, QLearningAgent,
        SarsaAgent,
    },
    ds::StateSpace,
    env::Environment,
    gym::{windy_gridworld::Pos, WindyGridworld},
};

const NUM_EPISODES: u32 = 500;
const SEED: u64 = 0;

fn config() -> ControlConfig {
    ControlConfig {
        alpha: 0.5,
        gamma: 1.0,
        epsilon: 0.1,
    }
}

fn train(
    name: &str,
    wtr: &mut csv::Writer<fs::File>,
    mut go: impl FnMut(&mut WindyGridworld, &mut StdRng) -> Episode,
) -> Result<(), Box<dyn Error>> {
    let mut env = WindyGridworld::new();
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut total_steps = 0;

    for episode in 1..=NUM_EPISODES {
        let summary = go(&mut env, &mut rng);
        total_steps += summary.steps;
        wtr.write_record([
            name.to_string(),
            episode.to_string(),
            summary.steps.to_string(),
            total_steps.to_string(),
        ])?;
    }

    info!("{name}: {total_steps} steps over {NUM_EPISODES} episodes");
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let path = Path::new("demos/out");
    fs::create_dir_all(path)?;

    let mut wtr = csv::Writer::from_path(path.join("control_windy_gridworld.csv"))?;
    wtr.write_record(["agent", "episode", "steps", "total_steps"])?;

    let env = WindyGridworld::new();
    let states = StateSpace::<Pos>::new(env.states())?;
    let actions = env.action_space();

    let mut sarsa: SarsaAgent<Pos> = ControlAgent::new(config(), states.clone(), actions);
    train("sarsa", &mut wtr, |env, rng| {
        let summary = sarsa.go(env, rng);
        sarsa.decrement_epsilon(NUM_EPISODES);
        summary
    })?;

    let mut q_learning: QLearningAgent<Pos> = ControlAgent::new(config(), states.clone(), actions);
    train("q_learning", &mut wtr, |env, rng| q_learning.go(env, rng))?;

    let mut expected_sarsa: ExpectedSarsaAgent<Pos> =
        ControlAgent::new(config(), states.clone(), actions);
    train("expected_sarsa", &mut wtr, |env, rng| {
        expected_sarsa.go(env, rng)
    })?;

    let mut double_q = DoubleQAgent::new(config(), states, actions);
    train("double_q", &mut wtr, |env, rng| double_q.go(env, rng))?;

    wtr.flush()?;
    Ok(())
}
