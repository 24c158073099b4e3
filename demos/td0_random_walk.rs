use std::{error::Error, fs, path::Path};

use log::info;
use rand::{rngs::StdRng, SeedableRng};
use rl_td::{
    algo::{TdConfig, TdZeroAgent},
    ds::StateSpace,
    env::Environment,
    eval::rmse,
    gym::RandomWalk,
};

const NUM_EPISODES: u32 = 100;
const ALPHAS: [f64; 3] = [0.05, 0.1, 0.15];

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let path = Path::new("demos/out");
    fs::create_dir_all(path)?;

    let mut wtr = csv::Writer::from_path(path.join("td0_random_walk.csv"))?;
    wtr.write_record(["alpha", "episode", "rmse"])?;

    for alpha in ALPHAS {
        let mut env = RandomWalk::new();
        let mut agent = TdZeroAgent::new(
            TdConfig { alpha, gamma: 1.0 },
            StateSpace::new(env.states())?,
            env.action_space(),
        );
        let mut rng = StdRng::seed_from_u64(0);
        let truth = env.true_values();

        for episode in 1..=NUM_EPISODES {
            agent.go(&mut env, &mut rng);
            let error = rmse(&truth, agent.v_table().values());
            wtr.write_record([alpha.to_string(), episode.to_string(), error.to_string()])?;
            if episode % 10 == 0 {
                info!("alpha {alpha}: episode {episode}, rmse {error:.4}");
            }
        }

        info!("alpha {alpha}: final estimates {:?}", agent.v_table().values());
    }

    wtr.flush()?;
    Ok(())
}
