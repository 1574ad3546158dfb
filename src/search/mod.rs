//! Assignment search: simulated annealing, brute-force playouts, and
//! the parallel fan-out over independent annealing runs.

mod annealing;
mod brute_force;
mod config;
mod outcome;
mod parallel;

pub use annealing::anneal;
pub use brute_force::brute_force;
pub use config::{SearchConfig, SearchMode};
pub use outcome::SearchOutcome;
pub use parallel::parallel_search;

use crate::model::Roster;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io;

/// Run the search the config asks for.
pub fn run(roster: &Roster, config: &SearchConfig) -> io::Result<SearchOutcome> {
    match config.mode {
        SearchMode::Annealing => anneal(roster, config, &mut seeded_rng(config.seed)),
        SearchMode::BruteForce => brute_force(roster, config, &mut seeded_rng(config.seed)),
        SearchMode::Parallel => parallel_search(roster, config),
    }
}

fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}
