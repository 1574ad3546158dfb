//! Search configuration.

use crate::worth::TargetClass;
use serde::{Deserialize, Serialize};

/// Which search strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchMode {
    /// Single simulated-annealing run.
    Annealing,
    /// Independent random playouts, keep the best.
    BruteForce,
    /// Fan out independent annealing runs across workers.
    Parallel,
}

impl SearchMode {
    pub fn from_name(name: &str) -> Option<SearchMode> {
        match name.trim().to_ascii_lowercase().as_str() {
            "annealing" | "anneal" => Some(SearchMode::Annealing),
            "bruteforce" | "brute" => Some(SearchMode::BruteForce),
            "parallel" => Some(SearchMode::Parallel),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SearchMode::Annealing => "annealing",
            SearchMode::BruteForce => "bruteforce",
            SearchMode::Parallel => "parallel",
        }
    }
}

/// Configuration for a search run.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub mode: SearchMode,

    /// Iteration budget: annealing steps, or brute-force playouts.
    pub iterations: u32,

    /// Independent runs in parallel mode.
    pub workers: usize,

    /// Random seed for reproducibility (None = random). Workers derive
    /// their own seeds as `seed + worker_index`.
    pub seed: Option<u64>,

    /// Target classes dropped from the roster before searching.
    pub excluded_classes: Vec<TargetClass>,

    /// Annealing start temperature, on the scale of one kill's worth.
    pub initial_temperature: f64,

    /// Geometric cooling factor applied every iteration.
    pub cooling_rate: f64,

    /// Stop once temperature falls below this.
    pub temperature_floor: f64,

    /// Reset temperature to its initial value every this many
    /// iterations; 0 disables reheating.
    pub reheat_interval: u32,

    /// Stop after this many iterations without a new best.
    pub stagnation_patience: u32,

    /// Chance a mutation changes two slots instead of one.
    pub two_swap_probability: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            mode: SearchMode::Annealing,
            iterations: 5000,
            workers: 8,
            seed: None,
            excluded_classes: Vec::new(),
            initial_temperature: 150.0,
            cooling_rate: 0.995,
            temperature_floor: 0.01,
            reheat_interval: 1000,
            stagnation_patience: 800,
            two_swap_probability: 0.2,
        }
    }
}

impl SearchConfig {
    /// Small budgets for smoke runs and tests.
    pub fn quick() -> Self {
        Self {
            iterations: 300,
            workers: 2,
            stagnation_patience: 150,
            ..Default::default()
        }
    }

    /// Large budgets for an overnight-quality answer.
    pub fn thorough() -> Self {
        Self {
            iterations: 20_000,
            workers: 16,
            reheat_interval: 2500,
            stagnation_patience: 4000,
            ..Default::default()
        }
    }
}
