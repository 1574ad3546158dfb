//! Attack plan optimizer CLI.
//!
//! Loads a damage sheet, searches for a high-worth attack allocation,
//! and prints the plan.
//!
//! Usage:
//!   cargo run --bin optimize -- [OPTIONS] [SHEET]
//!
//! Examples:
//!   cargo run --bin optimize -- damage.csv              # Default annealing run
//!   cargo run --bin optimize -- -m parallel -w 8        # Fan out 8 workers
//!   cargo run --bin optimize -- --seed 42 --json        # Reproducible + JSON

use hydraplan::data::DamageTable;
use hydraplan::report::PlanReport;
use hydraplan::search::{self, SearchConfig, SearchMode};
use hydraplan::worth::{TargetClass, WorthTable};
use std::env;
use std::process;

const DEFAULT_SHEET: &str = "damage.csv";

fn main() {
    let args: Vec<String> = env::args().collect();
    let (config, sheet_path, verbose, save_json) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("Error: {}", message);
            process::exit(1);
        }
    };

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              HYDRAPLAN ATTACK OPTIMIZER                       ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Sheet:          {}", sheet_path);
    println!("  Mode:           {}", config.mode.name());
    println!("  Iterations:     {}", config.iterations);
    if config.mode == SearchMode::Parallel {
        println!("  Workers:        {}", config.workers);
    }
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    for class in &config.excluded_classes {
        println!("  Excluding:      {}", class);
    }
    println!();

    let table = match DamageTable::load(&sheet_path) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error: failed to load '{}': {}", sheet_path, e);
            process::exit(1);
        }
    };
    for warning in &table.warnings {
        eprintln!("Warning: {}", warning);
    }

    let roster = match table.build_roster(WorthTable::standard(), &config.excluded_classes) {
        Ok(roster) => roster,
        Err(e) => {
            eprintln!("Error: failed to build roster: {}", e);
            process::exit(1);
        }
    };
    println!(
        "Loaded {} actors, {} targets, {} parts.",
        roster.num_actors(),
        roster.num_targets(),
        roster.num_parts()
    );
    println!();
    println!("Searching...");
    println!();

    let outcome = match search::run(&roster, &config) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Error: search failed: {}", e);
            process::exit(1);
        }
    };

    let report = PlanReport::from_outcome(&roster, &outcome);
    println!("{}", report.to_text());

    if verbose {
        println!("{}", report.event_log_text());
    }

    if save_json {
        let filename = format!(
            "plan_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        if let Err(e) = std::fs::write(&filename, report.to_json()) {
            eprintln!("Error: failed to write JSON report: {}", e);
            process::exit(1);
        }
        println!("JSON report saved to: {}", filename);
    }
}

#[allow(clippy::type_complexity)]
fn parse_args(args: &[String]) -> Result<(SearchConfig, String, bool, bool), String> {
    let mut config = SearchConfig::default();
    let mut sheet_path: Option<String> = None;
    let mut verbose = false;
    let mut save_json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-m" | "--mode" => {
                let value = option_value(args, i, "--mode")?;
                config.mode = SearchMode::from_name(value)
                    .ok_or_else(|| format!("unknown mode '{}'", value))?;
                i += 1;
            }
            "-i" | "--iterations" => {
                let value = option_value(args, i, "--iterations")?;
                config.iterations = value
                    .parse()
                    .map_err(|_| format!("invalid iteration count '{}'", value))?;
                i += 1;
            }
            "-w" | "--workers" => {
                let value = option_value(args, i, "--workers")?;
                config.workers = value
                    .parse()
                    .map_err(|_| format!("invalid worker count '{}'", value))?;
                i += 1;
            }
            "-s" | "--seed" => {
                let value = option_value(args, i, "--seed")?;
                config.seed = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid seed '{}'", value))?,
                );
                i += 1;
            }
            "--exclude" => {
                let value = option_value(args, i, "--exclude")?;
                let class = TargetClass::from_name(value)
                    .ok_or_else(|| format!("unknown target class '{}'", value))?;
                if !config.excluded_classes.contains(&class) {
                    config.excluded_classes.push(class);
                }
                i += 1;
            }
            "--quick" => {
                config = apply_preset(config, SearchConfig::quick());
            }
            "--thorough" => {
                config = apply_preset(config, SearchConfig::thorough());
            }
            "-v" | "--verbose" => {
                verbose = true;
            }
            "--json" => {
                save_json = true;
            }
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            other if other.starts_with('-') => {
                return Err(format!("unknown option '{}'", other));
            }
            other => {
                sheet_path = Some(other.to_string());
            }
        }
        i += 1;
    }

    Ok((
        config,
        sheet_path.unwrap_or_else(|| DEFAULT_SHEET.to_string()),
        verbose,
        save_json,
    ))
}

/// Swap in a preset's budgets while keeping the flags already parsed.
fn apply_preset(current: SearchConfig, preset: SearchConfig) -> SearchConfig {
    SearchConfig {
        mode: current.mode,
        seed: current.seed,
        excluded_classes: current.excluded_classes,
        ..preset
    }
}

fn option_value<'a>(args: &'a [String], i: usize, name: &str) -> Result<&'a str, String> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("{} requires a value", name))
}

fn print_help() {
    println!("Hydraplan Attack Optimizer");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin optimize -- [OPTIONS] [SHEET]");
    println!();
    println!("ARGS:");
    println!("    SHEET               Damage sheet path (default: {})", DEFAULT_SHEET);
    println!();
    println!("OPTIONS:");
    println!("    -m, --mode <M>      annealing, bruteforce, or parallel (default: annealing)");
    println!("    -i, --iterations <N> Iteration/playout budget (default: 5000)");
    println!("    -w, --workers <W>   Parallel worker count (default: 8)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    --exclude <CLASS>   Drop a target class (repeatable)");
    println!("    --quick             Small budgets for a smoke run");
    println!("    --thorough          Large budgets, more workers");
    println!("    -v, --verbose       Print the best plan's attack log");
    println!("    --json              Save JSON report");
    println!("    -h, --help          Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin optimize -- damage.csv              # Default run");
    println!("    cargo run --bin optimize -- -m parallel -w 8        # Fan out 8 workers");
    println!("    cargo run --bin optimize -- --exclude Dreadful      # Skip a class");
    println!("    cargo run --bin optimize -- --seed 42 --json        # Reproducible + JSON");
}
