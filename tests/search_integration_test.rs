//! Integration test: Search pipeline
//!
//! Runs sheet → roster → search → report end to end for every mode and
//! checks the monotone-improving-best property shared by the searches.

use hydraplan::battle::resolve;
use hydraplan::data::DamageTable;
use hydraplan::model::BattleState;
use hydraplan::report::PlanReport;
use hydraplan::search::{self, anneal, brute_force, SearchConfig, SearchMode};
use hydraplan::worth::WorthTable;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Two actors, two small targets, everything one-shottable, so a good
/// search clears the board inside the 6 available actions.
const SHEET: &str = "\
Name, Fang - Common, Maw - Common, Eye - Elder, Claw - Elder
Rena, 100, 100, 0, 100
Sato, 100, 0, 100, 100
Health, 100, 100, 100, 100
";

fn board_roster() -> hydraplan::model::Roster {
    let table = DamageTable::parse(SHEET).unwrap();
    table.build_roster(WorthTable::standard(), &[]).unwrap()
}

fn config(mode: SearchMode, seed: u64) -> SearchConfig {
    SearchConfig {
        mode,
        iterations: 1500,
        workers: 2,
        seed: Some(seed),
        stagnation_patience: 1500,
        ..SearchConfig::default()
    }
}

// Full clear: Common pays rows 0+1 (25+35), Elder pays rows 0+1 (40+50).
const FULL_CLEAR_WORTH: u64 = 25 + 35 + 40 + 50;

// ─── End-to-end per mode ────────────────────────────────────────────

#[test]
fn test_annealing_clears_the_board() {
    let roster = board_roster();
    let outcome = search::run(&roster, &config(SearchMode::Annealing, 42)).unwrap();
    assert_eq!(outcome.score.worth, FULL_CLEAR_WORTH);
    assert_eq!(outcome.score.kills, 4);
    assert_eq!(outcome.score.health_left, 0);

    // The reported assignment replays to the reported score.
    let plan = outcome.assignment.clone().unwrap();
    let mut state = BattleState::new(&roster);
    assert_eq!(resolve(&roster, &mut state, &plan), outcome.score);
}

#[test]
fn test_brute_force_clears_the_board() {
    let roster = board_roster();
    let outcome = search::run(&roster, &config(SearchMode::BruteForce, 42)).unwrap();
    assert_eq!(outcome.score.worth, FULL_CLEAR_WORTH);
    assert_eq!(outcome.score.health_left, 0);
    assert!(outcome.assignment.is_none());
    assert_eq!(outcome.events.len(), 4);
}

#[test]
fn test_parallel_clears_the_board() {
    let roster = board_roster();
    let outcome = search::run(&roster, &config(SearchMode::Parallel, 42)).unwrap();
    assert_eq!(outcome.mode, SearchMode::Parallel);
    assert_eq!(outcome.score.worth, FULL_CLEAR_WORTH);
}

// ─── Shared search properties ───────────────────────────────────────

#[test]
fn test_search_never_worse_than_initial_floor() {
    let roster = board_roster();
    for seed in [1u64, 2, 3, 4, 5] {
        let floor_config = SearchConfig {
            iterations: 0,
            seed: Some(seed),
            ..config(SearchMode::Annealing, seed)
        };
        let floor = anneal(&roster, &floor_config, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();

        let annealed = anneal(
            &roster,
            &config(SearchMode::Annealing, seed),
            &mut ChaCha8Rng::seed_from_u64(seed),
        )
        .unwrap();
        let brute = brute_force(
            &roster,
            &config(SearchMode::BruteForce, seed),
            &mut ChaCha8Rng::seed_from_u64(seed),
        )
        .unwrap();

        assert!(annealed.score.worth >= floor.score.worth, "seed {}", seed);
        assert!(brute.score.worth >= floor.score.worth, "seed {}", seed);
    }
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let roster = board_roster();
    for mode in [SearchMode::Annealing, SearchMode::BruteForce, SearchMode::Parallel] {
        let first = search::run(&roster, &config(mode, 99)).unwrap();
        let second = search::run(&roster, &config(mode, 99)).unwrap();
        assert_eq!(first.score, second.score, "mode {}", mode.name());
        assert_eq!(first.events, second.events, "mode {}", mode.name());
    }
}

#[test]
fn test_empty_roster_is_fatal_in_every_mode() {
    let roster = hydraplan::model::Roster::builder().build().unwrap();
    for mode in [SearchMode::Annealing, SearchMode::BruteForce, SearchMode::Parallel] {
        assert!(search::run(&roster, &config(mode, 1)).is_err());
    }
}

// ─── Reporting ──────────────────────────────────────────────────────

#[test]
fn test_report_built_without_re_resolution() {
    let roster = board_roster();
    let outcome = search::run(&roster, &config(SearchMode::Annealing, 42)).unwrap();
    let report = PlanReport::from_outcome(&roster, &outcome);

    assert_eq!(report.score, outcome.score);
    assert!(report.parts.iter().all(|p| p.destroyed));
    let damage_total: u64 = report.actors.iter().map(|a| a.damage_dealt).sum();
    assert_eq!(damage_total, 400); // four 100-health parts cleared

    let text = report.to_text();
    assert!(text.contains("Common"));
    assert!(text.contains("Elder"));
    assert!(text.contains("Rena"));

    let json = report.to_json();
    assert!(serde_json::from_str::<serde_json::Value>(&json).is_ok());
}
