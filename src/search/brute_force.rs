//! Independent random playouts.
//!
//! No acceptance criterion and no local mutation: every playout starts
//! from reset state, shuffles the actor processing order, and lets each
//! actor spend its budget on uniformly random alive (target, part)
//! pairs, applying damage as it goes. The single best playout wins.
//! Broad but unguided, which makes it a useful baseline for annealing.

use super::config::{SearchConfig, SearchMode};
use super::outcome::SearchOutcome;
use crate::battle::{apply_attack, PassScore};
use crate::model::{AttackEvent, BattleState, Roster};
use rand::seq::SliceRandom;
use rand::Rng;
use std::io;

/// Run independent playouts and keep the best one.
///
/// Playouts deliver an event log rather than an assignment: picks are
/// made greedily against live state, so there is no plan to replay.
pub fn brute_force(
    roster: &Roster,
    config: &SearchConfig,
    rng: &mut impl Rng,
) -> io::Result<SearchOutcome> {
    if roster.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "cannot search an empty roster",
        ));
    }

    let mut state = BattleState::new(roster);
    let mut order: Vec<usize> = (0..roster.num_actors()).collect();

    let mut best_score: Option<PassScore> = None;
    let mut best_events: Vec<AttackEvent> = Vec::new();
    let mut best_healths: Vec<u64> = Vec::new();
    let mut improvements = 0u32;
    let attempts = config.iterations.max(1);

    for _ in 0..attempts {
        let score = random_playout(roster, &mut state, &mut order, rng);
        if best_score.map(|best| score.worth > best.worth).unwrap_or(true) {
            if best_score.is_some() {
                improvements += 1;
            }
            best_score = Some(score);
            best_events = state.events.clone();
            best_healths = state.part_healths().to_vec();
        }
    }

    // attempts >= 1, so a score always exists here
    let score = best_score.unwrap_or(PassScore {
        worth: 0,
        health_left: state.total_health_left(),
        kills: 0,
    });
    Ok(SearchOutcome {
        mode: SearchMode::BruteForce,
        score,
        assignment: None,
        events: best_events,
        part_healths: best_healths,
        iterations_run: attempts,
        improvements,
    })
}

/// One full playout against freshly reset state. Actor order is
/// shuffled each time; uniform pair picks remove positional bias among
/// targets and parts. Picks are drawn from the pairs the actor can
/// actually hurt, so every pick lands and the budget, not draw luck,
/// bounds the playout: each actor attacks until its actions run out or
/// nothing it can damage remains alive.
fn random_playout(
    roster: &Roster,
    state: &mut BattleState,
    order: &mut [usize],
    rng: &mut impl Rng,
) -> PassScore {
    state.reset(roster);
    order.shuffle(rng);

    let mut worth = 0u64;
    let mut kills = 0u32;
    for &actor in order.iter() {
        while state.actions_remaining(actor) > 0 {
            let pool = hittable_pairs(roster, state, actor);
            if pool.is_empty() {
                break;
            }
            let (target, part) = pool[rng.gen_range(0..pool.len())];
            if let Some(event) = apply_attack(roster, state, actor, target, part) {
                worth += event.worth;
                kills += event.killed as u32;
            }
        }
    }

    PassScore {
        worth,
        health_left: state.total_health_left(),
        kills,
    }
}

/// The alive pairs this actor deals positive damage to. Every pick
/// from this pool consumes an action, which keeps the playout loop
/// bounded by the budget.
fn hittable_pairs(roster: &Roster, state: &BattleState, actor: usize) -> Vec<(usize, usize)> {
    state
        .alive_pairs(roster)
        .into_iter()
        .filter(|&(target, local)| {
            roster
                .global_part_id(target, local)
                .map(|pid| roster.damage(actor, pid) > 0)
                .unwrap_or(false)
        })
        .collect()
}
