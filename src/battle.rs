//! Deterministic resolution of one attack assignment.
//!
//! A pass starts by resetting the battle state, then replays every
//! actor's planned attacks in roster order under the per-actor budget.
//! Identical roster + assignment always produce identical scores and
//! identical attack logs; the searches lean on that determinism.

use crate::model::{Assignment, AttackEvent, BattleState, Roster};
use serde::{Deserialize, Serialize};

/// Aggregate result of one resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassScore {
    /// Total worth earned. The one quantity the searches optimize.
    pub worth: u64,
    /// Remaining health summed over every part. Read-only diagnostic,
    /// never part of the acceptance criterion.
    pub health_left: u64,
    pub kills: u32,
}

/// Resolve a full assignment against freshly reset state.
///
/// Skip rules, applied per choice without consuming an action:
/// unresolvable target/part handle, part already dead, or zero damage
/// from this actor. Once an actor's budget is spent, the rest of its
/// list is dropped entirely.
pub fn resolve(roster: &Roster, state: &mut BattleState, assignment: &Assignment) -> PassScore {
    state.reset(roster);
    let mut worth = 0u64;
    let mut kills = 0u32;

    for actor in 0..roster.num_actors() {
        for &choice in assignment.actor_choices(actor) {
            if state.actions_remaining(actor) == 0 {
                break;
            }
            if let Some(event) = apply_attack(roster, state, actor, choice.target, choice.part) {
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

/// Execute one attack against `(target, local part)`.
///
/// Returns None on a skip: unresolvable handles, dead part, or no damage
/// capability. A hit clamps damage to remaining health, consumes one
/// action, records an event, and on a kill re-prices the survivors.
pub(crate) fn apply_attack(
    roster: &Roster,
    state: &mut BattleState,
    actor: usize,
    target: usize,
    part: usize,
) -> Option<AttackEvent> {
    let pid = roster.global_part_id(target, part)?;
    if !state.is_part_alive(pid) {
        return None;
    }
    let damage = roster.damage(actor, pid);
    if damage == 0 {
        return None;
    }

    let actual = state.take_damage(pid, damage);
    state.consume_action(actor);

    let killed = !state.is_part_alive(pid);
    let worth = if killed { state.part_worth(pid) } else { 0 };
    if killed {
        state.reprice_survivors(roster, target);
    }

    let event = AttackEvent {
        actor,
        target,
        part: pid,
        damage: actual,
        worth,
        killed,
    };
    state.events.push(event);
    Some(event)
}
