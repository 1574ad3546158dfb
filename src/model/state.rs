//! Reusable per-pass battle state.
//!
//! One arena holds every mutable quantity a resolution pass touches:
//! part health, kill counts, current worths, actor budgets, and the
//! attack log. `reset` restores all of it in place from the roster, so
//! thousands of passes reuse the same allocations.

use super::roster::Roster;
use serde::{Deserialize, Serialize};

/// Attacks available to each actor in one pass.
pub const ACTIONS_PER_PASS: u8 = 3;

/// One applied attack. Only attacks that dealt positive damage are
/// recorded; skipped choices leave no trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackEvent {
    pub actor: usize,
    pub target: usize,
    /// Global part handle.
    pub part: usize,
    /// Damage actually applied, after clamping to remaining health.
    pub damage: u64,
    /// Worth earned by this attack; 0 unless it killed the part.
    pub worth: u64,
    pub killed: bool,
}

#[derive(Debug, Clone)]
pub struct BattleState {
    health: Vec<u64>,
    kill_count: Vec<u32>,
    worth: Vec<u64>,
    actions: Vec<u8>,
    pub events: Vec<AttackEvent>,
}

impl BattleState {
    pub fn new(roster: &Roster) -> Self {
        let mut state = Self {
            health: Vec::new(),
            kill_count: Vec::new(),
            worth: Vec::new(),
            actions: Vec::new(),
            events: Vec::new(),
        };
        state.reset(roster);
        state
    }

    /// Restore every part to its start health, zero kill counts, re-derive
    /// worths, refill actor budgets, clear the attack log.
    pub fn reset(&mut self, roster: &Roster) {
        let parts = roster.num_parts();
        self.health.resize(parts, 0);
        self.kill_count.resize(parts, 0);
        self.worth.resize(parts, 0);
        for (pid, part) in roster.parts().iter().enumerate() {
            self.health[pid] = part.start_health;
            self.kill_count[pid] = 0;
            self.worth[pid] = match roster.target(part.target) {
                Some(target) => roster.worth_table().worth(target.class, 0),
                None => 0,
            };
        }
        self.actions.resize(roster.num_actors(), 0);
        self.actions.fill(ACTIONS_PER_PASS);
        self.events.clear();
    }

    pub fn part_health(&self, part: usize) -> u64 {
        self.health.get(part).copied().unwrap_or(0)
    }

    pub fn part_kill_count(&self, part: usize) -> u32 {
        self.kill_count.get(part).copied().unwrap_or(0)
    }

    pub fn part_worth(&self, part: usize) -> u64 {
        self.worth.get(part).copied().unwrap_or(0)
    }

    pub fn is_part_alive(&self, part: usize) -> bool {
        self.part_health(part) > 0
    }

    pub fn actions_remaining(&self, actor: usize) -> u8 {
        self.actions.get(actor).copied().unwrap_or(0)
    }

    pub fn consume_action(&mut self, actor: usize) {
        if let Some(budget) = self.actions.get_mut(actor) {
            *budget = budget.saturating_sub(1);
        }
    }

    /// Apply up to `amount` damage to a part, clamped to its remaining
    /// health. Returns the damage actually applied.
    pub fn take_damage(&mut self, part: usize, amount: u64) -> u64 {
        match self.health.get_mut(part) {
            Some(health) => {
                let actual = amount.min(*health);
                *health -= actual;
                actual
            }
            None => 0,
        }
    }

    /// A part of `target` just died: every surviving part of that target
    /// takes one more kill on its counter and is re-priced. The dead part
    /// keeps the worth it died at.
    pub fn reprice_survivors(&mut self, roster: &Roster, target: usize) {
        let Some(def) = roster.target(target) else {
            return;
        };
        for &pid in &def.parts {
            if self.health[pid] > 0 {
                self.kill_count[pid] += 1;
                self.worth[pid] = roster.worth_table().worth(def.class, self.kill_count[pid]);
            }
        }
    }

    pub fn is_target_alive(&self, roster: &Roster, target: usize) -> bool {
        roster
            .target(target)
            .map(|def| def.parts.iter().any(|&pid| self.is_part_alive(pid)))
            .unwrap_or(false)
    }

    pub fn target_health_left(&self, roster: &Roster, target: usize) -> u64 {
        roster
            .target(target)
            .map(|def| def.parts.iter().map(|&pid| self.part_health(pid)).sum())
            .unwrap_or(0)
    }

    /// Remaining health summed over every part of every target.
    pub fn total_health_left(&self) -> u64 {
        self.health.iter().sum()
    }

    /// All currently-alive `(target, local part index)` pairs, in roster
    /// order. The basis of the brute-force playout pick pool.
    pub fn alive_pairs(&self, roster: &Roster) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (tid, target) in roster.targets().iter().enumerate() {
            for (local, &pid) in target.parts.iter().enumerate() {
                if self.is_part_alive(pid) {
                    pairs.push((tid, local));
                }
            }
        }
        pairs
    }

    /// Snapshot of per-part health, indexed by global part handle.
    pub fn part_healths(&self) -> &[u64] {
        &self.health
    }
}
