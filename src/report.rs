//! Plan report generation.
//!
//! Built entirely from a search outcome plus the roster; nothing is
//! re-resolved. The outcome's event log and final healths carry all the
//! per-part and per-actor detail the breakdown needs.

use crate::battle::PassScore;
use crate::model::Roster;
use crate::search::{SearchMode, SearchOutcome};
use serde::Serialize;

/// How much damage one actor dealt to one part.
#[derive(Debug, Clone, Serialize)]
pub struct AttackerShare {
    pub actor: String,
    pub damage: u64,
}

/// Final standing of one part after the best pass.
#[derive(Debug, Clone, Serialize)]
pub struct PartStanding {
    pub target: String,
    pub part: String,
    pub start_health: u64,
    pub final_health: u64,
    pub destroyed: bool,
    pub worth_earned: u64,
    pub attackers: Vec<AttackerShare>,
}

/// Per-actor totals over the best pass.
#[derive(Debug, Clone, Serialize)]
pub struct ActorSummary {
    pub name: String,
    pub attacks: u32,
    pub damage_dealt: u64,
    pub kills: u32,
    pub worth_earned: u64,
}

/// One attack of the best pass, with names resolved.
#[derive(Debug, Clone, Serialize)]
pub struct EventRow {
    pub actor: String,
    pub target: String,
    pub part: String,
    pub damage: u64,
    pub worth: u64,
    pub killed: bool,
}

/// The full report for a search outcome.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub mode: SearchMode,
    pub score: PassScore,
    pub iterations_run: u32,
    pub improvements: u32,
    pub parts: Vec<PartStanding>,
    pub actors: Vec<ActorSummary>,
    pub events: Vec<EventRow>,
}

impl PlanReport {
    pub fn from_outcome(roster: &Roster, outcome: &SearchOutcome) -> Self {
        let mut parts = Vec::with_capacity(roster.num_parts());
        for target in roster.targets() {
            for &pid in &target.parts {
                let def = match roster.part(pid) {
                    Some(def) => def,
                    None => continue,
                };
                let final_health = outcome
                    .part_healths
                    .get(pid)
                    .copied()
                    .unwrap_or(def.start_health);

                let mut attackers: Vec<AttackerShare> = Vec::new();
                let mut worth_earned = 0u64;
                for event in outcome.events.iter().filter(|e| e.part == pid) {
                    worth_earned += event.worth;
                    let actor_name = roster
                        .actor(event.actor)
                        .map(|a| a.name.clone())
                        .unwrap_or_default();
                    match attackers.iter_mut().find(|share| share.actor == actor_name) {
                        Some(share) => share.damage += event.damage,
                        None => attackers.push(AttackerShare {
                            actor: actor_name,
                            damage: event.damage,
                        }),
                    }
                }

                parts.push(PartStanding {
                    target: target.name.clone(),
                    part: def.name.clone(),
                    start_health: def.start_health,
                    final_health,
                    destroyed: final_health == 0,
                    worth_earned,
                    attackers,
                });
            }
        }

        let mut actors = Vec::with_capacity(roster.num_actors());
        for (aid, actor) in roster.actors().iter().enumerate() {
            let mut summary = ActorSummary {
                name: actor.name.clone(),
                attacks: 0,
                damage_dealt: 0,
                kills: 0,
                worth_earned: 0,
            };
            for event in outcome.events.iter().filter(|e| e.actor == aid) {
                summary.attacks += 1;
                summary.damage_dealt += event.damage;
                summary.kills += event.killed as u32;
                summary.worth_earned += event.worth;
            }
            actors.push(summary);
        }

        let events = outcome
            .events
            .iter()
            .map(|event| EventRow {
                actor: roster
                    .actor(event.actor)
                    .map(|a| a.name.clone())
                    .unwrap_or_default(),
                target: roster
                    .target(event.target)
                    .map(|t| t.name.clone())
                    .unwrap_or_default(),
                part: roster
                    .part(event.part)
                    .map(|p| p.name.clone())
                    .unwrap_or_default(),
                damage: event.damage,
                worth: event.worth,
                killed: event.killed,
            })
            .collect();

        Self {
            mode: outcome.mode,
            score: outcome.score,
            iterations_run: outcome.iterations_run,
            improvements: outcome.improvements,
            parts,
            actors,
            events,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                      ATTACK PLAN REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Mode: {}   Iterations: {}   Improvements: {}\n\n",
            self.mode.name(),
            self.iterations_run,
            self.improvements
        ));

        report.push_str("── SCORE ────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Worth Earned:  {}\n", self.score.worth));
        report.push_str(&format!("  Kills:         {}\n", self.score.kills));
        report.push_str(&format!("  Health Left:   {}\n\n", self.score.health_left));

        report.push_str("── TARGETS ──────────────────────────────────────────────────────\n");
        let mut current_target: Option<&str> = None;
        for part in &self.parts {
            if current_target != Some(part.target.as_str()) {
                current_target = Some(part.target.as_str());
                let destroyed = self
                    .parts
                    .iter()
                    .filter(|p| p.target == part.target && p.destroyed)
                    .count();
                let total = self.parts.iter().filter(|p| p.target == part.target).count();
                report.push_str(&format!(
                    "  {} ({}/{} parts destroyed)\n",
                    part.target, destroyed, total
                ));
            }
            let status = if part.destroyed {
                format!("DESTROYED (worth {})", part.worth_earned)
            } else {
                format!("{} / {} left", part.final_health, part.start_health)
            };
            report.push_str(&format!("    {:<12} {}\n", part.part, status));
            for share in &part.attackers {
                report.push_str(&format!("      {:<12} dealt {}\n", share.actor, share.damage));
            }
        }
        report.push('\n');

        report.push_str("── ACTORS ───────────────────────────────────────────────────────\n");
        report.push_str("  Actor           Attacks   Damage          Kills   Worth\n");
        for actor in &self.actors {
            report.push_str(&format!(
                "  {:<15} {:>7}   {:>13}   {:>5}   {:>5}\n",
                actor.name, actor.attacks, actor.damage_dealt, actor.kills, actor.worth_earned
            ));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Render the best pass's attack log, in execution order.
    pub fn event_log_text(&self) -> String {
        let mut log = String::new();
        log.push_str("── ATTACK LOG ───────────────────────────────────────────────────\n");
        for (i, event) in self.events.iter().enumerate() {
            let kill_note = if event.killed {
                format!("  KILL +{}", event.worth)
            } else {
                String::new()
            };
            log.push_str(&format!(
                "  {:>3}. {} -> {} / {}: {} damage{}\n",
                i + 1,
                event.actor,
                event.target,
                event.part,
                event.damage,
                kill_note
            ));
        }
        log
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
