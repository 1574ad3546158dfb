//! Immutable actor/target roster.
//!
//! Built once at load time and shared read-only by every search run. All
//! name resolution happens here, against maps built at construction; the
//! resolver and the optimizers work purely on integer handles. Per-pass
//! mutable state (health, kills, worth, budgets) lives in
//! [`BattleState`](super::BattleState), not on these types.

use crate::worth::{TargetClass, WorthTable};
use std::collections::HashMap;
use std::io;

/// One destructible head. `target` is the owning target's handle.
#[derive(Debug, Clone)]
pub struct PartDef {
    pub name: String,
    pub target: usize,
    pub start_health: u64,
}

/// One hydra: a named, classed, ordered collection of parts.
#[derive(Debug, Clone)]
pub struct TargetDef {
    pub name: String,
    pub class: TargetClass,
    /// Global part handles in insertion order (the order of the source data).
    pub parts: Vec<usize>,
    parts_by_name: HashMap<String, usize>,
}

impl TargetDef {
    /// Local index of a part by name, position within `parts`.
    pub fn part_local_id(&self, name: &str) -> Option<usize> {
        self.parts_by_name.get(name).copied()
    }
}

#[derive(Debug, Clone)]
pub struct ActorDef {
    pub name: String,
}

/// The full roster plus the damage matrix and worth table.
#[derive(Debug, Clone)]
pub struct Roster {
    actors: Vec<ActorDef>,
    targets: Vec<TargetDef>,
    parts: Vec<PartDef>,
    /// Dense matrix, row-major by actor: `damage[actor * parts + part]`.
    damage: Vec<u64>,
    worth_table: WorthTable,
    actor_index: HashMap<String, usize>,
    target_index: HashMap<String, usize>,
}

impl Roster {
    pub fn builder() -> RosterBuilder {
        RosterBuilder::new()
    }

    pub fn num_actors(&self) -> usize {
        self.actors.len()
    }

    pub fn num_targets(&self) -> usize {
        self.targets.len()
    }

    pub fn num_parts(&self) -> usize {
        self.parts.len()
    }

    pub fn actors(&self) -> &[ActorDef] {
        &self.actors
    }

    pub fn targets(&self) -> &[TargetDef] {
        &self.targets
    }

    pub fn parts(&self) -> &[PartDef] {
        &self.parts
    }

    pub fn actor(&self, id: usize) -> Option<&ActorDef> {
        self.actors.get(id)
    }

    pub fn target(&self, id: usize) -> Option<&TargetDef> {
        self.targets.get(id)
    }

    pub fn part(&self, id: usize) -> Option<&PartDef> {
        self.parts.get(id)
    }

    /// Damage `actor` deals to the part with global handle `part`.
    /// Out-of-range handles and missing entries both read as 0.
    pub fn damage(&self, actor: usize, part: usize) -> u64 {
        if actor >= self.actors.len() || part >= self.parts.len() {
            return 0;
        }
        self.damage[actor * self.parts.len() + part]
    }

    pub fn worth_table(&self) -> &WorthTable {
        &self.worth_table
    }

    pub fn actor_id(&self, name: &str) -> Option<usize> {
        self.actor_index.get(name).copied()
    }

    pub fn target_id(&self, name: &str) -> Option<usize> {
        self.target_index.get(name).copied()
    }

    /// Global part handle for `(target, local index)`.
    pub fn global_part_id(&self, target: usize, local: usize) -> Option<usize> {
        self.targets.get(target)?.parts.get(local).copied()
    }

    /// True when no actor or no part exists; searches reject such rosters.
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty() || self.parts.is_empty()
    }
}

/// Incremental roster construction. Handles returned by `actor`, `target`
/// and `part` are the same handles the built roster uses.
#[derive(Debug, Default)]
pub struct RosterBuilder {
    actors: Vec<ActorDef>,
    targets: Vec<TargetDef>,
    parts: Vec<PartDef>,
    damage_entries: Vec<(usize, usize, u64)>,
    worth_table: WorthTable,
}

impl RosterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_worth_table(&mut self, table: WorthTable) {
        self.worth_table = table;
    }

    pub fn actor(&mut self, name: &str) -> usize {
        self.actors.push(ActorDef {
            name: name.to_string(),
        });
        self.actors.len() - 1
    }

    pub fn target(&mut self, name: &str, class: TargetClass) -> usize {
        self.targets.push(TargetDef {
            name: name.to_string(),
            class,
            parts: Vec::new(),
            parts_by_name: HashMap::new(),
        });
        self.targets.len() - 1
    }

    /// Add a part to `target`. Start health must be positive and the part
    /// name unique within its target.
    pub fn part(&mut self, target: usize, name: &str, start_health: u64) -> io::Result<usize> {
        let owner = self.targets.get_mut(target).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("part '{}' references unknown target {}", name, target),
            )
        })?;
        if start_health == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("part '{}' of '{}' has zero start health", name, owner.name),
            ));
        }
        if owner.parts_by_name.contains_key(name) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("duplicate part '{}' on target '{}'", name, owner.name),
            ));
        }
        let id = self.parts.len();
        owner.parts_by_name.insert(name.to_string(), owner.parts.len());
        owner.parts.push(id);
        self.parts.push(PartDef {
            name: name.to_string(),
            target,
            start_health,
        });
        Ok(id)
    }

    /// Record the damage `actor` deals to `part`. Later entries overwrite
    /// earlier ones; handles are validated at `build`.
    pub fn damage(&mut self, actor: usize, part: usize, value: u64) {
        self.damage_entries.push((actor, part, value));
    }

    pub fn build(self) -> io::Result<Roster> {
        let mut actor_index = HashMap::new();
        for (id, actor) in self.actors.iter().enumerate() {
            if actor_index.insert(actor.name.clone(), id).is_some() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("duplicate actor '{}'", actor.name),
                ));
            }
        }
        let mut target_index = HashMap::new();
        for (id, target) in self.targets.iter().enumerate() {
            if target_index.insert(target.name.clone(), id).is_some() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("duplicate target '{}'", target.name),
                ));
            }
        }

        let mut damage = vec![0u64; self.actors.len() * self.parts.len()];
        for (actor, part, value) in self.damage_entries {
            if actor >= self.actors.len() || part >= self.parts.len() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("damage entry references unknown actor {} or part {}", actor, part),
                ));
            }
            damage[actor * self.parts.len() + part] = value;
        }

        Ok(Roster {
            actors: self.actors,
            targets: self.targets,
            parts: self.parts,
            damage,
            worth_table: self.worth_table,
            actor_index,
            target_index,
        })
    }
}
