//! Attack assignments: each actor's planned attacks for one pass.

use super::roster::Roster;
use serde::{Deserialize, Serialize};

/// One planned attack: a target handle plus the part's local index on
/// that target. Handles that fail to resolve are skipped by the
/// resolver at no cost, standing in for attacks planned against names
/// that no longer exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackChoice {
    pub target: usize,
    pub part: usize,
}

/// Per-actor ordered choice lists, indexed by actor handle. The
/// resolver only reads an assignment; optimizers clone and mutate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    choices: Vec<Vec<AttackChoice>>,
}

impl Assignment {
    pub fn empty(num_actors: usize) -> Self {
        Self {
            choices: vec![Vec::new(); num_actors],
        }
    }

    pub fn num_actors(&self) -> usize {
        self.choices.len()
    }

    /// The actor's choices in plan order. Unknown actors read as empty.
    pub fn actor_choices(&self, actor: usize) -> &[AttackChoice] {
        self.choices.get(actor).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn push(&mut self, actor: usize, choice: AttackChoice) {
        if actor >= self.choices.len() {
            self.choices.resize_with(actor + 1, Vec::new);
        }
        self.choices[actor].push(choice);
    }

    /// Resolve names through the roster and plan the attack. Returns
    /// false (planning nothing) when any name is unknown.
    pub fn push_named(&mut self, roster: &Roster, actor: &str, target: &str, part: &str) -> bool {
        let Some(actor_id) = roster.actor_id(actor) else {
            return false;
        };
        let Some(target_id) = roster.target_id(target) else {
            return false;
        };
        let Some(local) = roster
            .target(target_id)
            .and_then(|def| def.part_local_id(part))
        else {
            return false;
        };
        self.push(
            actor_id,
            AttackChoice {
                target: target_id,
                part: local,
            },
        );
        true
    }

    pub fn slot(&self, actor: usize, slot: usize) -> Option<AttackChoice> {
        self.choices.get(actor)?.get(slot).copied()
    }

    /// Replace the actor's choice at `slot`, appending when the slot is
    /// past the end of the list.
    pub fn set_slot(&mut self, actor: usize, slot: usize, choice: AttackChoice) {
        if actor >= self.choices.len() {
            self.choices.resize_with(actor + 1, Vec::new);
        }
        let list = &mut self.choices[actor];
        if slot < list.len() {
            list[slot] = choice;
        } else {
            list.push(choice);
        }
    }

    pub fn total_choices(&self) -> usize {
        self.choices.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worth::TargetClass;

    fn small_roster() -> Roster {
        let mut b = Roster::builder();
        let t = b.target("Gorgon", TargetClass::Elder);
        b.part(t, "Fang", 100).unwrap();
        b.actor("Rena");
        b.build().unwrap()
    }

    #[test]
    fn test_empty_assignment() {
        let a = Assignment::empty(2);
        assert_eq!(a.num_actors(), 2);
        assert_eq!(a.total_choices(), 0);
        assert!(a.actor_choices(0).is_empty());
        assert!(a.actor_choices(9).is_empty()); // out of range reads empty
    }

    #[test]
    fn test_push_and_slots() {
        let mut a = Assignment::empty(1);
        a.push(0, AttackChoice { target: 0, part: 1 });
        a.push(0, AttackChoice { target: 0, part: 0 });
        assert_eq!(a.slot(0, 0), Some(AttackChoice { target: 0, part: 1 }));
        assert_eq!(a.slot(0, 2), None);

        a.set_slot(0, 0, AttackChoice { target: 1, part: 0 });
        assert_eq!(a.slot(0, 0), Some(AttackChoice { target: 1, part: 0 }));

        // Setting past the end appends instead.
        a.set_slot(0, 7, AttackChoice { target: 2, part: 2 });
        assert_eq!(a.actor_choices(0).len(), 3);
    }

    #[test]
    fn test_push_named_resolves_handles() {
        let roster = small_roster();
        let mut a = Assignment::empty(roster.num_actors());
        assert!(a.push_named(&roster, "Rena", "Gorgon", "Fang"));
        assert_eq!(a.slot(0, 0), Some(AttackChoice { target: 0, part: 0 }));
    }

    #[test]
    fn test_push_named_unknown_name_plans_nothing() {
        let roster = small_roster();
        let mut a = Assignment::empty(roster.num_actors());
        assert!(!a.push_named(&roster, "Rena", "Gorgon", "Tail"));
        assert!(!a.push_named(&roster, "Rena", "Kraken", "Fang"));
        assert!(!a.push_named(&roster, "Ghost", "Gorgon", "Fang"));
        assert_eq!(a.total_choices(), 0);
    }
}
