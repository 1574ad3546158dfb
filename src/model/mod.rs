//! Roster, battle state, and assignment types.
//!
//! The roster is immutable after load; every mutable per-pass quantity
//! lives in the battle-state arena and is reset in place between passes.

mod assignment;
mod roster;
mod state;

pub use assignment::{Assignment, AttackChoice};
pub use roster::{ActorDef, PartDef, Roster, RosterBuilder, TargetDef};
pub use state::{AttackEvent, BattleState, ACTIONS_PER_PASS};
