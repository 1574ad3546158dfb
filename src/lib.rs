//! Hydraplan - Attack Allocation Optimizer Library
//!
//! Searches for the attack allocation that earns the most worth against
//! a set of multi-part targets, given each actor's damage capabilities
//! and a budget of three attacks per pass.
//!
//! The immutable roster ([`model::Roster`]) is loaded once from a damage
//! sheet ([`data::DamageTable`]); every pass replays an assignment
//! against a reusable [`model::BattleState`] via [`battle::resolve`].
//! The [`search`] module drives annealing, brute-force playouts, and the
//! parallel fan-out over that resolver.

pub mod battle;
pub mod data;
pub mod model;
pub mod report;
pub mod search;
pub mod worth;
