//! Search results.

use super::config::SearchMode;
use crate::battle::PassScore;
use crate::model::{Assignment, AttackEvent};
use serde::{Deserialize, Serialize};

/// The best plan a search found, carrying everything reporting needs —
/// score, attack log, final part healths — captured when the best pass
/// ran, so nothing has to be re-resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub mode: SearchMode,
    pub score: PassScore,
    /// The winning assignment. Brute-force playouts pick greedily as
    /// they go, so they deliver an event log instead.
    pub assignment: Option<Assignment>,
    /// Attack log of the best pass, in execution order.
    pub events: Vec<AttackEvent>,
    /// Final health per part (indexed by global part handle) after the
    /// best pass.
    pub part_healths: Vec<u64>,
    /// Iterations actually executed; early stop can cut this short.
    pub iterations_run: u32,
    /// How many times the best score improved.
    pub improvements: u32,
}
