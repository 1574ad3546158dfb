//! Head worth pricing per hydra class and kill count.
//!
//! Destroying a head raises the price of the surviving heads on the same
//! hydra, so worth is looked up as (class, kills already suffered). The
//! table is an immutable value owned by the roster; lookups past the
//! deepest row saturate to the last row.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;

/// The four hydra classes, in worth-table column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetClass {
    Common,
    Elder,
    Ancient,
    Dreadful,
}

impl TargetClass {
    pub const ALL: [TargetClass; 4] = [
        TargetClass::Common,
        TargetClass::Elder,
        TargetClass::Ancient,
        TargetClass::Dreadful,
    ];

    /// Parse a class name as it appears in sheet headers. Case-insensitive.
    pub fn from_name(name: &str) -> Option<TargetClass> {
        let name = name.trim();
        TargetClass::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    pub fn name(&self) -> &'static str {
        match self {
            TargetClass::Common => "Common",
            TargetClass::Elder => "Elder",
            TargetClass::Ancient => "Ancient",
            TargetClass::Dreadful => "Dreadful",
        }
    }

    fn column(&self) -> usize {
        match self {
            TargetClass::Common => 0,
            TargetClass::Elder => 1,
            TargetClass::Ancient => 2,
            TargetClass::Dreadful => 3,
        }
    }
}

impl fmt::Display for TargetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Worth of the next destroyed head, by (kills already suffered, class).
///
/// Row N applies to a head that dies after N of its siblings have already
/// been destroyed in the current pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorthTable {
    rows: Vec<[u64; 4]>,
}

impl WorthTable {
    /// The live game pricing.
    pub fn standard() -> Self {
        Self {
            rows: vec![
                [25, 40, 70, 150],
                [35, 50, 85, 190],
                [40, 65, 110, 280],
                [45, 665, 120, 280],
                [50, 765, 150, 280],
                [80, 800, 170, 999],
            ],
        }
    }

    /// Build a custom table. Fails on an empty table or on any class whose
    /// worth decreases as kills accumulate.
    pub fn from_rows(rows: Vec<[u64; 4]>) -> io::Result<Self> {
        if rows.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "worth table has no rows",
            ));
        }
        for class in TargetClass::ALL {
            let col = class.column();
            for (i, pair) in rows.windows(2).enumerate() {
                if pair[1][col] < pair[0][col] {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!(
                            "worth table for {} decreases at row {} ({} -> {})",
                            class,
                            i + 1,
                            pair[0][col],
                            pair[1][col]
                        ),
                    ));
                }
            }
        }
        Ok(Self { rows })
    }

    /// Worth of a head destroyed after `kill_count` prior kills on its
    /// hydra. Saturates at the deepest row.
    pub fn worth(&self, class: TargetClass, kill_count: u32) -> u64 {
        let row = (kill_count as usize).min(self.rows.len() - 1);
        self.rows[row][class.column()]
    }

    /// Number of defined rows.
    pub fn depth(&self) -> usize {
        self.rows.len()
    }
}

impl Default for WorthTable {
    fn default() -> Self {
        Self::standard()
    }
}
