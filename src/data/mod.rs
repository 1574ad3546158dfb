//! External data loading.

mod damage_table;

pub use damage_table::{ColumnDef, DamageTable};
