//! Immutable game tables
//!
//! Everything numeric the engines look up lives in [`GameTables`], which is
//! loaded once and then borrowed. The built-in defaults are complete; a JSON
//! document may replace any of them.

mod costs;
mod deadliness;
mod slays;
mod store;

pub use costs::{CostMode, CostTable, CurseCost, FlagCost, PropertyCost};
pub use deadliness::{Deadliness, DeadlinessTable, DEADLINESS_MAX};
pub use slays::{BrandEntry, SlayBrandRegistry, SlayEntry};
pub use store::{PriceTables, StoreOwner, CHARISMA_MAX, CHARISMA_MIN};

use serde::{Deserialize, Serialize};

use crate::world::TableError;

/// All lookup tables used by combat, artifact design and pricing
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameTables {
    pub deadliness: DeadlinessTable,
    pub slays: SlayBrandRegistry,
    pub costs: CostTable,
    pub prices: PriceTables,
}

impl GameTables {
    /// Parse tables from JSON. Missing sections keep their defaults; every
    /// section is validated.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let tables: GameTables = serde_json::from_str(json)?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn to_json(&self) -> Result<String, TableError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), TableError> {
        self.deadliness.validate()?;
        self.slays.validate()?;
        self.costs.validate()?;
        self.prices.validate()?;
        Ok(())
    }
}
