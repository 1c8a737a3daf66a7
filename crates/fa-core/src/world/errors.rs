//! Error types for fallible operations
//!
//! Misses, failed quality purchases and other expected negative outcomes are
//! plain values. These enums cover the operations that can genuinely fail:
//! loading tables, store transactions, artifact table capacity and firing
//! without a usable launcher.

use thiserror::Error;

/// Malformed configuration tables
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("table '{table}' has {found} entries, expected {expected}")]
    WrongLength {
        table: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("table '{table}' decreases at index {index}")]
    NotMonotonic { table: &'static str, index: usize },

    #[error("table '{table}' has out-of-range value {value} at index {index}")]
    OutOfRange {
        table: &'static str,
        index: usize,
        value: i64,
    },

    #[error("setting '{setting}' is out of range: {value}")]
    BadSetting { setting: &'static str, value: i64 },

    #[error("could not parse tables: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for TableError {
    fn from(err: serde_json::Error) -> Self {
        TableError::Parse(err.to_string())
    }
}

/// Store transaction failures. None of these leave gold or stock changed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("not enough gold: need {price}, have {gold}")]
    NotEnoughGold { price: i32, gold: i32 },

    #[error("the store has no room for that item")]
    StockFull,

    #[error("only {available} available, {requested} requested")]
    NotEnoughUnits { requested: i32, available: i32 },

    #[error("no item in slot {0}")]
    NoSuchSlot(usize),

    #[error("the store does not trade in that item")]
    WillNotBuy,

    #[error("the item is worthless")]
    Worthless,
}

/// Artifact design failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForgeError {
    #[error("artifact table is full ({capacity} slots)")]
    TableFull { capacity: usize },

    #[error("no base item kind qualifies for an artifact")]
    NoBaseKind,
}

/// Reasons a missile attack cannot start
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MissileError {
    #[error("you have nothing to fire with")]
    NoLauncher,

    #[error("that ammunition does not fit your launcher")]
    WrongAmmo,

    #[error("no item in slot {0}")]
    NoSuchItem(usize),

    #[error("you cannot throw that")]
    CannotThrow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::NotEnoughGold { price: 120, gold: 40 };
        assert_eq!(err.to_string(), "not enough gold: need 120, have 40");
        let err = ForgeError::TableFull { capacity: 8 };
        assert!(err.to_string().contains('8'));
    }

    #[test]
    fn test_json_error_conversion() {
        let err: TableError = serde_json::from_str::<Vec<i32>>("[1,").unwrap_err().into();
        assert!(matches!(err, TableError::Parse(_)));
    }
}
