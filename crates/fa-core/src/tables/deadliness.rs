//! Deadliness conversion
//!
//! Deadliness behaves like a damage bonus, but instead of adding a flat
//! amount it scales the average die value by a percentage read from a
//! diminishing-returns table.

use serde::{Deserialize, Serialize};

use crate::fixed::ScaledInt;
use crate::world::TableError;

/// Largest magnitude of deadliness the table covers
pub const DEADLINESS_MAX: i32 = 150;

/// A deadliness value, always within `[-150, 150]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Deadliness(i16);

impl Deadliness {
    /// Clamp any value into range
    pub fn new(value: i32) -> Self {
        Self(value.clamp(-DEADLINESS_MAX, DEADLINESS_MAX) as i16)
    }

    pub const fn get(self) -> i32 {
        self.0 as i32
    }

    pub const fn magnitude(self) -> usize {
        self.0.unsigned_abs() as usize
    }
}

impl From<i32> for Deadliness {
    fn from(value: i32) -> Self {
        Deadliness::new(value)
    }
}

const DEFAULT_CONVERSION: [i32; 151] = [
    0, //
    5, 10, 14, 18, 22, 26, 30, 33, 36, 39, //
    42, 45, 48, 51, 54, 57, 60, 63, 66, 69, //
    72, 75, 78, 81, 84, 87, 90, 93, 96, 99, //
    102, 104, 107, 109, 112, 114, 117, 119, 122, 124, //
    127, 129, 132, 134, 137, 139, 142, 144, 147, 149, //
    152, 154, 157, 159, 162, 164, 167, 169, 172, 174, //
    176, 178, 180, 182, 184, 186, 188, 190, 192, 194, //
    196, 198, 200, 202, 204, 206, 208, 210, 212, 214, //
    216, 218, 220, 222, 224, 226, 228, 230, 232, 234, //
    236, 238, 240, 242, 244, 246, 248, 250, 251, 253, //
    255, 257, 259, 261, 263, 265, 267, 269, 271, 273, //
    275, 277, 279, 281, 283, 285, 287, 289, 291, 293, //
    295, 297, 299, 301, 303, 305, 307, 309, 311, 313, //
    315, 317, 319, 321, 323, 325, 327, 329, 331, 333, //
    335, 337, 339, 341, 343, 345, 347, 349, 351, 352, //
];

/// Percentage damage bonus by deadliness magnitude
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeadlinessTable {
    percent: Vec<i32>,
}

impl Default for DeadlinessTable {
    fn default() -> Self {
        Self {
            percent: DEFAULT_CONVERSION.to_vec(),
        }
    }
}

impl DeadlinessTable {
    /// Build a table, checking it has one entry per magnitude from 0 to 150,
    /// starts at zero and never decreases.
    pub fn new(percent: Vec<i32>) -> Result<Self, TableError> {
        let table = Self { percent };
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), TableError> {
        let expected = DEADLINESS_MAX as usize + 1;
        if self.percent.len() != expected {
            return Err(TableError::WrongLength {
                table: "deadliness",
                expected,
                found: self.percent.len(),
            });
        }
        if self.percent[0] != 0 {
            return Err(TableError::OutOfRange {
                table: "deadliness",
                index: 0,
                value: self.percent[0] as i64,
            });
        }
        if let Some(index) = self.percent.windows(2).position(|w| w[1] < w[0]) {
            return Err(TableError::NotMonotonic {
                table: "deadliness",
                index: index + 1,
            });
        }
        Ok(())
    }

    /// Percentage bonus for a deadliness value's magnitude
    pub fn percent(&self, deadliness: Deadliness) -> i32 {
        self.percent
            .get(deadliness.magnitude())
            .copied()
            .unwrap_or(0)
    }

    /// The percentage factor deadliness multiplies damage by (100 = none).
    ///
    /// Negative deadliness reduces damage; once the table reaches 100% the
    /// factor is exactly zero.
    pub fn factor(&self, deadliness: Deadliness) -> i32 {
        let pct = self.percent(deadliness);
        if deadliness.get() >= 0 {
            100 + pct
        } else if pct >= 100 {
            0
        } else {
            100 - pct
        }
    }

    /// Apply deadliness to an average die value
    pub fn apply(&self, avg: ScaledInt, deadliness: Deadliness) -> ScaledInt {
        avg.apply_percent(self.factor(deadliness))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_valid() {
        let table = DeadlinessTable::default();
        assert!(table.validate().is_ok());
        assert_eq!(table.percent(Deadliness::new(150)), 352);
        assert_eq!(table.percent(Deadliness::new(10)), 39);
    }

    #[test]
    fn test_deadliness_clamped() {
        assert_eq!(Deadliness::new(400).get(), 150);
        assert_eq!(Deadliness::new(-999).get(), -150);
        assert_eq!(Deadliness::from(-20).magnitude(), 20);
    }

    #[test]
    fn test_factor_signs() {
        let table = DeadlinessTable::default();
        assert_eq!(table.factor(Deadliness::new(0)), 100);
        assert_eq!(table.factor(Deadliness::new(1)), 105);
        assert_eq!(table.factor(Deadliness::new(-1)), 95);
        assert_eq!(table.factor(Deadliness::new(-30)), 1);
        assert_eq!(table.factor(Deadliness::new(-31)), 0);
        assert_eq!(table.factor(Deadliness::new(-150)), 0);
    }

    #[test]
    fn test_rejects_bad_tables() {
        assert!(matches!(
            DeadlinessTable::new(vec![0; 10]),
            Err(TableError::WrongLength { found: 10, .. })
        ));
        let mut bad = DEFAULT_CONVERSION.to_vec();
        bad[40] = 0;
        assert!(matches!(
            DeadlinessTable::new(bad),
            Err(TableError::NotMonotonic { index: 40, .. })
        ));
    }
}
