//! Slay and brand registry
//!
//! Maps each slay to the race flag it checks and each brand to the immunity
//! that wastes it, along with the property revealed when either fires.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::monster::RaceFlags;
use crate::object::{BrandKind, ObjectProperty, SlayKind, BRAND_MAX, SLAY_MAX};
use crate::world::TableError;

/// One slay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlayEntry {
    pub slay: SlayKind,
    /// Targets carrying this flag take extra damage
    pub race_flag: RaceFlags,
    /// Property revealed to the identify system
    pub notice: ObjectProperty,
    /// Verb used in hit messages ("smite", "cut")
    pub verb: String,
}

/// One brand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandEntry {
    pub brand: BrandKind,
    /// Targets carrying this flag ignore the brand
    pub immunity: RaceFlags,
    pub notice: ObjectProperty,
    pub verb: String,
}

/// Static slay and brand tables, one entry per kind in enum order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlayBrandRegistry {
    slays: Vec<SlayEntry>,
    brands: Vec<BrandEntry>,
}

impl Default for SlayBrandRegistry {
    fn default() -> Self {
        let slays = SlayKind::iter()
            .map(|slay| SlayEntry {
                slay,
                race_flag: RaceFlags::for_slay(slay),
                notice: ObjectProperty::Slay(slay),
                verb: match slay {
                    SlayKind::Evil | SlayKind::Undead | SlayKind::Demon => "smite",
                    SlayKind::Dragon => "slay",
                    _ => "cut",
                }
                .to_string(),
            })
            .collect();
        let brands = BrandKind::iter()
            .map(|brand| BrandEntry {
                brand,
                immunity: RaceFlags::immunity_to(brand),
                notice: ObjectProperty::Brand(brand),
                verb: match brand {
                    BrandKind::Acid => "dissolve",
                    BrandKind::Elec => "shock",
                    BrandKind::Fire => "burn",
                    BrandKind::Cold => "freeze",
                    BrandKind::Poison => "poison",
                }
                .to_string(),
            })
            .collect();
        Self { slays, brands }
    }
}

impl SlayBrandRegistry {
    /// Check there is exactly one entry per kind, stored in enum order
    pub fn validate(&self) -> Result<(), TableError> {
        if self.slays.len() != SLAY_MAX {
            return Err(TableError::WrongLength {
                table: "slays",
                expected: SLAY_MAX,
                found: self.slays.len(),
            });
        }
        if self.brands.len() != BRAND_MAX {
            return Err(TableError::WrongLength {
                table: "brands",
                expected: BRAND_MAX,
                found: self.brands.len(),
            });
        }
        for (index, entry) in self.slays.iter().enumerate() {
            if entry.slay as usize != index {
                return Err(TableError::OutOfRange {
                    table: "slays",
                    index,
                    value: entry.slay as i64,
                });
            }
        }
        for (index, entry) in self.brands.iter().enumerate() {
            if entry.brand as usize != index {
                return Err(TableError::OutOfRange {
                    table: "brands",
                    index,
                    value: entry.brand as i64,
                });
            }
        }
        Ok(())
    }

    pub fn slay(&self, slay: SlayKind) -> Option<&SlayEntry> {
        self.slays.get(slay as usize)
    }

    pub fn brand(&self, brand: BrandKind) -> Option<&BrandEntry> {
        self.brands.get(brand as usize)
    }

    pub fn slays(&self) -> impl Iterator<Item = &SlayEntry> {
        self.slays.iter()
    }

    pub fn brands(&self) -> impl Iterator<Item = &BrandEntry> {
        self.brands.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_valid() {
        let reg = SlayBrandRegistry::default();
        assert!(reg.validate().is_ok());
        let orc = reg.slay(SlayKind::Orc).unwrap();
        assert_eq!(orc.race_flag, RaceFlags::ORC);
        assert_eq!(orc.notice, ObjectProperty::Slay(SlayKind::Orc));
        assert_eq!(reg.brand(BrandKind::Cold).unwrap().immunity, RaceFlags::IM_COLD);
    }

    #[test]
    fn test_out_of_order_rejected() {
        let mut reg = SlayBrandRegistry::default();
        reg.slays.swap(0, 1);
        assert!(matches!(
            reg.validate(),
            Err(TableError::OutOfRange { table: "slays", index: 0, .. })
        ));
    }
}
