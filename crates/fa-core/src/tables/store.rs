//! Shopkeepers and price-adjustment tables

use serde::{Deserialize, Serialize};
use strum::EnumCount;

use crate::player::Race;
use crate::store::StoreKind;
use crate::world::TableError;

/// Lowest charisma the gold adjustment table covers
pub const CHARISMA_MIN: i32 = 3;
/// Highest charisma the gold adjustment table covers
pub const CHARISMA_MAX: i32 = 40;

/// A shopkeeper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreOwner {
    pub name: String,
    pub store: StoreKind,
    pub race: Race,
    /// Percentage markup (100 = fair)
    pub greed: i32,
    /// Most gold the owner will pay for a single item
    pub max_purse: i32,
}

impl StoreOwner {
    fn new(name: &str, store: StoreKind, race: Race, greed: i32, max_purse: i32) -> Self {
        Self {
            name: name.to_string(),
            store,
            race,
            greed,
            max_purse,
        }
    }
}

const RACIAL_FACTORS: [[i32; 11]; 11] = [
    // Hum  HEl  Elf  Hob  Gno  Dwa  HOr  HTr  Dun  HiE  Kob    (player)
    [100, 105, 105, 110, 113, 115, 120, 125, 100, 105, 120], // Human
    [110, 100, 100, 105, 110, 120, 125, 130, 110, 100, 125], // Half-Elf
    [110, 105, 100, 105, 110, 120, 125, 130, 110, 100, 125], // Elf
    [115, 110, 105, 95, 105, 110, 115, 130, 115, 105, 115], // Hobbit
    [115, 115, 110, 105, 95, 110, 115, 130, 115, 110, 115], // Gnome
    [115, 120, 120, 110, 110, 95, 125, 135, 115, 120, 120], // Dwarf
    [115, 120, 125, 115, 115, 130, 110, 115, 115, 125, 110], // Half-Orc
    [110, 115, 115, 110, 110, 130, 110, 110, 110, 115, 115], // Half-Troll
    [100, 105, 105, 110, 113, 115, 120, 125, 100, 105, 120], // Dunadan
    [110, 105, 100, 105, 110, 120, 125, 130, 110, 100, 125], // High-Elf
    [115, 120, 125, 115, 115, 120, 110, 115, 115, 125, 100], // Kobold
];

const CHARISMA_GOLD: [i32; 38] = [
    130, 125, 122, 120, 118, 116, 114, 112, 110, 108, // 3-12
    106, 104, 103, 102, 101, 100, 99, 98, 97, 96, // 13-22
    95, 94, 93, 92, 91, 90, 90, 90, 90, 90, // 23-32
    90, 90, 90, 90, 90, 90, 90, 90, // 33-40
];

/// Racial matrix, charisma table and the shopkeeper roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTables {
    /// `racial[owner race][player race]`, percent
    pub racial: Vec<Vec<i32>>,
    /// Percent adjustment by charisma, starting at [`CHARISMA_MIN`]
    pub charisma: Vec<i32>,
    pub owners: Vec<StoreOwner>,
}

impl Default for PriceTables {
    fn default() -> Self {
        use Race::*;
        use StoreKind::*;
        Self {
            racial: RACIAL_FACTORS.iter().map(|row| row.to_vec()).collect(),
            charisma: CHARISMA_GOLD.to_vec(),
            owners: vec![
                StoreOwner::new("Bilbo the Friendly", General, Hobbit, 108, 2500),
                StoreOwner::new("Raistlin the Chicken", General, Human, 108, 5000),
                StoreOwner::new("Kon-Dar the Ugly", Armoury, HalfOrc, 115, 10000),
                StoreOwner::new("Darg-Low the Grim", Armoury, Human, 111, 15000),
                StoreOwner::new("Arnold the Beastly", Weaponsmith, HalfTroll, 115, 10000),
                StoreOwner::new("Arndal Beast-Slayer", Weaponsmith, HalfElf, 111, 15000),
                StoreOwner::new("Ludwig the Humble", Temple, Dwarf, 109, 15000),
                StoreOwner::new("Gunnar the Paladin", Temple, HalfTroll, 110, 20000),
                StoreOwner::new("Mauser the Chemist", Alchemist, HalfElf, 111, 10000),
                StoreOwner::new("Wizzle the Chaste", Alchemist, Hobbit, 110, 10000),
                StoreOwner::new("Lo Pan the Beautiful", MagicShop, HalfElf, 110, 15000),
                StoreOwner::new("Buggerby the Great", MagicShop, Gnome, 113, 20000),
                StoreOwner::new("Gary Gygaz", BlackMarket, HalfTroll, 150, 30000),
                StoreOwner::new("Histor the Goblin", BlackMarket, HalfOrc, 150, 30000),
            ],
        }
    }
}

impl PriceTables {
    pub fn validate(&self) -> Result<(), TableError> {
        if self.racial.len() != Race::COUNT {
            return Err(TableError::WrongLength {
                table: "racial factors",
                expected: Race::COUNT,
                found: self.racial.len(),
            });
        }
        if let Some(row) = self.racial.iter().find(|row| row.len() != Race::COUNT) {
            return Err(TableError::WrongLength {
                table: "racial factor row",
                expected: Race::COUNT,
                found: row.len(),
            });
        }
        for (index, &value) in self.racial.iter().flatten().enumerate() {
            if value <= 0 {
                return Err(TableError::OutOfRange {
                    table: "racial factors",
                    index,
                    value: value as i64,
                });
            }
        }
        let expected = (CHARISMA_MAX - CHARISMA_MIN + 1) as usize;
        if self.charisma.len() != expected {
            return Err(TableError::WrongLength {
                table: "charisma",
                expected,
                found: self.charisma.len(),
            });
        }
        // Higher charisma never makes prices worse
        if let Some(index) = self.charisma.windows(2).position(|w| w[1] > w[0]) {
            return Err(TableError::NotMonotonic {
                table: "charisma",
                index: index + 1,
            });
        }
        for (index, owner) in self.owners.iter().enumerate() {
            if owner.greed <= 0 || owner.max_purse <= 0 {
                return Err(TableError::OutOfRange {
                    table: "owners",
                    index,
                    value: owner.greed.min(owner.max_purse) as i64,
                });
            }
        }
        Ok(())
    }

    /// How much an owner of `owner` race marks up for a `player` customer
    pub fn racial_factor(&self, owner: Race, player: Race) -> i32 {
        self.racial
            .get(owner as usize)
            .and_then(|row| row.get(player as usize))
            .copied()
            .unwrap_or(100)
    }

    /// Percent adjustment for the customer's charisma
    pub fn charisma_factor(&self, charisma: i32) -> i32 {
        let index = (charisma.clamp(CHARISMA_MIN, CHARISMA_MAX) - CHARISMA_MIN) as usize;
        self.charisma.get(index).copied().unwrap_or(100)
    }

    /// Shopkeepers who can run a store of this kind
    pub fn owners_for(&self, store: StoreKind) -> impl Iterator<Item = &StoreOwner> {
        self.owners.iter().filter(move |o| o.store == store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_valid() {
        assert!(PriceTables::default().validate().is_ok());
    }

    #[test]
    fn test_charisma_lookup_clamps() {
        let tables = PriceTables::default();
        assert_eq!(tables.charisma_factor(3), 130);
        assert_eq!(tables.charisma_factor(0), 130);
        assert_eq!(tables.charisma_factor(18), 100);
        assert_eq!(tables.charisma_factor(99), 90);
    }

    #[test]
    fn test_charisma_table_covers_every_score() {
        let tables = PriceTables::default();
        assert_eq!(
            tables.charisma.len(),
            (CHARISMA_MAX - CHARISMA_MIN + 1) as usize
        );
        assert_eq!(tables.charisma_factor(39), 90);
        assert_eq!(tables.charisma_factor(CHARISMA_MAX), 90);

        let mut short = PriceTables::default();
        short.charisma.truncate(36);
        assert!(matches!(
            short.validate(),
            Err(TableError::WrongLength { table: "charisma", expected: 38, found: 36 })
        ));
    }

    #[test]
    fn test_racial_factor() {
        let tables = PriceTables::default();
        assert_eq!(tables.racial_factor(Race::Human, Race::Human), 100);
        assert_eq!(tables.racial_factor(Race::Dwarf, Race::Elf), 120);
    }

    #[test]
    fn test_owners_for() {
        let tables = PriceTables::default();
        assert_eq!(tables.owners_for(StoreKind::BlackMarket).count(), 2);
        assert_eq!(tables.owners_for(StoreKind::Home).count(), 0);
    }

    #[test]
    fn test_rising_charisma_table_rejected() {
        let mut tables = PriceTables::default();
        tables.charisma[5] = 200;
        assert!(matches!(
            tables.validate(),
            Err(TableError::NotMonotonic { table: "charisma", index: 5 })
        ));
    }
}
