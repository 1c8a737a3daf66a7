//! Property costs
//!
//! Every magical property has a quadratic cost in its magnitude. The same
//! table prices items in stores and charges artifact potential during
//! design; the two uses differ only in how the square term treats negative
//! magnitudes.

use serde::{Deserialize, Serialize};

use crate::object::{
    CurseFlags, ObjectFlags, BONUS_MAX, ELEMENT_MAX, SLAY_MAX, BRAND_MAX, STAT_MAX,
};
use crate::world::TableError;

/// Which sign convention the square term uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostMode {
    /// `square * v * |v|`: negative values are penalised symmetrically
    Price,
    /// `square * v * v`: a large negative value still costs something
    Design,
}

/// Quadratic cost `constant + linear * v + square * v * |v|`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PropertyCost {
    pub constant: i32,
    pub linear: i32,
    pub square: i32,
}

impl PropertyCost {
    pub const fn new(constant: i32, linear: i32, square: i32) -> Self {
        Self {
            constant,
            linear,
            square,
        }
    }

    /// Cost of magnitude `value`; zero costs nothing
    pub const fn cost(&self, value: i32, mode: CostMode) -> i32 {
        if value == 0 {
            return 0;
        }
        let sq = match mode {
            CostMode::Price => value * value.abs(),
            CostMode::Design => value * value,
        };
        self.constant + self.linear * value + self.square * sq
    }

    /// Price-mode cost
    pub const fn price(&self, value: i32) -> i32 {
        self.cost(value, CostMode::Price)
    }

    /// Design-mode cost
    pub const fn design(&self, value: i32) -> i32 {
        self.cost(value, CostMode::Design)
    }
}

/// Flat cost of an object flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagCost {
    pub flag: ObjectFlags,
    pub cost: i32,
}

/// Value of a curse; always negative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurseCost {
    pub curse: CurseFlags,
    pub cost: i32,
}

/// Costs of every property an item can carry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostTable {
    pub to_hit: PropertyCost,
    pub to_dam: PropertyCost,
    pub to_ac: PropertyCost,
    pub stats: Vec<PropertyCost>,
    pub bonuses: Vec<PropertyCost>,
    /// Per percentage point of resistance
    pub resists: Vec<PropertyCost>,
    /// On `multiplier - 10`
    pub slays: Vec<PropertyCost>,
    pub brands: Vec<PropertyCost>,
    pub flags: Vec<FlagCost>,
    pub curses: Vec<CurseCost>,
}

const fn pc(constant: i32, linear: i32, square: i32) -> PropertyCost {
    PropertyCost::new(constant, linear, square)
}

impl Default for CostTable {
    fn default() -> Self {
        let stat = pc(0, 150, 25);
        let low = pc(0, 10, 0);
        let high = pc(0, 15, 0);
        Self {
            to_hit: pc(0, 12, 1),
            to_dam: pc(0, 30, 2),
            to_ac: pc(0, 10, 1),
            stats: vec![stat; STAT_MAX],
            bonuses: vec![
                pc(0, 80, 10),   // stealth
                pc(0, 20, 5),    // searching
                pc(0, 30, 5),    // infravision
                pc(0, 30, 5),    // tunnelling
                pc(0, 300, 100), // speed
                pc(0, 1200, 300), // shots
                pc(0, 1000, 300), // might
                pc(0, 100, 50),  // light
                pc(0, 60, 10),   // magic mastery
            ],
            resists: vec![
                low, low, low, low, // acid, elec, fire, cold
                pc(0, 14, 0),       // poison
                high, high, high, high, high, high, high, high, high,
            ],
            slays: vec![
                pc(0, 20, 2), // animal
                pc(0, 40, 3), // evil
                pc(0, 30, 2), // undead
                pc(0, 30, 2), // demon
                pc(0, 15, 1), // orc
                pc(0, 20, 1), // troll
                pc(0, 20, 1), // giant
                pc(0, 25, 2), // dragon
            ],
            brands: vec![pc(0, 30, 3); BRAND_MAX],
            flags: vec![
                FlagCost { flag: ObjectFlags::SEE_INVIS, cost: 500 },
                FlagCost { flag: ObjectFlags::FREE_ACT, cost: 700 },
                FlagCost { flag: ObjectFlags::FEATHER, cost: 200 },
                FlagCost { flag: ObjectFlags::REGEN, cost: 500 },
                FlagCost { flag: ObjectFlags::TELEPATHY, cost: 2500 },
                FlagCost { flag: ObjectFlags::SLOW_DIGEST, cost: 200 },
                FlagCost { flag: ObjectFlags::HOLD_LIFE, cost: 700 },
                FlagCost { flag: ObjectFlags::BLESSED, cost: 300 },
                FlagCost { flag: ObjectFlags::IMPACT, cost: 300 },
                FlagCost { flag: ObjectFlags::THROWING, cost: 200 },
                FlagCost { flag: ObjectFlags::SUST_STR, cost: 200 },
                FlagCost { flag: ObjectFlags::SUST_INT, cost: 200 },
                FlagCost { flag: ObjectFlags::SUST_WIS, cost: 200 },
                FlagCost { flag: ObjectFlags::SUST_DEX, cost: 200 },
                FlagCost { flag: ObjectFlags::SUST_CON, cost: 200 },
                FlagCost { flag: ObjectFlags::SUST_CHR, cost: 100 },
                FlagCost { flag: ObjectFlags::PROT_FEAR, cost: 300 },
                FlagCost { flag: ObjectFlags::PROT_BLIND, cost: 500 },
                FlagCost { flag: ObjectFlags::PROT_CONF, cost: 700 },
                FlagCost { flag: ObjectFlags::PROT_STUN, cost: 500 },
                FlagCost { flag: ObjectFlags::IGNORE_ACID, cost: 100 },
                FlagCost { flag: ObjectFlags::IGNORE_ELEC, cost: 100 },
                FlagCost { flag: ObjectFlags::IGNORE_FIRE, cost: 100 },
                FlagCost { flag: ObjectFlags::IGNORE_COLD, cost: 100 },
                FlagCost { flag: ObjectFlags::CHAOTIC, cost: 800 },
            ],
            curses: vec![
                CurseCost { curse: CurseFlags::LIGHT_CURSE, cost: -100 },
                CurseCost { curse: CurseFlags::HEAVY_CURSE, cost: -300 },
                CurseCost { curse: CurseFlags::PERMA_CURSE, cost: -1000 },
                CurseCost { curse: CurseFlags::TELEPORT, cost: -400 },
                CurseCost { curse: CurseFlags::NO_TELEPORT, cost: -300 },
                CurseCost { curse: CurseFlags::AGGRAVATE, cost: -800 },
                CurseCost { curse: CurseFlags::DRAIN_EXP, cost: -600 },
                CurseCost { curse: CurseFlags::DRAIN_HP, cost: -500 },
                CurseCost { curse: CurseFlags::DRAIN_MANA, cost: -300 },
                CurseCost { curse: CurseFlags::COWARDICE, cost: -300 },
                CurseCost { curse: CurseFlags::HALLUCINATION, cost: -400 },
                CurseCost { curse: CurseFlags::IMPAIR_HP, cost: -300 },
                CurseCost { curse: CurseFlags::IMPAIR_MANA, cost: -200 },
                CurseCost { curse: CurseFlags::SIPHON, cost: -300 },
            ],
        }
    }
}

impl CostTable {
    pub fn validate(&self) -> Result<(), TableError> {
        let lengths = [
            ("stat costs", self.stats.len(), STAT_MAX),
            ("bonus costs", self.bonuses.len(), BONUS_MAX),
            ("resist costs", self.resists.len(), ELEMENT_MAX),
            ("slay costs", self.slays.len(), SLAY_MAX),
            ("brand costs", self.brands.len(), BRAND_MAX),
        ];
        for (table, found, expected) in lengths {
            if found != expected {
                return Err(TableError::WrongLength {
                    table,
                    expected,
                    found,
                });
            }
        }
        if let Some(index) = self.curses.iter().position(|c| c.cost > 0) {
            return Err(TableError::OutOfRange {
                table: "curse costs",
                index,
                value: self.curses[index].cost as i64,
            });
        }
        Ok(())
    }

    /// Summed cost of every flag in `flags`
    pub fn flag_cost(&self, flags: ObjectFlags) -> i32 {
        self.flags
            .iter()
            .filter(|f| flags.contains(f.flag))
            .map(|f| f.cost)
            .sum()
    }

    /// Summed (negative) value of every curse in `curses`
    pub fn curse_cost(&self, curses: CurseFlags) -> i32 {
        self.curses
            .iter()
            .filter(|c| curses.contains(c.curse))
            .map(|c| c.cost)
            .sum()
    }

    /// Cost of a single flag, zero if it has no entry
    pub fn single_flag(&self, flag: ObjectFlags) -> i32 {
        self.flags
            .iter()
            .find(|f| f.flag == flag)
            .map(|f| f.cost)
            .unwrap_or(0)
    }
}
