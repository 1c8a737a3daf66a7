//! Object property vocabulary
//!
//! Stats, numeric bonuses, resistances, slays, brands and the flag sets an
//! item or artifact can carry. Array-valued properties are indexed by the
//! enum discriminant (`Stat::Dex as usize`).

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter};

/// Number of primary stats
pub const STAT_MAX: usize = 6;
/// Number of non-stat numeric bonuses
pub const BONUS_MAX: usize = 9;
/// Number of resistible elements
pub const ELEMENT_MAX: usize = 14;
/// Number of slay kinds
pub const SLAY_MAX: usize = 8;
/// Number of brand kinds
pub const BRAND_MAX: usize = 5;

/// Multiplier value meaning "no bonus" in slay and brand arrays (x10).
pub const MULTIPLE_BASE: u8 = 10;

/// Primary character stats
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumIter, EnumCount,
)]
#[repr(u8)]
pub enum Stat {
    Str = 0,
    Int = 1,
    Wis = 2,
    Dex = 3,
    Con = 4,
    Chr = 5,
}

impl Stat {
    /// The sustain flag protecting this stat
    pub const fn sustain(self) -> ObjectFlags {
        match self {
            Stat::Str => ObjectFlags::SUST_STR,
            Stat::Int => ObjectFlags::SUST_INT,
            Stat::Wis => ObjectFlags::SUST_WIS,
            Stat::Dex => ObjectFlags::SUST_DEX,
            Stat::Con => ObjectFlags::SUST_CON,
            Stat::Chr => ObjectFlags::SUST_CHR,
        }
    }
}

/// Numeric bonuses other than stats (stored alongside stats as pvals)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumIter, EnumCount,
)]
#[repr(u8)]
pub enum Bonus {
    Stealth = 0,
    Searching = 1,
    Infravision = 2,
    Tunnelling = 3,
    Speed = 4,
    Shots = 5,
    Might = 6,
    Light = 7,
    MagicMastery = 8,
}

/// Elements and effects that can be resisted
///
/// Resistances are percentages of damage removed: 100 is immunity,
/// negative values are vulnerabilities.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumIter, EnumCount,
)]
#[repr(u8)]
pub enum Element {
    Acid = 0,
    Elec = 1,
    Fire = 2,
    Cold = 3,
    Poison = 4,
    Light = 5,
    Dark = 6,
    Confusion = 7,
    Sound = 8,
    Shards = 9,
    Nexus = 10,
    Nether = 11,
    Chaos = 12,
    Disenchant = 13,
}

impl Element {
    /// The four base elements that also have "ignore" flags
    pub const BASE: [Element; 4] = [Element::Acid, Element::Elec, Element::Fire, Element::Cold];

    /// Whether this is one of the five low elements
    pub const fn is_low(self) -> bool {
        matches!(
            self,
            Element::Acid | Element::Elec | Element::Fire | Element::Cold | Element::Poison
        )
    }

    /// The flag that protects an item from this element, if any
    pub const fn ignore_flag(self) -> Option<ObjectFlags> {
        match self {
            Element::Acid => Some(ObjectFlags::IGNORE_ACID),
            Element::Elec => Some(ObjectFlags::IGNORE_ELEC),
            Element::Fire => Some(ObjectFlags::IGNORE_FIRE),
            Element::Cold => Some(ObjectFlags::IGNORE_COLD),
            _ => None,
        }
    }
}

/// Monster categories a weapon can be especially effective against
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumIter, EnumCount,
)]
#[repr(u8)]
pub enum SlayKind {
    Animal = 0,
    Evil = 1,
    Undead = 2,
    Demon = 3,
    Orc = 4,
    Troll = 5,
    Giant = 6,
    Dragon = 7,
}

/// Elemental brands
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumIter, EnumCount,
)]
#[repr(u8)]
pub enum BrandKind {
    Acid = 0,
    Elec = 1,
    Fire = 2,
    Cold = 3,
    Poison = 4,
}

impl BrandKind {
    /// The resistance matching this brand
    pub const fn element(self) -> Element {
        match self {
            BrandKind::Acid => Element::Acid,
            BrandKind::Elec => Element::Elec,
            BrandKind::Fire => Element::Fire,
            BrandKind::Cold => Element::Cold,
            BrandKind::Poison => Element::Poison,
        }
    }
}

bitflags! {
    /// Object abilities (TR_* style flags)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ObjectFlags: u32 {
        const SEE_INVIS = 1 << 0;
        const FREE_ACT = 1 << 1;
        const FEATHER = 1 << 2;
        const REGEN = 1 << 3;
        const TELEPATHY = 1 << 4;
        const SLOW_DIGEST = 1 << 5;
        const HOLD_LIFE = 1 << 6;
        const BLESSED = 1 << 7;
        const IMPACT = 1 << 8;
        const THROWING = 1 << 9;
        const SUST_STR = 1 << 10;
        const SUST_INT = 1 << 11;
        const SUST_WIS = 1 << 12;
        const SUST_DEX = 1 << 13;
        const SUST_CON = 1 << 14;
        const SUST_CHR = 1 << 15;
        const PROT_FEAR = 1 << 16;
        const PROT_BLIND = 1 << 17;
        const PROT_CONF = 1 << 18;
        const PROT_STUN = 1 << 19;
        const IGNORE_ACID = 1 << 20;
        const IGNORE_ELEC = 1 << 21;
        const IGNORE_FIRE = 1 << 22;
        const IGNORE_COLD = 1 << 23;
        const CHAOTIC = 1 << 24;
        const INSTA_ART = 1 << 25;

        const SUSTAINS = Self::SUST_STR.bits() | Self::SUST_INT.bits() | Self::SUST_WIS.bits()
            | Self::SUST_DEX.bits() | Self::SUST_CON.bits() | Self::SUST_CHR.bits();
        const IGNORES = Self::IGNORE_ACID.bits() | Self::IGNORE_ELEC.bits()
            | Self::IGNORE_FIRE.bits() | Self::IGNORE_COLD.bits();
    }
}

bitflags! {
    /// Curses an object can carry
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct CurseFlags: u32 {
        const LIGHT_CURSE = 1 << 0;
        const HEAVY_CURSE = 1 << 1;
        const PERMA_CURSE = 1 << 2;
        const TELEPORT = 1 << 3;
        const NO_TELEPORT = 1 << 4;
        const AGGRAVATE = 1 << 5;
        const DRAIN_EXP = 1 << 6;
        const DRAIN_HP = 1 << 7;
        const DRAIN_MANA = 1 << 8;
        const COWARDICE = 1 << 9;
        const HALLUCINATION = 1 << 10;
        const IMPAIR_HP = 1 << 11;
        const IMPAIR_MANA = 1 << 12;
        const SIPHON = 1 << 13;
    }
}

impl CurseFlags {
    /// Curses the curse gauntlet picks from, mildest first
    pub const GAUNTLET: [CurseFlags; 10] = [
        CurseFlags::COWARDICE,
        CurseFlags::IMPAIR_MANA,
        CurseFlags::IMPAIR_HP,
        CurseFlags::HALLUCINATION,
        CurseFlags::TELEPORT,
        CurseFlags::SIPHON,
        CurseFlags::DRAIN_MANA,
        CurseFlags::DRAIN_HP,
        CurseFlags::DRAIN_EXP,
        CurseFlags::AGGRAVATE,
    ];
}

/// A single property of an object, as reported to the identify system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectProperty {
    ToHit,
    ToDam,
    ToAc,
    Stat(Stat),
    Bonus(Bonus),
    Resist(Element),
    Slay(SlayKind),
    Brand(BrandKind),
    Flag(ObjectFlags),
    Curse(CurseFlags),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_match_enums() {
        assert_eq!(Stat::COUNT, STAT_MAX);
        assert_eq!(Bonus::COUNT, BONUS_MAX);
        assert_eq!(Element::COUNT, ELEMENT_MAX);
        assert_eq!(SlayKind::COUNT, SLAY_MAX);
        assert_eq!(BrandKind::COUNT, BRAND_MAX);
    }

    #[test]
    fn test_sustain_mapping() {
        assert_eq!(Stat::Con.sustain(), ObjectFlags::SUST_CON);
        assert!(ObjectFlags::SUSTAINS.contains(Stat::Chr.sustain()));
    }

    #[test]
    fn test_brand_elements() {
        assert_eq!(BrandKind::Fire.element(), Element::Fire);
        assert_eq!(Element::Fire.ignore_flag(), Some(ObjectFlags::IGNORE_FIRE));
        assert_eq!(Element::Nether.ignore_flag(), None);
    }
}
