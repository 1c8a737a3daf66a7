//! Specialty abilities and temporary special attacks

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::object::BrandKind;

bitflags! {
    /// Permanent combat specialties
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Specialty: u32 {
        /// Extra melee criticals
        const SKILLED_FIGHTER = 1 << 0;
        /// Extra missile criticals
        const MARKSMAN = 1 << 1;
        /// Doubled bonus against sleeping monsters
        const BACKSTAB = 1 << 2;
        /// Further bonus against sleeping monsters
        const ASSASSINATE = 1 << 3;
        /// Fighting unlit is easier
        const UNLIGHT = 1 << 4;
        /// Occasional extra blow
        const FAST_ATTACK = 1 << 5;
        /// Drain monster mana into damage
        const MANA_BURN = 1 << 6;
        /// Speed boost after a round with a kill or a frightened foe
        const FURY = 1 << 7;
        /// Arrows and bolts can pass through monsters
        const PIERCE_SHOT = 1 << 8;
        /// Level-scaled missile damage
        const STRONG_SHOOTER = 1 << 9;
        /// Extra damage against evil and light-sensitive monsters
        const HOLY_LIGHT = 1 << 10;
        /// Ignore cover from rubble and trees
        const TERRAIN_BYPASS = 1 << 11;
    }
}

bitflags! {
    /// Temporary special attacks, consumed when they take effect
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct SpecialAttack: u32 {
        const CONFUSE = 1 << 0;
        const BLACK_BREATH = 1 << 1;
        const FLEE = 1 << 2;
        const HOLY = 1 << 3;
        const SUPERSHOT = 1 << 4;
        const BRAND_ACID = 1 << 5;
        const BRAND_ELEC = 1 << 6;
        const BRAND_FIRE = 1 << 7;
        const BRAND_COLD = 1 << 8;
        const BRAND_POIS = 1 << 9;
        const CHAOTIC = 1 << 10;
    }
}

impl SpecialAttack {
    /// The temporary brand flag for an element
    pub const fn brand(brand: BrandKind) -> SpecialAttack {
        match brand {
            BrandKind::Acid => SpecialAttack::BRAND_ACID,
            BrandKind::Elec => SpecialAttack::BRAND_ELEC,
            BrandKind::Fire => SpecialAttack::BRAND_FIRE,
            BrandKind::Cold => SpecialAttack::BRAND_COLD,
            BrandKind::Poison => SpecialAttack::BRAND_POIS,
        }
    }
}
