//! Monster races (templates)

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::object::{BrandKind, SlayKind};

bitflags! {
    /// Monster race flags relevant to combat (RF_* style)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct RaceFlags: u32 {
        const ANIMAL = 1 << 0;
        const EVIL = 1 << 1;
        const UNDEAD = 1 << 2;
        const DEMON = 1 << 3;
        const ORC = 1 << 4;
        const TROLL = 1 << 5;
        const GIANT = 1 << 6;
        const DRAGON = 1 << 7;
        const HURT_LIGHT = 1 << 8;
        const IM_ACID = 1 << 9;
        const IM_ELEC = 1 << 10;
        const IM_FIRE = 1 << 11;
        const IM_COLD = 1 << 12;
        const IM_POIS = 1 << 13;
        const NO_CONF = 1 << 14;
        const NO_FEAR = 1 << 15;
        const NO_STUN = 1 << 16;
        const NO_SLEEP = 1 << 17;
        const UNIQUE = 1 << 18;
        /// Not alive: "destroyed" rather than "dies"
        const NONLIVING = 1 << 19;
    }
}

impl RaceFlags {
    /// The race flag a slay checks
    pub const fn for_slay(slay: SlayKind) -> RaceFlags {
        match slay {
            SlayKind::Animal => RaceFlags::ANIMAL,
            SlayKind::Evil => RaceFlags::EVIL,
            SlayKind::Undead => RaceFlags::UNDEAD,
            SlayKind::Demon => RaceFlags::DEMON,
            SlayKind::Orc => RaceFlags::ORC,
            SlayKind::Troll => RaceFlags::TROLL,
            SlayKind::Giant => RaceFlags::GIANT,
            SlayKind::Dragon => RaceFlags::DRAGON,
        }
    }

    /// The immunity that nullifies a brand
    pub const fn immunity_to(brand: BrandKind) -> RaceFlags {
        match brand {
            BrandKind::Acid => RaceFlags::IM_ACID,
            BrandKind::Elec => RaceFlags::IM_ELEC,
            BrandKind::Fire => RaceFlags::IM_FIRE,
            BrandKind::Cold => RaceFlags::IM_COLD,
            BrandKind::Poison => RaceFlags::IM_POIS,
        }
    }
}

/// Monster race template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterRace {
    pub name: String,
    pub level: i32,
    /// Armour class
    pub ac: i32,
    /// Hit dice (dice, sides)
    pub hit_dice: (i32, i32),
    /// Normal speed (110 = normal)
    pub speed: i32,
    /// Spell power available to be burned
    pub mana: i32,
    pub flags: RaceFlags,
}

impl MonsterRace {
    pub fn new(name: &str, level: i32, ac: i32) -> Self {
        Self {
            name: name.to_string(),
            level,
            ac,
            hit_dice: (level.max(1), 8),
            speed: 110,
            mana: 0,
            flags: RaceFlags::empty(),
        }
    }

    pub fn with_flags(mut self, flags: RaceFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_hit_dice(mut self, dice: i32, sides: i32) -> Self {
        self.hit_dice = (dice, sides);
        self
    }

    pub fn with_mana(mut self, mana: i32) -> Self {
        self.mana = mana;
        self
    }

    pub fn has(&self, flags: RaceFlags) -> bool {
        self.flags.intersects(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slay_flags() {
        assert_eq!(RaceFlags::for_slay(SlayKind::Orc), RaceFlags::ORC);
        assert_eq!(RaceFlags::immunity_to(BrandKind::Fire), RaceFlags::IM_FIRE);
    }

    #[test]
    fn test_builder() {
        let race = MonsterRace::new("Cave orc", 7, 36)
            .with_flags(RaceFlags::ORC | RaceFlags::EVIL)
            .with_hit_dice(11, 10);
        assert!(race.has(RaceFlags::ORC));
        assert!(!race.has(RaceFlags::UNDEAD));
        assert_eq!(race.hit_dice, (11, 10));
    }
}
