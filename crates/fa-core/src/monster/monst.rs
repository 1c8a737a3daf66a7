//! Monster instances

use serde::{Deserialize, Serialize};

use super::race::{MonsterRace, RaceFlags};
use crate::world::Grid;
use fa_rng::RandomSource;

/// Outcome of damage applied to a monster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TakeHit {
    pub killed: bool,
    /// The blow frightened the monster
    pub frightened: bool,
}

/// Monster instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub race: MonsterRace,
    pub grid: Grid,
    pub hp: i32,
    pub max_hp: i32,
    pub mana: i32,
    /// Sleep counter; zero is awake
    pub sleep: i32,
    /// Visible to the player
    pub visible: bool,
    pub hostile: bool,
    /// Fear timer
    pub afraid: i32,
    pub confused: i32,
    pub stunned: i32,
    /// Current speed (110 = normal)
    pub speed: i32,
    /// Race flags the player has learned
    pub known_flags: RaceFlags,
}

impl Monster {
    /// Spawn an awake, visible, hostile monster with maximised hit dice
    pub fn new(race: MonsterRace, grid: Grid) -> Self {
        let hp = (race.hit_dice.0 * race.hit_dice.1).max(1);
        Self {
            mana: race.mana,
            speed: race.speed,
            race,
            grid,
            hp,
            max_hp: hp,
            sleep: 0,
            visible: true,
            hostile: true,
            afraid: 0,
            confused: 0,
            stunned: 0,
            known_flags: RaceFlags::empty(),
        }
    }

    pub fn with_sleep(mut self, sleep: i32) -> Self {
        self.sleep = sleep;
        self
    }

    pub fn level(&self) -> i32 {
        self.race.level
    }

    pub fn is_asleep(&self) -> bool {
        self.sleep > 0
    }

    pub fn is_dead(&self) -> bool {
        self.hp < 0
    }

    pub fn wake(&mut self) {
        self.sleep = 0;
    }

    /// Record that the player has learned a race flag
    pub fn learn(&mut self, flags: RaceFlags) {
        self.known_flags |= flags & self.race.flags;
    }

    /// "destroyed" for nonliving things, "dies" otherwise
    pub fn death_verb(&self) -> &'static str {
        if self.race.has(RaceFlags::NONLIVING | RaceFlags::UNDEAD | RaceFlags::DEMON) {
            "is destroyed"
        } else {
            "dies"
        }
    }

    /// Apply damage. A monster dies when its hit points drop below zero.
    ///
    /// Survivors may panic: the weaker they are left, or the larger the
    /// blow was relative to what they have left, the more likely.
    pub fn take_hit(&mut self, dam: i32, rng: &mut dyn RandomSource) -> TakeHit {
        let dam = dam.max(0);
        self.hp -= dam;
        self.wake();
        if self.hp < 0 {
            return TakeHit {
                killed: true,
                frightened: false,
            };
        }
        let mut frightened = false;
        if self.afraid == 0 && !self.race.has(RaceFlags::NO_FEAR) && dam > 0 {
            let percentage = 100 * self.hp / self.max_hp.max(1);
            if (percentage <= 10 && rng.randint0(10) < percentage)
                || (dam >= self.hp && rng.randint0(100) < 80)
            {
                frightened = true;
                self.afraid = rng.randint1(10)
                    + if dam >= self.hp && percentage > 7 {
                        20
                    } else {
                        (11 - percentage) * 5
                    };
            }
        }
        TakeHit {
            killed: false,
            frightened,
        }
    }
}
