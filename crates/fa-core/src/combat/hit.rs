//! Hit determination
//!
//! Based on `test_hit`: a flat 5% of attacks always hit and 5% always miss,
//! whatever the numbers say. The rest compare a random fraction of the
//! attacker's chance with the target's armour.

use fa_rng::RandomSource;

use crate::monster::Monster;
use crate::object::Item;
use crate::player::{Player, Specialty};
use crate::world::Terrain;

/// To-hit bonus per point of skill bonus
pub const BTH_PLUS_ADJ: i32 = 3;

/// Outcome of a hit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRoll {
    pub hit: bool,
    /// The roll landed exactly on the target's armour, revealing the
    /// attacker's to-hit bonus
    pub exact: bool,
}

/// Decide whether an attack connects.
pub fn test_hit(chance: i32, defense: i32, visible: bool, rng: &mut dyn RandomSource) -> HitRoll {
    let k = rng.randint0(100);
    if k < 10 {
        return HitRoll {
            hit: k < 5,
            exact: false,
        };
    }

    let mut chance = chance;
    if !visible {
        chance /= 2;
    }
    let chance = chance.max(0);

    let power = rng.randint0(chance);
    HitRoll {
        hit: chance > 0 && power >= defense,
        exact: chance > 0 && power == defense,
    }
}

/// Melee chance to hit with an optional weapon
pub fn melee_chance(player: &Player, weapon: Option<&Item>) -> i32 {
    let to_h = player.to_h + weapon.map(|w| w.to_h).unwrap_or(0);
    player.skill_melee + to_h * BTH_PLUS_ADJ
}

/// Chance to hit with a fired missile
pub fn fire_chance(player: &Player, ammo: &Item, launcher: &Item) -> i32 {
    let to_h = player.to_h + ammo.to_h + launcher.to_h;
    player.skill_bow + to_h * BTH_PLUS_ADJ
}

/// Chance to hit with a thrown object
pub fn throw_chance(player: &Player, item: &Item) -> i32 {
    let to_h = player.to_h + item.to_h;
    player.skill_throw + to_h * BTH_PLUS_ADJ
}

/// Bonus to critical power against a sleeping monster the player can see
pub fn sleep_bonus(player: &Player, monster: &Monster) -> i32 {
    if !monster.is_asleep() || !monster.visible {
        return 0;
    }
    let mut bonus = 5 + player.level / 5;
    if player.has(Specialty::BACKSTAB) {
        bonus *= 2;
    }
    if player.has(Specialty::ASSASSINATE) {
        bonus += bonus / 2;
    }
    bonus
}

/// The armour a monster presents, adjusted for the terrain it stands on
pub fn effective_armour(monster: &Monster, terrain: Terrain, bypass_cover: bool) -> i32 {
    let ac = monster.race.ac;
    if terrain.gives_cover() && !bypass_cover {
        ac + ac / 7 + 5
    } else if terrain.is_exposed() {
        ac - ac / 5
    } else {
        ac
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monster::MonsterRace;
    use crate::player::Race;
    use crate::world::Grid;
    use fa_rng::{GameRng, ScriptedRng};

    #[test]
    fn test_forced_band() {
        for k in 0..5 {
            let mut rng = ScriptedRng::new([k]);
            assert!(test_hit(0, 0, true, &mut rng).hit);
        }
        for k in 5..10 {
            let mut rng = ScriptedRng::new([k]);
            assert!(!test_hit(1000, 0, true, &mut rng).hit);
        }
    }

    #[test]
    fn test_zero_chance_never_hits_outside_band() {
        let mut rng = ScriptedRng::new([50]);
        assert!(!test_hit(0, 0, true, &mut rng).hit);
    }

    #[test]
    fn test_exact_roll_noticed() {
        // k = 50, power = 30 against defense 30
        let mut rng = ScriptedRng::new([50, 30]);
        let roll = test_hit(100, 30, true, &mut rng);
        assert!(roll.hit);
        assert!(roll.exact);
    }

    #[test]
    fn test_invisible_halves_chance() {
        let mut rng = ScriptedRng::new([50, 99]);
        test_hit(100, 10, false, &mut rng);
        assert_eq!(rng.trace()[1].arg, 50);
    }

    #[test]
    fn test_floor_rate() {
        let mut rng = GameRng::new(5);
        let n = 100_000;
        let hits = (0..n).filter(|_| test_hit(0, 0, true, &mut rng).hit).count();
        let rate = hits as f64 / n as f64;
        assert!((rate - 0.05).abs() < 0.005, "rate {}", rate);
    }

    #[test]
    fn test_sleep_bonus() {
        let race = MonsterRace::new("Snaga", 3, 32);
        let sleeper = Monster::new(race, Grid::new(1, 1)).with_sleep(20);
        let p = Player::new(Race::Hobbit, 20);
        assert_eq!(sleep_bonus(&p, &sleeper), 9);
        let rogue = p.with_specialties(Specialty::BACKSTAB | Specialty::ASSASSINATE);
        assert_eq!(sleep_bonus(&rogue, &sleeper), 27);
        let mut awake = sleeper.clone();
        awake.wake();
        assert_eq!(sleep_bonus(&rogue, &awake), 0);
    }

    #[test]
    fn test_effective_armour() {
        let m = Monster::new(MonsterRace::new("Snaga", 3, 35), Grid::new(0, 0));
        assert_eq!(effective_armour(&m, Terrain::Floor, false), 35);
        assert_eq!(effective_armour(&m, Terrain::Rubble, false), 45);
        assert_eq!(effective_armour(&m, Terrain::Rubble, true), 35);
        assert_eq!(effective_armour(&m, Terrain::Water, false), 28);
    }
}
