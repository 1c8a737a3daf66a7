//! The player character as seen by combat and the stores

use serde::{Deserialize, Serialize};

use super::equipment::Equipment;
use super::race::Race;
use super::specialty::{SpecialAttack, Specialty};
use crate::object::{Item, Stat, STAT_MAX};
use crate::tables::Deadliness;
use crate::world::{Grid, Pack};

/// Inventory slots
pub const PACK_SIZE: usize = 23;

/// Player combat and trading state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub race: Race,
    pub level: i32,
    pub grid: Grid,
    pub stats: [i32; STAT_MAX],

    /// Melee skill
    pub skill_melee: i32,
    /// Launcher skill
    pub skill_bow: i32,
    /// Throwing skill
    pub skill_throw: i32,
    /// To-hit bonus from sources other than the weapon
    pub to_h: i32,
    /// Deadliness from sources other than the weapon
    pub to_d: i32,
    pub blows: i32,

    pub mana: i32,
    pub max_mana: i32,
    pub specialties: Specialty,
    pub special_attacks: SpecialAttack,
    /// Fear timer; a frightened player cannot fight in melee
    pub afraid: i32,

    pub equipment: Equipment,
    pub pack: Pack,
    pub gold: i32,

    /// Energy spent by the last action
    pub energy_use: i32,
    /// Pending speed boost earned in combat
    pub speed_boost: i32,
}

impl Player {
    /// A fresh character of the given race and level
    pub fn new(race: Race, level: i32) -> Self {
        let level = level.clamp(1, 50);
        let (melee, bow, throw) = race.base_skills();
        Self {
            race,
            level,
            grid: Grid::default(),
            stats: [15; STAT_MAX],
            skill_melee: 35 + melee + level * 3,
            skill_bow: 35 + bow + level * 3,
            skill_throw: 35 + throw + level * 3,
            to_h: 0,
            to_d: 0,
            blows: 1 + level / 15,
            mana: 0,
            max_mana: 0,
            specialties: Specialty::empty(),
            special_attacks: SpecialAttack::empty(),
            afraid: 0,
            equipment: Equipment::default(),
            pack: Pack::new(PACK_SIZE),
            gold: 0,
            energy_use: 0,
            speed_boost: 0,
        }
    }

    pub fn with_specialties(mut self, specialties: Specialty) -> Self {
        self.specialties |= specialties;
        self
    }

    pub fn with_weapon(mut self, weapon: Item) -> Self {
        self.equipment.weapon = Some(weapon);
        self
    }

    pub fn with_bow(mut self, bow: Item) -> Self {
        self.equipment.bow = Some(bow);
        self
    }

    pub fn has(&self, specialty: Specialty) -> bool {
        self.specialties.contains(specialty)
    }

    pub fn stat(&self, stat: Stat) -> i32 {
        self.stats[stat as usize]
    }

    pub fn charisma(&self) -> i32 {
        self.stat(Stat::Chr)
    }

    /// Total deadliness when attacking with `item` (weapon or missile)
    pub fn deadliness(&self, item: Option<&Item>) -> Deadliness {
        Deadliness::new(self.to_d + item.map(|i| i.to_d).unwrap_or(0))
    }

    /// Fighting without a light
    pub fn is_unlit(&self) -> bool {
        self.equipment.light_radius() == 0
    }

    /// Clear temporary special attacks once they have fired
    pub fn consume(&mut self, attack: SpecialAttack) {
        self.special_attacks.remove(attack);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::kind_by_name;

    #[test]
    fn test_new_player_skills() {
        let p = Player::new(Race::Dwarf, 10);
        assert_eq!(p.skill_melee, 35 + 15 + 30);
        assert_eq!(p.blows, 1);
        assert_eq!(Player::new(Race::Human, 30).blows, 3);
    }

    #[test]
    fn test_deadliness_includes_weapon() {
        let mut sword = Item::new(kind_by_name("Long Sword").unwrap()).unwrap();
        sword.to_d = 7;
        let mut p = Player::new(Race::Human, 5);
        p.to_d = 3;
        assert_eq!(p.deadliness(Some(&sword)).get(), 10);
        assert_eq!(p.deadliness(None).get(), 3);
    }

    #[test]
    fn test_consume_special_attack() {
        let mut p = Player::new(Race::Human, 5);
        p.special_attacks = SpecialAttack::CONFUSE | SpecialAttack::FLEE;
        p.consume(SpecialAttack::CONFUSE);
        assert_eq!(p.special_attacks, SpecialAttack::FLEE);
    }
}
