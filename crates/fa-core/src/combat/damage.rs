//! Damage computation
//!
//! The pipeline for one hit:
//!
//! 1. take the average roll of one weapon die (x10),
//! 2. multiply by the best applicable slay or brand (x10, see
//!    [`adjust_damage`]),
//! 3. multiply by the deadliness percentage (x100),
//! 4. collapse the average back into die sides with stochastic rounding,
//! 5. roll the base dice plus critical dice and add the flat addend.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::trace;

use super::critical::Critical;
use super::events::{CombatEvent, CombatSink, ItemRef};
use crate::fixed::ScaledInt;
use crate::monster::{Monster, RaceFlags};
use crate::object::{BrandKind, Item, SlayKind, BRAND_MAX, MULTIPLE_BASE, SLAY_MAX};
use crate::player::{Player, SpecialAttack, Specialty};
use crate::tables::{Deadliness, GameTables};
use fa_rng::RandomSource;

/// Multiplier granted by a temporary elemental brand
pub const TEMP_BRAND_MULTIPLE: u8 = 17;
/// Slay-evil multiplier guaranteed by a holy attack
pub const HOLY_SLAY_MULTIPLE: u8 = 15;

/// Everything that contributes slays and brands to one attack
#[derive(Debug, Clone)]
pub struct DamageSource<'a> {
    /// The weapon, missile or thrown object; `None` for bare hands
    pub item: Option<&'a Item>,
    /// Rings for a melee weapon, the launcher for ammunition
    pub extras: Vec<(&'a Item, ItemRef)>,
    pub item_ref: ItemRef,
    /// Temporary brands and holy attack from the player
    pub special: SpecialAttack,
    pub holy_light: bool,
    /// Ammunition multipliers are damped
    pub ammo: bool,
}

impl<'a> DamageSource<'a> {
    /// A melee blow: the weapon plus both rings and temporary brands
    pub fn melee(player: &'a Player, weapon: Option<&'a Item>) -> Self {
        let extras = player
            .equipment
            .rings
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.as_ref().map(|r| (r, ItemRef::Ring(i as u8))))
            .collect();
        Self {
            item: weapon,
            extras,
            item_ref: ItemRef::Weapon,
            special: player.special_attacks,
            holy_light: player.has(Specialty::HOLY_LIGHT),
            ammo: false,
        }
    }

    /// A fired missile: the ammunition plus the launcher
    pub fn fired(player: &'a Player, ammo: &'a Item, launcher: &'a Item) -> Self {
        Self {
            item: Some(ammo),
            extras: vec![(launcher, ItemRef::Launcher)],
            item_ref: ItemRef::Missile,
            special: SpecialAttack::empty(),
            holy_light: player.has(Specialty::HOLY_LIGHT),
            ammo: true,
        }
    }

    /// A thrown object on its own
    pub fn thrown(player: &'a Player, item: &'a Item) -> Self {
        Self {
            item: Some(item),
            extras: Vec::new(),
            item_ref: ItemRef::Missile,
            special: SpecialAttack::empty(),
            holy_light: player.has(Specialty::HOLY_LIGHT),
            ammo: item.is_ammo(),
        }
    }

    fn slays(&self) -> [(u8, ItemRef); SLAY_MAX] {
        let mut best = [(MULTIPLE_BASE, self.item_ref); SLAY_MAX];
        for (i, slot) in best.iter_mut().enumerate() {
            slot.0 = self.item.map_or(MULTIPLE_BASE, |item| item.slays[i]);
            for (extra, r) in &self.extras {
                if extra.slays[i] > slot.0 {
                    *slot = (extra.slays[i], *r);
                }
            }
        }
        if self.special.contains(SpecialAttack::HOLY) {
            let evil = &mut best[SlayKind::Evil as usize];
            evil.0 = evil.0.max(HOLY_SLAY_MULTIPLE);
        }
        best
    }

    fn brands(&self) -> [(u8, ItemRef); BRAND_MAX] {
        let mut best = [(MULTIPLE_BASE, self.item_ref); BRAND_MAX];
        for brand in BrandKind::iter() {
            let i = brand as usize;
            let slot = &mut best[i];
            slot.0 = self.item.map_or(MULTIPLE_BASE, |item| item.brands[i]);
            for (extra, r) in &self.extras {
                if extra.brands[i] > slot.0 {
                    *slot = (extra.brands[i], *r);
                }
            }
            if !self.ammo
                && self.special.contains(SpecialAttack::brand(brand))
                && TEMP_BRAND_MULTIPLE > slot.0
            {
                slot.0 = TEMP_BRAND_MULTIPLE;
            }
        }
        best
    }
}

/// Result of slay and brand adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Adjustment {
    /// Final x10 multiplier
    pub multiplier: i32,
    /// Flat damage addend, `multiplier - 10`
    pub addend: i32,
    pub slay: Option<SlayKind>,
    pub brand: Option<BrandKind>,
}

/// Apply slays and brands to an average die value.
///
/// `avg` is multiplied in place by the best applicable multiplier; the flat
/// addend is returned alongside. Slays that fire and brands that are
/// resisted are reported to the identify system and the monster memory.
pub fn adjust_damage(
    avg: &mut ScaledInt,
    source: &DamageSource<'_>,
    monster: &mut Monster,
    tables: &GameTables,
    sink: &mut dyn CombatSink,
) -> Adjustment {
    let mut mul = MULTIPLE_BASE as i32;
    let mut adj = Adjustment::default();

    for (slay, (value, item_ref)) in SlayKind::iter().zip(source.slays()) {
        if value <= MULTIPLE_BASE {
            continue;
        }
        let Some(entry) = tables.slays.slay(slay) else {
            continue;
        };
        if !monster.race.has(entry.race_flag) {
            continue;
        }
        monster.learn(entry.race_flag);
        sink.notice_property(entry.notice, item_ref);
        if value as i32 > mul {
            mul = value as i32;
            adj.slay = Some(slay);
        }
    }

    for (brand, (value, item_ref)) in BrandKind::iter().zip(source.brands()) {
        if value <= MULTIPLE_BASE {
            continue;
        }
        let Some(entry) = tables.slays.brand(brand) else {
            continue;
        };
        sink.notice_property(entry.notice, item_ref);
        if monster.race.has(entry.immunity) {
            if !monster.known_flags.contains(entry.immunity) {
                monster.learn(entry.immunity);
                sink.emit(CombatEvent::ImmunityRevealed {
                    monster: monster.race.name.clone(),
                    brand,
                });
            }
            continue;
        }
        if value as i32 > mul {
            mul = value as i32;
            adj.slay = None;
            adj.brand = Some(brand);
        }
    }

    if source.holy_light {
        if monster.race.has(RaceFlags::HURT_LIGHT | RaceFlags::UNDEAD) {
            mul += mul / 10 + 1;
        } else if monster.race.has(RaceFlags::EVIL) {
            mul += mul / 10;
        }
    }

    if source.ammo {
        mul -= (mul - 9) / 3;
    }

    *avg = avg.apply_multiplier(mul);
    adj.multiplier = mul;
    adj.addend = mul - MULTIPLE_BASE as i32;
    adj
}

/// Record of one damage roll, kept for presentation and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DamageComputation {
    /// Dice rolled, including critical dice
    pub dice: i32,
    /// Die sides after slays, brands and deadliness
    pub sides: i32,
    pub addend: i32,
    pub critical_dice: i32,
    pub multiplier: i32,
    /// Deadliness percentage factor (100 = none)
    pub deadliness_factor: i32,
    /// The slay or brand that set the multiplier, if any
    pub slay: Option<SlayKind>,
    pub brand: Option<BrandKind>,
    /// Final damage, never negative
    pub damage: i32,
}

/// Run the full damage pipeline for one hit
#[allow(clippy::too_many_arguments)]
pub fn compute_damage(
    dice: i32,
    sides: i32,
    critical: Critical,
    source: &DamageSource<'_>,
    monster: &mut Monster,
    deadliness: Deadliness,
    tables: &GameTables,
    rng: &mut dyn RandomSource,
    sink: &mut dyn CombatSink,
) -> DamageComputation {
    let mut avg = ScaledInt::die_average(sides);
    let adj = adjust_damage(&mut avg, source, monster, tables, sink);
    let avg = tables.deadliness.apply(avg, deadliness);
    let sides = avg.collapse_to_sides(rng);
    let dice = (dice + critical.dice).max(0);
    let damage = (rng.damroll(dice, sides) + adj.addend).max(0);

    trace!(
        dice,
        sides,
        multiplier = adj.multiplier,
        deadliness = deadliness.get(),
        damage,
        "damage roll"
    );

    DamageComputation {
        dice,
        sides,
        addend: adj.addend,
        critical_dice: critical.dice,
        multiplier: adj.multiplier,
        deadliness_factor: tables.deadliness.factor(deadliness),
        slay: adj.slay,
        brand: adj.brand,
        damage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::MessageLog;
    use crate::object::{kind_by_name, ObjectProperty};
    use crate::player::Race;
    use crate::world::Grid;
    use fa_rng::GameRng;

    fn item(name: &str) -> Item {
        Item::new(kind_by_name(name).unwrap()).unwrap()
    }

    fn orc() -> Monster {
        let race = crate::monster::MonsterRace::new("Cave orc", 7, 36)
            .with_flags(RaceFlags::ORC | RaceFlags::EVIL | RaceFlags::IM_FIRE);
        Monster::new(race, Grid::new(1, 0))
    }

    #[test]
    fn test_slay_orc_applies_and_notices() {
        let player = Player::new(Race::Human, 10);
        let mut sword = item("Long Sword");
        sword.slays[SlayKind::Orc as usize] = 20;
        let mut monster = orc();
        let mut log = MessageLog::new();
        let tables = GameTables::default();
        let mut avg = ScaledInt::die_average(5);
        let adj = adjust_damage(
            &mut avg,
            &DamageSource::melee(&player, Some(&sword)),
            &mut monster,
            &tables,
            &mut log,
        );
        assert!(adj.multiplier >= 20);
        assert_eq!(adj.addend, 10);
        assert_eq!(adj.slay, Some(SlayKind::Orc));
        assert!(log.noticed(ObjectProperty::Slay(SlayKind::Orc)));
        assert!(monster.known_flags.contains(RaceFlags::ORC));
        assert_eq!(avg.raw(), 600);
    }

    #[test]
    fn test_immune_brand_wasted() {
        let player = Player::new(Race::Human, 10);
        let mut sword = item("Long Sword");
        sword.brands[BrandKind::Fire as usize] = 30;
        let mut monster = orc();
        let mut log = MessageLog::new();
        let mut avg = ScaledInt::die_average(5);
        let adj = adjust_damage(
            &mut avg,
            &DamageSource::melee(&player, Some(&sword)),
            &mut monster,
            &GameTables::default(),
            &mut log,
        );
        assert_eq!(adj.multiplier, 10);
        assert_eq!(adj.brand, None);
        assert!(monster.known_flags.contains(RaceFlags::IM_FIRE));
        assert_eq!(
            log.count(|e| matches!(e, CombatEvent::ImmunityRevealed { .. })),
            1
        );
    }

    #[test]
    fn test_ring_and_temporary_brand() {
        let mut player = Player::new(Race::Human, 10);
        let mut ring = item("Ring of Flames");
        ring.slays[SlayKind::Evil as usize] = 15;
        player.equipment.rings[1] = Some(ring);
        player.special_attacks = SpecialAttack::BRAND_COLD;
        let sword = item("Long Sword");
        let mut monster = orc();
        let mut log = MessageLog::new();
        let mut avg = ScaledInt::die_average(5);
        let adj = adjust_damage(
            &mut avg,
            &DamageSource::melee(&player, Some(&sword)),
            &mut monster,
            &GameTables::default(),
            &mut log,
        );
        assert_eq!(adj.multiplier, TEMP_BRAND_MULTIPLE as i32);
        assert_eq!(adj.brand, Some(BrandKind::Cold));
        assert!(log
            .notices
            .contains(&(ObjectProperty::Slay(SlayKind::Evil), ItemRef::Ring(1))));
    }

    #[test]
    fn test_holy_attack_forces_slay_evil() {
        let mut player = Player::new(Race::Human, 10);
        player.special_attacks = SpecialAttack::HOLY;
        let sword = item("Long Sword");
        let mut monster = orc();
        let mut avg = ScaledInt::die_average(5);
        let adj = adjust_damage(
            &mut avg,
            &DamageSource::melee(&player, Some(&sword)),
            &mut monster,
            &GameTables::default(),
            &mut MessageLog::new(),
        );
        assert_eq!(adj.multiplier, 15);
    }

    #[test]
    fn test_ammo_damping_and_holy_light() {
        let player = Player::new(Race::Human, 10).with_specialties(Specialty::HOLY_LIGHT);
        let mut arrow = item("Arrow");
        arrow.slays[SlayKind::Orc as usize] = 20;
        let bow = item("Long Bow");
        let mut monster = orc();
        let mut avg = ScaledInt::die_average(4);
        let adj = adjust_damage(
            &mut avg,
            &DamageSource::fired(&player, &arrow, &bow),
            &mut monster,
            &GameTables::default(),
            &mut MessageLog::new(),
        );
        // 20, evil +2 = 22, damped by (22 - 9) / 3 = 4
        assert_eq!(adj.multiplier, 18);
    }

    #[test]
    fn test_compute_damage_never_negative() {
        let player = Player::new(Race::Human, 10);
        let sword = item("Long Sword");
        let tables = GameTables::default();
        let mut rng = GameRng::new(8);
        for d in [-150, -40, 0, 40, 150] {
            let mut monster = orc();
            let comp = compute_damage(
                2,
                5,
                Critical::default(),
                &DamageSource::melee(&player, Some(&sword)),
                &mut monster,
                Deadliness::new(d),
                &tables,
                &mut rng,
                &mut MessageLog::new(),
            );
            assert!(comp.damage >= 0);
            if d <= -40 {
                assert_eq!(comp.sides, 0);
                assert_eq!(comp.damage, 0);
            }
        }
    }
}
