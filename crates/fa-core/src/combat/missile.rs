//! Firing and throwing
//!
//! Both entry points take one object from a container, walk it along a
//! projected path and resolve a hit against each monster met on the way.
//! A fired missile keeps flying after a miss; a thrown one stops. Whatever
//! survives lands at the last grid reached.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::critical::critical_shot;
use super::damage::{compute_damage, DamageSource};
use super::events::{CombatEvent, ItemRef};
use super::hit::{effective_armour, fire_chance, sleep_bonus, test_hit, throw_chance};
use super::CombatContext;
use crate::object::{EgoKind, Item, ObjectProperty, Stat, Tval};
use crate::player::{Player, SpecialAttack, Specialty};
use crate::tables::Deadliness;
use crate::world::{Arena, Grid, ItemContainer, MissileError};

/// Longest range of a fired missile
pub const MAX_FIRE_RANGE: i32 = 20;
/// Longest range of a thrown object
pub const MAX_THROW_RANGE: i32 = 10;

/// Damage added by a Velocity launcher or missile when it fires
const VELOCITY_BONUS: i32 = 15;

/// Summary of one shot or throw
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MissileOutcome {
    pub hits: i32,
    pub kills: i32,
    pub damage: i32,
    /// The projectile was destroyed
    pub broke: bool,
    /// Where the projectile came to rest, if it survived
    pub landed: Option<Grid>,
    pub energy: i32,
}

/// Percentage chance that a projectile breaks after hitting
pub fn breakage_chance(item: &Item) -> i32 {
    if item.is_artifact() {
        return 0;
    }
    if item.is_throwing_weapon() {
        return 0;
    }
    match item.tval {
        Tval::Potion | Tval::Flask | Tval::Food | Tval::Bottle => 100,
        Tval::Light | Tval::Scroll => 50,
        Tval::Arrow => 35,
        Tval::Shot | Tval::Bolt | Tval::Spike | Tval::Wand => 25,
        _ => 10,
    }
}

/// The rules that differ between firing and throwing
struct Flight<'a> {
    launcher: Option<&'a Item>,
    /// Dice multiplier
    mult: i32,
    range: i32,
    chance: i32,
    deadliness: Deadliness,
    thrown: bool,
}

/// Fire one missile from a quiver slot at `target`.
pub fn fire(
    ctx: &mut CombatContext<'_>,
    player: &mut Player,
    arena: &mut dyn Arena,
    quiver_slot: usize,
    target: Grid,
) -> Result<MissileOutcome, MissileError> {
    let launcher = player
        .equipment
        .bow
        .clone()
        .ok_or(MissileError::NoLauncher)?;
    let ammo = player
        .equipment
        .quiver
        .get(quiver_slot)
        .ok_or(MissileError::NoSuchItem(quiver_slot))?;
    if !ammo.fits_launcher(&launcher) {
        return Err(MissileError::WrongAmmo);
    }
    let chance = fire_chance(player, ammo, &launcher);
    let deadliness = Deadliness::new(player.to_d + ammo.to_d + launcher.to_d);
    let missile = player
        .equipment
        .quiver
        .take(quiver_slot, 1)
        .ok_or(MissileError::NoSuchItem(quiver_slot))?;

    let mult = launcher.multiplier();
    let flight = Flight {
        launcher: Some(&launcher),
        mult,
        range: (6 + 2 * mult).min(MAX_FIRE_RANGE),
        chance,
        deadliness,
        thrown: false,
    };
    Ok(resolve_flight(ctx, player, arena, missile, target, flight))
}

/// Throw one object from a pack slot at `target`.
pub fn throw(
    ctx: &mut CombatContext<'_>,
    player: &mut Player,
    arena: &mut dyn Arena,
    pack_slot: usize,
    target: Grid,
) -> Result<MissileOutcome, MissileError> {
    let item = player
        .pack
        .get(pack_slot)
        .ok_or(MissileError::NoSuchItem(pack_slot))?;
    let range = throw_range(player, item);
    if range < 1 {
        return Err(MissileError::CannotThrow);
    }
    let chance = throw_chance(player, item);
    let deadliness = Deadliness::new(player.to_d + item.to_d);
    let missile = player
        .pack
        .take(pack_slot, 1)
        .ok_or(MissileError::NoSuchItem(pack_slot))?;

    let mult = if missile.is_throwing_weapon() {
        2 + player.level / 20
    } else {
        1
    };
    let flight = Flight {
        launcher: None,
        mult,
        range,
        chance,
        deadliness,
        thrown: true,
    };
    Ok(resolve_flight(ctx, player, arena, missile, target, flight))
}

/// How far the player can throw an object; zero if it is too heavy
fn throw_range(player: &Player, item: &Item) -> i32 {
    let strength = player.stat(Stat::Str);
    ((strength + 20) * 10 / item.weight.max(10)).min(MAX_THROW_RANGE)
}

fn strong_shooter_bonus(player: &Player, missile: &Item) -> i32 {
    if !player.has(Specialty::STRONG_SHOOTER) {
        return 0;
    }
    match missile.tval {
        Tval::Shot => player.level / 4,
        Tval::Arrow => player.level / 6,
        Tval::Bolt => player.level / 8,
        _ => 0,
    }
}

fn has_ego(missile: &Item, launcher: Option<&Item>, ego: EgoKind) -> bool {
    missile.ego == Some(ego) || launcher.is_some_and(|l| l.ego == Some(ego))
}

fn resolve_flight(
    ctx: &mut CombatContext<'_>,
    player: &mut Player,
    arena: &mut dyn Arena,
    missile: Item,
    target: Grid,
    flight: Flight<'_>,
) -> MissileOutcome {
    let mut outcome = MissileOutcome {
        energy: 100,
        ..Default::default()
    };
    let name = missile.describe();
    let origin = player.grid;
    let mut last = origin;
    let mut pierced = false;
    let mut missed = false;

    for grid in arena.project_path(origin, target, flight.range) {
        if !arena.terrain(grid).is_projectable() {
            break;
        }
        last = grid;
        let Some(idx) = arena.monster_at(grid) else {
            continue;
        };
        let terrain = arena.terrain(grid);
        let Some(monster) = arena.monster_mut(idx) else {
            continue;
        };
        let monster_name = monster.race.name.clone();
        let visible = monster.visible;

        let mut chance = flight.chance - origin.distance(grid);
        if pierced {
            chance += chance / 2;
        }
        if missed {
            chance -= chance / 3;
        }
        let mut armour = effective_armour(monster, terrain, player.has(Specialty::TERRAIN_BYPASS));
        if has_ego(&missile, flight.launcher, EgoKind::Accuracy) && ctx.rng.one_in(3) {
            armour /= 3;
        }
        let bonus = sleep_bonus(player, monster);

        let roll = test_hit(chance, armour, visible, ctx.rng);
        if roll.exact {
            ctx.sink.notice_property(ObjectProperty::ToHit, ItemRef::Missile);
        }
        if !roll.hit {
            ctx.sink.emit(CombatEvent::MissileMiss {
                missile: name.clone(),
                monster: monster_name,
            });
            monster.wake();
            missed = true;
            if flight.thrown {
                break;
            }
            continue;
        }

        let crit = critical_shot(
            player,
            chance / 2 + missile.weight / 10,
            bonus,
            flight.thrown,
            visible,
            ctx.rng,
        );
        let source = match flight.launcher {
            Some(launcher) => DamageSource::fired(player, &missile, launcher),
            None => DamageSource::thrown(player, &missile),
        };
        let comp = compute_damage(
            missile.dd * flight.mult,
            missile.ds,
            crit,
            &source,
            monster,
            flight.deadliness,
            ctx.tables,
            ctx.rng,
            ctx.sink,
        );
        let mut damage = comp.damage;

        if !flight.thrown {
            damage += strong_shooter_bonus(player, &missile);
            if player.special_attacks.contains(SpecialAttack::SUPERSHOT) {
                damage = damage * 3 / 2 + 35;
                player.consume(SpecialAttack::SUPERSHOT);
                ctx.sink.emit(CombatEvent::Supershot);
            }
        }
        if has_ego(&missile, flight.launcher, EgoKind::Velocity) && ctx.rng.one_in(5) {
            damage += VELOCITY_BONUS;
        }

        ctx.sink.emit(CombatEvent::MissileHit {
            missile: name.clone(),
            monster: monster_name.clone(),
            visible,
            tier: crit.tier,
            damage,
        });
        trace!(
            distance = origin.distance(grid),
            chance,
            armour,
            crit_dice = crit.dice,
            sides = comp.sides,
            damage,
            "missile hit"
        );
        outcome.hits += 1;
        outcome.damage += damage;

        let result = monster.take_hit(damage, ctx.rng);
        if result.killed {
            let verb = monster.death_verb().to_string();
            ctx.sink.emit(CombatEvent::Killed {
                monster: monster_name,
                verb,
            });
            arena.remove_monster(idx);
            outcome.kills += 1;
        } else if result.frightened {
            ctx.sink.emit(CombatEvent::Flees {
                monster: monster_name,
            });
        }

        let pierces = !flight.thrown
            && player.has(Specialty::PIERCE_SHOT)
            && matches!(missile.tval, Tval::Arrow | Tval::Bolt)
            && ctx.rng.one_in(2);
        if !pierces {
            break;
        }
        ctx.sink.emit(CombatEvent::Pierces {
            missile: name.clone(),
        });
        pierced = true;
    }

    if outcome.hits > 0 && ctx.rng.percent(breakage_chance(&missile)) {
        ctx.sink.emit(CombatEvent::Breaks { missile: name });
        outcome.broke = true;
    } else {
        ctx.sink.emit(CombatEvent::Lands {
            missile: name,
            grid: last,
        });
        arena.drop_item(last, missile);
        outcome.landed = Some(last);
    }
    player.energy_use = outcome.energy;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::MessageLog;
    use crate::monster::{Monster, MonsterRace, RaceFlags};
    use crate::object::kind_by_name;
    use crate::player::Race;
    use crate::tables::GameTables;
    use crate::world::{Field, Terrain};
    use fa_rng::{GameRng, RandomSource, ScriptedRng};

    fn item(name: &str) -> Item {
        Item::new(kind_by_name(name).unwrap()).unwrap()
    }

    fn stack(name: &str, n: i32) -> Item {
        let mut item = item(name);
        item.number = n;
        item
    }

    fn archer() -> Player {
        let mut player = Player::new(Race::Hobbit, 20).with_bow(item("Long Bow"));
        player.equipment.quiver.put(stack("Arrow", 20)).unwrap();
        player.grid = Grid::new(0, 2);
        player
    }

    fn troll() -> MonsterRace {
        MonsterRace::new("Cave troll", 20, 30)
            .with_flags(RaceFlags::TROLL | RaceFlags::NO_FEAR)
            .with_hit_dice(100, 10)
    }

    fn shoot(
        rng: &mut dyn RandomSource,
        player: &mut Player,
        field: &mut Field,
        target: Grid,
        thrown: bool,
    ) -> (Result<MissileOutcome, MissileError>, MessageLog) {
        let tables = GameTables::default();
        let mut log = MessageLog::new();
        let result = {
            let mut ctx = CombatContext::new(rng, &tables, &mut log);
            if thrown {
                throw(&mut ctx, player, field, 0, target)
            } else {
                fire(&mut ctx, player, field, 0, target)
            }
        };
        (result, log)
    }

    #[test]
    fn test_breakage_by_category() {
        assert_eq!(breakage_chance(&item("Potion of Cure Light Wounds")), 100);
        assert_eq!(breakage_chance(&item("Arrow")), 35);
        assert_eq!(breakage_chance(&item("Bolt")), 25);
        assert_eq!(breakage_chance(&item("Dagger")), 0);
        assert_eq!(breakage_chance(&item("Long Sword")), 10);
        let mut artifact = item("Arrow");
        artifact.artifact = Some(crate::object::ArtifactId(1));
        assert_eq!(breakage_chance(&artifact), 0);
    }

    #[test]
    fn test_fire_errors() {
        let mut field = Field::new(10, 5);
        let mut rng = GameRng::new(1);
        let mut player = archer();
        player.equipment.bow = None;
        let (result, _) = shoot(&mut rng, &mut player, &mut field, Grid::new(5, 2), false);
        assert_eq!(result, Err(MissileError::NoLauncher));

        let mut player = Player::new(Race::Human, 10).with_bow(item("Long Bow"));
        let (result, _) = shoot(&mut rng, &mut player, &mut field, Grid::new(5, 2), false);
        assert_eq!(result, Err(MissileError::NoSuchItem(0)));

        player.equipment.quiver.put(stack("Bolt", 5)).unwrap();
        let (result, _) = shoot(&mut rng, &mut player, &mut field, Grid::new(5, 2), false);
        assert_eq!(result, Err(MissileError::WrongAmmo));
        assert_eq!(player.equipment.quiver.get(0).unwrap().number, 5);
    }

    #[test]
    fn test_fire_kills_weak_monster() {
        let mut field = Field::new(10, 5);
        let grid = Grid::new(4, 2);
        let race = MonsterRace::new("Jackal", 1, 1).with_hit_dice(1, 1);
        field.place_monster(Monster::new(race, grid));
        let mut player = archer();
        let mut rng = ScriptedRng::new([0]);
        let (result, log) = shoot(&mut rng, &mut player, &mut field, grid, false);
        let outcome = result.unwrap();
        assert_eq!(outcome.hits, 1);
        assert_eq!(outcome.kills, 1);
        assert!(field.monster_at(grid).is_none());
        assert_eq!(log.count(|e| matches!(e, CombatEvent::Killed { .. })), 1);
        assert_eq!(player.equipment.quiver.get(0).unwrap().number, 19);
        assert!(outcome.broke || field.items_at(grid).count() == 1);
    }

    #[test]
    fn test_fired_miss_continues() {
        let mut field = Field::new(10, 5);
        field.place_monster(Monster::new(troll(), Grid::new(3, 2)));
        field.place_monster(Monster::new(troll(), Grid::new(5, 2)));
        let mut player = archer();
        let mut rng = ScriptedRng::new([7, 7]);
        let (result, log) = shoot(&mut rng, &mut player, &mut field, Grid::new(3, 2), false);
        let outcome = result.unwrap();
        assert_eq!(outcome.hits, 0);
        assert_eq!(log.count(|e| matches!(e, CombatEvent::MissileMiss { .. })), 2);
        // the arrow flies on to the edge of the field
        assert_eq!(outcome.landed, Some(Grid::new(9, 2)));
    }

    #[test]
    fn test_thrown_miss_stops() {
        let mut field = Field::new(10, 5);
        field.place_monster(Monster::new(troll(), Grid::new(3, 2)));
        field.place_monster(Monster::new(troll(), Grid::new(5, 2)));
        let mut player = archer();
        player.pack.put(item("Dagger")).unwrap();
        let mut rng = ScriptedRng::new([7]);
        let (result, log) = shoot(&mut rng, &mut player, &mut field, Grid::new(5, 2), true);
        let outcome = result.unwrap();
        assert_eq!(log.count(|e| matches!(e, CombatEvent::MissileMiss { .. })), 1);
        assert_eq!(outcome.landed, Some(Grid::new(3, 2)));
        assert_eq!(field.items_at(Grid::new(3, 2)).count(), 1);
        assert!(player.pack.is_empty());
    }

    #[test]
    fn test_rubble_blocks_flight() {
        let mut field = Field::new(10, 5);
        field.set_terrain(Grid::new(3, 2), Terrain::Rubble);
        field.place_monster(Monster::new(troll(), Grid::new(5, 2)));
        let mut player = archer();
        let mut rng = GameRng::new(2);
        let (result, log) = shoot(&mut rng, &mut player, &mut field, Grid::new(5, 2), false);
        let outcome = result.unwrap();
        assert_eq!(outcome.hits, 0);
        assert!(log.count(|e| matches!(e, CombatEvent::MissileMiss { .. })) == 0);
        assert_eq!(outcome.landed, Some(Grid::new(2, 2)));
    }

    #[test]
    fn test_too_heavy_to_throw() {
        let mut field = Field::new(10, 5);
        let mut player = archer();
        player.stats[Stat::Str as usize] = 3;
        player.pack.put(item("Mace of Disruption")).unwrap();
        let mut rng = GameRng::new(2);
        let (result, _) = shoot(&mut rng, &mut player, &mut field, Grid::new(5, 2), true);
        assert_eq!(result, Err(MissileError::CannotThrow));
        assert_eq!(player.pack.len(), 1);
    }

    #[test]
    fn test_supershot_consumed() {
        let mut field = Field::new(10, 5);
        let grid = Grid::new(4, 2);
        field.place_monster(Monster::new(troll(), grid));
        let mut player = archer();
        player.special_attacks = SpecialAttack::SUPERSHOT;
        let mut rng = ScriptedRng::new([0]);
        let (result, log) = shoot(&mut rng, &mut player, &mut field, grid, false);
        let outcome = result.unwrap();
        assert!(outcome.damage >= 35);
        assert!(!player.special_attacks.contains(SpecialAttack::SUPERSHOT));
        assert_eq!(log.count(|e| matches!(e, CombatEvent::Supershot)), 1);
    }

    #[test]
    fn test_strong_shooter_bonus() {
        let player = archer().with_specialties(Specialty::STRONG_SHOOTER);
        assert_eq!(strong_shooter_bonus(&player, &item("Arrow")), 3);
        assert_eq!(strong_shooter_bonus(&player, &item("Iron Shot")), 5);
        assert_eq!(strong_shooter_bonus(&archer(), &item("Arrow")), 0);
    }
}
