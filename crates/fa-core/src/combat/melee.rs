//! Player melee
//!
//! One call to [`py_attack`] is one attack round against the monster in a
//! grid: an optional shield bash, then up to the player's number of blows.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::critical::critical_melee;
use super::damage::{compute_damage, DamageSource};
use super::events::{ChaosEffect, CombatEvent, ItemRef};
use super::hit::{effective_armour, melee_chance, sleep_bonus, test_hit, BTH_PLUS_ADJ};
use super::CombatContext;
use crate::monster::{MonsterIdx, RaceFlags};
use crate::object::{Item, ObjectFlags, ObjectProperty};
use crate::player::{Player, SpecialAttack, Specialty};
use crate::world::{Arena, Grid};

/// Melee chance bonus for fighting unlit with the Unlight specialty
pub const UNLIGHT_BONUS: i32 = 10;

/// Blows above this much damage from an impact weapon shake the ground
const EARTHQUAKE_THRESHOLD: i32 = 50;

/// Speed gained by the Fury specialty
const FURY_BOOST: i32 = 10;

/// Extra energy lost to a stumble after a failed bash
const STUMBLE_ENERGY: i32 = 34;

/// Distance a chaotic blow teleports its target
const CHAOS_TELEPORT: i32 = 10;

/// Summary of one attack round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MeleeOutcome {
    /// Blows thrown, not counting the bash
    pub blows: i32,
    pub hits: i32,
    /// Total damage dealt, bash included
    pub damage: i32,
    pub bashed: bool,
    pub killed: bool,
    /// The target was frightened by the attack
    pub frightened: bool,
    /// A flee attack fired and the player escapes
    pub player_fled: bool,
    pub pushed_past: bool,
    pub speed_boost: i32,
    /// Grid at which the caller should cause an earthquake
    pub earthquake: Option<Grid>,
    /// Energy the round cost
    pub energy: i32,
}

enum Bash {
    NotTried,
    Missed,
    Landed { killed: bool },
}

/// Attack the monster at `target`.
///
/// With `fight_peaceful` false, a non-hostile monster is pushed past
/// instead of attacked.
pub fn py_attack(
    ctx: &mut CombatContext<'_>,
    player: &mut Player,
    arena: &mut dyn Arena,
    target: Grid,
    fight_peaceful: bool,
) -> MeleeOutcome {
    let mut outcome = MeleeOutcome::default();
    let Some(idx) = arena.monster_at(target) else {
        return outcome;
    };
    let Some(monster) = arena.monster(idx) else {
        return outcome;
    };
    let name = monster.race.name.clone();

    if !monster.hostile && !fight_peaceful {
        ctx.sink.emit(CombatEvent::PushPast { monster: name });
        outcome.pushed_past = true;
        return outcome;
    }

    outcome.energy = 100;
    if player.afraid > 0 {
        ctx.sink.emit(CombatEvent::TooAfraid { monster: name });
        player.energy_use = outcome.energy;
        return outcome;
    }

    let weapon = player.equipment.weapon.clone();
    let mut chance = melee_chance(player, weapon.as_ref());
    if player.has(Specialty::UNLIGHT) && player.is_unlit() {
        chance += UNLIGHT_BONUS;
    }
    let armour = effective_armour(
        monster,
        arena.terrain(target),
        player.has(Specialty::TERRAIN_BYPASS),
    );
    let mut bonus = sleep_bonus(player, monster);

    match shield_bash(ctx, player, arena, idx, bonus, &mut outcome) {
        Bash::Landed { killed: true } => return finish_round(ctx, player, outcome, &name),
        Bash::Landed { .. } => bonus = 0,
        Bash::Missed | Bash::NotTried => {}
    }

    let mut blows = player.blows.max(1);
    if player.has(Specialty::FAST_ATTACK) && ctx.rng.one_in(3) {
        blows += 1;
    }

    let (dice, sides, weight, edged) = match &weapon {
        Some(w) => (w.dd, w.ds, w.weight, w.tval.is_edged()),
        None => (1, 1, 0, false),
    };
    let impact = weapon
        .as_ref()
        .is_some_and(|w| w.flags.contains(ObjectFlags::IMPACT));
    let mut mana_burned = false;

    for _ in 0..blows {
        let Some(monster) = arena.monster_mut(idx) else {
            break;
        };
        outcome.blows += 1;
        let visible = monster.visible;

        let roll = test_hit(chance, armour, visible, ctx.rng);
        if roll.exact {
            ctx.sink.notice_property(ObjectProperty::ToHit, ItemRef::Weapon);
        }
        if !roll.hit {
            ctx.sink.emit(CombatEvent::Miss {
                monster: name.clone(),
                visible,
            });
            monster.wake();
            bonus = 0;
            continue;
        }
        outcome.hits += 1;

        let crit = critical_melee(player, chance / 2 + weight / 10, bonus, visible, edged, ctx.rng);
        bonus = 0;
        let source = DamageSource::melee(player, weapon.as_ref());
        let comp = compute_damage(
            dice,
            sides,
            crit,
            &source,
            monster,
            player.deadliness(weapon.as_ref()),
            ctx.tables,
            ctx.rng,
            ctx.sink,
        );
        let mut damage = comp.damage;

        if player.has(Specialty::MANA_BURN) && !mana_burned && monster.mana > 0 {
            let drained = monster.mana.min(ctx.rng.randint1(player.level / 2 + 5));
            monster.mana -= drained;
            damage += drained * 3 / 2;
            mana_burned = true;
            ctx.sink.emit(CombatEvent::ManaBurn {
                monster: name.clone(),
                drained,
            });
        }

        let verb = comp
            .slay
            .and_then(|s| ctx.tables.slays.slay(s))
            .map(|e| e.verb.clone())
            .or_else(|| {
                comp.brand
                    .and_then(|b| ctx.tables.slays.brand(b))
                    .map(|e| e.verb.clone())
            });
        ctx.sink.emit(CombatEvent::Hit {
            monster: name.clone(),
            visible,
            tier: crit.tier,
            damage,
            verb,
        });
        trace!(
            blow = outcome.blows,
            chance,
            armour,
            crit_dice = crit.dice,
            sides = comp.sides,
            damage,
            "melee blow"
        );

        if impact && damage > EARTHQUAKE_THRESHOLD {
            outcome.earthquake = Some(target);
        }

        outcome.damage += damage;
        let result = monster.take_hit(damage, ctx.rng);
        if result.killed {
            let verb = monster.death_verb().to_string();
            ctx.sink.emit(CombatEvent::Killed {
                monster: name.clone(),
                verb,
            });
            arena.remove_monster(idx);
            outcome.killed = true;
            break;
        }
        outcome.frightened |= result.frightened;

        if apply_special_attacks(ctx, player, arena, idx, weapon.as_ref(), &name, &mut outcome) {
            break;
        }
    }

    finish_round(ctx, player, outcome, &name)
}

/// Try a shield bash before the blows.
fn shield_bash(
    ctx: &mut CombatContext<'_>,
    player: &Player,
    arena: &mut dyn Arena,
    idx: MonsterIdx,
    bonus: i32,
    outcome: &mut MeleeOutcome,
) -> Bash {
    let Some(shield) = player.equipment.bash_shield() else {
        return Bash::NotTried;
    };
    let Some(monster) = arena.monster_mut(idx) else {
        return Bash::NotTried;
    };
    if bonus > 0 || !monster.visible || monster.level() <= player.level / 5 {
        return Bash::NotTried;
    }

    let bash_chance = (player.skill_melee + player.to_h * BTH_PLUS_ADJ) / 4;
    if bash_chance <= ctx.rng.randint0(240 + 9 * monster.level()) {
        if ctx.rng.one_in(4) {
            ctx.sink.emit(CombatEvent::Stumble);
            outcome.energy += STUMBLE_ENERGY;
        }
        return Bash::Missed;
    }

    let name = monster.race.name.clone();
    let damage = ctx.rng.damroll(shield.dd, shield.ds) + shield.weight / 50 + player.level / 5;
    ctx.sink.emit(CombatEvent::ShieldBash {
        monster: name.clone(),
        damage,
    });
    outcome.bashed = true;
    outcome.damage += damage;

    let result = monster.take_hit(damage, ctx.rng);
    if result.killed {
        let verb = monster.death_verb().to_string();
        ctx.sink.emit(CombatEvent::Killed {
            monster: name,
            verb,
        });
        arena.remove_monster(idx);
        outcome.killed = true;
        return Bash::Landed { killed: true };
    }
    outcome.frightened |= result.frightened;

    if !monster.race.has(RaceFlags::NO_STUN) && ctx.rng.one_in(2) {
        monster.stunned += ctx.rng.randint1(3) + 2;
        ctx.sink.emit(CombatEvent::BashStun { monster: name });
    } else if !monster.race.has(RaceFlags::NO_CONF) && ctx.rng.one_in(3) {
        monster.confused += ctx.rng.randint1(3) + 2;
        ctx.sink.emit(CombatEvent::BashConfuse { monster: name });
    }
    Bash::Landed { killed: false }
}

/// Resolve temporary special attacks after a blow that did not kill.
///
/// Returns true when the round ends early.
fn apply_special_attacks(
    ctx: &mut CombatContext<'_>,
    player: &mut Player,
    arena: &mut dyn Arena,
    idx: MonsterIdx,
    weapon: Option<&Item>,
    name: &str,
    outcome: &mut MeleeOutcome,
) -> bool {
    let Some(monster) = arena.monster_mut(idx) else {
        return true;
    };

    if player.special_attacks.contains(SpecialAttack::CONFUSE) {
        player.consume(SpecialAttack::CONFUSE);
        if monster.race.has(RaceFlags::NO_CONF) {
            monster.learn(RaceFlags::NO_CONF);
            ctx.sink.emit(CombatEvent::Unaffected {
                monster: name.to_string(),
            });
        } else {
            monster.confused += 10 + ctx.rng.randint0(player.level) / 5;
            ctx.sink.emit(CombatEvent::Confused {
                monster: name.to_string(),
            });
        }
    }

    if player.special_attacks.contains(SpecialAttack::BLACK_BREATH) {
        player.consume(SpecialAttack::BLACK_BREATH);
        if monster.race.has(RaceFlags::NO_FEAR) {
            monster.learn(RaceFlags::NO_FEAR);
            ctx.sink.emit(CombatEvent::Unaffected {
                monster: name.to_string(),
            });
        } else {
            monster.afraid += 10 + ctx.rng.randint1(player.level);
            outcome.frightened = true;
            ctx.sink.emit(CombatEvent::BlackBreath {
                monster: name.to_string(),
            });
        }
    }

    let chaotic_weapon = weapon.is_some_and(|w| w.flags.contains(ObjectFlags::CHAOTIC));
    let chaotic_attack = player.special_attacks.contains(SpecialAttack::CHAOTIC);
    if (chaotic_weapon || chaotic_attack) && ctx.rng.one_in(5) {
        if chaotic_attack {
            player.consume(SpecialAttack::CHAOTIC);
        }
        if chaotic_weapon {
            ctx.sink
                .notice_property(ObjectProperty::Flag(ObjectFlags::CHAOTIC), ItemRef::Weapon);
        }
        let effect = match ctx.rng.randint0(4) {
            0 => ChaosEffect::Confuse,
            1 => ChaosEffect::Stun,
            2 => ChaosEffect::Slow,
            _ => ChaosEffect::Teleport,
        };
        ctx.sink.emit(CombatEvent::Chaos {
            monster: name.to_string(),
            effect,
        });
        match effect {
            ChaosEffect::Confuse => monster.confused += 10,
            ChaosEffect::Stun => monster.stunned += 5,
            ChaosEffect::Slow => monster.speed -= 10,
            ChaosEffect::Teleport => {
                let from = monster.grid;
                arena.teleport_monster(idx, from, CHAOS_TELEPORT, ctx.rng);
                return true;
            }
        }
    }

    if player.special_attacks.contains(SpecialAttack::FLEE) {
        player.consume(SpecialAttack::FLEE);
        ctx.sink.emit(CombatEvent::PlayerFlees);
        outcome.player_fled = true;
        return true;
    }

    if player.special_attacks.contains(SpecialAttack::HOLY) && ctx.rng.one_in(20) {
        player.consume(SpecialAttack::HOLY);
        ctx.sink.emit(CombatEvent::HolyFades);
    }
    false
}

fn finish_round(
    ctx: &mut CombatContext<'_>,
    player: &mut Player,
    mut outcome: MeleeOutcome,
    name: &str,
) -> MeleeOutcome {
    if player.has(Specialty::FURY) && (outcome.killed || outcome.frightened) {
        outcome.speed_boost = FURY_BOOST;
        player.speed_boost += FURY_BOOST;
        ctx.sink.emit(CombatEvent::SpeedBoost { amount: FURY_BOOST });
    }
    if outcome.frightened && !outcome.killed {
        ctx.sink.emit(CombatEvent::Flees {
            monster: name.to_string(),
        });
    }
    if let Some(grid) = outcome.earthquake {
        ctx.sink.emit(CombatEvent::Earthquake { grid });
    }
    player.energy_use = outcome.energy;
    outcome
}
