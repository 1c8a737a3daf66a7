//! Contradiction removal
//!
//! The last cleanup before naming. Properties that a curse or a negative
//! value makes meaningless are removed, and every bonus is clamped to its
//! ceiling.

use crate::object::{Artifact, Bonus, CurseFlags, ObjectFlags, Stat, BONUS_MAX};

pub const TO_HIT_CEILING: i32 = 30;
pub const TO_DAM_CEILING: i32 = 30;
pub const TO_AC_CEILING: i32 = 35;
pub const STAT_CEILING: i32 = 6;

/// Ceiling per bonus, in [`Bonus`] order
const BONUS_CEILINGS: [i32; BONUS_MAX] = [6, 6, 6, 6, 15, 3, 3, 3, 8];

/// Protective flags each draining or impairing curse cancels
const CANCELLED_BY: [(CurseFlags, ObjectFlags); 6] = [
    (CurseFlags::DRAIN_EXP, ObjectFlags::HOLD_LIFE),
    (CurseFlags::DRAIN_HP, ObjectFlags::REGEN),
    (CurseFlags::IMPAIR_HP, ObjectFlags::REGEN),
    (CurseFlags::COWARDICE, ObjectFlags::PROT_FEAR),
    (CurseFlags::HALLUCINATION, ObjectFlags::PROT_CONF),
    (CurseFlags::SIPHON, ObjectFlags::SLOW_DIGEST),
];

const STATS: [Stat; 6] = [Stat::Str, Stat::Int, Stat::Wis, Stat::Dex, Stat::Con, Stat::Chr];

pub fn remove_contradictions(artifact: &mut Artifact) {
    if artifact.curses.contains(CurseFlags::AGGRAVATE) {
        let stealth = &mut artifact.bonuses[Bonus::Stealth as usize];
        *stealth = (*stealth).min(0);
    }
    if artifact.is_cursed() {
        artifact.flags.remove(ObjectFlags::BLESSED);
    }
    for (curse, flag) in CANCELLED_BY {
        if artifact.curses.contains(curse) {
            artifact.flags.remove(flag);
        }
    }
    if artifact.curses.contains(CurseFlags::TELEPORT | CurseFlags::NO_TELEPORT) {
        artifact.curses.remove(CurseFlags::NO_TELEPORT);
    }

    for stat in STATS {
        let value = &mut artifact.stats[stat as usize];
        *value = (*value).min(STAT_CEILING);
        if *value < 0 {
            artifact.flags.remove(stat.sustain());
        }
    }
    for (value, ceiling) in artifact.bonuses.iter_mut().zip(BONUS_CEILINGS) {
        *value = (*value).min(ceiling);
    }
    for resist in artifact.resists.iter_mut() {
        *resist = (*resist).clamp(-100, 100);
    }

    artifact.to_h = artifact.to_h.min(TO_HIT_CEILING);
    artifact.to_d = artifact.to_d.min(TO_DAM_CEILING);
    artifact.to_a = artifact.to_a.min(TO_AC_CEILING);

    if !artifact.tval.is_melee_weapon() {
        artifact.flags.remove(ObjectFlags::THROWING | ObjectFlags::IMPACT);
    }
}

/// Whether [`remove_contradictions`] would find nothing to change
pub fn is_contradiction_free(artifact: &Artifact) -> bool {
    let mut cleaned = artifact.clone();
    remove_contradictions(&mut cleaned);
    cleaned == *artifact
}
