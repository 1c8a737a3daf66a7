//! Critical hits
//!
//! A critical adds damage dice. Melee and missile attacks use separate
//! trigger rates and tier tables; within a table the tiers are checked in
//! order and the first one that rolls true wins.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::player::{Player, Specialty};
use fa_rng::RandomSource;

/// Critical message tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
pub enum CriticalTier {
    /// Not a critical
    #[default]
    Normal,
    Solid,
    Hack,
    Pound,
    Slice,
    Bludgeon,
    Smite,
    Shot,
    GoodShot,
    GreatShot,
    SuperbShot,
}

impl CriticalTier {
    /// Melee tier for a number of added dice
    pub fn melee(dice: i32, edged: bool) -> Self {
        match dice {
            i32::MIN..=0 => CriticalTier::Normal,
            1..=2 => CriticalTier::Solid,
            3 if edged => CriticalTier::Hack,
            3 => CriticalTier::Pound,
            4 if edged => CriticalTier::Slice,
            4 => CriticalTier::Bludgeon,
            _ => CriticalTier::Smite,
        }
    }

    /// Missile tier for a number of added dice
    pub fn missile(dice: i32) -> Self {
        match dice {
            i32::MIN..=0 => CriticalTier::Shot,
            1 => CriticalTier::GoodShot,
            2 => CriticalTier::GreatShot,
            _ => CriticalTier::SuperbShot,
        }
    }

    pub fn message(self) -> Option<&'static str> {
        match self {
            CriticalTier::Normal | CriticalTier::Shot => None,
            CriticalTier::Solid => Some("It was a solid hit!"),
            CriticalTier::Hack => Some("You hack into it!"),
            CriticalTier::Pound => Some("You pound it!"),
            CriticalTier::Slice => Some("You slice into it!"),
            CriticalTier::Bludgeon => Some("You bludgeon it!"),
            CriticalTier::Smite => Some("You *smite* it!"),
            CriticalTier::GoodShot => Some("It was a good hit!"),
            CriticalTier::GreatShot => Some("It was a great hit!"),
            CriticalTier::SuperbShot => Some("It was a *superb* hit!"),
        }
    }
}

/// Result of a critical check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Critical {
    /// Extra damage dice
    pub dice: i32,
    /// Message tier; [`CriticalTier::Normal`] or [`CriticalTier::Shot`] when
    /// the target is unseen
    pub tier: CriticalTier,
}

/// Melee critical check.
///
/// Returns 0, 2, 3, 4 or 5 added dice.
pub fn critical_melee(
    player: &Player,
    base_power: i32,
    sleep_bonus: i32,
    visible: bool,
    edged: bool,
    rng: &mut dyn RandomSource,
) -> Critical {
    let power = (base_power + sleep_bonus).max(0);
    let triggered = (player.has(Specialty::SKILLED_FIGHTER) && rng.one_in(6))
        || rng.randint1(power + 240) <= power;
    if !triggered {
        return Critical::default();
    }
    let dice = if rng.one_in(40) {
        5
    } else if rng.one_in(12) {
        4
    } else if rng.one_in(3) {
        3
    } else {
        2
    };
    Critical {
        dice,
        tier: if visible {
            CriticalTier::melee(dice, edged)
        } else {
            CriticalTier::Normal
        },
    }
}

/// Missile and thrown-object critical check.
///
/// Returns 0 to 3 added dice. Thrown objects crit half again as often.
pub fn critical_shot(
    player: &Player,
    base_power: i32,
    sleep_bonus: i32,
    thrown: bool,
    visible: bool,
    rng: &mut dyn RandomSource,
) -> Critical {
    let mut power = (base_power + sleep_bonus).max(0);
    if thrown {
        power = power * 3 / 2;
    }
    let triggered = (player.has(Specialty::MARKSMAN) && rng.one_in(6))
        || rng.randint1(power + 360) <= power;
    if !triggered {
        return Critical {
            dice: 0,
            tier: CriticalTier::Shot,
        };
    }
    let dice = if rng.one_in(50) {
        3
    } else if rng.one_in(10) {
        2
    } else {
        1
    };
    Critical {
        dice,
        tier: if visible {
            CriticalTier::missile(dice)
        } else {
            CriticalTier::Shot
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Race;
    use fa_rng::{GameRng, ScriptedRng};

    fn fighter() -> Player {
        Player::new(Race::Human, 20)
    }

    #[test]
    fn test_forced_top_tier() {
        // randint1(340) -> 1 <= 100 triggers; one_in(40) -> 0
        let mut rng = ScriptedRng::new([0, 0]);
        let crit = critical_melee(&fighter(), 100, 0, true, true, &mut rng);
        assert_eq!(crit.dice, 5);
        assert_eq!(crit.tier, CriticalTier::Smite);
    }

    #[test]
    fn test_tier_order_first_match_wins() {
        // trigger, fail 1/40, pass 1/12
        let mut rng = ScriptedRng::new([0, 1, 0]);
        let crit = critical_melee(&fighter(), 100, 0, true, false, &mut rng);
        assert_eq!(crit.dice, 4);
        assert_eq!(crit.tier, CriticalTier::Bludgeon);
        // trigger, fail 1/40, fail 1/12, fail 1/3
        let mut rng = ScriptedRng::new([0, 1, 1, 1]);
        assert_eq!(critical_melee(&fighter(), 100, 0, true, true, &mut rng).dice, 2);
    }

    #[test]
    fn test_no_critical() {
        let mut rng = ScriptedRng::new([339]);
        let crit = critical_melee(&fighter(), 100, 0, true, true, &mut rng);
        assert_eq!(crit, Critical::default());
    }

    #[test]
    fn test_skilled_fighter_shortcut() {
        let player = fighter().with_specialties(Specialty::SKILLED_FIGHTER);
        // one_in(6) passes with zero power, then tier rolls
        let mut rng = ScriptedRng::new([0, 1, 1, 0]);
        assert_eq!(critical_melee(&player, 0, 0, true, true, &mut rng).dice, 3);
    }

    #[test]
    fn test_melee_dice_values() {
        let player = fighter().with_specialties(Specialty::SKILLED_FIGHTER);
        let mut rng = GameRng::new(11);
        for _ in 0..5000 {
            let crit = critical_melee(&player, 300, 20, true, true, &mut rng);
            assert!(matches!(crit.dice, 0 | 2 | 3 | 4 | 5));
        }
    }

    #[test]
    fn test_shot_tiers() {
        // trigger, 1/50 hit
        let mut rng = ScriptedRng::new([0, 0]);
        let crit = critical_shot(&fighter(), 50, 0, false, true, &mut rng);
        assert_eq!(crit.dice, 3);
        assert_eq!(crit.tier, CriticalTier::SuperbShot);
        let mut rng = ScriptedRng::new([0, 1, 5]);
        assert_eq!(critical_shot(&fighter(), 50, 0, false, true, &mut rng).dice, 1);
    }

    #[test]
    fn test_thrown_power_boost() {
        // power 100 thrown -> 150: randint1(510) = 150 still triggers
        let mut rng = ScriptedRng::new([149, 1, 1]);
        assert_eq!(critical_shot(&fighter(), 100, 0, true, true, &mut rng).dice, 1);
        let mut rng = ScriptedRng::new([149]);
        assert_eq!(critical_shot(&fighter(), 100, 0, false, true, &mut rng).dice, 0);
    }

    #[test]
    fn test_unseen_critical_has_no_tier() {
        let mut rng = ScriptedRng::new([0, 0]);
        let crit = critical_melee(&fighter(), 100, 0, false, true, &mut rng);
        assert_eq!(crit.dice, 5);
        assert_eq!(crit.tier, CriticalTier::Normal);
    }
}
