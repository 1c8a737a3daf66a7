//! Curses
//!
//! Curses and weaknesses are the only things that pay back into an
//! artifact's potential: taking one credits the budget with its (negative)
//! value. The gauntlet turns a finished design into a terrible one.

use fa_rng::RandomSource;

use super::quality::{design_cost, pick, Design};
use crate::object::{CurseFlags, Element, ObjectFlags, STAT_MAX};

/// Spent potential per extra curse in each gauntlet pass
const POTENTIAL_PER_CURSE: i32 = 2000;
/// Most curses one gauntlet pass adds
const MAX_CURSES_PER_PASS: i32 = 3;
/// Mild curses themes accept as a trade-off
const TRADE_OFF_CURSES: usize = 4;

/// Add a curse and credit its value to the potential
pub(crate) fn take_curse(design: &mut Design<'_>, curse: CurseFlags) -> bool {
    if curse.is_empty() || design.artifact.curses.contains(curse) {
        return false;
    }
    design.artifact.curses |= curse;
    let credit = -design.costs.curse_cost(curse);
    if credit > 0 {
        design.potential.credit(credit);
        design.drawbacks += 1;
    }
    true
}

/// Lower a resistance by `amount` and credit what the design loses in
/// value. Refused when the resistance is already as low as it goes.
pub(crate) fn take_weakness(design: &mut Design<'_>, element: Element, amount: i32) -> bool {
    let slot = element as usize;
    let current = design.artifact.resists[slot];
    let next = (current - amount.abs()).max(-100);
    if next == current {
        return false;
    }
    let before = design_cost(&design.artifact, &design.base, design.costs);
    design.artifact.resists[slot] = next;
    let credit = before - design_cost(&design.artifact, &design.base, design.costs);
    if credit > 0 {
        design.potential.credit(credit);
        design.drawbacks += 1;
    }
    true
}

/// A mild curse accepted in exchange for more to spend
pub(crate) fn trade_off_curse(design: &mut Design<'_>, rng: &mut dyn RandomSource) -> bool {
    let curse = pick(&CurseFlags::GAUNTLET[..TRADE_OFF_CURSES], rng);
    take_curse(design, curse)
}

/// Run the design through two or three passes that invert its bonuses,
/// strip its abilities and pile on curses, harsher with each pass.
pub(crate) fn curse_gauntlet(design: &mut Design<'_>, rng: &mut dyn RandomSource) {
    let passes = 2 + rng.randint0(2);
    take_curse(design, CurseFlags::LIGHT_CURSE);

    for pass in 0..passes {
        let art = &mut design.artifact;
        if rng.one_in(2) {
            art.to_h = -art.to_h.abs();
            art.to_d = -art.to_d.abs();
        }
        if rng.one_in(2) {
            art.to_a = -art.to_a.abs();
        }

        let start = rng.randint0(STAT_MAX as i32) as usize;
        if let Some(stat) = (0..STAT_MAX)
            .map(|i| (start + i) % STAT_MAX)
            .find(|&i| art.stats[i] > 0)
        {
            art.stats[stat] = -art.stats[stat];
        }

        if rng.one_in(3) {
            let gained: Vec<ObjectFlags> = art
                .flags
                .difference(design.base.flags)
                .iter()
                .collect();
            if !gained.is_empty() {
                let flag = pick(&gained, rng);
                art.flags.remove(flag);
            }
        }

        let count = (1 + design.potential.spent() / POTENTIAL_PER_CURSE).min(MAX_CURSES_PER_PASS);
        let worst = (4 + pass as usize * 3).min(CurseFlags::GAUNTLET.len());
        for _ in 0..count {
            let fresh: Vec<CurseFlags> = CurseFlags::GAUNTLET[..worst]
                .iter()
                .copied()
                .filter(|c| !design.artifact.curses.contains(*c))
                .collect();
            if fresh.is_empty() {
                break;
            }
            let curse = pick(&fresh, rng);
            take_curse(design, curse);
        }
    }

    if passes == 3 {
        take_curse(design, CurseFlags::HEAVY_CURSE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{kind_by_name, Item, ObjectProperty, Stat};
    use crate::randart::Category;
    use crate::tables::CostTable;
    use fa_rng::{GameRng, ScriptedRng};

    fn sword_design(costs: &CostTable) -> Design<'_> {
        let base = Item::new(kind_by_name("Long Sword").unwrap()).unwrap();
        Design::new(base, Category::Weapon, 6000, costs)
    }

    #[test]
    fn test_curse_credits_potential() {
        let costs = CostTable::default();
        let mut d = sword_design(&costs);
        assert!(take_curse(&mut d, CurseFlags::AGGRAVATE));
        assert_eq!(d.potential.remaining(), 6800);
        assert_eq!(d.potential.credited(), 800);
        assert!(!take_curse(&mut d, CurseFlags::AGGRAVATE));
        assert_eq!(d.potential.credited(), 800);
        assert!(d.potential.is_conserved());
    }

    #[test]
    fn test_weakness_credits_lost_value() {
        let costs = CostTable::default();
        let mut d = sword_design(&costs);
        assert!(take_weakness(&mut d, Element::Cold, 25));
        assert_eq!(d.artifact.resists[Element::Cold as usize], -25);
        assert_eq!(d.potential.credited(), 250);
        assert_eq!(d.potential.remaining(), 6250);
        assert_eq!(d.drawbacks, 1);
        assert!(d.potential.is_conserved());

        d.artifact.resists[Element::Cold as usize] = -100;
        assert!(!take_weakness(&mut d, Element::Cold, 25));
        assert_eq!(d.drawbacks, 1);
    }

    #[test]
    fn test_trade_off_is_mild() {
        let costs = CostTable::default();
        let mut d = sword_design(&costs);
        let mut rng = ScriptedRng::new([3]);
        assert!(trade_off_curse(&mut d, &mut rng));
        assert_eq!(d.artifact.curses, CurseFlags::HALLUCINATION);
    }

    #[test]
    fn test_gauntlet_leaves_artifact_cursed_and_weakened() {
        let costs = CostTable::default();
        for seed in 0..20 {
            let mut d = sword_design(&costs);
            d.buy(ObjectProperty::ToHit, 8);
            d.buy(ObjectProperty::Stat(Stat::Str), 2);
            let mut rng = GameRng::new(seed);
            curse_gauntlet(&mut d, &mut rng);
            assert!(d.artifact.curses.contains(CurseFlags::LIGHT_CURSE));
            assert!(d.artifact.curses.bits().count_ones() >= 3, "seed {}", seed);
            assert!(d.artifact.stats[Stat::Str as usize] < 0, "seed {}", seed);
            assert!(d.potential.is_conserved());
        }
    }
}
