//! Buying qualities
//!
//! A quality is any [`ObjectProperty`] an artifact can gain. Its price is
//! the change in the artifact's total design-mode cost, so buying +2 Str on
//! top of +3 costs the difference between +5 and +3.

use fa_rng::RandomSource;

use super::contradictions::{TO_AC_CEILING, TO_DAM_CEILING, TO_HIT_CEILING};
use super::potential::{Potential, PurchaseMode};
use super::Category;
use crate::object::{
    Activation, Artifact, Bonus, BrandKind, Element, Item, ObjectFlags, ObjectProperty as P,
    SlayKind, Stat, MULTIPLE_BASE,
};
use crate::tables::CostTable;

/// Steps of the final spend-what-is-left pass
const WALLET_STEPS: usize = 40;

/// Ordinary abilities the haggle can pick
const MISC_FLAGS: [ObjectFlags; 10] = [
    ObjectFlags::SEE_INVIS,
    ObjectFlags::FREE_ACT,
    ObjectFlags::FEATHER,
    ObjectFlags::REGEN,
    ObjectFlags::SLOW_DIGEST,
    ObjectFlags::HOLD_LIFE,
    ObjectFlags::PROT_FEAR,
    ObjectFlags::PROT_BLIND,
    ObjectFlags::PROT_CONF,
    ObjectFlags::PROT_STUN,
];

const STATS: [Stat; 6] = [Stat::Str, Stat::Int, Stat::Wis, Stat::Dex, Stat::Con, Stat::Chr];

const SLAYS: [SlayKind; 8] = [
    SlayKind::Animal,
    SlayKind::Evil,
    SlayKind::Undead,
    SlayKind::Demon,
    SlayKind::Orc,
    SlayKind::Troll,
    SlayKind::Giant,
    SlayKind::Dragon,
];

const BRANDS: [BrandKind; 5] = [
    BrandKind::Acid,
    BrandKind::Elec,
    BrandKind::Fire,
    BrandKind::Cold,
    BrandKind::Poison,
];

const LOW_ELEMENTS: [Element; 5] = [
    Element::Acid,
    Element::Elec,
    Element::Fire,
    Element::Cold,
    Element::Poison,
];

const HIGH_ELEMENTS: [Element; 9] = [
    Element::Light,
    Element::Dark,
    Element::Confusion,
    Element::Sound,
    Element::Shards,
    Element::Nexus,
    Element::Nether,
    Element::Chaos,
    Element::Disenchant,
];

/// Uniform choice from a non-empty list
pub(crate) fn pick<T: Copy>(options: &[T], rng: &mut dyn RandomSource) -> T {
    let index = rng.randint0(options.len() as i32) as usize;
    options[index.min(options.len() - 1)]
}

/// Total design-mode cost of everything `artifact` has beyond `base`.
/// Curses are not counted; they are paid for through credits.
pub fn design_cost(artifact: &Artifact, base: &Item, costs: &CostTable) -> i32 {
    let mut cost = costs.to_hit.design(artifact.to_h - base.to_h)
        + costs.to_dam.design(artifact.to_d - base.to_d)
        + costs.to_ac.design(artifact.to_a - base.to_a);

    let pvals = artifact
        .stats
        .iter()
        .zip(&costs.stats)
        .chain(artifact.bonuses.iter().zip(&costs.bonuses))
        .chain(artifact.resists.iter().zip(&costs.resists));
    cost += pvals.map(|(&v, c)| c.design(v)).sum::<i32>();

    let multipliers = artifact
        .slays
        .iter()
        .zip(&costs.slays)
        .chain(artifact.brands.iter().zip(&costs.brands));
    cost += multipliers
        .filter(|(m, _)| **m > MULTIPLE_BASE)
        .map(|(&m, c)| c.design((m - MULTIPLE_BASE) as i32))
        .sum::<i32>();

    cost += costs.flag_cost(artifact.flags.difference(base.flags));
    cost += artifact.activation.map(|a| a.power()).unwrap_or(0);
    cost
}

/// Apply a quality to an artifact. Returns false if nothing changed.
fn apply(artifact: &mut Artifact, quality: P, magnitude: i32) -> bool {
    match quality {
        P::ToHit => {
            artifact.to_h += magnitude;
            magnitude != 0
        }
        P::ToDam => {
            artifact.to_d += magnitude;
            magnitude != 0
        }
        P::ToAc => {
            artifact.to_a += magnitude;
            magnitude != 0
        }
        P::Stat(stat) => {
            artifact.stats[stat as usize] += magnitude;
            magnitude != 0
        }
        P::Bonus(bonus) => {
            artifact.bonuses[bonus as usize] += magnitude;
            magnitude != 0
        }
        P::Resist(element) => {
            let slot = &mut artifact.resists[element as usize];
            let next = (*slot + magnitude).clamp(-100, 100);
            let changed = next != *slot;
            *slot = next;
            changed
        }
        P::Slay(slay) => raise(&mut artifact.slays[slay as usize], magnitude),
        P::Brand(brand) => raise(&mut artifact.brands[brand as usize], magnitude),
        P::Flag(flag) => {
            if flag.is_empty() || artifact.flags.contains(flag) {
                return false;
            }
            artifact.flags |= flag;
            true
        }
        P::Curse(_) => false,
    }
}

fn raise(slot: &mut u8, multiplier: i32) -> bool {
    let multiplier = multiplier.clamp(0, u8::MAX as i32) as u8;
    if multiplier <= *slot {
        return false;
    }
    *slot = multiplier;
    true
}

/// An artifact being designed, with its budget
pub(crate) struct Design<'t> {
    pub artifact: Artifact,
    pub base: Item,
    pub category: Category,
    pub potential: Potential,
    pub costs: &'t CostTable,
    /// Curses and weaknesses taken for credit
    pub drawbacks: u32,
}

impl<'t> Design<'t> {
    pub fn new(base: Item, category: Category, potential: i32, costs: &'t CostTable) -> Self {
        Self {
            artifact: Artifact::from_base(&base),
            base,
            category,
            potential: Potential::new(potential),
            costs,
            drawbacks: 0,
        }
    }

    fn purchase(&mut self, next: Artifact, mode: PurchaseMode) -> bool {
        let cost = design_cost(&next, &self.base, self.costs)
            - design_cost(&self.artifact, &self.base, self.costs);
        if !self.potential.try_debit(cost, mode) {
            return false;
        }
        self.artifact = next;
        true
    }

    /// Buy `magnitude` of a quality. Returns false when the quality would
    /// change nothing or the budget refuses it; callers move on.
    pub fn get_quality(&mut self, quality: P, magnitude: i32, mode: PurchaseMode) -> bool {
        let mut next = self.artifact.clone();
        if !apply(&mut next, quality, magnitude) {
            return false;
        }
        self.purchase(next, mode)
    }

    pub fn buy(&mut self, quality: P, magnitude: i32) -> bool {
        self.get_quality(quality, magnitude, PurchaseMode::Strict)
    }

    /// Buy even if the budget runs dry. Themes use this for their
    /// signature quality.
    pub fn buy_on_credit(&mut self, quality: P, magnitude: i32) -> bool {
        self.get_quality(quality, magnitude, PurchaseMode::AllowOverdraft)
    }

    pub fn buy_activation(&mut self, activation: Activation) -> bool {
        if self.artifact.activation.is_some() {
            return false;
        }
        let mut next = self.artifact.clone();
        next.activation = Some(activation);
        self.purchase(next, PurchaseMode::Strict)
    }

    pub fn is_weapon(&self) -> bool {
        self.category.is_weapon()
    }
}

/// A random quality for the haggle, from the menu of the design's category
pub(crate) fn random_quality(category: Category, rng: &mut dyn RandomSource) -> (P, i32) {
    match category {
        Category::Weapon => match rng.randint0(12) {
            0..=2 => (P::ToHit, rng.randint1(4)),
            3..=5 => (P::ToDam, rng.randint1(4)),
            6 => (P::Stat(pick(&STATS, rng)), rng.randint1(2)),
            7 => (P::Slay(pick(&SLAYS, rng)), 20),
            8 => (P::Brand(pick(&BRANDS, rng)), 20),
            9 => (P::Resist(pick(&LOW_ELEMENTS, rng)), 10 * rng.randint1(4)),
            10 => (P::Flag(pick(&MISC_FLAGS, rng)), 0),
            _ => {
                let bonus = pick(&[Bonus::Stealth, Bonus::Searching, Bonus::Infravision, Bonus::Tunnelling], rng);
                (P::Bonus(bonus), rng.randint1(2))
            }
        },
        Category::Launcher => match rng.randint0(10) {
            0..=2 => (P::ToHit, rng.randint1(4)),
            3..=5 => (P::ToDam, rng.randint1(4)),
            6 => (P::Stat(Stat::Dex), rng.randint1(2)),
            7 if rng.one_in(3) => (P::Bonus(pick(&[Bonus::Might, Bonus::Shots], rng)), 1),
            7 => (P::Bonus(Bonus::Stealth), rng.randint1(2)),
            8 => (P::Resist(pick(&LOW_ELEMENTS, rng)), 10 * rng.randint1(4)),
            _ => (P::Flag(pick(&MISC_FLAGS, rng)), 0),
        },
        _ => match rng.randint0(10) {
            0..=2 => (P::ToAc, rng.randint1(4)),
            3 | 4 => (P::Resist(pick(&LOW_ELEMENTS, rng)), 10 * rng.randint1(5)),
            5 => (P::Resist(pick(&HIGH_ELEMENTS, rng)), 10 * rng.randint1(3)),
            6 => (P::Stat(pick(&STATS, rng)), rng.randint1(2)),
            7 => (P::Bonus(armour_bonus(category, rng)), rng.randint1(2)),
            _ => (P::Flag(pick(&MISC_FLAGS, rng)), 0),
        },
    }
}

fn armour_bonus(category: Category, rng: &mut dyn RandomSource) -> Bonus {
    match category {
        Category::Boots if rng.one_in(4) => Bonus::Speed,
        Category::Boots | Category::Cloak => Bonus::Stealth,
        Category::Headgear => pick(&[Bonus::Infravision, Bonus::Searching, Bonus::Light], rng),
        Category::Gloves => pick(&[Bonus::Tunnelling, Bonus::Searching], rng),
        _ => pick(&[Bonus::Stealth, Bonus::Searching, Bonus::Infravision], rng),
    }
}

/// Spend what is left, a point at a time, on combat bonuses
pub(crate) fn clean_wallet(design: &mut Design<'_>) {
    for _ in 0..WALLET_STEPS {
        let bought = if design.is_weapon() {
            let hit = design.artifact.to_h < TO_HIT_CEILING && design.buy(P::ToHit, 1);
            let dam = design.artifact.to_d < TO_DAM_CEILING && design.buy(P::ToDam, 1);
            hit || dam
        } else {
            design.artifact.to_a < TO_AC_CEILING && design.buy(P::ToAc, 1)
        };
        if !bought {
            break;
        }
    }
}

/// Make sure the artifact ended up with something
pub(crate) fn ensure_property(design: &mut Design<'_>) {
    if design.artifact.has_properties(&design.base) {
        return;
    }
    let quality = if design.is_weapon() { P::ToHit } else { P::ToAc };
    design.buy_on_credit(quality, 1);
}
