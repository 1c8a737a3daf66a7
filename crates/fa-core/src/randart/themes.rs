//! Artifact themes
//!
//! Each equipment category has an ordered table of `(weight, handler)`
//! themes. One is rolled per design; its handler spends a first chunk of
//! potential on a coherent bundle of properties, sometimes trading a mild
//! curse or a weakness for extra budget, and may grant an activation.

use fa_rng::RandomSource;

use super::curse::{take_weakness, trade_off_curse};
use super::quality::{pick, Design};
use super::Category;
use crate::object::{
    Activation, Bonus, BrandKind, Element, ObjectFlags, ObjectProperty as P, SlayKind, Stat,
};

/// Heaviest weapon a "thrown" theme applies to
const THROWN_WEIGHT_LIMIT: i32 = 150;

pub(crate) type ThemeFn = fn(&mut Design<'_>, &mut dyn RandomSource);

pub(crate) struct Theme {
    pub name: &'static str,
    pub weight: i32,
    pub apply: ThemeFn,
}

impl Theme {
    fn new(name: &'static str, weight: i32, apply: ThemeFn) -> Self {
        Self {
            name,
            weight,
            apply,
        }
    }
}

/// Roll a theme from a table by weight
pub(crate) fn choose_theme<'a>(table: &'a [Theme], rng: &mut dyn RandomSource) -> Option<&'a Theme> {
    let total: i32 = table.iter().map(|t| t.weight).sum();
    let mut roll = rng.randint0(total);
    for theme in table {
        if roll < theme.weight {
            return Some(theme);
        }
        roll -= theme.weight;
    }
    None
}

/// Grant an activation with a chance proportional to what is left to spend
pub(crate) fn grant_activation(
    design: &mut Design<'_>,
    choices: &[Activation],
    rng: &mut dyn RandomSource,
) -> bool {
    if choices.is_empty() || design.artifact.activation.is_some() {
        return false;
    }
    let budget = design.potential.initial() + design.potential.credited();
    if rng.randint0(budget.max(1)) >= design.potential.remaining() {
        return false;
    }
    let activation = pick(choices, rng);
    design.buy_activation(activation)
}

/// Brand, matching resistance, maybe immunity, maybe a weakness to the
/// opposing element, maybe a curse for extra budget
fn elemental_weapon(
    d: &mut Design<'_>,
    rng: &mut dyn RandomSource,
    brand: BrandKind,
    opposite: Element,
    activations: &[Activation],
) {
    let element = brand.element();
    let multiplier = if rng.one_in(4) { 25 } else { 20 };
    d.buy_on_credit(P::Brand(brand), multiplier);
    d.buy(P::Resist(element), 30 + 10 * rng.randint0(3));
    if rng.one_in(5) {
        d.buy(P::Resist(element), 100);
    }
    if let Some(ignore) = element.ignore_flag() {
        d.buy(P::Flag(ignore), 0);
    }
    if rng.one_in(4) {
        take_weakness(d, opposite, 25);
    }
    if rng.one_in(6) {
        trade_off_curse(d, rng);
    }
    grant_activation(d, activations, rng);
}

/// A slay with a handful of fitting extras, each bought on a coin flip
fn bane(d: &mut Design<'_>, rng: &mut dyn RandomSource, slay: SlayKind, extras: &[(P, i32)]) {
    let multiplier = if rng.one_in(3) { 30 } else { 20 };
    d.buy_on_credit(P::Slay(slay), multiplier);
    for &(quality, magnitude) in extras {
        if rng.one_in(2) {
            d.buy(quality, magnitude);
        }
    }
}

/// Resistances led by a guaranteed first element
fn ward(d: &mut Design<'_>, rng: &mut dyn RandomSource, elements: &[Element], strength: i32) {
    for (i, &element) in elements.iter().enumerate() {
        let amount = strength + 10 * rng.randint0(3);
        if i == 0 {
            d.buy_on_credit(P::Resist(element), amount);
        } else if !rng.one_in(3) {
            d.buy(P::Resist(element), amount);
        }
        if let Some(ignore) = element.ignore_flag() {
            d.buy(P::Flag(ignore), 0);
        }
    }
}

/// A stat theme: the stat, a sustain for it, and some extras
fn stat_focus(d: &mut Design<'_>, rng: &mut dyn RandomSource, stat: Stat, extras: &[(P, i32)]) {
    d.buy_on_credit(P::Stat(stat), 1 + rng.randint1(3));
    if rng.one_in(2) {
        d.buy(P::Flag(stat.sustain()), 0);
    }
    for &(quality, magnitude) in extras {
        if rng.one_in(2) {
            d.buy(quality, magnitude);
        }
    }
}

fn weapon_themes() -> Vec<Theme> {
    vec![
        Theme::new("of fire", 8, |d, rng| {
            elemental_weapon(d, rng, BrandKind::Fire, Element::Cold, &[Activation::FireBolt, Activation::FireBall])
        }),
        Theme::new("of frost", 8, |d, rng| {
            elemental_weapon(d, rng, BrandKind::Cold, Element::Fire, &[Activation::FrostBolt, Activation::FrostBall])
        }),
        Theme::new("of lightning", 6, |d, rng| {
            elemental_weapon(d, rng, BrandKind::Elec, Element::Acid, &[Activation::LightningBolt])
        }),
        Theme::new("of corrosion", 6, |d, rng| {
            elemental_weapon(d, rng, BrandKind::Acid, Element::Elec, &[Activation::AcidBolt])
        }),
        Theme::new("of venom", 5, |d, rng| {
            elemental_weapon(d, rng, BrandKind::Poison, Element::Light, &[Activation::StinkingCloud])
        }),
        Theme::new("bane of the dead", 6, |d, rng| {
            bane(d, rng, SlayKind::Undead, &[
                (P::Flag(ObjectFlags::HOLD_LIFE), 0),
                (P::Flag(ObjectFlags::SEE_INVIS), 0),
                (P::Resist(Element::Nether), 30),
                (P::Stat(Stat::Wis), 2),
            ]);
            grant_activation(d, &[Activation::DispelUndead], rng);
        }),
        Theme::new("bane of demons", 5, |d, rng| {
            bane(d, rng, SlayKind::Demon, &[
                (P::Resist(Element::Fire), 40),
                (P::Flag(ObjectFlags::SEE_INVIS), 0),
                (P::Stat(Stat::Int), 2),
            ]);
        }),
        Theme::new("holy avenger", 4, |d, rng| {
            bane(d, rng, SlayKind::Evil, &[
                (P::Flag(ObjectFlags::BLESSED), 0),
                (P::Flag(ObjectFlags::SEE_INVIS), 0),
                (P::Stat(Stat::Wis), 2),
                (P::Resist(Element::Dark), 30),
                (P::Slay(SlayKind::Undead), 20),
            ]);
            d.buy(P::Flag(ObjectFlags::BLESSED), 0);
            grant_activation(d, &[Activation::DispelEvil, Activation::Protection], rng);
        }),
        Theme::new("dragon slayer", 4, |d, rng| {
            bane(d, rng, SlayKind::Dragon, &[
                (P::Stat(Stat::Con), 2),
                (P::Resist(Element::Fire), 30),
                (P::Resist(Element::Cold), 30),
                (P::Flag(ObjectFlags::PROT_FEAR), 0),
            ]);
        }),
        Theme::new("bane of orcs and trolls", 7, |d, rng| {
            bane(d, rng, SlayKind::Orc, &[(P::Slay(SlayKind::Troll), 20), (P::Resist(Element::Dark), 20)]);
            d.buy(P::Slay(SlayKind::Troll), 20);
        }),
        Theme::new("giant slayer", 5, |d, rng| {
            bane(d, rng, SlayKind::Giant, &[(P::Stat(Stat::Str), 2), (P::Bonus(Bonus::Tunnelling), 2)]);
        }),
        Theme::new("of the hunt", 6, |d, rng| {
            bane(d, rng, SlayKind::Animal, &[
                (P::Bonus(Bonus::Stealth), 2),
                (P::Bonus(Bonus::Infravision), 2),
                (P::Flag(ObjectFlags::SLOW_DIGEST), 0),
            ]);
        }),
        Theme::new("warrior's", 8, |d, rng| {
            d.buy_on_credit(P::ToHit, 4 + rng.randint1(6));
            d.buy(P::ToDam, 4 + rng.randint1(6));
            let stat = pick(&[Stat::Str, Stat::Con, Stat::Dex], rng);
            stat_focus(d, rng, stat, &[
                (P::Flag(ObjectFlags::PROT_FEAR), 0),
                (P::Flag(ObjectFlags::REGEN), 0),
            ]);
            grant_activation(d, &[Activation::Berserk, Activation::CureWounds], rng);
        }),
        Theme::new("of impact", 3, |d, rng| {
            d.buy_on_credit(P::Flag(ObjectFlags::IMPACT), 0);
            d.buy(P::ToDam, 5 + rng.randint1(5));
            if rng.one_in(2) {
                d.buy(P::Bonus(Bonus::Tunnelling), 3);
            }
        }),
        Theme::new("of chaos", 2, |d, rng| {
            d.buy_on_credit(P::Flag(ObjectFlags::CHAOTIC), 0);
            d.buy(P::Resist(Element::Chaos), 40);
            d.buy(P::Resist(Element::Confusion), 30);
            if rng.one_in(3) {
                trade_off_curse(d, rng);
            }
        }),
        Theme::new("of westernesse", 5, |d, rng| {
            for stat in [Stat::Str, Stat::Dex, Stat::Con] {
                d.buy(P::Stat(stat), rng.randint1(2));
            }
            d.buy(P::Flag(ObjectFlags::FREE_ACT), 0);
            d.buy(P::Flag(ObjectFlags::SEE_INVIS), 0);
            bane(d, rng, SlayKind::Orc, &[(P::Slay(SlayKind::Troll), 20), (P::Slay(SlayKind::Giant), 20)]);
        }),
        Theme::new("thrown", 3, |d, rng| {
            if d.artifact.weight > THROWN_WEIGHT_LIMIT {
                d.buy_on_credit(P::ToHit, 6 + rng.randint1(4));
                return;
            }
            d.buy_on_credit(P::Flag(ObjectFlags::THROWING), 0);
            d.buy(P::ToHit, 5 + rng.randint1(5));
            d.buy(P::Stat(Stat::Dex), 1 + rng.randint0(2));
        }),
    ]
}

fn launcher_themes() -> Vec<Theme> {
    vec![
        Theme::new("of extra might", 6, |d, rng| {
            d.buy_on_credit(P::Bonus(Bonus::Might), 1);
            d.buy(P::ToDam, 3 + rng.randint1(5));
            d.buy(P::Stat(Stat::Str), rng.randint1(2));
        }),
        Theme::new("of extra shots", 4, |d, rng| {
            d.buy_on_credit(P::Bonus(Bonus::Shots), 1);
            d.buy(P::ToHit, 3 + rng.randint1(5));
            d.buy(P::Stat(Stat::Dex), rng.randint1(2));
        }),
        Theme::new("of accuracy", 8, |d, rng| {
            d.buy_on_credit(P::ToHit, 8 + rng.randint1(7));
            d.buy(P::Flag(ObjectFlags::SEE_INVIS), 0);
        }),
        Theme::new("of power", 8, |d, rng| {
            d.buy_on_credit(P::ToDam, 8 + rng.randint1(7));
            grant_activation(d, &[Activation::FireBolt, Activation::FrostBolt], rng);
        }),
        Theme::new("of the hunter", 5, |d, rng| {
            d.buy_on_credit(P::Slay(SlayKind::Animal), 20);
            d.buy(P::Bonus(Bonus::Stealth), rng.randint1(3));
            d.buy(P::Bonus(Bonus::Infravision), rng.randint1(3));
        }),
        Theme::new("of lothlorien", 4, |d, rng| {
            stat_focus(d, rng, Stat::Dex, &[
                (P::Flag(ObjectFlags::FREE_ACT), 0),
                (P::Bonus(Bonus::Stealth), 2),
                (P::Resist(Element::Light), 30),
            ]);
            grant_activation(d, &[Activation::Light, Activation::MapArea], rng);
        }),
        Theme::new("of the marksman", 6, |d, rng| {
            d.buy_on_credit(P::ToHit, 5 + rng.randint1(5));
            d.buy(P::ToDam, 2 + rng.randint1(3));
            if rng.one_in(3) {
                d.buy(P::Bonus(Bonus::Shots), 1);
            }
        }),
        Theme::new("of flame", 4, |d, rng| {
            ward(d, rng, &[Element::Fire], 40);
            d.buy(P::ToDam, 2 + rng.randint1(3));
            grant_activation(d, &[Activation::FireBolt, Activation::FireBall], rng);
        }),
        Theme::new("of the north wind", 4, |d, rng| {
            ward(d, rng, &[Element::Cold], 40);
            d.buy(P::ToHit, 2 + rng.randint1(3));
            grant_activation(d, &[Activation::FrostBolt, Activation::FrostBall], rng);
        }),
        Theme::new("of dragon hunting", 3, |d, rng| {
            bane(d, rng, SlayKind::Dragon, &[
                (P::Resist(Element::Fire), 30),
                (P::Resist(Element::Cold), 30),
                (P::Flag(ObjectFlags::PROT_FEAR), 0),
            ]);
        }),
        Theme::new("of the watch", 4, |d, rng| {
            d.buy_on_credit(P::Bonus(Bonus::Searching), 1 + rng.randint1(3));
            d.buy(P::Flag(ObjectFlags::SEE_INVIS), 0);
            grant_activation(d, &[Activation::Detection], rng);
        }),
        Theme::new("of holy wrath", 3, |d, rng| {
            bane(d, rng, SlayKind::Evil, &[
                (P::Flag(ObjectFlags::BLESSED), 0),
                (P::Stat(Stat::Wis), 1),
                (P::Slay(SlayKind::Undead), 20),
            ]);
        }),
        Theme::new("of the wilds", 5, |d, rng| {
            d.buy_on_credit(P::Bonus(Bonus::Stealth), rng.randint1(3));
            d.buy(P::Flag(ObjectFlags::SLOW_DIGEST), 0);
            grant_activation(d, &[Activation::Recall, Activation::CureWounds], rng);
        }),
        Theme::new("of the giants", 3, |d, rng| {
            d.buy_on_credit(P::Bonus(Bonus::Might), 1);
            stat_focus(d, rng, Stat::Str, &[(P::Stat(Stat::Con), 1)]);
        }),
        Theme::new("of the border guard", 5, |d, rng| {
            bane(d, rng, SlayKind::Orc, &[
                (P::Slay(SlayKind::Troll), 20),
                (P::Bonus(Bonus::Infravision), 2),
            ]);
        }),
        Theme::new("of swiftness", 1, |d, rng| {
            d.buy_on_credit(P::Bonus(Bonus::Speed), rng.randint1(2));
            grant_activation(d, &[Activation::Haste], rng);
        }),
    ]
}

fn shield_themes() -> Vec<Theme> {
    vec![
        Theme::new("of the elements", 8, |d, rng| {
            ward(d, rng, &Element::BASE, 30);
        }),
        Theme::new("of fire and frost", 5, |d, rng| {
            ward(d, rng, &[Element::Fire, Element::Cold], 50);
            grant_activation(d, &[Activation::Resistance], rng);
        }),
        Theme::new("of protection", 6, |d, rng| {
            d.buy_on_credit(P::ToAc, 8 + rng.randint1(8));
            d.buy(P::Flag(ObjectFlags::PROT_STUN), 0);
            d.buy(P::Resist(Element::Shards), 30);
            grant_activation(d, &[Activation::Protection], rng);
        }),
        Theme::new("dwarven", 5, |d, rng| {
            stat_focus(d, rng, Stat::Con, &[
                (P::Stat(Stat::Str), 2),
                (P::Bonus(Bonus::Infravision), 2),
                (P::Resist(Element::Dark), 30),
            ]);
        }),
        Theme::new("of the mirror", 3, |d, rng| {
            ward(d, rng, &[Element::Light, Element::Dark], 30);
            d.buy(P::Flag(ObjectFlags::PROT_BLIND), 0);
        }),
        Theme::new("of the sentinel", 5, |d, rng| {
            d.buy_on_credit(P::ToAc, 5 + rng.randint1(5));
            d.buy(P::Flag(ObjectFlags::PROT_FEAR), 0);
            d.buy(P::Bonus(Bonus::Searching), rng.randint1(3));
        }),
        Theme::new("of acid and lightning", 5, |d, rng| {
            ward(d, rng, &[Element::Acid, Element::Elec], 50);
        }),
        Theme::new("of the dragon", 3, |d, rng| {
            ward(d, rng, &[Element::Fire, Element::Poison], 40);
            d.buy(P::Stat(Stat::Con), rng.randint1(2));
            grant_activation(d, &[Activation::FireBall], rng);
        }),
        Theme::new("of the tower", 4, |d, rng| {
            d.buy_on_credit(P::ToAc, 10 + rng.randint1(10));
            d.buy(P::Resist(Element::Sound), 30);
            d.buy(P::Flag(ObjectFlags::PROT_STUN), 0);
        }),
        Theme::new("of the templar", 3, |d, rng| {
            stat_focus(d, rng, Stat::Wis, &[
                (P::Flag(ObjectFlags::BLESSED), 0),
                (P::Resist(Element::Nether), 30),
            ]);
            grant_activation(d, &[Activation::DispelEvil, Activation::CureWounds], rng);
        }),
        Theme::new("of the barrow", 3, |d, rng| {
            ward(d, rng, &[Element::Nether, Element::Poison], 30);
            d.buy(P::Flag(ObjectFlags::HOLD_LIFE), 0);
        }),
        Theme::new("of shards", 3, |d, rng| {
            ward(d, rng, &[Element::Shards, Element::Sound], 40);
        }),
        Theme::new("of the vanguard", 4, |d, rng| {
            stat_focus(d, rng, Stat::Str, &[
                (P::Flag(ObjectFlags::PROT_FEAR), 0),
                (P::ToAc, 5),
            ]);
        }),
        Theme::new("of discord", 2, |d, rng| {
            ward(d, rng, &[Element::Chaos, Element::Disenchant], 30);
            if rng.one_in(3) {
                trade_off_curse(d, rng);
            }
        }),
        Theme::new("of silence", 3, |d, rng| {
            d.buy_on_credit(P::Bonus(Bonus::Stealth), 1 + rng.randint1(2));
            d.buy(P::Resist(Element::Dark), 20);
        }),
    ]
}

fn body_armour_themes() -> Vec<Theme> {
    vec![
        Theme::new("of resistance", 10, |d, rng| {
            ward(d, rng, &Element::BASE, 40);
        }),
        Theme::new("of elvenkind", 5, |d, rng| {
            d.buy_on_credit(P::Bonus(Bonus::Stealth), 1 + rng.randint1(3));
            ward(d, rng, &Element::BASE, 30);
        }),
        Theme::new("of permanence", 3, |d, rng| {
            d.buy_on_credit(P::Flag(ObjectFlags::HOLD_LIFE), 0);
            for stat in [Stat::Str, Stat::Int, Stat::Wis, Stat::Dex, Stat::Con] {
                if rng.one_in(2) {
                    d.buy(P::Flag(stat.sustain()), 0);
                }
            }
            ward(d, rng, &[Element::Nether, Element::Poison], 30);
        }),
        Theme::new("of the night", 4, |d, rng| {
            ward(d, rng, &[Element::Dark, Element::Nether], 40);
            d.buy(P::Bonus(Bonus::Stealth), rng.randint1(3));
            d.buy(P::Bonus(Bonus::Infravision), rng.randint1(3));
        }),
        Theme::new("of the deep", 4, |d, rng| {
            ward(d, rng, &[Element::Poison, Element::Nexus, Element::Sound], 30);
        }),
        Theme::new("of fortitude", 6, |d, rng| {
            d.buy_on_credit(P::ToAc, 10 + rng.randint1(10));
            stat_focus(d, rng, Stat::Con, &[(P::Flag(ObjectFlags::REGEN), 0)]);
            grant_activation(d, &[Activation::CureWounds, Activation::Heal], rng);
        }),
        Theme::new("of dragonscale", 4, |d, rng| {
            ward(d, rng, &[Element::Fire, Element::Poison], 40);
            d.buy(P::ToAc, 5 + rng.randint1(5));
            grant_activation(d, &[Activation::FireBall, Activation::StinkingCloud], rng);
        }),
        Theme::new("of the magi", 3, |d, rng| {
            stat_focus(d, rng, Stat::Int, &[
                (P::Bonus(Bonus::MagicMastery), 3),
                (P::Flag(ObjectFlags::SEE_INVIS), 0),
            ]);
            grant_activation(d, &[Activation::Detection], rng);
        }),
        Theme::new("of the warrior", 5, |d, rng| {
            stat_focus(d, rng, Stat::Str, &[
                (P::ToHit, 5),
                (P::Flag(ObjectFlags::PROT_FEAR), 0),
            ]);
            grant_activation(d, &[Activation::Berserk], rng);
        }),
        Theme::new("of regeneration", 4, |d, rng| {
            d.buy_on_credit(P::Flag(ObjectFlags::REGEN), 0);
            d.buy(P::Stat(Stat::Con), rng.randint1(2));
            grant_activation(d, &[Activation::CureWounds], rng);
        }),
        Theme::new("of holiness", 3, |d, rng| {
            stat_focus(d, rng, Stat::Wis, &[
                (P::Flag(ObjectFlags::BLESSED), 0),
                (P::Resist(Element::Nether), 30),
                (P::Resist(Element::Dark), 30),
            ]);
            grant_activation(d, &[Activation::DispelEvil, Activation::Protection], rng);
        }),
        Theme::new("of the abyss", 2, |d, rng| {
            ward(d, rng, &[Element::Chaos, Element::Disenchant, Element::Nexus], 30);
            if rng.one_in(4) {
                trade_off_curse(d, rng);
            }
        }),
        Theme::new("of the storm", 4, |d, rng| {
            ward(d, rng, &[Element::Elec, Element::Sound], 40);
            grant_activation(d, &[Activation::LightningBolt], rng);
        }),
        Theme::new("of the mountain", 4, |d, rng| {
            d.buy_on_credit(P::ToAc, 8 + rng.randint1(8));
            d.buy(P::Resist(Element::Shards), 30);
            d.buy(P::Flag(ObjectFlags::PROT_STUN), 0);
        }),
        Theme::new("of shadows", 3, |d, rng| {
            d.buy_on_credit(P::Bonus(Bonus::Stealth), 1 + rng.randint1(3));
            d.buy(P::Resist(Element::Dark), 40);
            d.buy(P::Flag(ObjectFlags::FEATHER), 0);
        }),
    ]
}

fn cloak_themes() -> Vec<Theme> {
    vec![
        Theme::new("of stealth", 8, |d, rng| {
            d.buy_on_credit(P::Bonus(Bonus::Stealth), 1 + rng.randint1(3));
            d.buy(P::Flag(ObjectFlags::FEATHER), 0);
        }),
        Theme::new("of the magi", 4, |d, rng| {
            stat_focus(d, rng, Stat::Int, &[
                (P::Bonus(Bonus::MagicMastery), 3),
                (P::Flag(ObjectFlags::SEE_INVIS), 0),
            ]);
            grant_activation(d, &[Activation::Detection, Activation::Recall], rng);
        }),
        Theme::new("of aman", 3, |d, rng| {
            d.buy_on_credit(P::Bonus(Bonus::Stealth), rng.randint1(3));
            ward(d, rng, &[Element::Nether, Element::Dark, Element::Chaos], 30);
        }),
        Theme::new("of warding", 6, |d, rng| {
            d.buy_on_credit(P::ToAc, 6 + rng.randint1(6));
            let element = pick(&Element::BASE, rng);
            ward(d, rng, &[element], 40);
        }),
        Theme::new("of the bat", 2, |d, rng| {
            d.buy_on_credit(P::Flag(ObjectFlags::FEATHER), 0);
            d.buy(P::Bonus(Bonus::Infravision), 2 + rng.randint1(3));
            d.buy(P::Resist(Element::Dark), 40);
        }),
        Theme::new("of protection", 6, |d, rng| {
            d.buy_on_credit(P::ToAc, 5 + rng.randint1(5));
            d.buy(P::Flag(ObjectFlags::PROT_STUN), 0);
            d.buy(P::Flag(ObjectFlags::PROT_BLIND), 0);
        }),
        Theme::new("of the wanderer", 5, |d, rng| {
            d.buy_on_credit(P::Flag(ObjectFlags::SLOW_DIGEST), 0);
            d.buy(P::Flag(ObjectFlags::FEATHER), 0);
            grant_activation(d, &[Activation::Recall], rng);
        }),
        Theme::new("of the wind", 4, |d, rng| {
            d.buy_on_credit(P::Flag(ObjectFlags::FEATHER), 0);
            d.buy(P::Resist(Element::Elec), 30);
            d.buy(P::Stat(Stat::Dex), rng.randint1(2));
        }),
        Theme::new("of the forest", 5, |d, rng| {
            d.buy_on_credit(P::Bonus(Bonus::Stealth), rng.randint1(2));
            d.buy(P::Resist(Element::Poison), 30);
            d.buy(P::Bonus(Bonus::Infravision), rng.randint1(2));
        }),
        Theme::new("of embers", 4, |d, rng| {
            ward(d, rng, &[Element::Fire], 50);
        }),
        Theme::new("of winter", 4, |d, rng| {
            ward(d, rng, &[Element::Cold], 50);
        }),
        Theme::new("of the grave", 2, |d, rng| {
            ward(d, rng, &[Element::Nether], 40);
            d.buy(P::Flag(ObjectFlags::HOLD_LIFE), 0);
        }),
        Theme::new("of the elements", 3, |d, rng| {
            ward(d, rng, &Element::BASE, 20);
        }),
        Theme::new("of the dusk", 3, |d, rng| {
            ward(d, rng, &[Element::Dark, Element::Light], 30);
            d.buy(P::Bonus(Bonus::Stealth), 1);
        }),
        Theme::new("of nobility", 3, |d, rng| {
            stat_focus(d, rng, Stat::Chr, &[
                (P::Flag(ObjectFlags::PROT_FEAR), 0),
                (P::Stat(Stat::Wis), 1),
            ]);
        }),
    ]
}

fn headgear_themes() -> Vec<Theme> {
    vec![
        Theme::new("of telepathy", 3, |d, rng| {
            d.buy_on_credit(P::Flag(ObjectFlags::TELEPATHY), 0);
            if rng.one_in(3) {
                trade_off_curse(d, rng);
            }
        }),
        Theme::new("of seeing", 6, |d, rng| {
            d.buy_on_credit(P::Flag(ObjectFlags::SEE_INVIS), 0);
            d.buy(P::Flag(ObjectFlags::PROT_BLIND), 0);
            d.buy(P::Bonus(Bonus::Searching), 1 + rng.randint1(3));
            grant_activation(d, &[Activation::Detection, Activation::MapArea], rng);
        }),
        Theme::new("of intelligence", 5, |d, rng| {
            stat_focus(d, rng, Stat::Int, &[(P::Resist(Element::Confusion), 30)]);
        }),
        Theme::new("of wisdom", 5, |d, rng| {
            stat_focus(d, rng, Stat::Wis, &[(P::Flag(ObjectFlags::PROT_CONF), 0)]);
        }),
        Theme::new("of light", 5, |d, rng| {
            d.buy_on_credit(P::Bonus(Bonus::Light), 1);
            ward(d, rng, &[Element::Light], 40);
            grant_activation(d, &[Activation::Light], rng);
        }),
        Theme::new("of serenity", 4, |d, rng| {
            d.buy_on_credit(P::Flag(ObjectFlags::PROT_CONF), 0);
            ward(d, rng, &[Element::Sound, Element::Confusion], 30);
            d.buy(P::Flag(ObjectFlags::PROT_STUN), 0);
        }),
        Theme::new("of majesty", 3, |d, rng| {
            stat_focus(d, rng, Stat::Chr, &[
                (P::Flag(ObjectFlags::PROT_FEAR), 0),
                (P::Stat(Stat::Wis), 1),
            ]);
        }),
        Theme::new("of might", 4, |d, rng| {
            stat_focus(d, rng, Stat::Str, &[(P::ToHit, 4), (P::ToDam, 3)]);
        }),
        Theme::new("of insight", 4, |d, rng| {
            d.buy_on_credit(P::Bonus(Bonus::Searching), 2 + rng.randint1(3));
            grant_activation(d, &[Activation::Detection], rng);
        }),
        Theme::new("of the owl", 4, |d, rng| {
            d.buy_on_credit(P::Bonus(Bonus::Infravision), 2 + rng.randint1(3));
            ward(d, rng, &[Element::Dark], 30);
        }),
        Theme::new("of resolve", 4, |d, rng| {
            d.buy_on_credit(P::Flag(ObjectFlags::PROT_FEAR), 0);
            ward(d, rng, &[Element::Nether], 30);
            d.buy(P::Flag(ObjectFlags::HOLD_LIFE), 0);
        }),
        Theme::new("of the elements", 4, |d, rng| {
            ward(d, rng, &Element::BASE, 30);
        }),
        Theme::new("of the miner", 3, |d, rng| {
            d.buy_on_credit(P::Bonus(Bonus::Tunnelling), 1 + rng.randint1(3));
            d.buy(P::Bonus(Bonus::Infravision), rng.randint1(2));
            grant_activation(d, &[Activation::MapArea], rng);
        }),
        Theme::new("of the stars", 3, |d, rng| {
            ward(d, rng, &[Element::Light, Element::Dark], 30);
            d.buy(P::Bonus(Bonus::Light), 1);
        }),
        Theme::new("of vigour", 3, |d, rng| {
            d.buy_on_credit(P::Flag(ObjectFlags::REGEN), 0);
            d.buy(P::Flag(ObjectFlags::SLOW_DIGEST), 0);
            d.buy(P::Stat(Stat::Con), rng.randint1(2));
        }),
    ]
}

fn glove_themes() -> Vec<Theme> {
    vec![
        Theme::new("of free action", 8, |d, rng| {
            d.buy_on_credit(P::Flag(ObjectFlags::FREE_ACT), 0);
            d.buy(P::ToAc, rng.randint1(5));
        }),
        Theme::new("of slaying", 6, |d, rng| {
            d.buy_on_credit(P::ToHit, 3 + rng.randint1(5));
            d.buy(P::ToDam, 3 + rng.randint1(5));
        }),
        Theme::new("of power", 4, |d, rng| {
            stat_focus(d, rng, Stat::Str, &[(P::ToDam, 5)]);
        }),
        Theme::new("of agility", 5, |d, rng| {
            stat_focus(d, rng, Stat::Dex, &[(P::Flag(ObjectFlags::FREE_ACT), 0)]);
        }),
        Theme::new("of the thief", 3, |d, rng| {
            d.buy_on_credit(P::Stat(Stat::Dex), 1 + rng.randint1(2));
            d.buy(P::Bonus(Bonus::Searching), 2 + rng.randint1(2));
            d.buy(P::Bonus(Bonus::Stealth), rng.randint1(2));
            grant_activation(d, &[Activation::Teleport], rng);
        }),
        Theme::new("of the archer", 4, |d, rng| {
            d.buy_on_credit(P::ToHit, 5 + rng.randint1(5));
            d.buy(P::Stat(Stat::Dex), rng.randint1(2));
        }),
        Theme::new("of the magi", 3, |d, rng| {
            stat_focus(d, rng, Stat::Int, &[
                (P::Bonus(Bonus::MagicMastery), 3),
                (P::Flag(ObjectFlags::FREE_ACT), 0),
            ]);
        }),
        Theme::new("of the healer", 3, |d, rng| {
            stat_focus(d, rng, Stat::Wis, &[(P::Flag(ObjectFlags::REGEN), 0)]);
            grant_activation(d, &[Activation::CureWounds, Activation::Heal], rng);
        }),
        Theme::new("of flame", 3, |d, rng| {
            ward(d, rng, &[Element::Fire], 40);
            grant_activation(d, &[Activation::FireBolt], rng);
        }),
        Theme::new("of frost", 3, |d, rng| {
            ward(d, rng, &[Element::Cold], 40);
            grant_activation(d, &[Activation::FrostBolt], rng);
        }),
        Theme::new("of lightning", 3, |d, rng| {
            ward(d, rng, &[Element::Elec], 40);
            grant_activation(d, &[Activation::LightningBolt], rng);
        }),
        Theme::new("of acid", 3, |d, rng| {
            ward(d, rng, &[Element::Acid], 40);
            grant_activation(d, &[Activation::AcidBolt], rng);
        }),
        Theme::new("of the brawler", 4, |d, rng| {
            stat_focus(d, rng, Stat::Con, &[(P::Flag(ObjectFlags::PROT_FEAR), 0), (P::ToHit, 3)]);
        }),
        Theme::new("of protection", 4, |d, rng| {
            d.buy_on_credit(P::ToAc, 5 + rng.randint1(5));
            d.buy(P::Flag(ObjectFlags::PROT_STUN), 0);
        }),
        Theme::new("of the crypt", 2, |d, rng| {
            ward(d, rng, &[Element::Nether], 30);
            d.buy(P::Flag(ObjectFlags::HOLD_LIFE), 0);
        }),
    ]
}

fn boot_themes() -> Vec<Theme> {
    vec![
        Theme::new("of speed", 2, |d, rng| {
            d.buy_on_credit(P::Bonus(Bonus::Speed), 2 + rng.randint1(5));
            grant_activation(d, &[Activation::Haste], rng);
        }),
        Theme::new("of stealth", 8, |d, rng| {
            d.buy_on_credit(P::Bonus(Bonus::Stealth), 1 + rng.randint1(3));
        }),
        Theme::new("of free action", 6, |d, rng| {
            d.buy_on_credit(P::Flag(ObjectFlags::FREE_ACT), 0);
            d.buy(P::ToAc, rng.randint1(5));
        }),
        Theme::new("of levitation", 5, |d, rng| {
            d.buy_on_credit(P::Flag(ObjectFlags::FEATHER), 0);
            d.buy(P::Stat(Stat::Dex), rng.randint1(2));
            grant_activation(d, &[Activation::Teleport], rng);
        }),
        Theme::new("of the traveller", 4, |d, rng| {
            d.buy_on_credit(P::Flag(ObjectFlags::SLOW_DIGEST), 0);
            d.buy(P::Stat(Stat::Con), rng.randint1(2));
            d.buy(P::Flag(ObjectFlags::REGEN), 0);
            grant_activation(d, &[Activation::Recall], rng);
        }),
        Theme::new("of the mountain", 4, |d, rng| {
            d.buy_on_credit(P::ToAc, 5 + rng.randint1(5));
            d.buy(P::Resist(Element::Shards), 30);
            d.buy(P::Flag(ObjectFlags::PROT_STUN), 0);
        }),
        Theme::new("of fire walking", 3, |d, rng| {
            ward(d, rng, &[Element::Fire], 50);
        }),
        Theme::new("of ice walking", 3, |d, rng| {
            ward(d, rng, &[Element::Cold], 50);
        }),
        Theme::new("of endurance", 4, |d, rng| {
            stat_focus(d, rng, Stat::Con, &[(P::Flag(ObjectFlags::SLOW_DIGEST), 0)]);
        }),
        Theme::new("of the tracker", 4, |d, rng| {
            d.buy_on_credit(P::Bonus(Bonus::Searching), 1 + rng.randint1(3));
            d.buy(P::Bonus(Bonus::Infravision), rng.randint1(2));
        }),
        Theme::new("of dwarvenkind", 3, |d, rng| {
            d.buy_on_credit(P::Bonus(Bonus::Tunnelling), 1 + rng.randint1(2));
            d.buy(P::Stat(Stat::Con), rng.randint1(2));
        }),
        Theme::new("of the elements", 3, |d, rng| {
            ward(d, rng, &Element::BASE, 20);
        }),
        Theme::new("of nimbleness", 4, |d, rng| {
            stat_focus(d, rng, Stat::Dex, &[(P::Flag(ObjectFlags::FEATHER), 0)]);
        }),
        Theme::new("of the stalwart", 3, |d, rng| {
            d.buy_on_credit(P::Flag(ObjectFlags::PROT_FEAR), 0);
            d.buy(P::ToAc, 3 + rng.randint1(4));
        }),
        Theme::new("of the shadows", 3, |d, rng| {
            ward(d, rng, &[Element::Dark], 30);
            d.buy(P::Bonus(Bonus::Stealth), rng.randint1(2));
        }),
    ]
}

/// The theme table for a category
pub(crate) fn themes_for(category: Category) -> Vec<Theme> {
    match category {
        Category::Weapon => weapon_themes(),
        Category::Launcher => launcher_themes(),
        Category::Shield => shield_themes(),
        Category::BodyArmour => body_armour_themes(),
        Category::Cloak => cloak_themes(),
        Category::Headgear => headgear_themes(),
        Category::Gloves => glove_themes(),
        Category::Boots => boot_themes(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{kind_by_name, Item, MULTIPLE_BASE};
    use crate::randart::PurchaseMode;
    use crate::tables::CostTable;
    use fa_rng::{GameRng, ScriptedRng};
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    fn design<'t>(name: &str, category: Category, costs: &'t CostTable) -> Design<'t> {
        let base = Item::new(kind_by_name(name).unwrap()).unwrap();
        Design::new(base, category, 5000, costs)
    }

    #[test]
    fn test_every_category_has_a_full_menu() {
        for category in Category::iter() {
            let table = themes_for(category);
            assert!(table.len() >= 15, "{} has {}", category, table.len());
            assert!(table.iter().all(|t| t.weight > 0));
            let names: HashSet<&str> = table.iter().map(|t| t.name).collect();
            assert_eq!(names.len(), table.len(), "{}", category);
        }
    }

    #[test]
    fn test_choose_theme_by_weight() {
        let table = weapon_themes();
        // 8 + 8 + 6 = 22: roll 21 is the last point of "of lightning"
        let mut rng = ScriptedRng::new([21]);
        assert_eq!(choose_theme(&table, &mut rng).unwrap().name, "of lightning");
        let mut rng = ScriptedRng::new([0]);
        assert_eq!(choose_theme(&table, &mut rng).unwrap().name, "of fire");
    }

    #[test]
    fn test_fire_theme_brands_and_resists() {
        let costs = CostTable::default();
        let table = weapon_themes();
        let mut rng = GameRng::new(2);
        let mut d = design("Long Sword", Category::Weapon, &costs);
        (table[0].apply)(&mut d, &mut rng);
        assert!(d.artifact.brands[BrandKind::Fire as usize] > MULTIPLE_BASE);
        assert!(d.artifact.resists[Element::Fire as usize] >= 30);
        assert!(d.potential.is_conserved());
    }

    #[test]
    fn test_cold_weakness_pays_back() {
        let costs = CostTable::default();
        let table = weapon_themes();
        let mut weakened = 0;
        for seed in 0..200 {
            let mut rng = GameRng::new(seed);
            let mut d = design("Long Sword", Category::Weapon, &costs);
            (table[0].apply)(&mut d, &mut rng);
            if d.artifact.resists[Element::Cold as usize] < 0 {
                weakened += 1;
                assert!(d.potential.credited() > 0, "seed {}", seed);
                assert!(d.drawbacks > 0);
            }
            assert!(d.potential.is_conserved());
        }
        assert!(weakened > 0);
    }

    #[test]
    fn test_picked_focus_themes_apply() {
        let costs = CostTable::default();
        let warrior = weapon_themes().into_iter().find(|t| t.name == "warrior's").unwrap();
        let warding = cloak_themes().into_iter().find(|t| t.name == "of warding").unwrap();
        for seed in 0..20 {
            let mut rng = GameRng::new(seed);
            let mut d = design("Long Sword", Category::Weapon, &costs);
            (warrior.apply)(&mut d, &mut rng);
            assert!([Stat::Str, Stat::Con, Stat::Dex]
                .iter()
                .any(|&s| d.artifact.stats[s as usize] > 0));

            let mut d = design("Cloak", Category::Cloak, &costs);
            (warding.apply)(&mut d, &mut rng);
            assert!(Element::BASE.iter().any(|&e| d.artifact.resists[e as usize] > 0));
        }
    }

    #[test]
    fn test_heavy_weapon_not_thrown() {
        let costs = CostTable::default();
        let thrown = weapon_themes().into_iter().find(|t| t.name == "thrown").unwrap();
        let mut rng = GameRng::new(1);
        let mut d = design("Mace of Disruption", Category::Weapon, &costs);
        (thrown.apply)(&mut d, &mut rng);
        assert!(!d.artifact.flags.contains(ObjectFlags::THROWING));
        let mut d = design("Dagger", Category::Weapon, &costs);
        (thrown.apply)(&mut d, &mut rng);
        assert!(d.artifact.to_h > 0);
    }

    #[test]
    fn test_activation_needs_remaining_budget() {
        let costs = CostTable::default();
        let mut d = design("Cloak", Category::Cloak, &costs);
        d.potential.try_debit(5000, PurchaseMode::Strict);
        let mut rng = GameRng::new(3);
        assert!(!grant_activation(&mut d, &[Activation::Light], &mut rng));
        assert!(d.artifact.activation.is_none());
    }

    #[test]
    fn test_every_theme_keeps_books_balanced() {
        let costs = CostTable::default();
        let bases = [
            (Category::Weapon, "Long Sword"),
            (Category::Launcher, "Long Bow"),
            (Category::Shield, "Large Metal Shield"),
            (Category::BodyArmour, "Chain Mail"),
            (Category::Cloak, "Cloak"),
            (Category::Headgear, "Iron Helm"),
            (Category::Gloves, "Set of Gauntlets"),
            (Category::Boots, "Pair of Hard Leather Boots"),
        ];
        let mut rng = GameRng::new(17);
        for (category, name) in bases {
            for theme in themes_for(category) {
                let mut d = design(name, category, &costs);
                (theme.apply)(&mut d, &mut rng);
                assert!(d.potential.is_conserved(), "{}", theme.name);
                assert!(d.artifact.has_properties(&d.base), "{}", theme.name);
            }
        }
    }
}
