//! Random artifact generation
//!
//! A design runs through a fixed sequence: pick a base kind and give it a
//! power budget, spend a first chunk on a theme, haggle for random extra
//! qualities, maybe run the result through the curse gauntlet, clean up
//! contradictions and finally name it.
//!
//! Designs are deterministic given the random source, so a seed is enough
//! to regenerate a whole artifact set.

mod contradictions;
mod curse;
mod names;
mod potential;
mod quality;
mod themes;

use fa_rng::{GameRng, RandomSource};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use tracing::debug;

use crate::object::{
    all_kinds, kind, Artifact, ArtifactId, ArtifactTable, Element, Item, KindId, ObjectFlags,
    ObjectKind, SetBonus, SetId, Stat, Tval,
};
use crate::tables::GameTables;
use crate::world::ForgeError;

pub use contradictions::{
    is_contradiction_free, remove_contradictions, STAT_CEILING, TO_AC_CEILING, TO_DAM_CEILING,
    TO_HIT_CEILING,
};
pub use names::NameGenerator;
pub use potential::{Potential, PurchaseMode};
pub use quality::design_cost;

use curse::curse_gauntlet;
use quality::{clean_wallet, ensure_property, pick, random_quality, Design};
use themes::{choose_theme, themes_for};

/// Starting potential before the random walk
const POTENTIAL_START: i32 = 1750;
const POTENTIAL_STEP: i32 = 500;
const POTENTIAL_STEPS: i32 = 14;
/// Chance in ten of taking each further step
const POTENTIAL_STEP_CHANCE: i32 = 7;
pub const POTENTIAL_FLOOR: i32 = 2000;
pub const MAX_POTENTIAL: i32 = POTENTIAL_START + POTENTIAL_STEP * POTENTIAL_STEPS;

/// Base weapons rolling more than this many dice sides cost potential
const WEAPON_POWER_FREE: i32 = 30;
const WEAPON_POWER_PENALTY: i32 = 25;
/// Base armour above this AC costs potential
const ARMOUR_POWER_FREE: i32 = 30;
const ARMOUR_POWER_PENALTY: i32 = 50;

const BASE_KIND_TRIES: usize = 100;
const LEVEL_PER_SPEND: i32 = 200;
const RARITY_PER_SPEND: i32 = 250;

/// Equipment categories; each has its own theme table and potential ceiling
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Category {
    Weapon,
    Launcher,
    Shield,
    BodyArmour,
    Cloak,
    Headgear,
    Gloves,
    Boots,
}

impl Category {
    /// The category of a base kind, if artifacts can be made from it
    pub const fn of(tval: Tval) -> Option<Category> {
        match tval {
            Tval::Sword | Tval::Polearm | Tval::Hafted => Some(Category::Weapon),
            Tval::Bow => Some(Category::Launcher),
            Tval::Shield => Some(Category::Shield),
            Tval::SoftArmor | Tval::HardArmor => Some(Category::BodyArmour),
            Tval::Cloak => Some(Category::Cloak),
            Tval::Helm | Tval::Crown => Some(Category::Headgear),
            Tval::Gloves => Some(Category::Gloves),
            Tval::Boots => Some(Category::Boots),
            _ => None,
        }
    }

    /// Most potential a design of this category may start with
    pub const fn ceiling(self) -> i32 {
        match self {
            Category::Cloak | Category::Gloves => 5500,
            Category::Boots => 8000,
            _ => MAX_POTENTIAL,
        }
    }

    pub const fn is_weapon(self) -> bool {
        matches!(self, Category::Weapon | Category::Launcher)
    }
}

/// Tunables of the forge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeOptions {
    /// Percent chance a design goes through the curse gauntlet
    pub terrible_chance: i32,
    /// Most random qualities one design haggles for
    pub haggle_rounds: usize,
    /// Haggling stops once less than this is left to spend
    pub min_spend: i32,
}

impl Default for ForgeOptions {
    fn default() -> Self {
        Self {
            terrible_chance: 10,
            haggle_rounds: 20,
            min_spend: 300,
        }
    }
}

/// How a design spent its budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgeReport {
    pub kind: KindId,
    pub category: Category,
    pub theme: Option<&'static str>,
    pub potential: Potential,
    /// Went through the curse gauntlet
    pub cursed: bool,
    /// Curses and weaknesses taken for credit, gauntlet included
    pub drawbacks: u32,
}

/// A finished design and how it came about
#[derive(Debug, Clone, PartialEq)]
pub struct Forged {
    pub artifact: Artifact,
    pub report: ForgeReport,
}

/// Designs random artifacts against a set of cost tables
pub struct ArtifactForge<'t> {
    tables: &'t GameTables,
    options: ForgeOptions,
    names: NameGenerator,
}

impl<'t> ArtifactForge<'t> {
    pub fn new(tables: &'t GameTables, options: ForgeOptions) -> Self {
        Self {
            tables,
            options,
            names: NameGenerator::default(),
        }
    }

    pub fn options(&self) -> &ForgeOptions {
        &self.options
    }

    /// Design an artifact on a randomly chosen base kind
    pub fn design(&self, rng: &mut dyn RandomSource) -> Result<Forged, ForgeError> {
        let kind_id = choose_base(rng).ok_or(ForgeError::NoBaseKind)?;
        self.design_from(kind_id, rng)
    }

    /// Design with a fresh generator seeded with `seed`
    pub fn design_seeded(&self, seed: u64) -> Result<Forged, ForgeError> {
        let mut rng = GameRng::new(seed);
        self.design(&mut rng)
    }

    /// Design an artifact on a given base kind
    pub fn design_from(&self, kind_id: KindId, rng: &mut dyn RandomSource) -> Result<Forged, ForgeError> {
        let base_kind = kind(kind_id).ok_or(ForgeError::NoBaseKind)?;
        let category = Category::of(base_kind.tval).ok_or(ForgeError::NoBaseKind)?;
        let base = Item::from_kind(kind_id, base_kind);

        let initial = initial_potential(base_kind, category, rng);
        debug!(kind = base_kind.name, %category, initial, "artifact design started");
        let mut design = Design::new(base, category, initial, &self.tables.costs);

        let table = themes_for(category);
        let theme = choose_theme(&table, rng).map(|t| (t.name, t.apply));
        if let Some((name, apply)) = theme {
            apply(&mut design, rng);
            debug!(theme = name, spent = design.potential.spent(), "theme applied");
        }

        for _ in 0..self.options.haggle_rounds {
            if design.potential.remaining() < self.options.min_spend {
                break;
            }
            let (quality, magnitude) = random_quality(category, rng);
            design.buy(quality, magnitude);
        }
        clean_wallet(&mut design);

        let cursed = rng.randint0(100) < self.options.terrible_chance;
        if cursed {
            curse_gauntlet(&mut design, rng);
        }
        remove_contradictions(&mut design.artifact);
        ensure_property(&mut design);

        let spent = design.potential.spent();
        let art = &mut design.artifact;
        art.level = (base_kind.level.max(1) + spent / LEVEL_PER_SPEND).clamp(1, 100);
        art.rarity = (spent / RARITY_PER_SPEND + 1).clamp(1, 100);

        let used = spent * 100 / MAX_POTENTIAL;
        art.name = self
            .names
            .name_artifact(used, art.is_cursed(), category.is_weapon(), rng);
        debug!(
            name = %art.name,
            spent,
            remaining = design.potential.remaining(),
            credited = design.potential.credited(),
            cursed,
            "artifact designed"
        );

        Ok(Forged {
            artifact: design.artifact,
            report: ForgeReport {
                kind: kind_id,
                category,
                theme: theme.map(|(name, _)| name),
                potential: design.potential,
                cursed,
                drawbacks: design.drawbacks,
            },
        })
    }

    /// Design an artifact and store it in the table
    pub fn forge_into(
        &self,
        table: &mut ArtifactTable,
        rng: &mut dyn RandomSource,
    ) -> Result<ArtifactId, ForgeError> {
        if table.len() >= table.capacity() {
            return Err(ForgeError::TableFull {
                capacity: table.capacity(),
            });
        }
        let forged = self.design(rng)?;
        table.insert(forged.artifact)
    }

    /// Fill every free slot of the table
    pub fn forge_all(
        &self,
        table: &mut ArtifactTable,
        rng: &mut dyn RandomSource,
    ) -> Result<Vec<ArtifactId>, ForgeError> {
        let free = table.capacity().saturating_sub(table.len());
        (0..free).map(|_| self.forge_into(table, rng)).collect()
    }
}

/// Kinds artifacts can be made from
fn base_candidates() -> Vec<(KindId, &'static ObjectKind)> {
    all_kinds()
        .filter(|(_, k)| k.alloc > 0 && Category::of(k.tval).is_some())
        .collect()
}

/// Sample base kinds by allocation weight until one passes the depth
/// reweighting roll. Deep kinds are rare to draw but easy to accept.
fn choose_base(rng: &mut dyn RandomSource) -> Option<KindId> {
    let candidates = base_candidates();
    let total: i32 = candidates.iter().map(|(_, k)| k.alloc).sum();
    if total <= 0 {
        return None;
    }
    let mut last = None;
    for _ in 0..BASE_KIND_TRIES {
        let mut roll = rng.randint0(total);
        let Some(&(id, k)) = candidates.iter().find(|(_, k)| {
            if roll < k.alloc {
                return true;
            }
            roll -= k.alloc;
            false
        }) else {
            continue;
        };
        if rng.randint0(100) < 20 + k.level * 2 {
            return Some(id);
        }
        last = Some(id);
    }
    last
}

/// Random walk from the starting potential, less a penalty for strong
/// bases, bounded by the category ceiling and the floor
fn initial_potential(base: &ObjectKind, category: Category, rng: &mut dyn RandomSource) -> i32 {
    let mut potential = POTENTIAL_START;
    for _ in 0..POTENTIAL_STEPS {
        if rng.randint0(10) >= POTENTIAL_STEP_CHANCE {
            break;
        }
        potential += POTENTIAL_STEP;
    }

    let power = base.base_power();
    let penalty = if category.is_weapon() {
        (power - WEAPON_POWER_FREE).max(0) * WEAPON_POWER_PENALTY
    } else {
        (power - ARMOUR_POWER_FREE).max(0) * ARMOUR_POWER_PENALTY
    };
    (potential - penalty).min(category.ceiling()).max(POTENTIAL_FLOOR)
}

/// Tie artifacts together as a set and roll the bonus they grant when all
/// are worn. Returns None unless at least two members exist in the table.
pub fn make_set(
    table: &mut ArtifactTable,
    members: &[ArtifactId],
    set: SetId,
    rng: &mut dyn RandomSource,
) -> Option<SetBonus> {
    let present: Vec<ArtifactId> = members
        .iter()
        .copied()
        .filter(|&id| table.get(id).is_some())
        .collect();
    if present.len() < 2 {
        return None;
    }

    let mut bonus = SetBonus {
        set,
        stats: Default::default(),
        resists: Default::default(),
        flags: ObjectFlags::empty(),
    };
    let stats = [Stat::Str, Stat::Int, Stat::Wis, Stat::Dex, Stat::Con];
    bonus.stats[pick(&stats, rng) as usize] = rng.randint1(2);
    bonus.resists[pick(&Element::BASE, rng) as usize] = 10 * (1 + rng.randint1(3));
    if rng.one_in(3) {
        bonus.flags = pick(
            &[ObjectFlags::FREE_ACT, ObjectFlags::SEE_INVIS, ObjectFlags::REGEN],
            rng,
        );
    }

    for id in present {
        if let Some(art) = table.get_mut(id) {
            art.set = Some(set);
        }
    }
    Some(bonus)
}
