//! Store maintenance
//!
//! Each maintenance tick sells off part of the stock to unseen customers
//! and then restocks from the store's item types, piling cheap goods up
//! and occasionally marking something down.

use serde::{Deserialize, Serialize};
use tracing::debug;

use fa_rng::RandomSource;

use super::stock::STORE_STACK_MAX;
use super::value::object_value_real;
use super::{Store, StoreKind};
use crate::object::{all_kinds, Item, Tval};
use crate::tables::{CostTable, GameTables, StoreOwner};
use crate::world::TableError;

/// Purse size per step of discount rarity: richer owners discount less
const DISCOUNT_PURSE_STEP: i32 = 5000;

/// Stock turnover settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Stock slots per store
    pub capacity: usize,
    /// Most stacks sold off or created in one tick
    pub turnover: i32,
    /// Fewest stacks a store keeps after maintenance
    pub min_keep: usize,
    /// Most stacks a store keeps after maintenance
    pub max_keep: usize,
    /// Stack cap per slot
    pub stack_max: i32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: 24,
            turnover: 9,
            min_keep: 6,
            max_keep: 18,
            stack_max: STORE_STACK_MAX,
        }
    }
}

impl StoreConfig {
    /// Load settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let config: StoreConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Keep bounds must be ordered and leave a slot free for what the
    /// player sells
    pub fn validate(&self) -> Result<(), TableError> {
        let bad = |setting: &'static str, value: usize| TableError::BadSetting {
            setting,
            value: value as i64,
        };
        if self.capacity < 2 {
            return Err(bad("capacity", self.capacity));
        }
        if self.turnover < 1 {
            return Err(TableError::BadSetting {
                setting: "turnover",
                value: self.turnover as i64,
            });
        }
        if self.min_keep > self.max_keep {
            return Err(bad("min_keep", self.min_keep));
        }
        if self.max_keep >= self.capacity {
            return Err(bad("max_keep", self.max_keep));
        }
        if self.stack_max < 1 {
            return Err(TableError::BadSetting {
                setting: "stack_max",
                value: self.stack_max as i64,
            });
        }
        Ok(())
    }
}

/// Run one maintenance tick. Homes are never touched.
pub fn store_maint(
    store: &mut Store,
    config: &StoreConfig,
    tables: &GameTables,
    rng: &mut dyn RandomSource,
) {
    if store.kind.is_home() {
        return;
    }
    let before = store.stock.len();

    let min_keep = config.min_keep.min(config.max_keep);
    let keep = (before as i32 - rng.randint1(config.turnover)).max(0) as usize;
    let keep = keep.clamp(min_keep, config.max_keep);
    while store.stock.len() > keep {
        store_delete(store, rng);
    }
    let kept = store.stock.len();

    let fill = kept + rng.randint1(config.turnover).max(0) as usize;
    let fill = fill
        .clamp(min_keep, config.max_keep)
        .min(store.stock.capacity().saturating_sub(1));
    let mut tries = config.capacity * 4;
    while store.stock.len() < fill && tries > 0 {
        store_create(store, config, &tables.costs, rng);
        tries -= 1;
    }

    debug!(
        store = %store.kind,
        before,
        kept,
        after = store.stock.len(),
        "store maintenance"
    );
}

/// Sell off some or all of a random stack. Missiles tend to go a few at a
/// time; anything else usually goes whole.
fn store_delete(store: &mut Store, rng: &mut dyn RandomSource) {
    let len = store.stock.len() as i32;
    if len == 0 {
        return;
    }
    let slot = rng.randint0(len) as usize;
    let Some(item) = store.stock.get(slot) else {
        return;
    };
    let partial = if item.is_ammo() { rng.one_in(2) } else { rng.one_in(4) };
    let mut num = item.number;
    if partial {
        num = (num + 1) / 2;
    }
    store.stock.item_increase(slot, -num);
    store.stock.item_optimize(slot);
}

/// Create one new stack for the store. Returns false if nothing suitable
/// came up.
fn store_create(
    store: &mut Store,
    config: &StoreConfig,
    costs: &CostTable,
    rng: &mut dyn RandomSource,
) -> bool {
    let (base, spread) = store.kind.stock_depth();
    let level = base + rng.randint0(spread);

    let Some(mut item) = pick_kind(store.kind, level, rng) else {
        return false;
    };
    enchant(&mut item, store.kind, rng);
    if object_value_real(&item, 1, costs) <= 0 {
        return false;
    }
    item.known = true;
    mass_produce(&mut item, &store.owner, costs, config.stack_max, rng);
    store.stock.carry(item, costs).is_ok()
}

/// Choose a kind the store deals in, weighted by allocation
fn pick_kind(store: StoreKind, level: i32, rng: &mut dyn RandomSource) -> Option<Item> {
    let tvals = store.stock_tvals();
    let candidates: Vec<_> = all_kinds()
        .filter(|(_, k)| k.alloc > 0 && k.level <= level && tvals.contains(&k.tval))
        .collect();
    let total: i32 = candidates.iter().map(|(_, k)| k.alloc).sum();
    let mut roll = rng.randint0(total);
    for (id, k) in candidates {
        if roll < k.alloc {
            return Some(Item::from_kind(id, k));
        }
        roll -= k.alloc;
    }
    None
}

/// Light magical bonuses. Black market goods are always enchanted.
fn enchant(item: &mut Item, store: StoreKind, rng: &mut dyn RandomSource) {
    let (chance, size) = match store {
        StoreKind::BlackMarket => (1, 5),
        _ => (4, 3),
    };
    let fights = item.is_ammo() || item.is_melee_weapon() || item.is_launcher();
    if !(fights || item.tval.is_armour()) || !rng.one_in(chance) {
        return;
    }
    if fights {
        item.to_h += rng.randint1(size);
        item.to_d += rng.randint1(size);
    } else {
        item.to_a += rng.randint1(size);
    }
}

/// Turn a single new item into a pile sized by how cheap it is, and roll
/// a discount. Discounts are rarer the richer the owner.
pub fn mass_produce(
    item: &mut Item,
    owner: &StoreOwner,
    costs: &CostTable,
    stack_max: i32,
    rng: &mut dyn RandomSource,
) {
    let cost = object_value_real(item, 1, costs);
    let mut size = 1;

    match item.tval {
        Tval::Food | Tval::Flask | Tval::Light => {
            if cost <= 5 {
                size += rng.mass_roll(3, 5);
            }
            if cost <= 20 {
                size += rng.mass_roll(3, 5);
            }
        }
        Tval::Potion | Tval::Scroll => {
            if cost <= 60 {
                size += rng.mass_roll(3, 5);
            }
            if cost <= 240 {
                size += rng.mass_roll(1, 5);
            }
        }
        Tval::MagicBook | Tval::PrayerBook => {
            if cost <= 50 {
                size += rng.mass_roll(2, 3);
            }
            if cost <= 500 {
                size += rng.mass_roll(1, 3);
            }
        }
        Tval::Spike | Tval::Shot | Tval::Arrow | Tval::Bolt => {
            if cost <= 5 {
                size += rng.mass_roll(5, 5);
            }
            if cost <= 50 {
                size += rng.mass_roll(5, 5);
            }
            if cost <= 500 {
                size += rng.mass_roll(5, 5);
            }
        }
        tval if tval.is_variable_power() && !item.is_artifact() && item.ego.is_none() => {
            if cost <= 10 {
                size += rng.mass_roll(3, 5);
            }
            if cost <= 100 {
                size += rng.mass_roll(3, 5);
            }
        }
        _ => {}
    }

    let scale = (owner.max_purse / DISCOUNT_PURSE_STEP).max(1);
    let discount = if cost < 5 {
        0
    } else if rng.one_in(25 * scale) {
        25
    } else if rng.one_in(150 * scale) {
        50
    } else if rng.one_in(300 * scale) {
        75
    } else if rng.one_in(500 * scale) {
        90
    } else {
        0
    };

    item.number = (size - size * discount / 100).clamp(1, stack_max.max(1));
    item.discount = discount;
    debug!(item = %item.describe(), size, discount, "mass produce");
}
