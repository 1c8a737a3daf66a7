//! Object valuation
//!
//! Variable-power items (weapons, armour, launchers, ammunition, jewellery
//! and lights) are priced from their kind's base cost plus the price-mode
//! cost of every property they carry. Everything else is worth its kind's
//! cost, with a surcharge for stored charges.

use crate::object::{Item, Tval, MULTIPLE_BASE};
use crate::tables::CostTable;

/// Dice average (x10) at which a slay or brand costs its table value
const NEUTRAL_DICE: i64 = 50;
/// Ammunition slays and brands are worth a tenth of a weapon's
const AMMO_DAMPING: i64 = 10;

/// Full value of `qty` units, counting every property whether or not the
/// player knows about it. Never negative.
pub fn object_value_real(item: &Item, qty: i32, costs: &CostTable) -> i32 {
    let Some(kind) = item.object_kind() else {
        return 0;
    };
    let qty = qty.max(0) as i64;

    if !item.tval.is_variable_power() {
        let mut value = kind.cost as i64 * qty;
        if matches!(item.tval, Tval::Wand | Tval::Staff) && item.number > 0 {
            // Charges are pooled across the stack; the share goes up
            let number = item.number as i64;
            let charges = (item.pval.max(0) as i64 * qty + number - 1) / number;
            value += value * charges / 20;
        }
        return clamp_value(value);
    }

    let mut value = kind.cost as i64;
    value += costs.to_hit.price(item.to_h - kind.to_h) as i64;
    value += costs.to_dam.price(item.to_d - kind.to_d) as i64;
    value += costs.to_ac.price(item.to_a - kind.to_a) as i64;

    let pvals = item
        .stats
        .iter()
        .zip(&costs.stats)
        .chain(item.bonuses.iter().zip(&costs.bonuses))
        .chain(item.resists.iter().zip(&costs.resists));
    value += pvals.map(|(&v, cost)| cost.price(v) as i64).sum::<i64>();

    let dice = if item.dd > 0 && item.ds > 0 {
        item.dd as i64 * (item.ds as i64 + 1) * 5
    } else {
        NEUTRAL_DICE
    };
    let damping = if item.is_ammo() { AMMO_DAMPING } else { 1 };
    let multipliers = item
        .slays
        .iter()
        .zip(&costs.slays)
        .chain(item.brands.iter().zip(&costs.brands))
        .filter(|(m, _)| **m > MULTIPLE_BASE)
        .map(|(&m, cost)| cost.price((m - MULTIPLE_BASE) as i32) as i64);
    value += multipliers.map(|c| c * dice / (NEUTRAL_DICE * damping)).sum::<i64>();

    value += costs.flag_cost(item.flags.difference(kind.flags)) as i64;
    value += costs.curse_cost(item.curses) as i64;
    value += item.activation.map(|a| a.power() as i64).unwrap_or(0);

    clamp_value(value.max(0) * qty)
}

/// Value as the player (and the shopkeeper) sees it: unknown magic is not
/// paid for, and store discounts apply.
pub fn object_value(item: &Item, qty: i32, costs: &CostTable) -> i32 {
    let value = if item.known || !item.tval.is_variable_power() {
        object_value_real(item, qty, costs)
    } else {
        item.object_kind()
            .map(|k| clamp_value(k.cost as i64 * qty.max(0) as i64))
            .unwrap_or(0)
    };
    let discount = item.discount.clamp(0, 100) as i64;
    clamp_value(value as i64 - value as i64 * discount / 100)
}

fn clamp_value(value: i64) -> i32 {
    value.clamp(0, i32::MAX as i64) as i32
}
