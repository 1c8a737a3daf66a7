//! Shopkeeper prices
//!
//! Three percentages shape every price: how the owner's race feels about
//! the customer's, the customer's charisma, and the owner's greed. Their
//! product is compared against [`PRICE_FACTOR_BASE`] (all three at 100).
//! Owners never sell below an item's value and never buy above it.

use tracing::trace;

use super::value::object_value;
use crate::object::Item;
use crate::player::Player;
use crate::tables::{GameTables, StoreOwner};

/// Product of three neutral percentages
pub const PRICE_FACTOR_BASE: i64 = 100 * 100 * 100;

/// Price of `qty` units of `item` in a transaction with `owner`.
///
/// With `store_buying` the owner is buying from the player: the offer is
/// at most the item's value and never above the owner's purse. Otherwise
/// the owner is selling, at no less than the value. A valueless item is
/// priced at 0; anything with value costs at least 1.
pub fn price_item(
    item: &Item,
    qty: i32,
    owner: &StoreOwner,
    player: &Player,
    store_buying: bool,
    tables: &GameTables,
) -> i32 {
    let value = object_value(item, qty, &tables.costs) as i64;
    if value <= 0 {
        return 0;
    }

    let racial = tables.prices.racial_factor(owner.race, player.race) as i64;
    let charisma = tables.prices.charisma_factor(player.charisma()) as i64;
    let factor = (racial * charisma * owner.greed as i64).max(1);

    let price = if store_buying {
        let adjust = (100 * PRICE_FACTOR_BASE / factor).min(100);
        let offer = (value * adjust + 50) / 100;
        offer.min(owner.max_purse as i64)
    } else {
        let adjust = (factor / 10_000).max(100);
        let mut asking = (value * adjust + 50) / 100;
        if owner.store.doubles_prices() {
            asking *= 2;
        }
        asking
    };

    trace!(value, factor, store_buying, price, "price_item");
    price.clamp(1, i32::MAX as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{kind_by_name, Stat};
    use crate::player::Race;
    use crate::store::StoreKind;

    fn item(name: &str) -> Item {
        let mut it = Item::new(kind_by_name(name).unwrap()).unwrap();
        it.known = true;
        it
    }

    fn owner(store: StoreKind, race: Race, greed: i32, max_purse: i32) -> StoreOwner {
        StoreOwner {
            name: "Test".to_string(),
            store,
            race,
            greed,
            max_purse,
        }
    }

    fn customer(chr: i32) -> Player {
        let mut p = Player::new(Race::Human, 10);
        p.stats[Stat::Chr as usize] = chr;
        p
    }

    #[test]
    fn test_fair_owner_charges_value() {
        let tables = GameTables::default();
        let fair = owner(StoreKind::Armoury, Race::Human, 100, 10_000);
        let chain = item("Chain Mail");
        // charisma 18 is the neutral entry
        let price = price_item(&chain, 1, &fair, &customer(18), false, &tables);
        assert_eq!(price, 750);
        let offer = price_item(&chain, 1, &fair, &customer(18), true, &tables);
        assert_eq!(offer, 750);
    }

    #[test]
    fn test_greed_marks_up_and_down() {
        let tables = GameTables::default();
        let greedy = owner(StoreKind::Armoury, Race::Human, 150, 100_000);
        let chain = item("Chain Mail");
        let p = customer(18);
        assert_eq!(price_item(&chain, 1, &greedy, &p, false, &tables), 1125);
        // 100 * 1e6 / 1.5e6 = 66
        assert_eq!(price_item(&chain, 1, &greedy, &p, true, &tables), 495);
    }

    #[test]
    fn test_generous_factors_never_cross_value() {
        let tables = GameTables::default();
        let kind = owner(StoreKind::Armoury, Race::Human, 80, 100_000);
        let chain = item("Chain Mail");
        let p = customer(40);
        assert_eq!(price_item(&chain, 1, &kind, &p, false, &tables), 750);
        assert_eq!(price_item(&chain, 1, &kind, &p, true, &tables), 750);
    }

    #[test]
    fn test_purse_caps_offer() {
        let tables = GameTables::default();
        let poor = owner(StoreKind::Armoury, Race::Human, 100, 300);
        let plate = item("Full Plate Armour");
        assert_eq!(price_item(&plate, 1, &poor, &customer(18), true, &tables), 300);
    }

    #[test]
    fn test_black_market_doubles() {
        let tables = GameTables::default();
        let fence = owner(StoreKind::BlackMarket, Race::Human, 100, 100_000);
        let sword = item("Long Sword");
        assert_eq!(price_item(&sword, 1, &fence, &customer(18), false, &tables), 600);
    }

    #[test]
    fn test_quantity_scales() {
        let tables = GameTables::default();
        let fair = owner(StoreKind::General, Race::Human, 100, 10_000);
        let flask = item("Flask of Oil");
        assert_eq!(price_item(&flask, 5, &fair, &customer(18), false, &tables), 15);
    }

    #[test]
    fn test_worthless_priced_zero() {
        let tables = GameTables::default();
        let fair = owner(StoreKind::BlackMarket, Race::Human, 100, 10_000);
        let junk = item("Shard of Pottery");
        assert_eq!(price_item(&junk, 1, &fair, &customer(18), false, &tables), 0);
        assert_eq!(price_item(&junk, 1, &fair, &customer(18), true, &tables), 0);
    }
}
