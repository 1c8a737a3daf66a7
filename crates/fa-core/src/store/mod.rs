//! Store system
//!
//! Item valuation, shopkeeper pricing, store stock and the periodic
//! restocking that turns the stock over. A [`Store`] pairs one kind of shop
//! with its current owner and stock.

mod maint;
mod price;
mod stock;
mod value;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter};
use tracing::debug;

use crate::object::{Item, ObjectFlags, Tval};
use crate::player::{Player, Race};
use crate::tables::{GameTables, StoreOwner};
use crate::world::{ItemContainer, StoreError};

pub use maint::{mass_produce, store_maint, StoreConfig};
pub use price::{price_item, PRICE_FACTOR_BASE};
pub use stock::{StoreStock, STORE_STACK_MAX};
pub use value::{object_value, object_value_real};

/// Store types
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumCount,
)]
pub enum StoreKind {
    #[strum(serialize = "General Store")]
    General,
    Armoury,
    #[strum(serialize = "Weaponsmith's")]
    Weaponsmith,
    Temple,
    #[strum(serialize = "Alchemy shop")]
    Alchemist,
    #[strum(serialize = "Magic shop")]
    MagicShop,
    #[strum(serialize = "Black market")]
    BlackMarket,
    Home,
}

impl StoreKind {
    /// Item types this store generates when it restocks
    pub const fn stock_tvals(self) -> &'static [Tval] {
        match self {
            StoreKind::General => &[
                Tval::Food,
                Tval::Flask,
                Tval::Light,
                Tval::Spike,
                Tval::Shot,
                Tval::Arrow,
                Tval::Bolt,
                Tval::Cloak,
                Tval::Digger,
            ],
            StoreKind::Armoury => &[
                Tval::Boots,
                Tval::Gloves,
                Tval::Helm,
                Tval::Shield,
                Tval::SoftArmor,
                Tval::HardArmor,
            ],
            StoreKind::Weaponsmith => &[
                Tval::Sword,
                Tval::Polearm,
                Tval::Hafted,
                Tval::Bow,
                Tval::Shot,
                Tval::Arrow,
                Tval::Bolt,
            ],
            StoreKind::Temple => &[Tval::Hafted, Tval::PrayerBook, Tval::Potion, Tval::Scroll],
            StoreKind::Alchemist => &[Tval::Potion, Tval::Scroll],
            StoreKind::MagicShop => &[
                Tval::Ring,
                Tval::Amulet,
                Tval::Wand,
                Tval::Staff,
                Tval::Rod,
                Tval::MagicBook,
            ],
            StoreKind::BlackMarket => &[
                Tval::Sword,
                Tval::Polearm,
                Tval::Hafted,
                Tval::Bow,
                Tval::Arrow,
                Tval::Bolt,
                Tval::Boots,
                Tval::Gloves,
                Tval::Helm,
                Tval::Cloak,
                Tval::SoftArmor,
                Tval::HardArmor,
                Tval::Ring,
                Tval::Amulet,
                Tval::Wand,
                Tval::Staff,
                Tval::Potion,
                Tval::Scroll,
            ],
            StoreKind::Home => &[],
        }
    }

    /// Whether this store will take the item from the player
    pub fn will_buy(self, item: &Item) -> bool {
        match self {
            StoreKind::Home | StoreKind::BlackMarket => true,
            // Blessed blades are the one exception to blunt weapons only
            StoreKind::Temple => {
                self.stock_tvals().contains(&item.tval) || item.flags.contains(ObjectFlags::BLESSED)
            }
            _ => self.stock_tvals().contains(&item.tval),
        }
    }

    /// Black-market style stores charge double for everything they sell
    pub const fn doubles_prices(self) -> bool {
        matches!(self, StoreKind::BlackMarket)
    }

    /// The player's home stores items for free and never restocks
    pub const fn is_home(self) -> bool {
        matches!(self, StoreKind::Home)
    }

    /// Depth range `(base, spread)` of the stock this store creates.
    /// Black markets reach much deeper than honest shops.
    pub const fn stock_depth(self) -> (i32, i32) {
        match self {
            StoreKind::BlackMarket => (25, 25),
            _ => (1, 5),
        }
    }
}

/// Result of a completed purchase or sale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transaction {
    /// Gold that changed hands
    pub price: i32,
    /// Units moved
    pub quantity: i32,
    /// Slot the item landed in (pack slot when buying, stock slot when
    /// selling)
    pub slot: usize,
}

/// A shop: its kind, its current owner and its stock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub kind: StoreKind,
    pub owner: StoreOwner,
    pub stock: StoreStock,
}

impl Store {
    pub fn new(kind: StoreKind, owner: StoreOwner, config: &StoreConfig) -> Self {
        Self {
            kind,
            owner,
            stock: StoreStock::new(config.capacity, config.stack_max),
        }
    }

    /// Open a store with the first owner the tables list for its kind.
    /// Homes have no owner in the tables and get a placeholder.
    pub fn open(kind: StoreKind, tables: &GameTables, config: &StoreConfig) -> Self {
        let owner = tables
            .prices
            .owners_for(kind)
            .next()
            .cloned()
            .unwrap_or_else(|| StoreOwner {
                name: "Your home".to_string(),
                store: kind,
                race: Race::Human,
                greed: 100,
                max_purse: 0,
            });
        Self::new(kind, owner, config)
    }

    /// What the player pays for `qty` units of the item in `slot`
    pub fn asking_price(
        &self,
        slot: usize,
        qty: i32,
        player: &Player,
        tables: &GameTables,
    ) -> Option<i32> {
        let item = self.stock.get(slot)?;
        if self.kind.is_home() {
            return Some(0);
        }
        Some(price_item(item, qty, &self.owner, player, false, tables))
    }

    /// What the owner offers for `qty` units of an item the player holds
    pub fn offer(&self, item: &Item, qty: i32, player: &Player, tables: &GameTables) -> i32 {
        if self.kind.is_home() {
            return 0;
        }
        price_item(item, qty, &self.owner, player, true, tables)
    }

    /// The player buys `qty` units from stock `slot`. Either everything
    /// happens (gold paid, units moved into the pack) or nothing does.
    pub fn buy(
        &mut self,
        player: &mut Player,
        slot: usize,
        qty: i32,
        tables: &GameTables,
    ) -> Result<Transaction, StoreError> {
        let item = self.stock.get(slot).ok_or(StoreError::NoSuchSlot(slot))?;
        if qty <= 0 || qty > item.number {
            return Err(StoreError::NotEnoughUnits {
                requested: qty,
                available: item.number,
            });
        }

        let price = self
            .asking_price(slot, qty, player, tables)
            .ok_or(StoreError::NoSuchSlot(slot))?;
        if price > player.gold {
            return Err(StoreError::NotEnoughGold {
                price,
                gold: player.gold,
            });
        }

        let mut wanted = item.clone();
        wanted.number = qty;
        wanted.discount = 0;
        if !player.pack.has_room_for(&wanted) {
            return Err(StoreError::StockFull);
        }

        let mut bought = self.stock.take(slot, qty).ok_or(StoreError::NoSuchSlot(slot))?;
        let discount = bought.discount;
        bought.discount = 0;
        let pack_slot = match player.pack.put(bought) {
            Ok(pack_slot) => pack_slot,
            Err(mut returned) => {
                returned.discount = discount;
                let restored = self.stock.carry(returned, &tables.costs);
                debug_assert!(restored.is_ok(), "units taken from stock fit back");
                return Err(StoreError::StockFull);
            }
        };
        player.gold -= price;
        debug!(store = %self.kind, price, qty, "player bought");

        Ok(Transaction {
            price,
            quantity: qty,
            slot: pack_slot,
        })
    }

    /// The player sells (or, at home, drops off) `qty` units from pack
    /// `slot`. Atomic like [`Store::buy`].
    pub fn sell(
        &mut self,
        player: &mut Player,
        slot: usize,
        qty: i32,
        tables: &GameTables,
    ) -> Result<Transaction, StoreError> {
        let item = player.pack.get(slot).ok_or(StoreError::NoSuchSlot(slot))?;
        if qty <= 0 || qty > item.number {
            return Err(StoreError::NotEnoughUnits {
                requested: qty,
                available: item.number,
            });
        }
        if !self.kind.will_buy(item) {
            return Err(StoreError::WillNotBuy);
        }

        let mut wanted = item.clone();
        wanted.number = qty;
        wanted.known = true;
        if !self.stock.has_room_for(&wanted) {
            return Err(StoreError::StockFull);
        }

        let price = self.offer(item, qty, player, tables);
        if price <= 0 && !self.kind.is_home() {
            return Err(StoreError::Worthless);
        }

        let mut sold = player.pack.take(slot, qty).ok_or(StoreError::NoSuchSlot(slot))?;
        let was_known = sold.known;
        // Anything handed over the counter is identified
        sold.known = true;
        let stock_slot = match self.stock.carry(sold, &tables.costs) {
            Ok(stock_slot) => stock_slot,
            Err(mut returned) => {
                returned.known = was_known;
                let restored = player.pack.put(returned);
                debug_assert!(restored.is_ok(), "units taken from the pack fit back");
                return Err(StoreError::StockFull);
            }
        };
        player.gold += price;
        debug!(store = %self.kind, price, qty, "player sold");

        Ok(Transaction {
            price,
            quantity: qty,
            slot: stock_slot,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::kind_by_name;
    use crate::world::Pack;

    fn item(name: &str) -> Item {
        Item::new(kind_by_name(name).unwrap()).unwrap()
    }

    fn stocked(kind: StoreKind, goods: &[(&str, i32)]) -> Store {
        let tables = GameTables::default();
        let mut store = Store::open(kind, &tables, &StoreConfig::default());
        for (name, n) in goods {
            let mut it = item(name);
            it.number = *n;
            it.known = true;
            store.stock.carry(it, &tables.costs).unwrap();
        }
        store
    }

    #[test]
    fn test_will_buy_policy() {
        assert!(StoreKind::Armoury.will_buy(&item("Chain Mail")));
        assert!(!StoreKind::Armoury.will_buy(&item("Long Sword")));
        assert!(StoreKind::Weaponsmith.will_buy(&item("Arrow")));
        assert!(!StoreKind::Alchemist.will_buy(&item("Wand of Magic Missile")));
        assert!(StoreKind::MagicShop.will_buy(&item("Wand of Magic Missile")));
        assert!(StoreKind::BlackMarket.will_buy(&item("Broken Skull")));
        assert!(StoreKind::Home.will_buy(&item("Shard of Pottery")));
        assert!(!StoreKind::General.will_buy(&item("Potion of Speed")));
    }

    #[test]
    fn test_blessed_blade_sells_at_temple() {
        let mut sword = item("Long Sword");
        assert!(!StoreKind::Temple.will_buy(&sword));
        sword.flags |= ObjectFlags::BLESSED;
        assert!(StoreKind::Temple.will_buy(&sword));
    }

    #[test]
    fn test_only_black_market_doubles() {
        use strum::IntoEnumIterator;
        let doubling: Vec<_> = StoreKind::iter().filter(|k| k.doubles_prices()).collect();
        assert_eq!(doubling, vec![StoreKind::BlackMarket]);
    }

    #[test]
    fn test_buy_moves_units_and_gold() {
        let tables = GameTables::default();
        let mut store = stocked(StoreKind::General, &[("Flask of Oil", 10)]);
        let mut player = Player::new(Race::Human, 10);
        player.gold = 1000;
        let price = store.asking_price(0, 4, &player, &tables).unwrap();
        let tx = store.buy(&mut player, 0, 4, &tables).unwrap();
        assert_eq!(tx.price, price);
        assert_eq!(player.gold, 1000 - price);
        assert_eq!(store.stock.get(0).unwrap().number, 6);
        assert_eq!(player.pack.get(tx.slot).unwrap().number, 4);
    }

    #[test]
    fn test_buy_without_gold_changes_nothing() {
        let tables = GameTables::default();
        let mut store = stocked(StoreKind::Armoury, &[("Full Plate Armour", 1)]);
        let mut player = Player::new(Race::Human, 10);
        player.gold = 10;
        let before = store.clone();
        let err = store.buy(&mut player, 0, 1, &tables).unwrap_err();
        assert!(matches!(err, StoreError::NotEnoughGold { gold: 10, .. }));
        assert_eq!(store, before);
        assert_eq!(player.gold, 10);
        assert!(player.pack.is_empty());
    }

    #[test]
    fn test_buy_too_many_units() {
        let tables = GameTables::default();
        let mut store = stocked(StoreKind::General, &[("Ration of Food", 3)]);
        let mut player = Player::new(Race::Human, 10);
        player.gold = 1000;
        assert_eq!(
            store.buy(&mut player, 0, 5, &tables),
            Err(StoreError::NotEnoughUnits {
                requested: 5,
                available: 3
            })
        );
        assert_eq!(
            store.buy(&mut player, 4, 1, &tables),
            Err(StoreError::NoSuchSlot(4))
        );
    }

    #[test]
    fn test_sell_pays_and_stocks() {
        let tables = GameTables::default();
        let mut store = stocked(StoreKind::Weaponsmith, &[]);
        let mut player = Player::new(Race::Human, 10);
        player.pack.put(item("Long Sword")).unwrap();
        let tx = store.sell(&mut player, 0, 1, &tables).unwrap();
        assert!(tx.price >= 1);
        assert_eq!(player.gold, tx.price);
        assert!(player.pack.is_empty());
        assert!(store.stock.get(tx.slot).unwrap().known);
    }

    #[test]
    fn test_sell_refused_goods() {
        let tables = GameTables::default();
        let mut store = stocked(StoreKind::Alchemist, &[]);
        let mut player = Player::new(Race::Human, 10);
        player.pack.put(item("Long Sword")).unwrap();
        assert_eq!(
            store.sell(&mut player, 0, 1, &tables),
            Err(StoreError::WillNotBuy)
        );
        assert_eq!(player.pack.len(), 1);
        assert_eq!(player.gold, 0);
    }

    #[test]
    fn test_sell_worthless() {
        let tables = GameTables::default();
        let mut store = stocked(StoreKind::BlackMarket, &[]);
        let mut player = Player::new(Race::Human, 10);
        player.pack.put(item("Shard of Pottery")).unwrap();
        assert_eq!(
            store.sell(&mut player, 0, 1, &tables),
            Err(StoreError::Worthless)
        );
    }

    #[test]
    fn test_home_is_free() {
        let tables = GameTables::default();
        let mut home = stocked(StoreKind::Home, &[]);
        let mut player = Player::new(Race::Human, 10);
        player.pack.put(item("Shard of Pottery")).unwrap();
        let tx = home.sell(&mut player, 0, 1, &tables).unwrap();
        assert_eq!(tx.price, 0);
        let tx = home.buy(&mut player, 0, 1, &tables).unwrap();
        assert_eq!(tx.price, 0);
        assert_eq!(player.pack.len(), 1);
    }

    #[test]
    fn test_sell_into_full_stock() {
        let tables = GameTables::default();
        let mut store = stocked(StoreKind::Weaponsmith, &[]);
        store.stock = StoreStock::new(1, STORE_STACK_MAX);
        store.stock.carry(item("Dagger"), &tables.costs).unwrap();
        let mut player = Player::new(Race::Human, 10);
        player.pack.put(item("Long Sword")).unwrap();
        assert_eq!(
            store.sell(&mut player, 0, 1, &tables),
            Err(StoreError::StockFull)
        );
        assert_eq!(player.pack.len(), 1);
        assert!(!player.pack.get(0).unwrap().known);
    }

    #[test]
    fn test_refused_purchase_keeps_markdown() {
        let tables = GameTables::default();
        let mut store = stocked(StoreKind::Weaponsmith, &[]);
        let mut dagger = item("Dagger");
        dagger.known = true;
        dagger.discount = 25;
        store.stock.carry(dagger, &tables.costs).unwrap();
        let mut player = Player::new(Race::Human, 10);
        player.gold = 100_000;
        player.pack = Pack::new(1);
        player.pack.put(item("Long Sword")).unwrap();

        let before = store.clone();
        assert_eq!(
            store.buy(&mut player, 0, 1, &tables),
            Err(StoreError::StockFull)
        );
        assert_eq!(store, before);
        assert_eq!(store.stock.get(0).unwrap().discount, 25);
        assert_eq!(player.gold, 100_000);
        assert_eq!(player.pack.len(), 1);
    }
}
