//! Store stock
//!
//! Stacks are kept sorted by type, then subtype, with the more valuable of
//! two otherwise similar items first. Each slot remembers the per-unit
//! value it was ranked by. Merging saturates at the stack cap and emptied
//! slots are compacted out immediately.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::value::object_value;
use crate::object::Item;
use crate::tables::CostTable;

/// Default stack cap for store slots
pub const STORE_STACK_MAX: i32 = 99;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Stack {
    item: Item,
    /// Value of one unit as the store sees it
    value: i32,
}

fn stock_order(a: &Stack, b: &Stack) -> Ordering {
    a.item
        .tval
        .cmp(&b.item.tval)
        .then(a.item.sval.cmp(&b.item.sval))
        .then(b.value.cmp(&a.value))
}

/// A store's inventory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreStock {
    stacks: Vec<Stack>,
    capacity: usize,
    stack_max: i32,
}

impl StoreStock {
    pub fn new(capacity: usize, stack_max: i32) -> Self {
        Self {
            stacks: Vec::new(),
            capacity,
            stack_max: stack_max.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.stacks.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.stacks.iter().map(|s| &s.item)
    }

    pub fn get(&self, slot: usize) -> Option<&Item> {
        self.stacks.get(slot).map(|s| &s.item)
    }

    /// Per-unit value the slot was ranked by
    pub fn value_of(&self, slot: usize) -> Option<i32> {
        self.stacks.get(slot).map(|s| s.value)
    }

    fn merge_slot(&self, item: &Item) -> Option<usize> {
        self.stacks.iter().position(|s| s.item.can_stack_with(item))
    }

    /// Whether [`StoreStock::carry`] would accept the item
    pub fn has_room_for(&self, item: &Item) -> bool {
        self.merge_slot(item).is_some() || !self.is_full()
    }

    /// Add an item, absorbing it into a similar stack (saturating at the
    /// stack cap) or inserting it in sorted position. Gives the item back
    /// when every slot is taken.
    pub fn carry(&mut self, item: Item, costs: &CostTable) -> Result<usize, Item> {
        if let Some(slot) = self.merge_slot(&item) {
            let stack = &mut self.stacks[slot].item;
            stack.number = (stack.number + item.number).min(self.stack_max);
            return Ok(slot);
        }
        if self.is_full() {
            return Err(item);
        }
        let mut item = item;
        item.number = item.number.min(self.stack_max);
        let value = object_value(&item, 1, costs);
        let stack = Stack { item, value };
        let slot = self
            .stacks
            .iter()
            .position(|s| stock_order(&stack, s) == Ordering::Less)
            .unwrap_or(self.stacks.len());
        self.stacks.insert(slot, stack);
        Ok(slot)
    }

    /// Remove up to `qty` units from a slot, compacting it away if it runs
    /// out
    pub fn take(&mut self, slot: usize, qty: i32) -> Option<Item> {
        if qty <= 0 {
            return None;
        }
        let stack = self.get(slot)?;
        let mut taken = stack.clone();
        taken.number = qty.min(stack.number);
        self.item_increase(slot, -taken.number);
        self.item_optimize(slot);
        Some(taken)
    }

    /// Change the count in a slot by `num`, clamped to `0..=stack cap`.
    /// Returns the new count. The slot is not removed; see
    /// [`StoreStock::item_optimize`].
    pub fn item_increase(&mut self, slot: usize, num: i32) -> Option<i32> {
        let stack_max = self.stack_max;
        let stack = &mut self.stacks.get_mut(slot)?.item;
        stack.number = (stack.number + num).clamp(0, stack_max);
        Some(stack.number)
    }

    /// Remove the slot if it has run out. Returns true if it was removed.
    pub fn item_optimize(&mut self, slot: usize) -> bool {
        match self.stacks.get(slot) {
            Some(stack) if stack.item.number <= 0 => {
                self.stacks.remove(slot);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{kind_by_name, SlayKind, Tval};

    fn item(name: &str, n: i32) -> Item {
        let mut it = Item::new(kind_by_name(name).unwrap()).unwrap();
        it.number = n;
        it.known = true;
        it
    }

    #[test]
    fn test_sorted_insertion() {
        let costs = CostTable::default();
        let mut stock = StoreStock::new(8, STORE_STACK_MAX);
        stock.carry(item("Potion of Speed", 1), &costs).unwrap();
        stock.carry(item("Long Sword", 1), &costs).unwrap();
        stock.carry(item("Arrow", 20), &costs).unwrap();
        stock.carry(item("Dagger", 1), &costs).unwrap();
        let tvals: Vec<_> = stock.iter().map(|i| i.tval).collect();
        assert_eq!(tvals, vec![Tval::Arrow, Tval::Sword, Tval::Sword, Tval::Potion]);
        assert_eq!(stock.get(1).unwrap().sval, 4);
    }

    #[test]
    fn test_better_enchantment_first() {
        let costs = CostTable::default();
        let mut stock = StoreStock::new(8, STORE_STACK_MAX);
        let mut good = item("Dagger", 1);
        good.to_h = 4;
        stock.carry(item("Dagger", 1), &costs).unwrap();
        assert_eq!(stock.carry(good, &costs), Ok(0));
        assert_eq!(stock.get(0).unwrap().to_h, 4);
    }

    #[test]
    fn test_more_valuable_first() {
        let costs = CostTable::default();
        let mut stock = StoreStock::new(8, STORE_STACK_MAX);
        let mut plain = item("Long Sword", 1);
        plain.to_h = 1;
        let mut holy = item("Long Sword", 1);
        holy.slays[SlayKind::Evil as usize] = 20;
        stock.carry(plain, &costs).unwrap();
        assert_eq!(stock.carry(holy, &costs), Ok(0));

        let values: Vec<i32> = (0..stock.len()).filter_map(|s| stock.value_of(s)).collect();
        assert_eq!(values.len(), 2);
        assert!(values[0] > values[1], "{:?}", values);
        assert_eq!(stock.get(0).unwrap().slays[SlayKind::Evil as usize], 20);
    }

    #[test]
    fn test_merge_saturates() {
        let costs = CostTable::default();
        let mut stock = StoreStock::new(2, STORE_STACK_MAX);
        stock.carry(item("Arrow", 80), &costs).unwrap();
        assert_eq!(stock.carry(item("Arrow", 40), &costs), Ok(0));
        assert_eq!(stock.len(), 1);
        assert_eq!(stock.get(0).unwrap().number, STORE_STACK_MAX);
    }

    #[test]
    fn test_full_stock_still_merges() {
        let costs = CostTable::default();
        let mut stock = StoreStock::new(1, STORE_STACK_MAX);
        stock.carry(item("Arrow", 5), &costs).unwrap();
        assert!(stock.has_room_for(&item("Arrow", 1)));
        assert!(!stock.has_room_for(&item("Bolt", 1)));
        assert!(stock.carry(item("Bolt", 1), &costs).is_err());
    }

    #[test]
    fn test_take_compacts() {
        let costs = CostTable::default();
        let mut stock = StoreStock::new(4, STORE_STACK_MAX);
        stock.carry(item("Arrow", 5), &costs).unwrap();
        stock.carry(item("Dagger", 1), &costs).unwrap();
        let taken = stock.take(0, 5).unwrap();
        assert_eq!(taken.number, 5);
        assert_eq!(stock.len(), 1);
        assert_eq!(stock.get(0).unwrap().tval, Tval::Sword);
        assert!(stock.take(0, 0).is_none());
    }

    #[test]
    fn test_item_increase_clamps() {
        let costs = CostTable::default();
        let mut stock = StoreStock::new(4, 10);
        stock.carry(item("Arrow", 5), &costs).unwrap();
        assert_eq!(stock.item_increase(0, 20), Some(10));
        assert_eq!(stock.item_increase(0, -30), Some(0));
        assert!(stock.item_optimize(0));
        assert!(stock.is_empty());
        assert_eq!(stock.item_increase(0, 1), None);
    }
}
