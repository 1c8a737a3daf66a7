//! Item containers
//!
//! The engines move items through [`ItemContainer`] and never reach into a
//! container's layout. [`Pack`] is the player's inventory and quiver.

use serde::{Deserialize, Serialize};

use crate::object::Item;

/// Largest stack a pack slot holds
pub const PACK_STACK_MAX: i32 = 40;

/// Item-container collaborator
pub trait ItemContainer {
    fn get(&self, slot: usize) -> Option<&Item>;

    /// Remove up to `qty` units from a slot. Returns `None` if the slot is
    /// empty or `qty` is not positive.
    fn take(&mut self, slot: usize, qty: i32) -> Option<Item>;

    /// Add an item, merging with a compatible stack where possible. Gives
    /// the item back if there is no room.
    fn put(&mut self, item: Item) -> Result<usize, Item>;

    fn describe(&self, slot: usize) -> Option<String> {
        self.get(slot).map(Item::describe)
    }
}

/// A simple ordered list of stacks with a slot limit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pack {
    items: Vec<Item>,
    capacity: usize,
}

impl Pack {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    fn merge_slot(&self, item: &Item) -> Option<usize> {
        self.items
            .iter()
            .position(|s| s.can_stack_with(item) && s.number + item.number <= PACK_STACK_MAX)
    }

    /// Whether [`ItemContainer::put`] would accept the item
    pub fn has_room_for(&self, item: &Item) -> bool {
        self.merge_slot(item).is_some() || self.items.len() < self.capacity
    }
}

impl ItemContainer for Pack {
    fn get(&self, slot: usize) -> Option<&Item> {
        self.items.get(slot)
    }

    fn take(&mut self, slot: usize, qty: i32) -> Option<Item> {
        if qty <= 0 {
            return None;
        }
        let stack = self.items.get_mut(slot)?;
        if qty >= stack.number {
            return Some(self.items.remove(slot));
        }
        let mut split = stack.clone();
        split.number = qty;
        stack.number -= qty;
        Some(split)
    }

    fn put(&mut self, item: Item) -> Result<usize, Item> {
        if let Some(slot) = self.merge_slot(&item) {
            self.items[slot].number += item.number;
            return Ok(slot);
        }
        if self.items.len() >= self.capacity {
            return Err(item);
        }
        self.items.push(item);
        Ok(self.items.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::kind_by_name;

    fn arrows(n: i32) -> Item {
        let mut item = Item::new(kind_by_name("Arrow").unwrap()).unwrap();
        item.number = n;
        item
    }

    #[test]
    fn test_put_merges() {
        let mut pack = Pack::new(2);
        assert_eq!(pack.put(arrows(10)), Ok(0));
        assert_eq!(pack.put(arrows(5)), Ok(0));
        assert_eq!(pack.get(0).unwrap().number, 15);
    }

    #[test]
    fn test_put_full() {
        let mut pack = Pack::new(1);
        pack.put(arrows(1)).unwrap();
        let dagger = Item::new(kind_by_name("Dagger").unwrap()).unwrap();
        assert!(!pack.has_room_for(&dagger));
        assert!(pack.has_room_for(&arrows(3)));
        assert!(pack.put(dagger).is_err());
    }

    #[test]
    fn test_take_splits() {
        let mut pack = Pack::new(4);
        pack.put(arrows(10)).unwrap();
        let one = pack.take(0, 1).unwrap();
        assert_eq!(one.number, 1);
        assert_eq!(pack.get(0).unwrap().number, 9);
        let rest = pack.take(0, 20).unwrap();
        assert_eq!(rest.number, 9);
        assert!(pack.is_empty());
        assert!(pack.take(0, 1).is_none());
    }
}
