//! Artifact templates and the persisted artifact table
//!
//! An artifact is designed once (see `randart`) and then persists for the
//! session. Its core stats are frozen after naming; the only later mutation
//! is applying a set bonus, which is recorded so it happens once.

use serde::{Deserialize, Serialize};

use super::item::{Activation, Item};
use super::kind::{lookup_kind, Tval};
use super::properties::*;
use crate::world::ForgeError;

/// Index into the artifact table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtifactId(pub u16);

/// Identifier of an item set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SetId(pub u8);

/// Bonus granted when every member of a set is worn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetBonus {
    pub set: SetId,
    pub stats: [i32; STAT_MAX],
    pub resists: [i32; ELEMENT_MAX],
    pub flags: ObjectFlags,
}

/// A generated artifact definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub name: String,
    pub tval: Tval,
    pub sval: u8,
    pub weight: i32,
    pub dd: i32,
    pub ds: i32,
    pub ac: i32,
    pub to_h: i32,
    pub to_d: i32,
    pub to_a: i32,
    pub resists: [i32; ELEMENT_MAX],
    pub stats: [i32; STAT_MAX],
    pub bonuses: [i32; BONUS_MAX],
    pub slays: [u8; SLAY_MAX],
    pub brands: [u8; BRAND_MAX],
    pub curses: CurseFlags,
    pub flags: ObjectFlags,
    pub level: i32,
    pub rarity: i32,
    pub activation: Option<Activation>,
    pub created: bool,
    pub seen: bool,
    pub set: Option<SetId>,
    pub set_bonus_applied: bool,
    /// Launcher multiplier or light radius carried over from the base
    pub pval: i32,
}

impl Artifact {
    /// Start a design from a plain base item
    pub fn from_base(base: &Item) -> Self {
        Self {
            name: String::new(),
            tval: base.tval,
            sval: base.sval,
            weight: base.weight,
            dd: base.dd,
            ds: base.ds,
            ac: base.ac,
            to_h: base.to_h,
            to_d: base.to_d,
            to_a: base.to_a,
            resists: base.resists,
            stats: base.stats,
            bonuses: base.bonuses,
            slays: base.slays,
            brands: base.brands,
            curses: base.curses,
            flags: base.flags,
            level: 0,
            rarity: 0,
            activation: None,
            created: false,
            seen: false,
            set: None,
            set_bonus_applied: false,
            pval: base.pval,
        }
    }

    pub fn is_cursed(&self) -> bool {
        !self.curses.is_empty()
    }

    /// Whether any magical property beyond the base item is present
    pub fn has_properties(&self, base: &Item) -> bool {
        self.stats.iter().any(|&v| v != 0)
            || self.bonuses.iter().any(|&v| v != 0)
            || self.resists.iter().any(|&v| v != 0)
            || self.slays.iter().chain(self.brands.iter()).any(|&m| m > MULTIPLE_BASE)
            || self.flags != base.flags
            || !self.curses.is_empty()
            || self.activation.is_some()
            || (self.to_h, self.to_d, self.to_a) != (base.to_h, base.to_d, base.to_a)
    }

    /// Build the in-game item for this artifact
    pub fn instantiate(&self, id: ArtifactId) -> Option<Item> {
        let kind_id = lookup_kind(self.tval, self.sval)?;
        let mut item = Item::new(kind_id)?;
        item.weight = self.weight;
        item.dd = self.dd;
        item.ds = self.ds;
        item.ac = self.ac;
        item.to_h = self.to_h;
        item.to_d = self.to_d;
        item.to_a = self.to_a;
        item.resists = self.resists;
        item.stats = self.stats;
        item.bonuses = self.bonuses;
        item.slays = self.slays;
        item.brands = self.brands;
        item.curses = self.curses;
        item.flags = self.flags;
        item.activation = self.activation;
        item.pval = self.pval;
        item.artifact = Some(id);
        Some(item)
    }

    /// Apply a set bonus once. Returns false if it was already applied or
    /// the artifact does not belong to that set.
    pub fn apply_set_bonus(&mut self, bonus: &SetBonus) -> bool {
        if self.set_bonus_applied || self.set != Some(bonus.set) {
            return false;
        }
        for (mine, add) in self.stats.iter_mut().zip(bonus.stats.iter()) {
            *mine += add;
        }
        for (mine, add) in self.resists.iter_mut().zip(bonus.resists.iter()) {
            *mine = (*mine + add).clamp(-100, 100);
        }
        self.flags |= bonus.flags;
        self.set_bonus_applied = true;
        true
    }

    /// Remove a previously applied set bonus
    pub fn remove_set_bonus(&mut self, bonus: &SetBonus) -> bool {
        if !self.set_bonus_applied || self.set != Some(bonus.set) {
            return false;
        }
        for (mine, add) in self.stats.iter_mut().zip(bonus.stats.iter()) {
            *mine -= add;
        }
        for (mine, add) in self.resists.iter_mut().zip(bonus.resists.iter()) {
            *mine = (*mine - add).clamp(-100, 100);
        }
        self.flags.remove(bonus.flags);
        self.set_bonus_applied = false;
        true
    }
}

/// Fixed-capacity artifact table, part of the saved session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactTable {
    slots: Vec<Option<Artifact>>,
    capacity: usize,
}

impl ArtifactTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store an artifact in the first free slot
    pub fn insert(&mut self, artifact: Artifact) -> Result<ArtifactId, ForgeError> {
        if let Some(idx) = self.slots.iter().position(|s| s.is_none()) {
            self.slots[idx] = Some(artifact);
            return Ok(ArtifactId(idx as u16));
        }
        if self.slots.len() >= self.capacity {
            return Err(ForgeError::TableFull {
                capacity: self.capacity,
            });
        }
        self.slots.push(Some(artifact));
        Ok(ArtifactId((self.slots.len() - 1) as u16))
    }

    pub fn get(&self, id: ArtifactId) -> Option<&Artifact> {
        self.slots.get(id.0 as usize).and_then(|s| s.as_ref())
    }

    pub fn get_mut(&mut self, id: ArtifactId) -> Option<&mut Artifact> {
        self.slots.get_mut(id.0 as usize).and_then(|s| s.as_mut())
    }

    /// Mark an artifact as having been generated in the world
    pub fn mark_created(&mut self, id: ArtifactId) -> bool {
        match self.get_mut(id) {
            Some(a) if !a.created => {
                a.created = true;
                true
            }
            _ => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ArtifactId, &Artifact)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|a| (ArtifactId(i as u16), a)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::kind::kind_by_name;

    fn base(name: &str) -> Item {
        Item::new(kind_by_name(name).unwrap()).unwrap()
    }

    #[test]
    fn test_instantiate_roundtrip() {
        let mut art = Artifact::from_base(&base("Long Sword"));
        art.name = "'Glimmer'".to_string();
        art.to_h = 10;
        art.slays[SlayKind::Orc as usize] = 20;
        let item = art.instantiate(ArtifactId(3)).unwrap();
        assert_eq!(item.to_h, 10);
        assert_eq!(item.slay(SlayKind::Orc), 20);
        assert_eq!(item.artifact, Some(ArtifactId(3)));
    }

    #[test]
    fn test_table_capacity() {
        let mut table = ArtifactTable::new(2);
        let art = Artifact::from_base(&base("Dagger"));
        assert_eq!(table.insert(art.clone()).unwrap(), ArtifactId(0));
        assert_eq!(table.insert(art.clone()).unwrap(), ArtifactId(1));
        assert!(matches!(
            table.insert(art),
            Err(ForgeError::TableFull { capacity: 2 })
        ));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_mark_created_once() {
        let mut table = ArtifactTable::new(4);
        let id = table.insert(Artifact::from_base(&base("Cloak"))).unwrap();
        assert!(table.mark_created(id));
        assert!(!table.mark_created(id));
    }

    #[test]
    fn test_set_bonus_applied_once() {
        let mut art = Artifact::from_base(&base("Set of Gauntlets"));
        art.set = Some(SetId(1));
        let bonus = SetBonus {
            set: SetId(1),
            stats: [1, 0, 0, 2, 0, 0],
            resists: [0; ELEMENT_MAX],
            flags: ObjectFlags::FREE_ACT,
        };
        assert!(art.apply_set_bonus(&bonus));
        assert!(!art.apply_set_bonus(&bonus));
        assert_eq!(art.stats[Stat::Dex as usize], 2);
        assert!(art.flags.contains(ObjectFlags::FREE_ACT));
        assert!(art.remove_set_bonus(&bonus));
        assert_eq!(art.stats[Stat::Dex as usize], 0);
    }

    #[test]
    fn test_wrong_set_rejected() {
        let mut art = Artifact::from_base(&base("Cloak"));
        art.set = Some(SetId(2));
        let bonus = SetBonus {
            set: SetId(1),
            stats: [0; STAT_MAX],
            resists: [0; ELEMENT_MAX],
            flags: ObjectFlags::empty(),
        };
        assert!(!art.apply_set_bonus(&bonus));
    }
}
