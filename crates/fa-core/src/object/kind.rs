//! Object kinds (base item templates)
//!
//! The built-in kind list covers everything the combat engines, the artifact
//! forge and the stores need: melee weapons, launchers and their ammunition,
//! armour for every slot, and the cheap consumables stores stack.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::ObjectFlags;

/// Index into the kind table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KindId(pub u16);

/// Object type classifier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumIter,
)]
#[repr(u8)]
pub enum Tval {
    Skeleton = 1,
    Bottle = 2,
    Junk = 3,
    Spike = 5,
    Shot = 16,
    Arrow = 17,
    Bolt = 18,
    Bow = 19,
    Digger = 20,
    Hafted = 21,
    Polearm = 22,
    Sword = 23,
    Boots = 30,
    Gloves = 31,
    Helm = 32,
    Crown = 33,
    Shield = 34,
    Cloak = 35,
    SoftArmor = 36,
    HardArmor = 37,
    Light = 39,
    Amulet = 40,
    Ring = 45,
    Staff = 55,
    Wand = 65,
    Rod = 66,
    Scroll = 70,
    Potion = 75,
    Flask = 77,
    Food = 80,
    MagicBook = 90,
    PrayerBook = 91,
}

impl Tval {
    /// Ammunition fired from a launcher
    pub const fn is_ammo(self) -> bool {
        matches!(self, Tval::Shot | Tval::Arrow | Tval::Bolt)
    }

    /// Hand-held melee weapons (including diggers)
    pub const fn is_melee_weapon(self) -> bool {
        matches!(self, Tval::Digger | Tval::Hafted | Tval::Polearm | Tval::Sword)
    }

    /// Launchers
    pub const fn is_launcher(self) -> bool {
        matches!(self, Tval::Bow)
    }

    /// Worn armour of any slot
    pub const fn is_armour(self) -> bool {
        matches!(
            self,
            Tval::Boots
                | Tval::Gloves
                | Tval::Helm
                | Tval::Crown
                | Tval::Shield
                | Tval::Cloak
                | Tval::SoftArmor
                | Tval::HardArmor
        )
    }

    /// Edged weapons cut; everything else bludgeons
    pub const fn is_edged(self) -> bool {
        matches!(self, Tval::Sword | Tval::Polearm)
    }

    /// Whether instances vary in power (bonuses, properties) rather than
    /// being fully described by their kind
    pub const fn is_variable_power(self) -> bool {
        self.is_ammo()
            || self.is_melee_weapon()
            || self.is_launcher()
            || self.is_armour()
            || matches!(self, Tval::Light | Tval::Amulet | Tval::Ring)
    }

    /// Wands, staves and rods carry charges
    pub const fn is_charged(self) -> bool {
        matches!(self, Tval::Wand | Tval::Staff | Tval::Rod)
    }
}

/// Base item template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectKind {
    pub tval: Tval,
    pub sval: u8,
    pub name: &'static str,
    /// Native depth
    pub level: i32,
    /// Allocation weight; higher is more common, 0 never generates
    pub alloc: i32,
    /// Base value in gold
    pub cost: i32,
    pub dd: i32,
    pub ds: i32,
    pub ac: i32,
    /// Weight in tenth-pounds
    pub weight: i32,
    pub to_h: i32,
    pub to_d: i32,
    pub to_a: i32,
    /// Launcher multiplier, light radius or starting charges
    pub pval: i32,
    pub flags: ObjectFlags,
}

impl ObjectKind {
    const fn new(tval: Tval, sval: u8, name: &'static str, level: i32, alloc: i32, cost: i32) -> Self {
        Self {
            tval,
            sval,
            name,
            level,
            alloc,
            cost,
            dd: 0,
            ds: 0,
            ac: 0,
            weight: 10,
            to_h: 0,
            to_d: 0,
            to_a: 0,
            pval: 0,
            flags: ObjectFlags::empty(),
        }
    }

    const fn dice(mut self, dd: i32, ds: i32) -> Self {
        self.dd = dd;
        self.ds = ds;
        self
    }

    const fn armour(mut self, ac: i32) -> Self {
        self.ac = ac;
        self
    }

    const fn weighs(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }

    const fn pval(mut self, pval: i32) -> Self {
        self.pval = pval;
        self
    }

    const fn flags(mut self, flags: ObjectFlags) -> Self {
        self.flags = flags;
        self
    }

    const fn to_hit(mut self, to_h: i32) -> Self {
        self.to_h = to_h;
        self
    }

    /// Tval of the ammunition a launcher of this kind fires
    pub const fn ammo_tval(&self) -> Option<Tval> {
        match (self.tval, self.sval) {
            (Tval::Bow, 0..=9) => Some(Tval::Shot),
            (Tval::Bow, 10..=19) => Some(Tval::Arrow),
            (Tval::Bow, _) => Some(Tval::Bolt),
            _ => None,
        }
    }

    /// Raw damage potential of the base item, used to penalise unusually
    /// strong bases before artifact design
    pub const fn base_power(&self) -> i32 {
        if self.tval.is_armour() {
            self.ac
        } else {
            self.dd * self.ds
        }
    }
}

const fn k(tval: Tval, sval: u8, name: &'static str, level: i32, alloc: i32, cost: i32) -> ObjectKind {
    ObjectKind::new(tval, sval, name, level, alloc, cost)
}

const THROWN: ObjectFlags = ObjectFlags::THROWING;

/// The built-in kind table
pub static KINDS: &[ObjectKind] = &[
    // Ammunition
    k(Tval::Shot, 0, "Rounded Pebble", 0, 40, 1).dice(1, 2).weighs(4),
    k(Tval::Shot, 1, "Iron Shot", 3, 40, 2).dice(1, 4).weighs(5),
    k(Tval::Shot, 2, "Mithril Shot", 40, 5, 25).dice(3, 4).weighs(4),
    k(Tval::Arrow, 1, "Arrow", 3, 60, 1).dice(1, 4).weighs(2),
    k(Tval::Arrow, 2, "Mithril Arrow", 40, 5, 20).dice(3, 4).weighs(2),
    k(Tval::Arrow, 3, "Seeker Arrow", 55, 3, 30).dice(4, 4).weighs(2),
    k(Tval::Bolt, 1, "Bolt", 3, 50, 2).dice(1, 5).weighs(3),
    k(Tval::Bolt, 2, "Mithril Bolt", 45, 5, 25).dice(3, 5).weighs(3),
    k(Tval::Bolt, 3, "Seeker Bolt", 65, 3, 35).dice(4, 5).weighs(3),
    // Launchers
    k(Tval::Bow, 2, "Sling", 1, 40, 5).pval(2).weighs(5),
    k(Tval::Bow, 12, "Short Bow", 3, 40, 50).pval(2).weighs(30),
    k(Tval::Bow, 13, "Long Bow", 10, 30, 80).pval(3).weighs(40),
    k(Tval::Bow, 23, "Light Crossbow", 15, 25, 140).pval(3).weighs(60),
    k(Tval::Bow, 24, "Heavy Crossbow", 30, 15, 300).pval(4).weighs(200),
    // Diggers
    k(Tval::Digger, 1, "Shovel", 1, 10, 10).dice(1, 2).weighs(60),
    k(Tval::Digger, 4, "Pick", 5, 10, 50).dice(1, 3).weighs(150),
    // Hafted
    k(Tval::Hafted, 2, "Whip", 3, 40, 30).dice(1, 3).weighs(30),
    k(Tval::Hafted, 5, "Mace", 5, 40, 65).dice(2, 4).weighs(120),
    k(Tval::Hafted, 6, "Throwing Hammer", 10, 20, 90).dice(2, 3).weighs(70).flags(THROWN),
    k(Tval::Hafted, 8, "War Hammer", 10, 30, 225).dice(3, 3).weighs(120),
    k(Tval::Hafted, 12, "Morning Star", 10, 30, 396).dice(2, 6).weighs(150),
    k(Tval::Hafted, 13, "Flail", 10, 30, 353).dice(2, 6).weighs(150),
    k(Tval::Hafted, 15, "Lead-Filled Mace", 15, 20, 502).dice(3, 4).weighs(180),
    k(Tval::Hafted, 18, "Maul", 25, 15, 580).dice(4, 4).weighs(200),
    k(Tval::Hafted, 20, "Mace of Disruption", 80, 2, 4300).dice(5, 8).weighs(400),
    // Polearms
    k(Tval::Polearm, 2, "Spear", 5, 40, 36).dice(1, 6).weighs(50).flags(THROWN),
    k(Tval::Polearm, 3, "Awl-Pike", 8, 30, 340).dice(1, 8).weighs(160),
    k(Tval::Polearm, 4, "Trident", 10, 30, 120).dice(1, 10).weighs(70),
    k(Tval::Polearm, 5, "Pike", 15, 30, 358).dice(2, 5).weighs(160),
    k(Tval::Polearm, 8, "Beaked Axe", 15, 20, 408).dice(2, 6).weighs(180),
    k(Tval::Polearm, 10, "Glaive", 20, 20, 363).dice(2, 6).weighs(190),
    k(Tval::Polearm, 13, "Halberd", 25, 20, 430).dice(3, 5).weighs(190),
    k(Tval::Polearm, 15, "Great Axe", 40, 15, 500).dice(4, 4).weighs(230),
    k(Tval::Polearm, 17, "Scythe of Slicing", 60, 2, 3500).dice(8, 4).weighs(250),
    // Swords
    k(Tval::Sword, 4, "Dagger", 5, 60, 35).dice(1, 4).weighs(12).flags(THROWN),
    k(Tval::Sword, 5, "Main Gauche", 5, 40, 25).dice(1, 5).weighs(30),
    k(Tval::Sword, 7, "Rapier", 5, 40, 42).dice(1, 6).weighs(40),
    k(Tval::Sword, 10, "Short Sword", 5, 40, 80).dice(1, 7).weighs(80),
    k(Tval::Sword, 11, "Cutlass", 10, 30, 85).dice(1, 8).weighs(110),
    k(Tval::Sword, 12, "Tulwar", 10, 30, 200).dice(2, 4).weighs(100),
    k(Tval::Sword, 16, "Broad Sword", 15, 30, 255).dice(2, 5).weighs(150),
    k(Tval::Sword, 17, "Long Sword", 15, 30, 300).dice(2, 5).weighs(130),
    k(Tval::Sword, 20, "Katana", 25, 20, 400).dice(3, 5).weighs(120),
    k(Tval::Sword, 21, "Zweihander", 30, 15, 1500).dice(3, 6).weighs(280),
    k(Tval::Sword, 28, "Executioner's Sword", 45, 10, 850).dice(4, 5).weighs(260),
    k(Tval::Sword, 30, "Blade of Chaos", 70, 2, 4000)
        .dice(6, 5)
        .weighs(180)
        .flags(ObjectFlags::CHAOTIC),
    // Boots
    k(Tval::Boots, 2, "Pair of Soft Leather Boots", 3, 40, 4).armour(2).weighs(20),
    k(Tval::Boots, 3, "Pair of Hard Leather Boots", 5, 40, 12).armour(3).weighs(40),
    k(Tval::Boots, 6, "Pair of Metal Shod Boots", 20, 20, 50).armour(6).weighs(80),
    // Gloves
    k(Tval::Gloves, 1, "Set of Leather Gloves", 1, 40, 3).armour(1).weighs(5),
    k(Tval::Gloves, 2, "Set of Gauntlets", 10, 30, 35).armour(3).weighs(25),
    k(Tval::Gloves, 5, "Set of Cesti", 40, 10, 100).armour(5).weighs(40),
    // Helms and crowns
    k(Tval::Helm, 2, "Hard Leather Cap", 2, 40, 12).armour(2).weighs(15),
    k(Tval::Helm, 3, "Metal Cap", 10, 30, 30).armour(3).weighs(20),
    k(Tval::Helm, 5, "Iron Helm", 20, 20, 75).armour(7).weighs(75),
    k(Tval::Helm, 6, "Steel Helm", 40, 10, 200).armour(9).weighs(60),
    k(Tval::Crown, 10, "Iron Crown", 45, 5, 500).weighs(20),
    k(Tval::Crown, 11, "Golden Crown", 45, 3, 1000).weighs(30),
    // Shields
    k(Tval::Shield, 1, "Wicker Shield", 2, 40, 10).armour(2).dice(1, 2).weighs(30),
    k(Tval::Shield, 2, "Small Metal Shield", 10, 30, 50).armour(5).dice(1, 3).weighs(65),
    k(Tval::Shield, 3, "Leather Shield", 15, 30, 40).armour(8).dice(1, 2).weighs(90),
    k(Tval::Shield, 5, "Large Metal Shield", 30, 15, 200).armour(12).dice(1, 5).weighs(120),
    k(Tval::Shield, 10, "Mithril Shield", 70, 2, 4000).armour(36).dice(1, 6).weighs(100),
    // Cloaks
    k(Tval::Cloak, 1, "Cloak", 1, 60, 3).armour(1).weighs(10),
    k(Tval::Cloak, 2, "Fur Cloak", 5, 30, 50).armour(3).weighs(20),
    k(Tval::Cloak, 3, "Elven Cloak", 30, 10, 1500).armour(4).weighs(5),
    // Body armour
    k(Tval::SoftArmor, 2, "Robe", 1, 40, 4).armour(2).weighs(20),
    k(Tval::SoftArmor, 4, "Soft Leather Armour", 3, 40, 18).armour(8).weighs(80),
    k(Tval::SoftArmor, 8, "Leather Scale Mail", 15, 30, 160).armour(12).weighs(140),
    k(Tval::HardArmor, 1, "Metal Scale Mail", 25, 20, 550).armour(18).weighs(250).to_hit(-2),
    k(Tval::HardArmor, 2, "Chain Mail", 25, 20, 750).armour(22).weighs(220).to_hit(-2),
    k(Tval::HardArmor, 5, "Augmented Chain Mail", 30, 15, 900).armour(26).weighs(270).to_hit(-2),
    k(Tval::HardArmor, 12, "Full Plate Armour", 45, 10, 3000).armour(34).weighs(380).to_hit(-3),
    k(Tval::HardArmor, 20, "Mithril Plate Mail", 65, 2, 15000).armour(40).weighs(300).to_hit(-1),
    // Lights
    k(Tval::Light, 0, "Wooden Torch", 1, 70, 1).pval(2).weighs(30),
    k(Tval::Light, 1, "Lantern", 5, 40, 100).pval(2).weighs(50),
    // Jewellery
    k(Tval::Ring, 0, "Ring of Protection", 10, 20, 500),
    k(Tval::Ring, 1, "Ring of Flames", 50, 5, 3000),
    k(Tval::Ring, 2, "Ring of Accuracy", 20, 15, 500),
    k(Tval::Amulet, 0, "Amulet of Slow Digestion", 15, 20, 200),
    // Consumables
    k(Tval::Spike, 0, "Iron Spike", 1, 20, 1).dice(1, 1).weighs(10),
    k(Tval::Flask, 0, "Flask of Oil", 1, 40, 3).dice(2, 6).weighs(10),
    k(Tval::Food, 0, "Ration of Food", 0, 60, 3).weighs(8),
    k(Tval::Food, 1, "Slime Mold", 1, 40, 2).weighs(5),
    k(Tval::Food, 2, "Flask of Whisky", 1, 20, 1).weighs(4),
    k(Tval::Potion, 0, "Potion of Cure Light Wounds", 1, 60, 20).weighs(4),
    k(Tval::Potion, 1, "Potion of Cure Serious Wounds", 3, 40, 40).weighs(4),
    k(Tval::Potion, 2, "Potion of Speed", 1, 20, 75).weighs(4),
    k(Tval::Potion, 3, "Potion of Restore Mana", 25, 10, 350).weighs(4),
    k(Tval::Scroll, 0, "Scroll of Phase Door", 1, 60, 15).weighs(5),
    k(Tval::Scroll, 1, "Scroll of Word of Recall", 15, 40, 150).weighs(5),
    k(Tval::Scroll, 2, "Scroll of Identify Rune", 5, 40, 50).weighs(5),
    k(Tval::Scroll, 3, "Scroll of Enchant Weapon", 15, 20, 125).weighs(5),
    k(Tval::Wand, 0, "Wand of Magic Missile", 3, 40, 100).pval(10).weighs(10),
    k(Tval::Wand, 1, "Wand of Stinking Cloud", 5, 40, 400).pval(8).weighs(10),
    k(Tval::Staff, 0, "Staff of Detect Evil", 5, 40, 350).pval(15).weighs(50),
    k(Tval::Staff, 1, "Staff of Teleportation", 20, 20, 2000).pval(6).weighs(50),
    k(Tval::Rod, 0, "Rod of Treasure Location", 5, 40, 1000).pval(1).weighs(15),
    k(Tval::Rod, 1, "Rod of Illumination", 20, 30, 1500).pval(1).weighs(15),
    k(Tval::MagicBook, 0, "Magic for Beginners", 1, 40, 25).weighs(30),
    k(Tval::PrayerBook, 0, "Novice's Handbook", 1, 40, 25).weighs(30),
    k(Tval::Bottle, 0, "Empty Bottle", 0, 10, 0).weighs(2),
    k(Tval::Skeleton, 0, "Broken Skull", 0, 10, 0).weighs(10),
    k(Tval::Junk, 0, "Shard of Pottery", 0, 10, 0).weighs(5),
];

/// Look up a kind by id
pub fn kind(id: KindId) -> Option<&'static ObjectKind> {
    KINDS.get(id.0 as usize)
}

/// Find the kind with the given type and subtype
pub fn lookup_kind(tval: Tval, sval: u8) -> Option<KindId> {
    KINDS
        .iter()
        .position(|k| k.tval == tval && k.sval == sval)
        .map(|i| KindId(i as u16))
}

/// Find a kind by its exact name
pub fn kind_by_name(name: &str) -> Option<KindId> {
    KINDS
        .iter()
        .position(|k| k.name == name)
        .map(|i| KindId(i as u16))
}

/// Iterate over all kinds with their ids
pub fn all_kinds() -> impl Iterator<Item = (KindId, &'static ObjectKind)> {
    KINDS.iter().enumerate().map(|(i, k)| (KindId(i as u16), k))
}
