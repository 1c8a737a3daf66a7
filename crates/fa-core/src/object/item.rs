//! Object instances
//!
//! An [`Item`] is owned by exactly one container (inventory slot, monster,
//! floor pile, store stock). Slay and brand arrays hold x10 multipliers with
//! [`MULTIPLE_BASE`] meaning "no bonus".

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::kind::{kind, KindId, ObjectKind, Tval};
use super::properties::*;
use super::ArtifactId;

/// Ego item identities that the combat engines react to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum EgoKind {
    /// Launcher that sometimes hits with extra force
    Velocity,
    /// Launcher that sometimes guides its missile past armour
    Accuracy,
    /// Launcher with extra might
    ExtraMight,
    /// Launcher with extra shots
    ExtraShots,
    /// Melee weapon of westernesse style power
    Westernesse,
    /// Holy avenger
    Blessed,
    /// Slay or brand egos
    SlayEvil,
    SlayUndead,
    BrandFire,
    BrandCold,
    /// Armour of resistance
    Resistance,
}

/// Activations an artifact can carry
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Activation {
    FireBolt,
    FrostBolt,
    LightningBolt,
    AcidBolt,
    StinkingCloud,
    FireBall,
    FrostBall,
    DispelUndead,
    DispelEvil,
    Heal,
    CureWounds,
    Protection,
    Resistance,
    Teleport,
    Recall,
    Light,
    MapArea,
    Haste,
    Berserk,
    Detection,
}

impl Activation {
    /// Power of the activation, charged against an artifact's potential
    pub const fn power(self) -> i32 {
        match self {
            Activation::Light | Activation::StinkingCloud => 200,
            Activation::CureWounds | Activation::MapArea => 300,
            Activation::FireBolt
            | Activation::FrostBolt
            | Activation::LightningBolt
            | Activation::AcidBolt => 350,
            Activation::Berserk | Activation::Recall => 400,
            Activation::Teleport | Activation::Detection => 500,
            Activation::FireBall | Activation::FrostBall | Activation::Protection => 650,
            Activation::Resistance | Activation::DispelUndead => 700,
            Activation::Heal | Activation::DispelEvil => 900,
            Activation::Haste => 1200,
        }
    }
}

/// An object instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub kind: KindId,
    pub tval: Tval,
    pub sval: u8,
    /// Stack size
    pub number: i32,
    pub weight: i32,

    pub dd: i32,
    pub ds: i32,
    pub ac: i32,
    pub to_h: i32,
    pub to_d: i32,
    pub to_a: i32,

    pub stats: [i32; STAT_MAX],
    pub bonuses: [i32; BONUS_MAX],
    /// Percentage resistances (100 = immune, negative = vulnerable)
    pub resists: [i32; ELEMENT_MAX],
    pub slays: [u8; SLAY_MAX],
    pub brands: [u8; BRAND_MAX],
    pub flags: ObjectFlags,
    pub curses: CurseFlags,

    /// Launcher multiplier, light radius, or charges for wands and staves
    pub pval: i32,
    /// Store discount percentage
    pub discount: i32,

    pub artifact: Option<ArtifactId>,
    pub ego: Option<EgoKind>,
    pub activation: Option<Activation>,
    pub known: bool,
    pub inscription: Option<String>,
}

impl Item {
    /// Create a single, plain instance of a kind
    pub fn from_kind(id: KindId, k: &ObjectKind) -> Self {
        Self {
            kind: id,
            tval: k.tval,
            sval: k.sval,
            number: 1,
            weight: k.weight,
            dd: k.dd,
            ds: k.ds,
            ac: k.ac,
            to_h: k.to_h,
            to_d: k.to_d,
            to_a: k.to_a,
            stats: [0; STAT_MAX],
            bonuses: [0; BONUS_MAX],
            resists: [0; ELEMENT_MAX],
            slays: [MULTIPLE_BASE; SLAY_MAX],
            brands: [MULTIPLE_BASE; BRAND_MAX],
            flags: k.flags,
            curses: CurseFlags::empty(),
            pval: k.pval,
            discount: 0,
            artifact: None,
            ego: None,
            activation: None,
            known: false,
            inscription: None,
        }
    }

    /// Create an instance by kind id, `None` if the id is unknown
    pub fn new(id: KindId) -> Option<Self> {
        kind(id).map(|k| Self::from_kind(id, k))
    }

    /// The kind template of this item
    pub fn object_kind(&self) -> Option<&'static ObjectKind> {
        kind(self.kind)
    }

    pub fn is_ammo(&self) -> bool {
        self.tval.is_ammo()
    }

    pub fn is_melee_weapon(&self) -> bool {
        self.tval.is_melee_weapon()
    }

    pub fn is_launcher(&self) -> bool {
        self.tval.is_launcher()
    }

    pub fn is_artifact(&self) -> bool {
        self.artifact.is_some()
    }

    /// Weapons designed to be thrown
    pub fn is_throwing_weapon(&self) -> bool {
        self.flags.contains(ObjectFlags::THROWING)
    }

    pub fn is_cursed(&self) -> bool {
        !self.curses.is_empty()
    }

    pub fn stat(&self, stat: Stat) -> i32 {
        self.stats[stat as usize]
    }

    pub fn bonus(&self, bonus: Bonus) -> i32 {
        self.bonuses[bonus as usize]
    }

    pub fn resist(&self, element: Element) -> i32 {
        self.resists[element as usize]
    }

    pub fn slay(&self, slay: SlayKind) -> u8 {
        self.slays[slay as usize]
    }

    pub fn brand(&self, brand: BrandKind) -> u8 {
        self.brands[brand as usize]
    }

    /// Launcher damage multiplier including any extra might
    pub fn multiplier(&self) -> i32 {
        if !self.is_launcher() {
            return 1;
        }
        let might = if self.ego == Some(EgoKind::ExtraMight) { 1 } else { 0 };
        (self.pval + self.bonus(Bonus::Might) + might).max(1)
    }

    /// Tval of the ammunition this launcher fires
    pub fn ammo_tval(&self) -> Option<Tval> {
        self.object_kind().and_then(|k| k.ammo_tval())
    }

    /// Whether this ammunition can be fired from `launcher`
    pub fn fits_launcher(&self, launcher: &Item) -> bool {
        self.is_ammo() && launcher.ammo_tval() == Some(self.tval)
    }

    /// Whether any slay or brand is active
    pub fn has_multipliers(&self) -> bool {
        self.slays.iter().chain(self.brands.iter()).any(|&m| m > MULTIPLE_BASE)
    }

    /// Whether the item carries any magical property at all
    pub fn has_properties(&self) -> bool {
        let base = self.object_kind();
        let base_flags = base.map(|k| k.flags).unwrap_or_default();
        let base_to = base.map(|k| (k.to_h, k.to_d, k.to_a)).unwrap_or_default();
        self.stats.iter().any(|&v| v != 0)
            || self.bonuses.iter().any(|&v| v != 0)
            || self.resists.iter().any(|&v| v != 0)
            || self.has_multipliers()
            || self.flags != base_flags
            || !self.curses.is_empty()
            || self.activation.is_some()
            || (self.to_h, self.to_d, self.to_a) != base_to
    }

    /// Short description for messages, e.g. "3 x Arrow (+2,+4)"
    pub fn describe(&self) -> String {
        let name = self.object_kind().map(|k| k.name).unwrap_or("thing");
        let mut desc = if self.number > 1 {
            format!("{} x {}", self.number, name)
        } else {
            name.to_string()
        };
        if let Some(inscription) = &self.inscription {
            desc.push_str(&format!(" {{{}}}", inscription));
        }
        if self.known && (self.is_ammo() || self.is_melee_weapon() || self.is_launcher()) {
            desc.push_str(&format!(" ({:+},{:+})", self.to_h, self.to_d));
        }
        desc
    }

    /// Whether two items can share a stack
    pub fn can_stack_with(&self, other: &Item) -> bool {
        if self.is_artifact() || other.is_artifact() {
            return false;
        }
        let mut a = self.clone();
        let mut b = other.clone();
        a.number = 0;
        b.number = 0;
        a == b
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::kind::kind_by_name;

    fn item(name: &str) -> Item {
        Item::new(kind_by_name(name).unwrap()).unwrap()
    }

    #[test]
    fn test_from_kind_copies_base() {
        let sword = item("Long Sword");
        assert_eq!((sword.dd, sword.ds), (2, 5));
        assert_eq!(sword.slay(SlayKind::Orc), MULTIPLE_BASE);
        assert!(!sword.has_properties());
    }

    #[test]
    fn test_multiplier() {
        let mut bow = item("Long Bow");
        assert_eq!(bow.multiplier(), 3);
        bow.ego = Some(EgoKind::ExtraMight);
        assert_eq!(bow.multiplier(), 4);
        assert_eq!(item("Dagger").multiplier(), 1);
    }

    #[test]
    fn test_fits_launcher() {
        let bow = item("Short Bow");
        assert!(item("Arrow").fits_launcher(&bow));
        assert!(!item("Bolt").fits_launcher(&bow));
    }

    #[test]
    fn test_can_stack_with() {
        let mut a = item("Arrow");
        let mut b = item("Arrow");
        a.number = 10;
        b.number = 4;
        assert!(a.can_stack_with(&b));
        b.to_h = 3;
        assert!(!a.can_stack_with(&b));
    }

    #[test]
    fn test_describe() {
        let mut a = item("Arrow");
        a.number = 3;
        a.to_h = 2;
        a.to_d = 4;
        assert_eq!(a.describe(), "3 x Arrow");
        a.known = true;
        assert_eq!(a.describe(), "3 x Arrow (+2,+4)");
    }

    #[test]
    fn test_has_properties() {
        let mut cloak = item("Cloak");
        cloak.resists[Element::Fire as usize] = 30;
        assert!(cloak.has_properties());
        let mut dagger = item("Dagger");
        dagger.slays[SlayKind::Orc as usize] = 20;
        assert!(dagger.has_multipliers());
    }
}
