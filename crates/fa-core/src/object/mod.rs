//! Object system
//!
//! Contains object kinds (templates), instances, artifacts and the property
//! vocabulary shared by combat, artifact design and pricing.

mod artifact;
pub mod kind;
mod item;
mod properties;

pub use artifact::{Artifact, ArtifactId, ArtifactTable, SetBonus, SetId};
pub use item::{Activation, EgoKind, Item};
pub use kind::{all_kinds, kind, kind_by_name, lookup_kind, KindId, ObjectKind, Tval, KINDS};
pub use properties::{
    Bonus, BrandKind, CurseFlags, Element, ObjectFlags, ObjectProperty, SlayKind, Stat, BONUS_MAX,
    BRAND_MAX, ELEMENT_MAX, MULTIPLE_BASE, SLAY_MAX, STAT_MAX,
};
