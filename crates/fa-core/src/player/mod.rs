//! Player system
//!
//! Contains the player character, race, specialties and equipment.

mod character;
mod equipment;
mod race;
mod specialty;

pub use character::{Player, PACK_SIZE};
pub use equipment::{Equipment, QUIVER_SIZE};
pub use race::Race;
pub use specialty::{SpecialAttack, Specialty};
