//! Monster system
//!
//! Contains monster races (templates) and instances.

mod monst;
mod race;

pub use monst::{Monster, TakeHit};
pub use race::{MonsterRace, RaceFlags};

/// Reference to a monster held by an arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonsterIdx(pub usize);
