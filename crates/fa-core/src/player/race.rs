//! Player races

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter};

/// Races of players and shopkeepers
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
    EnumCount,
)]
#[repr(u8)]
pub enum Race {
    #[default]
    Human = 0,
    #[strum(serialize = "Half-Elf")]
    HalfElf = 1,
    Elf = 2,
    Hobbit = 3,
    Gnome = 4,
    Dwarf = 5,
    #[strum(serialize = "Half-Orc")]
    HalfOrc = 6,
    #[strum(serialize = "Half-Troll")]
    HalfTroll = 7,
    Dunadan = 8,
    #[strum(serialize = "High-Elf")]
    HighElf = 9,
    Kobold = 10,
}

impl Race {
    /// Base skills (melee, bow, throw) before level scaling
    pub const fn base_skills(self) -> (i32, i32, i32) {
        match self {
            Race::Human => (0, 0, 0),
            Race::HalfElf => (-1, 5, 5),
            Race::Elf => (-5, 15, 15),
            Race::Hobbit => (-10, 20, 20),
            Race::Gnome => (-8, 12, 12),
            Race::Dwarf => (15, 0, 0),
            Race::HalfOrc => (12, -5, -5),
            Race::HalfTroll => (20, -10, -10),
            Race::Dunadan => (15, 10, 10),
            Race::HighElf => (10, 25, 25),
            Race::Kobold => (-5, 10, 10),
        }
    }
}
