//! Worn and wielded items

use serde::{Deserialize, Serialize};

use crate::object::Item;
use crate::world::Pack;

/// Number of quiver slots
pub const QUIVER_SIZE: usize = 10;

/// Equipment slots the combat engines read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub bow: Option<Item>,
    pub rings: [Option<Item>; 2],
    pub shield: Option<Item>,
    /// A slung shield cannot be used to bash
    pub shield_slung: bool,
    pub light: Option<Item>,
    pub quiver: Pack,
}

impl Default for Equipment {
    fn default() -> Self {
        Self {
            weapon: None,
            bow: None,
            rings: [None, None],
            shield: None,
            shield_slung: false,
            light: None,
            quiver: Pack::new(QUIVER_SIZE),
        }
    }
}

impl Equipment {
    /// Worn rings
    pub fn rings(&self) -> impl Iterator<Item = &Item> {
        self.rings.iter().flatten()
    }

    /// The shield, if it is ready to bash with
    pub fn bash_shield(&self) -> Option<&Item> {
        if self.shield_slung {
            None
        } else {
            self.shield.as_ref()
        }
    }

    /// Light radius carried
    pub fn light_radius(&self) -> i32 {
        self.light.as_ref().map(|l| l.pval.max(0)).unwrap_or(0)
    }
}
