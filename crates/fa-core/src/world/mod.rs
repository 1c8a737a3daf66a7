//! World collaborators and error types
//!
//! The combat core does not own the map or the inventory. It talks to them
//! through the traits defined here.

mod arena;
mod container;
mod errors;
mod geometry;

pub use arena::{Arena, Field};
pub use container::{ItemContainer, Pack, PACK_STACK_MAX};
pub use errors::{ForgeError, MissileError, StoreError, TableError};
pub use geometry::{bresenham_path, Geometry, Grid, Terrain};
