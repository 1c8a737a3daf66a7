//! fa-core: combat, random artifacts and the store economy
//!
//! This crate holds the game rules with no I/O. Every random draw goes
//! through a [`RandomSource`] and every numeric table is passed in as
//! [`tables::GameTables`], so the same inputs and seed always give the
//! same result.

pub mod combat;
pub mod fixed;
pub mod monster;
pub mod object;
pub mod player;
pub mod randart;
pub mod store;
pub mod tables;
pub mod world;

pub use fa_rng::{GameRng, RandomSource, ScriptedRng};
