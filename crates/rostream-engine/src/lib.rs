//! Roster primitives and lineup slotting for fantasy basketball streaming.
//!
//! - [`core`]: slots, players and daily lineups
//! - [`schedule`]: which teams play on which day of a week
//! - [`slotting`]: optimal single-day assignment of players to slots
//! - [`setup`]: one-time split of a roster into core players and streamers

pub use self::{core::*, schedule::*, setup::*};

pub mod core;
pub mod schedule;
pub mod setup;
pub mod slotting;
