#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod board;
#[cfg(feature = "std")]
pub mod cli;
mod common;
mod config;
mod game;
mod layout;
#[cfg(feature = "std")]
mod logging;
pub mod placement;
pub mod policy;
pub mod prelude;
mod ship;

pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
pub use layout::{GridLayout, OPPONENT_LAYOUT, PLAYER_LAYOUT};
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use placement::{random_fleet, random_placement, Occupancy};
pub use policy::{OpponentPolicy, RandomPolicy};
pub use ship::*;
