//! Commonly used types and utilities for ease of import.

pub use crate::{
    GridSnapshot, Match, MatchConfig, MatchObserver, MoveResult, OpponentPolicy, RandomPolicy,
    Rejection, ShipType, Side, Turn, TurnReport,
};

#[cfg(feature = "std")]
pub use crate::{cli::print_views, init_logging};
