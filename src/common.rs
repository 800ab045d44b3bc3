//! Common types for Broadside: shot outcomes and setup errors.

use alloc::borrow::Cow;
use thiserror::Error;

use crate::ship::ShipId;

/// Result of a single resolved attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GuessResult {
    /// Attack missed all ships.
    Miss,
    /// Attack hit a ship that is still afloat.
    Hit(ShipId),
    /// Attack hit the last intact segment of a ship.
    Sink(ShipId),
}

impl GuessResult {
    pub fn is_hit(&self) -> bool {
        !matches!(self, GuessResult::Miss)
    }

    pub fn ship_id(&self) -> Option<ShipId> {
        match *self {
            GuessResult::Miss => None,
            GuessResult::Hit(id) | GuessResult::Sink(id) => Some(id),
        }
    }

    pub fn is_sink(&self) -> bool {
        matches!(self, GuessResult::Sink(_))
    }
}

/// Errors raised while building a board from placements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("grid size must be at least 1")]
    InvalidGridSize,
    #[error("fleet has no ships")]
    EmptyFleet,
    #[error("ship {ship_id} has zero length")]
    EmptyShip { ship_id: ShipId },
    #[error("ship id {0} is used more than once")]
    DuplicateShipId(ShipId),
    #[error("ship {ship_id} leaves the grid at ({x}, {y})")]
    ShipOutOfBounds { ship_id: ShipId, x: usize, y: usize },
    #[error("ship {ship_id} overlaps ship {other} at ({x}, {y})")]
    ShipOverlaps {
        ship_id: ShipId,
        other: ShipId,
        x: usize,
        y: usize,
    },
}

/// Errors raised while setting up a match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("invalid placement: {0}")]
    InvalidPlacement(#[from] BoardError),
    #[error("unable to place {ship} (length {length}) after {attempts} attempts")]
    PlacementExhausted {
        ship: Cow<'static, str>,
        length: usize,
        attempts: usize,
    },
}
