use alloc::vec::Vec;

use crate::common::BoardError;
use crate::layout::{GridLayout, OPPONENT_LAYOUT, PLAYER_LAYOUT};
use crate::ship::{ShipId, ShipType};

pub const DEFAULT_GRID_SIZE: usize = 8;
pub const NUM_SHIPS: usize = 5;
pub const DEFAULT_FLEET: [ShipType; NUM_SHIPS] = [
    ShipType::new("aircraft-carrier", 5),
    ShipType::new("battleship", 4),
    ShipType::new("cruiser", 3),
    ShipType::new("destroyer", 2),
    ShipType::new("escort", 1),
];

/// First id handed out to a placed ship in a match.
pub const BASE_SHIP_ID: ShipId = 1000;

/// Random samples tried per ship before placement gives up.
pub const PLACEMENT_ATTEMPTS: usize = 1000;

/// Below this many legal cells the opponent picks from the filtered set
/// instead of sampling the whole grid.
pub const RANDOM_SAMPLE_THRESHOLD: usize = 8;

/// Constraints applied by the fleet placement generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementRules {
    /// Whether ships may occupy cells adjacent (including diagonally) to another ship.
    pub allow_touching: bool,
    /// Samples tried per ship.
    pub max_attempts: usize,
}

impl Default for PlacementRules {
    fn default() -> Self {
        Self {
            allow_touching: true,
            max_attempts: PLACEMENT_ATTEMPTS,
        }
    }
}

/// Everything needed to set up a match.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    pub grid_size: usize,
    pub fleet: Vec<ShipType>,
    pub rules: PlacementRules,
    /// Draw metrics of the player's own grid.
    pub player_layout: GridLayout,
    /// Draw metrics of the grid the player attacks.
    pub opponent_layout: GridLayout,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            fleet: DEFAULT_FLEET.to_vec(),
            rules: PlacementRules::default(),
            player_layout: PLAYER_LAYOUT,
            opponent_layout: OPPONENT_LAYOUT,
        }
    }
}

impl MatchConfig {
    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_fleet(mut self, fleet: Vec<ShipType>) -> Self {
        self.fleet = fleet;
        self
    }

    pub fn with_rules(mut self, rules: PlacementRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_layouts(mut self, player: GridLayout, opponent: GridLayout) -> Self {
        self.player_layout = player;
        self.opponent_layout = opponent;
        self
    }

    /// Reject configurations no placement could ever satisfy.
    pub fn validate(&self) -> Result<(), BoardError> {
        if self.grid_size == 0 {
            return Err(BoardError::InvalidGridSize);
        }
        if self.fleet.is_empty() {
            return Err(BoardError::EmptyFleet);
        }
        // Report the id the ship would have received on the first board.
        if let Some(idx) = self.fleet.iter().position(|s| s.length() == 0) {
            return Err(BoardError::EmptyShip {
                ship_id: BASE_SHIP_ID + idx as ShipId,
            });
        }
        Ok(())
    }
}
