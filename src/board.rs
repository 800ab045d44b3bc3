//! Per-side board: ship occupancy, attack history and the views handed out
//! to each side.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::fmt;

use crate::common::{BoardError, GuessResult};
use crate::layout::GridLayout;
use crate::ship::{ShipId, ShipPlacement};

/// One grid cell. A cell is busy iff a ship occupies it, regardless of
/// whether it has been attacked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    ship: Option<ShipId>,
    attacked: bool,
}

impl Cell {
    pub fn ship(&self) -> Option<ShipId> {
        self.ship
    }

    pub fn is_busy(&self) -> bool {
        self.ship.is_some()
    }

    pub fn is_attacked(&self) -> bool {
        self.attacked
    }
}

/// What a viewer is allowed to know about one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct CellView {
    pub attacked: bool,
    /// Whether a ship occupies the cell, `None` while that is hidden from the viewer.
    pub ship: Option<bool>,
}

/// Read-only copy of a whole grid as seen by one side.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSnapshot {
    size: usize,
    cells: Vec<CellView>,
}

impl GridSnapshot {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, x: usize, y: usize) -> Option<CellView> {
        if x < self.size && y < self.size {
            Some(self.cells[y * self.size + x])
        } else {
            None
        }
    }

    /// Rows from `y = 0` downwards, each indexed by `x`.
    pub fn rows(&self) -> impl Iterator<Item = &[CellView]> {
        self.cells.chunks(self.size.max(1))
    }

    /// Number of attacked cells that held a ship.
    pub fn hits(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.attacked && c.ship == Some(true))
            .count()
    }

    /// Number of attacked cells that were empty.
    pub fn misses(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.attacked && c.ship == Some(false))
            .count()
    }
}

/// Main board state: placements, occupancy and attacks.
#[derive(Clone, PartialEq)]
pub struct Board {
    grid_size: usize,
    cells: Vec<Cell>,
    placements: Vec<ShipPlacement>,
    layout: GridLayout,
}

impl Board {
    /// Build a board from placements, rejecting any that leave the grid,
    /// overlap another ship or reuse an id.
    pub fn new(grid_size: usize, placements: Vec<ShipPlacement>) -> Result<Self, BoardError> {
        if grid_size == 0 {
            return Err(BoardError::InvalidGridSize);
        }
        let mut cells = alloc::vec![Cell::default(); grid_size * grid_size];
        for (i, placement) in placements.iter().enumerate() {
            let ship_id = placement.id();
            if placement.is_empty() {
                return Err(BoardError::EmptyShip { ship_id });
            }
            if placements[..i].iter().any(|p| p.id() == ship_id) {
                return Err(BoardError::DuplicateShipId(ship_id));
            }
            for (x, y) in placement.cells() {
                if x >= grid_size || y >= grid_size {
                    return Err(BoardError::ShipOutOfBounds { ship_id, x, y });
                }
                let cell = &mut cells[y * grid_size + x];
                if let Some(other) = cell.ship {
                    return Err(BoardError::ShipOverlaps {
                        ship_id,
                        other,
                        x,
                        y,
                    });
                }
                cell.ship = Some(ship_id);
            }
            log::debug!(
                "placed {} #{} at {:?} {:?}",
                placement.ship_type().name(),
                ship_id,
                placement.origin(),
                placement.orientation()
            );
        }
        Ok(Self {
            grid_size,
            cells,
            placements,
            layout: GridLayout::default(),
        })
    }

    /// Replace the draw metrics used for pixel conversions.
    pub fn with_layout(mut self, layout: GridLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn placements(&self) -> &[ShipPlacement] {
        &self.placements
    }

    pub fn placement(&self, ship_id: ShipId) -> Option<&ShipPlacement> {
        self.placements.iter().find(|p| p.id() == ship_id)
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    #[inline]
    fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.grid_size && y < self.grid_size
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.grid_size + x
    }

    /// `true` iff (`x`, `y`) is on the grid and has not been attacked yet.
    pub fn is_valid_target(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).is_some_and(|c| !c.attacked)
    }

    /// Mark (`x`, `y`) attacked and return the ship occupying it, if any.
    ///
    /// # Panics
    ///
    /// If the cell is not a valid target. Callers check
    /// [`Board::is_valid_target`] first.
    pub fn resolve_attack(&mut self, x: usize, y: usize) -> Option<ShipId> {
        assert!(
            self.is_valid_target(x, y),
            "resolve_attack on invalid target ({}, {})",
            x,
            y
        );
        let idx = self.index(x, y);
        let cell = &mut self.cells[idx];
        cell.attacked = true;
        cell.ship
    }

    /// Resolve an attack and classify it as miss, hit or sink.
    pub fn guess(&mut self, x: usize, y: usize) -> GuessResult {
        match self.resolve_attack(x, y) {
            None => GuessResult::Miss,
            Some(id) if self.is_ship_sunk(id) => GuessResult::Sink(id),
            Some(id) => GuessResult::Hit(id),
        }
    }

    /// Ids of ships with at least one cell not yet attacked.
    pub fn remaining_ship_ids(&self) -> BTreeSet<ShipId> {
        self.cells
            .iter()
            .filter(|c| !c.attacked)
            .filter_map(|c| c.ship)
            .collect()
    }

    pub fn is_ship_sunk(&self, ship_id: ShipId) -> bool {
        !self
            .cells
            .iter()
            .any(|c| !c.attacked && c.ship == Some(ship_id))
    }

    /// Returns `true` when every occupied cell has been attacked.
    pub fn all_ships_sunk(&self) -> bool {
        self.cells.iter().all(|c| c.attacked || c.ship.is_none())
    }

    /// Cells that may still be attacked, in row-major order.
    pub fn valid_targets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.grid_size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.attacked)
            .map(move |(i, _)| (i % size, i / size))
    }

    pub fn grid_cell_to_pixel(&self, x: usize, y: usize) -> (f64, f64) {
        self.layout.cell_to_pixel(x, y)
    }

    pub fn pixel_to_grid_cell(&self, px: f64, py: f64) -> Option<(usize, usize)> {
        self.layout.pixel_to_cell(px, py, self.grid_size)
    }

    /// View for the attacking side: occupancy of unattacked cells is hidden.
    pub fn attack_view(&self) -> AttackView<'_> {
        AttackView { board: self }
    }

    /// Full view for the owning side.
    pub fn defense_snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            size: self.grid_size,
            cells: self
                .cells
                .iter()
                .map(|c| CellView {
                    attacked: c.attacked,
                    ship: Some(c.is_busy()),
                })
                .collect(),
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {}x{} {{", self.grid_size, self.grid_size)?;
        for y in 0..self.grid_size {
            write!(f, "  ")?;
            for x in 0..self.grid_size {
                let c = self.cells[self.index(x, y)];
                let ch = match (c.ship.is_some(), c.attacked) {
                    (true, true) => 'X',
                    (true, false) => '■',
                    (false, true) => 'o',
                    (false, false) => '□',
                };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        write!(f, "  placements: {:?}\n}}", self.placements)
    }
}

/// Read-only board access for the side attacking it. Never exposes which
/// ship, if any, sits on a cell that has not been attacked.
#[derive(Clone, Copy)]
pub struct AttackView<'a> {
    board: &'a Board,
}

impl<'a> AttackView<'a> {
    pub fn grid_size(&self) -> usize {
        self.board.grid_size
    }

    pub fn is_valid_target(&self, x: usize, y: usize) -> bool {
        self.board.is_valid_target(x, y)
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<CellView> {
        self.board.cell(x, y).map(Self::hide)
    }

    pub fn valid_targets(&self) -> impl Iterator<Item = (usize, usize)> + 'a {
        self.board.valid_targets()
    }

    pub fn grid_cell_to_pixel(&self, x: usize, y: usize) -> (f64, f64) {
        self.board.grid_cell_to_pixel(x, y)
    }

    /// Cell under a click on the attacked grid.
    pub fn pixel_to_grid_cell(&self, px: f64, py: f64) -> Option<(usize, usize)> {
        self.board.pixel_to_grid_cell(px, py)
    }

    /// Number of ships not yet sunk.
    pub fn ships_remaining(&self) -> usize {
        self.board.remaining_ship_ids().len()
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            size: self.board.grid_size,
            cells: self.board.cells.iter().map(Self::hide).collect(),
        }
    }

    fn hide(cell: &Cell) -> CellView {
        CellView {
            attacked: cell.attacked,
            ship: cell.attacked.then_some(cell.is_busy()),
        }
    }
}
