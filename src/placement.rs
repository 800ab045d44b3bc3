//! Random fleet placement.
//!
//! Placement is a pure function of the injected random source: each ship is
//! sampled uniformly over both orientations and every origin that keeps it on
//! the grid, and resampled until it clears the ships already accepted.
//! Accepted cells are tracked in a flat occupancy grid rather than by
//! backtracking.

use alloc::vec::Vec;
use rand::Rng;

use crate::common::{BoardError, SetupError};
use crate::config::PlacementRules;
use crate::ship::{Orientation, ShipId, ShipIds, ShipPlacement, ShipType};

/// Cells already taken by accepted placements.
#[derive(Debug, Clone)]
pub struct Occupancy {
    size: usize,
    taken: Vec<bool>,
}

impl Occupancy {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            taken: alloc::vec![false; size * size],
        }
    }

    fn is_taken(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size && self.taken[y * self.size + x]
    }

    /// Whether `placement` can be added under `rules`.
    pub fn admits(&self, placement: &ShipPlacement, rules: &PlacementRules) -> bool {
        if !placement.fits(self.size) {
            return false;
        }
        placement.cells().all(|(x, y)| {
            if rules.allow_touching {
                !self.is_taken(x, y)
            } else {
                !self.neighbourhood(x, y).any(|(nx, ny)| self.is_taken(nx, ny))
            }
        })
    }

    pub fn insert(&mut self, placement: &ShipPlacement) {
        for (x, y) in placement.cells() {
            self.taken[y * self.size + x] = true;
        }
    }

    /// The cell itself and its up to eight neighbours.
    fn neighbourhood(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
        let xs = x.saturating_sub(1)..=x + 1;
        let ys = y.saturating_sub(1)..=y + 1;
        ys.flat_map(move |ny| xs.clone().map(move |nx| (nx, ny)))
    }
}

/// Sample a placement for `ship_type` that `occupancy` admits.
pub fn random_placement<R: Rng + ?Sized>(
    rng: &mut R,
    occupancy: &Occupancy,
    ship_type: &ShipType,
    id: ShipId,
    rules: &PlacementRules,
) -> Result<ShipPlacement, SetupError> {
    let len = ship_type.length();
    if len == 0 {
        return Err(BoardError::EmptyShip { ship_id: id }.into());
    }
    let size = occupancy.size;
    let exhausted = |attempts| SetupError::PlacementExhausted {
        ship: ship_type.to_name(),
        length: len,
        attempts,
    };
    if len > size {
        return Err(exhausted(0));
    }

    for attempt in 1..=rules.max_attempts {
        let orientation = if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let (max_x, max_y) = match orientation {
            Orientation::Horizontal => (size - len, size - 1),
            Orientation::Vertical => (size - 1, size - len),
        };
        let x = rng.random_range(0..=max_x);
        let y = rng.random_range(0..=max_y);
        let candidate = ShipPlacement::new(id, ship_type.clone(), x, y, orientation);
        if occupancy.admits(&candidate, rules) {
            log::trace!("{} #{} accepted after {} attempts", ship_type.name(), id, attempt);
            return Ok(candidate);
        }
    }
    Err(exhausted(rules.max_attempts))
}

/// Place every ship of `fleet` on an empty `grid_size` grid, drawing ids from `ids`.
pub fn random_fleet<R: Rng + ?Sized>(
    rng: &mut R,
    grid_size: usize,
    fleet: &[ShipType],
    ids: &mut ShipIds,
    rules: &PlacementRules,
) -> Result<Vec<ShipPlacement>, SetupError> {
    if grid_size == 0 {
        return Err(BoardError::InvalidGridSize.into());
    }
    let mut occupancy = Occupancy::new(grid_size);
    let mut placements = Vec::with_capacity(fleet.len());
    for ship_type in fleet {
        let placement = random_placement(rng, &occupancy, ship_type, ids.next_id(), rules)?;
        occupancy.insert(&placement);
        placements.push(placement);
    }
    Ok(placements)
}
