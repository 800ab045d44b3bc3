//! Ship definitions and placement geometry.

use alloc::borrow::Cow;

use crate::config::BASE_SHIP_ID;

/// Identifier of a placed ship, unique across both boards of a match.
pub type ShipId = u32;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Extends along the x axis.
    Horizontal,
    /// Extends along the y axis.
    Vertical,
}

impl Orientation {
    /// Step applied to the origin for each further segment.
    pub fn step(self) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (1, 0),
            Orientation::Vertical => (0, 1),
        }
    }
}

/// Type of ship: name and length.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipType {
    name: Cow<'static, str>,
    length: usize,
}

impl ShipType {
    /// Create a new ship type.
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self {
            name: Cow::Borrowed(name),
            length,
        }
    }

    /// Ship type with a name only known at runtime.
    pub fn named(name: impl Into<Cow<'static, str>>, length: usize) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }

    /// Ship's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owned copy of the name, cheap for catalog constants.
    pub fn to_name(&self) -> Cow<'static, str> {
        self.name.clone()
    }

    /// Ship's length.
    pub fn length(&self) -> usize {
        self.length
    }
}

/// Monotonic ship id source for one match.
#[derive(Debug, Clone)]
pub struct ShipIds {
    next: ShipId,
}

impl ShipIds {
    pub fn new() -> Self {
        Self::starting_at(BASE_SHIP_ID)
    }

    pub fn starting_at(first: ShipId) -> Self {
        Self { next: first }
    }

    /// Hand out the next id.
    pub fn next_id(&mut self) -> ShipId {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for ShipIds {
    fn default() -> Self {
        Self::new()
    }
}

/// A ship of a given type anchored at `origin` and extending along `orientation`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipPlacement {
    id: ShipId,
    ship_type: ShipType,
    x: usize,
    y: usize,
    orientation: Orientation,
}

impl ShipPlacement {
    /// Place a ship at (`x`, `y`) with `orientation`. Bounds are checked when
    /// the placement is handed to a board.
    pub fn new(id: ShipId, ship_type: ShipType, x: usize, y: usize, orientation: Orientation) -> Self {
        Self {
            id,
            ship_type,
            x,
            y,
            orientation,
        }
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn ship_type(&self) -> &ShipType {
        &self.ship_type
    }

    /// Origin of the ship (x, y).
    pub fn origin(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn len(&self) -> usize {
        self.ship_type.length()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cells covered by the ship, starting at the origin.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (dx, dy) = self.orientation.step();
        (0..self.len()).map(move |i| (self.x + dx * i, self.y + dy * i))
    }

    /// Returns `true` if every cell lies inside a `grid_size`×`grid_size` grid.
    pub fn fits(&self, grid_size: usize) -> bool {
        let (end_x, end_y) = match self.orientation {
            Orientation::Horizontal => (self.x + self.len(), self.y + 1),
            Orientation::Vertical => (self.x + 1, self.y + self.len()),
        };
        end_x <= grid_size && end_y <= grid_size
    }
}
