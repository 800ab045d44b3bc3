//! Conversion between grid cells and presenter pixel space.

/// Draw metrics of one grid: top-left offset and square cell size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GridLayout {
    pub offset_x: f64,
    pub offset_y: f64,
    pub cell_size: f64,
}

/// The player's own grid, drawn on the left.
pub const PLAYER_LAYOUT: GridLayout = GridLayout::new(50.0, 170.0, 50.0);
/// The grid the player attacks, drawn on the right.
pub const OPPONENT_LAYOUT: GridLayout = GridLayout::new(550.0, 170.0, 50.0);

impl Default for GridLayout {
    fn default() -> Self {
        PLAYER_LAYOUT
    }
}

impl GridLayout {
    pub const fn new(offset_x: f64, offset_y: f64, cell_size: f64) -> Self {
        Self {
            offset_x,
            offset_y,
            cell_size,
        }
    }

    /// Top-left pixel of cell (`x`, `y`).
    pub fn cell_to_pixel(&self, x: usize, y: usize) -> (f64, f64) {
        (
            self.offset_x + self.cell_size * x as f64,
            self.offset_y + self.cell_size * y as f64,
        )
    }

    /// Cell containing pixel (`px`, `py`), or `None` when it falls outside a
    /// `grid_size`×`grid_size` grid.
    pub fn pixel_to_cell(&self, px: f64, py: f64, grid_size: usize) -> Option<(usize, usize)> {
        if self.cell_size <= 0.0 {
            return None;
        }
        let fx = (px - self.offset_x) / self.cell_size;
        let fy = (py - self.offset_y) / self.cell_size;
        if !(fx >= 0.0 && fy >= 0.0) {
            return None;
        }
        // Truncation is floor for non-negative values.
        let (x, y) = (fx as usize, fy as usize);
        if x < grid_size && y < grid_size {
            Some((x, y))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_origin_uses_offset_and_size() {
        let layout = GridLayout::default();
        assert_eq!(layout.cell_to_pixel(0, 0), (50.0, 170.0));
        assert_eq!(layout.cell_to_pixel(2, 3), (150.0, 320.0));
    }

    #[test]
    fn pixel_inside_cell_maps_back() {
        let layout = GridLayout::new(10.0, 20.0, 25.0);
        assert_eq!(layout.pixel_to_cell(10.0, 20.0, 8), Some((0, 0)));
        assert_eq!(layout.pixel_to_cell(64.9, 99.0, 8), Some((2, 3)));
    }

    #[test]
    fn pixel_outside_grid_is_none() {
        let layout = GridLayout::new(10.0, 20.0, 25.0);
        assert_eq!(layout.pixel_to_cell(9.0, 30.0, 8), None);
        assert_eq!(layout.pixel_to_cell(10.0 + 25.0 * 8.0, 30.0, 8), None);
        assert_eq!(layout.pixel_to_cell(f64::NAN, 30.0, 8), None);
    }
}
