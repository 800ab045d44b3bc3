#![cfg(feature = "std")]

//! Terminal presentation helpers shared by the binaries.
//! Columns are lettered from `A` along x, rows numbered from 1 along y.

use crate::board::{CellView, GridSnapshot};
use crate::config::DEFAULT_FLEET;
use crate::ship::ShipType;

/// Format a cell as e.g. `C4`.
pub fn coord_to_string(x: usize, y: usize) -> String {
    let col = (b'A' + x as u8) as char;
    format!("{}{}", col, y + 1)
}

/// Parse a coordinate like `c4` into (x, y). Bounds are not checked.
pub fn parse_coord(input: &str) -> Option<(usize, usize)> {
    let input = input.trim();
    let mut chars = input.chars();
    let col_ch = chars.next()?.to_ascii_uppercase();
    if !col_ch.is_ascii_uppercase() {
        return None;
    }
    let row: usize = chars.as_str().parse().ok()?;
    if row == 0 {
        return None;
    }
    Some(((col_ch as u8 - b'A') as usize, row - 1))
}

/// Parse a comma separated list of ship lengths. Lengths matching a default
/// ship reuse its name, others are named after their length.
pub fn parse_fleet(input: &str) -> Result<Vec<ShipType>, String> {
    let fleet = input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| -> Result<ShipType, String> {
            let len: usize = s
                .parse()
                .map_err(|_| format!("invalid ship length '{}'", s))?;
            if len == 0 {
                return Err("ship length must be at least 1".to_string());
            }
            Ok(DEFAULT_FLEET
                .iter()
                .find(|d| d.length() == len)
                .cloned()
                .unwrap_or_else(|| ShipType::named(format!("ship-{}", len), len)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if fleet.is_empty() {
        return Err("fleet needs at least one ship length".to_string());
    }
    Ok(fleet)
}

fn cell_char(cell: CellView) -> char {
    match (cell.attacked, cell.ship) {
        (true, Some(true)) => 'X',
        (true, _) => 'o',
        (false, Some(true)) => '■',
        (false, _) => '.',
    }
}

fn render_rows(snapshot: &GridSnapshot) -> Vec<String> {
    let mut lines = Vec::with_capacity(snapshot.size() + 1);
    let mut header = String::from("   ");
    for x in 0..snapshot.size() {
        header.push(' ');
        header.push((b'A' + x as u8) as char);
    }
    lines.push(header);
    for (y, row) in snapshot.rows().enumerate() {
        let mut line = format!("{:2} ", y + 1);
        for cell in row {
            line.push(' ');
            line.push(cell_char(*cell));
        }
        lines.push(line);
    }
    lines
}

/// Print the attack grid next to the player's own grid.
pub fn print_views(attack: &GridSnapshot, defense: &GridSnapshot) {
    let left = render_rows(attack);
    let right = render_rows(defense);
    let width = left.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    println!("{:<width$}    {}", "Enemy waters", "Your fleet", width = width);
    for (l, r) in left.iter().zip(right.iter()) {
        println!("{:<width$}    {}", l, r, width = width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_roundtrip() {
        assert_eq!(parse_coord("c4"), Some((2, 3)));
        assert_eq!(coord_to_string(2, 3), "C4");
    }

    #[test]
    fn rejects_malformed_coords() {
        assert_eq!(parse_coord(""), None);
        assert_eq!(parse_coord("A0"), None);
        assert_eq!(parse_coord("4C"), None);
        assert_eq!(parse_coord("B"), None);
    }

    #[test]
    fn fleet_lengths_reuse_default_names() {
        let fleet = parse_fleet("5, 2,7").unwrap();
        assert_eq!(fleet[0].name(), "aircraft-carrier");
        assert_eq!(fleet[1].name(), "destroyer");
        assert_eq!(fleet[2].name(), "ship-7");
        assert!(parse_fleet("3,0").is_err());
        assert!(parse_fleet("x").is_err());
    }

    #[test]
    fn empty_fleet_is_rejected() {
        assert!(parse_fleet("").is_err());
        assert!(parse_fleet(" , ,").is_err());
    }
}
