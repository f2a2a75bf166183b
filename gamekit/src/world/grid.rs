//! Occupancy Grid
//!
//! Rows of free/blocked cells. Rows may differ in length (grammar output
//! keeps a short final row); any coordinate outside the stored cells reads
//! as blocked.

use std::fmt;
use serde::{Serialize, Deserialize};

use crate::core::hash::{ContentHash, ContentHasher};

/// Integer grid coordinate.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct GridPos {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl GridPos {
    /// Create a coordinate.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by (dx, dy), saturating at the `i32` range.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// `|dx| + |dy|`.
    #[inline]
    pub fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }

    /// `max(|dx|, |dy|)`.
    #[inline]
    pub fn chebyshev(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

impl fmt::Debug for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Cell occupancy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Walkable.
    #[default]
    Free,
    /// Wall.
    Blocked,
}

impl Cell {
    /// Cell from the numeric convention used by generated games (1 = wall).
    #[inline]
    pub fn from_value(value: u8) -> Self {
        if value == 1 { Cell::Blocked } else { Cell::Free }
    }

    /// Numeric form (1 = wall, 0 = free).
    #[inline]
    pub fn value(self) -> u8 {
        match self {
            Cell::Free => 0,
            Cell::Blocked => 1,
        }
    }
}

/// Row-major occupancy grid.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// `width` x `height` grid of free cells.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Cell::Free)
    }

    /// `width` x `height` grid filled with `cell`.
    pub fn filled(width: usize, height: usize, cell: Cell) -> Self {
        Self {
            rows: vec![vec![cell; width]; height],
        }
    }

    /// Grid from explicit rows (may be ragged).
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Grid from numeric rows, 1 = blocked.
    pub fn from_values<R: AsRef<[u8]>>(rows: &[R]) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|row| row.as_ref().iter().map(|v| Cell::from_value(*v)).collect())
                .collect(),
        }
    }

    /// Parse a picture, one line per row: `#` blocked, anything else free.
    pub fn parse(picture: &str) -> Self {
        Self {
            rows: picture
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(|line| {
                    line.chars()
                        .map(|c| if c == '#' { Cell::Blocked } else { Cell::Free })
                        .collect()
                })
                .collect(),
        }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of the first row (0 for an empty grid).
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Stored rows.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Cell at `pos`, `None` outside the stored cells.
    pub fn get(&self, pos: GridPos) -> Option<Cell> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        self.rows.get(pos.y as usize)?.get(pos.x as usize).copied()
    }

    /// True if `pos` addresses a stored cell.
    pub fn in_bounds(&self, pos: GridPos) -> bool {
        self.get(pos).is_some()
    }

    /// Write a cell. Returns false (and does nothing) out of bounds.
    pub fn set(&mut self, pos: GridPos, cell: Cell) -> bool {
        if pos.x < 0 || pos.y < 0 {
            return false;
        }
        match self
            .rows
            .get_mut(pos.y as usize)
            .and_then(|row| row.get_mut(pos.x as usize))
        {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Blocked or out of range.
    #[inline]
    pub fn is_blocked(&self, pos: GridPos) -> bool {
        self.get(pos) != Some(Cell::Free)
    }

    /// Number of free cells.
    pub fn free_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|c| **c == Cell::Free)
            .count()
    }

    /// Content fingerprint (shape and cells), for reproducibility checks.
    pub fn fingerprint(&self) -> ContentHash {
        let mut hasher = ContentHasher::new(b"GAMEKIT_GRID_V1");
        hasher.update_u32(self.rows.len() as u32);
        for row in &self.rows {
            hasher.update_u32(row.len() as u32);
            for cell in row {
                hasher.update_u8(cell.value());
            }
        }
        hasher.finalize()
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}", self.width(), self.height())?;
        for row in &self.rows {
            for cell in row {
                f.write_str(if *cell == Cell::Blocked { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_is_blocked() {
        let grid = Grid::new(3, 3);
        assert!(!grid.is_blocked(GridPos::new(0, 0)));
        assert!(grid.is_blocked(GridPos::new(-1, 0)));
        assert!(grid.is_blocked(GridPos::new(3, 0)));
        assert!(grid.is_blocked(GridPos::new(0, 3)));
    }

    #[test]
    fn test_ragged_rows() {
        let grid = Grid::from_values(&[vec![0, 0, 0], vec![0]]);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert!(!grid.is_blocked(GridPos::new(0, 1)));
        assert!(grid.is_blocked(GridPos::new(1, 1)));
    }

    #[test]
    fn test_set_and_parse() {
        let mut grid = Grid::parse(
            "
            ..#
            ...
            ",
        );
        assert!(grid.is_blocked(GridPos::new(2, 0)));
        assert!(grid.set(GridPos::new(0, 1), Cell::Blocked));
        assert!(!grid.set(GridPos::new(9, 9), Cell::Blocked));
        assert_eq!(grid.free_count(), 4);
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let a = Grid::new(4, 4);
        let mut b = Grid::new(4, 4);
        assert_eq!(a.fingerprint(), b.fingerprint());
        b.set(GridPos::new(1, 1), Cell::Blocked);
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_distances() {
        let a = GridPos::new(0, 0);
        let b = GridPos::new(3, -4);
        assert_eq!(a.manhattan(b), 7);
        assert_eq!(a.chebyshev(b), 4);
    }
}
