//! Grid NavMesh
//!
//! A walkability view over a grid: neighbour enumeration under 4- or
//! 8-directional movement, Bresenham line of sight, and string-pulling
//! path smoothing. No state beyond the grid borrow and the diagonal flag;
//! every query is computed on demand.

use super::grid::{Grid, GridPos};
use super::pathfinding::{a_star, Path};

const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

/// Walkability model over a borrowed grid.
#[derive(Clone, Copy, Debug)]
pub struct NavMesh<'a> {
    grid: &'a Grid,
    diagonal: bool,
}

impl<'a> NavMesh<'a> {
    /// Build a mesh; `diagonal` enables 8-directional movement.
    pub fn new(grid: &'a Grid, diagonal: bool) -> Self {
        Self { grid, diagonal }
    }

    /// Underlying grid.
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// True if diagonal steps are allowed.
    pub fn allows_diagonal(&self) -> bool {
        self.diagonal
    }

    /// Free neighbours of `pos`: east, west, south, north, then (when
    /// enabled) the four diagonals. Corner cutting is not checked.
    pub fn neighbors(&self, pos: GridPos) -> Vec<GridPos> {
        let diagonals: &[(i32, i32)] = if self.diagonal { &DIAGONAL } else { &[] };
        ORTHOGONAL
            .iter()
            .chain(diagonals)
            .map(|(dx, dy)| pos.offset(*dx, *dy))
            .filter(|n| !self.grid.is_blocked(*n))
            .collect()
    }

    /// Integer Bresenham walk from `a` to `b`.
    ///
    /// False as soon as a blocked cell is crossed, endpoints included.
    pub fn line_of_sight(&self, a: GridPos, b: GridPos) -> bool {
        // Off-grid endpoints are blocked; checking first keeps the walk
        // arithmetic within grid extents.
        if self.grid.is_blocked(a) || self.grid.is_blocked(b) {
            return false;
        }
        let (mut x0, mut y0) = (a.x, a.y);
        let (x1, y1) = (b.x, b.y);
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;

        loop {
            if self.grid.is_blocked(GridPos::new(x0, y0)) {
                return false;
            }
            if x0 == x1 && y0 == y1 {
                return true;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x0 += sx;
            }
            if e2 < dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// String pulling: from each kept waypoint, jump to the farthest later
    /// waypoint still in line of sight.
    ///
    /// Paths of two or fewer waypoints are returned unchanged.
    pub fn smooth(&self, path: &[GridPos]) -> Path {
        if path.len() <= 2 {
            return path.to_vec();
        }

        let last = path.len() - 1;
        let mut out = vec![path[0]];
        let mut i = 0;
        while i < last {
            let mut j = last;
            while j > i + 1 && !self.line_of_sight(path[i], path[j]) {
                j -= 1;
            }
            out.push(path[j]);
            i = j;
        }
        out
    }

    /// A* search followed by smoothing.
    pub fn find_path(&self, start: GridPos, goal: GridPos) -> Path {
        let raw = a_star(self, start, goal);
        self.smooth(&raw)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(x: i32, y: i32) -> GridPos {
        GridPos::new(x, y)
    }

    #[test]
    fn test_neighbors_order() {
        let grid = Grid::new(3, 3);
        let four = NavMesh::new(&grid, false);
        assert_eq!(four.neighbors(p(1, 1)), vec![p(2, 1), p(0, 1), p(1, 2), p(1, 0)]);

        let eight = NavMesh::new(&grid, true);
        let n = eight.neighbors(p(1, 1));
        assert_eq!(n.len(), 8);
        assert_eq!(&n[4..], &[p(2, 2), p(0, 2), p(2, 0), p(0, 0)]);
    }

    #[test]
    fn test_neighbors_filter_blocked_and_edges() {
        let grid = Grid::parse(
            "
            .#
            ..
            ",
        );
        let mesh = NavMesh::new(&grid, false);
        assert_eq!(mesh.neighbors(p(0, 0)), vec![p(0, 1)]);
    }

    #[test]
    fn test_line_of_sight() {
        let grid = Grid::parse(
            "
            .....
            ..#..
            .....
            ",
        );
        let mesh = NavMesh::new(&grid, false);
        assert!(mesh.line_of_sight(p(0, 0), p(4, 0)));
        assert!(!mesh.line_of_sight(p(0, 1), p(4, 1)));
        assert!(mesh.line_of_sight(p(0, 2), p(4, 2)));
        // Blocked destination.
        assert!(!mesh.line_of_sight(p(0, 1), p(2, 1)));
        assert!(mesh.line_of_sight(p(3, 0), p(3, 0)));
    }

    #[test]
    fn test_line_of_sight_far_off_grid() {
        let grid = Grid::new(4, 4);
        let mesh = NavMesh::new(&grid, true);
        assert!(!mesh.line_of_sight(p(0, 0), p(i32::MIN, 0)));
        assert!(!mesh.line_of_sight(p(1, 1), p(i32::MAX, 1)));
        assert!(!mesh.line_of_sight(p(i32::MAX, i32::MIN), p(i32::MIN, i32::MAX)));
        assert!(mesh.neighbors(p(i32::MAX, i32::MAX)).is_empty());
        assert!(mesh.find_path(p(0, 0), p(i32::MIN, i32::MAX)).is_empty());
    }

    #[test]
    fn test_smooth_straight_corridor() {
        let grid = Grid::new(6, 1);
        let mesh = NavMesh::new(&grid, false);
        let raw = a_star(&mesh, p(0, 0), p(5, 0));
        assert_eq!(raw.len(), 6);
        assert_eq!(mesh.smooth(&raw), vec![p(0, 0), p(5, 0)]);
    }

    #[test]
    fn test_smooth_short_paths_unchanged() {
        let grid = Grid::new(3, 3);
        let mesh = NavMesh::new(&grid, false);
        assert!(mesh.smooth(&[]).is_empty());
        assert_eq!(mesh.smooth(&[p(0, 0)]), vec![p(0, 0)]);
        assert_eq!(mesh.smooth(&[p(0, 0), p(1, 0)]), vec![p(0, 0), p(1, 0)]);
    }

    #[test]
    fn test_find_path_around_wall() {
        let grid = Grid::parse(
            "
            ....
            ###.
            ....
            ",
        );
        let mesh = NavMesh::new(&grid, false);
        let path = mesh.find_path(p(0, 0), p(0, 2));
        assert_eq!(path, vec![p(0, 0), p(3, 0), p(2, 2), p(0, 2)]);
    }

    #[test]
    fn test_find_path_unreachable() {
        let grid = Grid::parse(
            "
            ..#..
            ..#..
            ..#..
            ",
        );
        let mesh = NavMesh::new(&grid, true);
        assert!(mesh.find_path(p(0, 0), p(4, 2)).is_empty());
    }

    proptest! {
        #[test]
        fn prop_smoothed_waypoints_mutually_visible(
            cells in proptest::collection::vec(0u8..5, 49),
            diagonal in any::<bool>(),
        ) {
            let rows: Vec<Vec<u8>> = cells
                .chunks(7)
                .map(|r| r.iter().map(|v| u8::from(*v == 0)).collect())
                .collect();
            let mut grid = Grid::from_values(&rows);
            grid.set(p(0, 0), crate::world::grid::Cell::Free);
            grid.set(p(6, 6), crate::world::grid::Cell::Free);
            let mesh = NavMesh::new(&grid, diagonal);

            let raw = a_star(&mesh, p(0, 0), p(6, 6));
            let smoothed = mesh.smooth(&raw);

            prop_assert!(smoothed.len() <= raw.len());
            if !raw.is_empty() {
                prop_assert_eq!(smoothed.first(), raw.first());
                prop_assert_eq!(smoothed.last(), raw.last());
                for pair in smoothed.windows(2) {
                    let adjacent = raw.windows(2).any(|w| w[0] == pair[0] && w[1] == pair[1]);
                    prop_assert!(adjacent || mesh.line_of_sight(pair[0], pair[1]));
                }
            }
        }
    }
}
