//! A* Grid Search
//!
//! Unit step cost, Manhattan heuristic. The heuristic is admissible for
//! 4-directional movement and is reused unchanged when the mesh allows
//! diagonals, where it overestimates; 8-directional paths are therefore
//! not guaranteed shortest.
//!
//! ## Reproducibility
//!
//! The open set is a plain list, stably re-sorted by `f = g + h` before
//! every pop. Among equal `f` values the node that sits earlier in the list
//! wins, so generated paths are identical run to run and match the paths
//! games were tuned against.

use std::collections::BTreeMap;
use tracing::debug;

use crate::core::hash::{ContentHash, ContentHasher};
use super::grid::{Grid, GridPos};
use super::navmesh::NavMesh;

/// Ordered cells from start to goal inclusive; empty when unreachable.
pub type Path = Vec<GridPos>;

/// Search `mesh` from `start` to `goal`.
///
/// Returns an empty path if either endpoint is blocked or the goal cannot
/// be reached. Consecutive cells of the result are neighbours under the
/// mesh's movement model.
pub fn a_star(mesh: &NavMesh<'_>, start: GridPos, goal: GridPos) -> Path {
    let grid = mesh.grid();
    if grid.is_blocked(start) || grid.is_blocked(goal) {
        debug!(?start, ?goal, "path endpoint blocked");
        return Vec::new();
    }

    let mut open: Vec<GridPos> = vec![start];
    let mut came_from: BTreeMap<GridPos, GridPos> = BTreeMap::new();
    let mut g_score: BTreeMap<GridPos, u32> = BTreeMap::new();
    let mut f_score: BTreeMap<GridPos, u32> = BTreeMap::new();

    g_score.insert(start, 0);
    f_score.insert(start, start.manhattan(goal));

    while !open.is_empty() {
        // Stable sort keeps list order among equal f.
        open.sort_by_key(|p| f_score.get(p).copied().unwrap_or(u32::MAX));
        let current = open.remove(0);

        if current == goal {
            return reconstruct(&came_from, current);
        }

        let current_g = g_score.get(&current).copied().unwrap_or(0);
        for next in mesh.neighbors(current) {
            let tentative = current_g + 1;
            if tentative < g_score.get(&next).copied().unwrap_or(u32::MAX) {
                came_from.insert(next, current);
                g_score.insert(next, tentative);
                f_score.insert(next, tentative + next.manhattan(goal));
                if !open.contains(&next) {
                    open.push(next);
                }
            }
        }
    }

    debug!(?start, ?goal, explored = g_score.len(), "goal unreachable");
    Vec::new()
}

/// 4-directional search directly on a grid.
pub fn a_star_grid(grid: &Grid, start: GridPos, goal: GridPos) -> Path {
    a_star(&NavMesh::new(grid, false), start, goal)
}

/// Fingerprint of a route, for comparing replays.
pub fn path_fingerprint(path: &[GridPos]) -> ContentHash {
    let mut hasher = ContentHasher::new(b"GAMEKIT_PATH_V1");
    hasher.update_u32(path.len() as u32);
    for pos in path {
        hasher.update_i32(pos.x);
        hasher.update_i32(pos.y);
    }
    hasher.finalize()
}

fn reconstruct(came_from: &BTreeMap<GridPos, GridPos>, end: GridPos) -> Path {
    let mut path = vec![end];
    let mut cursor = end;
    while let Some(prev) = came_from.get(&cursor) {
        path.push(*prev);
        cursor = *prev;
    }
    path.reverse();
    path
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
    fn test_open_grid_manhattan_optimal() {
        let grid = Grid::new(5, 5);
        let path = a_star_grid(&grid, p(0, 0), p(4, 4));

        assert_eq!(path.len(), 9);
        assert_eq!(path.first(), Some(&p(0, 0)));
        assert_eq!(path.last(), Some(&p(4, 4)));
        for pair in path.windows(2) {
            assert_eq!(pair[0].manhattan(pair[1]), 1);
        }
    }

    #[test]
    fn test_golden_path_tie_break() {
        // Equal-f ties resolve by list order: east is explored first.
        let grid = Grid::new(3, 3);
        let path = a_star_grid(&grid, p(0, 0), p(2, 2));
        assert_eq!(path, vec![p(0, 0), p(1, 0), p(2, 0), p(2, 1), p(2, 2)]);
    }

    #[test]
    fn test_start_equals_goal() {
        let grid = Grid::new(2, 2);
        assert_eq!(a_star_grid(&grid, p(1, 1), p(1, 1)), vec![p(1, 1)]);
    }

    #[test]
    fn test_blocked_goal() {
        let grid = Grid::parse(
            "
            ...
            .#.
            ...
            ",
        );
        assert!(a_star_grid(&grid, p(0, 0), p(1, 1)).is_empty());
    }

    #[test]
    fn test_enclosed_goal() {
        let grid = Grid::parse(
            "
            .....
            .###.
            .#.#.
            .###.
            .....
            ",
        );
        assert!(a_star_grid(&grid, p(0, 0), p(2, 2)).is_empty());
    }

    #[test]
    fn test_off_grid_goal() {
        let grid = Grid::new(3, 3);
        assert!(a_star_grid(&grid, p(0, 0), p(5, 5)).is_empty());
    }

    #[test]
    fn test_routes_around_wall() {
        let grid = Grid::parse(
            "
            ....
            ###.
            ....
            ",
        );
        let path = a_star_grid(&grid, p(0, 0), p(0, 2));
        assert_eq!(path.len(), 9);
        assert!(path.iter().all(|c| !grid.is_blocked(*c)));
    }

    #[test]
    fn test_diagonal_mesh_uses_diagonals() {
        let grid = Grid::new(4, 4);
        let mesh = NavMesh::new(&grid, true);
        let path = a_star(&mesh, p(0, 0), p(3, 3));
        assert_eq!(path.len(), 4);
        for pair in path.windows(2) {
            assert_eq!(pair[0].chebyshev(pair[1]), 1);
        }
    }

    #[test]
    fn test_path_fingerprint() {
        let grid = Grid::new(4, 4);
        let a = a_star_grid(&grid, p(0, 0), p(3, 3));
        let b = a_star_grid(&grid, p(0, 0), p(3, 3));
        assert_eq!(path_fingerprint(&a), path_fingerprint(&b));
        let mut reversed = a.clone();
        reversed.reverse();
        assert_ne!(path_fingerprint(&a), path_fingerprint(&reversed));
    }

    proptest! {
        #[test]
        fn prop_paths_are_adjacent_and_free(
            cells in proptest::collection::vec(0u8..4, 36),
            gx in 0i32..6,
            gy in 0i32..6,
        ) {
            // Roughly a quarter of cells blocked.
            let rows: Vec<Vec<u8>> = cells
                .chunks(6)
                .map(|r| r.iter().map(|v| u8::from(*v == 0)).collect())
                .collect();
            let grid = Grid::from_values(&rows);
            let path = a_star_grid(&grid, p(0, 0), p(gx, gy));

            if let (Some(first), Some(last)) = (path.first(), path.last()) {
                prop_assert_eq!(*first, p(0, 0));
                prop_assert_eq!(*last, p(gx, gy));
                for pair in path.windows(2) {
                    prop_assert_eq!(pair[0].manhattan(pair[1]), 1);
                }
                prop_assert!(path.iter().all(|c| !grid.is_blocked(*c)));
            }
        }
    }
}
