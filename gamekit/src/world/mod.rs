//! Spatial reasoning and procedural content.
//!
//! ## Module Structure
//!
//! - `grid`: occupancy grid and coordinates
//! - `pathfinding`: A* search
//! - `navmesh`: movement model, line of sight, path smoothing
//! - `grammar`: rewriting grammar, grid conversion, turtle carving
//! - `terrain`: value-noise height maps

pub mod grid;
pub mod pathfinding;
pub mod navmesh;
pub mod grammar;
pub mod terrain;

pub use grid::{Cell, Grid, GridPos};
pub use pathfinding::{a_star, a_star_grid, path_fingerprint, Path};
pub use navmesh::NavMesh;
pub use grammar::{expand, interpret, parse_rules, to_grid, Carver, Cursor, Rule, Rules};
pub use terrain::{height_map, noise2};
