//! Grids, terrain and projectile paths

use serde::{Deserialize, Serialize};
use strum::Display;

/// A map location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Grid {
    pub x: i32,
    pub y: i32,
}

impl Grid {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance, as used for missile range
    pub fn distance(self, other: Grid) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

/// Terrain features that matter to combat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
pub enum Terrain {
    #[default]
    Floor,
    Wall,
    /// Passable rubble: grants cover, stops projectiles
    Rubble,
    /// Trees grant cover and stop projectiles
    Tree,
    /// Monsters standing in water are exposed
    Water,
    Lava,
}

impl Terrain {
    pub const fn is_passable(self) -> bool {
        !matches!(self, Terrain::Wall)
    }

    /// Whether a projectile can fly through this grid
    pub const fn is_projectable(self) -> bool {
        matches!(self, Terrain::Floor | Terrain::Water | Terrain::Lava)
    }

    /// Whether a monster standing here is harder to hit
    pub const fn gives_cover(self) -> bool {
        matches!(self, Terrain::Rubble | Terrain::Tree)
    }

    /// Whether a monster standing here is easier to hit
    pub const fn is_exposed(self) -> bool {
        matches!(self, Terrain::Water)
    }
}

/// Target and geometry collaborator consumed by the missile engine
pub trait Geometry {
    fn terrain(&self, grid: Grid) -> Terrain;

    fn in_bounds(&self, grid: Grid) -> bool;

    fn is_passable(&self, grid: Grid) -> bool {
        self.in_bounds(grid) && self.terrain(grid).is_passable()
    }

    /// Grids from `from` (exclusive) toward `to` and beyond, up to `range`
    /// steps, stopping before any impassable grid.
    fn project_path(&self, from: Grid, to: Grid, range: i32) -> Vec<Grid> {
        bresenham_path(from, to, range)
            .into_iter()
            .take_while(|&g| self.is_passable(g))
            .collect()
    }
}

/// Walk a Bresenham line from `from` (exclusive) through `to`, continuing
/// past it, for at most `range` steps.
pub fn bresenham_path(from: Grid, to: Grid, range: i32) -> Vec<Grid> {
    let mut path = Vec::new();
    if from == to || range <= 0 {
        return path;
    }

    let dx = (to.x - from.x).abs();
    let dy = (to.y - from.y).abs();
    let sx = if to.x > from.x { 1 } else { -1 };
    let sy = if to.y > from.y { 1 } else { -1 };

    let (mut err, is_x_major) = if dx > dy { (dx / 2, true) } else { (dy / 2, false) };

    let mut x = from.x;
    let mut y = from.y;
    for _ in 0..range {
        if is_x_major {
            err -= dy;
            if err < 0 {
                y += sy;
                err += dx;
            }
            x += sx;
        } else {
            err -= dx;
            if err < 0 {
                x += sx;
                err += dy;
            }
            y += sy;
        }
        path.push(Grid::new(x, y));
    }
    path
}
