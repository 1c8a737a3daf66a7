//! The combat arena: monsters, terrain and floor items around the player
//!
//! The attack engines only see the [`Arena`] trait. [`Field`] is a small
//! rectangular implementation used by tests and by callers that do not have
//! a dungeon of their own.

use serde::{Deserialize, Serialize};

use super::geometry::{Geometry, Grid, Terrain};
use crate::monster::{Monster, MonsterIdx};
use crate::object::Item;
use fa_rng::RandomSource;

/// World collaborator consumed by the melee and missile engines
pub trait Arena: Geometry {
    fn monster_at(&self, grid: Grid) -> Option<MonsterIdx>;

    fn monster(&self, idx: MonsterIdx) -> Option<&Monster>;

    fn monster_mut(&mut self, idx: MonsterIdx) -> Option<&mut Monster>;

    /// Remove a slain monster
    fn remove_monster(&mut self, idx: MonsterIdx) -> Option<Monster>;

    /// Move a monster away from `near`; returns the new location, if any
    fn teleport_monster(
        &mut self,
        idx: MonsterIdx,
        near: Grid,
        distance: i32,
        rng: &mut dyn RandomSource,
    ) -> Option<Grid>;

    /// Leave an item on the floor
    fn drop_item(&mut self, grid: Grid, item: Item);
}

/// A rectangular arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    width: i32,
    height: i32,
    terrain: Vec<Terrain>,
    monsters: Vec<Option<Monster>>,
    floor: Vec<(Grid, Item)>,
}

impl Field {
    /// An open field of floor grids
    pub fn new(width: i32, height: i32) -> Self {
        let size = (width.max(0) * height.max(0)) as usize;
        Self {
            width,
            height,
            terrain: vec![Terrain::Floor; size],
            monsters: Vec::new(),
            floor: Vec::new(),
        }
    }

    fn index(&self, grid: Grid) -> Option<usize> {
        self.in_bounds(grid)
            .then(|| (grid.y * self.width + grid.x) as usize)
    }

    pub fn set_terrain(&mut self, grid: Grid, terrain: Terrain) {
        if let Some(i) = self.index(grid) {
            self.terrain[i] = terrain;
        }
    }

    /// Place a monster at its own grid
    pub fn place_monster(&mut self, monster: Monster) -> MonsterIdx {
        self.monsters.push(Some(monster));
        MonsterIdx(self.monsters.len() - 1)
    }

    /// Items lying on a grid
    pub fn items_at(&self, grid: Grid) -> impl Iterator<Item = &Item> {
        self.floor
            .iter()
            .filter(move |(g, _)| *g == grid)
            .map(|(_, item)| item)
    }

    pub fn floor_count(&self) -> usize {
        self.floor.len()
    }

    fn is_empty_floor(&self, grid: Grid) -> bool {
        self.is_passable(grid) && self.monster_at(grid).is_none()
    }
}

impl Geometry for Field {
    fn terrain(&self, grid: Grid) -> Terrain {
        self.index(grid)
            .map(|i| self.terrain[i])
            .unwrap_or(Terrain::Wall)
    }

    fn in_bounds(&self, grid: Grid) -> bool {
        grid.x >= 0 && grid.y >= 0 && grid.x < self.width && grid.y < self.height
    }
}

impl Arena for Field {
    fn monster_at(&self, grid: Grid) -> Option<MonsterIdx> {
        self.monsters
            .iter()
            .position(|m| m.as_ref().is_some_and(|m| m.grid == grid))
            .map(MonsterIdx)
    }

    fn monster(&self, idx: MonsterIdx) -> Option<&Monster> {
        self.monsters.get(idx.0).and_then(|m| m.as_ref())
    }

    fn monster_mut(&mut self, idx: MonsterIdx) -> Option<&mut Monster> {
        self.monsters.get_mut(idx.0).and_then(|m| m.as_mut())
    }

    fn remove_monster(&mut self, idx: MonsterIdx) -> Option<Monster> {
        self.monsters.get_mut(idx.0).and_then(|m| m.take())
    }

    fn teleport_monster(
        &mut self,
        idx: MonsterIdx,
        near: Grid,
        distance: i32,
        rng: &mut dyn RandomSource,
    ) -> Option<Grid> {
        self.monster(idx)?;
        // Random picks first, then settle for any free grid
        let mut target = None;
        for _ in 0..100 {
            let g = Grid::new(
                rng.spread(near.x, distance),
                rng.spread(near.y, distance),
            );
            if g.distance(near) > distance / 2 && self.is_empty_floor(g) {
                target = Some(g);
                break;
            }
        }
        if target.is_none() {
            target = (0..self.height)
                .flat_map(|y| (0..self.width).map(move |x| Grid::new(x, y)))
                .filter(|&g| g != near && self.is_empty_floor(g))
                .max_by_key(|g| g.distance(near));
        }
        let grid = target?;
        if let Some(m) = self.monster_mut(idx) {
            m.grid = grid;
        }
        Some(grid)
    }

    fn drop_item(&mut self, grid: Grid, item: Item) {
        self.floor.push((grid, item));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monster::MonsterRace;
    use fa_rng::GameRng;

    fn kobold(x: i32, y: i32) -> Monster {
        Monster::new(MonsterRace::new("Kobold", 2, 16), Grid::new(x, y))
    }

    #[test]
    fn test_out_of_bounds_is_wall() {
        let field = Field::new(5, 5);
        assert_eq!(field.terrain(Grid::new(-1, 0)), Terrain::Wall);
        assert_eq!(field.terrain(Grid::new(2, 2)), Terrain::Floor);
    }

    #[test]
    fn test_project_path_stops_at_wall() {
        let mut field = Field::new(10, 3);
        field.set_terrain(Grid::new(4, 1), Terrain::Wall);
        let path = field.project_path(Grid::new(0, 1), Grid::new(8, 1), 10);
        assert_eq!(path.last(), Some(&Grid::new(3, 1)));
    }

    #[test]
    fn test_monster_lookup_and_removal() {
        let mut field = Field::new(10, 10);
        let idx = field.place_monster(kobold(3, 3));
        assert_eq!(field.monster_at(Grid::new(3, 3)), Some(idx));
        assert!(field.remove_monster(idx).is_some());
        assert_eq!(field.monster_at(Grid::new(3, 3)), None);
    }

    #[test]
    fn test_teleport_moves_monster() {
        let mut field = Field::new(20, 20);
        let idx = field.place_monster(kobold(10, 10));
        let mut rng = GameRng::new(7);
        let to = field.teleport_monster(idx, Grid::new(10, 10), 8, &mut rng).unwrap();
        assert_ne!(to, Grid::new(10, 10));
        assert_eq!(field.monster(idx).unwrap().grid, to);
    }
}
