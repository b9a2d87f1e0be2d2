//! Placed tiles and placement legality

use rustc_hash::{FxHashMap, FxHashSet};

use crate::connect::can_connect_tiles;
use crate::error::PlacementError;
use crate::grid::{Direction, Position};
use crate::tile::Tile;

/// A candidate placement: cell plus clockwise quarter turns
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Placement {
    pub position: Position,
    pub rotation: u8,
}

/// Grid of placed tiles (sparse). A cell holds at most one tile.
#[derive(Clone, Debug, Default)]
pub struct World {
    tiles: FxHashMap<Position, Tile>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, position: Position) -> Option<&Tile> {
        self.tiles.get(&position)
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.tiles.contains_key(&position)
    }

    /// Occupied cells sorted row by row
    pub fn positions(&self) -> Vec<Position> {
        let mut positions: Vec<Position> = self.tiles.keys().copied().collect();
        positions.sort_unstable_by_key(|p| (p.y, p.x));
        positions
    }

    /// Occupied N/E/S/W neighbors of `position`
    pub fn occupied_neighbors(&self, position: Position) -> Vec<(Direction, &Tile)> {
        position
            .neighbors()
            .filter_map(|(dir, pos)| self.get(pos).map(|tile| (dir, tile)))
            .collect()
    }

    /// Check that `tile` may occupy `position` as oriented.
    ///
    /// Returns the directions of the neighbors it abuts.
    pub fn check_placement(
        &self,
        position: Position,
        tile: &Tile,
    ) -> Result<Vec<Direction>, PlacementError> {
        if self.is_occupied(position) {
            return Err(PlacementError::Occupied);
        }

        let neighbors = self.occupied_neighbors(position);
        if neighbors.is_empty() {
            return Err(PlacementError::NoNeighbors);
        }

        for &(direction, neighbor) in &neighbors {
            if !can_connect_tiles(tile, direction, neighbor) {
                return Err(PlacementError::Mismatch { direction });
            }
        }

        Ok(neighbors.into_iter().map(|(dir, _)| dir).collect())
    }

    /// Put a tile down without any checks. Used for the start tile.
    pub(crate) fn insert(&mut self, position: Position, tile: Tile) {
        self.tiles.insert(position, tile);
    }

    /// Empty cells adjacent to at least one tile, sorted row by row
    pub fn frontier(&self) -> Vec<Position> {
        let cells: FxHashSet<Position> = self
            .tiles
            .keys()
            .flat_map(|pos| pos.neighbors().map(|(_, n)| n).collect::<Vec<_>>())
            .filter(|pos| !self.is_occupied(*pos))
            .collect();
        let mut cells: Vec<Position> = cells.into_iter().collect();
        cells.sort_unstable_by_key(|p| (p.y, p.x));
        cells
    }

    /// Every frontier cell and rotation (0-3) where `tile` fits
    pub fn legal_placements(&self, tile: &Tile) -> Vec<Placement> {
        let orientations: Vec<Tile> = (0..4).map(|turns| tile.rotated(turns)).collect();
        let mut placements = Vec::new();
        for position in self.frontier() {
            for (rotation, oriented) in orientations.iter().enumerate() {
                if self.check_placement(position, oriented).is_ok() {
                    placements.push(Placement {
                        position,
                        rotation: rotation as u8,
                    });
                }
            }
        }
        placements
    }

    /// Whether `tile` fits anywhere in any orientation
    pub fn has_legal_placement(&self, tile: &Tile) -> bool {
        let orientations: Vec<Tile> = (0..4).map(|turns| tile.rotated(turns)).collect();
        self.frontier().into_iter().any(|position| {
            orientations
                .iter()
                .any(|oriented| self.check_placement(position, oriented).is_ok())
        })
    }
}
