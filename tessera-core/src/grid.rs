//! Square grid geometry and global node addresses

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tile::NodeIndex;

/// Grid cell coordinates. `y` grows southward (screen orientation).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Cell occupied by the start tile before the first turn
    pub const ORIGIN: Position = Position::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Adjacent cell in `direction`
    pub fn neighbor(&self, direction: Direction) -> Position {
        let (dx, dy) = direction.offset();
        Position::new(self.x + dx, self.y + dy)
    }

    /// All four adjacent cells, N/E/S/W
    pub fn neighbors(&self) -> impl Iterator<Item = (Direction, Position)> + '_ {
        Direction::ALL.iter().map(move |&d| (d, self.neighbor(d)))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.x, self.y)
    }
}

/// Compass direction between orthogonally adjacent cells
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Cell offset (dx, dy)
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Local node indices along this edge of a tile.
    ///
    /// Ordered so that `d.edge_nodes()[i]` touches `d.opposite().edge_nodes()[i]`
    /// of the neighboring tile.
    pub fn edge_nodes(self) -> [NodeIndex; 3] {
        match self {
            Direction::North => [0, 1, 2],
            Direction::East => [4, 7, 9],
            Direction::South => [10, 11, 12],
            Direction::West => [3, 5, 8],
        }
    }
}

/// A node on a placed tile: cell plus local node index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeAddress {
    pub position: Position,
    pub node: NodeIndex,
}

impl NodeAddress {
    pub const fn new(position: Position, node: NodeIndex) -> Self {
        Self { position, node }
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.position, self.node)
    }
}
