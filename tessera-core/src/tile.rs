//! Tile data model: features, nodes, same-tile relations and rotation
//!
//! A tile carries 13 nodes. Twelve sit around the perimeter, three per edge,
//! and one (index 6) is the interior slot:
//!
//! ```text
//!      0   1   2
//!  3               4
//!  5       6       7
//!  8               9
//!     10  11  12
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::grid::Direction;

/// Local node index (0-12)
pub type NodeIndex = u8;

pub const NODE_COUNT: usize = 13;

/// Interior / monastery slot
pub const CENTER: NodeIndex = 6;

/// Geometric neighbors of every node on the same tile
pub const NEIGHBOR_NODES: [&[NodeIndex]; NODE_COUNT] = [
    &[1, 3],
    &[0, 2, 6],
    &[1, 4],
    &[0, 5],
    &[2, 7],
    &[3, 6, 8],
    &[1, 5, 7, 11],
    &[4, 6, 9],
    &[5, 10],
    &[7, 12],
    &[8, 11],
    &[6, 10, 12],
    &[9, 11],
];

/// 90° clockwise turn: node `i` of the rotated tile takes the node at
/// `ROTATE_CW[i]` of the original.
pub const ROTATE_CW: [NodeIndex; NODE_COUNT] = [8, 5, 3, 10, 0, 11, 6, 1, 12, 2, 9, 7, 4];

/// Terrain or structure on a node
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    #[default]
    Grass,
    City,
    Road,
    Crossroad,
    Monastery,
    River,
    /// Blank garden plot
    #[serde(alias = "blank")]
    Garden,
}

impl Feature {
    pub fn symbol(self) -> char {
        match self {
            Feature::Grass => 'G',
            Feature::City => 'C',
            Feature::Road => 'R',
            Feature::Crossroad => 'X',
            Feature::Monastery => 'M',
            Feature::River => 'S',
            Feature::Garden => 'B',
        }
    }
}

/// One node of a tile
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub feature: Feature,
    /// Player indices holding a meeple here (unused by the engine rules)
    #[serde(default)]
    pub owners: Vec<usize>,
}

impl Node {
    pub fn new(feature: Feature) -> Self {
        Self {
            feature,
            owners: Vec::new(),
        }
    }
}

/// A named tile: 13 nodes plus the precomputed same-tile relations.
///
/// Catalog templates are never mutated; drawing or rotating yields a new value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    name: String,
    nodes: [Node; NODE_COUNT],
    relations: [Vec<NodeIndex>; NODE_COUNT],
}

impl Tile {
    /// All-grass tile
    pub fn empty(name: impl Into<String>) -> Self {
        Self::from_nodes(name, std::array::from_fn(|_| Node::default()))
    }

    /// Start from an all-grass tile and overlay `(index, feature)` pairs.
    pub fn from_overlay(
        name: impl Into<String>,
        overlay: &[(NodeIndex, Feature)],
    ) -> CoreResult<Self> {
        let mut nodes: [Node; NODE_COUNT] = std::array::from_fn(|_| Node::default());
        for &(index, feature) in overlay {
            let node = nodes
                .get_mut(index as usize)
                .ok_or(CoreError::IndexOutOfRange {
                    index: index as usize,
                    len: NODE_COUNT,
                })?;
            node.feature = feature;
        }
        Ok(Self::from_nodes(name, nodes))
    }

    fn from_nodes(name: impl Into<String>, nodes: [Node; NODE_COUNT]) -> Self {
        let relations = compute_relations(&nodes);
        Self {
            name: name.into(),
            nodes,
            relations,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Node at `index`, `None` past the last node
    pub fn node(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index as usize)
    }

    /// Feature at `index`. Panics if `index` is not below `NODE_COUNT`.
    pub fn feature(&self, index: NodeIndex) -> Feature {
        self.nodes[index as usize].feature
    }

    pub fn features(&self) -> [Feature; NODE_COUNT] {
        std::array::from_fn(|i| self.nodes[i].feature)
    }

    /// Node indices carrying `feature`, ascending
    pub fn nodes_with(&self, feature: Feature) -> Vec<NodeIndex> {
        (0..NODE_COUNT as NodeIndex)
            .filter(|&i| self.feature(i) == feature)
            .collect()
    }

    /// Same-tile siblings of `index` that share its feature
    pub fn relations(&self, index: NodeIndex) -> &[NodeIndex] {
        &self.relations[index as usize]
    }

    /// The three nodes along the edge facing `direction`
    pub fn edge(&self, direction: Direction) -> [Node; 3] {
        direction.edge_nodes().map(|i| self.nodes[i as usize].clone())
    }

    /// Turn the tile 90° clockwise. Relations are rebuilt for the new layout.
    pub fn rotate(&self) -> Tile {
        let nodes = std::array::from_fn(|i| self.nodes[ROTATE_CW[i] as usize].clone());
        Self::from_nodes(self.name.clone(), nodes)
    }

    /// Apply `turns` clockwise quarter turns
    pub fn rotated(&self, turns: u8) -> Tile {
        (0..turns % 4).fold(self.clone(), |tile, _| tile.rotate())
    }
}

/// For every node keep the geometric neighbors sharing its feature.
fn compute_relations(nodes: &[Node; NODE_COUNT]) -> [Vec<NodeIndex>; NODE_COUNT] {
    std::array::from_fn(|i| {
        NEIGHBOR_NODES[i]
            .iter()
            .copied()
            .filter(|&j| nodes[j as usize].feature == nodes[i].feature)
            .collect()
    })
}
