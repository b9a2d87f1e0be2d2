//! Node relation graph spanning placed tiles
//!
//! Vertices are [`NodeAddress`]es. Edges join nodes of the same tile that
//! share a feature, and facing nodes of abutting tiles. Connected components
//! are the roads, cities and rivers of the world.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::grid::{Direction, NodeAddress, Position};
use crate::tile::{NodeIndex, Tile, NODE_COUNT};

/// Undirected adjacency lists; every edge is stored in both directions.
#[derive(Clone, Debug, Default)]
pub struct NodeRelationGraph {
    edges: FxHashMap<NodeAddress, Vec<NodeAddress>>,
}

impl NodeRelationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the undirected edge `a - b`.
    ///
    /// Self-loops and duplicate edges are ignored. Returns true if the edge is new.
    pub fn link(&mut self, a: NodeAddress, b: NodeAddress) -> bool {
        if a == b || self.are_linked(a, b) {
            return false;
        }
        self.edges.entry(a).or_default().push(b);
        self.edges.entry(b).or_default().push(a);
        true
    }

    /// Add the same-tile relations of `tile` placed at `position`.
    pub fn insert_tile(&mut self, position: Position, tile: &Tile) {
        for i in 0..NODE_COUNT as NodeIndex {
            let from = NodeAddress::new(position, i);
            for &j in tile.relations(i) {
                self.link(from, NodeAddress::new(position, j));
            }
        }
    }

    /// Join the facing edge nodes of the tiles at `position` and its neighbor
    /// in `direction`. Feature compatibility must already be established.
    pub fn connect_tiles(&mut self, position: Position, direction: Direction) {
        let neighbor = position.neighbor(direction);
        let own = direction.edge_nodes();
        let facing = direction.opposite().edge_nodes();
        for (&a, &b) in own.iter().zip(facing.iter()) {
            self.link(NodeAddress::new(position, a), NodeAddress::new(neighbor, b));
        }
    }

    pub fn are_linked(&self, a: NodeAddress, b: NodeAddress) -> bool {
        self.edges.get(&a).is_some_and(|adj| adj.contains(&b))
    }

    /// Direct neighbors of `address`
    pub fn neighbors(&self, address: NodeAddress) -> &[NodeAddress] {
        self.edges.get(&address).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every address reachable from `start`, `start` included.
    pub fn connected_component(&self, start: NodeAddress) -> FxHashSet<NodeAddress> {
        let mut visited = FxHashSet::default();
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for &next in self.neighbors(current) {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        visited
    }

    /// Cells touched by the region containing `start`
    pub fn component_tiles(&self, start: NodeAddress) -> FxHashSet<Position> {
        self.connected_component(start)
            .into_iter()
            .map(|addr| addr.position)
            .collect()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum::<usize>() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TileCatalog;

    fn addr(x: i32, y: i32, node: NodeIndex) -> NodeAddress {
        NodeAddress::new(Position::new(x, y), node)
    }

    #[test]
    fn test_link_is_symmetric() {
        let mut graph = NodeRelationGraph::new();
        assert!(graph.link(addr(0, 0, 1), addr(0, -1, 11)));
        assert!(graph.are_linked(addr(0, 0, 1), addr(0, -1, 11)));
        assert!(graph.are_linked(addr(0, -1, 11), addr(0, 0, 1)));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_no_self_loops_or_duplicates() {
        let mut graph = NodeRelationGraph::new();
        assert!(!graph.link(addr(0, 0, 6), addr(0, 0, 6)));
        assert!(graph.link(addr(0, 0, 1), addr(0, 0, 6)));
        assert!(!graph.link(addr(0, 0, 6), addr(0, 0, 1)));
        assert_eq!(graph.neighbors(addr(0, 0, 1)), &[addr(0, 0, 6)]);
    }

    #[test]
    fn test_edges_accumulate() {
        let mut graph = NodeRelationGraph::new();
        graph.link(addr(0, 0, 6), addr(0, 0, 1));
        graph.link(addr(0, 0, 6), addr(0, 0, 11));
        graph.link(addr(0, 0, 6), addr(1, 0, 5));
        assert_eq!(graph.neighbors(addr(0, 0, 6)).len(), 3);
    }

    #[test]
    fn test_transitive_component() {
        let mut graph = NodeRelationGraph::new();
        graph.link(addr(0, 0, 0), addr(0, 0, 1));
        graph.link(addr(0, 0, 1), addr(0, 0, 2));
        graph.link(addr(5, 5, 0), addr(5, 5, 1));
        let component = graph.connected_component(addr(0, 0, 0));
        assert_eq!(component.len(), 3);
        assert!(component.contains(&addr(0, 0, 2)));
        assert!(!component.contains(&addr(5, 5, 0)));
    }

    #[test]
    fn test_component_handles_cycles() {
        let mut graph = NodeRelationGraph::new();
        graph.link(addr(0, 0, 0), addr(0, 0, 1));
        graph.link(addr(0, 0, 1), addr(0, 0, 2));
        graph.link(addr(0, 0, 2), addr(0, 0, 0));
        assert_eq!(graph.connected_component(addr(0, 0, 1)).len(), 3);
    }

    #[test]
    fn test_isolated_address() {
        let graph = NodeRelationGraph::new();
        let component = graph.connected_component(addr(3, 3, 6));
        assert_eq!(component.len(), 1);
        assert!(graph.neighbors(addr(3, 3, 6)).is_empty());
    }

    #[test]
    fn test_insert_start_tile() {
        let catalog = TileCatalog::builtin();
        let mut graph = NodeRelationGraph::new();
        graph.insert_tile(Position::ORIGIN, catalog.start());

        let road = graph.connected_component(addr(0, 0, 1));
        let expected: FxHashSet<_> = [addr(0, 0, 1), addr(0, 0, 6), addr(0, 0, 11)].into_iter().collect();
        assert_eq!(road, expected);

        let city = graph.connected_component(addr(0, 0, 4));
        assert_eq!(city.len(), 3);
        assert!(city.contains(&addr(0, 0, 9)));
    }

    #[test]
    fn test_connect_tiles_joins_regions() {
        let catalog = TileCatalog::builtin();
        let road = catalog.by_name("Straight road").unwrap();
        let north = Position::new(0, -1);

        let mut graph = NodeRelationGraph::new();
        graph.insert_tile(Position::ORIGIN, catalog.start());
        graph.insert_tile(north, road);
        graph.connect_tiles(north, Direction::South);

        let region = graph.connected_component(addr(0, 0, 1));
        assert!(region.contains(&addr(0, -1, 11)));
        assert!(region.contains(&addr(0, -1, 1)));
        let tiles: FxHashSet<Position> = [Position::ORIGIN, north].into_iter().collect();
        assert_eq!(graph.component_tiles(addr(0, 0, 1)), tiles);
    }
}
