//! Edge feature matching between abutting tiles

use crate::grid::Direction;
use crate::tile::{Node, Tile};

/// True when two facing node triples carry the same features pairwise.
///
/// Anything other than exactly three nodes per side never matches.
pub fn can_connect_nodes(nodes_a: &[Node], nodes_b: &[Node]) -> bool {
    if nodes_a.len() != 3 || nodes_b.len() != 3 {
        tracing::trace!(
            "Malformed node triple: {} vs {} nodes",
            nodes_a.len(),
            nodes_b.len()
        );
        return false;
    }

    nodes_a
        .iter()
        .zip(nodes_b)
        .all(|(a, b)| a.feature == b.feature)
}

/// Can `tile` sit next to `neighbor`, which lies in `direction` from it?
pub fn can_connect_tiles(tile: &Tile, direction: Direction, neighbor: &Tile) -> bool {
    can_connect_nodes(&tile.edge(direction), &neighbor.edge(direction.opposite()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TileCatalog;
    use crate::tile::Feature;

    fn nodes(features: &[Feature]) -> Vec<Node> {
        features.iter().map(|&f| Node::new(f)).collect()
    }

    #[test]
    fn test_matching_triples() {
        let a = nodes(&[Feature::Grass, Feature::Road, Feature::Grass]);
        let b = nodes(&[Feature::Grass, Feature::Road, Feature::Grass]);
        assert!(can_connect_nodes(&a, &b));
    }

    #[test]
    fn test_mismatched_triples() {
        let a = nodes(&[Feature::City, Feature::City, Feature::City]);
        let b = nodes(&[Feature::Grass, Feature::Road, Feature::Grass]);
        assert!(!can_connect_nodes(&a, &b));
    }

    #[test]
    fn test_malformed_triples_fail_closed() {
        let three = nodes(&[Feature::Grass; 3]);
        assert!(!can_connect_nodes(&nodes(&[Feature::Grass; 2]), &three));
        assert!(!can_connect_nodes(&three, &nodes(&[Feature::Grass; 4])));
        assert!(!can_connect_nodes(&[], &[]));
    }

    #[test]
    fn test_side_city_north_of_start() {
        let catalog = TileCatalog::builtin();
        let side = catalog.by_name("Side city").unwrap();
        // Side city above the start tile: its south edge is all grass,
        // the start tile's north edge carries a road
        assert!(!can_connect_tiles(side, Direction::South, catalog.start()));
        assert!(!can_connect_tiles(catalog.start(), Direction::North, side));
    }

    #[test]
    fn test_straight_road_north_of_start() {
        let catalog = TileCatalog::builtin();
        let road = catalog.by_name("Straight road").unwrap();
        assert!(can_connect_tiles(road, Direction::South, catalog.start()));
        assert!(can_connect_tiles(catalog.start(), Direction::North, road));
    }
}
