//! Tessera Core - Tile-laying game engine
//!
//! This crate provides the core game logic for Tessera:
//! - Seeded random source and the draw stack
//! - Tile catalog, 13-node tile layout and rotation
//! - Edge matching between abutting tiles
//! - Node relation graph tracking roads, cities and rivers across tiles
//! - Turn/phase state machine

pub mod catalog;
pub mod config;
pub mod connect;
pub mod error;
pub mod game;
pub mod graph;
pub mod grid;
pub mod rng;
pub mod stack;
pub mod tile;
pub mod world;

// Re-exports for convenient access
pub use catalog::{TileCatalog, TileDefinition};
pub use config::{Extension, GameConfig, PlayerConfig};
pub use connect::{can_connect_nodes, can_connect_tiles};
pub use error::{CoreError, CoreResult, PlacementError, TurnError};
pub use game::{pick_start_tile, GameObserver, GameState, Phase, PlaceOutcome, Player, TurnPhaseMachine};
pub use graph::NodeRelationGraph;
pub use grid::{Direction, NodeAddress, Position};
pub use rng::RandomSource;
pub use stack::TileStack;
pub use tile::{Feature, Node, NodeIndex, Tile, CENTER, NODE_COUNT};
pub use world::{Placement, World};
