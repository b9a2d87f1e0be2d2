//! Game state and the turn/phase state machine

use std::collections::BTreeSet;
use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::catalog::{TileCatalog, SPRING_TILE_NAME};
use crate::config::{Extension, GameConfig, PlayerConfig};
use crate::error::{CoreError, CoreResult, PlacementError, TurnError};
use crate::graph::NodeRelationGraph;
use crate::grid::{Direction, NodeAddress, Position};
use crate::rng::RandomSource;
use crate::stack::{pick_random_tile, TileStack};
use crate::tile::{Feature, Tile};
use crate::world::{Placement, World};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Turn phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    PickTile,
    PlaceTile,
    PlaceMeeple,
    /// Terminal
    Endgame,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::PickTile => "pick-tile",
            Phase::PlaceTile => "place-tile",
            Phase::PlaceMeeple => "place-meeple",
            Phase::Endgame => "endgame",
        };
        f.write_str(name)
    }
}

/// A player at the table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub color: String,
    pub meeples: u32,
}

impl From<&PlayerConfig> for Player {
    fn from(config: &PlayerConfig) -> Self {
        Self {
            name: config.name.clone(),
            color: config.color.clone(),
            meeples: config.meeples,
        }
    }
}

/// Result of a placement attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaceOutcome {
    /// Tile committed; `neighbors` lists the tiles it now abuts
    Placed {
        placement: Placement,
        neighbors: Vec<Direction>,
    },
    /// Nothing changed
    Rejected(PlacementError),
}

impl PlaceOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, PlaceOutcome::Placed { .. })
    }
}

/// Receives the game state after every committed change
pub trait GameObserver {
    fn state_changed(&mut self, state: &GameState);
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Everything a frontend needs to show the game
#[derive(Clone, Debug)]
pub struct GameState {
    seed: u64,
    world: World,
    relations: NodeRelationGraph,
    stack: TileStack,
    turn: u32,
    phase: Phase,
    players: Vec<Player>,
    tile_to_place: Option<Tile>,
    discarded: Vec<Tile>,
}

impl GameState {
    /// Fresh game: `start` sits at the origin with its own relations recorded.
    pub fn new(seed: u64, players: Vec<Player>, start: Tile, stack: TileStack) -> CoreResult<Self> {
        if players.is_empty() {
            return Err(CoreError::NoPlayers);
        }

        let mut world = World::new();
        let mut relations = NodeRelationGraph::new();
        relations.insert_tile(Position::ORIGIN, &start);
        world.insert(Position::ORIGIN, start);

        Ok(Self {
            seed,
            world,
            relations,
            stack,
            turn: 0,
            phase: Phase::PickTile,
            players,
            tile_to_place: None,
            discarded: Vec::new(),
        })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn relations(&self) -> &NodeRelationGraph {
        &self.relations
    }

    pub fn stack(&self) -> &TileStack {
        &self.stack
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Player whose turn it is
    pub fn current_player(&self) -> &Player {
        &self.players[self.turn as usize % self.players.len()]
    }

    /// Drawn tile waiting for placement, in its current orientation
    pub fn tile_to_place(&self) -> Option<&Tile> {
        self.tile_to_place.as_ref()
    }

    /// Tiles drawn but never placed
    pub fn discarded(&self) -> &[Tile] {
        &self.discarded
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Endgame
    }

    // ========================================================================
    // REGIONS
    // ========================================================================

    /// Region containing `address`
    pub fn connected_component(&self, address: NodeAddress) -> FxHashSet<NodeAddress> {
        self.relations.connected_component(address)
    }

    /// Feature of the node at `address`; `None` for empty cells and bad node indices
    pub fn region_feature(&self, address: NodeAddress) -> Option<Feature> {
        self.world
            .get(address.position)
            .and_then(|tile| tile.node(address.node))
            .map(|node| node.feature)
    }
}

/// Start tile for a new game.
///
/// "Random start tile" wins over "River"; with neither the fixed start tile is used.
pub fn pick_start_tile(
    extensions: &BTreeSet<Extension>,
    catalog: &TileCatalog,
    rng: &mut RandomSource,
) -> CoreResult<Tile> {
    if extensions.contains(&Extension::RandomStartTile) {
        return pick_random_tile(catalog, rng).cloned();
    }
    if extensions.contains(&Extension::River) {
        return catalog.by_name(SPRING_TILE_NAME).cloned();
    }
    Ok(catalog.start().clone())
}

// ============================================================================
// TURN STATE MACHINE
// ============================================================================

/// Drives a game through `pick-tile -> place-tile -> place-meeple -> ...`.
///
/// Each transition either completes fully or leaves the state untouched.
pub struct TurnPhaseMachine {
    state: GameState,
    discard_unplaceable: bool,
    observers: Vec<Box<dyn GameObserver>>,
}

impl TurnPhaseMachine {
    /// Set up a game: fill the stack, then choose and place the start tile.
    pub fn new(
        config: &GameConfig,
        catalog: &TileCatalog,
        rng: &mut RandomSource,
    ) -> CoreResult<Self> {
        let players: Vec<Player> = config.players.iter().map(Player::from).collect();
        let stack = TileStack::generate(config.stack_size, catalog, rng)?;
        let start = pick_start_tile(&config.extensions, catalog, rng)?;

        tracing::info!(
            seed = rng.seed(),
            stack = stack.len(),
            start = start.name(),
            "Game set up"
        );

        let state = GameState::new(rng.seed(), players, start, stack)?;
        Ok(Self::from_state(state, config.discard_unplaceable))
    }

    /// Resume from an existing state
    pub fn from_state(state: GameState, discard_unplaceable: bool) -> Self {
        Self {
            state,
            discard_unplaceable,
            observers: Vec::new(),
        }
    }

    pub fn with_observer(mut self, observer: impl GameObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Where the pending tile could go, if one is pending
    pub fn legal_placements(&self) -> Vec<Placement> {
        self.state
            .tile_to_place
            .as_ref()
            .map(|tile| self.state.world.legal_placements(tile))
            .unwrap_or_default()
    }

    // ========================================================================
    // TRANSITIONS
    // ========================================================================

    /// Draw until a usable tile turns up. An exhausted stack ends the game.
    pub fn pick_tile(&mut self) -> Result<Phase, TurnError> {
        self.expect_phase(Phase::PickTile)?;

        loop {
            let (tile, rest) = self.state.stack.remove_top();
            self.state.stack = rest;

            let Some(tile) = tile else {
                tracing::info!(turn = self.state.turn, "Stack exhausted");
                self.transition(Phase::Endgame);
                return Ok(Phase::Endgame);
            };

            if !self.discard_unplaceable || self.state.world.has_legal_placement(&tile) {
                tracing::debug!(turn = self.state.turn, tile = tile.name(), "Tile drawn");
                self.state.tile_to_place = Some(tile);
                self.transition(Phase::PlaceTile);
                return Ok(Phase::PlaceTile);
            }

            tracing::debug!(tile = tile.name(), "Discarding tile that fits nowhere");
            self.state.discarded.push(tile);
        }
    }

    /// Turn the pending tile a quarter clockwise
    pub fn rotate_pending(&mut self) -> Result<(), TurnError> {
        self.expect_phase(Phase::PlaceTile)?;
        let tile = self.state.tile_to_place.as_mut().ok_or(TurnError::NoTileToPlace)?;
        *tile = tile.rotate();
        self.notify();
        Ok(())
    }

    /// Try to put the pending tile at `position` after `rotation` extra quarter turns.
    ///
    /// A rejected placement changes nothing and keeps the game in `place-tile`.
    pub fn place_tile(&mut self, position: Position, rotation: u8) -> Result<PlaceOutcome, TurnError> {
        self.expect_phase(Phase::PlaceTile)?;
        if rotation > 3 {
            return Err(TurnError::InvalidRotation(rotation));
        }

        let oriented = self
            .state
            .tile_to_place
            .as_ref()
            .ok_or(TurnError::NoTileToPlace)?
            .rotated(rotation);

        let neighbors = match self.state.world.check_placement(position, &oriented) {
            Ok(neighbors) => neighbors,
            Err(reason) => {
                tracing::trace!(%position, rotation, %reason, "Placement rejected");
                return Ok(PlaceOutcome::Rejected(reason));
            }
        };

        self.state.relations.insert_tile(position, &oriented);
        for &direction in &neighbors {
            self.state.relations.connect_tiles(position, direction);
        }
        tracing::debug!(%position, rotation, tile = oriented.name(), "Tile placed");
        self.state.world.insert(position, oriented);
        self.state.tile_to_place = None;
        self.transition(Phase::PlaceMeeple);

        Ok(PlaceOutcome::Placed {
            placement: Placement { position, rotation },
            neighbors,
        })
    }

    /// Give up on the pending tile and draw again within the same turn
    pub fn discard_pending(&mut self) -> Result<(), TurnError> {
        self.expect_phase(Phase::PlaceTile)?;
        let tile = self.state.tile_to_place.take().ok_or(TurnError::NoTileToPlace)?;
        tracing::debug!(tile = tile.name(), "Pending tile discarded");
        self.state.discarded.push(tile);
        self.transition(Phase::PickTile);
        Ok(())
    }

    /// Finish the turn and hand over to the next player
    pub fn end_turn(&mut self) -> Result<(), TurnError> {
        self.expect_phase(Phase::PlaceMeeple)?;
        self.state.turn += 1;
        self.transition(Phase::PickTile);
        Ok(())
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    fn expect_phase(&self, expected: Phase) -> Result<(), TurnError> {
        if self.state.phase == expected {
            Ok(())
        } else {
            Err(TurnError::WrongPhase {
                expected,
                actual: self.state.phase,
            })
        }
    }

    fn transition(&mut self, to: Phase) {
        tracing::debug!(turn = self.state.turn, from = %self.state.phase, %to, "Phase change");
        self.state.phase = to;
        self.notify();
    }

    fn notify(&mut self) {
        for observer in &mut self.observers {
            observer.state_changed(&self.state);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
