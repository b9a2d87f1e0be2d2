//! Draw stack

use crate::catalog::TileCatalog;
use crate::error::{CoreError, CoreResult};
use crate::rng::RandomSource;
use crate::tile::Tile;

/// Ordered, shrinking stack of undrawn tiles. The last entry is the top.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileStack {
    tiles: Vec<Tile>,
}

impl TileStack {
    pub fn new(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    /// Draw `count` copies of catalog templates, sampled with replacement.
    pub fn generate(
        count: usize,
        catalog: &TileCatalog,
        rng: &mut RandomSource,
    ) -> CoreResult<Self> {
        if catalog.is_empty() {
            return Err(CoreError::EmptyCatalog);
        }
        let tiles = (0..count)
            .map(|_| pick_random_tile(catalog, rng).cloned())
            .collect::<CoreResult<Vec<_>>>()?;
        Ok(Self { tiles })
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile that would be drawn next
    pub fn peek(&self) -> Option<&Tile> {
        self.tiles.last()
    }

    /// Names in the order they will be drawn
    pub fn draw_order(&self) -> Vec<&str> {
        self.tiles.iter().rev().map(|t| t.name()).collect()
    }

    /// Take the top tile, returning it with the stack that remains.
    ///
    /// An empty stack yields `None` and an identical stack.
    pub fn remove_top(&self) -> (Option<Tile>, TileStack) {
        let mut updated = self.clone();
        let tile = updated.tiles.pop();
        (tile, updated)
    }
}

/// Uniformly pick one catalog template
pub fn pick_random_tile<'a>(
    catalog: &'a TileCatalog,
    rng: &mut RandomSource,
) -> CoreResult<&'a Tile> {
    let index = rng.index(catalog.len())?;
    catalog.by_index(index)
}
