//! Tile catalog: named templates built once at startup

use std::path::Path;

use anyhow::Context;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::tile::{Feature, NodeIndex, Tile, NODE_COUNT};

use crate::tile::Feature::{City as C, Crossroad as X, Monastery as M, River as S, Road as R};

pub const START_TILE_NAME: &str = "Start tile";
pub const EMPTY_TILE_NAME: &str = "Empty tile";
pub const SPRING_TILE_NAME: &str = "Spring";

type Overlay = &'static [(NodeIndex, Feature)];

/// Built-in drawable tiles, in catalog index order
const BUILTIN_TILES: &[(&str, Overlay)] = &[
    ("Spring", &[(1, S), (6, S)]),
    ("Lake", &[(1, S), (6, S)]),
    ("Straight river", &[(1, S), (6, S), (11, S)]),
    ("River turn", &[(1, S), (6, S), (7, S)]),
    ("River with bridge", &[(1, S), (11, S), (5, R), (6, R), (7, R)]),
    ("River with city", &[(1, S), (6, S), (11, S), (4, C), (7, C), (9, C)]),
    (
        "River with bridge and city",
        &[(1, S), (11, S), (5, R), (6, R), (4, C), (7, C), (9, C)],
    ),
    ("Straight road", &[(1, R), (6, R), (11, R)]),
    ("Road turn", &[(1, R), (6, R), (7, R)]),
    ("Three-way crossroad", &[(1, R), (5, R), (6, X), (7, R)]),
    ("Four-way crossroad", &[(1, R), (5, R), (6, X), (7, R), (11, R)]),
    ("Side city", &[(0, C), (1, C), (2, C)]),
    ("Twin side city", &[(0, C), (1, C), (2, C), (10, C), (11, C), (12, C)]),
    ("City corner", &[(0, C), (1, C), (2, C), (3, C), (5, C), (8, C)]),
    (
        "City corner with road",
        &[(0, C), (1, C), (2, C), (3, C), (5, C), (8, C), (11, R), (6, R), (7, R)],
    ),
    (
        "City entryway",
        &[
            (1, R),
            (3, C),
            (4, C),
            (5, C),
            (6, C),
            (7, C),
            (8, C),
            (9, C),
            (10, C),
            (11, C),
            (12, C),
        ],
    ),
    (
        "City fortification",
        &[(3, C), (4, C), (5, C), (6, C), (7, C), (8, C), (9, C), (10, C), (11, C), (12, C)],
    ),
    ("Accordion city", &[(3, C), (4, C), (5, C), (6, C), (7, C), (8, C), (9, C)]),
    (
        "Inner city",
        &[
            (0, C),
            (1, C),
            (2, C),
            (3, C),
            (4, C),
            (5, C),
            (6, C),
            (7, C),
            (8, C),
            (9, C),
            (10, C),
            (11, C),
            (12, C),
        ],
    ),
    ("Monastery", &[(6, M)]),
    ("Monastery with road", &[(1, R), (6, M)]),
];

const START_TILE: Overlay = &[(1, R), (6, R), (11, R), (4, C), (7, C), (9, C)];

/// On-disk tile definition
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TileDefinition {
    pub name: String,
    #[serde(default)]
    pub features: Vec<(NodeIndex, Feature)>,
}

/// Registry of tile templates.
///
/// `templates()` is the drawable pool; the start tile and the debug empty tile
/// are held separately but can still be looked up by name.
#[derive(Clone, Debug)]
pub struct TileCatalog {
    templates: Vec<Tile>,
    by_name: FxHashMap<String, usize>,
    start: Tile,
    empty: Tile,
}

impl TileCatalog {
    /// Catalog of the built-in tiles
    pub fn builtin() -> Self {
        let templates = BUILTIN_TILES
            .iter()
            .map(|&(name, overlay)| template(name, overlay))
            .collect();
        Self::from_templates(templates, template(START_TILE_NAME, START_TILE))
    }

    /// Build a catalog from definitions; the built-in start tile is kept.
    pub fn from_definitions(definitions: &[TileDefinition]) -> CoreResult<Self> {
        if definitions.is_empty() {
            return Err(CoreError::EmptyCatalog);
        }
        let templates = definitions
            .iter()
            .map(|def| Tile::from_overlay(def.name.clone(), &def.features))
            .collect::<CoreResult<Vec<_>>>()?;
        Ok(Self::from_templates(
            templates,
            template(START_TILE_NAME, START_TILE),
        ))
    }

    /// Load definitions from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read tile definitions: {}", path.display()))?;
        let definitions: Vec<TileDefinition> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse tile definitions: {}", path.display()))?;
        Ok(Self::from_definitions(&definitions)?)
    }

    fn from_templates(templates: Vec<Tile>, start: Tile) -> Self {
        let by_name = templates
            .iter()
            .enumerate()
            .map(|(i, tile)| (tile.name().to_string(), i))
            .collect();
        Self {
            templates,
            by_name,
            start,
            empty: Tile::empty(EMPTY_TILE_NAME),
        }
    }

    /// Drawable templates in index order
    pub fn templates(&self) -> &[Tile] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Default start tile
    pub fn start(&self) -> &Tile {
        &self.start
    }

    /// Debug all-grass tile
    pub fn empty(&self) -> &Tile {
        &self.empty
    }

    pub fn by_name(&self, name: &str) -> CoreResult<&Tile> {
        if let Some(&i) = self.by_name.get(name) {
            return Ok(&self.templates[i]);
        }
        match name {
            START_TILE_NAME => Ok(&self.start),
            EMPTY_TILE_NAME => Ok(&self.empty),
            _ => Err(CoreError::UnknownTileName(name.to_string())),
        }
    }

    pub fn by_index(&self, index: usize) -> CoreResult<&Tile> {
        self.templates.get(index).ok_or(CoreError::IndexOutOfRange {
            index,
            len: self.templates.len(),
        })
    }
}

impl Default for TileCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// A bad built-in node index fails the build
const _: () = assert!(overlays_in_range(BUILTIN_TILES) && overlays_in_range(&[("", START_TILE)]));

const fn overlays_in_range(tiles: &[(&str, Overlay)]) -> bool {
    let mut t = 0;
    while t < tiles.len() {
        let overlay = tiles[t].1;
        let mut i = 0;
        while i < overlay.len() {
            if overlay[i].0 as usize >= NODE_COUNT {
                return false;
            }
            i += 1;
        }
        t += 1;
    }
    true
}

fn template(name: &str, overlay: Overlay) -> Tile {
    // Unreachable fallback: overlays_in_range holds for every built-in
    Tile::from_overlay(name, overlay).unwrap_or_else(|_| Tile::empty(name))
}
