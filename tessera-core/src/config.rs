//! Game configuration

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Optional rule modules that change how a game starts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Extension {
    /// Draw the start tile from the catalog at random
    #[serde(rename = "Random start tile")]
    RandomStartTile,
    /// Start from the "Spring" tile
    #[serde(rename = "River")]
    River,
}

/// A seat at the table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    pub color: String,
    #[serde(default = "default_meeples")]
    pub meeples: u32,
}

impl PlayerConfig {
    pub fn new(name: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            meeples: default_meeples(),
        }
    }
}

fn default_meeples() -> u32 {
    7
}

/// Everything needed to set up a game
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed seed; `None` draws one from entropy
    pub seed: Option<u64>,
    /// Tiles drawn into the stack at setup
    pub stack_size: usize,
    pub players: Vec<PlayerConfig>,
    pub extensions: BTreeSet<Extension>,
    /// Discard drawn tiles that fit nowhere instead of handing them out
    pub discard_unplaceable: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            stack_size: 82,
            players: vec![
                PlayerConfig::new("Red", "rgb(200, 0, 0)"),
                PlayerConfig::new("Blue", "rgb(40, 60, 230)"),
            ],
            extensions: BTreeSet::new(),
            discard_unplaceable: true,
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_stack_size(mut self, stack_size: usize) -> Self {
        self.stack_size = stack_size;
        self
    }

    pub fn with_extension(mut self, extension: Extension) -> Self {
        self.extensions.insert(extension);
        self
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.players.is_empty() {
            anyhow::bail!("At least one player is required");
        }
        Ok(())
    }
}
