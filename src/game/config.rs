use anyhow::{Result, ensure};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Number of cells the snake starts with
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Largest accepted grid side
pub const MAX_GRID_SIDE: usize = 512;

/// Rule set the game is played with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Open field, leaving the grid is fatal, single apple, pausable
    #[default]
    Classic,
    /// Lethal outer wall, apples of size 1 to 3
    Walled,
}

impl Variant {
    /// Whether the outer ring of the grid is made of wall cells
    pub fn has_walls(self) -> bool {
        matches!(self, Variant::Walled)
    }

    pub fn supports_pause(self) -> bool {
        matches!(self, Variant::Classic)
    }

    /// Apples on the board when a game starts
    pub fn initial_food_count(self) -> usize {
        match self {
            Variant::Classic => 1,
            Variant::Walled => 3,
        }
    }

    /// Upper bound (inclusive) for the growth an apple grants
    pub fn max_food_size(self) -> u32 {
        match self {
            Variant::Classic => 1,
            Variant::Walled => 3,
        }
    }

    /// Smallest (width, height) that fits the initial snake
    fn min_grid(self) -> (usize, usize) {
        match self {
            Variant::Classic => (4, 2),
            Variant::Walled => (5, 3),
        }
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    pub variant: Variant,
    /// Seed for apple placement, drawn from the OS when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 10,
            variant: Variant::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Check that the grid can hold the starting snake
    pub fn validate(&self) -> Result<()> {
        let (min_width, min_height) = self.variant.min_grid();
        ensure!(
            self.grid_width >= min_width && self.grid_height >= min_height,
            "grid {}x{} is too small for the {:?} variant (minimum {}x{})",
            self.grid_width,
            self.grid_height,
            self.variant,
            min_width,
            min_height
        );
        ensure!(
            self.grid_width <= MAX_GRID_SIDE && self.grid_height <= MAX_GRID_SIDE,
            "grid {}x{} exceeds the maximum side of {}",
            self.grid_width,
            self.grid_height,
            MAX_GRID_SIDE
        );
        Ok(())
    }
}
