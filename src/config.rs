use crate::PlacementRule;

/// Tunables for a [`crate::Game`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Fraction of the monitor the window may take up.
    pub window_size: f64,
    /// Fraction of a cell a drawn square covers.
    pub square_amount: f32,
    /// Chance, in percent, that each of a pattern's sub-cells is filled.
    pub square_probability: u32,
    /// Draw again instead of handing out a piece with no filled sub-cells.
    pub reroll_empty: bool,
    pub placement: PlacementRule,
    /// Alpha of the preview drawn where a dragged piece would land.
    pub shadow_alpha: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_size: 0.8,
            square_amount: 0.95,
            square_probability: 35,
            reroll_empty: true,
            placement: PlacementRule::default(),
            shadow_alpha: 100,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Clone, Copy)]
pub enum ConfigError {
    #[error("window size must be in (0, 1], got {0}")]
    WindowSize(f64),
    #[error("square amount must be in (0, 1], got {0}")]
    SquareAmount(f32),
    #[error("square probability is a percentage, got {0}")]
    SquareProbability(u32),
    #[error("rerolling empty pieces never terminates with a square probability of 0")]
    RerollNeverTerminates,
    #[error("cell size must be in 1..={max}, got {0}", max = crate::MAX_CELL_SIZE)]
    CellSize(i32),
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.window_size > 0.0 && self.window_size <= 1.0) {
            return Err(ConfigError::WindowSize(self.window_size));
        }
        if !(self.square_amount > 0.0 && self.square_amount <= 1.0) {
            return Err(ConfigError::SquareAmount(self.square_amount));
        }
        if self.square_probability > 100 {
            return Err(ConfigError::SquareProbability(self.square_probability));
        }
        if self.reroll_empty && self.square_probability == 0 {
            return Err(ConfigError::RerollNeverTerminates);
        }
        Ok(())
    }
}
