use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub use catalog::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use history::*;
pub use persistence::*;
pub use runtime::*;
pub use state::*;
pub use types::*;

mod catalog;
mod config;
mod engine;
mod error;
mod generator;
mod history;
mod persistence;
mod runtime;
mod state;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

/// Board size preset, the only knob a player picks before a game.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Grid dimensions as `(rows, cols)`.
    pub const fn dimensions(self) -> Dim2 {
        use Difficulty::*;
        match self {
            Easy => (4, 4),
            Medium => (6, 4),
            Hard => (6, 6),
        }
    }

    pub const fn total_cards(self) -> CardCount {
        let (rows, cols) = self.dimensions();
        mult(rows, cols)
    }

    pub const fn pairs(self) -> CardCount {
        self.total_cards() / 2
    }

    pub const fn name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "easy",
            Medium => "medium",
            Hard => "hard",
        }
    }

    /// Difficulty to grid dimension table, used by renderers for layout.
    pub fn dimension_table() -> [(Difficulty, Dim2); 3] {
        Self::ALL.map(|difficulty| (difficulty, difficulty.dimensions()))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::UnknownDifficulty(s.to_owned()))
    }
}
