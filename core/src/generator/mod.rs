use crate::*;
pub use prng::*;
pub use seeded::*;

mod prng;
mod seeded;

pub trait BoardGenerator {
    fn generate(self, difficulty: Difficulty) -> Board;
}

/// Shorthand for the stock seeded generator over the built-in catalog.
pub fn generate_board(difficulty: Difficulty, seed: &str) -> Board {
    SeededBoardGenerator::new(seed).generate(difficulty)
}
