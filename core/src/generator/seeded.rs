use super::*;

/// Builds boards purely from a seed string: a Fisher–Yates pass picks the items, then a draw-without-replacement
/// pass lays out the cards.
#[derive(Clone, Debug, PartialEq)]
pub struct SeededBoardGenerator {
    seed: String,
    catalog: Option<&'static [Item]>,
}

impl SeededBoardGenerator {
    /// Generator over the built-in items, see [`catalog_for`].
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            catalog: None,
        }
    }

    pub fn with_catalog(seed: impl Into<String>, catalog: &'static [Item]) -> Self {
        Self {
            seed: seed.into(),
            catalog: Some(catalog),
        }
    }

    /// Index in `0..bound` drawn from the seed salted with `salt`.
    fn draw(&self, salt: usize, bound: usize) -> usize {
        let value = seeded_value(&format!("{}{}", self.seed, salt));
        ((value * bound as f64).floor() as usize).min(bound - 1)
    }
}

impl BoardGenerator for SeededBoardGenerator {
    fn generate(self, difficulty: Difficulty) -> Board {
        let pairs = usize::from(difficulty.pairs());

        let catalog = self.catalog.unwrap_or_else(|| catalog_for(difficulty));
        let mut items = catalog.to_vec();
        for i in (1..items.len()).rev() {
            let j = self.draw(i, i + 1);
            items.swap(i, j);
        }

        if items.len() < pairs {
            log::warn!(
                "Catalog too small for {}, requested {} pairs but only has {}",
                difficulty,
                pairs,
                items.len()
            );
        }

        let mut pool: Vec<Card> = items
            .iter()
            .take(pairs)
            .flat_map(|item| [item.card(1), item.card(2)])
            .collect();

        let mut cards = Vec::with_capacity(pool.len());
        while !pool.is_empty() {
            let remaining = pool.len();
            let pick = self.draw(remaining, remaining);
            cards.push(pool.remove(pick));
        }

        log::debug!(
            "Generated {} board from seed {:?} with {} cards",
            difficulty,
            self.seed,
            cards.len()
        );
        Board::from_cards(cards)
    }
}
