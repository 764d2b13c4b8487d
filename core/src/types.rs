use core::ops::Index;
use serde::{Deserialize, Serialize};

use crate::Rarity;

/// Single grid axis, used for board rows and columns.
pub type Dim = u8;

/// Grid dimensions `(rows, cols)`.
pub type Dim2 = (Dim, Dim);

/// Count type used for card and pair totals.
pub type CardCount = u16;

pub const fn mult(a: Dim, b: Dim) -> CardCount {
    let a = a as CardCount;
    let b = b as CardCount;
    a.saturating_mul(b)
}

/// One face of the board. Two cards form a pair when their ids share the base item prefix, e.g. `"3-1"` and `"3-2"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    pub image: String,
}

impl Card {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        rarity: Rarity,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rarity,
            image: image.into(),
        }
    }

    /// Identifier of the catalog item this card was made from.
    pub fn base_id(&self) -> &str {
        self.id
            .split_once('-')
            .map_or(self.id.as_str(), |(base, _)| base)
    }

    pub fn pairs_with(&self, other: &Card) -> bool {
        self.base_id() == other.base_id()
    }
}

/// Ordered card layout, position is the index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn contains_index(&self, index: usize) -> bool {
        index < self.cards.len()
    }

    pub fn is_pair(&self, a: usize, b: usize) -> bool {
        match (self.get(a), self.get(b)) {
            (Some(first), Some(second)) => a != b && first.pairs_with(second),
            _ => false,
        }
    }
}

impl Index<usize> for Board {
    type Output = Card;

    fn index(&self, index: usize) -> &Self::Output {
        &self.cards[index]
    }
}

impl From<Vec<Card>> for Board {
    fn from(cards: Vec<Card>) -> Self {
        Self::from_cards(cards)
    }
}
