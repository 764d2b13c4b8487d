use serde::{Deserialize, Serialize};

use crate::{Card, Difficulty};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

/// Two-stop colour ramp a renderer paints behind a card face.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Gradient {
    pub start: &'static str,
    pub end: &'static str,
}

impl Rarity {
    pub const fn gradient(self) -> Gradient {
        use Rarity::*;
        match self {
            Common => Gradient {
                start: "#c0c0c0",
                end: "#e6e6e6",
            },
            Uncommon => Gradient {
                start: "#4b69ff",
                end: "#5e98d9",
            },
            Rare => Gradient {
                start: "#8847ff",
                end: "#b24bff",
            },
            Legendary => Gradient {
                start: "#d32ce6",
                end: "#ffbe40",
            },
        }
    }
}

/// Catalog entry a pair of cards is cut from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub id: u16,
    pub name: &'static str,
    pub rarity: Rarity,
    pub image: &'static str,
}

impl Item {
    const fn new(id: u16, name: &'static str, rarity: Rarity, image: &'static str) -> Self {
        Self {
            id,
            name,
            rarity,
            image,
        }
    }

    /// Card for pair slot 1 or 2 of this item.
    pub fn card(&self, slot: u8) -> Card {
        Card::new(
            format!("{}-{}", self.id, slot),
            self.name,
            self.rarity,
            self.image,
        )
    }
}

/// Master item list. Order matters: it is the input of the seeded shuffle, so reordering changes every board.
pub const CATALOG: &[Item] = &ITEMS;

/// Length of the item list the first browser release shipped with.
pub const CLASSIC_ITEMS: usize = 15;

/// Items a board of `difficulty` is cut from. Boards that fit in the classic list keep using only it, so seeds saved
/// before the catalog grew still deal the same cards.
pub fn catalog_for(difficulty: Difficulty) -> &'static [Item] {
    if usize::from(difficulty.pairs()) <= CLASSIC_ITEMS {
        &CATALOG[..CLASSIC_ITEMS]
    } else {
        CATALOG
    }
}

const ITEMS: [Item; 20] = {
    use Rarity::*;
    [
        Item::new(1, "AK-47", Common, "/images/ak47.png"),
        Item::new(2, "M4A4", Common, "/images/m4a4.png"),
        Item::new(3, "AWP", Rare, "/images/awp.png"),
        Item::new(4, "Desert Eagle", Uncommon, "/images/deagle.png"),
        Item::new(5, "Glock-18", Common, "/images/glock-18.png"),
        Item::new(6, "USP-S", Common, "/images/usp-s.png"),
        Item::new(7, "P250", Common, "/images/p250.png"),
        Item::new(8, "P90", Uncommon, "/images/p90.png"),
        Item::new(9, "MP7", Uncommon, "/images/mp7.png"),
        Item::new(10, "M249", Rare, "/images/m249.png"),
        Item::new(11, "Nova", Uncommon, "/images/nova.png"),
        Item::new(12, "XM1014", Rare, "/images/xm1014.png"),
        Item::new(13, "SSG 08", Uncommon, "/images/ssg-08.png"),
        Item::new(14, "Famas", Uncommon, "/images/famas.png"),
        Item::new(15, "Five Seven", Uncommon, "/images/five-seven.png"),
        Item::new(16, "Galil AR", Common, "/images/galil-ar.png"),
        Item::new(17, "AUG", Uncommon, "/images/aug.png"),
        Item::new(18, "MAC-10", Common, "/images/mac-10.png"),
        Item::new(19, "Karambit", Legendary, "/images/karambit.png"),
        Item::new(20, "Butterfly Knife", Legendary, "/images/butterfly-knife.png"),
    ]
};
