//! Collectible coaster cards and their battle perks.
use serde::{Deserialize, Serialize};

use crate::data::raw;

/// Card rarity tier. Controls drop odds and visual tier only; battle
/// strength comes from the stats themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// The stat compared in a battle round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleStat {
    Height,
    Speed,
    Intensity,
}

/// Per-card battle stats, each bounded to 0..=10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardStats {
    pub height: u8,
    pub speed: u8,
    pub intensity: u8,
}

impl CardStats {
    #[must_use]
    pub const fn get(self, stat: BattleStat) -> u8 {
        match stat {
            BattleStat::Height => self.height,
            BattleStat::Speed => self.speed,
            BattleStat::Intensity => self.intensity,
        }
    }
}

/// Manufacturer-keyed battle modifier. Conditional perks are closed
/// variants so resolution sites match exhaustively instead of keying off
/// manufacturer strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Perk {
    /// No battle modifier.
    None,
    /// Flat signed bonus to one stat, applied before comparison.
    StatBonus { stat: BattleStat, amount: i8 },
    /// GCI: +2 intensity when the final round compares intensity.
    FinaleSurge,
    /// Vekoma: +1 to the compared stat, but only when already strictly
    /// ahead after static perks. Widens a lead; never flips a loss.
    LeaderAmplify,
}

/// A collectible card. Immutable once generated except for the unlocked
/// flag, which the collection owner flips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoasterCard {
    pub id: u32,
    pub name: String,
    pub manufacturer: String,
    pub rarity: Rarity,
    pub stats: CardStats,
    pub perk: Perk,
    pub unlocked: bool,
}

/// Container for the card reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CardTable {
    pub cards: Vec<CoasterCard>,
}

impl CardTable {
    /// Create an empty table (useful for tests).
    #[must_use]
    pub fn empty() -> Self {
        Self { cards: Vec::new() }
    }

    /// Load the card table from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid card data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load the built-in mock table embedded in the crate.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(raw::CARDS).unwrap_or_else(|_| Self::empty())
    }

    /// Look up a card by id.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&CoasterCard> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Cards the player has unlocked.
    #[must_use]
    pub fn unlocked(&self) -> Vec<&CoasterCard> {
        self.cards.iter().filter(|c| c.unlocked).collect()
    }
}
