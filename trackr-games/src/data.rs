//! Static coaster reference table shared by Coastle and Higher/Lower.
use serde::{Deserialize, Serialize};

const DEFAULT_COASTER_DATA: &str = include_str!("../data/coasters.json");

/// A single coaster record. Immutable reference data; the engines only
/// read, filter, and sample from the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coaster {
    pub id: u32,
    pub name: String,
    pub park: String,
    pub country: String,
    pub manufacturer: String,
    pub coaster_type: String,
    pub height_m: u16,
    pub speed_kmh: u16,
    pub length_m: u16,
    pub year: u16,
    pub inversions: u8,
}

/// Container for the coaster reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CoasterTable {
    pub coasters: Vec<Coaster>,
}

impl CoasterTable {
    /// Create an empty table (useful for tests).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            coasters: Vec::new(),
        }
    }

    /// Load the coaster table from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid coaster data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load the built-in mock table embedded in the crate.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_COASTER_DATA).unwrap_or_else(|_| Self::empty())
    }

    /// Look up a coaster by id.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&Coaster> {
        self.coasters.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.coasters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coasters.is_empty()
    }
}

/// Raw JSON for the embedded tables, exposed for the static loader.
pub(crate) mod raw {
    pub(crate) const COASTERS: &str = super::DEFAULT_COASTER_DATA;
    pub(crate) const CARDS: &str = include_str!("../data/cards.json");
    pub(crate) const QUESTIONS: &str = include_str!("../data/questions.json");
}
