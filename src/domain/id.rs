use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Identifier of a catalog entry (track, artist or playlist).
///
/// The dataset file mixes numeric and string ids freely, so equality and
/// hashing go through the canonical string form: `EntryId::from(7)` and
/// `EntryId::from("7")` refer to the same entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Num(i64),
    Text(String),
}

impl EntryId {
    pub fn canonical(&self) -> String {
        match self {
            EntryId::Num(n) => n.to_string(),
            EntryId::Text(s) => s.clone(),
        }
    }
}

impl PartialEq for EntryId {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for EntryId {}

impl std::hash::Hash for EntryId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

impl From<i64> for EntryId {
    fn from(n: i64) -> Self {
        EntryId::Num(n)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        EntryId::Text(s.to_string())
    }
}

impl From<String> for EntryId {
    fn from(s: String) -> Self {
        EntryId::Text(s)
    }
}
