//! Creature records delivered by the catalog.

use serde::{Deserialize, Serialize};

/// One creature from the catalog: what a pair of cards shows.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatureRecord {
    /// Catalog id; becomes the pair key of both cards.
    pub id: u32,

    /// Display name.
    pub name: String,

    /// Sprite URL.
    pub image_url: String,
}

impl CreatureRecord {
    /// Create a record.
    pub fn new(id: u32, name: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image_url: image_url.into(),
        }
    }
}
