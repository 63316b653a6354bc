/// Shared data structures for the application state
///
/// These structs mirror what the indexer returns and flow unchanged
/// from the fetcher into the gallery and its tiles.
use serde::{Deserialize, Deserializer, Serialize};

/// One token's metadata as returned by the indexer.
///
/// Every field is optional on the wire. A record with holes still renders;
/// the media classifier falls through to whatever is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtRecord {
    /// Operation hash of the mint, used as the tile key
    pub ophash: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Mint time
    pub timestamp: Option<String>,
    #[serde(deserialize_with = "lenient_u64")]
    pub supply: Option<u64>,
    pub display_uri: Option<String>,
    pub thumbnail_uri: Option<String>,
    pub artifact_uri: Option<String>,
    /// Alternate renditions, the first one drives the rendering strategy
    #[serde(deserialize_with = "null_as_empty")]
    pub extra: Vec<Rendition>,
    #[serde(deserialize_with = "null_as_empty")]
    pub creators: Vec<Creator>,
    pub mime: Option<String>,
    pub symbol: Option<String>,
    pub rights: Option<String>,
    pub flag: Option<String>,
    pub metadata: Option<String>,
    pub tzip16_key: Option<String>,
    #[serde(deserialize_with = "lenient_u64")]
    pub decimals: Option<u64>,
    pub is_boolean_amount: Option<bool>,
    /// Market and bookkeeping fields; their numeric encoding varies between
    /// indexer versions, so they are kept as raw JSON.
    pub average: Option<serde_json::Value>,
    pub highest_offer: Option<serde_json::Value>,
    pub lowest_ask: Option<serde_json::Value>,
    pub last_listed: Option<serde_json::Value>,
    pub last_metadata_update: Option<serde_json::Value>,
    pub level: Option<serde_json::Value>,
}

/// One entry of a record's `extra` list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rendition {
    pub mime_type: Option<String>,
    #[serde(deserialize_with = "lenient_u64")]
    pub size: Option<u64>,
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Creator {
    pub creator_address: Option<String>,
}

/// A `token_holder` row: one record plus when the holder last received it
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Holding {
    pub last_incremented_at: Option<String>,
    pub token: ArtRecord,
}

impl ArtRecord {
    /// First entry of `extra`, if any
    pub fn primary_rendition(&self) -> Option<&Rendition> {
        self.extra.first()
    }

    /// MIME type declared by the first rendition
    pub fn primary_mime(&self) -> Option<&str> {
        self.primary_rendition()?.mime_type.as_deref()
    }

    /// Locator of the first rendition
    pub fn primary_uri(&self) -> Option<&str> {
        self.primary_rendition()?.uri.as_deref()
    }

    /// Address of the first listed creator
    pub fn first_creator(&self) -> Option<&str> {
        self.creators.first()?.creator_address.as_deref()
    }

    /// Stable key for a tile; falls back to the position when the record
    /// has no operation hash.
    pub fn tile_key(&self, index: usize) -> String {
        match self.ophash.as_deref() {
            Some(hash) if !hash.is_empty() => format!("{}-{}", hash, index),
            _ => format!("#{}", index),
        }
    }
}

/// Accept a number, a numeric string or null
fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Treat an explicit null list like an empty one
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
