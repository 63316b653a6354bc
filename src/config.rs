/// Gallery settings
///
/// Settings are read from a TOML file. The default location is the user's
/// config directory:
/// - Linux: ~/.config/art-gallery/config.toml
/// - macOS: ~/Library/Application Support/art-gallery/config.toml
/// - Windows: %APPDATA%\art-gallery\config.toml
///
/// A missing file is not an error; every key has a default.
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{GalleryError, Result};

/// Public teztok GraphQL endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.teztok.com/v1/graphql";

/// Public IPFS gateway used to rewrite `ipfs://` locators
pub const DEFAULT_GATEWAY: &str = "https://ipfs.io/ipfs/";

/// Creator profile page, `{address}` is replaced by the creator's address
pub const DEFAULT_PROFILE_URL: &str = "https://objkt.com/profile/{address}/created";

/// The collection the unranked and recency views are built from
pub const DEFAULT_REFERENCE_ADDRESS: &str = "tz1YPUoCAGcKYa4T8pYiKFvSg1ivVVUahRuX";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// GraphQL endpoint of the indexer
    pub endpoint: String,
    /// Gateway base URL, must end with a slash
    pub gateway: String,
    /// Creator profile URL template
    pub profile_url: String,
    /// Holder address for the unranked and recency views
    pub reference_address: String,
    /// Tiles per page
    pub items_per_page: usize,
    /// Window size fetched once by the unranked view
    pub bulk_limit: usize,
    /// Per-attempt timeout for preview images
    pub image_timeout_secs: u64,
    /// Longest edge of decoded previews, in pixels
    pub preview_size: u32,
    pub pages: PageCounts,
    pub block_list: BlockList,
}

/// Fixed page counts per view.
///
/// These are not derived from the indexer; they reflect the collection size
/// at the time they were chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageCounts {
    pub unranked: usize,
    pub recency: usize,
    pub address: usize,
}

/// Works hidden from the unranked view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockList {
    /// Matched against a record's first creator
    pub creators: Vec<String>,
    /// Matched against a record's exact name
    pub names: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            gateway: DEFAULT_GATEWAY.to_string(),
            profile_url: DEFAULT_PROFILE_URL.to_string(),
            reference_address: DEFAULT_REFERENCE_ADDRESS.to_string(),
            items_per_page: 24,
            bulk_limit: 1000,
            image_timeout_secs: 10,
            preview_size: 500,
            pages: PageCounts::default(),
            block_list: BlockList::default(),
        }
    }
}

impl Default for PageCounts {
    fn default() -> Self {
        Self {
            unranked: 7,
            recency: 10,
            address: 7,
        }
    }
}

impl Default for BlockList {
    fn default() -> Self {
        Self {
            creators: vec![
                "tz1erY7SqRTAM6UmdwzfmQ48VqB6675uUrHH".to_string(),
                "tz1LtRavzB4VYRuYwcMbohYnV6SU2iRnU5DF".to_string(),
            ],
            names: [
                "Windowlicker",
                "Tightening",
                "Nude Pixel 35",
                "The Love Distortion",
                "Vaim Violence",
                "Feather Therapy",
                "WILD VIOLET",
                "YUCK FOU",
            ]
            .iter()
            .map(|name| name.to_string())
            .collect(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from the default location when `None`.
    ///
    /// Returns defaults when the file does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(err) => return Err(GalleryError::io(path, err)),
        };

        let settings = Self::from_toml(&contents)
            .map_err(|source| GalleryError::Config { path: path.clone(), source })?;
        tracing::info!(path = %path.display(), "⚙️  Loaded config");
        Ok(settings)
    }

    /// Parse settings from TOML text
    pub fn from_toml(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Get the path where the config file is expected
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("art-gallery");
        path.push("config.toml");
        Some(path)
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.image_timeout_secs)
    }

    /// Creator profile link for `address`
    pub fn profile_link(&self, address: &str) -> String {
        self.profile_url.replace("{address}", address)
    }
}
