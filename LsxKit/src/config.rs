//! TOML configuration
//!
//! ```toml
//! peek_bytes = 16384
//! merge_policy = "later-wins"
//!
//! [limits]
//! max_nodes = 1000000
//! max_depth = 256
//!
//! [region_groups]
//! CharacterCreationPresets = "gameplay"
//! ```
//!
//! Every key is optional.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::formats::lsx::ParseLimits;
use crate::localization::MergePolicy;
use crate::region::{DEFAULT_PEEK_BYTES, RegionGroup, RegionGroupTable};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LsxConfig {
    pub limits: ParseLimits,
    /// Leading bytes inspected when peeking at a document's region.
    pub peek_bytes: usize,
    pub merge_policy: MergePolicy,
    /// Region -> group entries layered over the built-in table.
    pub region_groups: BTreeMap<String, RegionGroup>,
}

impl Default for LsxConfig {
    fn default() -> Self {
        Self {
            limits: ParseLimits::default(),
            peek_bytes: DEFAULT_PEEK_BYTES,
            merge_policy: MergePolicy::default(),
            region_groups: BTreeMap::new(),
        }
    }
}

impl LsxConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid configuration.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// Returns [`crate::Error::ConfigError`] on malformed TOML or unknown values.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        tracing::debug!(
            "Config: max_nodes={}, max_depth={}, {} region overrides",
            config.limits.max_nodes,
            config.limits.max_depth,
            config.region_groups.len()
        );
        Ok(config)
    }

    /// The region-group table this configuration describes.
    #[must_use]
    pub fn region_table(&self) -> RegionGroupTable {
        RegionGroupTable::with_overrides(&self.region_groups)
    }
}
