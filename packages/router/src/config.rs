//! Router configuration.
//!
//! A [`RouterConfig`] is built once, usually from a JSON document, and handed
//! to the router. Nothing is read from the environment.
//!
//! ```json
//! {
//!   "metadata_subvolumes": "mds-0:mds-1",
//!   "data_subvolumes": "ds-0:ds-1:ds-2",
//!   "layout": "static-bucket",
//!   "debug": false
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use rio_layout::{BucketLayout, LayoutError, Layouts, Plane};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator between subvolume names in a list.
pub const SUBVOLUME_SEPARATOR: char = ':';

/// Errors from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),

    /// A subvolume is listed on both planes.
    #[error("subvolume {name} is listed as both metadata and data")]
    OverlappingPlanes { name: String },

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Which layout implementation resolves routing keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    /// Fixed GFID buckets dealt round-robin over each plane's subvolumes.
    #[default]
    StaticBucket,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// Colon-separated metadata subvolume names, in layout order.
    pub metadata_subvolumes: String,
    /// Colon-separated data subvolume names, in layout order.
    pub data_subvolumes: String,
    #[serde(default)]
    pub layout: LayoutKind,
    /// Log dispatch decisions at info level.
    #[serde(default)]
    pub debug: bool,
}

impl RouterConfig {
    pub fn new(metadata_subvolumes: impl Into<String>, data_subvolumes: impl Into<String>) -> Self {
        Self {
            metadata_subvolumes: metadata_subvolumes.into(),
            data_subvolumes: data_subvolumes.into(),
            layout: LayoutKind::default(),
            debug: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn metadata_names(&self) -> Vec<&str> {
        split_names(&self.metadata_subvolumes)
    }

    pub fn data_names(&self) -> Vec<&str> {
        split_names(&self.data_subvolumes)
    }

    /// The names configured for `plane`.
    pub fn names(&self, plane: Plane) -> Vec<&str> {
        match plane {
            Plane::Metadata => self.metadata_names(),
            Plane::Data => self.data_names(),
        }
    }

    /// Check that the planes are disjoint.
    ///
    /// Empty and duplicate lists are caught when the layouts are built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let metadata: HashSet<&str> = self.metadata_names().into_iter().collect();
        match self.data_names().into_iter().find(|name| metadata.contains(name)) {
            Some(name) => Err(ConfigError::OverlappingPlanes {
                name: name.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Validate, then build one layout per plane.
    pub fn build_layouts(&self) -> Result<Layouts, ConfigError> {
        self.validate()?;
        match self.layout {
            LayoutKind::StaticBucket => {
                let metadata = BucketLayout::new(Plane::Metadata, self.metadata_names())?;
                let data = BucketLayout::new(Plane::Data, self.data_names())?;
                Ok(Layouts::new(metadata, data))
            }
        }
    }
}

fn split_names(list: &str) -> Vec<&str> {
    list.split(SUBVOLUME_SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}
