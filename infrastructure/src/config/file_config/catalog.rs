//! Catalog configuration from TOML (`[catalog]` section)

use super::expand_home;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw catalog configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCatalogConfig {
    /// JSON file with quote options; the built-in catalog is used when unset
    pub path: Option<String>,
}

impl FileCatalogConfig {
    pub fn path(&self) -> Option<PathBuf> {
        self.path.as_deref().map(expand_home)
    }
}
