//! Quote options catalog loading
//!
//! Reads a [`QuoteOptions`] catalog from a JSON file, or falls back to the
//! catalog compiled into this crate.

use quote_domain::QuoteOptions;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const BUILTIN_CATALOG: &str = include_str!("builtin.json");

/// Errors that can occur while loading a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Loads quote options from disk or the built-in catalog
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load from `path` when given, otherwise use the built-in catalog.
    pub fn load(path: Option<&Path>) -> Result<QuoteOptions, CatalogError> {
        match path {
            Some(path) => Self::load_file(path),
            None => Self::builtin(),
        }
    }

    pub fn load_file(path: &Path) -> Result<QuoteOptions, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let options = Self::parse(&content, &path.display().to_string())?;
        debug!(
            path = %path.display(),
            services = options.services.len(),
            features = options.features.len(),
            "Loaded quote catalog"
        );
        Ok(options)
    }

    pub fn builtin() -> Result<QuoteOptions, CatalogError> {
        Self::parse(BUILTIN_CATALOG, "(built-in)")
    }

    fn parse(content: &str, origin: &str) -> Result<QuoteOptions, CatalogError> {
        serde_json::from_str(content).map_err(|source| CatalogError::Parse {
            origin: origin.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_domain::AnswerField;
    use std::io::Write;

    #[test]
    fn test_builtin_catalog_is_complete() {
        let options = CatalogLoader::builtin().unwrap();
        assert!(!options.services.is_empty());
        assert!(!options.project_types.is_empty());
        assert!(!options.budget_ranges.is_empty());
        assert!(!options.timelines.is_empty());
        assert!(!options.features.is_empty());
        assert_eq!(options.choice_at(AnswerField::ServiceType, 1), Some("web"));
        assert_eq!(
            options.project_type("ecommerce").unwrap().description,
            "Sell products online"
        );
    }

    #[test]
    fn test_builtin_ids_are_unique_per_list() {
        let options = CatalogLoader::builtin().unwrap();
        for field in [
            AnswerField::ServiceType,
            AnswerField::ProjectType,
            AnswerField::Budget,
            AnswerField::Timeline,
        ] {
            let mut ids: Vec<&str> = options.choices(field).iter().map(|c| c.id).collect();
            let total = ids.len();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), total, "duplicate id in {}", field);
        }
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"services": [{{"id": "seo", "name": "SEO"}}], "features": ["Audit"]}}"#
        )
        .unwrap();

        let options = CatalogLoader::load(Some(file.path())).unwrap();
        assert_eq!(options.services.len(), 1);
        assert_eq!(options.features, vec!["Audit".to_string()]);
        assert!(options.timelines.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CatalogLoader::load(Some(&dir.path().join("none.json"))).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = CatalogLoader::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }
}
