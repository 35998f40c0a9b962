//! JSON mapping file.
//!
//! ```json
//! {
//!   "safe": [
//!     {
//!       "a": {"venue": "kalshi", "market_id": "KXBTC-25DEC31-T100000"},
//!       "b": {"venue": "polymarket", "market_id": "bitcoin-above-100k-on-december-31"},
//!       "polarity": "same"
//!     }
//!   ],
//!   "lab": []
//! }
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::domain::MappingTable;
use crate::error::{MappingError, Result};
use crate::port::MappingSource;

/// Mapping table stored as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonMappingFile {
    path: PathBuf,
}

impl JsonMappingFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MappingSource for JsonMappingFile {
    fn load_mappings(&self) -> Result<Option<MappingTable>> {
        let path = self.path.display().to_string();
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path, "Mapping file not found");
                return Ok(None);
            }
            Err(source) => {
                return Err(MappingError::Read {
                    path,
                    source,
                }
                .into())
            }
        };

        let table: MappingTable =
            serde_json::from_str(&content).map_err(|source| MappingError::Parse {
                path: path.clone(),
                source,
            })?;
        let table = table.tagged();

        info!(
            path = %path,
            safe = table.safe().len(),
            lab = table.lab().len(),
            "Loaded mappings"
        );
        Ok(Some(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tier;
    use crate::error::Error;
    use std::io::Write;

    #[test]
    fn missing_file_is_none() {
        let source = JsonMappingFile::new("/nonexistent/arbscan/mappings.json");
        assert!(source.load_mappings().unwrap().is_none());
    }

    #[test]
    fn loads_and_tags_tiers() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "safe": [{{"a": {{"venue": "kalshi", "market_id": "K1"}}, "b": {{"venue": "polymarket", "market_id": "p1"}}}}],
                "lab": [{{"a": {{"venue": "kalshi", "market_id": "K2"}}, "b": {{"venue": "polymarket", "market_id": "p2", "yes_label": "Over"}}, "polarity": "inverse"}}]
            }}"#
        )
        .unwrap();

        let table = JsonMappingFile::new(file.path()).load_mappings().unwrap().unwrap();
        assert_eq!(table.safe()[0].tier, Tier::Safe);
        assert_eq!(table.lab()[0].tier, Tier::Lab);
        assert_eq!(table.lab()[0].b.yes_label, "Over");
    }

    #[test]
    fn invalid_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[not json").unwrap();
        let err = JsonMappingFile::new(file.path()).load_mappings().unwrap_err();
        assert!(matches!(err, Error::Mapping(MappingError::Parse { .. })));
    }

    #[test]
    fn errors_name_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"safe\": 3}}").unwrap();
        let path = file.path().display().to_string();

        let err = JsonMappingFile::new(file.path()).load_mappings().unwrap_err();
        assert!(err.to_string().contains(&path), "{err}");

        let dir = tempfile::tempdir().unwrap();
        let err = JsonMappingFile::new(dir.path()).load_mappings().unwrap_err();
        assert!(matches!(err, Error::Mapping(MappingError::Read { .. })));
        assert!(err.to_string().contains(&dir.path().display().to_string()));
    }
}
