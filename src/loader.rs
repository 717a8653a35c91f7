//! Data-source plumbing: bytes in, parsed JSON out.
//!
//! The loader knows nothing about catalog shapes; it reads a source, strips a
//! UTF-8 byte-order mark, and parses JSON. Shape detection happens in
//! [`crate::normalize`].

use crate::error::LoadError;
use serde_json::Value;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming the dataset path.
pub const DATA_ENV: &str = "SEAFOOD_FACTS_DATA";

/// Paths tried, relative to the working directory, when no explicit path is
/// given.
pub const DEFAULT_DATA_PATHS: &[&str] = &["health_fish.json", "docs/health_fish.json"];

/// Sample dataset compiled into the crate.
pub const BUNDLED_CATALOG: &str = include_str!("../data/health_fish.json");

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Where catalog bytes come from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CatalogSource {
    File(PathBuf),
    Stdin,
    /// Inline JSON text, e.g. the bundled fallback.
    Inline { origin: String, text: String },
}

impl CatalogSource {
    pub fn bundled() -> Self {
        CatalogSource::Inline {
            origin: "bundled dataset".to_string(),
            text: BUNDLED_CATALOG.to_string(),
        }
    }

    /// Human-readable origin used in errors and logs.
    pub fn origin(&self) -> String {
        match self {
            CatalogSource::File(path) => path.display().to_string(),
            CatalogSource::Stdin => "stdin".to_string(),
            CatalogSource::Inline { origin, .. } => origin.clone(),
        }
    }

    /// Read and parse the source.
    pub fn load(&self) -> Result<Value, LoadError> {
        let origin = self.origin();
        let bytes = self.read_bytes(&origin)?;
        debug!(origin = %origin, bytes = bytes.len(), "read catalog source");
        decode_catalog_bytes(&bytes, &origin)
    }

    fn read_bytes(&self, origin: &str) -> Result<Vec<u8>, LoadError> {
        let io_error = |source: io::Error| LoadError::Io {
            origin: origin.to_string(),
            source,
        };
        match self {
            CatalogSource::File(path) => fs::read(path).map_err(io_error),
            CatalogSource::Stdin => {
                let mut buf = Vec::new();
                io::stdin().read_to_end(&mut buf).map_err(io_error)?;
                Ok(buf)
            }
            CatalogSource::Inline { text, .. } => Ok(text.as_bytes().to_vec()),
        }
    }
}

/// Parse catalog bytes, tolerating a leading BOM. Whitespace-only input is
/// `Empty` rather than a parse error.
pub fn decode_catalog_bytes(bytes: &[u8], origin: &str) -> Result<Value, LoadError> {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(LoadError::Empty {
            origin: origin.to_string(),
        });
    }
    serde_json::from_slice(body).map_err(|source| LoadError::Parse {
        origin: origin.to_string(),
        line: source.line(),
        column: source.column(),
        source,
    })
}

/// Resolve the dataset path.
///
/// Order: an explicit path, then the `SEAFOOD_FACTS_DATA` hint, then the
/// default locations under `cwd`. Explicit and hinted paths are returned even
/// if missing so the read error names them; defaults must exist as files.
pub fn resolve_data_path(
    explicit: Option<&Path>,
    env_hint: Option<OsString>,
    cwd: &Path,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(hint) = env_hint.filter(|hint| !hint.is_empty()) {
        return Some(PathBuf::from(hint));
    }
    DEFAULT_DATA_PATHS
        .iter()
        .map(|relative| cwd.join(relative))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn bom_is_stripped_before_parsing() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(br#"{"categories": {}}"#);
        let value = decode_catalog_bytes(&bytes, "test").unwrap();
        assert_eq!(value, json!({"categories": {}}));
    }

    #[test]
    fn empty_and_invalid_input_are_distinct_errors() {
        assert!(matches!(
            decode_catalog_bytes(b" \n", "blank"),
            Err(LoadError::Empty { .. })
        ));
        assert!(matches!(
            decode_catalog_bytes(UTF8_BOM, "bom only"),
            Err(LoadError::Empty { .. })
        ));
        match decode_catalog_bytes(b"{\n  \"categories\": ", "broken.json") {
            Err(LoadError::Parse { origin, line, .. }) => {
                assert_eq!(origin, "broken.json");
                assert_eq!(line, 2);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn file_source_reports_missing_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.json");
        let err = CatalogSource::File(missing.clone()).load().unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn bundled_dataset_parses() {
        let value = CatalogSource::bundled().load().unwrap();
        assert!(value.get("categories").is_some());
    }

    #[test]
    fn data_path_resolution_order() {
        let dir = TempDir::new().unwrap();
        let cwd = dir.path();
        assert_eq!(resolve_data_path(None, None, cwd), None);

        fs::create_dir(cwd.join("docs")).unwrap();
        fs::write(cwd.join("docs/health_fish.json"), "{}").unwrap();
        assert_eq!(
            resolve_data_path(None, None, cwd),
            Some(cwd.join("docs/health_fish.json"))
        );

        fs::write(cwd.join("health_fish.json"), "{}").unwrap();
        assert_eq!(
            resolve_data_path(None, None, cwd),
            Some(cwd.join("health_fish.json"))
        );

        let hinted = PathBuf::from("/data/fish.json");
        assert_eq!(
            resolve_data_path(None, Some(OsString::from("/data/fish.json")), cwd),
            Some(hinted.clone())
        );
        assert_eq!(
            resolve_data_path(None, Some(OsString::new()), cwd),
            Some(cwd.join("health_fish.json"))
        );

        let explicit = Path::new("custom.json");
        assert_eq!(
            resolve_data_path(Some(explicit), Some(OsString::from("/data/fish.json")), cwd),
            Some(PathBuf::from("custom.json"))
        );
    }
}
