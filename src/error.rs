//! Error taxonomy for catalog lookups, navigation and loading.
//!
//! There is no "section has no content" error: the resolver returns an empty
//! result for it, which keeps missing data apart from a bad request.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// A model lookup referenced a name the catalog does not contain.
    #[error("{kind} '{name}' not found in catalog")]
    NotFound { kind: &'static str, name: String },
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
    #[error("unknown species '{species}' in category '{category}'")]
    UnknownSpecies { category: String, species: String },
    /// Navigation skipped a level (e.g. species before category).
    #[error("select a {need} first")]
    Sequence { need: &'static str },
    #[error("catalog has not finished loading")]
    NotReady,
    #[error(transparent)]
    Load(#[from] LoadError),
}

impl CatalogError {
    pub(crate) fn category_not_found(name: &str) -> Self {
        CatalogError::NotFound {
            kind: "category",
            name: name.to_string(),
        }
    }

    pub(crate) fn species_not_found(name: &str) -> Self {
        CatalogError::NotFound {
            kind: "species",
            name: name.to_string(),
        }
    }
}

/// Failure to turn a data source into parsed JSON.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {origin}")]
    Io {
        origin: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{origin} is not valid JSON (line {line}, column {column})")]
    Parse {
        origin: String,
        line: usize,
        column: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("{origin} is empty")]
    Empty { origin: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = CatalogError::UnknownSpecies {
            category: "조개류".to_string(),
            species: "고등어".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unknown species '고등어' in category '조개류'"
        );
        assert_eq!(
            CatalogError::Sequence { need: "category" }.to_string(),
            "select a category first"
        );
        assert_eq!(
            CatalogError::species_not_found("갈치").to_string(),
            "species '갈치' not found in catalog"
        );
    }

    #[test]
    fn load_errors_convert_into_catalog_errors() {
        let err: CatalogError = LoadError::Empty {
            origin: "stdin".to_string(),
        }
        .into();
        assert!(matches!(err, CatalogError::Load(LoadError::Empty { .. })));
        assert_eq!(err.to_string(), "stdin is empty");
    }
}
