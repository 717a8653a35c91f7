//! Section lookup for one species.
//!
//! The resolver is the only place that decides what "show ALL" means, so the
//! presence check on `SectionSet` and the chat menu both go through it.

use crate::catalog::{SectionContent, SectionKey, SectionSet};
use crate::normalize::resolve_key;
use serde::Serialize;
use std::fmt;

/// Labels that request every section at once.
const ALL_LABELS: &[&str] = &["ALL", "all", "전체 보기", "전체보기"];

/// A request for one section or for all of them.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionQuery {
    All,
    Single(SectionKey),
}

impl SectionQuery {
    /// Parse a menu label. Known aliases map to their canonical key and
    /// anything else becomes an extras lookup under the trimmed label.
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        if ALL_LABELS.contains(&label) {
            SectionQuery::All
        } else {
            SectionQuery::Single(resolve_key(label))
        }
    }

    /// Heading shown in menus and above rendered content.
    pub fn display_label(&self) -> &str {
        match self {
            SectionQuery::All => "전체 보기",
            SectionQuery::Single(key) => key.display_label(),
        }
    }
}

impl From<SectionKey> for SectionQuery {
    fn from(key: SectionKey) -> Self {
        SectionQuery::Single(key)
    }
}

impl fmt::Display for SectionQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionQuery::All => f.write_str("ALL"),
            SectionQuery::Single(key) => write!(f, "{key}"),
        }
    }
}

/// Sections matching `query`, in display order.
///
/// A single key yields zero or one entry; zero means the species has no data
/// for it. `All` yields every stored section: the fixed keys in display order
/// (overview first), then extras in encounter order.
pub fn resolve_section<'a>(
    set: &'a SectionSet,
    query: &SectionQuery,
) -> Vec<(SectionKey, &'a SectionContent)> {
    match query {
        SectionQuery::Single(key) => set
            .get(key)
            .filter(|content| !content.is_empty())
            .map(|content| vec![(key.clone(), content)])
            .unwrap_or_default(),
        SectionQuery::All => {
            let fixed = SectionKey::DISPLAY_ORDER
                .into_iter()
                .filter_map(|key| set.get(&key).map(|content| (key, content)));
            let extras = set
                .extras()
                .map(|(name, content)| (SectionKey::Extra(name.to_string()), content));
            fixed
                .chain(extras)
                .filter(|(_, content)| !content.is_empty())
                .collect()
        }
    }
}

impl SectionSet {
    /// Whether the resolver would return anything for `key`.
    pub fn has(&self, key: &SectionKey) -> bool {
        !resolve_section(self, &SectionQuery::Single(key.clone())).is_empty()
    }
}
