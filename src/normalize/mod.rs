//! Turns any supported dataset layout into a canonical `CatalogModel`.
//!
//! Normalization never fails: unrecognized input yields an empty model plus a
//! `MalformedInput` warning, and per-record problems are skipped with a
//! warning describing what was dropped. Every warning is also logged.

pub mod aliases;
mod content;
mod shapes;

use crate::catalog::{
    CatalogBuilder, CatalogModel, CategoryName, SectionSet, SpeciesName, SpeciesRecord,
};
use serde::Serialize;
use serde_json::Value;
use shapes::{DraftCategory, PROBES, SectionFields};
use std::fmt;
use tracing::{debug, warn};

pub use aliases::{canonical_key, resolve_key};

/// Dataset layout recognized by the probes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputShape {
    /// `{categories: {cat: [species]}, items|details: {...}}`
    LegacyObject,
    /// `{categories: [{name, items: [...]}]}`
    CategoryArray,
    /// `[{name, items: [...]}]`
    BareArray,
}

impl InputShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputShape::LegacyObject => "legacy_object",
            InputShape::CategoryArray => "category_array",
            InputShape::BareArray => "bare_array",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// No probe recognized the input.
    MalformedInput,
    /// A species record no category lists.
    UnownedSpecies,
    /// A listed species has no usable record.
    MissingRecord,
    /// The legacy layout lacks its `items`/`details` map.
    MissingItems,
    InvalidName,
    /// A species entry whose `sections` value is not an object.
    MalformedSections,
    DuplicateCategory,
    DuplicateSpecies,
    /// Nutrient or table rows without a discernible label.
    SkippedRow,
}

/// Non-fatal normalization problem.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of normalizing one raw document.
#[derive(Debug)]
pub struct Normalized {
    pub model: CatalogModel,
    pub warnings: Vec<Warning>,
    /// Layout that matched, or `None` when nothing did.
    pub shape: Option<InputShape>,
}

impl Normalized {
    pub fn into_parts(self) -> (CatalogModel, Vec<Warning>) {
        (self.model, self.warnings)
    }
}

/// Normalize a parsed dataset into the canonical model.
pub fn normalize(raw: &Value) -> Normalized {
    for (shape, probe) in PROBES {
        let Some(draft) = probe(raw) else {
            continue;
        };
        let mut warnings = draft.warnings;
        let model = assemble(draft.categories, &mut warnings);
        debug!(
            shape = shape.as_str(),
            categories = model.list_categories().len(),
            species = model.species_count(),
            warnings = warnings.len(),
            "normalized catalog"
        );
        log_warnings(&warnings);
        return Normalized {
            model,
            warnings,
            shape: Some(*shape),
        };
    }

    let warnings = vec![Warning::new(
        WarningKind::MalformedInput,
        format!(
            "unrecognized catalog layout (top level is {}); loaded an empty catalog",
            shapes::json_kind(raw)
        ),
    )];
    log_warnings(&warnings);
    Normalized {
        model: CatalogModel::default(),
        warnings,
        shape: None,
    }
}

fn assemble(categories: Vec<DraftCategory<'_>>, warnings: &mut Vec<Warning>) -> CatalogModel {
    let mut builder = CatalogBuilder::default();
    for category in categories {
        let (position, existed) = builder.ensure_category(CategoryName(category.name.clone()));
        if existed {
            warnings.push(Warning::new(
                WarningKind::DuplicateCategory,
                format!(
                    "category '{}' appears more than once; species merged into the first",
                    category.name
                ),
            ));
        }
        for species in category.species {
            // Duplicates are dropped before their sections are shaped.
            if builder.contains_species(position, &species.name) {
                warnings.push(Warning::new(
                    WarningKind::DuplicateSpecies,
                    format!(
                        "species '{}' listed twice in category '{}'; keeping the first",
                        species.name, category.name
                    ),
                ));
                continue;
            }
            let sections = section_set(&species.name, species.fields, warnings);
            let record = SpeciesRecord {
                name: SpeciesName(species.name),
                sections,
            };
            if let Err(rejected) = builder.push_species(position, record) {
                debug!(species = %rejected.name, "species rejected by builder");
            }
        }
    }
    builder.build()
}

fn section_set(
    species: &str,
    fields: SectionFields<'_>,
    warnings: &mut Vec<Warning>,
) -> SectionSet {
    let mut sections = SectionSet::default();
    for (label, value) in fields.entries() {
        let key = resolve_key(label);
        let shaped = content::normalize_section(&key, value);
        if shaped.skipped_rows > 0 {
            warnings.push(Warning::new(
                WarningKind::SkippedRow,
                format!(
                    "species '{species}' section '{label}': skipped {} row(s) without a label",
                    shaped.skipped_rows
                ),
            ));
        }
        if let Some(content) = shaped.content {
            sections.insert(key, content);
        }
    }
    sections
}

fn log_warnings(warnings: &[Warning]) {
    for warning in warnings {
        warn!(kind = ?warning.kind, "{}", warning.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{SectionContent, SectionKey};
    use serde_json::json;

    #[test]
    fn unrecognized_input_degrades_to_empty_model() {
        for raw in [json!("문자열"), json!(42), json!(null), json!({"foo": 1})] {
            let normalized = normalize(&raw);
            assert!(normalized.model.is_empty());
            assert_eq!(normalized.shape, None);
            assert_eq!(normalized.warnings.len(), 1);
            assert_eq!(normalized.warnings[0].kind, WarningKind::MalformedInput);
        }
    }

    #[test]
    fn sections_are_keyed_by_alias_and_extras_kept() {
        let raw = json!({
            "categories": {"등푸른생선": ["고등어"]},
            "items": {"고등어": {
                "주요 영양소": ["단백질: 20g"],
                "efficacy": "혈관 건강",
                "보관법": "냉장"
            }}
        });
        let normalized = normalize(&raw);
        assert_eq!(normalized.shape, Some(InputShape::LegacyObject));
        assert!(normalized.warnings.is_empty());
        let sections = normalized.model.get_sections("고등어").unwrap();
        assert_eq!(
            sections.get(&SectionKey::Nutrients),
            Some(&SectionContent::Table(vec![("단백질".into(), "20g".into())]))
        );
        assert_eq!(
            sections.get(&SectionKey::Efficacy),
            Some(&SectionContent::List(vec!["혈관 건강".into()]))
        );
        assert_eq!(
            sections.get(&SectionKey::Extra("보관법".into())),
            Some(&SectionContent::Text("냉장".into()))
        );
    }

    #[test]
    fn duplicates_are_merged_or_dropped_with_warnings() {
        let raw = json!([
            {"name": "조개류", "items": ["굴", {"name": "굴", "효능": "아연"}]},
            {"name": "조개류", "items": ["전복"]}
        ]);
        let normalized = normalize(&raw);
        let species: Vec<&str> = normalized
            .model
            .list_species("조개류")
            .unwrap()
            .into_iter()
            .map(|s| s.as_str())
            .collect();
        assert_eq!(species, vec!["굴", "전복"]);
        let kinds: Vec<WarningKind> = normalized.warnings.iter().map(|w| w.kind).collect();
        assert_eq!(
            kinds,
            vec![WarningKind::DuplicateSpecies, WarningKind::DuplicateCategory]
        );
        assert!(normalized.model.get_sections("굴").unwrap().is_empty());
    }

    #[test]
    fn dropped_duplicate_species_report_no_row_warnings() {
        let raw = json!([{"name": "조개류", "items": [
            {"name": "굴", "효능": "아연"},
            {"name": "굴", "영양소": [": 라벨 없음"]}
        ]}]);
        let normalized = normalize(&raw);
        let kinds: Vec<WarningKind> = normalized.warnings.iter().map(|w| w.kind).collect();
        assert_eq!(kinds, vec![WarningKind::DuplicateSpecies]);
        let sections = normalized.model.get_sections("굴").unwrap();
        assert!(sections.has(&SectionKey::Efficacy));
        assert!(!sections.has(&SectionKey::Nutrients));
    }

    #[test]
    fn non_object_sections_value_is_reported_not_kept() {
        let raw = json!([{"name": "조개류", "items": [
            {"name": "굴", "sections": ["아연"], "효능": "면역력"}
        ]}]);
        let normalized = normalize(&raw);
        let kinds: Vec<WarningKind> = normalized.warnings.iter().map(|w| w.kind).collect();
        assert_eq!(kinds, vec![WarningKind::MalformedSections]);
        assert!(normalized.warnings[0].message.contains("굴"));
        let sections = normalized.model.get_sections("굴").unwrap();
        assert_eq!(sections.get(&SectionKey::Extra("sections".into())), None);
        assert_eq!(sections.len(), 1);
    }

    #[test]
    fn skipped_rows_are_reported_per_species() {
        let raw = json!({
            "categories": {"흰살생선": ["대구"]},
            "items": {"대구": {"주요영양소": ["단백질: 18g", ": 없음"]}}
        });
        let normalized = normalize(&raw);
        assert_eq!(normalized.warnings.len(), 1);
        assert_eq!(normalized.warnings[0].kind, WarningKind::SkippedRow);
        assert!(normalized.warnings[0].message.contains("대구"));
    }

    #[test]
    fn empty_recipe_object_is_absent() {
        let raw = json!({
            "categories": {"흰살생선": ["대구"]},
            "items": {"대구": {"레시피": {}, "출처": "자산어보"}}
        });
        let (model, _) = normalize(&raw).into_parts();
        let sections = model.get_sections("대구").unwrap();
        assert_eq!(sections.get(&SectionKey::Recipe), None);
        assert_eq!(sections.len(), 1);
    }
}
