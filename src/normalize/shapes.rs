//! Structural probes for the dataset layouts seen in the wild.
//!
//! Each probe is a pure function: it either recognizes the layout and returns
//! a draft (names resolved, section payloads still raw) plus layout-level
//! warnings, or returns `None` so the next probe can try.

use crate::normalize::{InputShape, Warning, WarningKind};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

const CATEGORY_NAME_FIELDS: &[&str] = &["name", "이름", "카테고리", "category", "title"];
const SPECIES_LIST_FIELDS: &[&str] = &["items", "species", "어종"];
const SPECIES_NAME_FIELDS: &[&str] = &["name", "이름", "어종", "title"];

// Fields of a flat species entry that describe the entry rather than a section.
const RECORD_METADATA_FIELDS: &[&str] = &[
    "name", "이름", "어종", "title", "category", "카테고리", "sections",
];

pub(crate) type ShapeProbe = fn(&Value) -> Option<Draft<'_>>;

/// Probe order matters: the first structural match wins.
pub(crate) const PROBES: &[(InputShape, ShapeProbe)] = &[
    (InputShape::LegacyObject, probe_legacy_object),
    (InputShape::CategoryArray, probe_category_array),
    (InputShape::BareArray, probe_bare_array),
];

#[derive(Debug, Default)]
pub(crate) struct Draft<'a> {
    pub categories: Vec<DraftCategory<'a>>,
    pub warnings: Vec<Warning>,
}

#[derive(Debug)]
pub(crate) struct DraftCategory<'a> {
    pub name: String,
    pub species: Vec<DraftSpecies<'a>>,
}

#[derive(Debug)]
pub(crate) struct DraftSpecies<'a> {
    pub name: String,
    pub fields: SectionFields<'a>,
}

/// Where a species' section payloads live in the raw document.
#[derive(Debug, Clone, Copy)]
pub(crate) enum SectionFields<'a> {
    None,
    /// Every key is a section (`sections` objects, legacy `items` records).
    Nested(&'a Map<String, Value>),
    /// Sections sit beside naming metadata (flat array entries).
    Flat(&'a Map<String, Value>),
}

impl<'a> SectionFields<'a> {
    pub fn entries(self) -> impl Iterator<Item = (&'a String, &'a Value)> {
        let (map, skip_metadata) = match self {
            SectionFields::None => (None, false),
            SectionFields::Nested(map) => (Some(map), false),
            SectionFields::Flat(map) => (Some(map), true),
        };
        map.into_iter()
            .flat_map(|map| map.iter())
            .filter(move |(key, _)| {
                !(skip_metadata && RECORD_METADATA_FIELDS.contains(&key.as_str()))
            })
    }
}

/// `{categories: {cat: [species]}, items|details: {species: {...}}}`
pub(crate) fn probe_legacy_object(raw: &Value) -> Option<Draft<'_>> {
    let root = raw.as_object()?;
    let categories = root.get("categories")?.as_object()?;
    let mut draft = Draft::default();

    let records = match root.get("items").or_else(|| root.get("details")) {
        Some(Value::Object(records)) => Some(records),
        Some(other) => {
            draft.warnings.push(Warning::new(
                WarningKind::MissingItems,
                format!(
                    "species records must be an object, found {}; no sections loaded",
                    json_kind(other)
                ),
            ));
            None
        }
        None => {
            draft.warnings.push(Warning::new(
                WarningKind::MissingItems,
                "dataset has no `items` or `details` map; no sections loaded",
            ));
            None
        }
    };

    let mut owned: BTreeSet<&str> = BTreeSet::new();
    for (raw_category, members) in categories {
        let Some(category_name) = clean_name(raw_category) else {
            draft.warnings.push(Warning::new(
                WarningKind::InvalidName,
                format!(
                    "skipping category with empty name ({} species)",
                    member_count(members)
                ),
            ));
            continue;
        };
        let mut species = Vec::new();
        for member in member_values(members) {
            let Some(name) = value_name(member) else {
                draft.warnings.push(Warning::new(
                    WarningKind::InvalidName,
                    format!("category '{category_name}' lists a species without a usable name"),
                ));
                continue;
            };
            let fields = match records {
                Some(records) => legacy_record(records, &name, &mut draft.warnings),
                None => SectionFields::None,
            };
            if let Some(key) = records.and_then(|records| record_key(records, &name)) {
                owned.insert(key);
            }
            species.push(DraftSpecies { name, fields });
        }
        draft.categories.push(DraftCategory {
            name: category_name,
            species,
        });
    }

    if let Some(records) = records {
        for key in records.keys() {
            if !owned.contains(key.as_str()) {
                draft.warnings.push(Warning::new(
                    WarningKind::UnownedSpecies,
                    format!("species '{key}' is not listed in any category; dropped"),
                ));
            }
        }
    }

    Some(draft)
}

/// `{categories: [{name, items|species: [...]}]}`
pub(crate) fn probe_category_array(raw: &Value) -> Option<Draft<'_>> {
    let entries = raw.as_object()?.get("categories")?.as_array()?;
    Some(draft_from_entries(entries))
}

/// `[{name, items|species: [...]}]`
pub(crate) fn probe_bare_array(raw: &Value) -> Option<Draft<'_>> {
    let entries = raw.as_array()?;
    Some(draft_from_entries(entries))
}

fn draft_from_entries(entries: &[Value]) -> Draft<'_> {
    let mut draft = Draft::default();
    for (position, entry) in entries.iter().enumerate() {
        let Some(fields) = entry.as_object() else {
            draft.warnings.push(Warning::new(
                WarningKind::InvalidName,
                format!(
                    "category entry #{} is {}, expected an object; skipped",
                    position + 1,
                    json_kind(entry)
                ),
            ));
            continue;
        };
        let Some(category_name) = named_field(fields, CATEGORY_NAME_FIELDS) else {
            draft.warnings.push(Warning::new(
                WarningKind::InvalidName,
                format!("category entry #{} has no name; skipped", position + 1),
            ));
            continue;
        };

        let mut species = Vec::new();
        let members = SPECIES_LIST_FIELDS
            .iter()
            .find_map(|field| fields.get(*field))
            .map(member_values)
            .unwrap_or_default();
        for member in members {
            match species_entry(member, &category_name, &mut draft.warnings) {
                Ok(entry) => species.push(entry),
                Err(reason) => draft.warnings.push(Warning::new(
                    WarningKind::InvalidName,
                    format!("category '{category_name}': {reason}; skipped"),
                )),
            }
        }
        draft.categories.push(DraftCategory {
            name: category_name,
            species,
        });
    }
    draft
}

fn species_entry<'a>(
    member: &'a Value,
    category: &str,
    warnings: &mut Vec<Warning>,
) -> Result<DraftSpecies<'a>, String> {
    match member {
        Value::String(name) => {
            let name = clean_name(name).ok_or("species with empty name")?;
            Ok(DraftSpecies {
                name,
                fields: SectionFields::None,
            })
        }
        Value::Object(fields) => {
            let name = named_field(fields, SPECIES_NAME_FIELDS).ok_or("species without a name")?;
            let fields = match fields.get("sections") {
                Some(Value::Object(sections)) => SectionFields::Nested(sections),
                Some(other) => {
                    warnings.push(Warning::new(
                        WarningKind::MalformedSections,
                        format!(
                            "category '{category}': species '{name}' has `sections` as {}, \
                             expected an object; ignored",
                            json_kind(other)
                        ),
                    ));
                    SectionFields::Flat(fields)
                }
                None => SectionFields::Flat(fields),
            };
            Ok(DraftSpecies { name, fields })
        }
        other => Err(format!("species entry is {}", json_kind(other))),
    }
}

fn legacy_record<'a>(
    records: &'a Map<String, Value>,
    name: &str,
    warnings: &mut Vec<Warning>,
) -> SectionFields<'a> {
    match record_key(records, name).and_then(|key| records.get(key)) {
        Some(Value::Object(fields)) => SectionFields::Nested(fields),
        Some(other) => {
            warnings.push(Warning::new(
                WarningKind::MissingRecord,
                format!(
                    "record for species '{name}' is {}, expected an object; showing no sections",
                    json_kind(other)
                ),
            ));
            SectionFields::None
        }
        None => {
            warnings.push(Warning::new(
                WarningKind::MissingRecord,
                format!("species '{name}' has no record; showing no sections"),
            ));
            SectionFields::None
        }
    }
}

/// Record key for a species name, tolerating stray whitespace in the key.
fn record_key<'a>(records: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    if let Some((key, _)) = records.get_key_value(name) {
        return Some(key.as_str());
    }
    records
        .keys()
        .find(|key| key.trim() == name)
        .map(String::as_str)
}

fn member_values(members: &Value) -> Vec<&Value> {
    match members {
        Value::Array(items) => items.iter().collect(),
        Value::Null => Vec::new(),
        single => vec![single],
    }
}

fn member_count(members: &Value) -> usize {
    member_values(members).len()
}

fn named_field(fields: &Map<String, Value>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| fields.get(*name))
        .find_map(value_name)
}

fn value_name(value: &Value) -> Option<String> {
    match value {
        Value::String(name) => clean_name(name),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn clean_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
