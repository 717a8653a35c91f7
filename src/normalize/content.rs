//! Collapses heterogeneous section payloads into `SectionContent`.
//!
//! Each canonical key has one target variant; the functions below accept
//! every historical spelling of that payload (string, list, keyed map, list of
//! objects, list of pairs) and return trimmed, non-empty content or `None`.

use crate::catalog::{SectionContent, SectionKey};
use serde_json::{Map, Value};

const NUTRIENT_LABEL_FIELDS: &[&str] = &["key", "label", "name", "영양소", "항목"];
const NUTRIENT_VALUE_FIELDS: &[&str] = &["value", "수치", "설명", "amount", "함량"];

const RECIPE_NAME_FIELDS: &[&str] = &["이름", "name", "title", "요리명"];
const RECIPE_INGREDIENT_FIELDS: &[&str] = &["재료", "ingredients"];
const RECIPE_STEP_FIELDS: &[&str] = &["만드는법", "만드는 법", "조리법", "steps", "method"];

// Wrapping marks some source citations carry, e.g. «동의보감» or 『자산어보』.
const QUOTE_MARKS: &[char] = &[
    '«', '»', '《', '》', '〈', '〉', '「', '」', '『', '』', '“', '”', '‘', '’', '"', '\'',
];

/// Normalized section plus the number of rows dropped as malformed.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct Shaped {
    pub content: Option<SectionContent>,
    pub skipped_rows: usize,
}

impl Shaped {
    fn of(content: Option<SectionContent>) -> Self {
        Self {
            content: content.filter(|content| !content.is_empty()),
            skipped_rows: 0,
        }
    }
}

pub(crate) fn normalize_section(key: &SectionKey, value: &Value) -> Shaped {
    match key {
        SectionKey::Nutrients => {
            let (rows, skipped_rows) = table_rows(value);
            Shaped {
                skipped_rows,
                ..Shaped::of(Some(SectionContent::Table(rows)))
            }
        }
        SectionKey::Recipe => Shaped::of(recipe(value)),
        SectionKey::Source => Shaped::of(Some(SectionContent::List(source_list(value)))),
        SectionKey::Overview => Shaped::of(overview_text(value).map(SectionContent::Text)),
        SectionKey::Efficacy | SectionKey::Season | SectionKey::Tips | SectionKey::Pairing => {
            Shaped::of(Some(SectionContent::List(list_items(value))))
        }
        SectionKey::Extra(_) => inferred(value),
    }
}

/// Nutrient-style table from an object map, `"label: value"` strings,
/// `{label, value}` objects or `[label, value]` pairs.
pub(crate) fn table_rows(value: &Value) -> (Vec<(String, String)>, usize) {
    let mut rows = Vec::new();
    let mut skipped = 0;
    match value {
        Value::Object(map) => {
            for (label, cell) in map {
                let label = label.trim();
                if label.is_empty() {
                    skipped += 1;
                    continue;
                }
                rows.push((label.to_string(), cell_text(cell)));
            }
        }
        Value::Array(items) => {
            for item in items {
                if item.is_null() {
                    continue;
                }
                match table_row(item) {
                    Some(row) => rows.push(row),
                    None => skipped += 1,
                }
            }
        }
        Value::Null | Value::Bool(_) => {}
        single => match table_row(single) {
            Some(row) => rows.push(row),
            None => skipped += 1,
        },
    }
    (rows, skipped)
}

fn table_row(row: &Value) -> Option<(String, String)> {
    match row {
        Value::String(text) => split_labeled(text),
        Value::Number(number) => split_labeled(&number.to_string()),
        Value::Object(fields) => labeled_object(fields),
        Value::Array(pair) if (1..=2).contains(&pair.len()) => {
            let label = scalar_text(&pair[0])?;
            let value = pair.get(1).map(cell_text).unwrap_or_default();
            Some((label, value))
        }
        _ => None,
    }
}

fn labeled_object(fields: &Map<String, Value>) -> Option<(String, String)> {
    if let Some(label) = first_field(fields, NUTRIENT_LABEL_FIELDS).and_then(scalar_text) {
        let value = NUTRIENT_VALUE_FIELDS
            .iter()
            .filter_map(|field| fields.get(*field))
            .map(cell_text)
            .find(|text| !text.is_empty())
            .unwrap_or_default();
        return Some((label, value));
    }
    // `{"단백질": "11g"}` written as a one-entry object.
    if fields.len() == 1 {
        let (label, cell) = fields.iter().next()?;
        let label = label.trim();
        if !label.is_empty() {
            return Some((label.to_string(), cell_text(cell)));
        }
    }
    None
}

/// Split on the first colon (ASCII or full-width). A row without a colon is
/// all label.
fn split_labeled(text: &str) -> Option<(String, String)> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let Some((idx, colon)) = text.char_indices().find(|&(_, c)| c == ':' || c == '：') else {
        return Some((text.to_string(), String::new()));
    };
    let label = text[..idx].trim();
    if label.is_empty() {
        return None;
    }
    let value = text[idx + colon.len_utf8()..].trim();
    Some((label.to_string(), value.to_string()))
}

fn recipe(value: &Value) -> Option<SectionContent> {
    match value {
        Value::Object(fields) => Some(recipe_from_fields(fields)),
        Value::Array(items) => {
            if let Some(fields) = items.iter().find_map(Value::as_object) {
                return Some(recipe_from_fields(fields));
            }
            Some(SectionContent::Recipe {
                name: String::new(),
                ingredients: Vec::new(),
                steps: recipe_lines(value),
            })
        }
        Value::String(_) => Some(SectionContent::Recipe {
            name: String::new(),
            ingredients: Vec::new(),
            steps: recipe_lines(value),
        }),
        _ => None,
    }
}

fn recipe_from_fields(fields: &Map<String, Value>) -> SectionContent {
    let name = first_field(fields, RECIPE_NAME_FIELDS)
        .and_then(scalar_text)
        .unwrap_or_default();
    let ingredients = first_field(fields, RECIPE_INGREDIENT_FIELDS)
        .map(recipe_lines)
        .unwrap_or_default();
    let steps = first_field(fields, RECIPE_STEP_FIELDS)
        .map(recipe_lines)
        .unwrap_or_default();
    SectionContent::Recipe {
        name,
        ingredients,
        steps,
    }
}

/// Recipe lists may be multi-line strings; each line becomes one entry.
fn recipe_lines(value: &Value) -> Vec<String> {
    match value {
        Value::String(text) => text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        other => list_items(other),
    }
}

fn source_list(value: &Value) -> Vec<String> {
    list_items(value)
        .iter()
        .map(|entry| strip_quote_marks(entry))
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strip wrapping quote marks and whitespace from both ends.
pub(crate) fn strip_quote_marks(text: &str) -> &str {
    text.trim()
        .trim_matches(|c: char| QUOTE_MARKS.contains(&c) || c.is_whitespace())
}

fn overview_text(value: &Value) -> Option<String> {
    match value {
        Value::Array(_) => {
            let lines = list_items(value);
            (!lines.is_empty()).then(|| lines.join("\n"))
        }
        other => item_text(other),
    }
}

/// Bullet list: a string is one item, an array contributes each item, an
/// object contributes one `label: value` item per entry.
pub(crate) fn list_items(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(item_text).collect(),
        Value::Object(fields) => fields
            .iter()
            .filter_map(|(label, cell)| labeled_text(label, cell))
            .collect(),
        other => item_text(other).into_iter().collect(),
    }
}

fn inferred(value: &Value) -> Shaped {
    match value {
        Value::Object(_) => {
            let (rows, skipped_rows) = table_rows(value);
            Shaped {
                skipped_rows,
                ..Shaped::of(Some(SectionContent::Table(rows)))
            }
        }
        Value::Array(items) if items.iter().all(|item| !item.is_object() && !item.is_array()) => {
            Shaped::of(Some(SectionContent::List(list_items(value))))
        }
        Value::Array(_) => {
            let (rows, skipped_rows) = table_rows(value);
            Shaped {
                skipped_rows,
                ..Shaped::of(Some(SectionContent::Table(rows)))
            }
        }
        other => Shaped::of(item_text(other).map(SectionContent::Text)),
    }
}

fn first_field<'a>(fields: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| fields.get(*name))
}

fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Display text for one list entry; nested values are flattened onto a line.
fn item_text(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(item_text).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        Value::Object(fields) => {
            let parts: Vec<String> = fields
                .iter()
                .filter_map(|(label, cell)| labeled_text(label, cell))
                .collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        other => scalar_text(other),
    }
}

fn labeled_text(label: &str, cell: &Value) -> Option<String> {
    let label = label.trim();
    match (label.is_empty(), item_text(cell)) {
        (_, None) => None,
        (true, Some(text)) => Some(text),
        (false, Some(text)) => Some(format!("{label}: {text}")),
    }
}

fn cell_text(value: &Value) -> String {
    item_text(value).unwrap_or_default()
}
