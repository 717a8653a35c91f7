//! Canonical in-memory representation of the seafood catalog.
//!
//! Every raw dataset shape converges on these types. Content stored here is
//! already normalized: a `SectionSet` never holds an empty section and never
//! holds the raw JSON shape it came from. The model is read-only once built;
//! reloading produces a new model instead of patching this one.

use crate::catalog::identity::{CategoryName, SectionKey, SpeciesName};
use crate::catalog::index::SpeciesIndex;
use crate::error::CatalogError;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

/// Uniform, renderable section payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SectionContent {
    Text(String),
    List(Vec<String>),
    Table(Vec<(String, String)>),
    Recipe {
        name: String,
        ingredients: Vec<String>,
        steps: Vec<String>,
    },
}

impl SectionContent {
    /// Emptiness rule shared by storage, presence checks and `ALL`.
    pub fn is_empty(&self) -> bool {
        match self {
            SectionContent::Text(text) => text.trim().is_empty(),
            SectionContent::List(items) => all_blank(items),
            SectionContent::Table(rows) => rows
                .iter()
                .all(|(label, value)| label.trim().is_empty() && value.trim().is_empty()),
            SectionContent::Recipe {
                name,
                ingredients,
                steps,
            } => name.trim().is_empty() && all_blank(ingredients) && all_blank(steps),
        }
    }

    /// Encode in the legacy dataset layout. Tables become `[label, value]`
    /// pairs so repeated labels survive a round trip.
    pub fn to_legacy_value(&self) -> Value {
        match self {
            SectionContent::Text(text) => Value::String(text.clone()),
            SectionContent::List(items) => json!(items),
            SectionContent::Table(rows) => Value::Array(
                rows.iter()
                    .map(|(label, value)| json!([label, value]))
                    .collect(),
            ),
            SectionContent::Recipe {
                name,
                ingredients,
                steps,
            } => json!({
                "이름": name,
                "재료": ingredients,
                "만드는법": steps,
            }),
        }
    }
}

fn all_blank(items: &[String]) -> bool {
    items.iter().all(|item| item.trim().is_empty())
}

/// Sections owned by one species.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectionSet {
    fixed: BTreeMap<SectionKey, SectionContent>,
    extras: Vec<(String, SectionContent)>,
}

impl SectionSet {
    /// Store a section. Content that is empty or only whitespace is not
    /// stored; returns whether the section was kept. A repeated key replaces
    /// the earlier content.
    pub fn insert(&mut self, key: SectionKey, content: SectionContent) -> bool {
        if content.is_empty() {
            return false;
        }
        match key {
            SectionKey::Extra(name) => {
                let existing = self.extras.iter_mut().find(|(existing, _)| *existing == name);
                if let Some(slot) = existing {
                    slot.1 = content;
                } else {
                    self.extras.push((name, content));
                }
            }
            known => {
                self.fixed.insert(known, content);
            }
        }
        true
    }

    pub fn get(&self, key: &SectionKey) -> Option<&SectionContent> {
        match key {
            SectionKey::Extra(name) => self
                .extras
                .iter()
                .find(|(existing, _)| existing == name)
                .map(|(_, content)| content),
            known => self.fixed.get(known),
        }
    }

    /// Extras bucket in encounter order.
    pub fn extras(&self) -> impl Iterator<Item = (&str, &SectionContent)> {
        self.extras
            .iter()
            .map(|(name, content)| (name.as_str(), content))
    }

    pub fn is_empty(&self) -> bool {
        self.fixed.is_empty() && self.extras.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fixed.len() + self.extras.len()
    }

    /// Encode as a legacy `items` entry keyed by compact Korean labels.
    pub fn to_legacy_value(&self) -> Value {
        let mut map = Map::new();
        for key in SectionKey::DISPLAY_ORDER {
            if let Some(content) = self.fixed.get(&key) {
                map.insert(key.legacy_label().to_string(), content.to_legacy_value());
            }
        }
        for (name, content) in &self.extras {
            map.insert(name.clone(), content.to_legacy_value());
        }
        Value::Object(map)
    }
}

impl Serialize for SectionSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for key in SectionKey::DISPLAY_ORDER {
            if let Some(content) = self.fixed.get(&key) {
                map.serialize_entry(key.as_str(), content)?;
            }
        }
        for (name, content) in &self.extras {
            map.serialize_entry(name, content)?;
        }
        map.end()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SpeciesRecord {
    pub name: SpeciesName,
    pub sections: SectionSet,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: CategoryName,
    pub species: Vec<SpeciesRecord>,
}

/// Immutable catalog: categories in source order, each owning its species.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CatalogModel {
    categories: Vec<Category>,
    #[serde(skip)]
    index: SpeciesIndex,
}

impl CatalogModel {
    /// Category names in source order.
    pub fn list_categories(&self) -> Vec<&CategoryName> {
        self.categories.iter().map(|category| &category.name).collect()
    }

    /// Species names of one category, in source order.
    pub fn list_species(&self, category: &str) -> Result<Vec<&SpeciesName>, CatalogError> {
        let category = self.category(category)?;
        Ok(category.species.iter().map(|record| &record.name).collect())
    }

    /// Sections of a species, looked up across the whole catalog.
    ///
    /// A name shared by several categories resolves to the first owner in
    /// catalog order; use [`CatalogModel::sections_in`] once a category is
    /// known.
    pub fn get_sections(&self, species: &str) -> Result<&SectionSet, CatalogError> {
        let &(category_pos, species_pos) = self
            .index
            .species_positions(species)
            .first()
            .ok_or_else(|| CatalogError::species_not_found(species))?;
        Ok(&self.categories[category_pos].species[species_pos].sections)
    }

    /// Sections of a species within a specific category.
    pub fn sections_in(&self, category: &str, species: &str) -> Result<&SectionSet, CatalogError> {
        let category = self.category(category)?;
        category
            .species
            .iter()
            .find(|record| record.name.as_str() == species)
            .map(|record| &record.sections)
            .ok_or_else(|| CatalogError::species_not_found(species))
    }

    /// Owning categories of a species name, in catalog order.
    pub fn categories_of(&self, species: &str) -> Vec<&CategoryName> {
        self.index
            .species_positions(species)
            .iter()
            .map(|&(category_pos, _)| &self.categories[category_pos].name)
            .collect()
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.index.category_position(category).is_some()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn species_count(&self) -> usize {
        self.categories
            .iter()
            .map(|category| category.species.len())
            .sum()
    }

    /// Encode the model in the legacy object layout:
    /// `{"categories": {cat: [species]}, "items": {species: {...}}}`.
    ///
    /// `items` is keyed by species name alone, so a name shared across
    /// categories keeps the sections of its first owner.
    pub fn to_legacy_json(&self) -> Value {
        let mut categories = Map::new();
        let mut items = Map::new();
        for category in &self.categories {
            let names: Vec<&str> = category
                .species
                .iter()
                .map(|record| record.name.as_str())
                .collect();
            categories.insert(category.name.0.clone(), json!(names));
            for record in &category.species {
                if !items.contains_key(record.name.as_str()) {
                    items.insert(record.name.0.clone(), record.sections.to_legacy_value());
                }
            }
        }
        json!({
            "categories": Value::Object(categories),
            "items": Value::Object(items),
        })
    }

    fn category(&self, name: &str) -> Result<&Category, CatalogError> {
        self.index
            .category_position(name)
            .map(|pos| &self.categories[pos])
            .ok_or_else(|| CatalogError::category_not_found(name))
    }
}

/// Incremental construction of a [`CatalogModel`].
///
/// The builder upholds the uniqueness invariants and reports collisions back
/// to the caller, which decides how to word the warning.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    categories: Vec<Category>,
}

impl CatalogBuilder {
    /// Position of the named category, creating it if needed. The flag is
    /// true when the category already existed.
    pub fn ensure_category(&mut self, name: CategoryName) -> (usize, bool) {
        if let Some(pos) = self
            .categories
            .iter()
            .position(|category| category.name == name)
        {
            return (pos, true);
        }
        self.categories.push(Category {
            name,
            species: Vec::new(),
        });
        (self.categories.len() - 1, false)
    }

    /// Whether the category at `category` already holds a species named `name`.
    pub fn contains_species(&self, category: usize, name: &str) -> bool {
        self.categories
            .get(category)
            .is_some_and(|target| target.species.iter().any(|s| s.name.as_str() == name))
    }

    /// Append a species to a category. A name already present in that
    /// category is rejected and handed back.
    pub fn push_species(
        &mut self,
        category: usize,
        record: SpeciesRecord,
    ) -> Result<(), SpeciesRecord> {
        let Some(target) = self.categories.get_mut(category) else {
            return Err(record);
        };
        if target
            .species
            .iter()
            .any(|existing| existing.name == record.name)
        {
            return Err(record);
        }
        target.species.push(record);
        Ok(())
    }

    pub fn build(self) -> CatalogModel {
        let index = SpeciesIndex::build(&self.categories);
        CatalogModel {
            categories: self.categories,
            index,
        }
    }
}
