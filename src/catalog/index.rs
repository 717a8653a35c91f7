//! Derived lookup tables over a built catalog.
//!
//! Positions point into the category/species vectors of the owning
//! `CatalogModel`, so the index is rebuilt whenever a model is built and never
//! outlives it.

use crate::catalog::identity::{CategoryName, SpeciesName};
use crate::catalog::model::Category;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Name → position maps for categories and species.
pub struct SpeciesIndex {
    by_category: BTreeMap<CategoryName, usize>,
    // A species name may appear under several categories; positions are kept
    // in catalog order so the first entry is the first owner.
    by_species: BTreeMap<SpeciesName, Vec<(usize, usize)>>,
}

impl SpeciesIndex {
    pub fn build(categories: &[Category]) -> Self {
        let mut by_category = BTreeMap::new();
        let mut by_species: BTreeMap<SpeciesName, Vec<(usize, usize)>> = BTreeMap::new();
        for (category_pos, category) in categories.iter().enumerate() {
            by_category
                .entry(category.name.clone())
                .or_insert(category_pos);
            for (species_pos, record) in category.species.iter().enumerate() {
                by_species
                    .entry(record.name.clone())
                    .or_default()
                    .push((category_pos, species_pos));
            }
        }
        Self {
            by_category,
            by_species,
        }
    }

    pub fn category_position(&self, name: &str) -> Option<usize> {
        self.by_category
            .get(&CategoryName(name.to_string()))
            .copied()
    }

    /// `(category, species)` positions for a species name; empty when unknown.
    pub fn species_positions(&self, name: &str) -> &[(usize, usize)] {
        self.by_species
            .get(&SpeciesName(name.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
