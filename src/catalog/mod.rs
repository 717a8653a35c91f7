//! Canonical catalog wiring.
//!
//! Types here are the single in-memory form of the seafood dataset, whatever
//! JSON shape it arrived in. Callers read through `CatalogModel`; the session
//! keeps the current model in a `CatalogRepository` so reloads swap it whole.

pub mod identity;
pub mod index;
pub mod model;
pub mod repository;

pub use identity::{CategoryName, SectionKey, SpeciesName};
pub use index::SpeciesIndex;
pub use model::{
    CatalogBuilder, CatalogModel, Category, SectionContent, SectionSet, SpeciesRecord,
};
pub use repository::{CatalogRepository, LoadTicket};
