//! Korean seafood health-facts catalog.
//!
//! The dataset behind the fish chat has shipped in several JSON layouts over
//! time. This crate turns any of them into one canonical `CatalogModel`,
//! answers section lookups against it, and tracks the category → species →
//! section conversation independently of how it is rendered. Public items
//! here form the contract the `fish-chat` and `catalog-normalize` binaries
//! depend on.

pub mod catalog;
pub mod error;
pub mod loader;
pub mod navigation;
pub mod normalize;
pub mod resolver;
pub mod session;

pub use catalog::{
    CatalogModel, CatalogRepository, Category, CategoryName, LoadTicket, SectionContent,
    SectionKey, SectionSet, SpeciesName, SpeciesRecord,
};
pub use error::{CatalogError, LoadError};
pub use loader::{
    BUNDLED_CATALOG, CatalogSource, DATA_ENV, decode_catalog_bytes, resolve_data_path,
};
pub use navigation::{MenuAction, MenuOption, NavState, Navigator, SECTION_MENU, pick_option};
pub use normalize::{InputShape, Normalized, Warning, WarningKind, normalize};
pub use resolver::{SectionQuery, resolve_section};
pub use session::{LoadOutcome, LoadReport, Session};

/// Message shown when a lookup has nothing to display.
pub const NO_DATA_MESSAGE: &str = "자료가 없습니다.";

