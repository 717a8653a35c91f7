//! The single owned session: loaded catalog plus navigation.
//!
//! Every lookup and transition goes through here so that "not loaded yet" is
//! answered the same way everywhere, and so a reload can reset navigation in
//! the same step that swaps the model.

use crate::catalog::{
    CatalogModel, CatalogRepository, CategoryName, LoadTicket, SectionContent, SectionKey,
    SpeciesName,
};
use crate::error::{CatalogError, LoadError};
use crate::loader::CatalogSource;
use crate::navigation::{MenuOption, NavState, Navigator};
use crate::normalize::{InputShape, Warning, normalize};
use crate::resolver::{SectionQuery, resolve_section};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Summary of an installed load.
#[derive(Clone, Debug, Serialize)]
pub struct LoadReport {
    pub generation: u64,
    pub origin: String,
    pub shape: Option<InputShape>,
    pub categories: usize,
    pub species: usize,
    pub warnings: Vec<Warning>,
}

#[derive(Clone, Debug)]
pub enum LoadOutcome {
    Installed(LoadReport),
    /// A newer load started after this one; the result was discarded.
    Stale,
}

#[derive(Debug, Default)]
pub struct Session {
    repository: CatalogRepository,
    navigator: Navigator,
    warnings: Vec<Warning>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.repository.is_ready()
    }

    /// Start a load attempt; earlier tickets become stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.repository.begin_load()
    }

    /// Apply the result of the load identified by `ticket`.
    ///
    /// Results for stale tickets are dropped. A current failure installs an
    /// empty catalog and returns the error, so the session is never left
    /// half-populated. Any installed model resets navigation to the root.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        origin: &str,
        result: Result<Value, LoadError>,
    ) -> Result<LoadOutcome, CatalogError> {
        if !self.repository.is_current(ticket) {
            info!(
                generation = ticket.generation(),
                origin, "discarding result of superseded load"
            );
            return Ok(LoadOutcome::Stale);
        }
        let raw = match result {
            Ok(raw) => raw,
            Err(err) => {
                warn!(generation = ticket.generation(), error = %err, "catalog load failed");
                self.install(ticket, CatalogModel::default(), Vec::new());
                return Err(CatalogError::Load(err));
            }
        };

        let normalized = normalize(&raw);
        let shape = normalized.shape;
        let (model, warnings) = normalized.into_parts();
        let report = LoadReport {
            generation: ticket.generation(),
            origin: origin.to_string(),
            shape,
            categories: model.list_categories().len(),
            species: model.species_count(),
            warnings: warnings.clone(),
        };
        self.install(ticket, model, warnings);
        info!(
            generation = report.generation,
            origin,
            categories = report.categories,
            species = report.species,
            warnings = report.warnings.len(),
            "catalog installed"
        );
        Ok(LoadOutcome::Installed(report))
    }

    /// Load the first source that reads and parses, in order. All sources
    /// share one ticket; if every source fails the last error is reported.
    pub fn load_sources(&mut self, sources: &[CatalogSource]) -> Result<LoadOutcome, CatalogError> {
        let ticket = self.begin_load();
        let mut last_err = None;
        for source in sources {
            let origin = source.origin();
            match source.load() {
                Ok(raw) => return self.finish_load(ticket, &origin, Ok(raw)),
                Err(err) => {
                    warn!(origin = %origin, error = %err, "catalog source unavailable");
                    last_err = Some((origin, err));
                }
            }
        }
        let (origin, err) = last_err.unwrap_or_else(|| {
            let origin = "catalog sources".to_string();
            let err = LoadError::Empty {
                origin: origin.clone(),
            };
            (origin, err)
        });
        self.finish_load(ticket, &origin, Err(err))
    }

    /// Warnings from the installed load.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Shared handle to the installed model; it stays valid across reloads.
    pub fn model_handle(&self) -> Option<Arc<CatalogModel>> {
        self.repository.current()
    }

    pub fn model(&self) -> Result<&CatalogModel, CatalogError> {
        self.repository.get().ok_or(CatalogError::NotReady)
    }

    pub fn list_categories(&self) -> Result<Vec<&CategoryName>, CatalogError> {
        Ok(self.model()?.list_categories())
    }

    pub fn list_species(&self, category: &str) -> Result<Vec<&SpeciesName>, CatalogError> {
        self.model()?.list_species(category)
    }

    /// Sections of `species` matching `query`, looked up across the catalog.
    pub fn resolve_section(
        &self,
        species: &str,
        query: &SectionQuery,
    ) -> Result<Vec<(SectionKey, &SectionContent)>, CatalogError> {
        let sections = self.model()?.get_sections(species)?;
        Ok(resolve_section(sections, query))
    }

    /// Content for the section the navigator is on.
    pub fn current_sections(&self) -> Result<Vec<(SectionKey, &SectionContent)>, CatalogError> {
        let model = self.model()?;
        match self.navigator.state() {
            NavState::AtSection {
                category,
                species,
                section,
            } => {
                let sections = model.sections_in(category.as_str(), species.as_str())?;
                Ok(resolve_section(sections, section))
            }
            _ => Err(CatalogError::Sequence { need: "section" }),
        }
    }

    pub fn state(&self) -> Result<&NavState, CatalogError> {
        self.model()?;
        Ok(self.navigator.state())
    }

    pub fn menu(&self) -> Result<Vec<MenuOption>, CatalogError> {
        Ok(self.navigator.menu(self.model()?))
    }

    pub fn select_category(&mut self, name: &str) -> Result<&NavState, CatalogError> {
        let model = self.repository.get().ok_or(CatalogError::NotReady)?;
        self.navigator.select_category(model, name)
    }

    pub fn select_species(&mut self, name: &str) -> Result<&NavState, CatalogError> {
        let model = self.repository.get().ok_or(CatalogError::NotReady)?;
        self.navigator.select_species(model, name)
    }

    pub fn select_section(&mut self, query: SectionQuery) -> Result<&NavState, CatalogError> {
        self.model()?;
        self.navigator.select_section(query)
    }

    pub fn choose(&mut self, option: &MenuOption) -> Result<&NavState, CatalogError> {
        let model = self.repository.get().ok_or(CatalogError::NotReady)?;
        self.navigator.choose(model, option)
    }

    pub fn go_back(&mut self) -> Result<&NavState, CatalogError> {
        self.model()?;
        Ok(self.navigator.go_back())
    }

    pub fn go_home(&mut self) -> Result<&NavState, CatalogError> {
        self.model()?;
        Ok(self.navigator.go_home())
    }

    fn install(&mut self, ticket: LoadTicket, model: CatalogModel, warnings: Vec<Warning>) {
        if self.repository.install(ticket, model) {
            self.warnings = warnings;
            self.navigator.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::WarningKind;
    use serde_json::json;

    fn dataset() -> Value {
        json!({
            "categories": {"등푸른생선": ["고등어"], "조개류": ["굴"]},
            "items": {
                "고등어": {"주요영양소": ["단백질: 20g"], "레시피": {}},
                "굴": {"효능": "면역력"}
            }
        })
    }

    fn loaded() -> Session {
        let mut session = Session::new();
        let ticket = session.begin_load();
        session.finish_load(ticket, "test", Ok(dataset())).unwrap();
        session
    }

    #[test]
    fn everything_is_not_ready_before_first_load() {
        let mut session = Session::new();
        assert!(!session.is_ready());
        assert!(matches!(session.list_categories(), Err(CatalogError::NotReady)));
        assert!(matches!(session.list_species("조개류"), Err(CatalogError::NotReady)));
        assert!(matches!(
            session.resolve_section("굴", &SectionQuery::All),
            Err(CatalogError::NotReady)
        ));
        assert!(matches!(session.state(), Err(CatalogError::NotReady)));
        assert!(matches!(session.select_category("조개류"), Err(CatalogError::NotReady)));
        assert!(matches!(session.go_home(), Err(CatalogError::NotReady)));
        assert!(matches!(session.menu(), Err(CatalogError::NotReady)));
    }

    #[test]
    fn stale_load_is_discarded() {
        let mut session = Session::new();
        let first = session.begin_load();
        let second = session.begin_load();
        let outcome = session
            .finish_load(second, "second", Ok(json!([{"name": "두족류", "items": ["오징어"]}])))
            .unwrap();
        assert!(matches!(outcome, LoadOutcome::Installed(_)));
        let outcome = session.finish_load(first, "first", Ok(dataset())).unwrap();
        assert!(matches!(outcome, LoadOutcome::Stale));
        let categories: Vec<&str> = session
            .list_categories()
            .unwrap()
            .into_iter()
            .map(|c| c.as_str())
            .collect();
        assert_eq!(categories, vec!["두족류"]);
    }

    #[test]
    fn failed_load_installs_empty_catalog() {
        let mut session = loaded();
        let ticket = session.begin_load();
        let err = session
            .finish_load(ticket, "gone.json", Err(LoadError::Empty {
                origin: "gone.json".into(),
            }))
            .unwrap_err();
        assert!(matches!(err, CatalogError::Load(LoadError::Empty { .. })));
        assert!(session.is_ready());
        assert!(session.list_categories().unwrap().is_empty());
        assert!(session.warnings().is_empty());
    }

    #[test]
    fn reload_resets_navigation_and_keeps_old_handles_intact() {
        let mut session = loaded();
        let old = session.model_handle().unwrap();
        session.select_category("조개류").unwrap();
        session.select_species("굴").unwrap();

        let ticket = session.begin_load();
        let crabs = json!({"categories": [{"name": "갑각류", "items": ["꽃게"]}]});
        session.finish_load(ticket, "reload", Ok(crabs)).unwrap();
        assert_eq!(session.state().unwrap(), &NavState::AtRoot);
        assert!(matches!(
            session.list_species("조개류"),
            Err(CatalogError::NotFound { .. })
        ));
        assert_eq!(old.list_categories().len(), 2);
    }

    #[test]
    fn navigation_drives_section_lookup() {
        let mut session = loaded();
        assert!(matches!(
            session.current_sections(),
            Err(CatalogError::Sequence { need: "section" })
        ));
        session.select_category("등푸른생선").unwrap();
        session.select_species("고등어").unwrap();
        session.select_section(SectionQuery::All).unwrap();
        let keys: Vec<SectionKey> = session
            .current_sections()
            .unwrap()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, vec![SectionKey::Nutrients]);

        session
            .select_section(SectionQuery::Single(SectionKey::Recipe))
            .unwrap();
        assert!(session.current_sections().unwrap().is_empty());
    }

    #[test]
    fn load_sources_falls_back_in_order() {
        let mut session = Session::new();
        let missing = CatalogSource::File("/nonexistent/health_fish.json".into());
        let inline = CatalogSource::Inline {
            origin: "inline".into(),
            text: "{\"categories\": {\"조개류\": [\"굴\"]}}".into(),
        };
        let outcome = session.load_sources(&[missing.clone(), inline]).unwrap();
        match outcome {
            LoadOutcome::Installed(report) => {
                assert_eq!(report.origin, "inline");
                assert_eq!(report.species, 1);
                assert_eq!(report.warnings[0].kind, WarningKind::MissingItems);
            }
            LoadOutcome::Stale => panic!("load should install"),
        }

        let err = session.load_sources(&[missing]).unwrap_err();
        assert!(matches!(err, CatalogError::Load(LoadError::Io { .. })));
        assert!(session.list_categories().unwrap().is_empty());
    }
}
