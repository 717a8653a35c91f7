//! Chat navigation: category, then species, then section.
//!
//! The navigator only tracks where the user is and which moves are legal.
//! It validates names against a `CatalogModel` passed in per call and never
//! renders anything.

use crate::catalog::{CatalogModel, CategoryName, SectionKey, SpeciesName};
use crate::error::CatalogError;
use crate::resolver::SectionQuery;
use serde::Serialize;
use tracing::debug;

/// Section menu in the order the chat offers it.
pub const SECTION_MENU: [SectionQuery; 8] = [
    SectionQuery::All,
    SectionQuery::Single(SectionKey::Nutrients),
    SectionQuery::Single(SectionKey::Efficacy),
    SectionQuery::Single(SectionKey::Season),
    SectionQuery::Single(SectionKey::Tips),
    SectionQuery::Single(SectionKey::Pairing),
    SectionQuery::Single(SectionKey::Recipe),
    SectionQuery::Single(SectionKey::Source),
];

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum NavState {
    #[default]
    AtRoot,
    AtCategory {
        category: CategoryName,
    },
    AtSpecies {
        category: CategoryName,
        species: SpeciesName,
    },
    AtSection {
        category: CategoryName,
        species: SpeciesName,
        section: SectionQuery,
    },
}

impl NavState {
    /// Category in scope, if any.
    pub fn category(&self) -> Option<&CategoryName> {
        match self {
            NavState::AtRoot => None,
            NavState::AtCategory { category }
            | NavState::AtSpecies { category, .. }
            | NavState::AtSection { category, .. } => Some(category),
        }
    }

    /// Species in scope, if any.
    pub fn species(&self) -> Option<&SpeciesName> {
        match self {
            NavState::AtSpecies { species, .. } | NavState::AtSection { species, .. } => {
                Some(species)
            }
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            NavState::AtRoot => "root",
            NavState::AtCategory { .. } => "category",
            NavState::AtSpecies { .. } => "species",
            NavState::AtSection { .. } => "section",
        }
    }
}

/// What choosing a menu entry does.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum MenuAction {
    Category(CategoryName),
    Species(SpeciesName),
    Section(SectionQuery),
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MenuOption {
    pub label: String,
    pub action: MenuAction,
}

impl MenuOption {
    fn matches(&self, input: &str) -> bool {
        if self.label == input {
            return true;
        }
        match &self.action {
            MenuAction::Section(query) => SectionQuery::parse(input) == *query,
            _ => false,
        }
    }
}

/// Choose an option by 1-based number or by label text.
pub fn pick_option<'a>(input: &str, options: &'a [MenuOption]) -> Option<&'a MenuOption> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(number) = input.parse::<usize>() {
        return number.checked_sub(1).and_then(|idx| options.get(idx));
    }
    options.iter().find(|option| option.matches(input))
}

#[derive(Clone, Debug, Default)]
pub struct Navigator {
    state: NavState,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    /// Move to `name` from any state.
    pub fn select_category(
        &mut self,
        model: &CatalogModel,
        name: &str,
    ) -> Result<&NavState, CatalogError> {
        let name = name.trim();
        if !model.has_category(name) {
            return Err(CatalogError::UnknownCategory(name.to_string()));
        }
        self.transition(NavState::AtCategory {
            category: CategoryName(name.to_string()),
        });
        Ok(&self.state)
    }

    /// Move to a species of the category in scope.
    pub fn select_species(
        &mut self,
        model: &CatalogModel,
        name: &str,
    ) -> Result<&NavState, CatalogError> {
        let Some(category) = self.state.category().cloned() else {
            return Err(CatalogError::Sequence { need: "category" });
        };
        let name = name.trim();
        let listed = model
            .list_species(category.as_str())
            .map(|species| species.iter().any(|species| species.as_str() == name))
            .unwrap_or(false);
        if !listed {
            return Err(CatalogError::UnknownSpecies {
                category: category.0,
                species: name.to_string(),
            });
        }
        self.transition(NavState::AtSpecies {
            category,
            species: SpeciesName(name.to_string()),
        });
        Ok(&self.state)
    }

    /// Move to a section of the species in scope. `ALL` is a section.
    pub fn select_section(&mut self, query: SectionQuery) -> Result<&NavState, CatalogError> {
        let (category, species) = match &self.state {
            NavState::AtSpecies { category, species }
            | NavState::AtSection {
                category, species, ..
            } => (category.clone(), species.clone()),
            _ => return Err(CatalogError::Sequence { need: "species" }),
        };
        self.transition(NavState::AtSection {
            category,
            species,
            section: query,
        });
        Ok(&self.state)
    }

    /// One level up; a no-op at the root.
    pub fn go_back(&mut self) -> &NavState {
        let previous = std::mem::take(&mut self.state);
        let next = match previous {
            NavState::AtRoot | NavState::AtCategory { .. } => NavState::AtRoot,
            NavState::AtSpecies { category, .. } => NavState::AtCategory { category },
            NavState::AtSection {
                category, species, ..
            } => NavState::AtSpecies { category, species },
        };
        self.transition(next);
        &self.state
    }

    pub fn go_home(&mut self) -> &NavState {
        self.transition(NavState::AtRoot);
        &self.state
    }

    /// Options legal from the current state. After a section is shown the
    /// section menu stays on offer so another section can be picked.
    pub fn menu(&self, model: &CatalogModel) -> Vec<MenuOption> {
        match &self.state {
            NavState::AtRoot => model
                .list_categories()
                .into_iter()
                .map(|category| MenuOption {
                    label: category.to_string(),
                    action: MenuAction::Category(category.clone()),
                })
                .collect(),
            NavState::AtCategory { category } => model
                .list_species(category.as_str())
                .unwrap_or_default()
                .into_iter()
                .map(|species| MenuOption {
                    label: species.to_string(),
                    action: MenuAction::Species(species.clone()),
                })
                .collect(),
            NavState::AtSpecies { .. } | NavState::AtSection { .. } => SECTION_MENU
                .into_iter()
                .map(|query| MenuOption {
                    label: query.display_label().to_string(),
                    action: MenuAction::Section(query),
                })
                .collect(),
        }
    }

    /// Apply a picked menu option.
    pub fn choose(
        &mut self,
        model: &CatalogModel,
        option: &MenuOption,
    ) -> Result<&NavState, CatalogError> {
        match &option.action {
            MenuAction::Category(name) => self.select_category(model, name.as_str()),
            MenuAction::Species(name) => self.select_species(model, name.as_str()),
            MenuAction::Section(query) => self.select_section(query.clone()),
        }
    }

    pub(crate) fn reset(&mut self) {
        self.state = NavState::AtRoot;
    }

    fn transition(&mut self, next: NavState) {
        debug!(from = self.state.name(), to = next.name(), "navigation");
        self.state = next;
    }
}
