//! Holds the current catalog and arbitrates between overlapping loads.
//!
//! Each load attempt takes a numbered ticket; only the newest ticket may
//! install a model. Installation swaps the whole `Arc`, so a reader that
//! cloned the previous handle keeps a complete old model while new readers
//! see the complete new one.

use crate::catalog::model::CatalogModel;
use std::sync::Arc;

/// Generation number identifying one load attempt.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
/// Current catalog plus the ticket counter for last-load-wins.
pub struct CatalogRepository {
    current: Option<Arc<CatalogModel>>,
    issued: u64,
    installed: u64,
}

impl CatalogRepository {
    /// Start a load attempt. Any ticket issued earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket(self.issued)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Install a model for `ticket`. Returns false (and drops the model) when
    /// a newer load has started since the ticket was issued.
    pub fn install(&mut self, ticket: LoadTicket, model: CatalogModel) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.current = Some(Arc::new(model));
        self.installed = ticket.0;
        true
    }

    /// Shared handle to the installed model, if any load has completed.
    pub fn current(&self) -> Option<Arc<CatalogModel>> {
        self.current.clone()
    }

    /// Borrow the installed model without touching the reference count.
    pub fn get(&self) -> Option<&CatalogModel> {
        self.current.as_deref()
    }

    pub fn is_ready(&self) -> bool {
        self.current.is_some()
    }

    /// Generation of the installed model (0 before the first install).
    pub fn installed_generation(&self) -> u64 {
        self.installed
    }
}
