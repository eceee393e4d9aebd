//! Estado mutable del formulario.
//!
//! `FormState` es dueño exclusivo del `FormSnapshot`. Cada mutación incrementa
//! una revisión monótona y marca `has_changes`; el despachador usa la
//! revisión para saber si el formulario cambió mientras una petición estaba
//! en vuelo.

pub mod merge;

use orq_domain::{ClimateUpdate, FormField, FormSnapshot};

pub use merge::{apply_climate_update, merge_temperatura};

#[derive(Debug, Clone, Default)]
pub struct FormState {
    snapshot: FormSnapshot,
    revision: u64,
    has_changes: bool,
}

impl FormState {
    pub fn new() -> Self { Self::default() }

    pub fn snapshot(&self) -> &FormSnapshot { &self.snapshot }

    pub fn revision(&self) -> u64 { self.revision }

    pub fn has_changes(&self) -> bool { self.has_changes }

    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) {
        self.snapshot.set(field, value.into());
        self.touch();
    }

    pub fn update_climate(&mut self, update: ClimateUpdate) {
        let current = self.snapshot.condiciones_climaticas.take();
        self.snapshot.condiciones_climaticas = Some(apply_climate_update(current, update));
        self.touch();
    }

    /// Marca el formulario como sincronizado si no cambió desde `revision`.
    pub fn mark_synced(&mut self, revision: u64) -> bool {
        if self.revision == revision {
            self.has_changes = false;
        }
        !self.has_changes
    }

    pub fn clear(&mut self) {
        self.snapshot = FormSnapshot::default();
        self.has_changes = false;
        self.revision += 1;
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.has_changes = true;
    }
}
