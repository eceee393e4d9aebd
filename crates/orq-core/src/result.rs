//! Estado de resultado publicado a la capa de presentación.
use chrono::{DateTime, Utc};
use orq_domain::PredictionResult;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultState {
    pub prediccion: Option<PredictionResult>,
    pub error: Option<String>,
    /// Verdadero estrictamente mientras haya una llamada remota en vuelo.
    pub loading: bool,
    pub last_update: Option<DateTime<Utc>>,
}

impl ResultState {
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn publish_error(&mut self, message: String) {
        self.error = Some(message);
    }

    pub fn reconcile_success(&mut self, result: PredictionResult, at: DateTime<Utc>) {
        self.prediccion = Some(result);
        self.error = None;
        self.last_update = Some(at);
    }

    /// Vuelve al estado inicial. `last_update` se conserva como registro de la
    /// última sincronización.
    pub fn reset(&mut self) {
        self.prediccion = None;
        self.error = None;
        self.loading = false;
    }
}
