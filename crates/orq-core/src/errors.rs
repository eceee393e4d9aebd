//! Errores del orquestador y del contrato con el servicio remoto.

use orq_domain::DomainError;
use thiserror::Error;

use crate::constants::{MSG_ERROR_CONEXION, MSG_ERROR_DESCONOCIDO, MSG_ESPECIE_REQUERIDA_PREDICCION};

/// Fallo reportado por un `PredictionProvider`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PredictionError {
    /// Red inaccesible o timeout.
    #[error("transport: {0}")]
    Transport(String),
    /// El servicio respondió pero rechazó la petición.
    #[error("remote: {}", message.as_deref().unwrap_or("<sin mensaje>"))]
    Remote { message: Option<String> },
    /// Sin causa identificable (p. ej. respuesta ilegible).
    #[error("unknown prediction failure")]
    Unknown,
}

impl PredictionError {
    pub fn remote(message: impl Into<String>) -> Self {
        PredictionError::Remote { message: Some(message.into()) }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrchestratorError {
    #[error("validation: {0}")]
    Validation(String),
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error(transparent)]
    Prediction(#[from] PredictionError),
    #[error("domain: {0}")]
    Domain(String),
    #[error("perfil desconocido: {0}")]
    UnknownProfile(String),
    #[error("no tokio runtime available to drive the orchestrator")]
    NoRuntime,
}

impl From<DomainError> for OrchestratorError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::MissingField(f) => OrchestratorError::MissingField(f),
            other => OrchestratorError::Domain(other.to_string()),
        }
    }
}

impl OrchestratorError {
    /// Texto publicado en `error` y entregado a `on_error`. Nunca vacío.
    pub fn user_message(&self) -> String {
        match self {
            OrchestratorError::Validation(msg) => msg.clone(),
            OrchestratorError::MissingField(_) => MSG_ESPECIE_REQUERIDA_PREDICCION.to_string(),
            OrchestratorError::Prediction(PredictionError::Transport(_)) => MSG_ERROR_CONEXION.to_string(),
            OrchestratorError::Prediction(PredictionError::Remote { message: Some(m) }) if !m.trim().is_empty() => m.clone(),
            OrchestratorError::Prediction(_)
            | OrchestratorError::Domain(_)
            | OrchestratorError::UnknownProfile(_)
            | OrchestratorError::NoRuntime => {
                MSG_ERROR_DESCONOCIDO.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_follows_failure_taxonomy() {
        assert_eq!(OrchestratorError::Validation("La especie debe tener al menos 3 caracteres".into()).user_message(),
                   "La especie debe tener al menos 3 caracteres");
        assert_eq!(OrchestratorError::MissingField("especie").user_message(), MSG_ESPECIE_REQUERIDA_PREDICCION);
        assert_eq!(OrchestratorError::from(PredictionError::Transport("dns".into())).user_message(), MSG_ERROR_CONEXION);
        assert_eq!(OrchestratorError::from(PredictionError::remote("Especie no soportada")).user_message(),
                   "Especie no soportada");
        assert_eq!(OrchestratorError::from(PredictionError::Remote { message: Some("  ".into()) }).user_message(),
                   MSG_ERROR_DESCONOCIDO);
        assert_eq!(OrchestratorError::from(PredictionError::Unknown).user_message(), MSG_ERROR_DESCONOCIDO);
    }

    #[test]
    fn domain_missing_field_maps_to_guard() {
        let e: OrchestratorError = DomainError::MissingField("especie").into();
        assert_eq!(e, OrchestratorError::MissingField("especie"));
    }
}
