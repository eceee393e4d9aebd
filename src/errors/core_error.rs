use orq_core::{OrchestratorError, PredictionError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error interno: {0}")]
    Internal(String),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error del orquestador: {0}")]
    Orchestrator(#[from] OrchestratorError),
}

impl From<PredictionError> for CoreError {
    fn from(e: PredictionError) -> Self { CoreError::Orchestrator(e.into()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn test_internal_variant_format() {
        let err = CoreError::Internal("algo malo".into());
        assert_eq!(err.to_string(), "Error interno: algo malo");
    }

    #[test]
    fn test_io_variant_from() {
        let io_err = std::io::Error::other("falló IO");
        let err: CoreError = io_err.into();
        assert_eq!(err.to_string(), "Error en IO: falló IO");
    }

    #[test]
    fn test_config_variant_format() {
        let err = CoreError::Config("ORQ_DEBOUNCE_MS inválido".into());
        assert_eq!(err.to_string(), "Error de configuración: ORQ_DEBOUNCE_MS inválido");
    }

    #[test]
    fn test_orchestrator_variant_from() {
        let err: CoreError = OrchestratorError::NoRuntime.into();
        assert!(matches!(err, CoreError::Orchestrator(OrchestratorError::NoRuntime)));
        let err: CoreError = PredictionError::Transport("timeout".into()).into();
        assert_eq!(err.to_string(), "Error del orquestador: transport: timeout");
    }
}
