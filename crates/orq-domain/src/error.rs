use thiserror::Error;

/// Errores del dominio de registros de polinización.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Campo desconocido: {0}")]
    UnknownField(String),

    #[error("Campo requerido ausente: {0}")]
    MissingField(&'static str),

    #[error("Error de serialización: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::SerializationError(e.to_string())
    }
}
