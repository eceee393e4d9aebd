//! `RequestSignature`: huella determinista de una petición saliente.
//!
//! Se deriva exclusivamente del `PredictionRequest` que se va a enviar
//! (operación + payload), nunca del formulario completo. Sólo vive mientras
//! sea "la última petición despachada"; no se persiste.

use orq_domain::{DomainError, PredictionRequest};
use std::fmt;

use super::to_canonical_json;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestSignature(String);

impl RequestSignature {
    pub fn of(request: &PredictionRequest) -> Result<Self, DomainError> {
        let value = serde_json::to_value(request)?;
        let digest = blake3::hash(to_canonical_json(&value).as_bytes());
        Ok(RequestSignature(digest.to_hex().to_string()))
    }

    pub fn as_str(&self) -> &str { &self.0 }

    /// Prefijo corto para logs.
    pub fn short(&self) -> &str { &self.0[..12.min(self.0.len())] }
}

impl fmt::Display for RequestSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}
