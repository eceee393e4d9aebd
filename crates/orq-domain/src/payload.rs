//! Payloads salientes hacia el servicio de predicción.
//!
//! `PredictionRequest` es exactamente lo que se envía: la firma de
//! idempotencia se calcula sobre este valor y nunca sobre el formulario
//! completo, de modo que un campo que no viaja en la petición inicial
//! (p. ej. `genero`) no provoca llamadas redundantes.
use serde::{Deserialize, Serialize};

use crate::form::{is_filled, FormSnapshot};
use crate::prediction::TipoPrediccion;
use crate::DomainError;

/// Campos usados por la predicción inicial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicFields {
    pub especie: String,
    pub clima: String,
    pub ubicacion: String,
}

impl BasicFields {
    pub fn from_form(form: &FormSnapshot) -> Result<Self, DomainError> {
        if !is_filled(&form.especie) {
            return Err(DomainError::MissingField("especie"));
        }
        Ok(Self { especie: form.especie.clone(),
                  clima: form.clima.clone(),
                  ubicacion: form.ubicacion.clone() })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operacion", content = "payload", rename_all = "lowercase")]
pub enum PredictionRequest {
    Inicial(BasicFields),
    Refinada(FormSnapshot),
}

impl PredictionRequest {
    /// Elige la operación según los campos avanzados: sin ninguno, inicial con
    /// los campos básicos; con alguno, refinada con el registro completo.
    pub fn from_form(form: &FormSnapshot) -> Result<Self, DomainError> {
        let basic = BasicFields::from_form(form)?;
        if form.has_advanced_fields() {
            Ok(PredictionRequest::Refinada(form.clone()))
        } else {
            Ok(PredictionRequest::Inicial(basic))
        }
    }

    pub fn kind(&self) -> TipoPrediccion {
        match self {
            PredictionRequest::Inicial(_) => TipoPrediccion::Inicial,
            PredictionRequest::Refinada(_) => TipoPrediccion::Refinada,
        }
    }
}
