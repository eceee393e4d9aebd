//! Motor de validación del formulario.
//!
//! Funciones puras y totales: reciben una instantánea del formulario y
//! devuelven un `ValidationVerdict`. Todas las reglas aplicables se evalúan
//! (no hay cortocircuito) y sus errores se acumulan en orden de prioridad:
//! especie, fecha, tipo, condiciones climáticas.
//!
//! La enumeración de tipos de polinización es un parámetro del motor, no
//! parte del algoritmo: cada perfil de formulario aporta la suya.

mod climate;
mod rules;

use chrono::{Local, NaiveDate};
use orq_domain::{is_filled, FormSnapshot};
use serde::{Deserialize, Serialize};

pub use climate::validate_climate_conditions;
pub use rules::{validate_especie, validate_fecha_polinizacion};

/// Resultado derivado de validar; nunca se almacena.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationVerdict {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationVerdict {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self { is_valid: errors.is_empty(), errors }
    }

    pub fn ok() -> Self { Self::from_errors(Vec::new()) }

    pub fn first_error(&self) -> Option<&str> { self.errors.first().map(String::as_str) }

    fn absorb(&mut self, other: ValidationVerdict) {
        self.errors.extend(other.errors);
        self.is_valid = self.errors.is_empty();
    }
}

/// Vista publicada por `validation_state()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationState {
    pub is_valid: bool,
    pub errors: Vec<String>,
    /// `is_valid` y `especie` no vacía. Un formulario vacío es válido pero no
    /// predecible.
    pub can_predict: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationEngine {
    tipos_permitidos: Vec<String>,
}

impl ValidationEngine {
    pub fn new<I, S>(tipos_permitidos: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self { tipos_permitidos: tipos_permitidos.into_iter().map(Into::into).collect() }
    }

    pub fn tipos_permitidos(&self) -> &[String] { &self.tipos_permitidos }

    /// Valida contra la fecha local de hoy.
    pub fn validate(&self, form: &FormSnapshot) -> ValidationVerdict {
        self.validate_on(form, Local::now().date_naive())
    }

    /// Valida tomando `today` como referencia para las reglas de fecha.
    pub fn validate_on(&self, form: &FormSnapshot, today: NaiveDate) -> ValidationVerdict {
        let mut verdict = ValidationVerdict::ok();
        // Especie vacía no es un error agregado: el formulario está sin empezar.
        if is_filled(&form.especie) {
            verdict.absorb(validate_especie(&form.especie));
        }
        if is_filled(&form.fecha_polinizacion) {
            verdict.absorb(validate_fecha_polinizacion(&form.fecha_polinizacion, today));
        }
        if is_filled(&form.tipo_polinizacion) {
            verdict.absorb(self.validate_tipo_polinizacion(&form.tipo_polinizacion));
        }
        if let Some(detail) = &form.condiciones_climaticas {
            verdict.absorb(validate_climate_conditions(detail));
        }
        verdict
    }

    pub fn validation_state(&self, form: &FormSnapshot) -> ValidationState {
        self.validation_state_on(form, Local::now().date_naive())
    }

    pub fn validation_state_on(&self, form: &FormSnapshot, today: NaiveDate) -> ValidationState {
        let verdict = self.validate_on(form, today);
        ValidationState { can_predict: verdict.is_valid && is_filled(&form.especie),
                          is_valid: verdict.is_valid,
                          errors: verdict.errors }
    }

    pub fn validate_tipo_polinizacion(&self, tipo: &str) -> ValidationVerdict {
        let tipo = tipo.trim();
        if tipo.is_empty() || self.tipos_permitidos.iter().any(|t| t == tipo) {
            return ValidationVerdict::ok();
        }
        ValidationVerdict::from_errors(vec![format!("Tipo de polinización inválido. Valores permitidos: {}",
                                                    self.tipos_permitidos.join(", "))])
    }
}
