use chrono::{Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationVerdict;
use crate::constants::MAX_ANTIGUEDAD_FECHA_MESES;

static ESPECIE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9 \-]+$").expect("valid especie regex"));
static FECHA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid fecha regex"));

/// Regla de campo para `especie`: requerida, al menos 3 caracteres y sólo
/// letras, dígitos, espacios y guiones.
pub fn validate_especie(especie: &str) -> ValidationVerdict {
    let especie = especie.trim();
    if especie.is_empty() {
        return ValidationVerdict::from_errors(vec!["La especie es requerida".to_string()]);
    }
    let mut errors = Vec::new();
    if especie.chars().count() < 3 {
        errors.push("La especie debe tener al menos 3 caracteres".to_string());
    }
    if !ESPECIE_RE.is_match(especie) {
        errors.push("La especie solo puede contener letras, números, espacios y guiones".to_string());
    }
    ValidationVerdict::from_errors(errors)
}

/// Regla de campo para `fechaPolinizacion` (opcional): formato `YYYY-MM-DD`,
/// fecha real, no futura y no más de dos años en el pasado respecto a `today`.
pub fn validate_fecha_polinizacion(fecha: &str, today: NaiveDate) -> ValidationVerdict {
    let fecha = fecha.trim();
    if fecha.is_empty() {
        return ValidationVerdict::ok();
    }
    if !FECHA_RE.is_match(fecha) {
        return ValidationVerdict::from_errors(vec!["La fecha de polinización debe tener el formato YYYY-MM-DD".to_string()]);
    }
    let Ok(date) = NaiveDate::parse_from_str(fecha, "%Y-%m-%d") else {
        return ValidationVerdict::from_errors(vec!["La fecha de polinización no es una fecha válida".to_string()]);
    };
    let mut errors = Vec::new();
    if date > today {
        errors.push("La fecha de polinización no puede ser futura".to_string());
    }
    if let Some(limite) = today.checked_sub_months(Months::new(MAX_ANTIGUEDAD_FECHA_MESES)) {
        if date < limite {
            errors.push("La fecha de polinización no puede tener más de 2 años de antigüedad".to_string());
        }
    }
    ValidationVerdict::from_errors(errors)
}
