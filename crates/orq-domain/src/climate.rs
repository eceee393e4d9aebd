//! Condiciones climáticas detalladas de un registro.
//!
//! Todos los sub-campos son opcionales e independientes. Los valores numéricos
//! se guardan tal como llegan desde la entrada (`Medida`) para que la
//! validación pueda distinguir un número fuera de rango de un valor que ni
//! siquiera es numérico.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DomainError;

/// Valor numérico crudo de un campo de entrada.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Medida {
    Numero(f64),
    Texto(String),
}

impl Medida {
    /// Devuelve el número sólo si es finito. Un `Texto` nunca se coerciona,
    /// aunque su contenido parezca un número.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Medida::Numero(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }
}

impl From<f64> for Medida {
    fn from(v: f64) -> Self { Medida::Numero(v) }
}

impl From<i32> for Medida {
    fn from(v: i32) -> Self { Medida::Numero(f64::from(v)) }
}

impl From<&str> for Medida {
    fn from(v: &str) -> Self { Medida::Texto(v.to_string()) }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Temperatura {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promedio: Option<Medida>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minima: Option<Medida>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxima: Option<Medida>,
}

impl Temperatura {
    pub fn is_empty(&self) -> bool {
        self.promedio.is_none() && self.minima.is_none() && self.maxima.is_none()
    }
}

/// Estaciones admitidas en `ClimateDetail::estacion`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Estacion {
    Primavera,
    Verano,
    #[serde(rename = "otoño")]
    Otono,
    Invierno,
}

impl Estacion {
    pub const ALL: [Estacion; 4] = [Estacion::Primavera, Estacion::Verano, Estacion::Otono, Estacion::Invierno];

    pub fn as_str(&self) -> &'static str {
        match self {
            Estacion::Primavera => "primavera",
            Estacion::Verano => "verano",
            Estacion::Otono => "otoño",
            Estacion::Invierno => "invierno",
        }
    }
}

impl fmt::Display for Estacion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Estacion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Estacion::ALL.iter()
                     .copied()
                     .find(|e| e.as_str() == s)
                     .ok_or_else(|| DomainError::UnknownField(s.to_string()))
    }
}

/// Sub-registro `condicionesClimaticas`. `estacion` se conserva como texto
/// para que un valor fuera de la enumeración llegue a la validación.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClimateDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperatura: Option<Temperatura>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humedad: Option<Medida>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitacion: Option<Medida>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estacion: Option<String>,
}

impl ClimateDetail {
    /// Un detalle sin ningún sub-campo cuenta como no rellenado.
    pub fn is_empty(&self) -> bool {
        self.temperatura.as_ref().map_or(true, Temperatura::is_empty)
        && self.humedad.is_none()
        && self.precipitacion.is_none()
        && self.estacion.as_deref().map_or(true, |s| s.trim().is_empty())
    }
}

/// Mutación de un sub-campo de `condicionesClimaticas`.
///
/// `Temperatura` se fusiona con la temperatura existente (los sub-campos
/// ausentes en la actualización se conservan); el resto reemplaza el valor.
#[derive(Debug, Clone, PartialEq)]
pub enum ClimateUpdate {
    Temperatura(Temperatura),
    Humedad(Option<Medida>),
    Precipitacion(Option<Medida>),
    Estacion(Option<String>),
}
