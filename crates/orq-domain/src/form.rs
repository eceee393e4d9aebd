//! `FormSnapshot`: el registro que el usuario edita campo a campo.
//!
//! Campos básicos: `especie`, `genero`, `clima`, `ubicacion`. Campos
//! avanzados: `fechaPolinizacion`, `tipoPolinizacion` y
//! `condicionesClimaticas`. La presencia de cualquier campo avanzado cambia la
//! operación remota usada para predecir (inicial vs. refinada).
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::climate::ClimateDetail;
use crate::DomainError;

/// Un campo de texto cuenta como rellenado si tiene algo más que espacios.
pub fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    pub especie: String,
    #[serde(default)]
    pub genero: String,
    #[serde(default)]
    pub clima: String,
    #[serde(default)]
    pub ubicacion: String,
    #[serde(default)]
    pub fecha_polinizacion: String,
    #[serde(default)]
    pub tipo_polinizacion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condiciones_climaticas: Option<ClimateDetail>,
}

impl FormSnapshot {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Especie => &self.especie,
            FormField::Genero => &self.genero,
            FormField::Clima => &self.clima,
            FormField::Ubicacion => &self.ubicacion,
            FormField::FechaPolinizacion => &self.fecha_polinizacion,
            FormField::TipoPolinizacion => &self.tipo_polinizacion,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::Especie => &mut self.especie,
            FormField::Genero => &mut self.genero,
            FormField::Clima => &mut self.clima,
            FormField::Ubicacion => &mut self.ubicacion,
            FormField::FechaPolinizacion => &mut self.fecha_polinizacion,
            FormField::TipoPolinizacion => &mut self.tipo_polinizacion,
        };
        *slot = value;
    }

    pub fn has_climate_conditions(&self) -> bool {
        self.condiciones_climaticas.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// Verdadero si al menos un campo avanzado tiene contenido.
    pub fn has_advanced_fields(&self) -> bool {
        is_filled(&self.fecha_polinizacion) || is_filled(&self.tipo_polinizacion) || self.has_climate_conditions()
    }
}

/// Campos de primer nivel direccionables por `update_field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Especie,
    Genero,
    Clima,
    Ubicacion,
    FechaPolinizacion,
    TipoPolinizacion,
}

impl FormField {
    pub const ALL: [FormField; 6] = [FormField::Especie,
                                     FormField::Genero,
                                     FormField::Clima,
                                     FormField::Ubicacion,
                                     FormField::FechaPolinizacion,
                                     FormField::TipoPolinizacion];

    /// Nombre tal como aparece en el payload remoto.
    pub fn wire_name(&self) -> &'static str {
        match self {
            FormField::Especie => "especie",
            FormField::Genero => "genero",
            FormField::Clima => "clima",
            FormField::Ubicacion => "ubicacion",
            FormField::FechaPolinizacion => "fechaPolinizacion",
            FormField::TipoPolinizacion => "tipoPolinizacion",
        }
    }

    pub fn is_advanced(&self) -> bool {
        matches!(self, FormField::FechaPolinizacion | FormField::TipoPolinizacion)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for FormField {
    type Err = DomainError;

    /// Acepta el nombre camelCase del payload o su forma snake_case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        FormField::ALL.iter()
                      .copied()
                      .find(|f| f.wire_name() == key || f.wire_name().eq_ignore_ascii_case(&key.replace('_', "")))
                      .ok_or_else(|| DomainError::UnknownField(key.to_string()))
    }
}
