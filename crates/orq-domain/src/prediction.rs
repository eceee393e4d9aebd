use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoPrediccion {
    /// Estimación con los campos básicos.
    Inicial,
    /// Estimación con el registro completo (algún campo avanzado presente).
    Refinada,
}

impl TipoPrediccion {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoPrediccion::Inicial => "inicial",
            TipoPrediccion::Refinada => "refinada",
        }
    }
}

/// Respuesta del servicio de predicción. El orquestador sólo interpreta los
/// campos tipados; `detalle` se transmite sin modificar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    /// Días hasta la maduración. El servicio puede enviar decimales.
    pub dias_estimados: f64,
    /// Porcentaje 0–100.
    pub confianza: f64,
    pub fecha_estimada: NaiveDate,
    pub tipo_prediccion: TipoPrediccion,
    #[serde(default)]
    pub detalle: Map<String, Value>,
}
