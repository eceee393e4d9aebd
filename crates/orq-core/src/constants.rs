//! Constantes del orquestador.
//!
//! Los mensajes son los que ve el usuario final; los retrasos por defecto
//! corresponden a cada perfil de formulario (ver `PredictionProfile`).

use std::time::Duration;

pub const DEFAULT_DEBOUNCE_POLINIZACION: Duration = Duration::from_millis(1000);
pub const DEFAULT_DEBOUNCE_GERMINACION: Duration = Duration::from_millis(800);
pub const DEFAULT_DEBOUNCE_PROGRESIVA: Duration = Duration::from_millis(1500);

pub const TIPOS_POLINIZACION: [&str; 5] = ["artificial", "manual", "natural", "cruzada", "autopolinizacion"];
pub const TIPOS_GERMINACION: [&str; 4] = ["in_vitro", "simbiotica", "asimbiotica", "siembra_directa"];

/// Antigüedad máxima admitida para `fechaPolinizacion`, en meses.
pub const MAX_ANTIGUEDAD_FECHA_MESES: u32 = 24;

pub const MSG_ESPECIE_REQUERIDA_PREDICCION: &str = "La especie es requerida para generar una predicción";
pub const MSG_ERROR_CONEXION: &str = "Error de conexión con el servicio de predicción";
pub const MSG_ERROR_DESCONOCIDO: &str = "Error desconocido al generar la predicción";
