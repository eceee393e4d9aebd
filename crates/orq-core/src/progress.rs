//! Progreso de llenado del formulario.
//!
//! Los campos básicos (`especie`, `clima`, `ubicacion`) siempre cuentan en el
//! denominador. Los avanzados (`fechaPolinizacion`, `tipoPolinizacion`,
//! `condicionesClimaticas`) sólo entran en numerador y denominador cuando al
//! menos uno tiene contenido: quien nunca rellena la parte avanzada no ve su
//! progreso penalizado. El total es por tanto 3 o 6 según el caso.

use orq_domain::{is_filled, FormSnapshot};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormProgress {
    /// 0–100, redondeado al entero más cercano.
    pub percentage: u8,
    pub filled_fields: usize,
    pub total_fields: usize,
}

pub fn form_progress(form: &FormSnapshot) -> FormProgress {
    let basic = [is_filled(&form.especie), is_filled(&form.clima), is_filled(&form.ubicacion)];
    let advanced = [is_filled(&form.fecha_polinizacion), is_filled(&form.tipo_polinizacion), form.has_climate_conditions()];

    let mut filled = basic.iter().filter(|f| **f).count();
    let mut total = basic.len();
    if advanced.iter().any(|f| *f) {
        filled += advanced.iter().filter(|f| **f).count();
        total += advanced.len();
    }

    let percentage = ((filled as f64 / total as f64) * 100.0).round() as u8;
    FormProgress { percentage, filled_fields: filled, total_fields: total }
}
