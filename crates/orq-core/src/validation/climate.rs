use orq_domain::{ClimateDetail, Estacion, Medida};

use super::ValidationVerdict;

struct Rango {
    etiqueta: &'static str,
    min: f64,
    max: f64,
    unidad: &'static str,
}

const PROMEDIO: Rango = Rango { etiqueta: "La temperatura promedio", min: 0.0, max: 50.0, unidad: "°C" };
const MINIMA: Rango = Rango { etiqueta: "La temperatura mínima", min: -10.0, max: 40.0, unidad: "°C" };
const MAXIMA: Rango = Rango { etiqueta: "La temperatura máxima", min: 10.0, max: 60.0, unidad: "°C" };
const HUMEDAD: Rango = Rango { etiqueta: "La humedad", min: 0.0, max: 100.0, unidad: "%" };

const PRECIPITACION_MAXIMA: f64 = 500.0;

/// Devuelve el número si la medida es numérica; si no, registra el error
/// "debe ser un número" y devuelve `None`.
fn numero(medida: Option<&Medida>, etiqueta: &str, errors: &mut Vec<String>) -> Option<f64> {
    let medida = medida?;
    match medida.as_number() {
        Some(n) => Some(n),
        None => {
            errors.push(format!("{etiqueta} debe ser un número"));
            None
        }
    }
}

fn en_rango(valor: Option<f64>, rango: &Rango, errors: &mut Vec<String>) -> Option<f64> {
    let v = valor?;
    if v < rango.min || v > rango.max {
        errors.push(format!("{} debe estar entre {}{} y {}{}", rango.etiqueta, rango.min, rango.unidad, rango.max, rango.unidad));
    }
    Some(v)
}

/// Valida `condicionesClimaticas`. Cada sub-campo es opcional; los rangos y
/// las relaciones entre temperaturas sólo se comprueban sobre valores
/// numéricos.
pub fn validate_climate_conditions(detail: &ClimateDetail) -> ValidationVerdict {
    let mut errors = Vec::new();

    if let Some(t) = &detail.temperatura {
        let promedio = numero(t.promedio.as_ref(), PROMEDIO.etiqueta, &mut errors);
        let promedio = en_rango(promedio, &PROMEDIO, &mut errors);
        let minima = numero(t.minima.as_ref(), MINIMA.etiqueta, &mut errors);
        let minima = en_rango(minima, &MINIMA, &mut errors);
        let maxima = numero(t.maxima.as_ref(), MAXIMA.etiqueta, &mut errors);
        let maxima = en_rango(maxima, &MAXIMA, &mut errors);

        if let (Some(min), Some(prom)) = (minima, promedio) {
            if min > prom {
                errors.push("La temperatura mínima no puede ser mayor que la promedio".to_string());
            }
        }
        if let (Some(max), Some(prom)) = (maxima, promedio) {
            if max < prom {
                errors.push("La temperatura máxima no puede ser menor que la promedio".to_string());
            }
        }
    }

    let humedad = numero(detail.humedad.as_ref(), HUMEDAD.etiqueta, &mut errors);
    en_rango(humedad, &HUMEDAD, &mut errors);

    if let Some(p) = numero(detail.precipitacion.as_ref(), "La precipitación", &mut errors) {
        if p < 0.0 {
            errors.push("La precipitación no puede ser negativa".to_string());
        } else if p > PRECIPITACION_MAXIMA {
            errors.push(format!("La precipitación es excesivamente alta (máximo {PRECIPITACION_MAXIMA} mm)"));
        }
    }

    if let Some(estacion) = detail.estacion.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        if estacion.parse::<Estacion>().is_err() {
            let validas: Vec<&str> = Estacion::ALL.iter().map(Estacion::as_str).collect();
            errors.push(format!("La estación debe ser una de: {}", validas.join(", ")));
        }
    }

    ValidationVerdict::from_errors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orq_domain::Temperatura;

    fn temp(promedio: Option<Medida>, minima: Option<Medida>, maxima: Option<Medida>) -> ClimateDetail {
        ClimateDetail { temperatura: Some(Temperatura { promedio, minima, maxima }), ..Default::default() }
    }

    #[test]
    fn promedio_out_of_range() {
        let v = validate_climate_conditions(&temp(Some(Medida::from(100)), None, None));
        assert!(!v.is_valid);
        assert_eq!(v.errors, vec!["La temperatura promedio debe estar entre 0°C y 50°C"]);
    }

    #[test]
    fn range_messages_render_negative_bounds() {
        let v = validate_climate_conditions(&temp(None, Some(Medida::from(-20)), Some(Medida::from(5))));
        assert_eq!(v.errors,
                   vec!["La temperatura mínima debe estar entre -10°C y 40°C", "La temperatura máxima debe estar entre 10°C y 60°C"]);
    }

    #[test]
    fn temperature_ordering() {
        let v = validate_climate_conditions(&temp(Some(Medida::from(20)), Some(Medida::from(22)), Some(Medida::from(18))));
        assert_eq!(v.errors,
                   vec!["La temperatura mínima no puede ser mayor que la promedio",
                        "La temperatura máxima no puede ser menor que la promedio"]);
        assert!(validate_climate_conditions(&temp(Some(Medida::from(20)), Some(Medida::from(20)), Some(Medida::from(20)))).is_valid);
    }

    #[test]
    fn non_numeric_values_are_reported_not_coerced() {
        let v = validate_climate_conditions(&temp(Some(Medida::from("25")), Some(Medida::from(30)), None));
        // Sin promedio numérico no se compara mínima vs promedio.
        assert_eq!(v.errors, vec!["La temperatura promedio debe ser un número"]);
        let d = ClimateDetail { humedad: Some(Medida::Numero(f64::NAN)), ..Default::default() };
        assert_eq!(validate_climate_conditions(&d).errors, vec!["La humedad debe ser un número"]);
    }

    #[test]
    fn precipitation_limits() {
        let d = |p: f64| ClimateDetail { precipitacion: Some(Medida::from(p)), ..Default::default() };
        assert!(validate_climate_conditions(&d(0.0)).is_valid);
        assert!(validate_climate_conditions(&d(500.0)).is_valid);
        assert_eq!(validate_climate_conditions(&d(-1.0)).errors, vec!["La precipitación no puede ser negativa"]);
        assert_eq!(validate_climate_conditions(&d(650.0)).errors,
                   vec!["La precipitación es excesivamente alta (máximo 500 mm)"]);
    }

    #[test]
    fn season_enumeration() {
        let d = |s: &str| ClimateDetail { estacion: Some(s.to_string()), ..Default::default() };
        assert!(validate_climate_conditions(&d("otoño")).is_valid);
        assert!(validate_climate_conditions(&d("")).is_valid);
        assert_eq!(validate_climate_conditions(&d("monzon")).errors,
                   vec!["La estación debe ser una de: primavera, verano, otoño, invierno"]);
    }
}
