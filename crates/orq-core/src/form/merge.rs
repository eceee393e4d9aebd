//! Fusión de actualizaciones sobre `condicionesClimaticas`.
//!
//! Merge "shallow": los sub-campos presentes en la actualización reemplazan a
//! los existentes y los ausentes se conservan. Sólo `temperatura` se fusiona;
//! el resto de claves se asignan directamente.

use orq_domain::{ClimateDetail, ClimateUpdate, Temperatura};

/// Fusiona `patch` sobre `base` (o sobre una temperatura vacía si no existe).
pub fn merge_temperatura(base: Option<Temperatura>, patch: Temperatura) -> Temperatura {
    let mut out = base.unwrap_or_default();
    if patch.promedio.is_some() {
        out.promedio = patch.promedio;
    }
    if patch.minima.is_some() {
        out.minima = patch.minima;
    }
    if patch.maxima.is_some() {
        out.maxima = patch.maxima;
    }
    out
}

/// Aplica una actualización sobre el detalle climático, creándolo si hace falta.
pub fn apply_climate_update(detail: Option<ClimateDetail>, update: ClimateUpdate) -> ClimateDetail {
    let mut out = detail.unwrap_or_default();
    match update {
        ClimateUpdate::Temperatura(patch) => out.temperatura = Some(merge_temperatura(out.temperatura.take(), patch)),
        ClimateUpdate::Humedad(v) => out.humedad = v,
        ClimateUpdate::Precipitacion(v) => out.precipitacion = v,
        ClimateUpdate::Estacion(v) => out.estacion = v,
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use orq_domain::Medida;

    #[test]
    fn temperature_patches_keep_siblings() {
        let first = merge_temperatura(None, Temperatura { promedio: Some(Medida::from(25)), ..Default::default() });
        let second = merge_temperatura(Some(first), Temperatura { minima: Some(Medida::from(18)), ..Default::default() });
        assert_eq!(second,
                   Temperatura { promedio: Some(Medida::from(25)), minima: Some(Medida::from(18)), maxima: None });
    }

    #[test]
    fn patch_overrides_existing_key() {
        let base = Temperatura { promedio: Some(Medida::from(25)), ..Default::default() };
        let out = merge_temperatura(Some(base), Temperatura { promedio: Some(Medida::from(27)), ..Default::default() });
        assert_eq!(out.promedio, Some(Medida::from(27)));
    }

    #[test]
    fn other_keys_replace_directly() {
        let d = apply_climate_update(None, ClimateUpdate::Humedad(Some(Medida::from(70))));
        let d = apply_climate_update(Some(d), ClimateUpdate::Estacion(Some("verano".into())));
        let d = apply_climate_update(Some(d), ClimateUpdate::Humedad(None));
        assert_eq!(d.humedad, None);
        assert_eq!(d.estacion.as_deref(), Some("verano"));
    }
}
