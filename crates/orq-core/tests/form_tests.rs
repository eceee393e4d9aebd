mod common;

use common::{recent_date, Harness};
use orq_core::FormProgress;
use orq_domain::{ClimateUpdate, FormField, Medida, Temperatura};

fn temperatura(promedio: Option<f64>, minima: Option<f64>, maxima: Option<f64>) -> ClimateUpdate {
    ClimateUpdate::Temperatura(Temperatura { promedio: promedio.map(Medida::from),
                                             minima: minima.map(Medida::from),
                                             maxima: maxima.map(Medida::from) })
}

#[tokio::test(start_paused = true)]
async fn temperature_updates_merge_instead_of_replacing() {
    let h = Harness::new();
    h.orq.update_condiciones_climaticas(temperatura(Some(25.0), None, None));
    h.orq.update_condiciones_climaticas(temperatura(None, Some(18.0), None));

    let form = h.orq.form_data();
    let t = form.condiciones_climaticas.and_then(|c| c.temperatura).unwrap();
    assert_eq!(t, Temperatura { promedio: Some(Medida::from(25.0)), minima: Some(Medida::from(18.0)), maxima: None });
}

#[tokio::test(start_paused = true)]
async fn other_climate_keys_replace_their_value() {
    let h = Harness::new();
    h.orq.update_condiciones_climaticas(ClimateUpdate::Estacion(Some("verano".into())));
    h.orq.update_condiciones_climaticas(temperatura(Some(25.0), None, None));
    h.orq.update_condiciones_climaticas(ClimateUpdate::Estacion(Some("otoño".into())));
    h.orq.update_condiciones_climaticas(ClimateUpdate::Humedad(Some(Medida::from(70.0))));
    h.orq.update_condiciones_climaticas(ClimateUpdate::Humedad(None));

    let c = h.orq.form_data().condiciones_climaticas.unwrap();
    assert_eq!(c.estacion.as_deref(), Some("otoño"));
    assert_eq!(c.humedad, None);
    assert!(c.temperatura.is_some());
    assert!(h.orq.has_changes());
}

#[tokio::test(start_paused = true)]
async fn out_of_range_temperature_is_reported() {
    let h = Harness::new();
    h.orq.update_field(FormField::Especie, "cattleya");
    h.orq.update_condiciones_climaticas(temperatura(Some(100.0), None, None));

    let state = h.orq.validation_state();
    assert!(!state.is_valid);
    assert!(!state.can_predict);
    assert_eq!(state.errors, vec!["La temperatura promedio debe estar entre 0°C y 50°C".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn textual_measure_is_not_a_number() {
    let h = Harness::new();
    h.orq.update_condiciones_climaticas(ClimateUpdate::Precipitacion(Some(Medida::from("mucha"))));
    assert_eq!(h.orq.validation_state().errors, vec!["La precipitación debe ser un número".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn validation_state_is_computed_on_every_read() {
    let h = Harness::new();
    h.orq.update_field(FormField::Especie, "ab");
    assert!(!h.orq.validation_state().is_valid);
    h.orq.update_field(FormField::Especie, "abc");
    let state = h.orq.validation_state();
    assert!(state.is_valid && state.can_predict);
}

#[tokio::test(start_paused = true)]
async fn progress_denominator_grows_with_advanced_fields() {
    let h = Harness::new();
    assert_eq!(h.orq.form_progress(), FormProgress { percentage: 0, filled_fields: 0, total_fields: 3 });

    h.orq.update_field(FormField::Especie, "cattleya");
    h.orq.update_field(FormField::Clima, "templado");
    assert_eq!(h.orq.form_progress(), FormProgress { percentage: 67, filled_fields: 2, total_fields: 3 });

    h.orq.update_field(FormField::FechaPolinizacion, recent_date());
    assert_eq!(h.orq.form_progress(), FormProgress { percentage: 50, filled_fields: 3, total_fields: 6 });

    h.orq.clear_form();
    assert_eq!(h.orq.form_progress().total_fields, 3);
}
