//! Demo guionizada: recorre una sesión completa de edición contra el
//! proveedor configurado (mock si no hay `ORQ_PREDICTOR_URL`).
use std::time::Duration;

use chrono::{Days, Local};
use orquiflow_rust::bootstrap::orchestrator_builder;
use orquiflow_rust::logging::init_logging;
use orquiflow_rust::{AppConfig, ClimateUpdate, CoreError, FormField, Medida, PredictionOrchestrator, Temperatura};

fn print_state(label: &str, orq: &PredictionOrchestrator) -> Result<(), CoreError> {
    let snap = serde_json::to_string_pretty(&orq.snapshot()).map_err(|e| CoreError::Internal(e.to_string()))?;
    let progress = orq.form_progress();
    println!("== {label} (progreso {}% {}/{})\n{snap}",
             progress.percentage, progress.filled_fields, progress.total_fields);
    Ok(())
}

async fn settle(orq: &PredictionOrchestrator) {
    tokio::time::sleep(orq.config().debounce_delay + Duration::from_millis(200)).await;
}

async fn run() -> Result<(), CoreError> {
    let cfg = AppConfig::from_env()?;
    let orq = orchestrator_builder(&cfg)?.on_prediccion_update(|r| {
                                             println!(">> predicción {}: {} días ({}%)",
                                                      r.tipo_prediccion.as_str(),
                                                      r.dias_estimados,
                                                      r.confianza)
                                         })
                                         .on_error(|m| println!(">> error: {m}"))
                                         .build()?;

    orq.update_field(FormField::Especie, "ca");
    settle(&orq).await;
    print_state("especie demasiado corta", &orq)?;

    orq.update_field(FormField::Especie, "Cattleya trianae");
    orq.update_field(FormField::Clima, "templado");
    orq.update_field(FormField::Ubicacion, "vivero 2");
    settle(&orq).await;
    print_state("predicción inicial", &orq)?;

    let fecha = Local::now().date_naive()
                            .checked_sub_days(Days::new(20))
                            .ok_or_else(|| CoreError::Internal("fecha fuera de rango".into()))?;
    orq.update_field(FormField::FechaPolinizacion, fecha.format("%Y-%m-%d").to_string());
    orq.update_condiciones_climaticas(ClimateUpdate::Temperatura(Temperatura { promedio: Some(Medida::from(24.0)),
                                                                               ..Default::default() }));
    orq.update_condiciones_climaticas(ClimateUpdate::Temperatura(Temperatura { minima: Some(Medida::from(17.0)),
                                                                               ..Default::default() }));
    settle(&orq).await;
    print_state("predicción refinada", &orq)?;

    let outcome = orq.force_update().outcome().await;
    println!(">> forzar sin cambios: {outcome:?}");

    orq.clear_form();
    print_state("formulario limpio", &orq)?;
    orq.teardown();
    Ok(())
}

#[tokio::main]
async fn main() {
    init_logging();
    if let Err(e) = run().await {
        eprintln!("[orquiflow-demo] {e}");
        std::process::exit(1);
    }
}
