#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{Days, Local};
use orq_core::{OrchestratorBuilder, PredictionOrchestrator};
use orq_domain::{PredictionResult, TipoPrediccion};
use orq_providers::{sample_result, MockPredictionProvider};

pub const DELAY: Duration = Duration::from_millis(500);

pub struct Harness {
    pub mock: Arc<MockPredictionProvider>,
    pub orq: PredictionOrchestrator,
    pub predictions: Arc<Mutex<Vec<PredictionResult>>>,
    pub errors: Arc<Mutex<Vec<String>>>,
}

impl Harness {
    pub fn new() -> Self { Self::with(MockPredictionProvider::new(), |b| b) }

    pub fn with_latency(latency: Duration) -> Self { Self::with(MockPredictionProvider::new().with_latency(latency), |b| b) }

    pub fn with(mock: MockPredictionProvider, tune: impl FnOnce(OrchestratorBuilder) -> OrchestratorBuilder) -> Self {
        let mock = Arc::new(mock);
        let predictions = Arc::new(Mutex::new(Vec::new()));
        let errors = Arc::new(Mutex::new(Vec::new()));
        let p = predictions.clone();
        let e = errors.clone();
        let builder = PredictionOrchestrator::builder(mock.clone()).debounce(DELAY)
                                                                   .on_prediccion_update(move |r| p.lock().unwrap().push(r.clone()))
                                                                   .on_error(move |m| e.lock().unwrap().push(m.to_string()));
        let orq = tune(builder).build().unwrap();
        Self { mock, orq, predictions, errors }
    }

    pub fn errors(&self) -> Vec<String> { self.errors.lock().unwrap().clone() }

    pub fn predictions(&self) -> Vec<PredictionResult> { self.predictions.lock().unwrap().clone() }
}

/// Resultado con días fijos para distinguir respuestas entre sí.
pub fn result_with_days(tipo: TipoPrediccion, dias: u32) -> PredictionResult {
    let mut r = sample_result(tipo);
    r.dias_estimados = f64::from(dias);
    r
}

/// Fecha válida relativa a hoy (un mes atrás), en formato `YYYY-MM-DD`.
pub fn recent_date() -> String {
    Local::now().date_naive().checked_sub_days(Days::new(30)).unwrap().format("%Y-%m-%d").to_string()
}
