//! Proveedor simulado con respuestas guionizadas.
//!
//! Cada llamada queda registrada al entrar (operación, payload JSON e
//! `Instant` de tokio) antes de esperar la latencia, de modo que una llamada
//! cancelada a mitad también aparece en `calls()` pero no en
//! `completed_count()`.
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Days, Local};
use orq_core::{PredictionError, PredictionProvider};
use orq_domain::{BasicFields, FormSnapshot, PredictionResult, TipoPrediccion};
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub operacion: TipoPrediccion,
    pub payload: Value,
    pub at: Instant,
}

struct Reply {
    latency: Option<Duration>,
    result: Result<PredictionResult, PredictionError>,
}

#[derive(Default)]
struct MockState {
    script: VecDeque<Reply>,
    calls: Vec<RecordedCall>,
    completed: usize,
}

pub struct MockPredictionProvider {
    name: String,
    latency: Duration,
    state: Mutex<MockState>,
}

/// Resultado sintético: 120 días para la inicial, 110 para la refinada.
pub fn sample_result(tipo: TipoPrediccion) -> PredictionResult {
    let (dias, confianza) = match tipo {
        TipoPrediccion::Inicial => (120u32, 65.0),
        TipoPrediccion::Refinada => (110, 85.0),
    };
    let hoy = Local::now().date_naive();
    PredictionResult { dias_estimados: f64::from(dias),
                       confianza,
                       fecha_estimada: hoy.checked_add_days(Days::new(u64::from(dias))).unwrap_or(hoy),
                       tipo_prediccion: tipo,
                       detalle: Map::new() }
}

impl MockPredictionProvider {
    pub fn new() -> Self { Self { name: "mock".to_string(), latency: Duration::ZERO, state: Mutex::new(MockState::default()) } }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Latencia por defecto de cada respuesta.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn lock(&self) -> MutexGuard<'_, MockState> { self.state.lock().unwrap_or_else(PoisonError::into_inner) }

    /// Encola la respuesta de la próxima llamada.
    pub fn push_ok(&self, result: PredictionResult) {
        self.lock().script.push_back(Reply { latency: None, result: Ok(result) });
    }

    pub fn push_err(&self, error: PredictionError) {
        self.lock().script.push_back(Reply { latency: None, result: Err(error) });
    }

    /// Encola una respuesta con latencia propia.
    pub fn push_reply_after(&self, latency: Duration, result: Result<PredictionResult, PredictionError>) {
        self.lock().script.push_back(Reply { latency: Some(latency), result });
    }

    pub fn calls(&self) -> Vec<RecordedCall> { self.lock().calls.clone() }

    pub fn call_count(&self) -> usize { self.lock().calls.len() }

    pub fn calls_of(&self, operacion: TipoPrediccion) -> Vec<RecordedCall> {
        self.lock().calls.iter().filter(|c| c.operacion == operacion).cloned().collect()
    }

    /// Llamadas que llegaron a responder (no canceladas durante la latencia).
    pub fn completed_count(&self) -> usize { self.lock().completed }

    async fn respond<P: Serialize + ?Sized>(&self,
                                            operacion: TipoPrediccion,
                                            payload: &P)
                                            -> Result<PredictionResult, PredictionError> {
        let (latency, result) = {
            let mut state = self.lock();
            state.calls.push(RecordedCall { operacion,
                                            payload: serde_json::to_value(payload).unwrap_or(Value::Null),
                                            at: Instant::now() });
            match state.script.pop_front() {
                Some(reply) => (reply.latency.unwrap_or(self.latency), reply.result),
                None => (self.latency, Ok(sample_result(operacion))),
            }
        };
        log::debug!("mock:call provider={} op={} latency_ms={}", self.name, operacion.as_str(), latency.as_millis());
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        self.lock().completed += 1;
        result
    }
}

impl Default for MockPredictionProvider {
    fn default() -> Self { Self::new() }
}

#[async_trait]
impl PredictionProvider for MockPredictionProvider {
    fn get_name(&self) -> &str { &self.name }

    async fn predict_initial(&self, payload: &BasicFields) -> Result<PredictionResult, PredictionError> {
        self.respond(TipoPrediccion::Inicial, payload).await
    }

    async fn predict_refine(&self, payload: &FormSnapshot) -> Result<PredictionResult, PredictionError> {
        self.respond(TipoPrediccion::Refinada, payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn basic(especie: &str) -> BasicFields {
        BasicFields { especie: especie.into(), clima: String::new(), ubicacion: String::new() }
    }

    #[tokio::test]
    async fn default_reply_is_synthetic_and_recorded() {
        let mock = MockPredictionProvider::new();
        let r = mock.predict_initial(&basic("cattleya")).await.unwrap();
        assert_eq!(r.dias_estimados, 120.0);
        assert_eq!(r.tipo_prediccion, TipoPrediccion::Inicial);
        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].payload, json!({"especie": "cattleya", "clima": "", "ubicacion": ""}));
        assert_eq!(mock.completed_count(), 1);
    }

    #[tokio::test]
    async fn scripted_replies_are_consumed_in_order() {
        let mock = MockPredictionProvider::new();
        mock.push_err(PredictionError::remote("Especie no soportada"));
        mock.push_ok(sample_result(TipoPrediccion::Refinada));
        assert_eq!(mock.predict_initial(&basic("x")).await, Err(PredictionError::remote("Especie no soportada")));
        assert_eq!(mock.predict_initial(&basic("x")).await.unwrap().dias_estimados, 110.0);
        assert_eq!(mock.predict_initial(&basic("x")).await.unwrap().dias_estimados, 120.0);
    }

    #[tokio::test(start_paused = true)]
    async fn latency_is_observed() {
        let mock = MockPredictionProvider::new().with_latency(Duration::from_millis(300));
        let start = Instant::now();
        mock.predict_refine(&FormSnapshot::default()).await.unwrap();
        assert_eq!(Instant::now() - start, Duration::from_millis(300));
        assert_eq!(mock.calls_of(TipoPrediccion::Refinada).len(), 1);
        assert!(mock.calls_of(TipoPrediccion::Inicial).is_empty());
    }
}
