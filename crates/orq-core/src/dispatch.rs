//! Despacho de intentos de predicción.
//!
//! `PredictionDispatcher` envuelve al proveedor remoto y a los callbacks
//! externos. `DispatchLedger` lleva la contabilidad que resuelve las carreras
//! entre temporizadores, edición y respuestas: generación (invalida todo lo
//! anterior a un `clear_form`), contador de intentos (último en reconciliar
//! gana), llamadas en vuelo y firma del último envío.
use std::fmt;
use std::sync::Arc;

use orq_domain::{PredictionRequest, PredictionResult};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::errors::PredictionError;
use crate::hashing::RequestSignature;
use crate::provider::PredictionProvider;

pub type PredictionCallback = Arc<dyn Fn(&PredictionResult) + Send + Sync>;
pub type ErrorCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Resultado explícito de un intento de despacho.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    /// La respuesta se aplicó a `prediccion`.
    Reconciled(PredictionResult),
    /// El proveedor falló; el mensaje quedó publicado en `error`.
    Failed(String),
    /// La validación o la guarda previa impidieron la llamada.
    Blocked(String),
    /// Misma firma que el envío anterior: no hubo llamada.
    Duplicate,
    /// Llegó después de una respuesta más reciente y se ignoró.
    Stale,
    /// Cancelado por `clear_form`, teardown o destrucción del orquestador.
    Discarded,
}

impl AttemptOutcome {
    pub fn is_reconciled(&self) -> bool { matches!(self, AttemptOutcome::Reconciled(_)) }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            AttemptOutcome::Failed(m) | AttemptOutcome::Blocked(m) => Some(m),
            _ => None,
        }
    }
}

/// Intento lanzado por `force_update`. Se puede esperar o ignorar.
#[derive(Debug)]
pub struct AttemptHandle {
    task: JoinHandle<AttemptOutcome>,
}

impl AttemptHandle {
    pub(crate) fn new(task: JoinHandle<AttemptOutcome>) -> Self { Self { task } }

    pub async fn outcome(self) -> AttemptOutcome {
        self.task.await.unwrap_or(AttemptOutcome::Discarded)
    }

    pub fn is_finished(&self) -> bool { self.task.is_finished() }
}

#[derive(Clone, Default)]
pub struct Callbacks {
    pub on_prediccion_update: Option<PredictionCallback>,
    pub on_error: Option<ErrorCallback>,
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
         .field("on_prediccion_update", &self.on_prediccion_update.is_some())
         .field("on_error", &self.on_error.is_some())
         .finish()
    }
}

#[derive(Clone)]
pub struct PredictionDispatcher {
    provider: Arc<dyn PredictionProvider>,
    callbacks: Callbacks,
}

impl PredictionDispatcher {
    pub fn new(provider: Arc<dyn PredictionProvider>, callbacks: Callbacks) -> Self { Self { provider, callbacks } }

    pub fn provider_name(&self) -> &str { self.provider.get_name() }

    /// Ejecuta la llamada remota compitiendo con `token`. `None` si el token
    /// se canceló primero; el futuro del proveedor se descarta en ese caso.
    pub async fn call(&self,
                      request: &PredictionRequest,
                      token: &CancellationToken)
                      -> Option<Result<PredictionResult, PredictionError>> {
        tokio::select! {
            biased;
            _ = token.cancelled() => None,
            res = self.provider.predict(request) => Some(res),
        }
    }

    pub fn notify_prediccion(&self, result: &PredictionResult) {
        if let Some(cb) = &self.callbacks.on_prediccion_update {
            cb(result);
        }
    }

    pub fn notify_error(&self, message: &str) {
        if let Some(cb) = &self.callbacks.on_error {
            cb(message);
        }
    }
}

/// Veredicto de `DispatchLedger::close`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closure {
    /// La respuesta es la más reciente y puede aplicarse.
    Current,
    /// Ya se reconcilió un intento posterior.
    Stale,
    /// Pertenece a una generación anterior a un `clear_form`.
    Superseded,
}

#[derive(Debug)]
pub struct DispatchLedger {
    generation: u64,
    next_attempt: u64,
    last_reconciled: u64,
    in_flight: usize,
    last_signature: Option<RequestSignature>,
    lifetime: CancellationToken,
    generation_token: CancellationToken,
}

impl DispatchLedger {
    pub fn new(lifetime: &CancellationToken) -> Self {
        Self { generation: 0,
               next_attempt: 0,
               last_reconciled: 0,
               in_flight: 0,
               last_signature: None,
               generation_token: lifetime.child_token(),
               lifetime: lifetime.clone() }
    }

    pub fn generation(&self) -> u64 { self.generation }

    pub fn in_flight(&self) -> usize { self.in_flight }

    pub fn is_loading(&self) -> bool { self.in_flight > 0 }

    pub fn last_signature(&self) -> Option<&RequestSignature> { self.last_signature.as_ref() }

    pub fn is_duplicate(&self, signature: &RequestSignature) -> bool { self.last_signature.as_ref() == Some(signature) }

    /// Registra un envío y devuelve su id de intento y el token que lo cancela.
    pub fn open(&mut self, signature: RequestSignature) -> (u64, CancellationToken) {
        self.next_attempt += 1;
        self.in_flight += 1;
        self.last_signature = Some(signature);
        (self.next_attempt, self.generation_token.clone())
    }

    pub fn close(&mut self, attempt_id: u64, generation: u64) -> Closure {
        if generation != self.generation {
            return Closure::Superseded;
        }
        self.in_flight = self.in_flight.saturating_sub(1);
        if attempt_id < self.last_reconciled {
            return Closure::Stale;
        }
        self.last_reconciled = attempt_id;
        Closure::Current
    }

    /// Tras un fallo, un envío idéntico debe poder repetirse. Sólo se olvida
    /// si nadie envió otra cosa entretanto.
    pub fn forget_signature(&mut self, signature: &RequestSignature) {
        if self.last_signature.as_ref() == Some(signature) {
            self.last_signature = None;
        }
    }

    /// Abre una generación nueva y cancela todo lo que estaba en vuelo.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.generation_token.cancel();
        self.generation_token = self.lifetime.child_token();
        self.in_flight = 0;
        self.last_signature = None;
    }
}
