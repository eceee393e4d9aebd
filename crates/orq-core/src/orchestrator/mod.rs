//! Orquestador de predicciones.
//!
//! Une las piezas: `FormState` recibe las mutaciones, `DebounceScheduler`
//! difiere el intento, `ValidationEngine` lo autoriza, `PredictionDispatcher`
//! llama al proveedor y `ResultState` publica el desenlace.
//!
//! Concurrencia
//! - Todo el estado mutable vive en un único `Mutex<Session>`. Ningún lock se
//!   mantiene a través de un `.await` ni mientras se invocan callbacks.
//! - Orden de locks: sesión y luego planificador. El temporizador suelta el
//!   lock del planificador antes de ejecutar su acción.
//! - Temporizadores e intentos en vuelo guardan un `Weak<Shared>`: soltar el
//!   último `PredictionOrchestrator` equivale a `teardown`.
//! - Cada intento lleva la generación vigente al crearse; `clear_form` y
//!   `teardown` abren otra generación y cancelan el token de la anterior, de
//!   modo que nada armado antes puede tocar el estado después.

pub mod builder;
pub mod config;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use orq_domain::{ClimateUpdate, FormField, FormSnapshot, PredictionRequest, PredictionResult};
use serde::Serialize;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::dispatch::{AttemptHandle, AttemptOutcome, Callbacks, Closure, DispatchLedger, PredictionDispatcher};
use crate::errors::{OrchestratorError, PredictionError};
use crate::form::FormState;
use crate::hashing::RequestSignature;
use crate::progress::{form_progress, FormProgress};
use crate::provider::PredictionProvider;
use crate::result::ResultState;
use crate::scheduler::{BoxFuture, DebounceScheduler};
use crate::validation::{ValidationEngine, ValidationState};

pub use builder::OrchestratorBuilder;
pub use config::{OrchestratorConfig, PredictionProfile};

/// Vista de sólo lectura para la capa de presentación.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestratorSnapshot {
    pub form_data: FormSnapshot,
    pub prediccion: Option<PredictionResult>,
    pub error: Option<String>,
    pub loading: bool,
    /// Hubo ediciones desde la última predicción aplicada. No indica que haya
    /// una petición pendiente: si el formulario vuelve a la firma ya enviada el
    /// intento se descarta como duplicado y la marca sigue activa.
    pub has_changes: bool,
    pub last_update: Option<DateTime<Utc>>,
}

struct Session {
    form: FormState,
    result: ResultState,
    ledger: DispatchLedger,
    torn_down: bool,
}

impl Session {
    fn sync_loading(&mut self) { self.result.loading = self.ledger.is_loading(); }
}

struct Shared {
    id: Uuid,
    config: OrchestratorConfig,
    engine: ValidationEngine,
    dispatcher: PredictionDispatcher,
    scheduler: DebounceScheduler<AttemptOutcome>,
    session: Mutex<Session>,
    lifetime: CancellationToken,
    runtime: Handle,
}

/// Envío autorizado por `prepare`, pendiente de respuesta.
struct Ticket {
    attempt_id: u64,
    generation: u64,
    revision: u64,
    request: PredictionRequest,
    signature: RequestSignature,
    token: CancellationToken,
}

enum Prepared {
    Ready(Ticket),
    Done(AttemptOutcome),
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Session> { self.session.lock().unwrap_or_else(PoisonError::into_inner) }

    fn prepare(&self, generation: u64) -> Prepared {
        let mut session = self.lock();
        if session.torn_down || session.ledger.generation() != generation {
            debug!("attempt:discarded orq_id={} generation={generation}", self.id);
            return Prepared::Done(AttemptOutcome::Discarded);
        }

        let form = session.form.snapshot().clone();
        let verdict = self.engine.validate(&form);
        let request = match verdict.first_error() {
            Some(first) => Err(OrchestratorError::Validation(first.to_string())),
            None => PredictionRequest::from_form(&form).map_err(OrchestratorError::from),
        };
        let request = match request.and_then(|r| Ok((RequestSignature::of(&r)?, r))) {
            Ok(pair) => pair,
            Err(e) => {
                let message = e.user_message();
                info!("attempt:blocked orq_id={} reason={message}", self.id);
                session.result.publish_error(message.clone());
                drop(session);
                self.dispatcher.notify_error(&message);
                return Prepared::Done(AttemptOutcome::Blocked(message));
            }
        };
        let (signature, request) = request;

        if session.ledger.is_duplicate(&signature) {
            debug!("attempt:duplicate orq_id={} sig={}", self.id, signature.short());
            return Prepared::Done(AttemptOutcome::Duplicate);
        }

        let revision = session.form.revision();
        let (attempt_id, token) = session.ledger.open(signature.clone());
        session.sync_loading();
        info!("attempt:start orq_id={} attempt={attempt_id} op={} sig={} provider={}",
              self.id,
              request.kind().as_str(),
              signature.short(),
              self.dispatcher.provider_name());
        Prepared::Ready(Ticket { attempt_id, generation, revision, request, signature, token })
    }

    fn reconcile(&self, ticket: Ticket, response: Result<PredictionResult, PredictionError>) -> AttemptOutcome {
        let mut session = self.lock();
        if session.torn_down {
            return AttemptOutcome::Discarded;
        }
        let closure = session.ledger.close(ticket.attempt_id, ticket.generation);
        session.sync_loading();
        match closure {
            Closure::Superseded => {
                debug!("attempt:superseded orq_id={} attempt={}", self.id, ticket.attempt_id);
                return AttemptOutcome::Discarded;
            }
            Closure::Stale => {
                debug!("attempt:stale orq_id={} attempt={}", self.id, ticket.attempt_id);
                return AttemptOutcome::Stale;
            }
            Closure::Current => {}
        }

        match response {
            Ok(result) => {
                session.result.reconcile_success(result.clone(), Utc::now());
                session.form.mark_synced(ticket.revision);
                info!("attempt:reconciled orq_id={} attempt={} dias={} confianza={}",
                      self.id, ticket.attempt_id, result.dias_estimados, result.confianza);
                drop(session);
                self.dispatcher.notify_prediccion(&result);
                AttemptOutcome::Reconciled(result)
            }
            Err(e) => {
                warn!("attempt:failed orq_id={} attempt={} err={e}", self.id, ticket.attempt_id);
                let message = OrchestratorError::from(e).user_message();
                session.result.publish_error(message.clone());
                session.ledger.forget_signature(&ticket.signature);
                drop(session);
                self.dispatcher.notify_error(&message);
                AttemptOutcome::Failed(message)
            }
        }
    }

    /// Arma el temporizador para un intento en la generación actual.
    /// Se llama con el lock de sesión tomado.
    fn arm(self: &Arc<Self>, session: &Session) {
        if !self.config.auto_update {
            return;
        }
        let weak = Arc::downgrade(self);
        let generation = session.ledger.generation();
        debug!("schedule orq_id={} delay_ms={}", self.id, self.config.debounce_delay.as_millis());
        self.scheduler.schedule(self.config.debounce_delay, move || run_attempt(weak, generation));
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        self.lifetime.cancel();
        debug!("drop orq_id={}", self.id);
    }
}

/// Ciclo completo de un intento. No retiene el `Arc` mientras espera al
/// proveedor.
async fn run_attempt(weak: Weak<Shared>, generation: u64) -> AttemptOutcome {
    let (ticket, dispatcher) = {
        let Some(shared) = weak.upgrade() else { return AttemptOutcome::Discarded };
        match shared.prepare(generation) {
            Prepared::Ready(ticket) => (ticket, shared.dispatcher.clone()),
            Prepared::Done(outcome) => return outcome,
        }
    };

    let Some(response) = dispatcher.call(&ticket.request, &ticket.token).await else {
        return AttemptOutcome::Discarded;
    };

    match weak.upgrade() {
        Some(shared) => shared.reconcile(ticket, response),
        None => AttemptOutcome::Discarded,
    }
}

/// Orquestador de predicción para un formulario. Clonar comparte la misma
/// instancia; soltar el último clon la desmonta.
#[derive(Clone)]
pub struct PredictionOrchestrator {
    shared: Arc<Shared>,
}

impl PredictionOrchestrator {
    pub fn builder(provider: Arc<dyn PredictionProvider>) -> OrchestratorBuilder { OrchestratorBuilder::new(provider) }

    pub(crate) fn assemble(provider: Arc<dyn PredictionProvider>,
                           config: OrchestratorConfig,
                           callbacks: Callbacks,
                           runtime: Handle)
                           -> Self {
        let lifetime = CancellationToken::new();
        let id = Uuid::new_v4();
        debug!("assemble orq_id={id} profile={} provider={}", config.profile, provider.get_name());
        let session = Session { form: FormState::new(),
                                result: ResultState::default(),
                                ledger: DispatchLedger::new(&lifetime),
                                torn_down: false };
        let shared = Shared { id,
                              engine: config.profile.validation_engine(),
                              config,
                              dispatcher: PredictionDispatcher::new(provider, callbacks),
                              scheduler: DebounceScheduler::new(runtime.clone()),
                              session: Mutex::new(session),
                              lifetime,
                              runtime };
        Self { shared: Arc::new(shared) }
    }

    pub fn id(&self) -> Uuid { self.shared.id }

    pub fn config(&self) -> &OrchestratorConfig { &self.shared.config }

    pub fn validation_engine(&self) -> &ValidationEngine { &self.shared.engine }

    /// Fija un campo de primer nivel, limpia `error` y rearma el debounce.
    pub fn update_field(&self, field: FormField, value: impl Into<String>) {
        self.mutate(|form| form.update_field(field, value));
    }

    /// Igual que `update_field` pero direccionando el campo por nombre.
    pub fn update_field_by_name(&self, name: &str, value: impl Into<String>) -> Result<(), OrchestratorError> {
        let field: FormField = name.parse()?;
        self.update_field(field, value);
        Ok(())
    }

    /// `Temperatura` se fusiona con la existente; el resto se reemplaza.
    pub fn update_condiciones_climaticas(&self, update: ClimateUpdate) {
        self.mutate(|form| form.update_climate(update));
    }

    fn mutate(&self, apply: impl FnOnce(&mut FormState)) {
        let mut session = self.shared.lock();
        if session.torn_down {
            debug!("mutate:ignored orq_id={} torn_down", self.shared.id);
            return;
        }
        apply(&mut session.form);
        session.result.clear_error();
        self.shared.arm(&session);
    }

    /// Cancela el temporizador y lanza un intento ya. El handle devuelto
    /// resuelve al desenlace; se puede soltar sin esperarlo.
    pub fn force_update(&self) -> AttemptHandle {
        let attempt: BoxFuture<AttemptOutcome> = {
            let session = self.shared.lock();
            match self.shared.scheduler.flush_now() {
                Some(action) => {
                    debug!("force:flush orq_id={}", self.shared.id);
                    action()
                }
                None => {
                    debug!("force:fresh orq_id={}", self.shared.id);
                    Box::pin(run_attempt(Arc::downgrade(&self.shared), session.ledger.generation()))
                }
            }
        };
        AttemptHandle::new(self.shared.runtime.spawn(attempt))
    }

    /// Vuelve al estado inicial. Ni el temporizador pendiente ni una
    /// respuesta en vuelo pueden alterar el estado limpio.
    pub fn clear_form(&self) {
        let mut session = self.shared.lock();
        if session.torn_down {
            return;
        }
        self.shared.scheduler.cancel();
        session.ledger.reset();
        session.form.clear();
        session.result.reset();
        session.sync_loading();
        debug!("clear orq_id={} generation={}", self.shared.id, session.ledger.generation());
    }

    /// Desmonta la instancia: cancela temporizador y llamadas en vuelo. Tras
    /// volver, ningún resultado puede observarse ni mutar el estado.
    pub fn teardown(&self) {
        let mut session = self.shared.lock();
        if session.torn_down {
            return;
        }
        session.torn_down = true;
        self.shared.scheduler.cancel();
        session.ledger.reset();
        session.sync_loading();
        self.shared.lifetime.cancel();
        debug!("teardown orq_id={}", self.shared.id);
    }

    pub fn is_torn_down(&self) -> bool { self.shared.lock().torn_down }

    /// Calculado en cada llamada a partir del formulario actual.
    pub fn validation_state(&self) -> ValidationState {
        let form = self.form_data();
        self.shared.engine.validation_state(&form)
    }

    pub fn form_progress(&self) -> FormProgress { form_progress(&self.form_data()) }

    pub fn snapshot(&self) -> OrchestratorSnapshot {
        let session = self.shared.lock();
        OrchestratorSnapshot { form_data: session.form.snapshot().clone(),
                               prediccion: session.result.prediccion.clone(),
                               error: session.result.error.clone(),
                               loading: session.result.loading,
                               has_changes: session.form.has_changes(),
                               last_update: session.result.last_update }
    }

    pub fn form_data(&self) -> FormSnapshot { self.shared.lock().form.snapshot().clone() }

    pub fn prediccion(&self) -> Option<PredictionResult> { self.shared.lock().result.prediccion.clone() }

    pub fn error(&self) -> Option<String> { self.shared.lock().result.error.clone() }

    pub fn loading(&self) -> bool { self.shared.lock().result.loading }

    pub fn has_changes(&self) -> bool { self.shared.lock().form.has_changes() }

    pub fn last_update(&self) -> Option<DateTime<Utc>> { self.shared.lock().result.last_update }

    /// Hay un intento armado esperando al temporizador.
    pub fn is_scheduled(&self) -> bool { self.shared.scheduler.is_pending() }
}
