//! orq-core: orquestador de predicciones con debounce, validación e
//! idempotencia.
pub mod constants;
pub mod dispatch;
pub mod errors;
pub mod form;
pub mod hashing;
pub mod orchestrator;
pub mod progress;
pub mod provider;
pub mod result;
pub mod scheduler;
pub mod validation;

pub use dispatch::{AttemptHandle, AttemptOutcome, Callbacks, DispatchLedger, PredictionDispatcher};
pub use errors::{OrchestratorError, PredictionError};
pub use form::FormState;
pub use hashing::RequestSignature;
pub use orchestrator::{OrchestratorBuilder, OrchestratorConfig, OrchestratorSnapshot, PredictionOrchestrator,
                       PredictionProfile};
pub use progress::{form_progress, FormProgress};
pub use provider::PredictionProvider;
pub use result::ResultState;
pub use scheduler::DebounceScheduler;
pub use validation::{ValidationEngine, ValidationState, ValidationVerdict};
