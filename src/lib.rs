//! OrquiFlow Rust Library
//!
//! Fachada del workspace:
//! - `config` carga la configuración desde el entorno.
//! - `errors` define `CoreError` para los binarios.
//! - `logging` instala el subscriber de logs.
//! - `bootstrap` ensambla proveedor y orquestador desde la configuración.
//!
//! Reexporta los tipos de `orq-domain`, `orq-core` y `orq-providers` que usa
//! un consumidor típico.

pub mod bootstrap;
pub mod config;
pub mod errors;
pub mod logging;

pub use config::{AppConfig, PredictorConfig};
pub use errors::CoreError;
pub use orq_core::{AttemptHandle, AttemptOutcome, FormProgress, OrchestratorBuilder, OrchestratorConfig, OrchestratorError,
                   OrchestratorSnapshot, PredictionError, PredictionOrchestrator, PredictionProfile, PredictionProvider,
                   ValidationState};
pub use orq_domain::{ClimateDetail, ClimateUpdate, Estacion, FormField, FormSnapshot, Medida, PredictionResult, Temperatura,
                     TipoPrediccion};
pub use orq_providers::{HttpPredictionProvider, MockPredictionProvider};
