//! Builder para `PredictionOrchestrator`.
//!
//! El proveedor es obligatorio y se entrega al crear el builder; el resto
//! (perfil, retraso, auto-update, callbacks, runtime) tiene valores por
//! defecto. `build` captura el runtime de tokio actual si no se indicó uno.
//!
//! ```ignore
//! let orq = PredictionOrchestrator::builder(provider)
//!     .profile(PredictionProfile::Germinacion)
//!     .on_error(|msg| eprintln!("{msg}"))
//!     .build()?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use orq_domain::PredictionResult;
use tokio::runtime::Handle;

use crate::dispatch::Callbacks;
use crate::errors::OrchestratorError;
use crate::orchestrator::config::{OrchestratorConfig, PredictionProfile};
use crate::orchestrator::PredictionOrchestrator;
use crate::provider::PredictionProvider;

pub struct OrchestratorBuilder {
    provider: Arc<dyn PredictionProvider>,
    config: OrchestratorConfig,
    /// Retraso explícito; prevalece sobre el del perfil aunque el perfil se
    /// fije después.
    debounce: Option<Duration>,
    callbacks: Callbacks,
    runtime: Option<Handle>,
}

impl OrchestratorBuilder {
    pub fn new(provider: Arc<dyn PredictionProvider>) -> Self {
        Self { provider,
               config: OrchestratorConfig::default(),
               debounce: None,
               callbacks: Callbacks::default(),
               runtime: None }
    }

    /// Reemplaza la configuración completa.
    pub fn config(mut self, config: OrchestratorConfig) -> Self {
        self.debounce = Some(config.debounce_delay);
        self.config = config;
        self
    }

    /// Cambia el perfil y, salvo retraso explícito, su debounce por defecto.
    pub fn profile(mut self, profile: PredictionProfile) -> Self {
        self.config = OrchestratorConfig::for_profile(profile).with_auto_update(self.config.auto_update);
        self
    }

    pub fn debounce(mut self, delay: Duration) -> Self {
        self.debounce = Some(delay);
        self
    }

    pub fn auto_update(mut self, enabled: bool) -> Self {
        self.config.auto_update = enabled;
        self
    }

    pub fn on_prediccion_update<F>(mut self, f: F) -> Self
        where F: Fn(&PredictionResult) + Send + Sync + 'static
    {
        self.callbacks.on_prediccion_update = Some(Arc::new(f));
        self
    }

    pub fn on_error<F>(mut self, f: F) -> Self
        where F: Fn(&str) + Send + Sync + 'static
    {
        self.callbacks.on_error = Some(Arc::new(f));
        self
    }

    /// Runtime donde corren temporizadores y llamadas remotas.
    pub fn runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    pub fn build(self) -> Result<PredictionOrchestrator, OrchestratorError> {
        let runtime = match self.runtime {
            Some(h) => h,
            None => Handle::try_current().map_err(|_| OrchestratorError::NoRuntime)?,
        };
        let mut config = self.config;
        if let Some(delay) = self.debounce {
            config.debounce_delay = delay;
        }
        Ok(PredictionOrchestrator::assemble(self.provider, config, self.callbacks, runtime))
    }
}
