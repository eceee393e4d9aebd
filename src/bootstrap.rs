//! Ensamblado de un orquestador a partir de `AppConfig`.
use std::sync::Arc;

use orq_core::{OrchestratorBuilder, PredictionOrchestrator, PredictionProvider};
use orq_providers::{HttpPredictionProvider, MockPredictionProvider};

use crate::config::{AppConfig, PredictorConfig};
use crate::errors::CoreError;

/// Cliente HTTP si hay URL configurada; si no, el proveedor simulado.
pub fn build_provider(cfg: &PredictorConfig) -> Result<Arc<dyn PredictionProvider>, CoreError> {
    match &cfg.url {
        Some(url) => {
            log::info!("bootstrap:provider kind=http url={url} timeout_ms={}", cfg.timeout.as_millis());
            Ok(Arc::new(HttpPredictionProvider::new(url.clone(), cfg.timeout)?))
        }
        None => {
            log::info!("bootstrap:provider kind=mock");
            Ok(Arc::new(MockPredictionProvider::new()))
        }
    }
}

/// Builder con proveedor y configuración ya aplicados; el llamador puede
/// añadir callbacks antes de `build`.
pub fn orchestrator_builder(cfg: &AppConfig) -> Result<OrchestratorBuilder, CoreError> {
    let provider = build_provider(&cfg.predictor)?;
    Ok(PredictionOrchestrator::builder(provider).config(cfg.orchestrator.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn provider_kind_follows_url() {
        let mock = build_provider(&PredictorConfig::default()).unwrap();
        assert_eq!(mock.get_name(), "mock");
        let http = build_provider(&PredictorConfig { url: Some("http://localhost:8000".into()),
                                                     timeout: Duration::from_secs(1) }).unwrap();
        assert_eq!(http.get_name(), "http");
    }

    #[tokio::test]
    async fn builder_carries_the_configuration() {
        let cfg = AppConfig::from_lookup(|k| (k == "ORQ_DEBOUNCE_MS").then(|| "250".to_string())).unwrap();
        let orq = orchestrator_builder(&cfg).unwrap().build().unwrap();
        assert_eq!(orq.config().debounce_delay, Duration::from_millis(250));
    }
}
