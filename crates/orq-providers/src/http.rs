//! Cliente HTTP del servicio de predicción.
//!
//! POST JSON a `{base}/predicciones/inicial` y `{base}/predicciones/refinar`.
//! Errores de conexión o timeout se reportan como `Transport`; una respuesta
//! no 2xx como `Remote` con el mensaje que traiga el cuerpo.
use std::time::Duration;

use async_trait::async_trait;
use orq_core::{PredictionError, PredictionProvider};
use orq_domain::{BasicFields, FormSnapshot, PredictionResult};
use serde::Serialize;
use serde_json::Value;

pub const PATH_INICIAL: &str = "predicciones/inicial";
pub const PATH_REFINAR: &str = "predicciones/refinar";

/// Claves donde el servicio puede dejar su mensaje de error, por prioridad.
const MESSAGE_KEYS: [&str; 3] = ["message", "mensaje", "error"];

pub struct HttpPredictionProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPredictionProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, PredictionError> {
        let client = reqwest::Client::builder().timeout(timeout)
                                               .build()
                                               .map_err(|e| PredictionError::Transport(e.to_string()))?;
        Ok(Self { client, base_url: base_url.into() })
    }

    pub fn base_url(&self) -> &str { &self.base_url }

    pub fn endpoint(&self, path: &str) -> String { format!("{}/{}", self.base_url.trim_end_matches('/'), path) }

    async fn post<P: Serialize + Sync + ?Sized>(&self, path: &str, payload: &P) -> Result<PredictionResult, PredictionError> {
        let url = self.endpoint(path);
        log::debug!("http:post url={url}");
        let resp = self.client
                       .post(&url)
                       .json(payload)
                       .send()
                       .await
                       .map_err(|e| PredictionError::Transport(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| PredictionError::Transport(e.to_string()))?;
        if !(200..300).contains(&status) {
            log::warn!("http:rejected url={url} status={status}");
            return Err(error_from_body(&body));
        }
        serde_json::from_str(&body).map_err(|e| {
                                       log::warn!("http:unreadable url={url} err={e}");
                                       PredictionError::Unknown
                                   })
    }
}

/// Extrae el mensaje de un cuerpo de error. Sin JSON o sin mensaje utilizable
/// queda `Remote { message: None }`.
pub fn error_from_body(body: &str) -> PredictionError {
    let message = serde_json::from_str::<Value>(body).ok().and_then(|v| {
                                                              MESSAGE_KEYS.iter()
                                                                          .filter_map(|k| v.get(*k).and_then(Value::as_str))
                                                                          .map(str::trim)
                                                                          .find(|m| !m.is_empty())
                                                                          .map(str::to_string)
                                                          });
    PredictionError::Remote { message }
}

#[async_trait]
impl PredictionProvider for HttpPredictionProvider {
    fn get_name(&self) -> &str { "http" }

    async fn predict_initial(&self, payload: &BasicFields) -> Result<PredictionResult, PredictionError> {
        self.post(PATH_INICIAL, payload).await
    }

    async fn predict_refine(&self, payload: &FormSnapshot) -> Result<PredictionResult, PredictionError> {
        self.post(PATH_REFINAR, payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let p = HttpPredictionProvider::new("http://localhost:8000/api/", Duration::from_secs(5)).unwrap();
        assert_eq!(p.endpoint(PATH_INICIAL), "http://localhost:8000/api/predicciones/inicial");
        let p = HttpPredictionProvider::new("http://localhost:8000/api", Duration::from_secs(5)).unwrap();
        assert_eq!(p.endpoint(PATH_REFINAR), "http://localhost:8000/api/predicciones/refinar");
    }

    #[test]
    fn error_body_message_keys() {
        assert_eq!(error_from_body(r#"{"message":"Especie no soportada"}"#), PredictionError::remote("Especie no soportada"));
        assert_eq!(error_from_body(r#"{"mensaje":"Datos insuficientes"}"#), PredictionError::remote("Datos insuficientes"));
        assert_eq!(error_from_body(r#"{"error":"  ","mensaje":"otro"}"#), PredictionError::remote("otro"));
        assert_eq!(error_from_body(r#"{"detail":{"code":3}}"#), PredictionError::Remote { message: None });
        assert_eq!(error_from_body("<html>502</html>"), PredictionError::Remote { message: None });
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        let p = HttpPredictionProvider::new("http://127.0.0.1:1", Duration::from_millis(500)).unwrap();
        let basic = BasicFields { especie: "cattleya".into(), clima: String::new(), ubicacion: String::new() };
        assert!(matches!(p.predict_initial(&basic).await, Err(PredictionError::Transport(_))));
    }
}
