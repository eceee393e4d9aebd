//! Contrato con el servicio remoto de predicción.
//!
//! Dos operaciones estructuralmente uniformes: la inicial recibe sólo los
//! campos básicos y la refinada el registro completo. Ambas fallan con un
//! `PredictionError`; el orquestador no interpreta más que "tiene mensaje o
//! no".
use async_trait::async_trait;
use orq_domain::{BasicFields, FormSnapshot, PredictionRequest, PredictionResult};

use crate::errors::PredictionError;

#[async_trait]
pub trait PredictionProvider: Send + Sync {
    fn get_name(&self) -> &str;

    async fn predict_initial(&self, payload: &BasicFields) -> Result<PredictionResult, PredictionError>;

    async fn predict_refine(&self, payload: &FormSnapshot) -> Result<PredictionResult, PredictionError>;

    /// Despacha a la operación que corresponde a la petición.
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, PredictionError> {
        match request {
            PredictionRequest::Inicial(basic) => self.predict_initial(basic).await,
            PredictionRequest::Refinada(form) => self.predict_refine(form).await,
        }
    }
}
