// orq-domain library entry point
pub mod climate;
pub mod error;
pub mod form;
pub mod payload;
pub mod prediction;

pub use climate::{ClimateDetail, ClimateUpdate, Estacion, Medida, Temperatura};
pub use error::DomainError;
pub use form::{is_filled, FormField, FormSnapshot};
pub use payload::{BasicFields, PredictionRequest};
pub use prediction::{PredictionResult, TipoPrediccion};
