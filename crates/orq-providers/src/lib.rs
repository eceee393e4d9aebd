//! Implementaciones de `PredictionProvider`.
pub mod http;
pub mod mock;

pub use http::HttpPredictionProvider;
pub use mock::{sample_result, MockPredictionProvider, RecordedCall};
