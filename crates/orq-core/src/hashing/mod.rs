//! Canonicalización JSON y firma blake3 de peticiones.

pub mod canonical_json;
pub mod signature;

pub use canonical_json::to_canonical_json;
pub use signature::RequestSignature;
