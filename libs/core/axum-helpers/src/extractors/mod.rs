//! Custom extractors for Axum handlers.
//!
//! Both reject with the standard error envelopes, so handlers only ever see
//! well-formed input.

pub mod id_path;
pub mod validated_json;

pub use id_path::{IdPath, parse_id};
pub use validated_json::ValidatedJson;
