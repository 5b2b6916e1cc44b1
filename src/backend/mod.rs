//! Orchestrator contract helpers
//!
//! The segmentation backend is reached over HTTP by the embedding
//! application. This module builds the JSON body that application sends and
//! interprets the loosely specified JSON it gets back.

pub mod payload;
pub mod response;

pub use payload::UploadPayload;
pub use response::{decode_base64_payload, strip_data_uri, BackendResponse};
