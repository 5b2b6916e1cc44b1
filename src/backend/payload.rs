//! Upload payload sent to the orchestrator webhook

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::constants::backend::UPLOAD_MODE;
use crate::error::{ReportError, Result};

/// JSON body carrying one seismic line to the orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadPayload {
    /// Base64 of the uploaded file, no data-URI prefix
    pub image: String,
    /// Original file name
    pub filename: String,
    /// Processing mode requested from the workflow
    pub mode: String,
}

impl UploadPayload {
    /// Build a payload from the raw uploaded bytes
    pub fn from_bytes(bytes: &[u8], filename: impl Into<String>) -> Self {
        Self {
            image: B64.encode(bytes),
            filename: filename.into(),
            mode: UPLOAD_MODE.to_string(),
        }
    }

    /// Serialize to the request body
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ReportError::BackendResponseError {
            message: "cannot serialize upload payload".into(),
            source: Some(e),
        })
    }

    /// Recover the uploaded bytes
    pub fn image_bytes(&self) -> Result<Vec<u8>> {
        B64.decode(self.image.as_bytes())
            .map_err(|e| ReportError::base64("image", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape() {
        let payload = UploadPayload::from_bytes(b"\x89PNG", "linea_01.png");
        let value: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();

        assert_eq!(value["image"], "iVBORw==");
        assert_eq!(value["filename"], "linea_01.png");
        assert_eq!(value["mode"], "standard");
        assert_eq!(value.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_image_bytes_recovered() {
        let payload = UploadPayload::from_bytes(&[1, 2, 3, 250], "x.jpg");
        assert_eq!(payload.image_bytes().unwrap(), vec![1, 2, 3, 250]);
    }
}
