//! Error types for the seismic_report library

use thiserror::Error;

/// Result type alias for seismic_report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Error types for mask processing, backend decoding and report rendering
#[derive(Error, Debug)]
pub enum ReportError {
    /// Image file or buffer could not be loaded or decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The uploaded original image is unusable; no report can be built
    #[error("Original image is unusable")]
    OriginalImageError {
        #[source]
        source: Box<ReportError>,
    },

    /// Image could not be encoded to an output format
    #[error("Failed to encode image: {message}")]
    ImageEncodeError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Base64 payload could not be decoded
    #[error("Invalid base64 payload in field '{field}'")]
    Base64Error {
        field: String,
        #[source]
        source: base64::DecodeError,
    },

    /// Backend response was not a usable JSON object
    #[error("Backend response error: {message}")]
    BackendResponseError {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// PDF document could not be serialized
    #[error("PDF rendering error: {operation}: {message}")]
    PdfError { operation: String, message: String },

    /// Configuration could not be read, written or parsed
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },
}

impl ReportError {
    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Mark a failure to decode the uploaded original as fatal
    pub fn original_image(source: ReportError) -> Self {
        Self::OriginalImageError {
            source: Box::new(source),
        }
    }

    /// Create an image encode error with context
    pub fn image_encode<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageEncodeError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a base64 error for the named response field
    pub fn base64(field: impl Into<String>, source: base64::DecodeError) -> Self {
        Self::Base64Error {
            field: field.into(),
            source,
        }
    }

    /// Create a PDF error with context
    pub fn pdf(operation: impl Into<String>, source: impl std::fmt::Display) -> Self {
        Self::PdfError {
            operation: operation.into(),
            message: source.to_string(),
        }
    }

    /// Check if this error only degrades part of the output
    ///
    /// Mask, panel and logo failures are contained by the pipeline: the
    /// report is still produced without the affected piece. A failure on
    /// the uploaded original is reported as `OriginalImageError`, which is
    /// not recoverable.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ReportError::ImageLoadError { .. } | ReportError::Base64Error { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            ReportError::ImageLoadError { .. } => {
                "No se pudo cargar la imagen. Verifique el formato del archivo (PNG / JPG).".to_string()
            }
            ReportError::OriginalImageError { .. } => {
                "No se pudo leer la imagen subida. Verifique que sea una imagen válida.".to_string()
            }
            ReportError::Base64Error { field, .. } => {
                format!("El servidor envió datos inválidos en el campo '{}'.", field)
            }
            ReportError::BackendResponseError { .. } => {
                "El servidor respondió pero no envió un JSON válido.".to_string()
            }
            ReportError::PdfError { .. } => {
                "No se pudo generar el informe PDF.".to_string()
            }
            _ => "El procesamiento de la línea sísmica falló. Intente con otra imagen.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classification() {
        let err = ReportError::image_load("bad mask", std::io::Error::other("boom"));
        assert!(err.is_recoverable());

        let err = ReportError::ConfigError {
            message: "missing".into(),
        };
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_display_and_user_message() {
        let err = ReportError::InvalidParameter {
            parameter: "alpha".into(),
            value: "NaN".into(),
        };
        assert_eq!(err.to_string(), "Invalid parameter: alpha = NaN");
        assert!(!err.user_message().is_empty());

        let err = ReportError::BackendResponseError {
            message: "not an object".into(),
            source: None,
        };
        assert!(err.user_message().contains("JSON"));
    }

    #[test]
    fn test_original_image_failure_is_fatal() {
        let cause = ReportError::image_load("bad upload", std::io::Error::other("boom"));
        assert!(cause.is_recoverable());

        let err = ReportError::original_image(cause);
        assert!(!err.is_recoverable());
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.user_message().contains("imagen subida"));
    }

    #[test]
    fn test_pdf_error_keeps_cause_text() {
        let err = ReportError::pdf("write document", "disk full");
        assert_eq!(err.to_string(), "PDF rendering error: write document: disk full");
        assert!(!err.is_recoverable());
    }
}
