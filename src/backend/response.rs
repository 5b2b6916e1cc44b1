//! Backend response interpretation
//!
//! Field names for the mask and the interpretation text changed across
//! backend iterations. Each logical value is looked up through an ordered
//! list of names from [`crate::constants::backend`]; the first present,
//! non-null entry wins.

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine as _;
use serde_json::{Map, Value};

use crate::constants::backend::{
    DEFAULT_INTERPRETATION, MASK_FIELDS, NESTED_TEXT_PATH, PDF_FIELDS, TEXT_FIELDS,
};
use crate::error::{ReportError, Result};

/// Parsed orchestrator response object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackendResponse {
    fields: Map<String, Value>,
}

impl BackendResponse {
    /// Parse a response body
    ///
    /// # Errors
    ///
    /// Returns `ReportError::BackendResponseError` if the body is not JSON
    /// or not a JSON object.
    pub fn from_json(body: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| ReportError::BackendResponseError {
                message: "response body is not valid JSON".into(),
                source: Some(e),
            })?;
        Self::from_value(value)
    }

    /// Wrap an already parsed JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(ReportError::BackendResponseError {
                message: format!("expected a JSON object, got {}", json_kind(&other)),
                source: None,
            }),
        }
    }

    /// First present, non-null field among `names`, with the name that matched
    fn first_present(&self, names: &[&'static str]) -> Option<(&'static str, &Value)> {
        names.iter().find_map(|&name| match self.fields.get(name) {
            Some(Value::Null) | None => None,
            Some(value) => Some((name, value)),
        })
    }

    fn nested(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.fields.get(*first)?;
        for key in rest {
            current = current.get(*key)?;
        }
        (!current.is_null()).then_some(current)
    }

    /// Decode the class mask payload, if the response carries one
    ///
    /// # Errors
    ///
    /// Returns an error if the field is not a string or not valid base64.
    pub fn decode_mask(&self) -> Result<Option<Vec<u8>>> {
        self.decode_binary(MASK_FIELDS)
    }

    /// Decode a backend-generated PDF, if the response carries one
    pub fn decode_pdf(&self) -> Result<Option<Vec<u8>>> {
        self.decode_binary(PDF_FIELDS)
    }

    fn decode_binary(&self, names: &[&'static str]) -> Result<Option<Vec<u8>>> {
        let Some((name, value)) = self.first_present(names) else {
            return Ok(None);
        };
        let encoded = value.as_str().ok_or_else(|| ReportError::BackendResponseError {
            message: format!("field '{}' is {}, expected a base64 string", name, json_kind(value)),
            source: None,
        })?;
        decode_base64_payload(name, encoded).map(Some)
    }

    /// Interpretation text, if any recognized field is present
    ///
    /// Non-string values are rendered as compact JSON.
    pub fn interpretation(&self) -> Option<String> {
        let value = self
            .first_present(TEXT_FIELDS)
            .map(|(_, value)| value)
            .or_else(|| self.nested(NESTED_TEXT_PATH))?;
        Some(match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
    }

    /// Interpretation text, or the fixed default when none is present
    pub fn interpretation_or_default(&self) -> String {
        self.interpretation()
            .unwrap_or_else(|| DEFAULT_INTERPRETATION.to_string())
    }
}

/// Drop an optional `data:<mime>;base64,` prefix
///
/// Splits on the first comma; strings without a comma are returned whole.
pub fn strip_data_uri(encoded: &str) -> &str {
    match encoded.split_once(',') {
        Some((_, payload)) => payload,
        None => encoded,
    }
}

/// Decode a base64 string that may carry a data-URI prefix
pub fn decode_base64_payload(field: &str, encoded: &str) -> Result<Vec<u8>> {
    let payload = strip_data_uri(encoded.trim());
    // Some senders wrap long payloads
    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    B64.decode(compact.as_bytes())
        .map_err(|e| ReportError::base64(field, e))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: Value) -> BackendResponse {
        BackendResponse::from_value(value).unwrap()
    }

    #[test]
    fn test_strip_data_uri() {
        assert_eq!(strip_data_uri("data:image/png;base64,AAAA"), "AAAA");
        assert_eq!(strip_data_uri("AAAA"), "AAAA");
        // only the first comma splits
        assert_eq!(strip_data_uri("a,b,c"), "b,c");
    }

    #[test]
    fn test_decode_base64_payload() {
        assert_eq!(
            decode_base64_payload("mask", "data:image/png;base64,AAAA").unwrap(),
            vec![0, 0, 0]
        );
        assert_eq!(decode_base64_payload("mask", "aGk=\n").unwrap(), b"hi".to_vec());

        let err = decode_base64_payload("mask", "***").unwrap_err();
        assert!(matches!(err, ReportError::Base64Error { ref field, .. } if field == "mask"));
    }

    #[test]
    fn test_mask_field_order() {
        let resp = response(json!({
            "image": "Ag==",
            "mask": "AQ==",
            "imagen_procesada": null,
        }));
        assert_eq!(resp.decode_mask().unwrap(), Some(vec![1]));

        let resp = response(json!({ "image": "Ag==", "imagen_procesada": "AA==" }));
        assert_eq!(resp.decode_mask().unwrap(), Some(vec![0]));
    }

    #[test]
    fn test_missing_mask_is_none() {
        let resp = response(json!({ "text": "hola" }));
        assert_eq!(resp.decode_mask().unwrap(), None);
    }

    #[test]
    fn test_non_string_mask_is_error() {
        let resp = response(json!({ "mask": 12 }));
        assert!(matches!(
            resp.decode_mask(),
            Err(ReportError::BackendResponseError { .. })
        ));
    }

    #[test]
    fn test_text_field_order() {
        let resp = response(json!({
            "text": "third",
            "technical_report": "second",
            "summary": { "text": "nested" },
        }));
        assert_eq!(resp.interpretation().as_deref(), Some("second"));

        let resp = response(json!({ "texto_analisis": "first", "text": "third" }));
        assert_eq!(resp.interpretation().as_deref(), Some("first"));

        let resp = response(json!({ "descripcion": "legacy" }));
        assert_eq!(resp.interpretation().as_deref(), Some("legacy"));
    }

    #[test]
    fn test_nested_summary_fallback() {
        let resp = response(json!({ "text": null, "summary": { "text": "nested" } }));
        assert_eq!(resp.interpretation().as_deref(), Some("nested"));

        let resp = response(json!({ "summary": { "text": null } }));
        assert_eq!(resp.interpretation(), None);
    }

    #[test]
    fn test_default_interpretation() {
        let resp = response(json!({ "mask": "data:image/png;base64,AAAA" }));
        assert_eq!(resp.interpretation_or_default(), DEFAULT_INTERPRETATION);
    }

    #[test]
    fn test_non_object_body_rejected() {
        assert!(BackendResponse::from_json("[1, 2]").is_err());
        assert!(BackendResponse::from_json("not json").is_err());
        assert!(BackendResponse::from_json("{}").is_ok());
    }

    #[test]
    fn test_backend_pdf_passthrough() {
        let resp = response(json!({ "pdf": "data:application/pdf;base64,JVBERg==" }));
        assert_eq!(resp.decode_pdf().unwrap(), Some(b"%PDF".to_vec()));
    }
}
