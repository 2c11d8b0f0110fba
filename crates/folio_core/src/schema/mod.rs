//! Untyped JSON -> typed document boundary.
//!
//! # Responsibility
//! - Repair arbitrary JSON into a structurally complete `Document`
//!   (`normalize`, total).
//! - Check untrusted JSON without repairing it (`validate_shape`).
//! - Provide the typed parse-and-validate step used for cache reads and
//!   imports (`parse_document`).
//!
//! # Invariants
//! - `is_valid_shape(&normalize(x).to_value())` holds for every `x`.
//! - A candidate failing validation is discarded, never partially merged.

use crate::model::document::Document;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod fallback;
mod normalize;
mod validate;

pub use fallback::{fallback_document, DEFAULT_PHOTO, FALLBACK_NAME};
pub use normalize::normalize;
pub use validate::{is_valid_shape, validate_shape, ShapeViolation};

/// Typed failure of [`parse_document`].
#[derive(Debug)]
pub enum SchemaError {
    /// Input is not valid JSON.
    Json(serde_json::Error),
    /// Input is JSON but not a complete document.
    Shape(ShapeViolation),
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid JSON: {err}"),
            Self::Shape(violation) => write!(f, "invalid document shape: {violation}"),
        }
    }
}

impl Error for SchemaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Shape(violation) => Some(violation),
        }
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<ShapeViolation> for SchemaError {
    fn from(value: ShapeViolation) -> Self {
        Self::Shape(value)
    }
}

/// Parses `text`, requires a complete shape, and returns the normalized
/// document.
///
/// # Errors
/// - `SchemaError::Json` when `text` is not JSON.
/// - `SchemaError::Shape` when the JSON fails [`validate_shape`].
pub fn parse_document(text: &str) -> Result<Document, SchemaError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    validate_shape(&value)?;
    Ok(normalize(&value))
}

#[cfg(test)]
mod tests {
    use super::{parse_document, SchemaError, ShapeViolation};
    use crate::model::section::SectionKind;

    #[test]
    fn parse_document_reports_json_errors() {
        let err = parse_document("{\"profile\":").unwrap_err();
        assert!(matches!(err, SchemaError::Json(_)));
    }

    #[test]
    fn parse_document_reports_first_shape_violation() {
        let err = parse_document(r#"{"profile":{"links":{},"areaOfInterest":[]}}"#).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::Shape(ShapeViolation::SectionNotArray(SectionKind::News))
        ));
        assert!(err.to_string().contains("`news`"));
    }
}
