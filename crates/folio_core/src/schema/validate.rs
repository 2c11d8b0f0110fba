//! Non-repairing structural check for untrusted documents.

use crate::model::document::PROFILE_KEY;
use crate::model::section::SectionKind;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// First structural check an untrusted candidate failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeViolation {
    NotAnObject,
    MissingProfile,
    MissingLinks,
    AreaOfInterestNotArray,
    SectionNotArray(SectionKind),
}

impl Display for ShapeViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "document root is not an object"),
            Self::MissingProfile => write!(f, "`profile` is missing or not an object"),
            Self::MissingLinks => write!(f, "`profile.links` is missing or not an object"),
            Self::AreaOfInterestNotArray => {
                write!(f, "`profile.areaOfInterest` is missing or not an array")
            }
            Self::SectionNotArray(kind) => write!(f, "`{kind}` is missing or not an array"),
        }
    }
}

impl Error for ShapeViolation {}

/// Checks that `candidate` is a structurally complete document.
///
/// # Errors
/// - Returns the first failing check in root -> profile -> sections order.
pub fn validate_shape(candidate: &Value) -> Result<(), ShapeViolation> {
    let root = candidate.as_object().ok_or(ShapeViolation::NotAnObject)?;
    let profile = root
        .get(PROFILE_KEY)
        .and_then(Value::as_object)
        .ok_or(ShapeViolation::MissingProfile)?;
    if !profile.get("links").is_some_and(Value::is_object) {
        return Err(ShapeViolation::MissingLinks);
    }
    if !profile.get("areaOfInterest").is_some_and(Value::is_array) {
        return Err(ShapeViolation::AreaOfInterestNotArray);
    }
    for kind in SectionKind::ALL {
        if !root.get(kind.key()).is_some_and(Value::is_array) {
            return Err(ShapeViolation::SectionNotArray(kind));
        }
    }
    Ok(())
}

/// Boolean form of [`validate_shape`].
pub fn is_valid_shape(candidate: &Value) -> bool {
    validate_shape(candidate).is_ok()
}
