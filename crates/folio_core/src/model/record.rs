//! Section record model.
//!
//! # Responsibility
//! - Represent one entry of a section array (a publication, an honor, ...).
//! - Keep unknown fields intact so imports round-trip without loss.
//!
//! # Invariants
//! - `id` is opaque; once assigned it is never regenerated by edits.
//! - `fields` holds an `id` key only while `id` is `None` and the raw
//!   value was neither a string nor a number.

use crate::model::section::SectionKind;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Opaque record identifier, e.g. `publications-6f1c...`.
pub type RecordId = String;

const ID_KEY: &str = "id";

/// One record inside a section array.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Record {
    /// Absent for hand-written data files until the editor assigns one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Named field values. Values are usually strings but are kept verbatim.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// Creates an empty record for `section` with a fresh id and every
    /// declared field set to the empty string.
    pub fn blank(section: SectionKind) -> Self {
        let fields = section
            .fields()
            .iter()
            .map(|spec| (spec.key.to_string(), Value::String(String::new())))
            .collect();
        Self {
            id: Some(generate_record_id(section)),
            fields,
        }
    }

    /// Builds a record from a JSON object, lifting a string or numeric `id`.
    ///
    /// Any other `id` value stays in `fields` untouched.
    pub fn from_object(mut object: Map<String, Value>) -> Self {
        let id = match object.get(ID_KEY) {
            Some(Value::String(value)) => Some(value.clone()),
            Some(Value::Number(value)) => Some(value.to_string()),
            _ => None,
        };
        if id.is_some() {
            object.remove(ID_KEY);
        }
        Self { id, fields: object }
    }

    /// Returns the display text of one field.
    ///
    /// Strings are returned as-is, numbers and `true` as their literal text;
    /// missing, `null`, `false`, arrays and objects yield an empty string.
    pub fn text(&self, key: &str) -> String {
        match self.fields.get(key) {
            Some(Value::String(value)) => value.clone(),
            Some(Value::Number(value)) => value.to_string(),
            Some(Value::Bool(true)) => "true".to_string(),
            _ => String::new(),
        }
    }

    /// Returns whether the trimmed field text is non-empty.
    pub fn has_text(&self, key: &str) -> bool {
        !self.text(key).trim().is_empty()
    }

    /// Replaces one field with a string value.
    pub fn set_text(&mut self, key: &str, value: impl Into<String>) {
        self.fields
            .insert(key.to_string(), Value::String(value.into()));
    }

    /// Assigns an id only when none is present. Returns the effective id.
    ///
    /// An unusable raw `id` left in `fields` is dropped so the serialized
    /// object carries exactly one `id` key.
    pub fn ensure_id(&mut self, section: SectionKind) -> &str {
        if self.id.is_none() {
            self.fields.remove(ID_KEY);
        }
        self.id
            .get_or_insert_with(|| generate_record_id(section))
            .as_str()
    }
}

/// Generates a fresh record id namespaced by section key.
pub fn generate_record_id(section: SectionKind) -> RecordId {
    format!("{}-{}", section.key(), Uuid::new_v4().simple())
}
