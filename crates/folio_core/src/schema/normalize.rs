//! Total repair of arbitrary JSON into a structurally complete document.

use crate::model::document::{Document, Profile, ProfileLinks, PROFILE_KEY};
use crate::model::record::Record;
use crate::model::section::SectionKind;
use crate::schema::fallback::fallback_document;
use log::warn;
use serde_json::{Map, Value};

const PROFILE_TEXT_KEYS: [&str; 5] = ["name", "affiliation", "intro", "email", "photo"];

/// Repairs `candidate` into a [`Document`].
///
/// Non-object input yields the fallback document. Otherwise missing or
/// wrong-typed structural parts become empty objects/arrays, valid siblings
/// are kept, and keys this crate does not interpret survive in `extra`.
pub fn normalize(candidate: &Value) -> Document {
    let Some(root) = candidate.as_object() else {
        return fallback_document();
    };

    let profile = root
        .get(PROFILE_KEY)
        .and_then(Value::as_object)
        .map(normalize_profile)
        .unwrap_or_default();

    let mut document = Document::with_profile(profile);
    for kind in SectionKind::ALL {
        if let Some(Value::Array(items)) = root.get(kind.key()) {
            document.set_section(kind, normalize_records(kind, items));
        }
    }

    document.extra = root
        .iter()
        .filter(|(key, _)| key.as_str() != PROFILE_KEY && SectionKind::from_key(key).is_none())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    document
}

fn normalize_profile(raw: &Map<String, Value>) -> Profile {
    let mut extra = Map::new();
    for (key, value) in raw {
        let known = PROFILE_TEXT_KEYS.contains(&key.as_str())
            || key == "links"
            || key == "areaOfInterest";
        if !known {
            extra.insert(key.clone(), value.clone());
        }
    }

    let area_of_interest = match raw.get("areaOfInterest") {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        _ => Vec::new(),
    };

    let links = match raw.get("links") {
        Some(Value::Object(map)) => map
            .iter()
            .filter_map(|(name, value)| scalar_text(value).map(|url| (name.clone(), url)))
            .collect(),
        _ => ProfileLinks::new(),
    };

    Profile {
        name: raw.get("name").and_then(scalar_text),
        affiliation: raw.get("affiliation").and_then(scalar_text),
        intro: raw.get("intro").and_then(scalar_text),
        area_of_interest,
        email: raw.get("email").and_then(scalar_text),
        photo: raw.get("photo").and_then(scalar_text),
        links,
        extra,
    }
}

fn normalize_records(kind: SectionKind, items: &[Value]) -> Vec<Record> {
    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item {
            Value::Object(object) => records.push(Record::from_object(object.clone())),
            other => warn!(
                "event=normalize_drop module=schema status=warn section={} index={} value_kind={}",
                kind,
                index,
                value_kind(other)
            ),
        }
    }
    records
}

/// Text form of a JSON scalar; `None` for null, arrays and objects.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
