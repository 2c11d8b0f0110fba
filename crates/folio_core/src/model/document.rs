//! Portfolio document and profile models.
//!
//! # Responsibility
//! - Define the typed, structurally complete portfolio document.
//! - Serialize back to the external JSON schema (camelCase keys).
//!
//! # Invariants
//! - Every `SectionKind` has an entry in `sections`, possibly empty.
//! - `extra` never shadows `profile` or a section key on serialization.
//!
//! # See also
//! - crate::schema for the untyped -> typed repair step.

use crate::model::record::Record;
use crate::model::section::SectionKind;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Key of the profile object inside the document root.
pub const PROFILE_KEY: &str = "profile";

/// Named outbound profile links (`cv`, `orcid`, `linkedin`, `scholar`,
/// `homepage`, or anything else the author adds).
pub type ProfileLinks = BTreeMap<String, String>;

/// Author profile shown in the page header.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    pub area_of_interest: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub links: ProfileLinks,
    /// Profile keys this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Profile {
    /// Returns one link by name, or an empty string.
    pub fn link(&self, name: &str) -> &str {
        self.links.get(name).map(String::as_str).unwrap_or("")
    }
}

/// Structurally complete portfolio document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub profile: Profile,
    sections: BTreeMap<SectionKind, Vec<Record>>,
    /// Root keys this crate does not interpret.
    pub extra: Map<String, Value>,
}

impl Document {
    /// Creates a document with the given profile and every section empty.
    pub fn with_profile(profile: Profile) -> Self {
        Self {
            profile,
            sections: SectionKind::ALL
                .into_iter()
                .map(|kind| (kind, Vec::new()))
                .collect(),
            extra: Map::new(),
        }
    }

    /// Records of one section in stored order.
    pub fn section(&self, kind: SectionKind) -> &[Record] {
        self.sections.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Mutable access to one section array.
    pub fn section_mut(&mut self, kind: SectionKind) -> &mut Vec<Record> {
        self.sections.entry(kind).or_default()
    }

    /// Replaces one section array.
    pub fn set_section(&mut self, kind: SectionKind, records: Vec<Record>) {
        self.sections.insert(kind, records);
    }

    /// Total number of records across all sections.
    pub fn record_count(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    /// Converts to the external JSON shape.
    pub fn to_value(&self) -> Value {
        // Serializing plain maps and strings into `Value` cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Serializes to compact JSON, the cache entry format.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serializes to indented JSON, the export file format.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = self
            .extra
            .iter()
            .filter(|(key, _)| key.as_str() != PROFILE_KEY && SectionKind::from_key(key).is_none())
            .collect::<Vec<_>>();

        let mut map = serializer.serialize_map(Some(1 + SectionKind::ALL.len() + extra.len()))?;
        map.serialize_entry(PROFILE_KEY, &self.profile)?;
        for kind in SectionKind::ALL {
            map.serialize_entry(kind.key(), self.section(kind))?;
        }
        for (key, value) in extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
