//! Canonical portfolio sections and their editor field tables.
//!
//! # Responsibility
//! - Enumerate every recognized section array of a portfolio document.
//! - Describe the editable fields of each section (label, required flag,
//!   input kind, placeholder).
//!
//! # Invariants
//! - `SectionKind::ALL` order is the document/presentation order.
//! - `key()` values match the JSON wire keys exactly.
//! - Required flags are an editor-level hint only; data is never rejected
//!   for missing required fields.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One recognized section array of a portfolio document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    News,
    Education,
    Publications,
    ConferenceProceedings,
    Honors,
    Grants,
    Projects,
    Experiences,
    Services,
    Mentorships,
    Skills,
}

/// Input widget hint for one editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput {
    /// Single-line text input.
    Text,
    /// Multi-line text area.
    TextArea,
}

/// Declarative description of one editable record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// JSON key inside the record object.
    pub key: &'static str,
    pub label: &'static str,
    /// Enforced by editor UIs only.
    pub required: bool,
    pub input: FieldInput,
    pub placeholder: &'static str,
}

const fn text(
    key: &'static str,
    label: &'static str,
    required: bool,
    placeholder: &'static str,
) -> FieldSpec {
    FieldSpec {
        key,
        label,
        required,
        input: FieldInput::Text,
        placeholder,
    }
}

const fn area(
    key: &'static str,
    label: &'static str,
    required: bool,
    placeholder: &'static str,
) -> FieldSpec {
    FieldSpec {
        key,
        label,
        required,
        input: FieldInput::TextArea,
        placeholder,
    }
}

const NEWS_FIELDS: &[FieldSpec] = &[
    text("date", "Date", true, "2026-02-15"),
    text("title", "Title", true, "News title"),
    area("body", "Body", true, "News summary"),
];

const EDUCATION_FIELDS: &[FieldSpec] = &[
    text("period", "Period", true, "Mar.2023 -"),
    text("degree", "Degree", true, "Ph.D. Candidate"),
    text("institution", "Institution", true, "KAIST"),
    area("notes", "Notes", false, "Advisor, lab, location"),
];

const PUBLICATION_FIELDS: &[FieldSpec] = &[
    text("year", "Year", true, "2026"),
    text("title", "Title", true, "Paper title"),
    text(
        "image",
        "Highlight Image URL/Path",
        false,
        "assets/pub1.jpg or https://...",
    ),
    area(
        "citation",
        "Citation (free layout)",
        false,
        "Optional custom citation text. Line breaks are supported.",
    ),
    text("authors", "Authors", true, "Author list"),
    text("venue", "Venue", true, "Journal / conference"),
    area("details", "Details", false, "Pages / notes"),
    text("link", "Link", false, "https://..."),
];

const CONFERENCE_FIELDS: &[FieldSpec] = &[
    text("year", "Year", false, "2026"),
    text("month", "Month", false, "Jan"),
    text("title", "Title", true, "Talk title"),
    text(
        "image",
        "Image URL/Path",
        false,
        "assets/conf1.jpg or https://...",
    ),
    area(
        "citation",
        "Citation (free layout)",
        false,
        "Optional custom citation text. Line breaks are supported.",
    ),
    text("authors", "Authors", true, "Author list"),
    text("venue", "Venue", true, "Conference name"),
    area("notes", "Notes", false, "Award / remarks"),
    text("link", "Link", false, "https://..."),
];

const HONOR_FIELDS: &[FieldSpec] = &[
    text("year", "Year", true, "2025"),
    text("title", "Title", true, "Award title"),
    text("organization", "Organization", false, "KAIST"),
    area("details", "Details", false, "Additional notes"),
];

const GRANT_FIELDS: &[FieldSpec] = &[
    text("period", "Period", true, "2024 - 2026"),
    text("title", "Title", true, "Grant title"),
    text("organization", "Organization", false, "Funding agency"),
    area("details", "Details", false, "Role / amount"),
];

const PROJECT_FIELDS: &[FieldSpec] = &[
    text("period", "Period", true, "2024 - 2025"),
    text("title", "Title", true, "Project title"),
    text("organization", "Organization", false, "Lab / company"),
    text("role", "Role", false, "Lead researcher"),
    area("details", "Details", false, "Summary"),
];

const EXPERIENCE_FIELDS: &[FieldSpec] = &[
    text("period", "Period", true, "Jun.2022 - Aug.2022"),
    text("role", "Role", true, "Research intern"),
    text("organization", "Organization", true, "Company / lab"),
    area("details", "Details", false, "Responsibilities"),
];

const SERVICE_FIELDS: &[FieldSpec] = &[
    text("category", "Category", true, "Reviewer"),
    area("details", "Details", true, "CHI 2025, UIST 2024"),
];

const MENTORSHIP_FIELDS: &[FieldSpec] = &[
    text("period", "Period", true, "2024"),
    text("name", "Name", true, "Mentee name"),
    text("level", "Level", false, "Undergraduate"),
    area("details", "Details", false, "Topic / outcome"),
];

const SKILL_FIELDS: &[FieldSpec] = &[
    text("category", "Category", true, "Programming"),
    area("details", "Details", true, "Unity, Python, C#"),
];

impl SectionKind {
    /// Every recognized section in document order.
    pub const ALL: [SectionKind; 11] = [
        SectionKind::News,
        SectionKind::Education,
        SectionKind::Publications,
        SectionKind::ConferenceProceedings,
        SectionKind::Honors,
        SectionKind::Grants,
        SectionKind::Projects,
        SectionKind::Experiences,
        SectionKind::Services,
        SectionKind::Mentorships,
        SectionKind::Skills,
    ];

    /// JSON key of this section inside the document root.
    pub fn key(self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Education => "education",
            Self::Publications => "publications",
            Self::ConferenceProceedings => "conferenceProceedings",
            Self::Honors => "honors",
            Self::Grants => "grants",
            Self::Projects => "projects",
            Self::Experiences => "experiences",
            Self::Services => "services",
            Self::Mentorships => "mentorships",
            Self::Skills => "skills",
        }
    }

    /// Human-readable heading.
    pub fn heading(self) -> &'static str {
        match self {
            Self::News => "News",
            Self::Education => "Education",
            Self::Publications => "Publications",
            Self::ConferenceProceedings => "Conference Proceedings",
            Self::Honors => "Honors & Awards",
            Self::Grants => "Grants",
            Self::Projects => "Projects",
            Self::Experiences => "Experience",
            Self::Services => "Academic Service",
            Self::Mentorships => "Mentoring",
            Self::Skills => "Skills",
        }
    }

    /// Editable fields in form order.
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            Self::News => NEWS_FIELDS,
            Self::Education => EDUCATION_FIELDS,
            Self::Publications => PUBLICATION_FIELDS,
            Self::ConferenceProceedings => CONFERENCE_FIELDS,
            Self::Honors => HONOR_FIELDS,
            Self::Grants => GRANT_FIELDS,
            Self::Projects => PROJECT_FIELDS,
            Self::Experiences => EXPERIENCE_FIELDS,
            Self::Services => SERVICE_FIELDS,
            Self::Mentorships => MENTORSHIP_FIELDS,
            Self::Skills => SKILL_FIELDS,
        }
    }

    /// Looks up one field spec by JSON key.
    pub fn field(self, key: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|spec| spec.key == key)
    }

    /// Resolves a section from its JSON key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl Display for SectionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when a string names no known section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSection(pub String);

impl Display for UnknownSection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown section `{}`", self.0)
    }
}

impl std::error::Error for UnknownSection {}

impl FromStr for SectionKind {
    type Err = UnknownSection;

    /// Accepts the JSON key (`conferenceProceedings`) case-insensitively,
    /// plus the kebab/snake spellings used on command lines.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        Self::ALL
            .into_iter()
            .find(|kind| kind.key().to_ascii_lowercase() == folded)
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}
