//! Per-section display configuration for the generic section renderer.

use crate::model::section::SectionKind;

/// Presentation order applied before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Keep the stored (editor) order.
    Stored,
    /// Newest first by the year found in the named field.
    YearDesc(&'static str),
    /// Newest first by the `date` field.
    NewsDate,
    /// Newest first by `year`, then `month`.
    Conference,
}

/// Markup family used for a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitStyle {
    /// Dated entries with a `time` element.
    News,
    /// Compact stacked list rows.
    List,
    /// Cards with meta chips, citation, image and link.
    Card,
}

/// A field rendered with a fallback; an empty fallback omits the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRule {
    pub key: &'static str,
    pub fallback: &'static str,
}

/// How the unit title is composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleRule {
    Field(&'static str),
    /// `first` + `separator` + `second`, each with the generic fallback.
    Pair {
        first: &'static str,
        separator: &'static str,
        second: &'static str,
    },
}

/// Free-form citation block: `key` verbatim, else the non-empty
/// `fallback_keys` joined by newlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CitationRule {
    pub key: &'static str,
    pub fallback_keys: &'static [&'static str],
}

/// Everything the generic renderer needs to know about one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionLayout {
    pub kind: SectionKind,
    pub sort: SortOrder,
    pub style: UnitStyle,
    pub title: TitleRule,
    pub subtitle: Option<TextRule>,
    pub meta_keys: &'static [&'static str],
    pub note: Option<TextRule>,
    pub citation: Option<CitationRule>,
    pub link_key: Option<&'static str>,
    pub image_key: Option<&'static str>,
    pub empty_text: &'static str,
}

const fn rule(key: &'static str, fallback: &'static str) -> Option<TextRule> {
    Some(TextRule { key, fallback })
}

const fn pair(first: &'static str, second: &'static str, separator: &'static str) -> TitleRule {
    TitleRule::Pair {
        first,
        separator,
        second,
    }
}

const BASE: SectionLayout = SectionLayout {
    kind: SectionKind::News,
    sort: SortOrder::Stored,
    style: UnitStyle::List,
    title: TitleRule::Field("title"),
    subtitle: None,
    meta_keys: &[],
    note: None,
    citation: None,
    link_key: None,
    image_key: None,
    empty_text: "",
};

const LAYOUTS: [SectionLayout; 11] = [
    SectionLayout {
        kind: SectionKind::News,
        sort: SortOrder::NewsDate,
        style: UnitStyle::News,
        note: rule("body", crate::format::NOT_PROVIDED),
        empty_text: "No news entries yet.",
        ..BASE
    },
    SectionLayout {
        kind: SectionKind::Education,
        sort: SortOrder::YearDesc("period"),
        title: pair("degree", "period", " / "),
        subtitle: rule("institution", crate::format::NOT_PROVIDED),
        note: rule("notes", ""),
        empty_text: "No education entries yet.",
        ..BASE
    },
    SectionLayout {
        kind: SectionKind::Publications,
        sort: SortOrder::YearDesc("year"),
        style: UnitStyle::Card,
        meta_keys: &["year"],
        citation: Some(CitationRule {
            key: "citation",
            fallback_keys: &["authors", "venue", "details"],
        }),
        link_key: Some("link"),
        image_key: Some("image"),
        empty_text: "No publication entries yet.",
        ..BASE
    },
    SectionLayout {
        kind: SectionKind::ConferenceProceedings,
        sort: SortOrder::Conference,
        style: UnitStyle::Card,
        meta_keys: &["month", "year"],
        citation: Some(CitationRule {
            key: "citation",
            fallback_keys: &["authors", "venue", "notes"],
        }),
        link_key: Some("link"),
        image_key: Some("image"),
        empty_text: "No conference entries yet.",
        ..BASE
    },
    SectionLayout {
        kind: SectionKind::Honors,
        sort: SortOrder::YearDesc("year"),
        title: pair("year", "title", " - "),
        subtitle: rule("organization", ""),
        note: rule("details", ""),
        empty_text: "No honors entries yet.",
        ..BASE
    },
    SectionLayout {
        kind: SectionKind::Grants,
        sort: SortOrder::YearDesc("period"),
        style: UnitStyle::Card,
        meta_keys: &["period", "organization"],
        note: rule("details", ""),
        empty_text: "No grant entries yet.",
        ..BASE
    },
    SectionLayout {
        kind: SectionKind::Projects,
        sort: SortOrder::YearDesc("period"),
        style: UnitStyle::Card,
        meta_keys: &["period", "organization", "role"],
        note: rule("details", ""),
        empty_text: "No project entries yet.",
        ..BASE
    },
    SectionLayout {
        kind: SectionKind::Experiences,
        sort: SortOrder::YearDesc("period"),
        title: pair("period", "role", " - "),
        subtitle: rule("organization", crate::format::NOT_PROVIDED),
        note: rule("details", ""),
        empty_text: "No experience entries yet.",
        ..BASE
    },
    SectionLayout {
        kind: SectionKind::Services,
        title: TitleRule::Field("category"),
        subtitle: rule("details", crate::format::NOT_PROVIDED),
        empty_text: "No academic service entries yet.",
        ..BASE
    },
    SectionLayout {
        kind: SectionKind::Mentorships,
        sort: SortOrder::YearDesc("period"),
        title: pair("period", "name", " - "),
        subtitle: rule("level", ""),
        note: rule("details", ""),
        empty_text: "No mentoring entries yet.",
        ..BASE
    },
    SectionLayout {
        kind: SectionKind::Skills,
        title: TitleRule::Field("category"),
        subtitle: rule("details", crate::format::NOT_PROVIDED),
        empty_text: "No skill entries yet.",
        ..BASE
    },
];

/// Layout for `kind`.
pub fn layout_for(kind: SectionKind) -> &'static SectionLayout {
    LAYOUTS
        .iter()
        .find(|layout| layout.kind == kind)
        .unwrap_or(&LAYOUTS[0])
}

#[cfg(test)]
mod tests {
    use super::layout_for;
    use crate::model::section::SectionKind;

    #[test]
    fn every_section_has_its_own_layout() {
        for kind in SectionKind::ALL {
            let layout = layout_for(kind);
            assert_eq!(layout.kind, kind);
            assert!(layout.empty_text.starts_with("No "));
        }
    }
}
