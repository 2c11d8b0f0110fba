//! Pure mapping from a normalized document to display units.

use crate::format::{
    format_date, normalize_link, safe_text, sort_by_year_desc, sort_conference, sort_news,
    NOT_PROVIDED,
};
use crate::model::document::{Document, Profile};
use crate::model::record::Record;
use crate::model::section::SectionKind;
use crate::render::layout::{layout_for, SectionLayout, SortOrder, TitleRule, UnitStyle};
use crate::schema::{DEFAULT_PHOTO, FALLBACK_NAME};

/// Profile links shown in the header, in display order.
const PROFILE_LINKS: [(&str, &str); 5] = [
    ("CV", "cv"),
    ("ORCID", "orcid"),
    ("LinkedIn", "linkedin"),
    ("Google Scholar", "scholar"),
    ("Homepage", "homepage"),
];

/// Whole public page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub profile: ProfileView,
    pub sections: Vec<SectionView>,
}

impl PageView {
    pub fn section(&self, kind: SectionKind) -> Option<&SectionView> {
        self.sections.iter().find(|section| section.kind == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub name: String,
    pub affiliation: String,
    pub intro: String,
    pub email: String,
    pub photo: String,
    /// Interest chips; a single placeholder chip when none are set.
    pub interests: Vec<String>,
    pub links: Vec<LinkView>,
}

/// One profile link; `href == None` renders as a disabled label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkView {
    pub label: &'static str,
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub kind: SectionKind,
    pub heading: &'static str,
    pub style: UnitStyle,
    pub units: Vec<DisplayUnit>,
    /// Shown instead of units when the section is empty.
    pub empty_text: &'static str,
}

/// `time` chip of a news unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateChip {
    pub label: String,
    /// Raw value for the `datetime` attribute; `None` when blank.
    pub datetime: Option<String>,
}

/// Self-contained display unit for one record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayUnit {
    pub id: Option<String>,
    pub title: String,
    pub date: Option<DateChip>,
    pub chips: Vec<String>,
    pub subtitle: Option<String>,
    pub note: Option<String>,
    pub citation: Option<String>,
    pub link: Option<String>,
    pub image: Option<String>,
}

/// Builds the full page view from a normalized document.
pub fn build_page(document: &Document) -> PageView {
    PageView {
        profile: build_profile(&document.profile),
        sections: SectionKind::ALL
            .into_iter()
            .map(|kind| build_section(layout_for(kind), document.section(kind)))
            .collect(),
    }
}

/// Builds the header view with per-field fallbacks.
pub fn build_profile(profile: &Profile) -> ProfileView {
    let text = |value: &Option<String>, fallback: &str| {
        safe_text(value.as_deref().unwrap_or(""), fallback)
    };

    let mut interests = profile
        .area_of_interest
        .iter()
        .map(|area| safe_text(area, NOT_PROVIDED))
        .collect::<Vec<_>>();
    if interests.is_empty() {
        interests.push("Area of Interest not set".to_string());
    }

    ProfileView {
        name: text(&profile.name, FALLBACK_NAME),
        affiliation: text(&profile.affiliation, "Affiliation TBD"),
        intro: text(&profile.intro, "Profile intro is empty."),
        email: text(&profile.email, "contact unavailable"),
        photo: text(&profile.photo, DEFAULT_PHOTO),
        interests,
        links: PROFILE_LINKS
            .iter()
            .map(|&(label, key)| {
                LinkView {
                    label,
                    href: link_href(profile.link(key)),
                }
            })
            .collect(),
    }
}

/// Generic section renderer: sorts, then maps each record through `layout`.
pub fn build_section(layout: &SectionLayout, records: &[Record]) -> SectionView {
    let ordered = match layout.sort {
        SortOrder::Stored => records.iter().collect(),
        SortOrder::YearDesc(key) => sort_by_year_desc(records, key),
        SortOrder::NewsDate => sort_news(records),
        SortOrder::Conference => sort_conference(records),
    };

    SectionView {
        kind: layout.kind,
        heading: layout.kind.heading(),
        style: layout.style,
        units: ordered
            .into_iter()
            .map(|record| build_unit(layout, record))
            .collect(),
        empty_text: layout.empty_text,
    }
}

fn build_unit(layout: &SectionLayout, record: &Record) -> DisplayUnit {
    let title = match layout.title {
        TitleRule::Field(key) => safe_text(&record.text(key), NOT_PROVIDED),
        TitleRule::Pair {
            first,
            separator,
            second,
        } => format!(
            "{}{}{}",
            safe_text(&record.text(first), NOT_PROVIDED),
            separator,
            safe_text(&record.text(second), NOT_PROVIDED)
        ),
    };

    let date = (layout.style == UnitStyle::News).then(|| {
        let raw = record.text("date");
        let datetime = (!raw.trim().is_empty()).then(|| raw.trim().to_string());
        DateChip {
            label: format_date(Some(raw.as_str())),
            datetime,
        }
    });

    let optional = |key: &str, fallback: &str| {
        let value = safe_text(&record.text(key), fallback);
        (!value.is_empty()).then_some(value)
    };

    DisplayUnit {
        id: record.id.clone(),
        title,
        date,
        chips: layout
            .meta_keys
            .iter()
            .filter_map(|key| optional(*key, ""))
            .collect(),
        subtitle: layout
            .subtitle
            .and_then(|rule| optional(rule.key, rule.fallback)),
        note: layout.note.and_then(|rule| optional(rule.key, rule.fallback)),
        citation: layout.citation.and_then(|rule| {
            let verbatim = record.text(rule.key);
            if !verbatim.trim().is_empty() {
                return Some(verbatim);
            }
            let joined = rule
                .fallback_keys
                .iter()
                .filter_map(|key| optional(*key, ""))
                .collect::<Vec<_>>()
                .join("\n");
            (!joined.is_empty()).then_some(joined)
        }),
        link: layout.link_key.and_then(|key| link_href(&record.text(key))),
        image: layout.image_key.and_then(|key| optional(key, "")),
    }
}

/// URL schemes an outbound link may carry; scheme-less values are relative.
const LINK_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Normalized `href`, or `None` when blank or using a scheme outside
/// [`LINK_SCHEMES`].
fn link_href(value: &str) -> Option<String> {
    let link = normalize_link(value);
    if link.is_empty() {
        return None;
    }
    let allowed = url_scheme(&link).map_or(true, |scheme| {
        LINK_SCHEMES
            .iter()
            .any(|allowed| scheme.eq_ignore_ascii_case(allowed))
    });
    allowed.then_some(link)
}

/// Scheme of an absolute URL: the text before the first `:` when no path,
/// query or fragment delimiter precedes it.
fn url_scheme(link: &str) -> Option<&str> {
    let end = link.find(':')?;
    let scheme = &link[..end];
    let valid = scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(scheme)
}

#[cfg(test)]
mod tests {
    use super::{build_page, build_profile, build_section, link_href};
    use crate::model::document::Profile;
    use crate::model::record::Record;
    use crate::model::section::SectionKind;
    use crate::render::layout::layout_for;
    use crate::schema::{fallback_document, DEFAULT_PHOTO, FALLBACK_NAME};
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        Record::from_object(value.as_object().cloned().unwrap())
    }

    #[test]
    fn empty_sections_keep_their_fallback_text() {
        let page = build_page(&fallback_document());
        let publications = page.section(SectionKind::Publications).unwrap();
        assert!(publications.units.is_empty());
        assert_eq!(publications.empty_text, "No publication entries yet.");
    }

    #[test]
    fn blank_profile_uses_display_fallbacks() {
        let view = build_profile(&Profile::default());
        assert_eq!(view.name, FALLBACK_NAME);
        assert_eq!(view.affiliation, "Affiliation TBD");
        assert_eq!(view.email, "contact unavailable");
        assert_eq!(view.photo, DEFAULT_PHOTO);
        assert_eq!(view.interests, ["Area of Interest not set"]);
        assert_eq!(view.links.len(), 5);
        assert!(view.links.iter().all(|link| link.href.is_none()));
    }

    #[test]
    fn profile_links_are_normalized() {
        let mut profile = Profile::default();
        profile
            .links
            .insert("homepage".to_string(), " www.example.com ".to_string());
        let view = build_profile(&profile);
        let homepage = view
            .links
            .iter()
            .find(|link| link.label == "Homepage")
            .unwrap();
        assert_eq!(homepage.href.as_deref(), Some("https://www.example.com"));
    }

    #[test]
    fn link_href_drops_script_schemes_and_keeps_relative_paths() {
        assert_eq!(link_href(" javascript:alert(1) "), None);
        assert_eq!(link_href("JavaScript:alert(1)"), None);
        assert_eq!(link_href("data:text/html,<b>x</b>"), None);
        assert_eq!(link_href("   "), None);
        assert_eq!(
            link_href("HTTPS://x.org/a:b").as_deref(),
            Some("HTTPS://x.org/a:b")
        );
        assert_eq!(link_href("mailto:a@b.com").as_deref(), Some("mailto:a@b.com"));
        assert_eq!(link_href("docs/cv.pdf").as_deref(), Some("docs/cv.pdf"));
        assert_eq!(
            link_href("files/a:b.pdf").as_deref(),
            Some("files/a:b.pdf")
        );
    }

    #[test]
    fn script_links_render_as_missing() {
        let mut profile = Profile::default();
        profile
            .links
            .insert("cv".to_string(), "javascript:alert(1)".to_string());
        let view = build_profile(&profile);
        assert!(view.links.iter().all(|link| link.href.is_none()));

        let records = vec![record(json!({"title": "Paper", "link": "javascript:void(0)"}))];
        let section = build_section(layout_for(SectionKind::Publications), &records);
        assert_eq!(section.units[0].link, None);
    }

    #[test]
    fn publication_citation_is_verbatim_when_present() {
        let records = vec![record(json!({
            "title": "Paper",
            "year": "2025",
            "citation": "A. Author\nVenue 2025",
            "authors": "ignored",
            "link": "www.doi.org/x",
            "image": " "
        }))];
        let section = build_section(layout_for(SectionKind::Publications), &records);
        let unit = &section.units[0];
        assert_eq!(unit.citation.as_deref(), Some("A. Author\nVenue 2025"));
        assert_eq!(unit.link.as_deref(), Some("https://www.doi.org/x"));
        assert_eq!(unit.chips, ["2025"]);
        assert_eq!(unit.image, None);
    }

    #[test]
    fn conference_citation_is_synthesized_from_fallback_fields() {
        let records = vec![record(json!({
            "title": "",
            "authors": "A. Author",
            "venue": "  ",
            "notes": "Best paper",
            "link": ""
        }))];
        let section = build_section(layout_for(SectionKind::ConferenceProceedings), &records);
        let unit = &section.units[0];
        assert_eq!(unit.title, "Not provided");
        assert_eq!(unit.citation.as_deref(), Some("A. Author\nBest paper"));
        assert_eq!(unit.link, None);
    }

    #[test]
    fn list_sections_compose_titles_and_optional_slots() {
        let records = vec![
            record(json!({"year": "2023", "title": "Award", "organization": ""})),
            record(json!({"year": "2025", "title": "", "details": "Top 1%"})),
        ];
        let section = build_section(layout_for(SectionKind::Honors), &records);
        assert_eq!(section.units[0].title, "2025 - Not provided");
        assert_eq!(section.units[0].note.as_deref(), Some("Top 1%"));
        assert_eq!(section.units[1].title, "2023 - Award");
        assert_eq!(section.units[1].subtitle, None);
    }

    #[test]
    fn news_units_carry_formatted_dates() {
        let records = vec![
            record(json!({"date": "", "title": "Undated"})),
            record(json!({"date": "2026-02-15", "title": "Launch", "body": ""})),
        ];
        let section = build_section(layout_for(SectionKind::News), &records);
        let first = &section.units[0];
        assert_eq!(first.title, "Launch");
        let chip = first.date.as_ref().unwrap();
        assert_eq!(chip.label, "Feb 15, 2026");
        assert_eq!(chip.datetime.as_deref(), Some("2026-02-15"));
        assert_eq!(first.note.as_deref(), Some("Not provided"));
        let undated = section.units[1].date.as_ref().unwrap();
        assert_eq!(undated.label, "Date TBD");
        assert_eq!(undated.datetime, None);
    }
}
