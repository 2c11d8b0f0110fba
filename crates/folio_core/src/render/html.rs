//! HTML output for the public page.

use crate::render::layout::UnitStyle;
use crate::render::view::{DisplayUnit, PageView, ProfileView, SectionView};
use crate::schema::DEFAULT_PHOTO;
use maud::{html, Markup, DOCTYPE};

const STYLESHEET: &str = "assets/style.css";
const RECORD_IMAGE_ONERROR: &str = "this.remove()";

/// Renders the complete public page.
pub fn render_page(page: &PageView) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (page.profile.name) }
                link rel="stylesheet" href=(STYLESHEET);
            }
            body {
                (render_profile(&page.profile))
                main {
                    @for section in &page.sections {
                        (render_section(section))
                    }
                }
            }
        }
    }
}

fn render_profile(profile: &ProfileView) -> Markup {
    let photo_onerror = format!("this.onerror=null;this.src='{DEFAULT_PHOTO}'");
    html! {
        header.profile {
            img #"profile-photo" src=(profile.photo) alt=(profile.name) onerror=(photo_onerror);
            h1 #"profile-name" { (profile.name) }
            p #"profile-affiliation" { (profile.affiliation) }
            p #"profile-intro" { (profile.intro) }
            a #"profile-email" href={ "mailto:" (profile.email) } { (profile.email) }
            div #"area-list" {
                @for interest in &profile.interests {
                    span.chip { (interest) }
                }
            }
            nav #"profile-links" {
                @for link in &profile.links {
                    @if let Some(href) = &link.href {
                        a.social-link href=(href) target="_blank" rel="noreferrer" { (link.label) }
                    } @else {
                        span.social-link.disabled { (link.label) }
                    }
                }
            }
        }
    }
}

fn render_section(section: &SectionView) -> Markup {
    let list_id = format!("{}-list", section.kind.key());
    html! {
        section.portfolio-section data-section=(section.kind.key()) {
            h2 { (section.heading) }
            @if section.units.is_empty() {
                p.fallback { (section.empty_text) }
            } @else {
                @match section.style {
                    UnitStyle::List => {
                        ul.stack id=(list_id) {
                            @for unit in &section.units {
                                (render_list_unit(unit))
                            }
                        }
                    }
                    UnitStyle::News | UnitStyle::Card => {
                        div id=(list_id) {
                            @for unit in &section.units {
                                (render_card_unit(section.style, unit))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_list_unit(unit: &DisplayUnit) -> Markup {
    html! {
        li data-id=[unit.id.as_deref()] {
            span.stack-title { (unit.title) }
            @if let Some(subtitle) = &unit.subtitle {
                span.stack-sub { (subtitle) }
            }
            @if let Some(note) = &unit.note {
                span.stack-note { (note) }
            }
        }
    }
}

fn render_card_unit(style: UnitStyle, unit: &DisplayUnit) -> Markup {
    let class = if style == UnitStyle::News {
        "news-item"
    } else {
        "card-item"
    };
    html! {
        article class=(class) data-id=[unit.id.as_deref()] {
            @if let Some(date) = &unit.date {
                time datetime=[date.datetime.as_deref()] { (date.label) }
            }
            @if let Some(image) = &unit.image {
                img.card-image src=(image) alt=(unit.title) loading="lazy" onerror=(RECORD_IMAGE_ONERROR);
            }
            h3 { (unit.title) }
            @for chip in &unit.chips {
                span.card-meta { (chip) }
            }
            @if let Some(subtitle) = &unit.subtitle {
                p.card-meta { (subtitle) }
            }
            @if let Some(citation) = &unit.citation {
                p.citation {
                    @for (index, line) in citation.lines().enumerate() {
                        @if index > 0 {
                            br;
                        }
                        (line)
                    }
                }
            }
            @if let Some(note) = &unit.note {
                p { (note) }
            }
            @if let Some(link) = &unit.link {
                a.card-link href=(link) target="_blank" rel="noreferrer" { "View" }
            }
        }
    }
}
