//! Public page rendering.
//!
//! # Responsibility
//! - Map a normalized document into per-section display units through one
//!   generic, layout-driven section renderer (`view`).
//! - Turn the view into escaped HTML (`html`).
//!
//! # Invariants
//! - Rendering is pure; only `write_page` touches the filesystem.
//! - Every blank text slot shows a fallback or is omitted, never empty markup.

use crate::model::document::Document;
use log::info;
use std::path::Path;

pub mod html;
pub mod layout;
pub mod view;

pub use html::render_page;
pub use layout::{layout_for, SectionLayout, SortOrder, UnitStyle};
pub use view::{build_page, build_section, DisplayUnit, PageView, SectionView};

/// Renders `document` to an HTML string.
pub fn render_document(document: &Document) -> String {
    render_page(&build_page(document)).into_string()
}

/// Renders `document` and writes it to `path`, creating parent directories.
pub fn write_page(document: &Document, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let html = render_document(document);
    std::fs::write(path, &html)?;
    info!(
        "event=page_render module=render status=ok path={} bytes={} records={}",
        path.display(),
        html.len(),
        document.record_count()
    );
    Ok(())
}
