//! Public page publishing.
//!
//! # Responsibility
//! - Resolve the document through the loader and write the rendered page.

use crate::loader::{DocumentOrigin, Loader, RemoteSource};
use crate::render::write_page;
use crate::repo::cache_repo::DocumentCache;
use std::path::{Path, PathBuf};

/// Outcome of one page publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub origin: DocumentOrigin,
    pub output: PathBuf,
    pub records: usize,
}

/// Renders the public page from cache, data file or fallback.
///
/// Only writing the page can fail; loading always yields a document.
pub async fn publish_site<C: DocumentCache, R: RemoteSource>(
    cache: &C,
    source: &R,
    cache_key: &str,
    output: &Path,
) -> std::io::Result<PublishReport> {
    let loaded = Loader::new(cache, source, cache_key).load().await;
    write_page(&loaded.document, output)?;
    Ok(PublishReport {
        origin: loaded.origin,
        output: output.to_path_buf(),
        records: loaded.document.record_count(),
    })
}
