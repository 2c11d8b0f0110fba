//! Prioritized document loading with guaranteed fallback.
//!
//! # Responsibility
//! - Resolve the document to show: cache entry, then static data file,
//!   then the built-in fallback.
//!
//! # Invariants
//! - `load` never fails; every path ends in a normalized `Document`.
//! - A corrupt or shape-invalid cache entry is removed before moving on.
//! - The cache check is synchronous and always precedes the fetch.

use crate::model::document::Document;
use crate::repo::cache_repo::DocumentCache;
use crate::schema::{fallback_document, normalize, parse_document};
use log::{info, warn};

mod source;

pub use source::{
    DataSource, FetchResponse, FileSource, HttpSource, RemoteSource, SourceError,
    DEFAULT_DATA_SOURCE,
};

/// Which tier produced a loaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOrigin {
    Cache,
    Remote,
    Fallback,
}

impl DocumentOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Remote => "remote",
            Self::Fallback => "fallback",
        }
    }
}

/// Loader output.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub document: Document,
    pub origin: DocumentOrigin,
}

/// Cache-first document loader.
pub struct Loader<'a, C: DocumentCache, R: RemoteSource> {
    cache: &'a C,
    source: &'a R,
    cache_key: &'a str,
}

impl<'a, C: DocumentCache, R: RemoteSource> Loader<'a, C, R> {
    pub fn new(cache: &'a C, source: &'a R, cache_key: &'a str) -> Self {
        Self {
            cache,
            source,
            cache_key,
        }
    }

    /// Resolves the document by priority: cache, remote, fallback.
    pub async fn load(&self) -> LoadedDocument {
        if let Some(document) = self.load_cached() {
            info!("event=document_load module=loader status=ok origin=cache");
            return LoadedDocument {
                document,
                origin: DocumentOrigin::Cache,
            };
        }
        self.load_remote().await
    }

    /// Returns the cached document if it parses and passes validation.
    ///
    /// A present but unusable entry is removed.
    pub fn load_cached(&self) -> Option<Document> {
        let raw = match self.cache.read(self.cache_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(
                    "event=cache_read module=loader status=error key={} error={}",
                    self.cache_key, err
                );
                return None;
            }
        };

        match parse_document(&raw) {
            Ok(document) => Some(document),
            Err(err) => {
                warn!(
                    "event=cache_discard module=loader status=warn key={} reason={}",
                    self.cache_key, err
                );
                if let Err(remove_err) = self.cache.remove(self.cache_key) {
                    warn!(
                        "event=cache_discard module=loader status=error key={} error={}",
                        self.cache_key, remove_err
                    );
                }
                None
            }
        }
    }

    /// Skips the cache: remote document if reachable, else fallback.
    ///
    /// A remote body that parses as JSON is accepted even when its shape is
    /// incomplete; normalization repairs it.
    pub async fn load_remote(&self) -> LoadedDocument {
        let location = self.source.location();
        let reason = match self.source.fetch().await {
            Ok(response) if response.is_ok() => {
                match serde_json::from_str::<serde_json::Value>(&response.body) {
                    Ok(value) => {
                        info!(
                            "event=document_load module=loader status=ok origin=remote location={}",
                            location
                        );
                        return LoadedDocument {
                            document: normalize(&value),
                            origin: DocumentOrigin::Remote,
                        };
                    }
                    Err(err) => format!("invalid_json:{err}"),
                }
            }
            Ok(response) => format!("http_status:{}", response.status),
            Err(err) => format!("transport:{err}"),
        };

        warn!(
            "event=document_load module=loader status=warn origin=fallback location={} reason={}",
            location, reason
        );
        LoadedDocument {
            document: fallback_document(),
            origin: DocumentOrigin::Fallback,
        }
    }
}
