//! Core data layer for the Folio academic portfolio.
//! This crate owns the document schema and every rule applied to it.

pub mod config;
pub mod db;
pub mod format;
pub mod loader;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod schema;
pub mod service;

pub use config::{ConfigError, FolioConfig};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use loader::{
    DataSource, DocumentOrigin, FetchResponse, FileSource, HttpSource, LoadedDocument, Loader,
    RemoteSource, SourceError,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::document::{Document, Profile};
pub use model::record::{Record, RecordId};
pub use model::section::{FieldSpec, SectionKind};
pub use render::{render_document, write_page};
pub use repo::cache_repo::{
    CacheError, CacheResult, DocumentCache, SqliteDocumentCache, DEFAULT_CACHE_KEY,
};
pub use schema::{fallback_document, normalize, parse_document, validate_shape, SchemaError};
pub use service::{
    publish_site, AdminSession, CacheWatcher, EditorError, EditorSnapshot, MoveDirection,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
