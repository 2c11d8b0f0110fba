//! Use-case services over the cache and loader.
//!
//! # Responsibility
//! - Editor session state and operations (`admin_service`).
//! - Public page publishing (`site_service`).
//! - Change notification between processes sharing one cache (`watch`).

pub mod admin_service;
pub mod site_service;
pub mod watch;

pub use admin_service::{
    AdminSession, EditorError, EditorKpis, EditorResult, EditorSnapshot, MoveDirection,
    ProfileForm, RecordForm,
};
pub use site_service::{publish_site, PublishReport};
pub use watch::CacheWatcher;
