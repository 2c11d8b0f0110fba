//! Typed portfolio domain model.
//!
//! # Responsibility
//! - Define the document, profile, record and section types shared by the
//!   loader, renderer and editor.
//!
//! # Invariants
//! - A `Document` is always structurally complete; repair happens in
//!   `crate::schema` before a `Document` exists.

pub mod document;
pub mod record;
pub mod section;
