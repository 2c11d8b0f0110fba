//! Password-gated portfolio editor.
//!
//! # Responsibility
//! - Own the in-memory document being edited, the session flag and the
//!   one-line status message.
//! - Provide record CRUD, form sync, save/export/import and reseeding.
//!
//! # Invariants
//! - Every operation except `authenticate`/`logout` requires an
//!   authenticated session.
//! - A failed import leaves the document untouched.
//! - Record ids survive edits and reordering; new ids are generated only
//!   for records that lack one.
//! - Nothing is persisted without an explicit save-like call.

use crate::format::parse_year;
use crate::loader::{DocumentOrigin, Loader, RemoteSource};
use crate::model::document::{Document, Profile};
use crate::model::record::{Record, RecordId};
use crate::model::section::SectionKind;
use crate::repo::cache_repo::{CacheError, DocumentCache};
use crate::schema::{fallback_document, parse_document, SchemaError, DEFAULT_PHOTO};
use chrono::Local;
use log::{info, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const STATUS_EXPORTED: &str = "Export completed.";
pub const STATUS_IMPORTED: &str = "Imported and saved.";
pub const STATUS_IMPORT_FAILED: &str = "Import failed: invalid JSON schema.";
pub const STATUS_FALLBACK: &str = "Could not fetch data file. Loaded fallback.";
pub const STATUS_RESET: &str = "Reset from sample completed.";
pub const STATUS_RESET_FALLBACK: &str = "Sample load failed. Reset to fallback data.";
pub const STATUS_LOGGED_OUT: &str = "Logged out.";

/// Sections whose years feed the "latest year" indicator.
const DATED_SECTIONS: [SectionKind; 3] = [
    SectionKind::Publications,
    SectionKind::ConferenceProceedings,
    SectionKind::Honors,
];

/// Editor operation failure.
#[derive(Debug)]
pub enum EditorError {
    NotAuthenticated,
    WrongPassword,
    Cache(CacheError),
    Serialize(serde_json::Error),
    Io { path: PathBuf, source: std::io::Error },
    Import(SchemaError),
}

impl Display for EditorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAuthenticated => write!(f, "editor session is not authenticated"),
            Self::WrongPassword => write!(f, "Wrong password."),
            Self::Cache(err) => write!(f, "cache write failed: {err}"),
            Self::Serialize(err) => write!(f, "document serialization failed: {err}"),
            Self::Io { path, source } => write!(f, "`{}`: {source}", path.display()),
            Self::Import(err) => write!(f, "import rejected: {err}"),
        }
    }
}

impl Error for EditorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Cache(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::Import(err) => Some(err),
            Self::NotAuthenticated | Self::WrongPassword => None,
        }
    }
}

impl From<CacheError> for EditorError {
    fn from(value: CacheError) -> Self {
        Self::Cache(value)
    }
}

impl From<serde_json::Error> for EditorError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

pub type EditorResult<T> = Result<T, EditorError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Profile form values as typed by the author.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileForm {
    pub name: String,
    pub affiliation: String,
    pub intro: String,
    /// Comma-separated interest tags.
    pub area_of_interest: String,
    pub email: String,
    pub photo: String,
    pub links: BTreeMap<String, String>,
}

impl ProfileForm {
    /// Pre-fills the form from a stored profile.
    pub fn from_profile(profile: &Profile) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            name: text(&profile.name),
            affiliation: text(&profile.affiliation),
            intro: text(&profile.intro),
            area_of_interest: profile.area_of_interest.join(", "),
            email: text(&profile.email),
            photo: profile
                .photo
                .clone()
                .unwrap_or_else(|| DEFAULT_PHOTO.to_string()),
            links: profile.links.clone(),
        }
    }
}

/// Live form values of one record row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordForm {
    /// Position of the source record when the row was rendered; a row with
    /// no matching record becomes a new record.
    pub index: usize,
    pub values: BTreeMap<String, String>,
}

impl RecordForm {
    /// Pre-fills one row with the declared fields of `record`.
    pub fn from_record(section: SectionKind, index: usize, record: &Record) -> Self {
        Self {
            index,
            values: section
                .fields()
                .iter()
                .map(|spec| (spec.key.to_string(), record.text(spec.key)))
                .collect(),
        }
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }
}

/// Full editor form state. Sections without an entry are left untouched by
/// a sync.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditorSnapshot {
    pub profile: ProfileForm,
    pub sections: BTreeMap<SectionKind, Vec<RecordForm>>,
}

impl EditorSnapshot {
    /// Captures the rows an editor UI would render for `document`.
    pub fn capture(document: &Document) -> Self {
        Self {
            profile: ProfileForm::from_profile(&document.profile),
            sections: SectionKind::ALL
                .into_iter()
                .map(|kind| {
                    let rows: Vec<RecordForm> = document
                        .section(kind)
                        .iter()
                        .enumerate()
                        .map(|(index, record)| RecordForm::from_record(kind, index, record))
                        .collect();
                    (kind, rows)
                })
                .collect(),
        }
    }
}

/// Overview indicators shown on the editor dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorKpis {
    pub total_records: usize,
    pub publications: usize,
    /// `None` when no dated record carries a year.
    pub latest_year: Option<i32>,
}

/// One authenticated editing session over a document cache.
pub struct AdminSession<C: DocumentCache> {
    cache: C,
    cache_key: String,
    password: String,
    authenticated: bool,
    document: Document,
    status: String,
}

impl<C: DocumentCache> AdminSession<C> {
    /// Creates a locked session holding the fallback document.
    pub fn new(cache: C, cache_key: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            cache,
            cache_key: cache_key.into(),
            password: password.into(),
            authenticated: false,
            document: fallback_document(),
            status: String::new(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Latest one-line status message.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Checks `input` against the shared secret, ignoring case and all
    /// whitespace. No lockout on failure.
    pub fn authenticate(&mut self, input: &str) -> EditorResult<()> {
        if fold_secret(input) != fold_secret(&self.password) {
            warn!("event=admin_auth module=editor status=denied");
            return Err(EditorError::WrongPassword);
        }
        self.authenticated = true;
        info!("event=admin_auth module=editor status=ok");
        Ok(())
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
        self.status = STATUS_LOGGED_OUT.to_string();
        info!("event=admin_logout module=editor status=ok");
    }

    /// Loads the document to edit with the public loader's priority.
    pub async fn hydrate<R: RemoteSource>(&mut self, source: &R) -> EditorResult<DocumentOrigin> {
        self.require_auth()?;
        let loaded = Loader::new(&self.cache, source, &self.cache_key).load().await;
        if loaded.origin == DocumentOrigin::Fallback {
            self.status = STATUS_FALLBACK.to_string();
        }
        self.document = loaded.document;
        Ok(loaded.origin)
    }

    /// Appends an empty record with a fresh id.
    pub fn add_record(&mut self, section: SectionKind) -> EditorResult<RecordId> {
        self.require_auth()?;
        let record = Record::blank(section);
        let id = record.id.clone().unwrap_or_default();
        self.document.section_mut(section).push(record);
        info!(
            "event=record_add module=editor status=ok section={} id={}",
            section, id
        );
        Ok(id)
    }

    /// Swaps the record at `index` with its neighbour.
    ///
    /// Returns `false` (no-op) at the array boundaries or for an
    /// out-of-range index.
    pub fn move_record(
        &mut self,
        section: SectionKind,
        index: usize,
        direction: MoveDirection,
    ) -> EditorResult<bool> {
        self.require_auth()?;
        let rows = self.document.section_mut(section);
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => index.checked_add(1),
        };
        match target {
            Some(target) if index < rows.len() && target < rows.len() => {
                rows.swap(index, target);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Removes the record at `index` once `confirm` approves it.
    ///
    /// Returns the removed record, or `None` when declined or out of range.
    pub fn remove_record(
        &mut self,
        section: SectionKind,
        index: usize,
        confirm: impl FnOnce(&Record) -> bool,
    ) -> EditorResult<Option<Record>> {
        self.require_auth()?;
        let rows = self.document.section_mut(section);
        let Some(record) = rows.get(index) else {
            return Ok(None);
        };
        if !confirm(record) {
            return Ok(None);
        }
        let removed = rows.remove(index);
        info!(
            "event=record_remove module=editor status=ok section={} index={}",
            section, index
        );
        Ok(Some(removed))
    }

    /// Rebuilds profile and records from live form values.
    ///
    /// Values are trimmed. Each row starts from the record at its `index`
    /// (keeping its id and undeclared fields) or from a blank record.
    pub fn sync_from_editors(&mut self, snapshot: &EditorSnapshot) -> EditorResult<()> {
        self.require_auth()?;
        apply_profile_form(&mut self.document.profile, &snapshot.profile);

        for (&section, rows) in &snapshot.sections {
            let current = self.document.section(section);
            let next = rows
                .iter()
                .map(|row| {
                    let mut record = current
                        .get(row.index)
                        .cloned()
                        .unwrap_or_else(|| Record::blank(section));
                    for spec in section.fields() {
                        if let Some(value) = row.values.get(spec.key) {
                            record.set_text(spec.key, value.trim());
                        }
                    }
                    record.ensure_id(section);
                    record
                })
                .collect();
            self.document.set_section(section, next);
        }
        Ok(())
    }

    /// Persists the document to the cache and stamps the status line.
    ///
    /// Returns the new cache revision.
    pub fn save(&mut self) -> EditorResult<u64> {
        let revision = self.persist()?;
        self.status = format!("Saved at {}.", Local::now().format("%H:%M:%S"));
        Ok(revision)
    }

    /// Persists for the public page preview without touching the status.
    pub fn publish_preview(&mut self) -> EditorResult<u64> {
        self.persist()
    }

    /// Pretty JSON of the current document.
    pub fn export_json(&self) -> EditorResult<String> {
        self.require_auth()?;
        Ok(self.document.to_json_pretty()?)
    }

    /// Writes the current document to `path` as pretty JSON.
    pub fn export(&mut self, path: &Path) -> EditorResult<()> {
        let json = self.export_json()?;
        std::fs::write(path, json).map_err(|source| EditorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.status = STATUS_EXPORTED.to_string();
        info!(
            "event=document_export module=editor status=ok path={}",
            path.display()
        );
        Ok(())
    }

    /// Replaces the document with `text` if it is a complete document, then
    /// persists it. On failure the document is left as it was.
    pub fn import(&mut self, text: &str) -> EditorResult<()> {
        self.require_auth()?;
        match parse_document(text) {
            Ok(document) => {
                self.document = document;
                self.persist()?;
                self.status = STATUS_IMPORTED.to_string();
                info!("event=document_import module=editor status=ok");
                Ok(())
            }
            Err(err) => {
                self.status = STATUS_IMPORT_FAILED.to_string();
                warn!(
                    "event=document_import module=editor status=rejected reason={}",
                    err
                );
                Err(EditorError::Import(err))
            }
        }
    }

    /// Reads `path` and imports it.
    pub fn import_file(&mut self, path: &Path) -> EditorResult<()> {
        self.require_auth()?;
        let text = std::fs::read_to_string(path).map_err(|source| {
            self.status = STATUS_IMPORT_FAILED.to_string();
            EditorError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;
        self.import(&text)
    }

    /// Discards edits, reloads the static data file (or the fallback) and
    /// saves it over the cache.
    pub async fn reset_from_sample<R: RemoteSource>(
        &mut self,
        source: &R,
    ) -> EditorResult<DocumentOrigin> {
        self.require_auth()?;
        let loaded = Loader::new(&self.cache, source, &self.cache_key)
            .load_remote()
            .await;
        self.document = loaded.document;
        self.save()?;
        self.status = match loaded.origin {
            DocumentOrigin::Fallback => STATUS_RESET_FALLBACK,
            DocumentOrigin::Remote | DocumentOrigin::Cache => STATUS_RESET,
        }
        .to_string();
        Ok(loaded.origin)
    }

    pub fn kpis(&self) -> EditorKpis {
        let latest_year = DATED_SECTIONS
            .into_iter()
            .flat_map(|kind| self.document.section(kind))
            .map(|record| parse_year(&record.text("year")))
            .filter(|year| *year > 0)
            .max();
        EditorKpis {
            total_records: self.document.record_count(),
            publications: self.document.section(SectionKind::Publications).len(),
            latest_year,
        }
    }

    fn persist(&mut self) -> EditorResult<u64> {
        self.require_auth()?;
        let json = self.document.to_json()?;
        let revision = self.cache.write(&self.cache_key, &json)?;
        info!(
            "event=document_save module=editor status=ok key={} revision={} records={}",
            self.cache_key,
            revision,
            self.document.record_count()
        );
        Ok(revision)
    }

    fn require_auth(&self) -> EditorResult<()> {
        if self.authenticated {
            Ok(())
        } else {
            Err(EditorError::NotAuthenticated)
        }
    }
}

fn apply_profile_form(profile: &mut Profile, form: &ProfileForm) {
    let text = |value: &str| Some(value.trim().to_string());
    profile.name = text(&form.name);
    profile.affiliation = text(&form.affiliation);
    profile.intro = text(&form.intro);
    profile.email = text(&form.email);
    let photo = form.photo.trim();
    profile.photo = Some(if photo.is_empty() {
        DEFAULT_PHOTO.to_string()
    } else {
        photo.to_string()
    });
    profile.area_of_interest = form
        .area_of_interest
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect();
    for (name, url) in &form.links {
        profile.links.insert(name.clone(), url.trim().to_string());
    }
}

fn fold_secret(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}
