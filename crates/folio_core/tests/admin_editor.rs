use folio_core::service::admin_service::{
    STATUS_FALLBACK, STATUS_IMPORTED, STATUS_IMPORT_FAILED, STATUS_RESET,
    STATUS_RESET_FALLBACK,
};
use folio_core::{
    open_db_in_memory, render_document, AdminSession, DocumentCache, DocumentOrigin,
    EditorError, EditorSnapshot, FetchResponse, MoveDirection, RemoteSource, SectionKind,
    SourceError, SqliteDocumentCache,
};
use rusqlite::Connection;

const KEY: &str = "folio-portfolio-data";
const PASSWORD: &str = "HJPORT";

struct StaticSource(Option<String>);

impl RemoteSource for StaticSource {
    fn location(&self) -> String {
        "static".to_string()
    }

    async fn fetch(&self) -> Result<FetchResponse, SourceError> {
        match &self.0 {
            Some(body) => Ok(FetchResponse {
                status: 200,
                body: body.clone(),
            }),
            None => Ok(FetchResponse {
                status: 404,
                body: String::new(),
            }),
        }
    }
}

fn sample_source() -> StaticSource {
    StaticSource(Some(
        r#"{
            "profile": {"name": "Sample Author", "links": {}, "areaOfInterest": ["HCI"]},
            "publications": [
                {"id": "pub-a", "year": "2021", "title": "Alpha", "venueNote": "keep me"},
                {"id": "pub-b", "year": "2024", "title": "Beta"}
            ],
            "honors": [{"id": "hon-a", "year": "2025", "title": "Award"}]
        }"#
        .to_string(),
    ))
}

async fn unlocked(conn: &Connection) -> AdminSession<SqliteDocumentCache<'_>> {
    let mut session = AdminSession::new(SqliteDocumentCache::new(conn), KEY, PASSWORD);
    session.authenticate(PASSWORD).unwrap();
    session.hydrate(&sample_source()).await.unwrap();
    session
}

fn titles(session: &AdminSession<SqliteDocumentCache<'_>>, kind: SectionKind) -> Vec<String> {
    session
        .document()
        .section(kind)
        .iter()
        .map(|record| record.text("title"))
        .collect()
}

#[tokio::test]
async fn locked_session_rejects_every_operation() {
    let conn = open_db_in_memory().unwrap();
    let mut session = AdminSession::new(SqliteDocumentCache::new(&conn), KEY, PASSWORD);

    assert!(matches!(
        session.authenticate("wrong"),
        Err(EditorError::WrongPassword)
    ));
    assert!(matches!(
        session.add_record(SectionKind::News),
        Err(EditorError::NotAuthenticated)
    ));
    assert!(matches!(session.save(), Err(EditorError::NotAuthenticated)));
    assert!(matches!(
        session.hydrate(&sample_source()).await,
        Err(EditorError::NotAuthenticated)
    ));
    assert_eq!(SqliteDocumentCache::new(&conn).read(KEY).unwrap(), None);
}

#[tokio::test]
async fn password_check_ignores_case_and_whitespace() {
    let conn = open_db_in_memory().unwrap();
    let mut session = AdminSession::new(SqliteDocumentCache::new(&conn), KEY, PASSWORD);
    session.authenticate(" hj Port ").unwrap();
    assert!(session.is_authenticated());

    session.logout();
    assert!(!session.is_authenticated());
    assert_eq!(session.status(), "Logged out.");
}

#[tokio::test]
async fn hydrate_reports_fallback_when_no_source_is_reachable() {
    let conn = open_db_in_memory().unwrap();
    let mut session = AdminSession::new(SqliteDocumentCache::new(&conn), KEY, PASSWORD);
    session.authenticate(PASSWORD).unwrap();

    let origin = session.hydrate(&StaticSource(None)).await.unwrap();
    assert_eq!(origin, DocumentOrigin::Fallback);
    assert_eq!(session.status(), STATUS_FALLBACK);
}

#[tokio::test]
async fn add_appends_blank_record_with_fresh_id() {
    let conn = open_db_in_memory().unwrap();
    let mut session = unlocked(&conn).await;

    let first = session.add_record(SectionKind::Grants).unwrap();
    let second = session.add_record(SectionKind::Grants).unwrap();
    assert_ne!(first, second);
    assert!(first.starts_with("grants-"));

    let grants = session.document().section(SectionKind::Grants);
    assert_eq!(grants.len(), 2);
    assert_eq!(grants[1].id.as_deref(), Some(second.as_str()));
    assert!(grants[0].fields.values().all(|value| value == ""));
}

#[tokio::test]
async fn move_swaps_neighbours_and_ignores_boundaries() {
    let conn = open_db_in_memory().unwrap();
    let mut session = unlocked(&conn).await;
    let kind = SectionKind::Publications;

    assert!(!session.move_record(kind, 0, MoveDirection::Up).unwrap());
    assert!(!session.move_record(kind, 1, MoveDirection::Down).unwrap());
    assert!(!session.move_record(kind, 9, MoveDirection::Up).unwrap());
    assert_eq!(titles(&session, kind), ["Alpha", "Beta"]);

    assert!(session.move_record(kind, 0, MoveDirection::Down).unwrap());
    assert_eq!(titles(&session, kind), ["Beta", "Alpha"]);
}

#[tokio::test]
async fn remove_requires_confirmation() {
    let conn = open_db_in_memory().unwrap();
    let mut session = unlocked(&conn).await;
    let kind = SectionKind::Publications;

    let declined = session.remove_record(kind, 0, |_| false).unwrap();
    assert!(declined.is_none());
    assert_eq!(titles(&session, kind).len(), 2);

    let removed = session
        .remove_record(kind, 0, |record| record.text("title") == "Alpha")
        .unwrap()
        .unwrap();
    assert_eq!(removed.id.as_deref(), Some("pub-a"));
    assert_eq!(titles(&session, kind), ["Beta"]);
    assert!(session.remove_record(kind, 5, |_| true).unwrap().is_none());
}

#[tokio::test]
async fn sync_preserves_ids_and_undeclared_fields() {
    let conn = open_db_in_memory().unwrap();
    let mut session = unlocked(&conn).await;

    let mut snapshot = EditorSnapshot::capture(session.document());
    let rows = snapshot
        .sections
        .get_mut(&SectionKind::Publications)
        .unwrap();
    rows[0].set("title", "  Alpha (revised)  ");
    rows.swap(0, 1);
    snapshot.profile.area_of_interest = "XR, Haptics".to_string();

    session.sync_from_editors(&snapshot).unwrap();
    let publications = session.document().section(SectionKind::Publications);
    assert_eq!(publications[0].id.as_deref(), Some("pub-b"));
    assert_eq!(publications[1].id.as_deref(), Some("pub-a"));
    assert_eq!(publications[1].text("title"), "Alpha (revised)");
    assert_eq!(publications[1].text("venueNote"), "keep me");
    assert_eq!(
        session.document().profile.area_of_interest,
        ["XR", "Haptics"]
    );
}

#[tokio::test]
async fn save_persists_and_bumps_revision() {
    let conn = open_db_in_memory().unwrap();
    let mut session = unlocked(&conn).await;

    let revision = session.save().unwrap();
    assert_eq!(revision, 1);
    assert!(session.status().starts_with("Saved at "));
    assert!(session.status().ends_with('.'));

    let stored = SqliteDocumentCache::new(&conn).read(KEY).unwrap().unwrap();
    assert!(stored.contains("Sample Author"));
    assert_eq!(session.publish_preview().unwrap(), 2);
}

#[tokio::test]
async fn failed_import_leaves_document_untouched() {
    let conn = open_db_in_memory().unwrap();
    let mut session = unlocked(&conn).await;
    let before = session.document().clone();

    for bad in ["not json", r#"{"profile": {}}"#, "[]"] {
        let err = session.import(bad).unwrap_err();
        assert!(matches!(err, EditorError::Import(_)));
        assert_eq!(session.status(), STATUS_IMPORT_FAILED);
        assert_eq!(session.document(), &before);
    }
    assert_eq!(SqliteDocumentCache::new(&conn).read(KEY).unwrap(), None);
}

#[tokio::test]
async fn export_then_import_restores_the_document() {
    let conn = open_db_in_memory().unwrap();
    let mut session = unlocked(&conn).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portfolio-export.json");

    session.export(&path).unwrap();
    assert_eq!(session.status(), "Export completed.");
    let exported = session.document().clone();

    session.add_record(SectionKind::News).unwrap();
    session.import_file(&path).unwrap();
    assert_eq!(session.status(), STATUS_IMPORTED);
    assert_eq!(session.document(), &exported);
    assert!(SqliteDocumentCache::new(&conn).read(KEY).unwrap().is_some());
}

#[tokio::test]
async fn reset_from_sample_discards_edits_and_saves() {
    let conn = open_db_in_memory().unwrap();
    let mut session = unlocked(&conn).await;
    session.add_record(SectionKind::Skills).unwrap();

    let origin = session.reset_from_sample(&sample_source()).await.unwrap();
    assert_eq!(origin, DocumentOrigin::Remote);
    assert_eq!(session.status(), STATUS_RESET);
    assert!(session.document().section(SectionKind::Skills).is_empty());

    let origin = session.reset_from_sample(&StaticSource(None)).await.unwrap();
    assert_eq!(origin, DocumentOrigin::Fallback);
    assert_eq!(session.status(), STATUS_RESET_FALLBACK);
    assert_eq!(session.document().record_count(), 0);
}

#[tokio::test]
async fn kpis_count_records_and_latest_year() {
    let conn = open_db_in_memory().unwrap();
    let session = unlocked(&conn).await;

    let kpis = session.kpis();
    assert_eq!(kpis.total_records, 3);
    assert_eq!(kpis.publications, 2);
    assert_eq!(kpis.latest_year, Some(2025));
}

#[tokio::test]
async fn saved_edits_reach_the_rendered_page() {
    let conn = open_db_in_memory().unwrap();
    let mut session = unlocked(&conn).await;

    let id = session.add_record(SectionKind::Projects).unwrap();
    let mut snapshot = EditorSnapshot::capture(session.document());
    snapshot
        .sections
        .get_mut(&SectionKind::Projects)
        .unwrap()[0]
        .set("title", "Haptic Cane");
    session.sync_from_editors(&snapshot).unwrap();
    session.save().unwrap();

    let cache = SqliteDocumentCache::new(&conn);
    let loaded = folio_core::Loader::new(&cache, &StaticSource(None), KEY)
        .load()
        .await;
    assert_eq!(loaded.origin, DocumentOrigin::Cache);
    let html = render_document(&loaded.document);
    assert!(html.contains("Haptic Cane"));
    assert!(html.contains(&format!(r#"data-id="{id}""#)));

    session
        .remove_record(SectionKind::Projects, 0, |_| true)
        .unwrap();
    session.save().unwrap();
    let loaded = folio_core::Loader::new(&cache, &StaticSource(None), KEY)
        .load()
        .await;
    assert!(!render_document(&loaded.document).contains("Haptic Cane"));
}

#[tokio::test]
async fn generated_id_for_null_id_record_survives_save_and_reload() {
    let conn = open_db_in_memory().unwrap();
    let mut session = unlocked(&conn).await;
    let mut value = folio_core::normalize(&serde_json::json!({})).to_value();
    value["news"] = serde_json::json!([{"id": null, "title": "Launch"}]);
    session.import(&value.to_string()).unwrap();

    let snapshot = EditorSnapshot::capture(session.document());
    session.sync_from_editors(&snapshot).unwrap();
    let generated = session.document().section(SectionKind::News)[0]
        .id
        .clone()
        .unwrap();

    let json = session.document().to_json().unwrap();
    assert_eq!(json.matches("\"id\"").count(), 1);
    let reloaded = folio_core::parse_document(&json).unwrap();
    assert_eq!(
        reloaded.section(SectionKind::News)[0].id.as_deref(),
        Some(generated.as_str())
    );

    session.save().unwrap();
    session.sync_from_editors(&snapshot).unwrap();
    assert_eq!(
        session.document().section(SectionKind::News)[0].id.as_deref(),
        Some(generated.as_str())
    );
}
