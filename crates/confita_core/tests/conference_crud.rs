use confita_core::db::migrations::latest_version;
use confita_core::db::open_db_in_memory;
use confita_core::{
    Conference, ConferenceKey, ConferenceRepository, ConferenceService, ConferenceValidationError,
    IdError, RepoError, SqliteConferenceRepository, TreeItem,
};
use rusqlite::Connection;

fn conference(owner: &str, name: &str, created_time: &str) -> Conference {
    let mut conference = Conference::new(owner, name);
    conference.created_time = created_time.to_string();
    conference
}

fn full_conference() -> Conference {
    let mut conference = conference("admin", "icml", "2026-01-01T08:00:00+08:00");
    conference.display_name = "ICML".to_string();
    conference.kind = "Conference".to_string();
    conference.introduction = "<h1>Intro</h1>".repeat(100);
    conference.start_date = "2026-07-01".to_string();
    conference.end_date = "2026-07-05".to_string();
    conference.organizer = "IMLS".to_string();
    conference.carousels = Some(vec!["a.png".to_string(), "b.png".to_string()]);
    conference.carousel_height = "250px".to_string();
    conference.tags = Some(vec!["ml".to_string(), "ai".to_string()]);
    conference.dataset_url = "https://example.com/data.zip".to_string();
    conference.dataset_preview_url = "https://example.com/preview".to_string();
    conference.preview_data = r#"{"rows":[1,2,3]}"#.to_string();
    conference.result_url = "https://example.com/results".to_string();
    conference.bonus = 10_000;
    conference.person_count = 321;
    conference.display_state = "Visible".to_string();
    conference.status = "Public".to_string();
    conference.language = "en".to_string();
    conference.location = "Vienna".to_string();
    conference.address = "Messe Wien".to_string();
    conference.enable_submission = true;
    conference.default_item = "home".to_string();
    let mut venue = TreeItem::new("venue", "Venue");
    venue.children = Some(Vec::new());
    conference.tree_items = Some(vec![
        TreeItem::new("home", "Home"),
        TreeItem::new("program", "Program")
            .with_child(TreeItem::new("day-1", "Day 1").with_child(TreeItem::new("am", "AM"))),
        venue,
    ]);
    conference
}

fn ids(conferences: &[Conference]) -> Vec<String> {
    conferences.iter().map(Conference::id).collect()
}

#[test]
fn add_then_get_returns_equal_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteConferenceRepository::try_new(&conn).unwrap();

    let conference = full_conference();
    assert!(repo.add_conference(&conference).unwrap());

    let loaded = repo.get_conference("admin/icml").unwrap().unwrap();
    assert_eq!(loaded, conference);
    let outline = loaded.outline();
    assert_eq!(outline[1].child_items()[0].child_items()[0].key, "am");
    assert_eq!(outline[0].children, None);
    assert_eq!(outline[2].children, Some(Vec::new()));
}

#[test]
fn get_missing_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteConferenceRepository::try_new(&conn).unwrap();

    assert!(repo.get_conference("admin/missing").unwrap().is_none());
}

#[test]
fn get_with_malformed_id_returns_id_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteConferenceRepository::try_new(&conn).unwrap();

    let err = repo.get_conference("no-separator").unwrap_err();
    assert!(matches!(err, RepoError::Id(IdError::Malformed(id)) if id == "no-separator"));
}

#[test]
fn add_duplicate_key_returns_already_exists() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteConferenceRepository::try_new(&conn).unwrap();

    let first = conference("admin", "icml", "2026-01-01T00:00:00+00:00");
    repo.add_conference(&first).unwrap();

    let mut second = first.clone();
    second.display_name = "other".to_string();
    let err = repo.add_conference(&second).unwrap_err();
    assert!(matches!(
        err,
        RepoError::AlreadyExists(key) if key == ConferenceKey::new("admin", "icml")
    ));

    let loaded = repo.get_conference("admin/icml").unwrap().unwrap();
    assert_eq!(loaded, first);
}

#[test]
fn add_rejects_invalid_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteConferenceRepository::try_new(&conn).unwrap();

    let mut invalid = conference("admin", "icml", "2026-01-01T00:00:00+00:00");
    invalid.address = "x".repeat(101);

    let err = repo.add_conference(&invalid).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ConferenceValidationError::FieldTooLong {
            field: "address",
            ..
        })
    ));
    assert!(repo.list_global_conferences().unwrap().is_empty());
}

#[test]
fn update_missing_returns_false_and_creates_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteConferenceRepository::try_new(&conn).unwrap();

    let ghost = conference("admin", "ghost", "2026-01-01T00:00:00+00:00");
    assert!(!repo.update_conference("admin/ghost", &ghost).unwrap());
    assert!(repo.get_conference("admin/ghost").unwrap().is_none());
    assert!(repo.list_global_conferences().unwrap().is_empty());
}

#[test]
fn update_replaces_every_field() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteConferenceRepository::try_new(&conn).unwrap();

    let original = full_conference();
    repo.add_conference(&original).unwrap();

    let mut replacement = conference("admin", "icml", "2026-02-02T00:00:00+00:00");
    replacement.display_name = "ICML (renamed)".to_string();

    assert!(repo.update_conference("admin/icml", &replacement).unwrap());

    let loaded = repo.get_conference("admin/icml").unwrap().unwrap();
    assert_eq!(loaded, replacement);
    assert!(loaded.introduction.is_empty());
    assert_eq!(loaded.carousels, None);
    assert_eq!(loaded.tags, None);
    assert_eq!(loaded.tree_items, None);
    assert_eq!(loaded.bonus, 0);
    assert!(!loaded.enable_submission);
}

#[test]
fn update_cannot_change_primary_key() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteConferenceRepository::try_new(&conn).unwrap();

    let original = conference("admin", "icml", "2026-01-01T00:00:00+00:00");
    repo.add_conference(&original).unwrap();

    let renamed = conference("admin", "icml2", "2026-01-01T00:00:00+00:00");
    let err = repo.update_conference("admin/icml", &renamed).unwrap_err();
    assert!(matches!(err, RepoError::KeyMismatch { .. }));

    assert_eq!(repo.get_conference("admin/icml").unwrap().unwrap(), original);
    assert!(repo.get_conference("admin/icml2").unwrap().is_none());
}

#[test]
fn delete_existing_then_get_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteConferenceRepository::try_new(&conn).unwrap();

    let record = full_conference();
    repo.add_conference(&record).unwrap();

    assert!(repo.delete_conference(&record).unwrap());
    assert!(repo.get_conference(&record.id()).unwrap().is_none());
}

#[test]
fn delete_missing_returns_false_and_leaves_store_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteConferenceRepository::try_new(&conn).unwrap();

    let kept = conference("admin", "kept", "2026-01-01T00:00:00+00:00");
    repo.add_conference(&kept).unwrap();

    let missing = conference("admin", "missing", "2026-01-01T00:00:00+00:00");
    assert!(!repo.delete_conference(&missing).unwrap());
    assert!(!repo.delete_conference_by_id("admin/missing").unwrap());
    assert_eq!(repo.list_global_conferences().unwrap(), vec![kept]);
}

#[test]
fn delete_by_id_removes_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteConferenceRepository::try_new(&conn).unwrap();

    repo.add_conference(&conference("admin", "icml", "2026-01-01T00:00:00+00:00"))
        .unwrap();
    assert!(repo.delete_conference_by_id("admin/icml").unwrap());
    assert!(repo.get_conference("admin/icml").unwrap().is_none());
}

#[test]
fn list_by_owner_filters_and_orders_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteConferenceRepository::try_new(&conn).unwrap();

    repo.add_conference(&conference("alice", "old", "2026-01-01T00:00:00+00:00"))
        .unwrap();
    repo.add_conference(&conference("bob", "other", "2026-06-01T00:00:00+00:00"))
        .unwrap();
    repo.add_conference(&conference("alice", "new", "2026-03-01T00:00:00+00:00"))
        .unwrap();
    repo.add_conference(&conference("alice", "mid", "2026-02-01T00:00:00+00:00"))
        .unwrap();

    let listed = repo.list_conferences("alice").unwrap();
    assert_eq!(ids(&listed), ["alice/new", "alice/mid", "alice/old"]);
}

#[test]
fn list_by_owner_without_rows_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteConferenceRepository::try_new(&conn).unwrap();

    repo.add_conference(&conference("alice", "icml", "2026-01-01T00:00:00+00:00"))
        .unwrap();
    assert!(repo.list_conferences("nobody").unwrap().is_empty());
}

#[test]
fn list_global_orders_by_owner_then_newest_and_is_stable() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteConferenceRepository::try_new(&conn).unwrap();

    for record in [
        conference("carol", "c1", "2026-01-01T00:00:00+00:00"),
        conference("alice", "a1", "2026-01-01T00:00:00+00:00"),
        conference("bob", "b1", "2026-05-01T00:00:00+00:00"),
        conference("alice", "a2", "2026-04-01T00:00:00+00:00"),
        conference("alice", "a3", "2026-04-01T00:00:00+00:00"),
    ] {
        repo.add_conference(&record).unwrap();
    }

    let first = repo.list_global_conferences().unwrap();
    assert_eq!(
        ids(&first),
        ["alice/a2", "alice/a3", "alice/a1", "bob/b1", "carol/c1"]
    );

    let second = repo.list_global_conferences().unwrap();
    assert_eq!(first, second);
}

#[test]
fn null_and_empty_lists_survive_storage() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteConferenceRepository::try_new(&conn).unwrap();

    let mut with_nulls = conference("admin", "nulls", "2026-01-01T00:00:00+00:00");
    with_nulls.tree_items = Some(vec![TreeItem::new("leaf", "Leaf")]);
    let mut with_empties = conference("admin", "empties", "2026-01-01T00:00:00+00:00");
    with_empties.carousels = Some(Vec::new());
    with_empties.tags = Some(Vec::new());
    with_empties.tree_items = Some(Vec::new());
    repo.add_conference(&with_nulls).unwrap();
    repo.add_conference(&with_empties).unwrap();

    let loaded_nulls = repo.get_conference("admin/nulls").unwrap().unwrap();
    assert_eq!(loaded_nulls, with_nulls);
    assert_eq!(loaded_nulls.tags, None);
    assert_eq!(loaded_nulls.outline()[0].children, None);

    let loaded_empties = repo.get_conference("admin/empties").unwrap().unwrap();
    assert_eq!(loaded_empties, with_empties);
    assert_eq!(loaded_empties.tags, Some(Vec::new()));

    let json = serde_json::to_value(&loaded_nulls).unwrap();
    assert!(json["tags"].is_null());
    assert!(json["treeItems"][0]["children"].is_null());
}

#[test]
fn corrupt_list_column_is_reported_not_masked() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteConferenceRepository::try_new(&conn).unwrap();

    repo.add_conference(&conference("admin", "icml", "2026-01-01T00:00:00+00:00"))
        .unwrap();
    conn.execute("UPDATE conferences SET tags = '[\"unterminated';", [])
        .unwrap();

    let err = repo.get_conference("admin/icml").unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("tags")));
}

#[test]
fn service_wraps_repository_calls() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteConferenceRepository::try_new(&conn).unwrap();
    let service = ConferenceService::new(repo);

    let created = service.create_conference("admin", "from-service").unwrap();
    assert!(!created.created_time.is_empty());

    let fetched = service.get_conference("admin/from-service").unwrap().unwrap();
    assert_eq!(fetched, created);

    let err = service
        .create_conference("admin", "from-service")
        .unwrap_err();
    assert!(matches!(err, RepoError::AlreadyExists(_)));

    assert_eq!(service.list_conferences("admin").unwrap().len(), 1);
    assert!(service.delete_conference(&created).unwrap());
    assert!(service.list_global_conferences().unwrap().is_empty());
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteConferenceRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_conferences_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteConferenceRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("conferences"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE conferences (
            owner TEXT NOT NULL,
            name TEXT NOT NULL,
            created_time TEXT NOT NULL DEFAULT '',
            PRIMARY KEY (owner, name)
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteConferenceRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "conferences",
            column: "display_name"
        })
    ));
}
