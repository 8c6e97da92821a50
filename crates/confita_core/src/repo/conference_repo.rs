//! Conference repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide list/get/add/update/delete APIs over `conferences` storage.
//! - Keep SQL and column encoding inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `Conference::validate()` before SQL mutations.
//! - Updates overwrite every non-key column and never insert.
//! - Global listing order is `owner ASC, created_time DESC, name ASC`.
//! - Per-owner listing order is `created_time DESC, name ASC`.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::conference::{Conference, ConferenceValidationError};
use crate::model::id::{ConferenceKey, IdError};
use crate::repo::columns::{
    decode_string_list, decode_tree_items, encode_string_list, encode_tree_items,
};
use log::{debug, info};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CONFERENCE_COLUMNS: &[&str] = &[
    "owner",
    "name",
    "created_time",
    "display_name",
    "type",
    "introduction",
    "start_date",
    "end_date",
    "organizer",
    "carousels",
    "carousel_height",
    "tags",
    "dataset_url",
    "dataset_preview_url",
    "preview_data",
    "result_url",
    "bonus",
    "person_count",
    "display_state",
    "status",
    "language",
    "location",
    "address",
    "enable_submission",
    "default_item",
    "tree_items",
];

const CONFERENCE_SELECT_SQL: &str = "SELECT
    owner,
    name,
    created_time,
    display_name,
    type,
    introduction,
    start_date,
    end_date,
    organizer,
    carousels,
    carousel_height,
    tags,
    dataset_url,
    dataset_preview_url,
    preview_data,
    result_url,
    bonus,
    person_count,
    display_state,
    status,
    language,
    location,
    address,
    enable_submission,
    default_item,
    tree_items
FROM conferences";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for conference persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ConferenceValidationError),
    Id(IdError),
    Db(DbError),
    /// Update record key differs from the key addressed by the id.
    KeyMismatch {
        expected: ConferenceKey,
        actual: ConferenceKey,
    },
    AlreadyExists(ConferenceKey),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Id(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::KeyMismatch { expected, actual } => write!(
                f,
                "conference key cannot change on update: addressed `{expected}`, record has `{actual}`"
            ),
            Self::AlreadyExists(key) => write!(f, "conference already exists: {key}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted conference data: {message}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "conference repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "conference repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "conference repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Id(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::KeyMismatch { .. } => None,
            Self::AlreadyExists(_) => None,
            Self::InvalidData(_) => None,
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<ConferenceValidationError> for RepoError {
    fn from(value: ConferenceValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<IdError> for RepoError {
    fn from(value: IdError) -> Self {
        Self::Id(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for conference CRUD operations.
pub trait ConferenceRepository {
    /// Lists every conference across all owners.
    fn list_global_conferences(&self) -> RepoResult<Vec<Conference>>;
    /// Lists conferences of one owner, newest first.
    fn list_conferences(&self, owner: &str) -> RepoResult<Vec<Conference>>;
    /// Loads one conference by `owner/name` id.
    fn get_conference(&self, id: &str) -> RepoResult<Option<Conference>>;
    /// Replaces every column of an existing conference.
    ///
    /// Returns `false` without writing when no row matches `id`.
    fn update_conference(&self, id: &str, conference: &Conference) -> RepoResult<bool>;
    /// Inserts a new conference. Returns whether a row was created.
    fn add_conference(&self, conference: &Conference) -> RepoResult<bool>;
    /// Deletes the row matching the record key. Returns whether a row was removed.
    fn delete_conference(&self, conference: &Conference) -> RepoResult<bool>;
    /// Deletes the row addressed by `owner/name` id.
    fn delete_conference_by_id(&self, id: &str) -> RepoResult<bool>;
}

/// SQLite-backed conference repository.
pub struct SqliteConferenceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteConferenceRepository<'conn> {
    /// Creates repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version is not current.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` on schema drift.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_conference_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ConferenceRepository for SqliteConferenceRepository<'_> {
    fn list_global_conferences(&self) -> RepoResult<Vec<Conference>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CONFERENCE_SELECT_SQL}
             ORDER BY owner ASC, created_time DESC, name ASC;"
        ))?;
        let mut rows = stmt.query([])?;

        let mut conferences = Vec::new();
        while let Some(row) = rows.next()? {
            conferences.push(parse_conference_row(row)?);
        }

        debug!(
            "event=conference_list module=repo status=ok scope=global count={}",
            conferences.len()
        );
        Ok(conferences)
    }

    fn list_conferences(&self, owner: &str) -> RepoResult<Vec<Conference>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CONFERENCE_SELECT_SQL}
             WHERE owner = ?1
             ORDER BY created_time DESC, name ASC;"
        ))?;
        let mut rows = stmt.query([owner])?;

        let mut conferences = Vec::new();
        while let Some(row) = rows.next()? {
            conferences.push(parse_conference_row(row)?);
        }

        debug!(
            "event=conference_list module=repo status=ok scope=owner count={}",
            conferences.len()
        );
        Ok(conferences)
    }

    fn get_conference(&self, id: &str) -> RepoResult<Option<Conference>> {
        let key = ConferenceKey::parse(id)?;
        load_conference(self.conn, &key)
    }

    fn update_conference(&self, id: &str, conference: &Conference) -> RepoResult<bool> {
        let key = ConferenceKey::parse(id)?;
        let record_key = conference.key();
        if record_key != key {
            return Err(RepoError::KeyMismatch {
                expected: key,
                actual: record_key,
            });
        }
        conference.validate()?;

        let carousels = encode_string_list(conference.carousels.as_deref())?;
        let tags = encode_string_list(conference.tags.as_deref())?;
        let tree_items = encode_tree_items(conference.tree_items.as_deref())?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if !conference_exists(&tx, &key)? {
            tx.rollback()?;
            debug!("event=conference_update module=repo status=skipped reason=not_found");
            return Ok(false);
        }

        let changed = tx.execute(
            "UPDATE conferences
             SET
                created_time = ?3,
                display_name = ?4,
                type = ?5,
                introduction = ?6,
                start_date = ?7,
                end_date = ?8,
                organizer = ?9,
                carousels = ?10,
                carousel_height = ?11,
                tags = ?12,
                dataset_url = ?13,
                dataset_preview_url = ?14,
                preview_data = ?15,
                result_url = ?16,
                bonus = ?17,
                person_count = ?18,
                display_state = ?19,
                status = ?20,
                language = ?21,
                location = ?22,
                address = ?23,
                enable_submission = ?24,
                default_item = ?25,
                tree_items = ?26
             WHERE owner = ?1 AND name = ?2;",
            params![
                key.owner.as_str(),
                key.name.as_str(),
                conference.created_time.as_str(),
                conference.display_name.as_str(),
                conference.kind.as_str(),
                conference.introduction.as_str(),
                conference.start_date.as_str(),
                conference.end_date.as_str(),
                conference.organizer.as_str(),
                carousels,
                conference.carousel_height.as_str(),
                tags,
                conference.dataset_url.as_str(),
                conference.dataset_preview_url.as_str(),
                conference.preview_data.as_str(),
                conference.result_url.as_str(),
                conference.bonus,
                conference.person_count,
                conference.display_state.as_str(),
                conference.status.as_str(),
                conference.language.as_str(),
                conference.location.as_str(),
                conference.address.as_str(),
                bool_to_int(conference.enable_submission),
                conference.default_item.as_str(),
                tree_items,
            ],
        )?;
        tx.commit()?;

        info!(
            "event=conference_update module=repo status=ok owner={} name={} changed={}",
            key.owner, key.name, changed
        );
        Ok(changed != 0)
    }

    fn add_conference(&self, conference: &Conference) -> RepoResult<bool> {
        conference.validate()?;

        let changed = self
            .conn
            .execute(
                "INSERT INTO conferences (
                    owner,
                    name,
                    created_time,
                    display_name,
                    type,
                    introduction,
                    start_date,
                    end_date,
                    organizer,
                    carousels,
                    carousel_height,
                    tags,
                    dataset_url,
                    dataset_preview_url,
                    preview_data,
                    result_url,
                    bonus,
                    person_count,
                    display_state,
                    status,
                    language,
                    location,
                    address,
                    enable_submission,
                    default_item,
                    tree_items
                ) VALUES (
                    ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                    ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26
                );",
                params![
                    conference.owner.as_str(),
                    conference.name.as_str(),
                    conference.created_time.as_str(),
                    conference.display_name.as_str(),
                    conference.kind.as_str(),
                    conference.introduction.as_str(),
                    conference.start_date.as_str(),
                    conference.end_date.as_str(),
                    conference.organizer.as_str(),
                    encode_string_list(conference.carousels.as_deref())?,
                    conference.carousel_height.as_str(),
                    encode_string_list(conference.tags.as_deref())?,
                    conference.dataset_url.as_str(),
                    conference.dataset_preview_url.as_str(),
                    conference.preview_data.as_str(),
                    conference.result_url.as_str(),
                    conference.bonus,
                    conference.person_count,
                    conference.display_state.as_str(),
                    conference.status.as_str(),
                    conference.language.as_str(),
                    conference.location.as_str(),
                    conference.address.as_str(),
                    bool_to_int(conference.enable_submission),
                    conference.default_item.as_str(),
                    encode_tree_items(conference.tree_items.as_deref())?,
                ],
            )
            .map_err(|err| map_insert_error(err, conference.key()))?;

        info!(
            "event=conference_add module=repo status=ok owner={} name={}",
            conference.owner, conference.name
        );
        Ok(changed != 0)
    }

    fn delete_conference(&self, conference: &Conference) -> RepoResult<bool> {
        delete_by_key(self.conn, &conference.key())
    }

    fn delete_conference_by_id(&self, id: &str) -> RepoResult<bool> {
        let key = ConferenceKey::parse(id)?;
        delete_by_key(self.conn, &key)
    }
}

fn load_conference(conn: &Connection, key: &ConferenceKey) -> RepoResult<Option<Conference>> {
    let mut stmt = conn.prepare(&format!(
        "{CONFERENCE_SELECT_SQL}
         WHERE owner = ?1 AND name = ?2;"
    ))?;

    let mut rows = stmt.query(params![key.owner.as_str(), key.name.as_str()])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_conference_row(row)?));
    }

    Ok(None)
}

fn conference_exists(conn: &Connection, key: &ConferenceKey) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM conferences
            WHERE owner = ?1 AND name = ?2
        );",
        params![key.owner.as_str(), key.name.as_str()],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn delete_by_key(conn: &Connection, key: &ConferenceKey) -> RepoResult<bool> {
    let changed = conn.execute(
        "DELETE FROM conferences
         WHERE owner = ?1 AND name = ?2;",
        params![key.owner.as_str(), key.name.as_str()],
    )?;

    info!(
        "event=conference_delete module=repo status=ok owner={} name={} changed={}",
        key.owner, key.name, changed
    );
    Ok(changed != 0)
}

fn map_insert_error(err: rusqlite::Error, key: ConferenceKey) -> RepoError {
    match err {
        rusqlite::Error::SqliteFailure(ref failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            RepoError::AlreadyExists(key)
        }
        other => other.into(),
    }
}

fn parse_conference_row(row: &Row<'_>) -> RepoResult<Conference> {
    let enable_submission = match row.get::<_, i64>("enable_submission")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid enable_submission value `{other}` in conferences.enable_submission"
            )));
        }
    };

    let carousels: String = row.get("carousels")?;
    let tags: String = row.get("tags")?;
    let tree_items: String = row.get("tree_items")?;

    Ok(Conference {
        owner: row.get("owner")?,
        name: row.get("name")?,
        created_time: row.get("created_time")?,
        display_name: row.get("display_name")?,
        kind: row.get("type")?,
        introduction: row.get("introduction")?,
        start_date: row.get("start_date")?,
        end_date: row.get("end_date")?,
        organizer: row.get("organizer")?,
        carousels: decode_string_list("carousels", &carousels)?,
        carousel_height: row.get("carousel_height")?,
        tags: decode_string_list("tags", &tags)?,
        dataset_url: row.get("dataset_url")?,
        dataset_preview_url: row.get("dataset_preview_url")?,
        preview_data: row.get("preview_data")?,
        result_url: row.get("result_url")?,
        bonus: row.get("bonus")?,
        person_count: row.get("person_count")?,
        display_state: row.get("display_state")?,
        status: row.get("status")?,
        language: row.get("language")?,
        location: row.get("location")?,
        address: row.get("address")?,
        enable_submission,
        default_item: row.get("default_item")?,
        tree_items: decode_tree_items("tree_items", &tree_items)?,
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn ensure_conference_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "conferences")? {
        return Err(RepoError::MissingRequiredTable("conferences"));
    }

    for &column in CONFERENCE_COLUMNS {
        if !table_has_column(conn, "conferences", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "conferences",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
