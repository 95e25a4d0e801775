//! Message repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide point and full-scan CRUD APIs over canonical `messages` storage.
//! - Keep SQL details inside core persistence boundary.
//!
//! # Invariants
//! - Read paths must reject invalid persisted state instead of masking it.
//! - Full scans are ordered by `id ASC`.

use crate::db::DbError;
use crate::model::message::{Message, MessageId, Timestamp};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const MESSAGE_COLUMNS: &str = "id, title, body, attachment_url, created_at, updated_at";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for message persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(MessageId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "message not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted message data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
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

/// Repository interface for message storage.
pub trait MessageRepository {
    fn insert_message(&self, message: &Message) -> RepoResult<()>;
    fn get_message(&self, id: &str) -> RepoResult<Option<Message>>;
    fn list_messages(&self) -> RepoResult<Vec<Message>>;
    fn update_message(&self, message: &Message) -> RepoResult<()>;
    fn delete_message(&self, id: &str) -> RepoResult<Option<Message>>;
}

/// SQLite-backed message repository.
pub struct SqliteMessageRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMessageRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl MessageRepository for SqliteMessageRepository<'_> {
    fn insert_message(&self, message: &Message) -> RepoResult<()> {
        self.conn.execute(
            &format!("INSERT INTO messages ({MESSAGE_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6);"),
            params![
                message.id.as_str(),
                message.title.as_str(),
                message.body.as_str(),
                message.attachment_url.as_str(),
                timestamp_to_db(message.created_at, "created_at")?,
                message
                    .updated_at
                    .map(|value| timestamp_to_db(value, "updated_at"))
                    .transpose()?,
            ],
        )?;

        Ok(())
    }

    fn get_message(&self, id: &str) -> RepoResult<Option<Message>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_message_row(row)?));
        }

        Ok(None)
    }

    fn list_messages(&self) -> RepoResult<Vec<Message>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut messages = Vec::new();

        while let Some(row) = rows.next()? {
            messages.push(parse_message_row(row)?);
        }

        Ok(messages)
    }

    fn update_message(&self, message: &Message) -> RepoResult<()> {
        // created_at is write-once.
        let changed = self.conn.execute(
            "UPDATE messages
             SET
                title = ?1,
                body = ?2,
                attachment_url = ?3,
                updated_at = ?4
             WHERE id = ?5;",
            params![
                message.title.as_str(),
                message.body.as_str(),
                message.attachment_url.as_str(),
                message
                    .updated_at
                    .map(|value| timestamp_to_db(value, "updated_at"))
                    .transpose()?,
                message.id.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(message.id.clone()));
        }

        Ok(())
    }

    fn delete_message(&self, id: &str) -> RepoResult<Option<Message>> {
        let mut stmt = self.conn.prepare(&format!(
            "DELETE FROM messages WHERE id = ?1 RETURNING {MESSAGE_COLUMNS};"
        ))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_message_row(row)?));
        }

        Ok(None)
    }
}

fn parse_message_row(row: &Row<'_>) -> RepoResult<Message> {
    let id: String = row.get("id")?;
    if id.is_empty() {
        return Err(RepoError::InvalidData(
            "empty id value in messages.id".to_string(),
        ));
    }

    let created_at = timestamp_from_db(row.get("created_at")?, "created_at")?;
    let updated_at = match row.get::<_, Option<i64>>("updated_at")? {
        Some(value) => Some(timestamp_from_db(value, "updated_at")?),
        None => None,
    };

    if let Some(updated_at) = updated_at {
        if updated_at < created_at {
            return Err(RepoError::InvalidData(format!(
                "messages.updated_at `{updated_at}` precedes created_at `{created_at}` for id `{id}`"
            )));
        }
    }

    Ok(Message {
        id,
        title: row.get("title")?,
        body: row.get("body")?,
        attachment_url: row.get("attachment_url")?,
        created_at,
        updated_at,
    })
}

fn timestamp_to_db(value: Timestamp, column: &str) -> RepoResult<i64> {
    i64::try_from(value).map_err(|_| {
        RepoError::InvalidData(format!(
            "timestamp `{value}` for messages.{column} exceeds storage range"
        ))
    })
}

fn timestamp_from_db(value: i64, column: &str) -> RepoResult<Timestamp> {
    Timestamp::try_from(value).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid timestamp value `{value}` in messages.{column}"
        ))
    })
}
