//! Use-case API over the message store.
//!
//! # Responsibility
//! - Expose the five message operations as typed calls with tagged results.
//! - Own the store connection for the lifetime of the host process.
//! - Map core errors onto caller-facing failure messages.
//!
//! # Invariants
//! - Calls never panic; every failure is returned as `ApiError`.
//! - `NotFound` messages always embed the offending id.
//! - Operations run to completion one at a time; the connection is never
//!   shared across threads.

use log::{error, info};
use msgstore_core::db::{open_db, open_db_in_memory, DbError};
use msgstore_core::{
    Message, MessagePayload, MessageService, RepoError, RepoResult, SqliteMessageRepository,
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Instant;

pub type ApiResult<T> = Result<T, ApiError>;

/// Caller-facing failure variants.
///
/// Serialized externally tagged, e.g. `{"NotFound": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiError {
    /// No message exists for the requested id.
    NotFound(String),
    /// Backend failure unrelated to the request contents.
    Storage(String),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(message) => write!(f, "{message}"),
            Self::Storage(message) => write!(f, "storage failure: {message}"),
        }
    }
}

impl Error for ApiError {}

impl From<DbError> for ApiError {
    fn from(value: DbError) -> Self {
        Self::Storage(value.to_string())
    }
}

/// Ok/Err envelope handed to hosts that speak JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiResponse<T> {
    Ok(T),
    Err(ApiError),
}

impl<T> ApiResponse<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }
}

impl<T> From<ApiResult<T>> for ApiResponse<T> {
    fn from(value: ApiResult<T>) -> Self {
        match value {
            Ok(inner) => Self::Ok(inner),
            Err(err) => Self::Err(err),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    AddMessage,
    GetMessages,
    GetMessage,
    UpdateMessage,
    DeleteMessage,
}

impl Operation {
    fn event_name(self) -> &'static str {
        match self {
            Self::AddMessage => "add_message",
            Self::GetMessages => "get_messages",
            Self::GetMessage => "get_message",
            Self::UpdateMessage => "update_message",
            Self::DeleteMessage => "delete_message",
        }
    }

    fn not_found_message(self, id: &str) -> String {
        match self {
            Self::UpdateMessage => {
                format!("couldn't update a message with id={id}. message not found")
            }
            Self::DeleteMessage => {
                format!("couldn't delete a message with id={id}. message not found")
            }
            _ => format!("the message with id={id} not found"),
        }
    }
}

/// Message store handle owned by the host.
pub struct MessageApi {
    conn: Connection,
}

impl MessageApi {
    /// Opens (or creates) the store at `path`.
    pub fn open(path: impl AsRef<Path>) -> ApiResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens a throwaway in-memory store.
    pub fn open_in_memory() -> ApiResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Creates a message from `payload`. Never fails on payload contents.
    pub fn add_message(&self, payload: MessagePayload) -> ApiResult<Message> {
        self.run(Operation::AddMessage, |service| service.create(payload))
    }

    /// Returns every stored message.
    pub fn get_messages(&self) -> ApiResult<Vec<Message>> {
        self.run(Operation::GetMessages, |service| service.list_all())
    }

    pub fn get_message(&self, id: &str) -> ApiResult<Message> {
        self.run(Operation::GetMessage, |service| service.get_by_id(id))
    }

    pub fn update_message(&self, id: &str, payload: MessagePayload) -> ApiResult<Message> {
        self.run(Operation::UpdateMessage, |service| {
            service.update(id, payload)
        })
    }

    /// Removes a message, returning the removed record.
    pub fn delete_message(&self, id: &str) -> ApiResult<Message> {
        self.run(Operation::DeleteMessage, |service| service.delete_by_id(id))
    }

    fn run<T>(
        &self,
        operation: Operation,
        f: impl FnOnce(&MessageService<SqliteMessageRepository<'_>>) -> RepoResult<T>,
    ) -> ApiResult<T> {
        let started_at = Instant::now();
        let service = MessageService::new(SqliteMessageRepository::new(&self.conn));

        match f(&service) {
            Ok(value) => {
                info!(
                    "event={} module=api status=ok duration_ms={}",
                    operation.event_name(),
                    started_at.elapsed().as_millis()
                );
                Ok(value)
            }
            Err(RepoError::NotFound(id)) => {
                info!(
                    "event={} module=api status=error duration_ms={} error_code=not_found",
                    operation.event_name(),
                    started_at.elapsed().as_millis()
                );
                Err(ApiError::NotFound(operation.not_found_message(&id)))
            }
            Err(err) => {
                error!(
                    "event={} module=api status=error duration_ms={} error_code=storage_failed error={}",
                    operation.event_name(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(ApiError::Storage(err.to_string()))
            }
        }
    }
}
