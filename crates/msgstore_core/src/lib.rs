//! Core storage logic for the message store.
//! This crate is the single source of truth for record invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::clock::{Clock, IdGenerator, SystemClock, UuidV4Generator};
pub use model::message::{Message, MessageId, MessagePayload, Timestamp};
pub use repo::message_repo::{MessageRepository, RepoError, RepoResult, SqliteMessageRepository};
pub use service::message_service::MessageService;

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
