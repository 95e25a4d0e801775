//! Message use-case service.
//!
//! # Responsibility
//! - Provide the create/list/get/update/delete entry points of the store.
//! - Assign identity and timestamps; delegate persistence to the repository.
//!
//! # Invariants
//! - `id` and `created_at` are assigned here exactly once per record.
//! - Update never touches `id` or `created_at` and always stamps `updated_at`.
//! - Payloads are stored as given; empty strings are valid.

use crate::model::clock::{Clock, IdGenerator, SystemClock, UuidV4Generator};
use crate::model::message::{Message, MessagePayload};
use crate::repo::message_repo::{MessageRepository, RepoError, RepoResult};
use log::debug;

/// Use-case service wrapper for message CRUD operations.
pub struct MessageService<R, C = SystemClock, G = UuidV4Generator>
where
    R: MessageRepository,
    C: Clock,
    G: IdGenerator,
{
    repo: R,
    clock: C,
    ids: G,
}

impl<R: MessageRepository> MessageService<R> {
    /// Creates a service with the system clock and v4 UUID ids.
    pub fn new(repo: R) -> Self {
        Self::with_sources(repo, SystemClock, UuidV4Generator)
    }
}

impl<R, C, G> MessageService<R, C, G>
where
    R: MessageRepository,
    C: Clock,
    G: IdGenerator,
{
    /// Creates a service with caller-provided time and id sources.
    pub fn with_sources(repo: R, clock: C, ids: G) -> Self {
        Self { repo, clock, ids }
    }

    /// Stores a new message built from `payload`.
    ///
    /// # Contract
    /// - Fresh id from the id source, `created_at = now`, `updated_at = None`.
    /// - Returns the stored record.
    pub fn create(&self, payload: MessagePayload) -> RepoResult<Message> {
        let message = Message::from_payload(self.ids.next_id(), self.clock.now(), payload);
        self.repo.insert_message(&message)?;
        debug!("event=message_create module=service status=ok id={}", message.id);
        Ok(message)
    }

    /// Returns every stored message, ordered by id.
    pub fn list_all(&self) -> RepoResult<Vec<Message>> {
        self.repo.list_messages()
    }

    /// Returns one message by id, or `NotFound`.
    pub fn get_by_id(&self, id: &str) -> RepoResult<Message> {
        self.repo
            .get_message(id)?
            .ok_or_else(|| RepoError::NotFound(id.to_string()))
    }

    /// Replaces the mutable fields of an existing message.
    ///
    /// # Contract
    /// - `NotFound` when the id is absent; nothing is written.
    /// - Keeps `id` and `created_at`, sets `updated_at >= created_at`.
    pub fn update(&self, id: &str, payload: MessagePayload) -> RepoResult<Message> {
        let mut message = self.get_by_id(id)?;
        message.apply_update(payload, self.clock.now());
        self.repo.update_message(&message)?;
        debug!("event=message_update module=service status=ok id={}", message.id);
        Ok(message)
    }

    /// Removes a message and returns its last stored value, or `NotFound`.
    pub fn delete_by_id(&self, id: &str) -> RepoResult<Message> {
        let removed = self
            .repo
            .delete_message(id)?
            .ok_or_else(|| RepoError::NotFound(id.to_string()))?;
        debug!("event=message_delete module=service status=ok id={}", removed.id);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::MessageService;
    use crate::model::clock::{Clock, IdGenerator};
    use crate::model::message::{Message, MessagePayload, Timestamp};
    use crate::repo::message_repo::{MessageRepository, RepoError, RepoResult};
    use std::cell::{Cell, RefCell};
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct MemoryRepo {
        rows: RefCell<BTreeMap<String, Message>>,
    }

    impl MessageRepository for MemoryRepo {
        fn insert_message(&self, message: &Message) -> RepoResult<()> {
            self.rows
                .borrow_mut()
                .insert(message.id.clone(), message.clone());
            Ok(())
        }

        fn get_message(&self, id: &str) -> RepoResult<Option<Message>> {
            Ok(self.rows.borrow().get(id).cloned())
        }

        fn list_messages(&self) -> RepoResult<Vec<Message>> {
            Ok(self.rows.borrow().values().cloned().collect())
        }

        fn update_message(&self, message: &Message) -> RepoResult<()> {
            match self.rows.borrow_mut().get_mut(&message.id) {
                Some(slot) => {
                    *slot = message.clone();
                    Ok(())
                }
                None => Err(RepoError::NotFound(message.id.clone())),
            }
        }

        fn delete_message(&self, id: &str) -> RepoResult<Option<Message>> {
            Ok(self.rows.borrow_mut().remove(id))
        }
    }

    struct StepClock {
        next: Cell<Timestamp>,
        step: Timestamp,
    }

    impl Clock for StepClock {
        fn now(&self) -> Timestamp {
            let value = self.next.get();
            self.next.set(value + self.step);
            value
        }
    }

    struct CountingIds {
        counter: Cell<u32>,
    }

    impl IdGenerator for CountingIds {
        fn next_id(&self) -> String {
            let value = self.counter.get() + 1;
            self.counter.set(value);
            format!("msg-{value:04}")
        }
    }

    fn service(start: Timestamp) -> MessageService<MemoryRepo, StepClock, CountingIds> {
        MessageService::with_sources(
            MemoryRepo::default(),
            StepClock {
                next: Cell::new(start),
                step: 10,
            },
            CountingIds {
                counter: Cell::new(0),
            },
        )
    }

    #[test]
    fn create_assigns_id_and_created_at_from_sources() {
        let service = service(1_000);

        let created = service
            .create(MessagePayload::new("t", "b", "u"))
            .unwrap();

        assert_eq!(created.id, "msg-0001");
        assert_eq!(created.created_at, 1_000);
        assert_eq!(created.updated_at, None);
        assert_eq!(service.get_by_id("msg-0001").unwrap(), created);
    }

    #[test]
    fn update_stamps_updated_at_from_clock() {
        let service = service(1_000);
        let created = service
            .create(MessagePayload::new("t", "b", "u"))
            .unwrap();

        let updated = service
            .update(&created.id, MessagePayload::new("t2", "b", "u"))
            .unwrap();

        assert_eq!(updated.title, "t2");
        assert_eq!(updated.created_at, 1_000);
        assert_eq!(updated.updated_at, Some(1_010));
    }

    #[test]
    fn update_of_missing_id_does_not_consume_clock() {
        let service = service(1_000);

        let err = service
            .update("ghost", MessagePayload::default())
            .unwrap_err();

        assert!(matches!(err, RepoError::NotFound(id) if id == "ghost"));
        assert_eq!(service.clock.next.get(), 1_000);
    }

    #[test]
    fn delete_returns_removed_record_then_not_found() {
        let service = service(0);
        let created = service.create(MessagePayload::default()).unwrap();

        assert_eq!(service.delete_by_id(&created.id).unwrap(), created);
        let err = service.delete_by_id(&created.id).unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
