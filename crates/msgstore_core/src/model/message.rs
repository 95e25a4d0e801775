//! Message domain model.
//!
//! # Responsibility
//! - Define the canonical stored record and the caller-supplied payload.
//! - Provide lifecycle helpers for create/update stamping.
//!
//! # Invariants
//! - `id` is stable and never reused for another message.
//! - `created_at` is assigned once and never rewritten.
//! - `updated_at` is `None` until the first update, then `>= created_at`.

use serde::{Deserialize, Serialize};

/// Opaque identifier assigned by the store on create.
pub type MessageId = String;

/// Unix epoch nanoseconds.
pub type Timestamp = u64;

/// Caller-supplied fields accepted on create and update.
///
/// No field is validated; empty strings are stored as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    pub title: String,
    pub body: String,
    /// Serialized as `attachmentURL` to match external schema naming.
    #[serde(rename = "attachmentURL")]
    pub attachment_url: String,
}

impl MessagePayload {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        attachment_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            attachment_url: attachment_url.into(),
        }
    }
}

/// Canonical stored message record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub title: String,
    pub body: String,
    #[serde(rename = "attachmentURL")]
    pub attachment_url: String,
    pub created_at: Timestamp,
    /// Absent until the first successful update.
    pub updated_at: Option<Timestamp>,
}

impl Message {
    /// Builds a fresh record from a payload.
    ///
    /// # Invariants
    /// - `updated_at` starts as `None`.
    pub fn from_payload(
        id: impl Into<MessageId>,
        created_at: Timestamp,
        payload: MessagePayload,
    ) -> Self {
        Self {
            id: id.into(),
            title: payload.title,
            body: payload.body,
            attachment_url: payload.attachment_url,
            created_at,
            updated_at: None,
        }
    }

    /// Replaces mutable fields and stamps `updated_at`.
    ///
    /// `now` is clamped to `created_at`.
    pub fn apply_update(&mut self, payload: MessagePayload, now: Timestamp) {
        self.title = payload.title;
        self.body = payload.body;
        self.attachment_url = payload.attachment_url;
        self.updated_at = Some(now.max(self.created_at));
    }
}
