//! Request/response shaping for the message store.
//!
//! Hosts open one `MessageApi` at startup and route every call through it.

pub mod api;

pub use api::{ApiError, ApiResponse, ApiResult, MessageApi};
pub use msgstore_core::{Message, MessagePayload};
