//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep request-shaping layers decoupled from storage details.

pub mod message_service;
