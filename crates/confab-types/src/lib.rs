//! Shared domain types for Confab.
//!
//! This crate contains the core domain types used across the Confab
//! backend: sessions, messages, replies, intents, and their associated
//! error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod intent;
