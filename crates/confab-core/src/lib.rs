//! Business logic and port trait definitions for Confab.
//!
//! This crate defines the "ports" (the [`session::SessionStore`] and
//! [`engine::Generator`] traits) that the infrastructure layer implements,
//! plus the intent classifier, response engine, and chat orchestration
//! service. It depends only on `confab-types` -- never on `confab-infra`
//! or any HTTP/IO crate.

pub mod chat;
pub mod engine;
pub mod session;
