//! Session storage port.

pub mod store;

pub use store::SessionStore;
