//! Infrastructure adapters for Confab.
//!
//! Concrete implementations of the ports defined in `confab-core`:
//! [`store::MemorySessionStore`] (DashMap-backed, process-local) and
//! [`llm::OpenAiCompatGenerator`] (OpenAI-compatible chat completions
//! over HTTP).

pub mod llm;
pub mod store;
