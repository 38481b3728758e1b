//! Application state wiring the store, engine, and service together.
//!
//! `AppState` is constructed once at process start and cloned into every
//! request handler -- there are no module-level singletons, so tests can
//! build fresh instances in isolation.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use confab_core::chat::service::ChatService;
use confab_core::engine::generate::GenerateCapability;
use confab_core::engine::responder::ResponseEngine;
use confab_infra::llm::OpenAiCompatGenerator;
use confab_infra::store::MemorySessionStore;
use confab_types::config::AppConfig;

/// Concrete service type pinned to the infra implementations.
pub type ConcreteChatService = ChatService<MemorySessionStore, OpenAiCompatGenerator>;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ConcreteChatService>,
}

impl AppState {
    /// Wire the store, generator capability, and engine from config.
    ///
    /// The external capability is decided here, once: enabled only when
    /// the config says so and the API key is resolvable.
    pub fn init(config: &AppConfig) -> Self {
        let capability = match OpenAiCompatGenerator::from_config(&config.generator) {
            Some(generator) => {
                tracing::info!(
                    base_url = %config.generator.base_url,
                    model = %config.generator.model,
                    "external generator enabled"
                );
                GenerateCapability::Enabled(generator)
            }
            None => {
                tracing::info!("external generator disabled; rule-based responses only");
                GenerateCapability::Disabled
            }
        };

        let catalog = config.intents.clone().unwrap_or_default();
        let engine = ResponseEngine::new(catalog, capability, StdRng::from_os_rng());
        let chat = ChatService::new(MemorySessionStore::new(), engine);

        Self {
            chat: Arc::new(chat),
        }
    }
}
