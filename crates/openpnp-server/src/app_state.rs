//! Shared application state for the PnP server.
//!
//! Holds the config and the dispatcher; both are fixed at startup and shared
//! read-only by every exchange.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::dispatch::{Dispatcher, WorkHandler};
use crate::services::InventoryHandler;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    dispatcher: Arc<Dispatcher>,
}

struct AppStateInner {
    cfg: ServerConfig,
}

impl AppState {
    /// Build state around an application-supplied handler.
    pub fn new(cfg: ServerConfig, handler: Arc<dyn WorkHandler>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { cfg }),
            dispatcher: Arc::new(Dispatcher::new(handler)),
        }
    }

    /// Build state serving the built-in inventory handler from `cfg.inventory`.
    pub fn with_inventory(cfg: ServerConfig) -> Self {
        let handler = InventoryHandler::from_config(&cfg.inventory);
        tracing::info!(
            device_info = %cfg.inventory.device_info,
            "serving built-in inventory handler"
        );
        Self::new(cfg, Arc::new(handler))
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::clone(&self.dispatcher)
    }
}
