//! Application context shared by all request handlers.

use std::sync::Arc;

use pf_av::{MediaTool, ToolRegistry};
use pf_core::config::Config;

/// Application context shared by all request handlers (via Axum state).
///
/// This is cheaply cloneable because it only holds `Arc`s. Nothing in it is
/// mutated after startup; requests share no state.
#[derive(Clone)]
pub struct AppContext {
    /// Immutable application configuration snapshot.
    pub config: Arc<Config>,
    /// Probes and transcodes images.
    pub tool: Arc<dyn MediaTool>,
    /// External tool registry, for availability reporting.
    pub tools: Arc<ToolRegistry>,
}

impl AppContext {
    pub fn new(config: Config, tool: Arc<dyn MediaTool>, tools: Arc<ToolRegistry>) -> Self {
        Self {
            config: Arc::new(config),
            tool,
            tools,
        }
    }
}
