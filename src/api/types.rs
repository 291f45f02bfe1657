//! Shared types for the API layer.

use std::sync::Arc;

use crate::chart::ChartTheme;
use crate::core_state::CoreState;

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
    pub theme: Arc<ChartTheme>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self {
            core,
            theme: Arc::new(ChartTheme::default()),
        }
    }
}
