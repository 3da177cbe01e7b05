//! Shared types for the API layer.

use std::sync::Arc;

use crate::portal::PortalState;

// ═══════════════════════════════════════════════════════════
// API context — shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes. Wraps `PortalState` so every
/// handler clones cheaply into its task.
#[derive(Clone)]
pub struct ApiContext {
    pub portal: Arc<PortalState>,
}

impl ApiContext {
    pub fn new(portal: Arc<PortalState>) -> Self {
        Self { portal }
    }
}
