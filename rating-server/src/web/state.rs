//! Application state for the web layer.

use std::sync::Arc;

use crate::rating::RatingEngine;

/// Shared application state.
pub struct AppState<P> {
    /// Rating engine with its provider
    pub engine: Arc<RatingEngine<P>>,
}

impl<P> AppState<P> {
    /// Create a new app state.
    pub fn new(engine: RatingEngine<P>) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

// Manual impl: the provider itself need not be Clone
impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}
