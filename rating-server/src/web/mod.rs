//! Web layer for the address rating service.
//!
//! Provides a JSON endpoint that ranks candidate addresses.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
