//! HTTP surface: routes, token check and error rendering.

mod auth;
mod error;
mod handlers;
mod server;
mod state;

pub use auth::{AuthSecret, authorize};
pub use error::ApiError;
pub use handlers::INVALID_SYNTAX_MESSAGE;
pub use server::{REQUEST_TIMEOUT, router, serve};
pub use state::AppState;
