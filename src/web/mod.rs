//! Web server module
//!
//! Serves suggestions over HTTP: JSON for scripts, HTML rows for the
//! bundled search page.

mod handlers;
mod routes;
mod state;
mod templates;

pub use routes::create_router;
pub use state::AppState;
pub use templates::Templates;
