//! Atheneum Library Catalog Browsing Client
//!
//! Client-side coordinator for browsing a library catalog (books, films,
//! magazines) against a paginated REST backend: free-text search, typed
//! filters, suggestion fetching and page-window rendering state.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod config;
pub mod debounce;
pub mod error;
pub mod models;
pub mod provider;
pub mod services;
pub mod view;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use services::BrowseSession;

/// Initialize tracing for an embedding application.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(logging: &config::LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("atheneum_client={}", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
