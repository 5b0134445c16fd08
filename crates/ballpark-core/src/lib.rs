//! Core types and listing logic for the Ballpark admin console

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod boards;
pub mod config;
pub mod error;
pub mod listing;
pub mod pagination;
pub mod search;
pub mod selection;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use boards::BoardDirectory;
pub use config::{Config, LogFormat, LoggingConfig, ResyncPolicy};
pub use error::{Error, Result};
pub use listing::{FilterContext, ListState, LoadState, Record, filter_records};
pub use pagination::{PageGroup, Pager};
pub use search::{SearchField, SearchQuery};
pub use selection::Selection;
pub use types::{
    BoardRef, Comment, CommentKey, CommunityPost, HtmlFragment, Inquiry, PostId, QuestionNum,
    SuspensionUpdate, User, UserNumber, UserStats,
};

/// Keeps the background log writer alive; drop it to flush
pub use tracing_appender::non_blocking::WorkerGuard;

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence over the configured level. When a log file is
/// configured, events are also written to it and the returned guard must be held
/// until shutdown.
///
/// # Errors
///
/// Returns an error if the filter directive is invalid or a global subscriber is
/// already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| Error::configuration(format!("invalid log level '{}': {e}", config.level)))?,
    };

    let (file_layer, guard) = match &config.file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            let file_name = path
                .file_name()
                .ok_or_else(|| Error::configuration(format!("invalid log file: {}", path.display())))?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stderr_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Other(format!("failed to install log subscriber: {e}")))?;

    Ok(guard)
}
