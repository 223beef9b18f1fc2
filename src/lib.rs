//! JS Garden Blog & Dashboard Library
//!
//! This library provides the pieces of the JS Garden website: a markdown blog
//! rendered from local content, a view counter relay for articles, and a small
//! proxy API that reshapes listening data from the Spotify Web API for the
//! dashboard page.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the JSON API and the HTML pages
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `content` - Markdown posts, rendering and sitemap generation
//! - `error` - Error types shared by the handlers and the Spotify client
//! - `projection` - Pure mapping from upstream Spotify shapes to UI shapes
//! - `server` - HTTP server wiring and shared application state
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//! - `views` - Article view counter backends
//!
//! # Example
//!
//! ```
//! use jsgarden::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> jsgarden::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     server::serve(config).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod projection;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;
pub mod views;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the command-line glue where errors of different kinds are only
/// reported, never matched on. Request handlers use [`error::ApiError`]
/// instead so each failure maps to a well-defined HTTP status.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// info!("Loaded {} posts", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Used to provide positive feedback when operations complete successfully.
///
/// # Example
///
/// ```
/// success!("Authentication completed successfully");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only used for fatal errors during startup or in one-shot CLI commands.
/// Request handlers never call it.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues such as a post that failed to parse or an
/// upstream call that was turned into a fallback response.
///
/// # Example
///
/// ```
/// warning!("Skipping {}: {}", path.display(), err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
