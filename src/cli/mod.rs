//! # CLI Module
//!
//! Command-line entry points for JS Garden. Besides `serve`, every command
//! is a one-shot helper for the site owner: obtaining the Spotify refresh
//! token once, checking what the dashboard endpoints would return, and
//! listing the posts found in the content directory.
//!
//! ## Commands
//!
//! - [`serve`] - Runs the HTTP server
//! - [`auth`] - Authorization-code flow that prints a refresh token
//! - [`now_playing`] - Prints the currently playing track
//! - [`top`] - Prints the top tracks or artists as a table
//! - [`profile`] - Prints the owner's Spotify profile
//! - [`posts`] - Lists posts with optional tag filtering
//!
//! ## Usage Patterns
//!
//! ```bash
//! jsgarden auth                 # once, then put the token in .env
//! jsgarden now-playing          # check the credentials work
//! jsgarden top artists --json   # same payload the API serves
//! jsgarden posts --tag vue      # what the blog index will show
//! jsgarden serve
//! ```
//!
//! ## Error Reporting
//!
//! Commands report fatal problems with the crate's `error!` macro, which
//! prints the message and exits with status 1. The server itself never
//! exits on request failures.

mod auth;
mod posts;
mod spotify;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{config::Config, error, server};

pub use auth::auth;
pub use posts::posts;
pub use spotify::{TopKind, now_playing, profile, top};

pub async fn serve() {
    let config = load_config();
    if let Err(e) = server::serve(config).await {
        error!("Server stopped: {}", e);
    }
}

/// Builds the process configuration or exits with the list of problems.
fn load_config() -> Config {
    match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!(
            "Cannot load configuration: {}\nRun `jsgarden auth` to obtain a refresh token.",
            e
        ),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
