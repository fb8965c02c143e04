//! moodplay library
//!
//! A small web UI that turns a mood, an energy level, a genre and a tempo into
//! a Spotify track and starts it on the user's active device. Login uses the
//! OAuth authorization code flow with a manual "paste the redirect URL" step,
//! which works on mobile browsers where the redirect cannot be captured.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the web UI
//! - `cli` - Command implementations for the binary
//! - `config` - Configuration from environment variables and `.env` files
//! - `criteria` - Song selection criteria and their mapping to Spotify queries
//! - `error` - Application error type
//! - `management` - In-memory session and token handling
//! - `pages` - Server-rendered HTML pages
//! - `server` - Router and HTTP server
//! - `spotify` - Spotify Web API and accounts service client
//! - `types` - Wire types for the Spotify API
//! - `utils` - Small helpers

pub mod api;
pub mod cli;
pub mod config;
pub mod criteria;
pub mod error;
pub mod management;
pub mod pages;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for the binary's top-level operations.
///
/// Library code returns [`error::Result`]; this boxed alias is what the CLI
/// layer uses where any error just needs to be reported.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for unrecoverable startup failures. Request handlers report errors
/// to the user through [`error::AppError`] instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
