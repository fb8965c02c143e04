//! # CLI Module
//!
//! Command implementations behind the `moodplay` binary.
//!
//! - [`serve`] - runs the web UI
//! - [`auth_url`] - prints the Spotify authorization URL and opens it in a
//!   browser, for setups where the web UI is not reachable from the phone yet
//!
//! Both commands take a [`crate::config::Config`] read by the binary, which
//! also decides how failures end the program.

mod auth;
mod serve;

pub use auth::auth_url;
pub use serve::serve;
