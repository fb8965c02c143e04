//! # Spotify Integration Module
//!
//! Everything that talks to Spotify lives here: the accounts service for the
//! authorization code flow and the Web API for search, playlists and playback.
//!
//! ```text
//! Web UI handlers (api)
//!          ↓
//! Spotify Integration Layer
//!     ├── auth       authorize URL, redirect parsing, code exchange, refresh
//!     ├── client     bearer-authenticated requests with retry handling
//!     ├── search     criteria → track (search or recommendations)
//!     ├── playlists  playlists and their tracks, read-only
//!     └── player     devices and "start playback"
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## API Coverage
//!
//! - `POST /api/token` - code exchange and refresh
//! - `GET /me` - token validation
//! - `GET /search` - track search
//! - `GET /recommendations` - criteria based recommendations
//! - `GET /me/playlists`, `GET /playlists/{id}/tracks` - dice roll source
//! - `GET /me/player/devices`, `PUT /me/player/play` - playback
//!
//! ## Error Types
//!
//! All functions return [`crate::error::Result`]. Spotify's own error messages
//! are carried through unchanged so the UI can show them to the user.

pub mod auth;
pub mod client;
pub mod player;
pub mod playlists;
pub mod search;

pub use client::SpotifyClient;
