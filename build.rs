//! Build script for moodplay.
//!
//! Copies the `.env.example` configuration template into the user's local
//! data directory so a ready-to-edit template sits next to the place where
//! [`moodplay::config::load_env`] looks for the real `.env` file.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` from the crate root to the local data directory.
///
/// Destination per platform:
/// - Linux: `~/.local/share/moodplay/.env.example`
/// - macOS: `~/Library/Application Support/moodplay/.env.example`
/// - Windows: `%LOCALAPPDATA%/moodplay/.env.example`
///
/// A missing template only produces a cargo warning. Failing to create the
/// directory or write the file fails the build.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("moodplay");
    fs::create_dir_all(&out_dir)?;

    if env_example_path.is_file() {
        let contents = fs::read_to_string(&env_example_path)?;
        fs::write(out_dir.join(".env.example"), contents)?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
