//! Resolution of the on-disk location for the library file. Kept in its own
//! module so the store itself never hardcodes a path and tests can point it
//! anywhere.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".personal-library-manager";
/// JSON file name stored inside the application data directory.
const LIBRARY_FILE_NAME: &str = "library.json";

/// Resolve the absolute path to the library file inside the user's home.
/// The parent directory is created lazily by the store on first save.
pub fn default_library_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs
        .home_dir()
        .join(DATA_DIR_NAME)
        .join(LIBRARY_FILE_NAME))
}
