//! Persistence module split across logical submodules.

mod library;
mod paths;

pub use library::Library;
pub use paths::default_library_path;
