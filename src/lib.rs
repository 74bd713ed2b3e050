//! Core library surface for the personal library manager TUI. The public
//! modules exposed here provide an intentionally small API so the `bin`
//! target as well as potential external tooling can reuse the same pieces.

pub mod error;
pub mod models;
pub mod stats;
pub mod store;
pub mod ui;

/// Convenience re-exports for the persistence layer, typically used by
/// `main.rs` to locate and hydrate the JSON store.
pub use store::{default_library_path, Library};

/// The error taxonomy every store operation reports through.
pub use error::LibraryError;

/// The primary domain types that other layers manipulate.
pub use models::{BookDraft, BookRecord, ReadChoice, SearchField};

/// Pure query helpers over the in-memory collection.
pub use stats::{collect_stats, search, LibraryStats};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
