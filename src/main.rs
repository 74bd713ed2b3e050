//! Binary entry point that glues the JSON-backed store to the TUI. The
//! bootstrap order matters: we resolve the data path, attempt the initial
//! load, then hand both the store and any load failure to the app so the
//! error shows up in the footer instead of aborting startup with a stale
//! or unreadable file.

use personal_library_manager::{default_library_path, run_app, App, Library};

fn main() -> anyhow::Result<()> {
    let path = default_library_path()?;
    let mut library = Library::open(path);
    let load_error = library.load().err();

    let mut app = App::new(library, load_error);
    run_app(&mut app)
}
