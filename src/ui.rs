//! Ratatui front-end for the personal library manager. The app layer owns
//! state and key routing, the screens module renders the main-panel views,
//! and the forms module keeps the text-entry state machines self-contained.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
