//! Central application state and event handling. The `App` owns the library
//! store, the current view and selection, any open modal form, and the footer
//! status line. Key routing swaps the modal mode in and out with
//! `mem::replace` so each handler can consume its form by value and decide
//! whether the popup stays open.

use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::error::LibraryError;
use crate::stats;
use crate::store::Library;

use super::forms::{BookField, BookForm, SearchForm};
use super::helpers::{centered_rect, surface_error};
use super::screens::{draw_book_table, draw_stats_panel, SearchResults};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;

/// Which dataset the main panel is rendering. Keeping this explicit makes it
/// easy to reason about which rendering path runs and what keyboard
/// shortcuts should do.
#[derive(Copy, Clone, PartialEq, Eq)]
enum View {
    Library,
    SearchResults,
    Stats,
}

/// Modal modes layered over the current view.
enum Mode {
    Normal,
    AddingBook(BookForm),
    Searching(SearchForm),
    ConfirmRemove(ConfirmRemove),
}

/// Pending removal awaiting a yes/no answer.
struct ConfirmRemove {
    index: usize,
    title: String,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
#[derive(Copy, Clone)]
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    library: Library,
    view: View,
    selected: usize,
    search: Option<SearchResults>,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    /// Build the initial state: library view, nothing selected beyond the
    /// first row, no search, no modal. A startup load failure arrives here
    /// so it lands in the footer instead of killing the process.
    pub fn new(library: Library, load_error: Option<LibraryError>) -> Self {
        let status = match load_error {
            Some(err) => StatusMessage {
                text: surface_error(&err),
                kind: StatusKind::Error,
            },
            None => StatusMessage {
                text: format!(
                    "Loaded {} book(s) from {}.",
                    library.len(),
                    library.path().display()
                ),
                kind: StatusKind::Info,
            },
        };

        Self {
            library,
            view: View::Library,
            selected: 0,
            search: None,
            mode: Mode::Normal,
            status: Some(status),
        }
    }

    /// Route one key press. Returns `true` when the app should exit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::AddingBook(form) => self.handle_add_book(code, form),
            Mode::Searching(form) => self.handle_search(code, form),
            Mode::ConfirmRemove(confirm) => self.handle_confirm_remove(code, confirm),
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') => {
                *exit = true;
            }
            KeyCode::Esc => {
                if self.view == View::Library {
                    *exit = true;
                } else {
                    self.show_library();
                }
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-5),
            KeyCode::PageDown => self.move_selection(5),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.current_rows().saturating_sub(1),
            KeyCode::Char('a') => {
                self.clear_status();
                return Mode::AddingBook(BookForm::default());
            }
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.clear_status();
                return Mode::Searching(SearchForm::default());
            }
            KeyCode::Char('t') => {
                self.clear_status();
                self.view = View::Stats;
            }
            KeyCode::Char('l') => {
                self.clear_status();
                self.show_library();
            }
            KeyCode::Char('r') => self.reload(),
            KeyCode::Char('d') | KeyCode::Char('-') => match self.view {
                View::Library => {
                    if let Some(book) = self.library.books().get(self.selected) {
                        let confirm = ConfirmRemove {
                            index: self.selected,
                            title: book.title.clone(),
                        };
                        self.clear_status();
                        return Mode::ConfirmRemove(confirm);
                    }
                    self.set_status("No book selected to remove.", StatusKind::Error);
                }
                View::SearchResults | View::Stats => {
                    self.set_status(
                        "Switch to the library view ('l') to remove books.",
                        StatusKind::Error,
                    );
                }
            },
            _ => {}
        }
        Mode::Normal
    }

    fn handle_add_book(&mut self, code: KeyCode, mut form: BookForm) -> Mode {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Add book cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                let outcome = self
                    .library
                    .add(form.to_draft())
                    .map(|record| record.title.clone());
                match outcome {
                    Ok(title) => {
                        self.set_status(format!("Added '{title}'."), StatusKind::Info);
                        keep_open = false;
                    }
                    Err(err) => {
                        let message = surface_error(&err);
                        form.error = Some(message.clone());
                        self.set_status(message, StatusKind::Error);
                    }
                }
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Mode::AddingBook(form)
        } else {
            Mode::Normal
        }
    }

    fn handle_search(&mut self, code: KeyCode, mut form: SearchForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Search cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab | KeyCode::BackTab => form.cycle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                let term = form.term.trim().to_string();
                let results = SearchResults::run(self.library.books(), &term, form.field);
                self.set_status(
                    format!(
                        "{} match(es) for '{}' in {}.",
                        results.len(),
                        term,
                        form.field
                    ),
                    StatusKind::Info,
                );
                self.search = Some(results);
                self.view = View::SearchResults;
                self.selected = 0;
                return Mode::Normal;
            }
            KeyCode::Char(ch) => {
                form.push_char(ch);
            }
            _ => {}
        }
        Mode::Searching(form)
    }

    fn handle_confirm_remove(&mut self, code: KeyCode, confirm: ConfirmRemove) -> Mode {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                match self.library.remove(confirm.index) {
                    Ok(removed) => {
                        self.set_status(format!("Removed '{}'.", removed.title), StatusKind::Info);
                        self.selected = self.selected.min(self.library.len().saturating_sub(1));
                    }
                    // Out-of-range or a failed save both land here; neither
                    // is fatal, the footer explains what happened.
                    Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
                }
                Mode::Normal
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.set_status("Removal cancelled.", StatusKind::Info);
                Mode::Normal
            }
            _ => Mode::ConfirmRemove(confirm),
        }
    }

    /// Re-read the persisted file. On success the in-memory sequence is
    /// replaced wholesale and any stale search results are dropped; on
    /// failure the prior state stays visible with an error in the footer.
    fn reload(&mut self) {
        match self.library.load() {
            Ok(()) => {
                self.search = None;
                self.view = View::Library;
                self.selected = self.selected.min(self.library.len().saturating_sub(1));
                self.set_status(
                    format!("Library reloaded ({} book(s)).", self.library.len()),
                    StatusKind::Info,
                );
            }
            Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
        }
    }

    /// Return to the full-collection view and drop any search results.
    fn show_library(&mut self) {
        self.view = View::Library;
        self.search = None;
        self.selected = self.selected.min(self.library.len().saturating_sub(1));
    }

    fn move_selection(&mut self, delta: isize) {
        let rows = self.current_rows();
        if rows == 0 {
            self.selected = 0;
            return;
        }
        let current = self.selected as isize;
        let next = (current + delta).clamp(0, rows as isize - 1);
        self.selected = next as usize;
    }

    /// Row count of whichever table the main panel is showing.
    fn current_rows(&self) -> usize {
        match self.view {
            View::Library => self.library.len(),
            View::SearchResults => self.search.as_ref().map_or(0, SearchResults::len),
            View::Stats => 0,
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match self.view {
            View::Library => {
                let title = format!("Library Collection ({} book(s))", self.library.len());
                draw_book_table(frame, content_area, &title, self.library.books(), self.selected);
            }
            View::SearchResults => match &self.search {
                Some(results) => {
                    let title = format!(
                        "Search Results — '{}' in {} ({} match(es))",
                        results.term,
                        results.field,
                        results.len()
                    );
                    draw_book_table(frame, content_area, &title, &results.hits, self.selected);
                }
                None => {
                    let title = format!("Library Collection ({} book(s))", self.library.len());
                    draw_book_table(
                        frame,
                        content_area,
                        &title,
                        self.library.books(),
                        self.selected,
                    );
                }
            },
            View::Stats => {
                let stats = stats::collect_stats(self.library.books());
                draw_stats_panel(frame, content_area, &stats);
            }
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingBook(form) => self.draw_book_form(frame, area, form),
            Mode::Searching(form) => self.draw_search_bar(frame, area, form),
            Mode::ConfirmRemove(confirm) => self.draw_confirm_remove(frame, area, confirm),
            Mode::Normal => {}
        }
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph =
            Paragraph::new(vec![status_line, self.footer_instructions()]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let keys: &[(&str, &str)] = match (&self.mode, self.view) {
            (Mode::AddingBook(_), _) => &[
                ("[Tab]", " Next Field   "),
                ("[Space]", " Toggle Read   "),
                ("[Enter]", " Save   "),
                ("[Esc]", " Cancel"),
            ],
            (Mode::Searching(_), _) => &[
                ("[Tab]", " Search Field   "),
                ("[Enter]", " Search   "),
                ("[Esc]", " Cancel"),
            ],
            (Mode::ConfirmRemove(_), _) => &[("[Y]", " Remove   "), ("[N]", " Keep")],
            (Mode::Normal, View::Library) => &[
                ("[a]", " Add   "),
                ("[/]", " Search   "),
                ("[t]", " Stats   "),
                ("[d]", " Remove   "),
                ("[r]", " Reload   "),
                ("[↑↓]", " Select   "),
                ("[q]", " Quit"),
            ],
            (Mode::Normal, View::SearchResults) => &[
                ("[Esc]", " Clear Results   "),
                ("[/]", " New Search   "),
                ("[t]", " Stats   "),
                ("[q]", " Quit"),
            ],
            (Mode::Normal, View::Stats) => &[
                ("[l]", " Library   "),
                ("[/]", " Search   "),
                ("[q]", " Quit"),
            ],
        };

        let mut spans = Vec::with_capacity(keys.len() * 2);
        for (key, action) in keys {
            spans.push(Span::styled(key.to_string(), key_style));
            spans.push(Span::raw(action.to_string()));
        }
        Line::from(spans)
    }

    fn draw_book_form(&self, frame: &mut Frame, area: Rect, form: &BookForm) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add a Book").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line(BookField::Title),
            form.build_line(BookField::Author),
            form.build_line(BookField::Year),
            form.build_line(BookField::Genre),
            form.build_line(BookField::ReadStatus),
            Line::from(""),
        ];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save, Tab to switch fields, Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let prefix = form.active.label().len() as u16 + 2;
        let cursor_x = inner.x + prefix + form.value_len(form.active) as u16;
        let cursor_y = inner.y + form.active.row();
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect, form: &SearchForm) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Search by {}", form.field));
        let prefix = format!("{}: ", form.field);
        let paragraph = Paragraph::new(Span::raw(format!("{prefix}{}", form.term)))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let cursor_x = inner.x + prefix.chars().count() as u16 + form.term.chars().count() as u16;
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn draw_confirm_remove(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmRemove) {
        let popup_area = centered_rect(50, 25, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Remove Book").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!("Remove '{}' from the library?", confirm.title)),
            Line::from(""),
            Line::from(vec![
                Span::styled("[Y]", Style::default().fg(Color::Red)),
                Span::raw(" Remove   "),
                Span::styled("[N]", Style::default().fg(Color::Green)),
                Span::raw(" Keep"),
            ]),
        ];
        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}
