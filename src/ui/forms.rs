//! Text-entry state machines for the sidebar forms. Each form owns its raw
//! field buffers, the currently focused field, and an optional inline error,
//! leaving the key routing and rendering glue to the app layer.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{BookDraft, ReadChoice, SearchField};

/// Internal representation of the "add a book" form fields. Values stay as
/// raw strings until submission; the store does the real validation so the
/// form only filters obviously wrong keystrokes (letters in the year field).
#[derive(Default, Clone)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) publication_year: String,
    pub(crate) genre: String,
    pub(crate) read_status: ReadChoice,
    pub(crate) active: BookField,
    pub(crate) error: Option<String>,
}

/// Fields available within the book form, in tab order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum BookField {
    #[default]
    Title,
    Author,
    Year,
    Genre,
    ReadStatus,
}

impl BookField {
    const ORDER: [BookField; 5] = [
        BookField::Title,
        BookField::Author,
        BookField::Year,
        BookField::Genre,
        BookField::ReadStatus,
    ];

    /// Label shown before the field value, also used for cursor math.
    pub(crate) fn label(self) -> &'static str {
        match self {
            BookField::Title => "Title",
            BookField::Author => "Author",
            BookField::Year => "Publication Year",
            BookField::Genre => "Genre",
            BookField::ReadStatus => "Read Status",
        }
    }

    /// Zero-based row of the field inside the form popup.
    pub(crate) fn row(self) -> u16 {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0) as u16
    }
}

impl BookForm {
    /// Move focus to the next field in tab order, wrapping around.
    pub(crate) fn next_field(&mut self) {
        let idx = BookField::ORDER.iter().position(|f| *f == self.active).unwrap_or(0);
        self.active = BookField::ORDER[(idx + 1) % BookField::ORDER.len()];
    }

    /// Move focus to the previous field, wrapping around.
    pub(crate) fn prev_field(&mut self) {
        let idx = BookField::ORDER.iter().position(|f| *f == self.active).unwrap_or(0);
        self.active = BookField::ORDER[(idx + BookField::ORDER.len() - 1) % BookField::ORDER.len()];
    }

    /// Append a character to the active field, filtering disallowed input.
    /// On the read-status field a space (or y/n) toggles the choice instead
    /// of editing text.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        match self.active {
            BookField::Year => {
                if ch.is_ascii_digit() {
                    self.publication_year.push(ch);
                    true
                } else {
                    false
                }
            }
            BookField::Title | BookField::Author | BookField::Genre => {
                if !ch.is_control() {
                    self.buffer_mut().push(ch);
                    true
                } else {
                    false
                }
            }
            BookField::ReadStatus => match ch {
                ' ' => {
                    self.read_status = self.read_status.toggle();
                    true
                }
                'y' | 'Y' => {
                    self.read_status = ReadChoice::Yes;
                    true
                }
                'n' | 'N' => {
                    self.read_status = ReadChoice::No;
                    true
                }
                _ => false,
            },
        }
    }

    /// Remove the last character from the active text field.
    pub(crate) fn backspace(&mut self) {
        if self.active != BookField::ReadStatus {
            self.buffer_mut().pop();
        }
    }

    fn buffer_mut(&mut self) -> &mut String {
        match self.active {
            BookField::Title => &mut self.title,
            BookField::Author => &mut self.author,
            BookField::Year => &mut self.publication_year,
            BookField::Genre => &mut self.genre,
            BookField::ReadStatus => unreachable!("read status has no text buffer"),
        }
    }

    /// Build the draft handed to the store on submission. Whitespace is
    /// trimmed here; content validation is the store's job.
    pub(crate) fn to_draft(&self) -> BookDraft {
        BookDraft {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            publication_year: self.publication_year.trim().to_string(),
            genre: self.genre.trim().to_string(),
            read_status: self.read_status.as_bool(),
        }
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: BookField) -> Line<'static> {
        let is_active = self.active == field;
        let value = match field {
            BookField::Title => self.title.clone(),
            BookField::Author => self.author.clone(),
            BookField::Year => self.publication_year.clone(),
            BookField::Genre => self.genre.clone(),
            BookField::ReadStatus => self.read_status.to_string(),
        };

        let display = if value.is_empty() {
            "<required>".to_string()
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    /// Character count of the requested field, used for cursor placement.
    pub(crate) fn value_len(&self, field: BookField) -> usize {
        match field {
            BookField::Title => self.title.chars().count(),
            BookField::Author => self.author.chars().count(),
            BookField::Year => self.publication_year.chars().count(),
            BookField::Genre => self.genre.chars().count(),
            BookField::ReadStatus => self.read_status.to_string().chars().count(),
        }
    }
}

/// State of the search form: one term buffer plus the three-way field
/// selector.
#[derive(Default, Clone)]
pub(crate) struct SearchForm {
    pub(crate) term: String,
    pub(crate) field: SearchField,
}

impl SearchForm {
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.term.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.term.pop();
    }

    /// Advance the field selector (bound to Tab).
    pub(crate) fn cycle_field(&mut self) {
        self.field = self.field.cycle();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_field_accepts_digits_only() {
        let mut form = BookForm::default();
        form.active = BookField::Year;
        assert!(form.push_char('1'));
        assert!(form.push_char('9'));
        assert!(!form.push_char('x'));
        assert!(!form.push_char(' '));
        assert_eq!(form.publication_year, "19");
    }

    #[test]
    fn read_status_field_toggles_instead_of_typing() {
        let mut form = BookForm::default();
        form.active = BookField::ReadStatus;
        assert_eq!(form.read_status, ReadChoice::No);
        assert!(form.push_char(' '));
        assert_eq!(form.read_status, ReadChoice::Yes);
        assert!(form.push_char('n'));
        assert_eq!(form.read_status, ReadChoice::No);
        assert!(!form.push_char('q'));
    }

    #[test]
    fn tab_order_wraps_in_both_directions() {
        let mut form = BookForm::default();
        for _ in 0..BookField::ORDER.len() {
            form.next_field();
        }
        assert_eq!(form.active, BookField::Title);
        form.prev_field();
        assert_eq!(form.active, BookField::ReadStatus);
    }

    #[test]
    fn draft_is_trimmed_and_read_choice_coerced() {
        let form = BookForm {
            title: "  The Hobbit ".to_string(),
            author: "Tolkien".to_string(),
            publication_year: "1937".to_string(),
            genre: " Fantasy".to_string(),
            read_status: ReadChoice::Yes,
            ..BookForm::default()
        };
        let draft = form.to_draft();
        assert_eq!(draft.title, "The Hobbit");
        assert_eq!(draft.genre, "Fantasy");
        assert!(draft.read_status);
    }
}
