//! Domain models that mirror the persisted JSON schema and get passed
//! throughout the TUI. The intent is that these types stay light-weight data
//! holders so other layers can focus on presentation and persistence logic.
//! Keeping the commentary here means later refactors can reconstruct the
//! assumptions even if other context is lost.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One catalogued book. The field names double as the JSON keys in the
/// persisted file, so renaming anything here is a format change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Title displayed in the table and matched by title searches.
    pub title: String,
    /// Author field used both for display and filtering.
    pub author: String,
    /// Publication year kept as raw text. Entry validation only checks that
    /// it is a digit string; nothing downstream assumes it parses to a real
    /// calendar year.
    pub publication_year: String,
    /// Free-form genre label, also a search and statistics key.
    pub genre: String,
    /// Whether the user has finished the book.
    pub read_status: bool,
    /// Local timestamp (`YYYY-MM-DD HH:MM:SS`) stamped when the record was
    /// created. Immutable after that.
    pub added_date: String,
}

impl BookRecord {
    /// Short reading-state label for table cells and the stats panel.
    pub fn read_label(&self) -> &'static str {
        if self.read_status {
            "Read"
        } else {
            "Unread"
        }
    }
}

/// Caller-supplied fields for the add operation, before validation and the
/// `added_date` stamp. Built by the add form; the store turns it into a
/// [`BookRecord`] or rejects it wholesale.
#[derive(Debug, Clone, Default)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub publication_year: String,
    pub genre: String,
    pub read_status: bool,
}

/// The two-valued textual choice the add form presents for read status. The
/// persisted field is a boolean; this type only exists so the form can show
/// "Yes"/"No" the way the selector reads.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ReadChoice {
    Yes,
    #[default]
    No,
}

impl ReadChoice {
    /// Flip between the two options (the form binds this to the toggle key).
    pub fn toggle(self) -> Self {
        match self {
            ReadChoice::Yes => ReadChoice::No,
            ReadChoice::No => ReadChoice::Yes,
        }
    }

    /// Coerce the textual choice to the boolean stored on the record.
    pub fn as_bool(self) -> bool {
        matches!(self, ReadChoice::Yes)
    }
}

impl fmt::Display for ReadChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadChoice::Yes => write!(f, "Yes"),
            ReadChoice::No => write!(f, "No"),
        }
    }
}

/// Which record field a search targets. Mirrors the three-way selector in
/// the search form.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    Title,
    Author,
    Genre,
}

impl SearchField {
    /// Advance to the next selector option, wrapping around.
    pub fn cycle(self) -> Self {
        match self {
            SearchField::Title => SearchField::Author,
            SearchField::Author => SearchField::Genre,
            SearchField::Genre => SearchField::Title,
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchField::Title => write!(f, "Title"),
            SearchField::Author => write!(f, "Author"),
            SearchField::Genre => write!(f, "Genre"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_choice_coerces_to_bool() {
        assert!(ReadChoice::Yes.as_bool());
        assert!(!ReadChoice::No.as_bool());
        assert_eq!(ReadChoice::No.toggle(), ReadChoice::Yes);
    }

    #[test]
    fn search_field_cycles_through_all_three() {
        let mut field = SearchField::Title;
        field = field.cycle();
        assert_eq!(field, SearchField::Author);
        field = field.cycle();
        assert_eq!(field, SearchField::Genre);
        field = field.cycle();
        assert_eq!(field, SearchField::Title);
    }
}
