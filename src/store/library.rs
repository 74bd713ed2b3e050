//! The library store: an ordered in-memory collection of book records plus
//! its on-disk JSON mirror. Every function here tries to encapsulate one
//! operation so the rest of the codebase can stay focused on UI state
//! management. Mutations rewrite the whole file immediately; there is no
//! batching and no atomic rename, which is acceptable for a single-user tool
//! that writes a few times per session.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::LibraryError;
use crate::models::{BookDraft, BookRecord};

/// Timestamp layout for `added_date`, matching the persisted format exactly.
const ADDED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// In-memory collection plus the path of its JSON mirror. The store is the
/// sole owner of the sequence; other layers read it through [`Library::books`]
/// and mutate it only through the operations below.
pub struct Library {
    path: PathBuf,
    books: Vec<BookRecord>,
}

impl Library {
    /// Create an empty store bound to the given file. Nothing touches the
    /// disk until [`Library::load`] or the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            books: Vec::new(),
        }
    }

    /// Borrow the full ordered collection.
    pub fn books(&self) -> &[BookRecord] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Path of the on-disk mirror, surfaced in the UI footer at startup.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reload the collection from disk, replacing the in-memory sequence
    /// wholesale on a successful parse. A missing or empty file is not an
    /// error and leaves the current sequence as it is; an unreadable or
    /// malformed file reports [`LibraryError::LoadFailed`] and also leaves
    /// the prior in-memory state untouched.
    pub fn load(&mut self) -> Result<(), LibraryError> {
        if !self.path.exists() {
            return Ok(());
        }

        let data = fs::read_to_string(&self.path).map_err(|err| LibraryError::LoadFailed {
            reason: err.to_string(),
        })?;
        if data.trim().is_empty() {
            return Ok(());
        }

        let books: Vec<BookRecord> =
            serde_json::from_str(&data).map_err(|err| LibraryError::LoadFailed {
                reason: err.to_string(),
            })?;
        self.books = books;
        Ok(())
    }

    /// Serialize the full collection to the mirror file, overwriting it.
    /// Pretty-printed with four-space indentation to match the established
    /// file format. The in-memory sequence is not rolled back on failure.
    pub fn save(&self) -> Result<(), LibraryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| LibraryError::SaveFailed {
                reason: err.to_string(),
            })?;
        }

        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.books
            .serialize(&mut serializer)
            .map_err(|err| LibraryError::SaveFailed {
                reason: err.to_string(),
            })?;

        fs::write(&self.path, buf).map_err(|err| LibraryError::SaveFailed {
            reason: err.to_string(),
        })
    }

    /// Validate a draft, stamp the creation timestamp, append the record at
    /// the tail, and persist. Rejection happens before any mutation, so a
    /// failed add leaves both memory and disk exactly as they were.
    pub fn add(&mut self, draft: BookDraft) -> Result<&BookRecord, LibraryError> {
        validate_draft(&draft)?;

        let record = BookRecord {
            title: draft.title,
            author: draft.author,
            publication_year: draft.publication_year,
            genre: draft.genre,
            read_status: draft.read_status,
            added_date: Local::now().format(ADDED_DATE_FORMAT).to_string(),
        };
        self.books.push(record);
        self.save()?;
        Ok(self.books.last().expect("record was just pushed"))
    }

    /// Delete the record at the given zero-based position and persist. An
    /// out-of-range index reports [`LibraryError::IndexOutOfRange`] without
    /// touching anything; the caller decides how loudly to surface it.
    pub fn remove(&mut self, index: usize) -> Result<BookRecord, LibraryError> {
        if index >= self.books.len() {
            return Err(LibraryError::IndexOutOfRange {
                index,
                len: self.books.len(),
            });
        }

        let removed = self.books.remove(index);
        self.save()?;
        Ok(removed)
    }
}

/// Entry-time checks: the four text fields must be non-blank and the year
/// must be a digit string. Deliberately not a calendar-year check; "0042"
/// passes, matching the established file contents.
fn validate_draft(draft: &BookDraft) -> Result<(), LibraryError> {
    let reject = |reason: &str| {
        Err(LibraryError::ValidationFailed {
            reason: reason.to_string(),
        })
    };

    if draft.title.trim().is_empty() {
        return reject("Title is required.");
    }
    if draft.author.trim().is_empty() {
        return reject("Author is required.");
    }
    let year = draft.publication_year.trim();
    if year.is_empty() || !year.chars().all(|ch| ch.is_ascii_digit()) {
        return reject("Publication year must be a number.");
    }
    if draft.genre.trim().is_empty() {
        return reject("Genre is required.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn draft(title: &str, author: &str, year: &str, genre: &str, read: bool) -> BookDraft {
        BookDraft {
            title: title.to_string(),
            author: author.to_string(),
            publication_year: year.to_string(),
            genre: genre.to_string(),
            read_status: read,
        }
    }

    #[test]
    fn add_then_reload_round_trips_all_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("library.json");

        let mut library = Library::open(&path);
        library
            .add(draft("The Hobbit", "Tolkien", "1937", "Fantasy", true))
            .unwrap();
        library
            .add(draft("Dune", "Herbert", "1965", "Sci-Fi", false))
            .unwrap();
        library
            .add(draft("Neuromancer", "Gibson", "1984", "Sci-Fi", true))
            .unwrap();

        let mut reloaded = Library::open(&path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.books(), library.books());
        assert_eq!(reloaded.len(), 3);
        assert!(reloaded.books()[0].read_status);
        assert!(!reloaded.books()[1].read_status);
    }

    #[test]
    fn remove_deletes_exactly_one_position_and_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("library.json");

        let mut library = Library::open(&path);
        for (title, year) in [("A", "1990"), ("B", "1991"), ("C", "1992")] {
            library
                .add(draft(title, "Someone", year, "Fiction", false))
                .unwrap();
        }

        let removed = library.remove(1).unwrap();
        assert_eq!(removed.title, "B");

        let mut reloaded = Library::open(&path);
        reloaded.load().unwrap();
        let titles: Vec<&str> = reloaded.books().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[test]
    fn remove_out_of_range_reports_and_changes_nothing() {
        let dir = tempdir().unwrap();
        let mut library = Library::open(dir.path().join("library.json"));
        library
            .add(draft("Only", "One", "2000", "Fiction", false))
            .unwrap();

        let err = library.remove(5).unwrap_err();
        assert!(matches!(
            err,
            LibraryError::IndexOutOfRange { index: 5, len: 1 }
        ));
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn load_keeps_prior_state_when_file_is_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("library.json");

        let mut library = Library::open(&path);
        library
            .add(draft("Kept", "Author", "2001", "Fiction", false))
            .unwrap();

        fs::write(&path, "{ not json").unwrap();
        let err = library.load().unwrap_err();
        assert!(matches!(err, LibraryError::LoadFailed { .. }));
        assert_eq!(library.len(), 1);
        assert_eq!(library.books()[0].title, "Kept");
    }

    #[test]
    fn load_of_missing_or_blank_file_is_a_quiet_no_op() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("library.json");

        let mut library = Library::open(&path);
        library.load().unwrap();
        assert!(library.is_empty());

        fs::write(&path, "   \n").unwrap();
        library.load().unwrap();
        assert!(library.is_empty());
    }

    #[test]
    fn save_writes_four_space_indented_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("library.json");

        let mut library = Library::open(&path);
        library
            .add(draft("Indent", "Check", "2010", "Fiction", true))
            .unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\n    {"));
        assert!(written.contains("\n        \"title\": \"Indent\""));
        assert!(written.contains("\"read_status\": true"));
    }

    #[test]
    fn validation_rejects_blank_fields_and_non_digit_years() {
        let dir = tempdir().unwrap();
        let mut library = Library::open(dir.path().join("library.json"));

        let cases = [
            draft("", "Author", "2000", "Fiction", false),
            draft("Title", "", "2000", "Fiction", false),
            draft("Title", "Author", "19x9", "Fiction", false),
            draft("Title", "Author", "", "Fiction", false),
            draft("Title", "Author", "2000", "", false),
        ];
        for case in cases {
            let err = library.add(case).unwrap_err();
            assert!(matches!(err, LibraryError::ValidationFailed { .. }));
        }
        assert!(library.is_empty());
    }
}
