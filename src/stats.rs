//! Query and statistics engine: pure functions over the book sequence. None
//! of this mutates the store; the UI calls in, renders the result, and throws
//! it away on the next event.

use crate::models::{BookRecord, SearchField};

/// Case-insensitive substring search against one field, producing a new
/// filtered sequence, keeping collection order.
pub fn search(books: &[BookRecord], term: &str, field: SearchField) -> Vec<BookRecord> {
    let needle = term.to_lowercase();
    books
        .iter()
        .filter(|book| {
            let haystack = match field {
                SearchField::Title => &book.title,
                SearchField::Author => &book.author,
                SearchField::Genre => &book.genre,
            };
            haystack.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// A histogram key with its count. Tables are kept as ordered pairs rather
/// than a map so the descending-frequency ordering survives rendering.
pub type FrequencyTable = Vec<(String, usize)>;

/// Aggregates over the whole collection, computed in one pass per table.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryStats {
    pub total_books: usize,
    pub read_books: usize,
    /// Percentage of the collection marked read; 0.0 for an empty library
    /// rather than a division fault.
    pub percent_read: f64,
    pub genres: FrequencyTable,
    pub authors: FrequencyTable,
    pub decades: FrequencyTable,
}

/// Compute totals, the read ratio, and the per-genre, per-author, and
/// per-decade frequency tables.
pub fn collect_stats(books: &[BookRecord]) -> LibraryStats {
    let total_books = books.len();
    let read_books = books.iter().filter(|book| book.read_status).count();
    let percent_read = if total_books > 0 {
        read_books as f64 / total_books as f64 * 100.0
    } else {
        0.0
    };

    LibraryStats {
        total_books,
        read_books,
        percent_read,
        genres: frequency_table(books, |book| book.genre.clone()),
        authors: frequency_table(books, |book| book.author.clone()),
        decades: frequency_table(books, |book| decade_bucket(&book.publication_year)),
    }
}

/// Statistics grouping key derived from the year text: the first three
/// characters with "0s" appended. This is a textual operation, carried over
/// from the established behavior: "1999" buckets into "1990s", while a
/// malformed "205" buckets into "2050s" rather than being rejected.
pub fn decade_bucket(publication_year: &str) -> String {
    let prefix: String = publication_year.chars().take(3).collect();
    format!("{prefix}0s")
}

/// Count occurrences of a key in insertion order, then sort by descending
/// count. The sort is stable, so ties keep the order in which each key first
/// appeared in the collection.
fn frequency_table(books: &[BookRecord], key: impl Fn(&BookRecord) -> String) -> FrequencyTable {
    let mut table: FrequencyTable = Vec::new();
    for book in books {
        let value = key(book);
        match table.iter_mut().find(|(existing, _)| *existing == value) {
            Some((_, count)) => *count += 1,
            None => table.push((value, 1)),
        }
    }
    table.sort_by(|a, b| b.1.cmp(&a.1));
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookRecord;

    fn book(title: &str, author: &str, year: &str, genre: &str, read: bool) -> BookRecord {
        BookRecord {
            title: title.to_string(),
            author: author.to_string(),
            publication_year: year.to_string(),
            genre: genre.to_string(),
            read_status: read,
            added_date: "2024-01-01 12:00:00".to_string(),
        }
    }

    fn sample() -> Vec<BookRecord> {
        vec![
            book("The Hobbit", "J.R.R. Tolkien", "1937", "Fantasy", true),
            book("Dune", "Frank Herbert", "1965", "Sci-Fi", false),
            book("Neuromancer", "William Gibson", "1984", "Sci-Fi", true),
        ]
    }

    #[test]
    fn search_is_case_insensitive_on_the_selected_field() {
        let books = sample();
        let hits = search(&books, "tolkien", SearchField::Author);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "The Hobbit");

        let hits = search(&books, "SCI", SearchField::Genre);
        assert_eq!(hits.len(), 2);

        assert!(search(&books, "tolkien", SearchField::Title).is_empty());
        assert!(search(&books, "nobody", SearchField::Author).is_empty());
    }

    #[test]
    fn search_does_not_reorder_matches() {
        let books = sample();
        let hits = search(&books, "e", SearchField::Title);
        let titles: Vec<&str> = hits.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["The Hobbit", "Dune", "Neuromancer"]);
    }

    #[test]
    fn stats_on_empty_collection_are_all_zero() {
        let stats = collect_stats(&[]);
        assert_eq!(stats.total_books, 0);
        assert_eq!(stats.read_books, 0);
        assert_eq!(stats.percent_read, 0.0);
        assert!(stats.genres.is_empty());
        assert!(stats.authors.is_empty());
        assert!(stats.decades.is_empty());
    }

    #[test]
    fn genre_histogram_counts_and_sorts_by_frequency() {
        let stats = collect_stats(&sample());
        assert_eq!(stats.total_books, 3);
        assert_eq!(stats.read_books, 2);
        assert!((stats.percent_read - 66.666).abs() < 0.01);
        assert_eq!(
            stats.genres,
            vec![("Sci-Fi".to_string(), 2), ("Fantasy".to_string(), 1)]
        );
    }

    #[test]
    fn frequency_ties_keep_first_occurrence_order() {
        let books = vec![
            book("A", "Zelazny", "1970", "Fantasy", false),
            book("B", "Asimov", "1951", "Sci-Fi", false),
            book("C", "Zelazny", "1971", "Horror", false),
            book("D", "Asimov", "1952", "Sci-Fi", false),
        ];
        let stats = collect_stats(&books);
        // Authors tie at two apiece; Zelazny appeared first.
        assert_eq!(
            stats.authors,
            vec![("Zelazny".to_string(), 2), ("Asimov".to_string(), 2)]
        );
        // Genres tie at one apiece and stay in insertion order behind Sci-Fi.
        assert_eq!(
            stats.genres,
            vec![
                ("Sci-Fi".to_string(), 2),
                ("Fantasy".to_string(), 1),
                ("Horror".to_string(), 1)
            ]
        );
    }

    #[test]
    fn decade_bucketing_truncates_the_year_text() {
        assert_eq!(decade_bucket("1999"), "1990s");
        assert_eq!(decade_bucket("1937"), "1930s");
        // Short input is truncated textually, not validated.
        assert_eq!(decade_bucket("205"), "2050s");
        assert_eq!(decade_bucket(""), "0s");

        let books = vec![
            book("A", "X", "1999", "Fiction", false),
            book("B", "Y", "205", "Fiction", false),
        ];
        let stats = collect_stats(&books);
        assert_eq!(
            stats.decades,
            vec![("1990s".to_string(), 1), ("2050s".to_string(), 1)]
        );
    }
}
