//! Rendering for the three main-panel views: the full library table, the
//! search-results table, and the statistics panel. These functions only read
//! state; all mutation stays in the app layer.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;

use crate::models::{BookRecord, SearchField};
use crate::stats::{self, FrequencyTable, LibraryStats};

use super::helpers::fit_cell;

/// Width hints for the book table columns: title, author, year, genre, read
/// flag, added date.
const COLUMN_WIDTHS: [Constraint; 6] = [
    Constraint::Min(20),
    Constraint::Length(20),
    Constraint::Length(6),
    Constraint::Length(14),
    Constraint::Length(7),
    Constraint::Length(19),
];

/// A completed search: the query that produced it plus the filtered
/// sequence. Kept around so the results table can keep rendering until the
/// user clears it or runs a new search.
pub(crate) struct SearchResults {
    pub(crate) term: String,
    pub(crate) field: SearchField,
    pub(crate) hits: Vec<BookRecord>,
}

impl SearchResults {
    /// Run the query against the current collection and capture the output.
    pub(crate) fn run(books: &[BookRecord], term: &str, field: SearchField) -> Self {
        Self {
            term: term.to_string(),
            field,
            hits: stats::search(books, term, field),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.hits.len()
    }
}

/// Draw a table of book records with one row highlighted. Shared between the
/// library view and the search-results view; only the title differs.
pub(crate) fn draw_book_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    books: &[BookRecord],
    selected: usize,
) {
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);

    if books.is_empty() {
        let message = Paragraph::new("No books here yet. Press 'a' to add one.")
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(message, area);
        return;
    }

    let header = Row::new(["Title", "Author", "Year", "Genre", "Read", "Added"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = books.iter().map(|book| {
        Row::new(vec![
            Cell::from(fit_cell(&book.title, 40)),
            Cell::from(fit_cell(&book.author, 20)),
            Cell::from(book.publication_year.clone()),
            Cell::from(fit_cell(&book.genre, 14)),
            Cell::from(book.read_label()),
            Cell::from(book.added_date.clone()),
        ])
    });

    let table = Table::new(rows, COLUMN_WIDTHS)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default();
    state.select(Some(selected.min(books.len().saturating_sub(1))));
    frame.render_stateful_widget(table, area, &mut state);
}

/// Draw the statistics panel: totals on top, the three frequency tables side
/// by side underneath.
pub(crate) fn draw_stats_panel(frame: &mut Frame, area: Rect, stats: &LibraryStats) {
    let block = Block::default().title("Library Statistics").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(inner);

    let summary = Paragraph::new(vec![
        Line::from(vec![
            Span::raw("Total books: "),
            Span::styled(
                stats.total_books.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw("Read: "),
            Span::styled(
                format!("{} ({:.1}%)", stats.read_books, stats.percent_read),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
    ]);
    frame.render_widget(summary, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(chunks[1]);

    draw_frequency_column(frame, columns[0], "Genres", &stats.genres);
    draw_frequency_column(frame, columns[1], "Authors", &stats.authors);
    draw_frequency_column(frame, columns[2], "Decades", &stats.decades);
}

/// One frequency table as a bordered column, already sorted by the engine.
fn draw_frequency_column(frame: &mut Frame, area: Rect, title: &str, table: &FrequencyTable) {
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);

    if table.is_empty() {
        let message = Paragraph::new("—")
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(message, area);
        return;
    }

    let width = area.width.saturating_sub(2) as usize;
    let lines: Vec<Line> = table
        .iter()
        .map(|(key, count)| {
            let label = fit_cell(key, width.saturating_sub(5));
            Line::from(vec![
                Span::styled(format!("{count:>3}  "), Style::default().fg(Color::Cyan)),
                Span::raw(label),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
