use bookvote_dal::book::BookSummary;

use crate::view::ViewState;

pub const NO_RATING: &str = "—";

pub fn format_rating(avg_rating: Option<f64>) -> String {
    match avg_rating {
        Some(avg) => format!("{avg:.2}"),
        None => NO_RATING.to_string(),
    }
}

pub fn render_card(book: &BookSummary) -> String {
    format!(
        "#{} {}\n    rating: {} ({} votes)",
        book.id,
        book.title,
        format_rating(book.avg_rating),
        book.votes
    )
}

pub fn render_list(books: &[BookSummary]) -> String {
    if books.is_empty() {
        return "No books published yet".to_string();
    }
    books
        .iter()
        .map(render_card)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_stats(stats: &[BookSummary]) -> String {
    if stats.is_empty() {
        return "No books published yet".to_string();
    }
    let width = stats
        .iter()
        .map(|b| b.title.chars().count())
        .max()
        .unwrap_or(0)
        .max("Title".len());
    let header = format!("{:>4}  {:<width$}  {:>6}  {:>5}", "Id", "Title", "Rating", "Votes");
    let rows = stats.iter().map(|book| {
        format!(
            "{:>4}  {:<width$}  {:>6}  {:>5}",
            book.id,
            book.title,
            format_rating(book.avg_rating),
            book.votes
        )
    });
    std::iter::once(header)
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_viewer(state: &ViewState) -> String {
    match state.current() {
        Some(book) => format!(
            "[{}/{}] {}",
            state.current_index() + 1,
            state.books().len(),
            render_card(book)
        ),
        None => "No books published yet, use `p <title>` to publish one".to_string(),
    }
}

pub const VIEWER_HELP: &str = "\
Commands:
  n, next                   show next book
  r N, rate N               rate current book with N stars (1-5)
  p TITLE [--image PATH]    publish new book
  s, stats                  show leaderboard
  h, help                   this help
  q, quit                   exit viewer";

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: i64, title: &str, avg_rating: Option<f64>, votes: i64) -> BookSummary {
        BookSummary {
            id,
            title: title.to_string(),
            avg_rating,
            votes,
        }
    }

    #[test]
    fn test_format_rating() {
        assert_eq!(format_rating(None), "—");
        assert_eq!(format_rating(Some(4.0)), "4.00");
        assert_eq!(format_rating(Some(3.67)), "3.67");
    }

    #[test]
    fn test_render_list() {
        assert_eq!(render_list(&[]), "No books published yet");
        let out = render_list(&[
            book(2, "Dune", Some(4.5), 2),
            book(1, "Solaris", None, 0),
        ]);
        assert_eq!(
            out,
            "#2 Dune\n    rating: 4.50 (2 votes)\n#1 Solaris\n    rating: — (0 votes)"
        );
    }

    #[test]
    fn test_render_stats() {
        let out = render_stats(&[book(7, "Dune", Some(4.5), 2)]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Title"));
        assert!(lines[1].contains("Dune"));
        assert!(lines[1].contains("4.50"));
        assert!(lines[1].trim_end().ends_with('2'));
    }

    #[test]
    fn test_render_stats_aligned() {
        let out = render_stats(&[
            book(7, "Dune", Some(4.5), 2),
            book(12, "The Dispossessed", None, 0),
        ]);
        assert!(!out.ends_with('\n'));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        let len = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == len));
        assert!(lines[2].contains("—"));
    }

    #[test]
    fn test_render_viewer() {
        let mut state = ViewState::new();
        assert!(render_viewer(&state).starts_with("No books"));
        state.replace_books(vec![book(2, "Dune", None, 0), book(1, "Solaris", None, 0)]);
        state.advance();
        assert!(render_viewer(&state).starts_with("[2/2] #1 Solaris"));
    }
}
