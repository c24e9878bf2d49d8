use bookvote_dal::book::BookSummary;

/// State of the interactive viewer: books shown one at a time
#[derive(Debug, Default, Clone)]
pub struct ViewState {
    books: Vec<BookSummary>,
    current_index: usize,
    stats: Vec<BookSummary>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn books(&self) -> &[BookSummary] {
        &self.books
    }

    pub fn stats(&self) -> &[BookSummary] {
        &self.stats
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Replaces book list, returns true if anything visible changed.
    /// Cursor stays at its position, wrapped to new length.
    pub fn replace_books(&mut self, books: Vec<BookSummary>) -> bool {
        let changed = books != self.books;
        self.books = books;
        self.current_index = if self.books.is_empty() {
            0
        } else {
            self.current_index % self.books.len()
        };
        changed
    }

    pub fn replace_stats(&mut self, stats: Vec<BookSummary>) -> bool {
        let changed = stats != self.stats;
        self.stats = stats;
        changed
    }

    /// Moves to next book, wrapping after the last one
    pub fn advance(&mut self) -> Option<&BookSummary> {
        if self.books.is_empty() {
            return None;
        }
        self.current_index = (self.current_index + 1) % self.books.len();
        self.current()
    }

    pub fn current(&self) -> Option<&BookSummary> {
        self.books.get(self.current_index)
    }

    /// Moves cursor to book with given id, if present
    pub fn focus(&mut self, id: i64) -> bool {
        match self.books.iter().position(|b| b.id == id) {
            Some(idx) => {
                self.current_index = idx;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: i64, votes: i64) -> BookSummary {
        BookSummary {
            id,
            title: format!("Book {id}"),
            avg_rating: if votes > 0 { Some(3.0) } else { None },
            votes,
        }
    }

    #[test]
    fn test_empty_state() {
        let mut state = ViewState::new();
        assert!(state.current().is_none());
        assert!(state.advance().is_none());
        assert_eq!(state.current_index(), 0);
        assert!(!state.replace_books(vec![]));
    }

    #[test]
    fn test_advance_cycles() {
        let mut state = ViewState::new();
        assert!(state.replace_books(vec![book(3, 0), book(2, 0), book(1, 0)]));
        assert_eq!(state.current().unwrap().id, 3);
        let seen: Vec<i64> = (0..4).map(|_| state.advance().unwrap().id).collect();
        assert_eq!(seen, [2, 1, 3, 2]);
    }

    #[test]
    fn test_replace_keeps_cursor() {
        let mut state = ViewState::new();
        state.replace_books(vec![book(3, 0), book(2, 0), book(1, 0)]);
        state.advance();
        state.advance();
        assert_eq!(state.current_index(), 2);

        // same content is no change
        assert!(!state.replace_books(vec![book(3, 0), book(2, 0), book(1, 0)]));
        assert_eq!(state.current_index(), 2);

        // vote count changed
        assert!(state.replace_books(vec![book(3, 0), book(2, 1), book(1, 0)]));
        assert_eq!(state.current().unwrap().id, 1);

        // list shrank
        assert!(state.replace_books(vec![book(3, 0), book(2, 1)]));
        assert_eq!(state.current_index(), 0);

        assert!(state.replace_books(vec![]));
        assert!(state.current().is_none());
    }

    #[test]
    fn test_focus_and_stats() {
        let mut state = ViewState::new();
        state.replace_books(vec![book(3, 0), book(2, 0), book(1, 0)]);
        assert!(state.focus(1));
        assert_eq!(state.current_index(), 2);
        assert!(!state.focus(42));
        assert_eq!(state.current_index(), 2);

        assert!(state.replace_stats(vec![book(2, 1)]));
        assert!(!state.replace_stats(vec![book(2, 1)]));
        assert_eq!(state.stats().len(), 1);
    }
}
