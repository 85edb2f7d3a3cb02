//! The in-memory catalog and its lending rules. All state lives in a plain
//! `Vec` owned by [`DigitalLibrary`]; callers construct one and pass it where
//! it is needed rather than reaching for shared global state.

use std::fmt;

use tracing::{debug, info, warn};

use crate::errors::{LibraryError, LibraryResult};
use crate::models::Book;

/// Result of a return request. Returning never fails the caller: handing a
/// book back to the desk succeeds whether or not our records thought it was
/// out, and an unknown ISBN is reported as an outcome instead of an error.
// TODO: fold the NotFound case into LibraryError once the catalog screen can
// surface failed returns separately from successful ones.
#[derive(Debug, Clone, PartialEq)]
pub enum ReturnOutcome {
    /// The book is on the shelf again. `was_lent` records whether this
    /// return actually changed anything, so the caller can phrase its
    /// confirmation accordingly.
    Returned { title: String, was_lent: bool },
    /// No catalog entry carries this ISBN.
    NotFound { isbn: String },
}

impl fmt::Display for ReturnOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnOutcome::Returned {
                title,
                was_lent: true,
            } => write!(f, "'{title}' is back on the shelf."),
            ReturnOutcome::Returned {
                title,
                was_lent: false,
            } => write!(f, "'{title}' was already on the shelf."),
            ReturnOutcome::NotFound { isbn } => {
                write!(f, "No book with ISBN {isbn} in the catalog.")
            }
        }
    }
}

/// The catalog itself. Insertion order is preserved, and every view handed
/// out (full, available-only, by-author) walks the books in that order.
#[derive(Debug, Default)]
pub struct DigitalLibrary {
    books: Vec<Book>,
}

impl DigitalLibrary {
    pub fn new() -> Self {
        Self { books: Vec::new() }
    }

    /// Add a book to the catalog. The ISBN is the lookup key for lending
    /// and returning, so a second entry with the same ISBN is rejected and
    /// the catalog is left untouched.
    pub fn add(&mut self, book: Book) -> LibraryResult<()> {
        if self.books.iter().any(|existing| existing.isbn == book.isbn) {
            return Err(LibraryError::DuplicateIsbn(book.isbn));
        }
        info!(isbn = %book.isbn, title = %book.title, "added book to catalog");
        self.books.push(book);
        Ok(())
    }

    /// Lend out the book with the given ISBN. Fails if the ISBN is unknown
    /// or the book is already out; on success the book is marked unavailable
    /// and a reference to it is handed back so the caller can name it.
    pub fn lend_book(&mut self, isbn: &str) -> LibraryResult<&Book> {
        let book = self
            .books
            .iter_mut()
            .find(|book| book.isbn == isbn)
            .ok_or_else(|| LibraryError::NotFound(isbn.to_string()))?;
        if !book.is_available {
            return Err(LibraryError::NotAvailable {
                title: book.title.clone(),
            });
        }
        book.is_available = false;
        debug!(isbn, title = %book.title, "lent book");
        Ok(&*book)
    }

    /// Hand a book back. Always produces an outcome rather than an error:
    /// returning an already-shelved book is a harmless no-op, and an unknown
    /// ISBN is reported through [`ReturnOutcome::NotFound`].
    pub fn return_book(&mut self, isbn: &str) -> ReturnOutcome {
        let book = self.books.iter_mut().find(|book| book.isbn == isbn);
        if let Some(book) = book {
            let was_lent = !book.is_available;
            book.is_available = true;
            debug!(isbn, title = %book.title, was_lent, "returned book");
            ReturnOutcome::Returned {
                title: book.title.clone(),
                was_lent,
            }
        } else {
            warn!(isbn, "return requested for unknown ISBN");
            ReturnOutcome::NotFound {
                isbn: isbn.to_string(),
            }
        }
    }

    /// Every book in the catalog, lent or not, in insertion order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// The books currently on the shelf, in insertion order.
    pub fn available_books(&self) -> impl Iterator<Item = &Book> {
        self.books.iter().filter(|book| book.is_available)
    }

    /// The books whose author matches `author` exactly (case-sensitive),
    /// in insertion order. Availability is not considered here; callers
    /// that want shelf stock chain [`Book::is_available`] on top.
    pub fn books_by_author<'a>(
        &'a self,
        author: &'a str,
    ) -> impl Iterator<Item = &'a Book> + 'a {
        self.books.iter().filter(move |book| book.author == author)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_library() -> DigitalLibrary {
        let mut library = DigitalLibrary::new();
        library
            .add(Book::new("Python Fundamentals", "Ali", "111111"))
            .unwrap();
        library
            .add(Book::new("Object-Oriented Programming", "Shehroz", "222222"))
            .unwrap();
        library
            .add(Book::new("Data Science Essentials", "Ali", "333333"))
            .unwrap();
        library
            .add(Book::ebook("Machine Learning Guide", "Shehroz", "444444", 10.0).unwrap())
            .unwrap();
        library
    }

    #[test]
    fn new_library_is_empty() {
        let library = DigitalLibrary::new();
        assert!(library.books().is_empty());
        assert_eq!(library.available_books().count(), 0);
    }

    #[test]
    fn added_books_are_listed_in_insertion_order() {
        let library = seeded_library();
        let isbns: Vec<&str> = library.books().iter().map(|b| b.isbn.as_str()).collect();
        assert_eq!(isbns, ["111111", "222222", "333333", "444444"]);
    }

    #[test]
    fn duplicate_isbn_is_rejected_and_catalog_unchanged() {
        let mut library = seeded_library();
        let err = library
            .add(Book::new("Different Title", "Someone Else", "111111"))
            .unwrap_err();
        assert_eq!(err, LibraryError::DuplicateIsbn("111111".to_string()));
        assert_eq!(library.books().len(), 4);
        assert_eq!(library.books()[0].title, "Python Fundamentals");
    }

    #[test]
    fn lending_marks_the_book_unavailable() {
        let mut library = seeded_library();
        let lent = library.lend_book("111111").unwrap();
        assert_eq!(lent.title, "Python Fundamentals");
        assert!(!lent.is_available);
        assert!(library
            .available_books()
            .all(|book| book.isbn != "111111"));
    }

    #[test]
    fn lending_a_lent_book_fails_by_title() {
        let mut library = seeded_library();
        library.lend_book("222222").unwrap();
        let err = library.lend_book("222222").unwrap_err();
        assert_eq!(
            err,
            LibraryError::NotAvailable {
                title: "Object-Oriented Programming".to_string()
            }
        );
    }

    #[test]
    fn lending_an_unknown_isbn_fails() {
        let mut library = seeded_library();
        let err = library.lend_book("999999").unwrap_err();
        assert_eq!(err, LibraryError::NotFound("999999".to_string()));
    }

    #[test]
    fn returning_a_lent_book_restores_availability() {
        let mut library = seeded_library();
        library.lend_book("333333").unwrap();
        let outcome = library.return_book("333333");
        assert_eq!(
            outcome,
            ReturnOutcome::Returned {
                title: "Data Science Essentials".to_string(),
                was_lent: true,
            }
        );
        assert!(library
            .available_books()
            .any(|book| book.isbn == "333333"));
    }

    #[test]
    fn returning_a_shelved_book_is_a_noop() {
        let mut library = seeded_library();
        let outcome = library.return_book("111111");
        assert_eq!(
            outcome,
            ReturnOutcome::Returned {
                title: "Python Fundamentals".to_string(),
                was_lent: false,
            }
        );
        assert!(library.books()[0].is_available);
    }

    #[test]
    fn lend_then_return_round_trip_leaves_the_book_unchanged() {
        let mut library = seeded_library();
        library.lend_book("111111").unwrap();
        library.return_book("111111");
        // Full equality against a fresh copy proves nothing but the
        // availability flag was ever touched.
        assert_eq!(
            library.books()[0],
            Book::new("Python Fundamentals", "Ali", "111111")
        );
    }

    #[test]
    fn returning_an_unknown_isbn_reports_not_found() {
        let mut library = seeded_library();
        let outcome = library.return_book("999999");
        assert_eq!(
            outcome,
            ReturnOutcome::NotFound {
                isbn: "999999".to_string()
            }
        );
    }

    #[test]
    fn author_filter_matches_exactly_in_insertion_order() {
        let library = seeded_library();
        let titles: Vec<&str> = library
            .books_by_author("Ali")
            .map(|book| book.title.as_str())
            .collect();
        assert_eq!(titles, ["Python Fundamentals", "Data Science Essentials"]);
        assert_eq!(library.books_by_author("ali").count(), 0);
        assert_eq!(library.books_by_author("Nobody").count(), 0);
    }

    #[test]
    fn author_filter_includes_lent_books() {
        let mut library = seeded_library();
        library.lend_book("111111").unwrap();
        assert_eq!(library.books_by_author("Ali").count(), 2);
        assert_eq!(
            library
                .books_by_author("Ali")
                .filter(|book| book.is_available)
                .count(),
            1
        );
    }

    #[test]
    fn available_books_excludes_lent_copies() {
        let mut library = seeded_library();
        library.lend_book("444444").unwrap();
        let available: Vec<&str> = library
            .available_books()
            .map(|book| book.isbn.as_str())
            .collect();
        assert_eq!(available, ["111111", "222222", "333333"]);
    }
}
