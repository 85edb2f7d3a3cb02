//! Domain models for the book catalog. These types stay light-weight data
//! holders that get passed throughout the TUI, so the library and
//! presentation layers can focus on lending rules and rendering.

use std::fmt;

use crate::errors::{LibraryError, LibraryResult};

/// Distinguishes the two catalogued item flavors. Carrying the download size
/// inside the variant keeps impossible states unrepresentable: a print book
/// simply has no size to ask about, and no caller ever needs to inspect the
/// variant directly because [`Book::display_row`] covers presentation.
#[derive(Debug, Clone, PartialEq)]
pub enum BookKind {
    /// A physical copy on the shelf.
    Print,
    /// A downloadable edition with its size in megabytes.
    EBook { download_size: f64 },
}

#[derive(Debug, Clone, PartialEq)]
/// A single catalogued item. Books are never deleted in-session; the only
/// mutation after construction is the availability flag flipping when a copy
/// is lent or returned.
pub struct Book {
    /// Title displayed in the catalog table and in status messages.
    pub title: String,
    /// Author field used both for display and for the author filter.
    pub author: String,
    /// Unique textual identifier. Lookups (lend/return) go through this key,
    /// so the library rejects duplicates at add time.
    pub isbn: String,
    /// Print or eBook, including the eBook download size.
    pub kind: BookKind,
    /// Whether the copy is on the shelf right now. New books start available.
    pub is_available: bool,
}

impl Book {
    /// Construct a print book. Print books carry no size, so there is
    /// nothing to validate and construction cannot fail.
    pub fn new(title: &str, author: &str, isbn: &str) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            kind: BookKind::Print,
            is_available: true,
        }
    }

    /// Construct an eBook. The download size must be a finite, positive
    /// number of megabytes; anything else is rejected before a `Book` ever
    /// exists, so the rest of the code never has to re-check it.
    pub fn ebook(
        title: &str,
        author: &str,
        isbn: &str,
        download_size: f64,
    ) -> LibraryResult<Self> {
        if !download_size.is_finite() || download_size <= 0.0 {
            return Err(LibraryError::InvalidDownloadSize(download_size));
        }
        Ok(Self {
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            kind: BookKind::EBook { download_size },
            is_available: true,
        })
    }

    /// Type label shown in the catalog's "Type" column.
    pub fn kind_label(&self) -> &'static str {
        match self.kind {
            BookKind::Print => "Book",
            BookKind::EBook { .. } => "eBook",
        }
    }

    /// Size cell for the catalog table: the megabyte count for eBooks, a
    /// dash placeholder for print books.
    pub fn size_label(&self) -> String {
        match self.kind {
            BookKind::Print => "-".to_string(),
            BookKind::EBook { download_size } => download_size.to_string(),
        }
    }

    /// The five columns every catalog view renders, in table order:
    /// title, author, ISBN, type label, size-or-placeholder. Presentation
    /// code consumes this instead of matching on [`BookKind`] itself.
    pub fn display_row(&self) -> [String; 5] {
        [
            self.title.clone(),
            self.author.clone(),
            self.isbn.clone(),
            self.kind_label().to_string(),
            self.size_label(),
        ]
    }
}

impl fmt::Display for Book {
    /// Write the title to any formatter so the type plays nicely with log
    /// events and status messages that only care about naming the book.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_books_start_available() {
        let book = Book::new("Python Fundamentals", "Ali", "111111");
        assert!(book.is_available);
        assert_eq!(book.kind, BookKind::Print);
    }

    #[test]
    fn ebook_rejects_zero_size() {
        let err = Book::ebook("Machine Learning Guide", "Shehroz", "444444", 0.0).unwrap_err();
        assert_eq!(err, LibraryError::InvalidDownloadSize(0.0));
    }

    #[test]
    fn ebook_rejects_negative_size() {
        assert!(Book::ebook("Machine Learning Guide", "Shehroz", "444444", -2.5).is_err());
    }

    #[test]
    fn ebook_rejects_non_finite_size() {
        assert!(Book::ebook("Machine Learning Guide", "Shehroz", "444444", f64::NAN).is_err());
        assert!(Book::ebook("Machine Learning Guide", "Shehroz", "444444", f64::INFINITY).is_err());
    }

    #[test]
    fn ebook_accepts_positive_size() {
        let book = Book::ebook("Machine Learning Guide", "Shehroz", "444444", 10.0).unwrap();
        assert_eq!(book.kind, BookKind::EBook { download_size: 10.0 });
        assert!(book.is_available);
    }

    #[test]
    fn display_row_uses_placeholder_for_print_size() {
        let book = Book::new("Data Science Essentials", "Ali", "333333");
        let row = book.display_row();
        assert_eq!(row[3], "Book");
        assert_eq!(row[4], "-");
    }

    #[test]
    fn display_row_formats_ebook_size() {
        let book = Book::ebook("Machine Learning Guide", "Shehroz", "444444", 10.0).unwrap();
        let row = book.display_row();
        assert_eq!(row[3], "eBook");
        assert_eq!(row[4], "10");

        let fractional = Book::ebook("Rust in Small Bites", "Ali", "555555", 2.5).unwrap();
        assert_eq!(fractional.size_label(), "2.5");
    }
}
