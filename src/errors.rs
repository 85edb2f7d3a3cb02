//! Typed errors for the catalog domain. The display strings double as the
//! user-facing messages shown in the TUI footer, so they are written as full
//! sentences rather than terse debug text.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LibraryError {
    /// An eBook was constructed with a size that is not a finite, positive
    /// number of megabytes. The offending value is kept for logging even
    /// though the message stays generic.
    #[error("Download size must be a positive number.")]
    InvalidDownloadSize(f64),

    /// ISBNs act as the catalog's unique key, so a second copy under the
    /// same ISBN is refused at add time.
    #[error("A book with ISBN {0} is already in the catalog.")]
    DuplicateIsbn(String),

    /// Lending asked for an ISBN that no catalogued item carries.
    #[error("No book with ISBN {0} in the catalog.")]
    NotFound(String),

    /// Lending asked for an item whose only copy is already out.
    #[error("'{title}' is already lent out.")]
    NotAvailable { title: String },
}

pub type LibraryResult<T> = Result<T, LibraryError>;
