//! Core library surface for the Digital Library Manager TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as potential external tooling can reuse the same pieces.
//! Keeping the glue logic documented makes it easy to recall why each re-export
//! exists when revisiting the project.
pub mod errors;
pub mod library;
pub mod logging;
pub mod models;
pub mod ui;

/// The catalog error type and its `Result` alias, shared by every layer.
pub use errors::{LibraryError, LibraryResult};

/// The in-memory catalog together with the outcome its return path reports.
pub use library::{DigitalLibrary, ReturnOutcome};

/// The two primary domain types that other layers manipulate.
pub use models::{Book, BookKind};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
