//! Binary entry point that glues the in-memory catalog to the TUI.
//! Summarizing the bootstrapping pipeline here keeps the intent obvious when
//! revisiting the code: we route diagnostics to a log file, seed the starter
//! catalog, and drive the Ratatui event loop until the user exits.
use anyhow::Result;
use tracing::info;

use digital_library_manager::{logging, run_app, App, Book, DigitalLibrary};

/// Initialize logging, seed the catalog, and launch the Ratatui event loop.
///
/// Returning a `Result` bubbles up fatal initialization problems (for example
/// an unwritable home directory) to the terminal instead of crashing silently.
fn main() -> Result<()> {
    let log_path = logging::init()?;
    info!(path = %log_path.display(), "logging initialized");

    let mut library = DigitalLibrary::new();
    seed_catalog(&mut library)?;

    let mut app = App::new(library);
    run_app(&mut app)
}

/// Load the starter catalog. Nothing persists between runs, so every session
/// begins from the same four titles.
fn seed_catalog(library: &mut DigitalLibrary) -> Result<()> {
    library.add(Book::new("Python Fundamentals", "Ali", "111111"))?;
    library.add(Book::new("Object-Oriented Programming", "Shehroz", "222222"))?;
    library.add(Book::new("Data Science Essentials", "Ali", "333333"))?;
    library.add(Book::ebook("Machine Learning Guide", "Shehroz", "444444", 10.0)?)?;
    Ok(())
}
