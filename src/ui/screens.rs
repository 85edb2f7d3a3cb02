use crate::library::DigitalLibrary;
use crate::models::Book;

/// Which slice of the catalog the table shows.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum CatalogView {
    /// Only books currently on the shelf. This is the default view.
    Available,
    /// Every catalogued book, including the ones that are lent out.
    Everything,
}

/// Backing state for the catalog table. The screen holds a row snapshot so
/// rendering never touches the library; `refresh` rebuilds the snapshot after
/// every mutation and whenever the view or the author filter changes.
pub(crate) struct CatalogScreen {
    pub(crate) rows: Vec<Book>,
    pub(crate) view: CatalogView,
    pub(crate) author_filter: Option<String>,
    pub(crate) selected: usize,
}

impl CatalogScreen {
    pub(crate) fn new(library: &DigitalLibrary) -> Self {
        let mut screen = Self {
            rows: Vec::new(),
            view: CatalogView::Available,
            author_filter: None,
            selected: 0,
        };
        screen.refresh(library);
        screen
    }

    /// Rebuild the visible rows from the library. The available view drops
    /// lent books entirely; the author filter narrows whichever view is
    /// active to that author's books.
    pub(crate) fn refresh(&mut self, library: &DigitalLibrary) {
        self.rows = match (&self.author_filter, self.view) {
            (None, CatalogView::Available) => library.available_books().cloned().collect(),
            (None, CatalogView::Everything) => library.books().to_vec(),
            (Some(author), CatalogView::Available) => library
                .books_by_author(author)
                .filter(|book| book.is_available)
                .cloned()
                .collect(),
            (Some(author), CatalogView::Everything) => {
                library.books_by_author(author).cloned().collect()
            }
        };
        self.ensure_in_bounds();
    }

    /// Flip between the available-only and full-catalog views and report the
    /// new view so the caller can phrase a status message.
    pub(crate) fn toggle_view(&mut self, library: &DigitalLibrary) -> CatalogView {
        self.view = match self.view {
            CatalogView::Available => CatalogView::Everything,
            CatalogView::Everything => CatalogView::Available,
        };
        self.refresh(library);
        self.view
    }

    pub(crate) fn set_author_filter(&mut self, filter: Option<String>, library: &DigitalLibrary) {
        self.author_filter = filter;
        self.refresh(library);
    }

    pub(crate) fn has_filter(&self) -> bool {
        self.author_filter.is_some()
    }

    pub(crate) fn current_book(&self) -> Option<&Book> {
        self.rows.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.rows.is_empty() {
            return;
        }
        let len = self.rows.len() as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        if !self.rows.is_empty() {
            self.selected = 0;
        }
    }

    pub(crate) fn select_last(&mut self) {
        if !self.rows.is_empty() {
            self.selected = self.rows.len() - 1;
        }
    }

    fn ensure_in_bounds(&mut self) {
        if self.rows.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.rows.len() {
            self.selected = self.rows.len() - 1;
        }
    }
}
