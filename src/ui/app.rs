use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;

use crate::library::{DigitalLibrary, ReturnOutcome};

use super::forms::{BookField, BookForm};
use super::helpers::{centered_rect, surface_error};
use super::screens::{CatalogScreen, CatalogView};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Column headers for the catalog table, in display order.
const TABLE_HEADERS: [&str; 5] = ["Title", "Author", "ISBN", "Type", "Size/MB"];

/// Fine-grained input modes. The catalog table is always visible; the add
/// form and the author prompt overlay it, Vim-style, so the keyboard model
/// stays predictable.
enum Mode {
    Normal,
    AddingBook(BookForm),
    FilteringByAuthor(FilterState),
}

/// State for the author prompt. The text is only applied when the user
/// confirms with Enter; until then the table keeps its previous contents.
struct FilterState {
    query: String,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. The struct owns the
/// catalog itself along with the table state and the active mode.
pub struct App {
    library: DigitalLibrary,
    catalog: CatalogScreen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    /// Construct a new `App` around an already-populated library. The caller
    /// decides where the books come from; the UI never builds its own.
    pub fn new(library: DigitalLibrary) -> Self {
        let catalog = CatalogScreen::new(&library);
        Self {
            library,
            catalog,
            mode: Mode::Normal,
            status: None,
        }
    }

    /// Top-level key dispatcher. The design funnels every key through the
    /// active `Mode`, which returns the next mode to run. The boolean result
    /// tells the outer loop whether the user requested an exit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingBook(form) => self.handle_add_book(code, form)?,
            Mode::FilteringByAuthor(state) => self.handle_filter(code, state)?,
        };

        self.mode = mode;
        Ok(exit)
    }

    /// Handle keys while in `Mode::Normal`: table navigation plus the
    /// single-key catalog operations.
    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') => {
                *exit = true;
            }
            KeyCode::Esc => {
                // Esc peels the author filter off first; quitting takes a
                // second press.
                if self.catalog.has_filter() {
                    self.catalog.set_author_filter(None, &self.library);
                    self.set_status("Filter cleared.", StatusKind::Info);
                } else {
                    *exit = true;
                }
            }
            KeyCode::Up => self.catalog.move_selection(-1),
            KeyCode::Down => self.catalog.move_selection(1),
            KeyCode::PageUp => self.catalog.move_selection(-5),
            KeyCode::PageDown => self.catalog.move_selection(5),
            KeyCode::Home => self.catalog.select_first(),
            KeyCode::End => self.catalog.select_last(),
            KeyCode::Char('+') => {
                self.clear_status();
                return Ok(Mode::AddingBook(BookForm::default()));
            }
            KeyCode::Char('f') | KeyCode::Char('F') => {
                self.clear_status();
                return Ok(Mode::FilteringByAuthor(FilterState {
                    query: String::new(),
                }));
            }
            KeyCode::Char('v') | KeyCode::Char('V') => {
                let view = self.catalog.toggle_view(&self.library);
                let message = match view {
                    CatalogView::Available => "Showing available books.",
                    CatalogView::Everything => "Showing the whole catalog.",
                };
                self.set_status(message, StatusKind::Info);
            }
            KeyCode::Char('l') | KeyCode::Char('L') => self.lend_selected(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.return_selected(),
            _ => {}
        }
        Ok(Mode::Normal)
    }

    /// Process key presses while the "Add Book" form is active. Returns the
    /// next mode so the caller can continue driving the state machine.
    fn handle_add_book(&mut self, code: KeyCode, mut form: BookForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Add book cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_new_book(&form) {
                Ok(_) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::AddingBook(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    /// Keyboard handler for the author prompt. Enter applies the filter,
    /// Esc abandons the prompt and drops any filter already in place.
    fn handle_filter(&mut self, code: KeyCode, mut state: FilterState) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                if self.catalog.has_filter() {
                    self.catalog.set_author_filter(None, &self.library);
                    self.set_status("Filter cleared.", StatusKind::Info);
                } else {
                    self.clear_status();
                }
                Ok(Mode::Normal)
            }
            KeyCode::Enter => {
                let author = state.query.trim().to_string();
                if author.is_empty() {
                    self.set_status("Please specify an author name.", StatusKind::Error);
                    return Ok(Mode::Normal);
                }
                self.catalog
                    .set_author_filter(Some(author.clone()), &self.library);
                let count = self.catalog.rows.len();
                let plural = if count == 1 { "" } else { "s" };
                self.set_status(
                    format!("Showing {count} book{plural} by {author}."),
                    StatusKind::Info,
                );
                Ok(Mode::Normal)
            }
            KeyCode::Backspace => {
                state.query.pop();
                Ok(Mode::FilteringByAuthor(state))
            }
            KeyCode::Char(ch) => {
                if !ch.is_control() {
                    state.query.push(ch);
                }
                Ok(Mode::FilteringByAuthor(state))
            }
            _ => Ok(Mode::FilteringByAuthor(state)),
        }
    }

    /// Lend out the highlighted book. On success the snapshot is rebuilt,
    /// which drops the row from the default available-only view.
    fn lend_selected(&mut self) {
        let isbn = match self.catalog.current_book() {
            Some(book) => book.isbn.clone(),
            None => {
                self.set_status("No book selected to lend.", StatusKind::Error);
                return;
            }
        };

        match self.library.lend_book(&isbn) {
            Ok(book) => {
                let message = format!("Lent out '{}'.", book.title);
                self.catalog.refresh(&self.library);
                self.set_status(message, StatusKind::Info);
            }
            Err(err) => {
                self.set_status(err.to_string(), StatusKind::Error);
            }
        }
    }

    /// Mark the highlighted book as returned. Double returns are harmless;
    /// the only unhappy path is a stale row whose ISBN has vanished, which
    /// cannot happen while rows are rebuilt from the library itself.
    fn return_selected(&mut self) {
        let isbn = match self.catalog.current_book() {
            Some(book) => book.isbn.clone(),
            None => {
                self.set_status("No book selected to return.", StatusKind::Error);
                return;
            }
        };

        let outcome = self.library.return_book(&isbn);
        self.catalog.refresh(&self.library);
        let kind = match &outcome {
            ReturnOutcome::Returned { .. } => StatusKind::Info,
            ReturnOutcome::NotFound { .. } => StatusKind::Error,
        };
        self.set_status(outcome.to_string(), kind);
    }

    /// Validate the form, add the book, and refresh the table. The helper
    /// centralizes success messaging so calling sites stay lean.
    fn save_new_book(&mut self, form: &BookForm) -> Result<()> {
        let book = form.parse_inputs()?;
        let title = book.title.clone();
        self.library.add(book)?;
        self.catalog.refresh(&self.library);
        self.set_status(format!("Added '{title}' to the catalog."), StatusKind::Info);
        Ok(())
    }

    /// Main render routine invoked each tick by Ratatui. Splits the frame
    /// into content and footer regions, then layers the active modal on top.
    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        self.draw_catalog(frame, content_area);

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingBook(form) => self.draw_book_form(frame, area, form),
            Mode::FilteringByAuthor(state) => self.draw_filter_bar(frame, content_area, state),
            Mode::Normal => {}
        }
    }

    /// Render the catalog as a five-column table. Lent books only appear in
    /// the full view, dimmed so shelf stock stands out.
    fn draw_catalog(&self, frame: &mut Frame, area: Rect) {
        let title = self.catalog_title();

        if self.catalog.rows.is_empty() {
            let message_text = match (&self.catalog.author_filter, self.catalog.view) {
                (Some(author), _) => format!("No books by {author} to show."),
                (None, CatalogView::Available) => "No books available right now.".to_string(),
                (None, CatalogView::Everything) => {
                    "The catalog is empty. Press '+' to add a book.".to_string()
                }
            };
            let message = Paragraph::new(message_text)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(title));
            frame.render_widget(message, area);
            return;
        }

        let header =
            Row::new(TABLE_HEADERS.to_vec()).style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = self
            .catalog
            .rows
            .iter()
            .map(|book| {
                let mut row = Row::new(book.display_row().to_vec());
                if !book.is_available {
                    row = row.style(Style::default().fg(Color::DarkGray));
                }
                row
            })
            .collect();

        let widths = [
            Constraint::Percentage(34),
            Constraint::Percentage(22),
            Constraint::Percentage(16),
            Constraint::Percentage(12),
            Constraint::Percentage(16),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title))
            .row_highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut table_state = TableState::default();
        table_state.select(Some(self.catalog.selected));
        frame.render_stateful_widget(table, area, &mut table_state);
    }

    /// Table title reflecting the active view and filter.
    fn catalog_title(&self) -> String {
        let base = match self.catalog.view {
            CatalogView::Available => "Available Books",
            CatalogView::Everything => "All Books",
        };
        match &self.catalog.author_filter {
            Some(author) => format!("{base} • by {author}"),
            None => base.to_string(),
        }
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match &self.mode {
            Mode::AddingBook(_) => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Switch Field   "),
                Span::styled("[Space]", key_style),
                Span::raw(" Toggle eBook   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Save   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            Mode::FilteringByAuthor(_) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Apply   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Clear Filter"),
            ]),
            Mode::Normal => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Select   "),
                Span::styled("[+]", key_style),
                Span::raw(" Add   "),
                Span::styled("[l]", key_style),
                Span::raw(" Lend   "),
                Span::styled("[r]", key_style),
                Span::raw(" Return   "),
                Span::styled("[f]", key_style),
                Span::raw(" Filter   "),
                Span::styled("[v]", key_style),
                Span::raw(" Toggle View   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }

    fn draw_book_form(&self, frame: &mut Frame, area: Rect, form: &BookForm) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Book").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line("Title", BookField::Title),
            form.build_line("Author", BookField::Author),
            form.build_line("ISBN", BookField::Isbn),
            form.build_line("eBook", BookField::Kind),
            form.build_line("Size/MB", BookField::Size),
            Line::from(""),
        ];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch • Space toggles eBook • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let (prefix, row) = match form.active {
            BookField::Title => ("Title: ", 0),
            BookField::Author => ("Author: ", 1),
            BookField::Isbn => ("ISBN: ", 2),
            BookField::Kind => ("eBook: ", 3),
            BookField::Size => ("Size/MB: ", 4),
        };
        let cursor_x = inner.x + prefix.len() as u16 + form.value_len(form.active) as u16;
        let cursor_y = inner.y + row;
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    /// Draw the author prompt at the top of the table area, showing the
    /// current query and placing the cursor at the end of the typed text.
    fn draw_filter_bar(&self, frame: &mut Frame, area: Rect, state: &FilterState) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Filter by Author");
        let paragraph = Paragraph::new(Span::raw(format!("Author: {}", state.query)))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let cursor_x = inner.x + "Author: ".len() as u16 + state.query.chars().count() as u16;
        let cursor_y = inner.y;
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
