use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::Book;

/// Internal representation of the "add book" form fields. Text lives here as
/// raw strings until the user submits; only `parse_inputs` turns the buffer
/// into a typed [`Book`].
#[derive(Default, Clone)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) isbn: String,
    pub(crate) is_ebook: bool,
    pub(crate) size: String,
    pub(crate) active: BookField,
    pub(crate) error: Option<String>,
}

/// Fields available within the book form, in tab order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum BookField {
    Title,
    Author,
    Isbn,
    Kind,
    Size,
}

impl Default for BookField {
    fn default() -> Self {
        BookField::Title
    }
}

impl BookForm {
    /// Advance focus to the next field. The size field only participates
    /// while the eBook box is checked; for a print book Tab wraps straight
    /// back to the title.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            BookField::Title => BookField::Author,
            BookField::Author => BookField::Isbn,
            BookField::Isbn => BookField::Kind,
            BookField::Kind => {
                if self.is_ebook {
                    BookField::Size
                } else {
                    BookField::Title
                }
            }
            BookField::Size => BookField::Title,
        };
    }

    /// Append a character to the active field, validating allowed input.
    /// On the checkbox field, Space flips the eBook flag instead of typing.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        match self.active {
            BookField::Title => {
                if !ch.is_control() {
                    self.title.push(ch);
                    true
                } else {
                    false
                }
            }
            BookField::Author => {
                if !ch.is_control() {
                    self.author.push(ch);
                    true
                } else {
                    false
                }
            }
            BookField::Isbn => {
                if !ch.is_control() {
                    self.isbn.push(ch);
                    true
                } else {
                    false
                }
            }
            BookField::Kind => {
                if ch == ' ' {
                    self.is_ebook = !self.is_ebook;
                    // Unchecking discards whatever size was typed, matching
                    // the inert dash the form shows for print books.
                    if !self.is_ebook {
                        self.size.clear();
                    }
                    true
                } else {
                    false
                }
            }
            BookField::Size => {
                if ch.is_ascii_digit() || (ch == '.' && !self.size.contains('.')) {
                    self.size.push(ch);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            BookField::Title => {
                self.title.pop();
            }
            BookField::Author => {
                self.author.pop();
            }
            BookField::Isbn => {
                self.isbn.pop();
            }
            BookField::Kind => {}
            BookField::Size => {
                self.size.pop();
            }
        }
    }

    /// Validate the inputs and build the typed book ready for the catalog.
    pub(crate) fn parse_inputs(&self) -> Result<Book> {
        let title = self.title.trim();
        let author = self.author.trim();
        let isbn = self.isbn.trim();
        if title.is_empty() || author.is_empty() || isbn.is_empty() {
            return Err(anyhow!("Please fill all fields."));
        }

        if !self.is_ebook {
            return Ok(Book::new(title, author, isbn));
        }

        let size_raw = self.size.trim();
        if size_raw.is_empty() {
            return Err(anyhow!("Please enter download size for eBook."));
        }
        let download_size = size_raw
            .parse::<f64>()
            .map_err(|_| anyhow!("Download size must be a positive number."))?;
        Ok(Book::ebook(title, author, isbn, download_size)?)
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field_name: &str, field: BookField) -> Line<'static> {
        if field == BookField::Kind {
            let marker = if self.is_ebook { "[x]" } else { "[ ]" };
            let style = if self.active == BookField::Kind {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            return Line::from(vec![
                Span::raw(format!("{field_name}: ")),
                Span::styled(marker, style),
            ]);
        }

        // The size field is inert for print books; show the same dash the
        // catalog table uses.
        if field == BookField::Size && !self.is_ebook {
            return Line::from(vec![
                Span::raw(format!("{field_name}: ")),
                Span::styled("-", Style::default().fg(Color::DarkGray)),
            ]);
        }

        let (value, is_active) = match field {
            BookField::Title => (&self.title, self.active == BookField::Title),
            BookField::Author => (&self.author, self.active == BookField::Author),
            BookField::Isbn => (&self.isbn, self.active == BookField::Isbn),
            _ => (&self.size, self.active == BookField::Size),
        };

        let display = if value.is_empty() {
            "<required>".to_string()
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    /// Return the character count for the requested field.
    pub(crate) fn value_len(&self, field: BookField) -> usize {
        match field {
            BookField::Title => self.title.chars().count(),
            BookField::Author => self.author.chars().count(),
            BookField::Isbn => self.isbn.chars().count(),
            BookField::Kind => 0,
            BookField::Size => self.size.chars().count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookKind;

    fn filled_form() -> BookForm {
        BookForm {
            title: "Machine Learning Guide".to_string(),
            author: "Shehroz".to_string(),
            isbn: "444444".to_string(),
            ..BookForm::default()
        }
    }

    #[test]
    fn parse_requires_every_text_field() {
        let mut form = filled_form();
        form.author.clear();
        let err = form.parse_inputs().unwrap_err();
        assert_eq!(err.to_string(), "Please fill all fields.");
    }

    #[test]
    fn parse_builds_a_print_book() {
        let form = filled_form();
        let book = form.parse_inputs().unwrap();
        assert_eq!(book.kind, BookKind::Print);
        assert_eq!(book.title, "Machine Learning Guide");
    }

    #[test]
    fn parse_requires_size_for_ebooks() {
        let mut form = filled_form();
        form.is_ebook = true;
        let err = form.parse_inputs().unwrap_err();
        assert_eq!(err.to_string(), "Please enter download size for eBook.");
    }

    #[test]
    fn parse_rejects_non_numeric_size() {
        let mut form = filled_form();
        form.is_ebook = true;
        form.size = "1.2.3".to_string();
        let err = form.parse_inputs().unwrap_err();
        assert_eq!(err.to_string(), "Download size must be a positive number.");
    }

    #[test]
    fn parse_rejects_zero_size() {
        let mut form = filled_form();
        form.is_ebook = true;
        form.size = "0".to_string();
        let err = form.parse_inputs().unwrap_err();
        assert_eq!(err.to_string(), "Download size must be a positive number.");
    }

    #[test]
    fn parse_builds_an_ebook_with_size() {
        let mut form = filled_form();
        form.is_ebook = true;
        form.size = "10".to_string();
        let book = form.parse_inputs().unwrap();
        assert_eq!(book.kind, BookKind::EBook { download_size: 10.0 });
    }

    #[test]
    fn size_field_accepts_a_single_decimal_point() {
        let mut form = BookForm::default();
        form.active = BookField::Size;
        assert!(form.push_char('2'));
        assert!(form.push_char('.'));
        assert!(form.push_char('5'));
        assert!(!form.push_char('.'));
        assert!(!form.push_char('x'));
        assert_eq!(form.size, "2.5");
    }

    #[test]
    fn space_toggles_the_ebook_checkbox() {
        let mut form = BookForm::default();
        form.active = BookField::Kind;
        assert!(form.push_char(' '));
        assert!(form.is_ebook);
        assert!(form.push_char(' '));
        assert!(!form.is_ebook);
        assert!(!form.push_char('x'));
    }

    #[test]
    fn unchecking_the_ebook_box_clears_the_size() {
        let mut form = BookForm::default();
        form.active = BookField::Kind;
        form.push_char(' ');
        form.active = BookField::Size;
        form.push_char('1');
        form.push_char('0');
        assert_eq!(form.size, "10");

        form.active = BookField::Kind;
        form.push_char(' ');
        assert!(form.size.is_empty());
    }

    #[test]
    fn tab_order_skips_size_for_print_books() {
        let mut form = BookForm::default();
        form.active = BookField::Kind;
        form.toggle_field();
        assert_eq!(form.active, BookField::Title);

        form.is_ebook = true;
        form.active = BookField::Kind;
        form.toggle_field();
        assert_eq!(form.active, BookField::Size);
        form.toggle_field();
        assert_eq!(form.active, BookField::Title);
    }
}
