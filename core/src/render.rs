//! Plain-text rendering of each view.
//!
//! Markup and styling belong to whatever host draws the page; these `Display`
//! impls only fix what each state shows.

use std::fmt;

use crate::state::ViewState;
use crate::types::Book;
use crate::views::{CollectionView, CreatorView, EditorView};

pub const LOADING: &str = "Loading...";
pub const EMPTY_COLLECTION: &str = "No books found.";
pub const BOOK_NOT_FOUND: &str = "Book not found.";

fn write_row(f: &mut fmt::Formatter<'_>, book: &Book) -> fmt::Result {
    writeln!(f, "ID: {}", book.id)?;
    writeln!(f, "  {}", book.title)?;
    writeln!(f, "  by {}", book.author)?;
    writeln!(f, "  Price: {:.2}", book.price)?;
    writeln!(f, "  ISBN: {}", book.isbn)?;
    writeln!(f, "  Description: {}", book.description)?;
    writeln!(f, "  Category: {}", book.category)?;
    writeln!(f, "  Year: {}", book.year)?;
    writeln!(f, "  Status: {}", book.status)
}

impl fmt::Display for CollectionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state() {
            ViewState::Loading => writeln!(f, "{LOADING}"),
            ViewState::Failed(message) => writeln!(f, "Error: {message}"),
            ViewState::Ready(books) if books.is_empty() => writeln!(f, "{EMPTY_COLLECTION}"),
            ViewState::Ready(books) => {
                writeln!(f, "All books ({})", books.len())?;
                for book in books {
                    write_row(f, book)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for EditorView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state() {
            ViewState::Loading => writeln!(f, "{LOADING}"),
            ViewState::Failed(_) => writeln!(f, "{BOOK_NOT_FOUND}"),
            ViewState::Ready(book) => {
                writeln!(f, "Edit book #{}", self.id())?;
                writeln!(f, "  title: {}", book.title)?;
                writeln!(f, "  author: {}", book.author)?;
                writeln!(f, "  price: {}", book.price)?;
                writeln!(f, "  isbn: {}", book.isbn)?;
                writeln!(f, "  description: {}", book.description)?;
                writeln!(f, "  category: {}", book.category)?;
                writeln!(f, "  year: {}", book.year)?;
                writeln!(f, "  status: {}", book.status)
            }
        }
    }
}

impl fmt::Display for CreatorView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let draft = self.draft();
        writeln!(f, "New book")?;
        writeln!(f, "  title: {}", draft.title)?;
        writeln!(f, "  author: {}", draft.author)?;
        writeln!(f, "  price: {}", draft.price)?;
        writeln!(f, "  isbn: {}", draft.isbn)?;
        writeln!(f, "  description: {}", draft.description)?;
        writeln!(f, "  category: {}", draft.category)?;
        writeln!(f, "  year: {}", draft.year)?;
        writeln!(f, "  status: {}", draft.status)
    }
}
