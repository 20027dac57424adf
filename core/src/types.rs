//! Domain DTOs for the book collection.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch schema drift between the two crates. Fields the
//! client does not know about are kept in `Book::extra` so a full replace
//! sends them back untouched.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier assigned by the collection resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub i64);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(BookId)
    }
}

/// A single book record returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub price: f64,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub status: String,
    /// Fields sent by the server that this client does not model.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Request payload for creating a new book. The server assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub price: f64,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub status: String,
}

/// Replacement of exactly one editable field.
///
/// The id is not editable.
#[derive(Debug, Clone, PartialEq)]
pub enum BookEdit {
    Title(String),
    Author(String),
    Price(f64),
    Isbn(String),
    Description(String),
    Category(String),
    Year(i32),
    Status(String),
}

impl BookEdit {
    /// Name of the JSON field this edit replaces.
    pub fn field(&self) -> &'static str {
        match self {
            BookEdit::Title(_) => "title",
            BookEdit::Author(_) => "author",
            BookEdit::Price(_) => "price",
            BookEdit::Isbn(_) => "isbn",
            BookEdit::Description(_) => "description",
            BookEdit::Category(_) => "category",
            BookEdit::Year(_) => "year",
            BookEdit::Status(_) => "status",
        }
    }
}

macro_rules! apply_edit {
    ($target:expr, $edit:expr) => {
        match $edit {
            BookEdit::Title(v) => $target.title = v,
            BookEdit::Author(v) => $target.author = v,
            BookEdit::Price(v) => $target.price = v,
            BookEdit::Isbn(v) => $target.isbn = v,
            BookEdit::Description(v) => $target.description = v,
            BookEdit::Category(v) => $target.category = v,
            BookEdit::Year(v) => $target.year = v,
            BookEdit::Status(v) => $target.status = v,
        }
    };
}

impl Book {
    /// Replace one field in place; every other field is left as is.
    pub fn apply(&mut self, edit: BookEdit) {
        apply_edit!(self, edit);
    }
}

impl CreateBook {
    pub fn apply(&mut self, edit: BookEdit) {
        apply_edit!(self, edit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> Book {
        serde_json::from_str(
            r#"{"id":1,"title":"A","author":"X","price":100,"description":"d",
                "category":"novel","year":1999,"status":"available"}"#,
        )
        .unwrap()
    }

    #[test]
    fn integer_price_deserializes_as_float() {
        assert_eq!(book().price, 100.0);
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let book: Book =
            serde_json::from_str(r#"{"id":4,"title":"T","author":"A","price":1.5}"#).unwrap();
        assert_eq!(book.id, BookId(4));
        assert!(book.description.is_empty());
        assert_eq!(book.year, 0);
        assert!(book.extra.is_empty());
    }

    #[test]
    fn unknown_fields_survive_a_roundtrip() {
        let book: Book = serde_json::from_str(
            r#"{"id":2,"title":"T","author":"A","price":3.0,"isbn":"978-0",
                "created_at":"2025-09-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(book.isbn, "978-0");
        assert_eq!(book.extra["created_at"], "2025-09-01T10:00:00Z");
        assert!(!book.extra.contains_key("isbn"));
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["isbn"], "978-0");
        assert_eq!(json["created_at"], "2025-09-01T10:00:00Z");
        assert_eq!(json["id"], 2);
    }

    #[test]
    fn missing_title_is_rejected() {
        let result: Result<Book, _> = serde_json::from_str(r#"{"id":1,"author":"A","price":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn apply_replaces_only_the_named_field() {
        let mut edited = book();
        edited.apply(BookEdit::Title("B".to_string()));
        let original = book();
        assert_eq!(edited.title, "B");
        assert_eq!(edited.author, original.author);
        assert_eq!(edited.price, original.price);
        assert_eq!(edited.year, original.year);
        assert_eq!(edited.status, original.status);
    }

    #[test]
    fn create_payload_always_carries_isbn() {
        let mut draft = CreateBook::default();
        draft.apply(BookEdit::Title("Dune".to_string()));
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["isbn"], "");

        draft.apply(BookEdit::Isbn("978-0441013593".to_string()));
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["isbn"], "978-0441013593");
        assert_eq!(json["title"], "Dune");
    }

    #[test]
    fn apply_does_not_validate_values() {
        let mut edited = book();
        edited.apply(BookEdit::Price(-5.0));
        assert_eq!(edited.price, -5.0);
    }

    #[test]
    fn book_id_parses_and_displays() {
        let id: BookId = "42".parse().unwrap();
        assert_eq!(id, BookId(42));
        assert_eq!(id.to_string(), "42");
        assert!("abc".parse::<BookId>().is_err());
        assert!(" 42".parse::<BookId>().is_err());
    }
}
