//! Client core for the bookstore catalog.
//!
//! # Overview
//! Keeps page state (the collection list, the record editor, the new-book
//! form) in sync with a remote book collection without touching the network
//! itself (host-does-IO pattern). Views hand out `Pending` requests and take
//! back responses; the host performs the round-trip and applies the returned
//! `Effect`s.
//!
//! # Design
//! - `BookClient` is stateless: `build_*` produces a request, `parse_*`
//!   consumes a response.
//! - Each view holds a tagged `ViewState` and at most one request in flight.
//!   Responses are matched by `Ticket`; anything else is ignored.
//! - Local state changes only after the resource confirms an operation.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod nav;
pub mod render;
pub mod state;
pub mod types;
pub mod views;

pub use client::BookClient;
pub use error::{ApiError, ErrorKind, ViewError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use nav::{Effect, Notice, Route};
pub use state::{Pending, Ticket, ViewState};
pub use types::{Book, BookEdit, BookId, CreateBook};
pub use views::{CollectionView, CreatorView, DeleteConfirmation, EditorView, NotFound};
