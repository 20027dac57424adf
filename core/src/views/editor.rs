//! Edit page for a single book, saved with a full replace.

use std::fmt;

use tracing::{debug, info, warn};

use crate::client::BookClient;
use crate::error::{ApiError, ViewError};
use crate::http::HttpResponse;
use crate::nav::{Effect, Notice, Route};
use crate::state::{InFlight, Pending, Ticket, ViewState};
use crate::types::{Book, BookEdit, BookId};

/// Terminal editor state after any failed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NotFound;

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("book not found")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Load,
    Save,
}

/// Edits one book: load by id, change fields locally, save with a full
/// replace, then go back to the collection.
#[derive(Debug)]
pub struct EditorView {
    client: BookClient,
    id: BookId,
    state: ViewState<Book, NotFound>,
    in_flight: InFlight<Op>,
}

impl EditorView {
    /// Mount the editor for `id` and return the fetch request.
    pub fn mount(client: BookClient, id: BookId) -> (Self, Pending) {
        let mut in_flight = InFlight::idle();
        let ticket = in_flight.start(Op::Load);
        let request = client.build_get_book(id);
        let view = Self {
            client,
            id,
            state: ViewState::Loading,
            in_flight,
        };
        (view, Pending { ticket, request })
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn state(&self) -> &ViewState<Book, NotFound> {
        &self.state
    }

    /// The record as currently edited.
    pub fn book(&self) -> Option<&Book> {
        self.state.ready()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_busy()
    }

    /// Replace one field of the loaded record. Nothing is sent.
    pub fn set_field(&mut self, edit: BookEdit) -> Result<(), ViewError> {
        let book = self.state.ready_mut().ok_or(ViewError::NotReady)?;
        debug!(book_id = %self.id, field = edit.field(), "field edited");
        book.apply(edit);
        Ok(())
    }

    /// Send the whole record as a replacement.
    pub fn save(&mut self) -> Result<Pending, ViewError> {
        if self.in_flight.is_busy() {
            return Err(ViewError::Busy);
        }
        let book = self.state.ready().ok_or(ViewError::NotReady)?;
        let request = self.client.build_update_book(book)?;
        let ticket = self.in_flight.start(Op::Save);
        Ok(Pending { ticket, request })
    }

    /// Apply the outcome of a request issued by this view.
    pub fn on_response(
        &mut self,
        ticket: Ticket,
        response: Result<HttpResponse, ApiError>,
    ) -> Vec<Effect> {
        let Some(op) = self.in_flight.finish(ticket) else {
            debug!(ticket = ticket.value(), book_id = %self.id, "ignoring response to a request this view is not waiting on");
            return Vec::new();
        };
        match op {
            Op::Load => {
                self.finish_load(response);
                Vec::new()
            }
            Op::Save => self.finish_save(response),
        }
    }

    fn finish_load(&mut self, response: Result<HttpResponse, ApiError>) {
        match response.and_then(|r| self.client.parse_get_book(r)) {
            Ok(book) => {
                debug!(book_id = %self.id, "loaded book for editing");
                self.state = ViewState::Ready(book);
            }
            Err(err) if err.is_not_found() => {
                info!(book_id = %self.id, "book does not exist");
                self.state = ViewState::Failed(NotFound);
            }
            Err(err) => {
                warn!(book_id = %self.id, kind = ?err.kind(), error = %err, "failed to fetch book");
                self.state = ViewState::Failed(NotFound);
            }
        }
    }

    fn finish_save(&mut self, response: Result<HttpResponse, ApiError>) -> Vec<Effect> {
        match response.and_then(|r| self.client.parse_update_book(r)) {
            Ok(()) => {
                info!(book_id = %self.id, "book updated");
                vec![
                    Effect::Notify(Notice::Info("Book updated successfully".to_string())),
                    Effect::Navigate(Route::Collection),
                ]
            }
            Err(err) => {
                warn!(book_id = %self.id, kind = ?err.kind(), error = %err, "failed to update book");
                vec![Effect::Notify(Notice::Error(format!(
                    "Failed to update book: {err}"
                )))]
            }
        }
    }
}
