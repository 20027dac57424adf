//! The all-books page: list, delete with confirmation, links to the forms.

use tracing::{debug, info, warn};

use crate::client::BookClient;
use crate::error::{ApiError, ViewError};
use crate::http::HttpResponse;
use crate::nav::{Effect, Notice, Route};
use crate::state::{InFlight, Pending, Ticket, ViewState};
use crate::types::{Book, BookId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Load,
    Delete(BookId),
}

/// The list of every book, loaded once on mount.
///
/// The list is only changed locally after the resource confirms a delete.
/// Creates and edits made elsewhere show up on the next mount.
#[derive(Debug)]
pub struct CollectionView {
    client: BookClient,
    state: ViewState<Vec<Book>>,
    in_flight: InFlight<Op>,
}

/// Proof that the user was asked about one specific delete.
///
/// Only `CollectionView::request_delete` creates one. Dropping it declines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    id: BookId,
    title: String,
}

impl DeleteConfirmation {
    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Question to put to the user.
    pub fn prompt(&self) -> String {
        format!(
            "Are you sure you want to delete \"{}\" (ID: {})?",
            self.title, self.id
        )
    }
}

impl CollectionView {
    /// Mount the view and return the initial list request.
    pub fn mount(client: BookClient) -> (Self, Pending) {
        let mut view = Self {
            client,
            state: ViewState::Loading,
            in_flight: InFlight::idle(),
        };
        let pending = view.begin_load();
        (view, pending)
    }

    pub fn state(&self) -> &ViewState<Vec<Book>> {
        &self.state
    }

    /// Books currently shown; empty unless the view is ready.
    pub fn books(&self) -> &[Book] {
        self.state.ready().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_busy()
    }

    /// Fetch the whole collection again.
    pub fn load(&mut self) -> Result<Pending, ViewError> {
        if self.in_flight.is_busy() {
            return Err(ViewError::Busy);
        }
        Ok(self.begin_load())
    }

    fn begin_load(&mut self) -> Pending {
        self.state = ViewState::Loading;
        let ticket = self.in_flight.start(Op::Load);
        Pending {
            ticket,
            request: self.client.build_list_books(),
        }
    }

    pub fn request_delete(&self, id: BookId, title: &str) -> DeleteConfirmation {
        DeleteConfirmation {
            id,
            title: title.to_string(),
        }
    }

    /// Issue the delete the user agreed to.
    pub fn confirm_delete(
        &mut self,
        confirmation: DeleteConfirmation,
    ) -> Result<Pending, ViewError> {
        if self.in_flight.is_busy() {
            return Err(ViewError::Busy);
        }
        if !self.state.is_ready() {
            return Err(ViewError::NotReady);
        }
        let id = confirmation.id;
        let ticket = self.in_flight.start(Op::Delete(id));
        Ok(Pending {
            ticket,
            request: self.client.build_delete_book(id),
        })
    }

    pub fn navigate_to_create(&self) -> Effect {
        Effect::Navigate(Route::Create)
    }

    pub fn navigate_to_edit(&self, id: BookId) -> Effect {
        Effect::Navigate(Route::Edit(id))
    }

    /// Apply the outcome of a request issued by this view.
    pub fn on_response(
        &mut self,
        ticket: Ticket,
        response: Result<HttpResponse, ApiError>,
    ) -> Vec<Effect> {
        let Some(op) = self.in_flight.finish(ticket) else {
            debug!(ticket = ticket.value(), "ignoring response to a request this view is not waiting on");
            return Vec::new();
        };
        match op {
            Op::Load => {
                self.finish_load(response);
                Vec::new()
            }
            Op::Delete(id) => self.finish_delete(id, response),
        }
    }

    fn finish_load(&mut self, response: Result<HttpResponse, ApiError>) {
        match response.and_then(|r| self.client.parse_list_books(r)) {
            Ok(books) => {
                info!(count = books.len(), "loaded book collection");
                self.state = ViewState::Ready(books);
            }
            Err(err) => {
                warn!(kind = ?err.kind(), error = %err, "failed to load book collection");
                self.state = ViewState::Failed(err.to_string());
            }
        }
    }

    fn finish_delete(&mut self, id: BookId, response: Result<HttpResponse, ApiError>) -> Vec<Effect> {
        match response.and_then(|r| self.client.parse_delete_book(r)) {
            Ok(()) => {
                if let Some(books) = self.state.ready_mut() {
                    if let Some(pos) = books.iter().position(|book| book.id == id) {
                        books.remove(pos);
                    }
                }
                info!(book_id = %id, "deleted book");
                Vec::new()
            }
            Err(err) => {
                warn!(book_id = %id, kind = ?err.kind(), error = %err, "failed to delete book");
                vec![Effect::Notify(Notice::Error(format!(
                    "Failed to delete book: {err}"
                )))]
            }
        }
    }
}
