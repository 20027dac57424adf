//! New-book form.

use tracing::{debug, info, warn};

use crate::client::BookClient;
use crate::error::{ApiError, ViewError};
use crate::http::HttpResponse;
use crate::nav::{Effect, Notice, Route};
use crate::state::{InFlight, Pending, Ticket};
use crate::types::{BookEdit, CreateBook};

/// Form for a new book. Nothing is fetched on mount.
#[derive(Debug)]
pub struct CreatorView {
    client: BookClient,
    draft: CreateBook,
    in_flight: InFlight<()>,
}

impl CreatorView {
    pub fn new(client: BookClient) -> Self {
        Self {
            client,
            draft: CreateBook::default(),
            in_flight: InFlight::idle(),
        }
    }

    pub fn draft(&self) -> &CreateBook {
        &self.draft
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_busy()
    }

    pub fn set_field(&mut self, edit: BookEdit) {
        self.draft.apply(edit);
    }

    pub fn submit(&mut self) -> Result<Pending, ViewError> {
        if self.in_flight.is_busy() {
            return Err(ViewError::Busy);
        }
        let request = self.client.build_create_book(&self.draft)?;
        let ticket = self.in_flight.start(());
        Ok(Pending { ticket, request })
    }

    pub fn on_response(
        &mut self,
        ticket: Ticket,
        response: Result<HttpResponse, ApiError>,
    ) -> Vec<Effect> {
        if self.in_flight.finish(ticket).is_none() {
            debug!(ticket = ticket.value(), "ignoring response to a request this view is not waiting on");
            return Vec::new();
        }
        match response.and_then(|r| self.client.parse_create_book(r)) {
            Ok(book) => {
                info!(book_id = %book.id, title = %book.title, "book created");
                vec![
                    Effect::Notify(Notice::Info(format!("Book #{} created", book.id))),
                    Effect::Navigate(Route::Collection),
                ]
            }
            Err(err) => {
                warn!(kind = ?err.kind(), error = %err, "failed to create book");
                vec![Effect::Notify(Notice::Error(format!(
                    "Failed to create book: {err}"
                )))]
            }
        }
    }
}
