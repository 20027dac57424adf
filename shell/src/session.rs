//! One interactive session: the page on screen plus queued notices.
//!
//! The session is the host side of the view protocol. It mounts the page a
//! route names, runs every `Pending` through its `Transport` straight away and
//! applies the returned effects, following navigations as they come.

use std::fmt;

use anyhow::{bail, Context};
use bookstore_core::{
    BookClient, BookEdit, BookId, CollectionView, CreatorView, Effect, EditorView, Notice,
    Pending, Route,
};
use tracing::{debug, info};

use crate::prompt::Confirm;
use crate::transport::Transport;

#[derive(Debug)]
pub enum Page {
    Blank,
    Collection(CollectionView),
    Editor(EditorView),
    Creator(CreatorView),
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Blank => Ok(()),
            Page::Collection(view) => write!(f, "{view}"),
            Page::Editor(view) => write!(f, "{view}"),
            Page::Creator(view) => write!(f, "{view}"),
        }
    }
}

pub struct Session<T> {
    client: BookClient,
    transport: T,
    page: Page,
    notices: Vec<Notice>,
}

impl<T: Transport> Session<T> {
    pub fn new(client: BookClient, transport: T) -> Self {
        Self {
            client,
            transport,
            page: Page::Blank,
            notices: Vec::new(),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Drain the notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Replace the current page with the one `route` names and run its
    /// initial fetch.
    pub fn navigate(&mut self, route: Route) {
        info!(route = %route, "navigating");
        match route {
            Route::Collection => {
                let (view, pending) = CollectionView::mount(self.client.clone());
                self.page = Page::Collection(view);
                self.dispatch(pending);
            }
            Route::Create => {
                self.page = Page::Creator(CreatorView::new(self.client.clone()));
            }
            Route::Edit(id) => {
                let (view, pending) = EditorView::mount(self.client.clone(), id);
                self.page = Page::Editor(view);
                self.dispatch(pending);
            }
        }
    }

    pub fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Navigate(route) => self.navigate(route),
                Effect::Notify(notice) => {
                    debug!(error = notice.is_error(), text = notice.text(), "notice");
                    self.notices.push(notice);
                }
            }
        }
    }

    /// Ask about deleting `id` from the listed collection and send the
    /// delete when accepted. Returns whether the user agreed.
    pub fn delete(&mut self, id: BookId, confirm: &mut dyn Confirm) -> anyhow::Result<bool> {
        let Page::Collection(view) = &mut self.page else {
            bail!("the collection is not open");
        };
        let title = view
            .books()
            .iter()
            .find(|book| book.id == id)
            .map(|book| book.title.clone())
            .with_context(|| format!("no book with ID {id} in the collection"))?;

        let confirmation = view.request_delete(id, &title);
        if !confirm
            .confirm(&confirmation.prompt())
            .context("failed to read confirmation")?
        {
            info!(
                book_id = %confirmation.id(),
                title = confirmation.title(),
                "delete declined"
            );
            return Ok(false);
        }
        let pending = view.confirm_delete(confirmation)?;
        self.dispatch(pending);
        Ok(true)
    }

    /// Apply `edits` to the open editor and save the record.
    pub fn save_edits(&mut self, edits: Vec<BookEdit>) -> anyhow::Result<()> {
        let Page::Editor(view) = &mut self.page else {
            bail!("no book is open for editing");
        };
        for edit in edits {
            view.set_field(edit)?;
        }
        let pending = view.save()?;
        self.dispatch(pending);
        Ok(())
    }

    /// Fill the new-book form with `edits` and submit it.
    pub fn create(&mut self, edits: Vec<BookEdit>) -> anyhow::Result<()> {
        let Page::Creator(view) = &mut self.page else {
            bail!("the new book form is not open");
        };
        for edit in edits {
            view.set_field(edit);
        }
        let pending = view.submit()?;
        self.dispatch(pending);
        Ok(())
    }

    fn dispatch(&mut self, pending: Pending) {
        let response = self.transport.execute(&pending.request);
        let effects = match &mut self.page {
            Page::Collection(view) => view.on_response(pending.ticket, response),
            Page::Editor(view) => view.on_response(pending.ticket, response),
            Page::Creator(view) => view.on_response(pending.ticket, response),
            Page::Blank => Vec::new(),
        };
        self.apply(effects);
    }
}
