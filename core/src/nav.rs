//! Navigation targets and the side effects views ask the host to perform.

use std::fmt;

use crate::types::BookId;

const COLLECTION_PATH: &str = "/store-manager/all-book";
const CREATE_PATH: &str = "/store-manager/add-book";
const EDIT_PREFIX: &str = "/store-manager/edit-book/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Collection,
    Create,
    Edit(BookId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Collection => COLLECTION_PATH.to_string(),
            Route::Create => CREATE_PATH.to_string(),
            Route::Edit(id) => format!("{EDIT_PREFIX}{id}"),
        }
    }

    pub fn parse(path: &str) -> Option<Self> {
        let path = path.trim_end_matches('/');
        match path {
            COLLECTION_PATH => Some(Route::Collection),
            CREATE_PATH => Some(Route::Create),
            _ => path
                .strip_prefix(EDIT_PREFIX)
                .and_then(|id| id.parse().ok())
                .map(Route::Edit),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Info(text) | Notice::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// What a view asks the host to do after handling an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Navigate(Route),
    Notify(Notice),
}
