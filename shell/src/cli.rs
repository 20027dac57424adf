use std::io::Write;

use anyhow::{anyhow, bail, Context};
use bookstore_core::{BookEdit, BookId, Notice, Route, ViewState};
use clap::{Args, Parser, Subcommand};

use crate::prompt::Confirm;
use crate::session::{Page, Session};
use crate::transport::Transport;

#[derive(Debug, Parser)]
#[command(name = "bookstore", version, about = "Manage the bookstore catalog")]
pub struct Cli {
    /// API root, e.g. http://127.0.0.1:3000/api/v1. Overrides configuration.
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show every book in the collection.
    List,
    /// Create a book, then show the collection.
    Add {
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Show one book, or change the given fields and save it.
    Edit {
        id: BookId,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a book after confirmation.
    Delete {
        id: BookId,
        /// Do not ask for confirmation.
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Debug, Default, Args)]
pub struct FieldArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    pub price: Option<f64>,
    #[arg(long)]
    pub isbn: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    pub year: Option<i32>,
    #[arg(long)]
    pub status: Option<String>,
}

impl FieldArgs {
    /// One edit per flag given, in declaration order.
    pub fn edits(self) -> Vec<BookEdit> {
        [
            self.title.map(BookEdit::Title),
            self.author.map(BookEdit::Author),
            self.price.map(BookEdit::Price),
            self.isbn.map(BookEdit::Isbn),
            self.description.map(BookEdit::Description),
            self.category.map(BookEdit::Category),
            self.year.map(BookEdit::Year),
            self.status.map(BookEdit::Status),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Run one command against `session`, writing pages and info notices to
/// `out`. Error notices and unusable pages become the returned error.
pub fn execute<T: Transport>(
    command: Command,
    session: &mut Session<T>,
    confirm: &mut dyn Confirm,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match command {
        Command::List => {
            session.navigate(Route::Collection);
            ensure_collection_loaded(session)?;
        }
        Command::Add { fields } => {
            session.navigate(Route::Create);
            session.create(fields.edits())?;
        }
        Command::Edit { id, fields } => {
            session.navigate(Route::Edit(id));
            if let Page::Editor(view) = session.page() {
                if view.state().is_failed() {
                    write!(out, "{}", session.page())?;
                    bail!("book {id} could not be loaded");
                }
            }
            let edits = fields.edits();
            if !edits.is_empty() {
                session.save_edits(edits)?;
            }
        }
        Command::Delete { id, yes } => {
            session.navigate(Route::Collection);
            ensure_collection_loaded(session)?;
            let accepted = if yes {
                session.delete(id, &mut crate::prompt::AssumeYes)?
            } else {
                session.delete(id, confirm)?
            };
            if !accepted {
                writeln!(out, "Cancelled.")?;
                return Ok(());
            }
        }
    }

    let errors = report_notices(session.take_notices(), out)?;
    write!(out, "{}", session.page()).context("failed to write page")?;
    if !errors.is_empty() {
        return Err(anyhow!(errors.join("; ")));
    }
    // A save or create lands on a freshly loaded collection.
    ensure_collection_loaded(session)
}

fn ensure_collection_loaded<T: Transport>(session: &Session<T>) -> anyhow::Result<()> {
    if let Page::Collection(view) = session.page() {
        if let ViewState::Failed(message) = view.state() {
            bail!("failed to load the collection: {message}");
        }
    }
    Ok(())
}

/// Print info notices; hand back the text of error notices.
fn report_notices(notices: Vec<Notice>, out: &mut dyn Write) -> anyhow::Result<Vec<String>> {
    let mut errors = Vec::new();
    for notice in notices {
        match notice {
            Notice::Info(text) => writeln!(out, "{text}")?,
            Notice::Error(text) => errors.push(text),
        }
    }
    Ok(errors)
}
