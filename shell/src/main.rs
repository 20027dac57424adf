use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use bookstore_core::BookClient;
use bookstore_shell::cli::{self, Cli};
use bookstore_shell::prompt::LineConfirm;
use bookstore_shell::session::Session;
use bookstore_shell::settings::Settings;
use bookstore_shell::telemetry;
use bookstore_shell::transport::UreqTransport;
use clap::Parser;

fn main() -> ExitCode {
    let args = Cli::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Cli) -> anyhow::Result<()> {
    let mut settings = Settings::load().with_context(|| "failed to load bookstore settings")?;
    if let Some(base_url) = args.base_url {
        settings.api.base_url = base_url;
    }
    telemetry::init(&settings.telemetry);

    let client = BookClient::new(&settings.api.base_url);
    tracing::debug!(base_url = client.base_url(), "starting");
    let mut session = Session::new(client, UreqTransport::new(settings.api.timeout()));
    let mut confirm = LineConfirm::new(io::stdin().lock(), io::stderr());
    let mut stdout = io::stdout().lock();

    cli::execute(args.command, &mut session, &mut confirm, &mut stdout)?;
    stdout.flush().context("failed to flush stdout")
}
