//! Console host for the bookstore catalog client.
//!
//! Performs the I/O the core views ask for: HTTP over ureq, delete
//! confirmation on the terminal, page output on stdout.

pub mod cli;
pub mod prompt;
pub mod session;
pub mod settings;
pub mod telemetry;
pub mod transport;
