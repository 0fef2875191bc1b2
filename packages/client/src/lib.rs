//! CLI client for the Hiroba presence gateway.
//!
//! Connects with a session token, prints roster updates and chat messages,
//! and sends lines typed on stdin as chat messages.

mod domain;
mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use error::ClientError;
pub use runner::run_client;
