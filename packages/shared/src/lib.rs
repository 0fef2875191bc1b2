//! Shared utilities for the Hiroba workspace.
//!
//! Logging setup and time helpers used by both the gateway server and
//! the CLI client.

pub mod logger;
pub mod time;
