//! Presence and messaging gateway library.
//!
//! This library provides the server-side implementation of the Hiroba
//! gateway: token-verified WebSocket sessions, an in-memory connection
//! registry, and roster / chat broadcasts to every connected client.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
