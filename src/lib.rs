//! Ephemeral anonymous group-chat relay.
//!
//! Clients join a room over WebSocket, exchange chat messages and typing
//! signals, and leave; rooms live in process memory only and are destroyed
//! the moment their last participant leaves.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// shared library
pub mod common;
