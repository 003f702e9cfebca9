//! Ephemeral chat relay server implementation.

mod handler;
mod server;
mod signal;
mod state;

pub use server::Server;
