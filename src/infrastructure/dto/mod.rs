//! Data Transfer Objects (DTOs) for the relay server.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket wire messages (internally-tagged JSON)
//! - `http`: HTTP API response bodies
//!
//! Serde stays in this layer. Domain events never derive
//! Serialize / Deserialize; `conversion` maps between the two.

pub mod conversion;
pub mod http;
pub mod websocket;
