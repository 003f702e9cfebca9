//! HTTP and WebSocket request handlers.

mod http;
mod websocket;

pub use http::{create_room, get_room_info, health_check, service_info};
pub use websocket::websocket_handler;
