//! HTTP API response bodies.

use serde::{Deserialize, Serialize};

/// POST /create-room のレスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRoomResponse {
    pub room_id: String,
    pub join_url: String,
    pub message: String,
}

/// GET /room/{room_id} のレスポンス（ルームが存在する場合）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomInfoResponse {
    pub room_id: String,
    pub participant_count: usize,
    pub status: String,
}

/// GET /room/{room_id} のレスポンス（ルームが存在しない場合、404）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomNotFoundResponse {
    pub error: String,
    pub room_id: String,
}
