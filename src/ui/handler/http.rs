//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::RoomId,
    infrastructure::dto::http::{CreateRoomResponse, RoomInfoResponse, RoomNotFoundResponse},
    ui::state::AppState,
    usecase::GetRoomInfoError,
};

/// Create a new room and return its id and join URL
pub async fn create_room(State(state): State<Arc<AppState>>) -> Json<CreateRoomResponse> {
    let room = state.create_room_usecase.execute().await;

    // Domain Model から DTO への変換
    let join_url = format!("/room/{}", room.id);
    Json(CreateRoomResponse {
        room_id: room.id.into_string(),
        join_url,
        message: "Room created successfully".to_string(),
    })
}

/// Get room info (existence and participant count) without joining
pub async fn get_room_info(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomInfoResponse>, (StatusCode, Json<RoomNotFoundResponse>)> {
    // Convert String -> RoomId (Domain Model)
    // 不正な形式の ID は存在しないルームと同じ 404 にする
    let Ok(room_id_vo) = RoomId::new(room_id.clone()) else {
        return Err(room_not_found(room_id));
    };

    match state.get_room_info_usecase.execute(&room_id_vo).await {
        Ok(room) => {
            // Domain Model から DTO への変換
            Ok(Json(RoomInfoResponse {
                room_id: room.id.clone().into_string(),
                participant_count: room.participant_count(),
                status: "active".to_string(),
            }))
        }
        Err(GetRoomInfoError::RoomNotFound(_)) => Err(room_not_found(room_id)),
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "websocket_support": true,
    }))
}

/// Service info banner for the root path
pub async fn service_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "create_room": "POST /create-room",
            "room_info": "GET /room/{room_id}",
            "websocket": "GET /ws/{room_id}",
            "health": "GET /health",
        },
    }))
}

fn room_not_found(room_id: String) -> (StatusCode, Json<RoomNotFoundResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(RoomNotFoundResponse {
            error: "Room not found".to_string(),
            room_id,
        }),
    )
}
