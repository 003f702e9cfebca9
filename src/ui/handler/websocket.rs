//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{InboundEvent, OutboundEvent, RoomId},
    infrastructure::dto::websocket::{ClientEvent, ServerEvent},
    ui::state::AppState,
    usecase::JoinError,
};

/// WebSocket entry point for `/ws/{room_id}`.
///
/// ルームの存在確認はアップグレード後に行う。存在しないルームは HTTP
/// ステータスではなく、エラー通知フレームを 1 件送ってから切断する。
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state, room_id))
}

/// Serializes a server event to its wire representation.
fn to_json(event: &ServerEvent) -> String {
    serde_json::to_string(event).expect("ServerEvent should serialize to JSON")
}

/// Spawns a task that receives room events from the rx channel and pushes them
/// to the WebSocket sender.
///
/// This function handles the outbound event flow: events enqueued by the
/// registry (via the rx channel) are serialized per connection and sent to
/// this client's WebSocket connection.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<OutboundEvent>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            // Domain Event から DTO への変換
            let json = to_json(&ServerEvent::from(event));
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, room_id_str: String) {
    let (mut sender, mut receiver) = socket.split();

    let (tx, rx) = mpsc::unbounded_channel();

    // Convert String -> RoomId (Domain Model)、その後ルームに参加する。
    // 不正な形式の ID は存在しないルームと同じ扱いにする。
    let joined = match RoomId::new(room_id_str.clone()) {
        Ok(room_id) => match state.join_room_usecase.execute(&room_id, tx.clone()).await {
            Ok(joined) => Some((room_id, joined)),
            Err(JoinError::RoomNotFound(_)) => None,
        },
        Err(_) => None,
    };

    let Some((room_id, joined)) = joined else {
        // 参加は成立していないので、退出処理なしで閉じてよい
        tracing::warn!("Rejecting connection to unknown room '{}'", room_id_str);
        let error_json = to_json(&ServerEvent::Error {
            message: "Room not found".to_string(),
        });
        let _ = sender.send(Message::Text(error_json.into())).await;
        return;
    };

    let connection_id = joined.participant.connection_id.clone();
    let display_name = joined.participant.display_name.clone();

    // 参加した本人にのみ接続確定を返す（参加者数は参加時点の値）。
    // pusher_loop 起動前に直接送るため、これが必ず最初のフレームになる。
    let accepted = OutboundEvent::JoinAccepted {
        display_name: display_name.clone(),
        room_id: room_id.clone(),
        participant_count: joined.participant_count,
    };
    if sender
        .send(Message::Text(to_json(&ServerEvent::from(accepted)).into()))
        .await
        .is_err()
    {
        // 接続確定を送る前に切断された。参加済みなので退出処理だけ行う。
        tracing::warn!(
            "Connection '{}' closed before join confirmation",
            connection_id
        );
        state
            .leave_room_usecase
            .execute(&room_id, &connection_id, &display_name)
            .await;
        return;
    }

    let participant = joined.participant;
    let state_clone = state.clone();
    let room_id_clone = room_id.clone();
    let keepalive_tx = tx;

    // Spawn a task to receive messages from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    // Parse the incoming message
                    let client_event = match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => event,
                        Err(e) => {
                            // 解釈できないフレームは無視し、接続は維持する
                            tracing::warn!(
                                "Ignoring malformed frame from '{}': {}",
                                participant.display_name,
                                e
                            );
                            continue;
                        }
                    };

                    match InboundEvent::from(client_event) {
                        InboundEvent::Keepalive => {
                            // 応答は送信者本人にのみ返す
                            if keepalive_tx.send(OutboundEvent::KeepaliveAck).is_err() {
                                break;
                            }
                        }
                        InboundEvent::ChatMessage { text } => {
                            state_clone
                                .send_message_usecase
                                .execute(&room_id_clone, &participant, text)
                                .await;
                        }
                        InboundEvent::TypingSignal { is_typing } => {
                            state_clone
                                .notify_typing_usecase
                                .execute(&room_id_clone, &participant, is_typing)
                                .await;
                        }
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!(
                        "Participant '{}' requested close",
                        participant.display_name
                    );
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to push room events to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // 退出処理（正常クローズ・異常切断のどちらでも必ず実行される）
    state
        .leave_room_usecase
        .execute(&room_id, &connection_id, &display_name)
        .await;
}
