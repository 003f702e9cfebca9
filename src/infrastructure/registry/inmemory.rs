//! InMemory Room Registry 実装
//!
//! ドメイン層が定義する RoomRegistry trait の具体的な実装。
//! HashMap をインメモリストアとして使用します。永続化は行いません。
//!
//! ## ロック構成
//!
//! - `rooms`: マップ全体を守る粗粒度ロック。ルームの検索・挿入・削除の
//!   間だけ保持する。
//! - 各ルームの `Arc<Mutex<Room>>`: 参加者リストの変更とブロードキャストを
//!   直列化する細粒度ロック。
//!
//! マップロックを保持したままルームロックを取得しない（逆も同様）。
//! 同一ルームの join / leave / broadcast はルームロックで直列化されるため
//! 観測されるイベント順序は操作順序と一致し、通知される参加者数は変更と
//! 不可分に計算される。異なるルームへの操作は互いにブロックしない。
//! ブロードキャストは unbounded チャンネルへの送信なのでロック保持中も
//! ブロックしない。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, LeaveOutcome, MessagePusher, OutboundEvent, Participant, PusherChannel,
    RegistryError, Room, RoomId, RoomIdFactory, RoomRegistry, Timestamp,
};

/// インメモリ Room Registry 実装
///
/// ルームのマップと MessagePusher を保持し、ドメイン層の RoomRegistry
/// trait を実装します（依存性の逆転）。
pub struct InMemoryRoomRegistry {
    /// ルーム ID → ルーム（各ルームは独立したロックを持つ）
    rooms: Mutex<HashMap<RoomId, Arc<Mutex<Room>>>>,
    /// MessagePusher（接続ハンドル管理とイベント送信の抽象化）
    pusher: Arc<dyn MessagePusher>,
}

impl InMemoryRoomRegistry {
    /// 新しい InMemoryRoomRegistry を作成
    pub fn new(pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            pusher,
        }
    }

    /// ルームのロックハンドルを取得
    ///
    /// マップロックは検索の間だけ保持する。
    async fn room_handle(&self, room_id: &RoomId) -> Option<Arc<Mutex<Room>>> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).cloned()
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn create_room(&self, created_at: Timestamp) -> Room {
        let mut rooms = self.rooms.lock().await;

        // 8 文字に切り詰めた ID は衝突しうるため、未使用の ID が出るまで
        // マップロックの下で生成し直す
        let room_id = loop {
            let candidate = RoomIdFactory::generate();
            if !rooms.contains_key(&candidate) {
                break candidate;
            }
            tracing::debug!("Room id '{}' already taken, regenerating", candidate);
        };

        let room = Room::new(room_id.clone(), created_at);
        rooms.insert(room_id, Arc::new(Mutex::new(room.clone())));
        room
    }

    async fn get_room(&self, room_id: &RoomId) -> Option<Room> {
        let handle = self.room_handle(room_id).await?;
        let room = handle.lock().await;
        if room.is_closed() {
            return None;
        }
        Some(room.clone())
    }

    async fn room_exists(&self, room_id: &RoomId) -> bool {
        self.get_room(room_id).await.is_some()
    }

    async fn join(
        &self,
        room_id: &RoomId,
        participant: Participant,
        sender: PusherChannel,
    ) -> Result<usize, RegistryError> {
        let Some(handle) = self.room_handle(room_id).await else {
            return Err(RegistryError::RoomNotFound(room_id.clone()));
        };

        let mut room = handle.lock().await;

        // 最後の退出と競合した場合、マップから消える前でも closed が立っている。
        // 削除済みルームを join が復活させてはならない。
        if room.is_closed() {
            return Err(RegistryError::RoomNotFound(room_id.clone()));
        }

        // ハンドル登録 → リスト追加の順。参加者リストに載っている接続には
        // 常にハンドルが存在する。
        self.pusher
            .register_connection(participant.connection_id.clone(), sender)
            .await;

        let display_name = participant.display_name.clone();
        let connection_id = participant.connection_id.clone();
        room.add_participant(participant);
        let count = room.participant_count();

        // 参加した本人を除く全参加者に、追加後の参加者数つきで通知する
        let targets = room.participant_ids(Some(&connection_id));
        self.pusher
            .broadcast(
                targets,
                &OutboundEvent::ParticipantJoined {
                    display_name,
                    participant_count: count,
                },
            )
            .await;

        Ok(count)
    }

    async fn leave(&self, room_id: &RoomId, connection_id: &ConnectionId) -> LeaveOutcome {
        let Some(handle) = self.room_handle(room_id).await else {
            return LeaveOutcome {
                removed: false,
                remaining: 0,
                room_deleted: false,
            };
        };

        let outcome = {
            let mut room = handle.lock().await;

            let Some(departed) = room.remove_participant(connection_id) else {
                // 既に退出済み（切断シグナルの競合）。エラーではなく成功として扱う。
                return LeaveOutcome {
                    removed: false,
                    remaining: room.participant_count(),
                    room_deleted: false,
                };
            };

            let remaining = room.participant_count();
            if remaining == 0 {
                // マップエントリを消す前に closed を立て、並行する join を弾く
                room.close();
                LeaveOutcome {
                    removed: true,
                    remaining: 0,
                    room_deleted: true,
                }
            } else {
                let targets = room.participant_ids(None);
                self.pusher
                    .broadcast(
                        targets,
                        &OutboundEvent::ParticipantLeft {
                            display_name: departed.display_name,
                            participant_count: remaining,
                        },
                    )
                    .await;
                LeaveOutcome {
                    removed: true,
                    remaining,
                    room_deleted: false,
                }
            }
        };

        if outcome.room_deleted {
            let mut rooms = self.rooms.lock().await;
            rooms.remove(room_id);
            tracing::info!("Room '{}' deleted (no participants left)", room_id);
        }

        outcome
    }

    async fn broadcast_to_room(
        &self,
        room_id: &RoomId,
        event: OutboundEvent,
        exclude: Option<ConnectionId>,
    ) {
        // ルームが存在しない場合は何もしない（並行して削除された可能性がある）
        let Some(handle) = self.room_handle(room_id).await else {
            return;
        };

        let room = handle.lock().await;
        if room.is_closed() {
            return;
        }

        let targets = room.participant_ids(exclude.as_ref());
        self.pusher.broadcast(targets, &event).await;
    }
}
