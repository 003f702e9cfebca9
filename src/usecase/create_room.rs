//! UseCase: ルーム作成処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CreateRoomUseCase::execute() メソッド
//! - ルーム作成処理（ID 生成、Registry への登録）
//!
//! ### なぜこのテストが必要か
//! - 作成されたルームが即座に参加可能であることを保証
//! - 作成時刻が Clock から取得されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：ルームの作成と取得
//! - エッジケース：連続作成時の ID の一意性

use std::sync::Arc;

use crate::common::time::Clock;
use crate::domain::{Room, RoomRegistry, Timestamp};

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    /// Registry（ルーム管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// Clock（現在時刻の抽象化）
    clock: Arc<dyn Clock>,
}

impl CreateRoomUseCase {
    /// 新しい CreateRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// ルーム作成を実行
    ///
    /// # Returns
    ///
    /// 作成されたルーム（Domain Model）。一意な ID が割り当て済み。
    pub async fn execute(&self) -> Room {
        // 1. 作成時刻を取得
        let created_at = Timestamp::new(self.clock.now_unix_millis());

        // 2. Registry 経由でルームを作成（ID 生成と重複回避は Registry の責務）
        let room = self.registry.create_room(created_at).await;

        tracing::info!("Room '{}' created", room.id);
        room
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use crate::common::time::FixedClock;
    use crate::infrastructure::{message_pusher::WebSocketMessagePusher, registry::InMemoryRoomRegistry};

    fn create_test_usecase() -> (CreateRoomUseCase, Arc<InMemoryRoomRegistry>) {
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let registry = Arc::new(InMemoryRoomRegistry::new(pusher));
        let clock = Arc::new(FixedClock::new(1700000000000));
        (CreateRoomUseCase::new(registry.clone(), clock), registry)
    }

    #[tokio::test]
    async fn test_create_room_assigns_id_and_timestamp() {
        // テスト項目: 作成されたルームが ID と作成時刻を持ち、即座に取得できる
        // given (前提条件):
        let (usecase, registry) = create_test_usecase();

        // when (操作):
        let room = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(room.id.as_str().len(), 8);
        assert_eq!(room.created_at, Timestamp::new(1700000000000));
        assert_eq!(room.participant_count(), 0);
        assert!(registry.room_exists(&room.id).await);
    }

    #[tokio::test]
    async fn test_create_room_ids_are_unique() {
        // テスト項目: 連続作成したルームの ID が重複しない
        // given (前提条件):
        let (usecase, _registry) = create_test_usecase();

        // when (操作):
        let mut ids = HashSet::new();
        for _ in 0..10 {
            let room = usecase.execute().await;
            ids.insert(room.id.into_string());
        }

        // then (期待する結果):
        assert_eq!(ids.len(), 10);
    }
}
