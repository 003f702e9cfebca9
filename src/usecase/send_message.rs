//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - チャットメッセージのタイムスタンプ付与とブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 送信者本人にもメッセージが届く（エコー）ことを保証
//! - タイムスタンプがサーバー側の Clock から付与されることを確認
//! - 存在しないルームへの送信が無害であることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数参加者へのブロードキャスト
//! - エッジケース：空文字列のメッセージ（そのまま中継される）
//! - エッジケース：ルームが並行して削除された直後の送信

use std::sync::Arc;

use crate::common::time::Clock;
use crate::domain::{OutboundEvent, Participant, RoomId, RoomRegistry, Timestamp};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Registry（ルーム管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// Clock（現在時刻の抽象化）
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// メッセージ送信を実行
    ///
    /// メッセージ内容は検証せずそのまま中継する。ルームが存在しない場合は
    /// 何もしない。
    ///
    /// # Arguments
    ///
    /// * `room_id` - 送信先ルームの ID（Domain Model）
    /// * `sender` - 送信者（Domain Model）
    /// * `text` - メッセージ本文（空文字列もそのまま中継する）
    pub async fn execute(&self, room_id: &RoomId, sender: &Participant, text: String) {
        // 1. サーバー側でタイムスタンプを付与
        let timestamp = Timestamp::new(self.clock.now_unix_millis());

        // 2. 送信者本人を含む全参加者へブロードキャスト（除外なし）
        self.registry
            .broadcast_to_room(
                room_id,
                OutboundEvent::ChatMessage {
                    display_name: sender.display_name.clone(),
                    text,
                    timestamp,
                },
                None,
            )
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::sync::mpsc;

    use crate::common::time::FixedClock;
    use crate::domain::registry::MockRoomRegistry;
    use crate::domain::{ConnectionIdFactory, DisplayNameFactory};
    use crate::infrastructure::{message_pusher::WebSocketMessagePusher, registry::InMemoryRoomRegistry};

    fn create_test_stack() -> (SendMessageUseCase, Arc<InMemoryRoomRegistry>) {
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let registry = Arc::new(InMemoryRoomRegistry::new(pusher));
        let clock = Arc::new(FixedClock::new(1700000000000));
        (SendMessageUseCase::new(registry.clone(), clock), registry)
    }

    fn test_participant() -> Participant {
        Participant::new(
            ConnectionIdFactory::generate(),
            DisplayNameFactory::generate(),
            Timestamp::new(1000),
        )
    }

    async fn join_new(
        registry: &InMemoryRoomRegistry,
        room_id: &RoomId,
    ) -> (Participant, mpsc::UnboundedReceiver<OutboundEvent>) {
        let participant = test_participant();
        let (tx, rx) = mpsc::unbounded_channel();
        registry
            .join(room_id, participant.clone(), tx)
            .await
            .expect("join should succeed");
        (participant, rx)
    }

    #[tokio::test]
    async fn test_message_echoes_to_sender_and_reaches_others() {
        // テスト項目: メッセージが送信者本人と他の参加者の両方に届く
        // given (前提条件):
        let (usecase, registry) = create_test_stack();
        let room = registry.create_room(Timestamp::new(1000)).await;
        let (a, mut rx_a) = join_new(&registry, &room.id).await;
        let (_b, mut rx_b) = join_new(&registry, &room.id).await;
        rx_a.recv().await.unwrap(); // b の参加通知を読み捨てる

        // when (操作): a がメッセージを送信
        usecase.execute(&room.id, &a, "Hello!".to_string()).await;

        // then (期待する結果): 双方が同じイベントを受信する
        let expected = OutboundEvent::ChatMessage {
            display_name: a.display_name.clone(),
            text: "Hello!".to_string(),
            timestamp: Timestamp::new(1700000000000),
        };
        assert_eq!(rx_a.recv().await.unwrap(), expected);
        assert_eq!(rx_b.recv().await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_empty_message_is_relayed_as_is() {
        // テスト項目: 空文字列のメッセージが拒否されずそのまま中継される
        // given (前提条件):
        let (usecase, registry) = create_test_stack();
        let room = registry.create_room(Timestamp::new(1000)).await;
        let (a, mut rx_a) = join_new(&registry, &room.id).await;

        // when (操作):
        usecase.execute(&room.id, &a, String::new()).await;

        // then (期待する結果):
        let event = rx_a.recv().await.unwrap();
        assert_eq!(
            event,
            OutboundEvent::ChatMessage {
                display_name: a.display_name.clone(),
                text: String::new(),
                timestamp: Timestamp::new(1700000000000),
            }
        );
    }

    #[tokio::test]
    async fn test_message_to_missing_room_is_silent_noop() {
        // テスト項目: 存在しないルームへの送信が何も起こさず成功する
        // given (前提条件):
        let (usecase, _registry) = create_test_stack();
        let unknown = RoomId::new("FFFFFFFF".to_string()).unwrap();
        let sender = test_participant();

        // when (操作):
        usecase.execute(&unknown, &sender, "hello".to_string()).await;

        // then (期待する結果): パニックせず完了する
    }

    #[tokio::test]
    async fn test_broadcast_is_called_without_exclusion() {
        // テスト項目: ブロードキャストが除外なし・Clock のタイムスタンプつきで呼ばれる
        // given (前提条件):
        let mut registry = MockRoomRegistry::new();
        let room_id = RoomId::new("A1B2C3D4".to_string()).unwrap();
        let expected_room_id = room_id.clone();
        registry
            .expect_broadcast_to_room()
            .withf(move |room_id, event, exclude| {
                room_id == &expected_room_id
                    && exclude.is_none()
                    && matches!(
                        event,
                        OutboundEvent::ChatMessage { timestamp, .. }
                            if timestamp.value() == 1700000000000
                    )
            })
            .times(1)
            .returning(|_, _, _| ());

        let clock = Arc::new(FixedClock::new(1700000000000));
        let usecase = SendMessageUseCase::new(Arc::new(registry), clock);
        let sender = test_participant();

        // when (操作):
        usecase.execute(&room_id, &sender, "hello".to_string()).await;

        // then (期待する結果): expect_broadcast_to_room の検証が通る
    }
}
