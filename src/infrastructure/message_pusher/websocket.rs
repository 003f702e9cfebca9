//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ハンドル（connection_id → `UnboundedSender`）の管理
//! - クライアントへのイベント送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された sender を受け取り、イベント送信に使用します。
//! イベントのシリアライズは各接続の pusher タスクが行うため、
//! この層はワイヤ形式に依存しません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, OutboundEvent, PusherChannel};

/// WebSocket を使った MessagePusher 実装
///
/// ## フィールド
///
/// - `connections`: 接続中のクライアントと対応する sender のマップ
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの WebSocket sender
    ///
    /// Key: ConnectionId
    /// Value: PusherChannel
    connections: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut connections = self.connections.lock().await;
        connections.insert(connection_id.clone(), sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
    }

    async fn unregister_connection(&self, connection_id: &ConnectionId) {
        let mut connections = self.connections.lock().await;
        connections.remove(connection_id);
        tracing::debug!(
            "Connection '{}' unregistered from MessagePusher",
            connection_id
        );
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: OutboundEvent,
    ) -> Result<(), MessagePushError> {
        let connections = self.connections.lock().await;

        if let Some(sender) = connections.get(connection_id) {
            sender
                .send(event)
                .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
            tracing::debug!("Pushed event to connection '{}'", connection_id);
            Ok(())
        } else {
            Err(MessagePushError::ConnectionNotFound(
                connection_id.as_str().to_string(),
            ))
        }
    }

    async fn broadcast(&self, targets: Vec<ConnectionId>, event: &OutboundEvent) {
        let connections = self.connections.lock().await;

        for target in targets {
            if let Some(sender) = connections.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容する。
                // 失敗した接続の後始末はここでは行わない（切断処理の責務）。
                if let Err(e) = sender.send(event.clone()) {
                    tracing::warn!("Failed to push event to connection '{}': {}", target, e);
                } else {
                    tracing::debug!("Broadcasted event to connection '{}'", target);
                }
            } else {
                tracing::warn!("Connection '{}' not found during broadcast, skipping", target);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - WebSocketMessagePusher の基本的なイベント送信機能
    // - push_to: 特定の接続への送信
    // - broadcast: 複数接続への送信
    // - エラーハンドリング（存在しない接続、閉じられたチャンネル）
    //
    // 【なぜこのテストが必要か】
    // - MessagePusher は Registry から呼ばれる通信層の中核
    // - ブロードキャストの部分失敗がファンアウトを中断しないことを保証する
    // - 登録・登録解除の冪等性を検証する
    //
    // 【どのようなシナリオをテストするか】
    // 1. push_to の成功ケース
    // 2. push_to の失敗ケース（接続が存在しない）
    // 3. broadcast の成功ケース（複数接続）
    // 4. broadcast の部分失敗ケース（一部の接続が存在しない・閉じられている）
    // 5. unregister の冪等性
    // ========================================

    fn test_connection_id(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定の接続にイベントを送信できる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let alice = test_connection_id("conn-alice");
        pusher.register_connection(alice.clone(), tx).await;

        // when (操作):
        let result = pusher.push_to(&alice, OutboundEvent::KeepaliveAck).await;

        // then (期待する結果):
        assert!(result.is_ok());
        let received = rx.recv().await;
        assert_eq!(received, Some(OutboundEvent::KeepaliveAck));
    }

    #[tokio::test]
    async fn test_push_to_connection_not_found() {
        // テスト項目: 存在しない接続への送信はエラーを返す
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let unknown = test_connection_id("conn-unknown");

        // when (操作):
        let result = pusher.push_to(&unknown, OutboundEvent::KeepaliveAck).await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(MessagePushError::ConnectionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_broadcast_delivers_to_all_targets() {
        // テスト項目: 複数の接続にイベントをブロードキャストできる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let alice = test_connection_id("conn-alice");
        let bob = test_connection_id("conn-bob");
        pusher.register_connection(alice.clone(), tx1).await;
        pusher.register_connection(bob.clone(), tx2).await;

        // when (操作):
        let event = OutboundEvent::ErrorNotice {
            reason: "test".to_string(),
        };
        pusher.broadcast(vec![alice, bob], &event).await;

        // then (期待する結果):
        assert_eq!(rx1.recv().await, Some(event.clone()));
        assert_eq!(rx2.recv().await, Some(event));
    }

    #[tokio::test]
    async fn test_broadcast_skips_unregistered_target() {
        // テスト項目: ブロードキャスト時、一部の接続が存在しなくても継続する
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let alice = test_connection_id("conn-alice");
        let unknown = test_connection_id("conn-unknown");
        pusher.register_connection(alice.clone(), tx1).await;

        // when (操作):
        let event = OutboundEvent::KeepaliveAck;
        pusher.broadcast(vec![unknown, alice], &event).await;

        // then (期待する結果): 存在する接続には届く
        assert_eq!(rx1.recv().await, Some(OutboundEvent::KeepaliveAck));
    }

    #[tokio::test]
    async fn test_broadcast_continues_after_closed_channel() {
        // テスト項目: 閉じられたチャンネルへの送信失敗が残りの送信を中断しない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx1, rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let alice = test_connection_id("conn-alice");
        let bob = test_connection_id("conn-bob");
        pusher.register_connection(alice.clone(), tx1).await;
        pusher.register_connection(bob.clone(), tx2).await;

        // alice の受信側を閉じる（書き込み失敗を誘発）
        drop(rx1);

        // when (操作):
        let event = OutboundEvent::KeepaliveAck;
        pusher.broadcast(vec![alice, bob], &event).await;

        // then (期待する結果): bob には届く
        assert_eq!(rx2.recv().await, Some(OutboundEvent::KeepaliveAck));
    }

    #[tokio::test]
    async fn test_broadcast_empty_targets() {
        // テスト項目: 空のターゲットリストでもエラーにならない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();

        // when (操作):
        pusher.broadcast(vec![], &OutboundEvent::KeepaliveAck).await;

        // then (期待する結果): パニックせず完了する
    }

    #[tokio::test]
    async fn test_unregister_is_idempotent() {
        // テスト項目: 登録されていない接続の登録解除は no-op（冪等性）
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let alice = test_connection_id("conn-alice");
        pusher.register_connection(alice.clone(), tx).await;

        // when (操作):
        pusher.unregister_connection(&alice).await;
        pusher.unregister_connection(&alice).await;

        // then (期待する結果): 2 回目の解除後も送信はエラーになる
        let result = pusher.push_to(&alice, OutboundEvent::KeepaliveAck).await;
        assert!(matches!(
            result,
            Err(MessagePushError::ConnectionNotFound(_))
        ));
    }
}
