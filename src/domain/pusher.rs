//! MessagePusher trait 定義
//!
//! ドメイン層が必要とするイベント送信のインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{
    error::MessagePushError,
    event::OutboundEvent,
    value_object::ConnectionId,
};

/// クライアントへイベントを送信するためのチャンネル
///
/// 受信側（`UnboundedReceiver`）は各接続のセッションハンドラが保持し、
/// 受け取ったイベントをワイヤ形式へ変換して WebSocket に書き込む。
/// unbounded チャンネルへの送信はブロックしないため、遅いクライアントが
/// ルームのブロードキャストを停滞させることはない。
pub type PusherChannel = mpsc::UnboundedSender<OutboundEvent>;

/// MessagePusher trait
///
/// 接続ハンドル（connection_id → sender）の管理とイベント送信のインターフェース。
/// UseCase 層・Registry はこの trait に依存し、Infrastructure 層の具体的な
/// 実装には依存しない。
///
/// ## 接続ハンドルのライフサイクル
///
/// - join 時に参加者リストへの追加前に登録される
/// - leave 時に最後のステップとして登録解除される
///
/// この順序により、参加者リストに存在する接続には常にハンドルが存在する。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続ハンドルを登録
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続ハンドルを登録解除
    ///
    /// 存在しない場合は no-op（冪等）。
    async fn unregister_connection(&self, connection_id: &ConnectionId);

    /// 特定の接続にイベントを送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: OutboundEvent,
    ) -> Result<(), MessagePushError>;

    /// 複数の接続にイベントをブロードキャスト
    ///
    /// 個々の送信失敗はログに記録してスキップし、残りの送信を継続する。
    /// 失敗は呼び出し元に伝播せず、接続の後始末も行わない（後始末は
    /// 切断シグナルを受けた leave 処理だけが行う）。
    async fn broadcast(&self, targets: Vec<ConnectionId>, event: &OutboundEvent);
}
