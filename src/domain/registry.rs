//! RoomRegistry trait 定義
//!
//! ドメイン層が必要とするルーム・接続管理のインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## 線形化の保証
//!
//! 同一ルームに対する join / leave / broadcast は実装側で直列化され、
//! クライアントが観測するイベント順序は操作の実行順序と一致する。
//! 通知に含まれる参加者数は、引き金となった変更の直後の値を変更と
//! 不可分に計算したものである。異なるルームへの操作は互いにブロックしない。

use async_trait::async_trait;

use super::{
    entity::{Participant, Room},
    error::RegistryError,
    event::OutboundEvent,
    pusher::PusherChannel,
    value_object::{ConnectionId, RoomId, Timestamp},
};

/// leave 操作の結果
///
/// 退出の冪等性を型で表現する。既に不在の接続に対する leave は
/// `removed = false` の成功として扱う（切断シグナルの競合を許容）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaveOutcome {
    /// この呼び出しで参加者が削除されたか（false = 既に不在）
    pub removed: bool,
    /// 削除後の残り参加者数
    pub remaining: usize,
    /// この呼び出しでルームが削除されたか
    pub room_deleted: bool,
}

/// Room Registry trait
///
/// ルームの集合と各ルームの参加者リスト、および接続ハンドルとの整合性を
/// 管理するインターフェース。UseCase 層はこの trait に依存し、
/// Infrastructure 層の具体的な実装には依存しない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// 新しいルームを作成して登録する
    ///
    /// 未使用のルーム ID を採番し、空の参加者リストを持つルームを返す。
    /// 通常運用では失敗しない。
    async fn create_room(&self, created_at: Timestamp) -> Room;

    /// ルームのスナップショットを取得（読み取り専用）
    async fn get_room(&self, room_id: &RoomId) -> Option<Room>;

    /// ルームが存在するか
    async fn room_exists(&self, room_id: &RoomId) -> bool;

    /// 参加者をルームに追加する
    ///
    /// 接続ハンドルを登録し、参加者リストへ追加し、本人を除く全参加者へ
    /// 参加通知をブロードキャストする。追加後の参加者数を返す。
    ///
    /// ルームが存在しない場合は `RoomNotFound` を返し、状態を一切変更しない
    /// （join はルームを暗黙に作成しない）。
    async fn join(
        &self,
        room_id: &RoomId,
        participant: Participant,
        sender: PusherChannel,
    ) -> Result<usize, RegistryError>;

    /// 参加者をルームから削除する
    ///
    /// 参加者が残っている場合は残りの全参加者へ退出通知をブロードキャスト
    /// する。参加者数が 0 になった場合はルームを Registry から削除する。
    /// 既に不在の場合は no-op（冪等）。
    ///
    /// 接続ハンドルの登録解除は呼び出し側（LeaveRoomUseCase）が最後の
    /// ステップとして行う。
    async fn leave(&self, room_id: &RoomId, connection_id: &ConnectionId) -> LeaveOutcome;

    /// ルームの参加者へイベントをブロードキャストする
    ///
    /// 参加順にファンアウトし、exclude が指定された場合はその接続を除く。
    /// ルームが存在しない場合は何もしない（並行して削除された可能性がある
    /// ため、エラーではない）。
    async fn broadcast_to_room(
        &self,
        room_id: &RoomId,
        event: OutboundEvent,
        exclude: Option<ConnectionId>,
    );
}
