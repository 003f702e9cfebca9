//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 匿名 ID 生成と Registry への参加登録
//!
//! ### なぜこのテストが必要か
//! - 接続ごとに新しい匿名 ID が割り当てられることを保証
//! - 存在しないルームへの参加がルームを作成しないことを確認
//! - 参加後の参加者数が正しく返されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：既存ルームへの参加
//! - 異常系：存在しないルームへの参加試行
//! - エッジケース：同一人物の再接続（毎回別の ID になる）

use std::sync::Arc;

use crate::common::time::Clock;
use crate::domain::{
    ConnectionIdFactory, DisplayNameFactory, Participant, PusherChannel, RegistryError,
    RoomId, RoomRegistry, Timestamp,
};

use super::error::JoinError;

/// 参加に成功した接続の情報
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedParticipant {
    /// 参加者（この接続に割り当てられた匿名 ID を含む）
    pub participant: Participant,
    /// 参加直後の参加者数（本人を含む）
    pub participant_count: usize,
}

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Registry（ルーム管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// Clock（現在時刻の抽象化）
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - 参加するルームの ID（Domain Model）
    /// * `sender` - この接続へのイベント送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(JoinedParticipant)` - 参加成功（割り当てられた匿名 ID と参加者数）
    /// * `Err(JoinError)` - ルームが存在しない（ルームは作成されない）
    pub async fn execute(
        &self,
        room_id: &RoomId,
        sender: PusherChannel,
    ) -> Result<JoinedParticipant, JoinError> {
        // 1. この接続の匿名 ID を生成（アカウントや再利用はない）
        let connection_id = ConnectionIdFactory::generate();
        let display_name = DisplayNameFactory::generate();
        let joined_at = Timestamp::new(self.clock.now_unix_millis());
        let participant = Participant::new(connection_id, display_name, joined_at);

        // 2. Registry 経由で参加（ハンドル登録・リスト追加・入室通知は Registry の責務）
        let participant_count = self
            .registry
            .join(room_id, participant.clone(), sender)
            .await
            .map_err(|err| match err {
                RegistryError::RoomNotFound(id) => JoinError::RoomNotFound(id),
            })?;

        tracing::info!(
            "Participant '{}' joined room '{}' ({} participants)",
            participant.display_name,
            room_id,
            participant_count
        );

        Ok(JoinedParticipant {
            participant,
            participant_count,
        })
    }
}
