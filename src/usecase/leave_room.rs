//! UseCase: ルーム退出処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveRoomUseCase::execute() メソッド
//! - 退出処理（参加者削除、退出通知、接続ハンドルの登録解除）
//!
//! ### なぜこのテストが必要か
//! - 退出が冪等であること（二重退出がエラーにならない）を保証
//! - 接続ハンドルの登録解除が退出経路に関わらず必ず行われることを確認
//! - 最後の参加者の退出でルームが削除されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者の退出と残りの参加者への通知
//! - エッジケース：最後の参加者の退出（ルーム削除）
//! - エッジケース：同じ接続の二重退出（no-op 成功）

use std::sync::Arc;

use crate::domain::{ConnectionId, DisplayName, LeaveOutcome, MessagePusher, RoomId, RoomRegistry};

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    /// Registry（ルーム管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// MessagePusher（接続ハンドル管理の抽象化）
    pusher: Arc<dyn MessagePusher>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, pusher: Arc<dyn MessagePusher>) -> Self {
        Self { registry, pusher }
    }

    /// ルーム退出を実行
    ///
    /// 参加者が既に削除済みでも成功として扱う（切断シグナルは重複しうる）。
    ///
    /// # Arguments
    ///
    /// * `room_id` - 退出するルームの ID（Domain Model）
    /// * `connection_id` - 退出する接続の ID（Domain Model）
    /// * `display_name` - 退出する参加者の表示名（ログ用）
    ///
    /// # Returns
    ///
    /// 退出の結果（削除の有無、残り参加者数、ルーム削除の有無）
    pub async fn execute(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
        display_name: &DisplayName,
    ) -> LeaveOutcome {
        // 1. Registry 経由で退出（参加者削除・退出通知・空ルーム削除は Registry の責務）
        let outcome = self.registry.leave(room_id, connection_id).await;

        if outcome.removed {
            tracing::info!(
                "Participant '{}' left room '{}' ({} remaining)",
                display_name,
                room_id,
                outcome.remaining
            );
        } else {
            tracing::debug!(
                "Leave for '{}' in room '{}' was a no-op (already removed)",
                display_name,
                room_id
            );
        }

        // 2. 接続ハンドルを登録解除（退出の最終ステップ、経路に関わらず必ず実行）
        self.pusher.unregister_connection(connection_id).await;

        outcome
    }
}
