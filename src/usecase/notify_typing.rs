//! UseCase: タイピング状態通知処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - NotifyTypingUseCase::execute() メソッド
//! - タイピング状態の中継と送信者の除外
//!
//! ### なぜこのテストが必要か
//! - チャットメッセージと異なり送信者本人には届かないことを保証
//! - is_typing フラグが true / false ともそのまま中継されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：他の参加者へのタイピング通知
//! - エッジケース：参加者が送信者のみの場合（通知対象なし）

use std::sync::Arc;

use crate::domain::{OutboundEvent, Participant, RoomId, RoomRegistry};

/// タイピング状態通知のユースケース
pub struct NotifyTypingUseCase {
    /// Registry（ルーム管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl NotifyTypingUseCase {
    /// 新しい NotifyTypingUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// タイピング状態通知を実行
    ///
    /// サーバーはタイピング状態を保持しない。開始・停止とも単に中継する。
    ///
    /// # Arguments
    ///
    /// * `room_id` - 通知先ルームの ID（Domain Model）
    /// * `sender` - タイピング中の参加者（Domain Model）
    /// * `is_typing` - タイピング開始なら true、停止なら false
    pub async fn execute(&self, room_id: &RoomId, sender: &Participant, is_typing: bool) {
        // 送信者本人を除く全参加者へブロードキャスト
        self.registry
            .broadcast_to_room(
                room_id,
                OutboundEvent::TypingSignal {
                    display_name: sender.display_name.clone(),
                    is_typing,
                },
                Some(sender.connection_id.clone()),
            )
            .await;
    }
}
