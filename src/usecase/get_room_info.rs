//! UseCase: ルーム情報取得処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - GetRoomInfoUseCase::execute() メソッド
//! - ルームのスナップショット取得
//!
//! ### なぜこのテストが必要か
//! - 参加せずにルームの存在と参加者数を確認できることを保証
//! - 存在しないルームに対してエラーが返ることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：既存ルームの情報取得
//! - 異常系：存在しない（または削除済みの）ルームの照会

use std::sync::Arc;

use crate::domain::{Room, RoomId, RoomRegistry};

use super::error::GetRoomInfoError;

/// ルーム情報取得のユースケース
pub struct GetRoomInfoUseCase {
    /// Registry（ルーム管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomInfoUseCase {
    /// 新しい GetRoomInfoUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// ルーム情報取得を実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - 照会するルームの ID（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(Room)` - 照会時点のルームのスナップショット
    /// * `Err(GetRoomInfoError)` - ルームが存在しない
    pub async fn execute(&self, room_id: &RoomId) -> Result<Room, GetRoomInfoError> {
        self.registry
            .get_room(room_id)
            .await
            .ok_or_else(|| GetRoomInfoError::RoomNotFound(room_id.clone()))
    }
}
