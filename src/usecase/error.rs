//! ユースケース層のエラー型定義

use thiserror::Error;

use crate::domain::RoomId;

/// ルーム参加時のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// 指定されたルームが存在しない
    #[error("room '{0}' not found")]
    RoomNotFound(RoomId),
}

/// ルーム情報取得時のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GetRoomInfoError {
    /// 指定されたルームが存在しない
    #[error("room '{0}' not found")]
    RoomNotFound(RoomId),
}
