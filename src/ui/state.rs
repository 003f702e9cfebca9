//! Server state shared across request handlers.

use std::sync::Arc;

use crate::usecase::{
    CreateRoomUseCase, GetRoomInfoUseCase, JoinRoomUseCase, LeaveRoomUseCase, NotifyTypingUseCase,
    SendMessageUseCase,
};

/// Shared application state
pub struct AppState {
    /// CreateRoomUseCase（ルーム作成のユースケース）
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（ルーム退出のユースケース）
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// NotifyTypingUseCase（タイピング状態通知のユースケース）
    pub notify_typing_usecase: Arc<NotifyTypingUseCase>,
    /// GetRoomInfoUseCase（ルーム情報取得のユースケース）
    pub get_room_info_usecase: Arc<GetRoomInfoUseCase>,
}
