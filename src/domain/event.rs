//! ドメインイベント定義
//!
//! セッションハンドラと交換されるイベントの閉じた集合。
//! ワイヤ形式（JSON）との変換は Infrastructure 層の DTO が担当し、
//! ドメイン層はシリアライズ形式に依存しません。

use super::value_object::{DisplayName, RoomId, Timestamp};

/// クライアントから受信するイベント
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// キープアライブ（ping）
    Keepalive,
    /// チャットメッセージ送信
    ChatMessage { text: String },
    /// タイピング状態の変化
    TypingSignal { is_typing: bool },
}

/// クライアントへ送信するイベント
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundEvent {
    /// 参加受理（参加した本人にのみ直接送信、ブロードキャストしない）
    JoinAccepted {
        display_name: DisplayName,
        room_id: RoomId,
        participant_count: usize,
    },
    /// 参加通知（参加した本人を除く全参加者へブロードキャスト）
    ParticipantJoined {
        display_name: DisplayName,
        participant_count: usize,
    },
    /// 退出通知（残りの全参加者へブロードキャスト）
    ParticipantLeft {
        display_name: DisplayName,
        participant_count: usize,
    },
    /// チャットメッセージ（送信者を含む全参加者へブロードキャスト）
    ChatMessage {
        display_name: DisplayName,
        text: String,
        timestamp: Timestamp,
    },
    /// タイピング通知（送信者を除く全参加者へブロードキャスト）
    TypingSignal {
        display_name: DisplayName,
        is_typing: bool,
    },
    /// キープアライブ応答（pong、送信者にのみ返す）
    KeepaliveAck,
    /// エラー通知
    ErrorNotice { reason: String },
}
