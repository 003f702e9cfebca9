//! WebSocket wire messages.
//!
//! Both directions use internally-tagged JSON (`{"type": "message", ...}`).
//! The tag values are part of the wire protocol and must not change.

use serde::{Deserialize, Serialize};

// ========================================
// Client → Server
// ========================================

/// クライアントから受信するメッセージ
///
/// 未知の `type` は deserialize エラーになる（呼び出し側で警告して無視する）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    /// 接続維持の ping
    Ping {},

    /// チャットメッセージの送信
    Message {
        #[serde(default)]
        message: String,
    },

    /// タイピング状態の通知
    Typing {
        #[serde(default)]
        is_typing: bool,
    },
}

// ========================================
// Server → Client
// ========================================

/// サーバーから送信するメッセージ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// 入室成功（参加した本人にのみ送信）
    Connected {
        user_name: String,
        room_id: String,
        participant_count: usize,
    },

    /// 参加者の入室（本人以外に送信）
    UserJoined {
        user_name: String,
        participant_count: usize,
    },

    /// 参加者の退室（残りの参加者に送信）
    UserLeft {
        user_name: String,
        participant_count: usize,
    },

    /// チャットメッセージ（送信者本人を含む全員に送信）
    Message {
        user_name: String,
        message: String,
        timestamp: i64,
    },

    /// タイピング状態（送信者本人を除く全員に送信）
    Typing { user_name: String, is_typing: bool },

    /// ping への応答（送信者本人にのみ送信）
    Pong {},

    /// エラー通知
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - ワイヤーフォーマット（タグ名・フィールド名）の正確性
    // - 省略されたフィールドのデフォルト値
    // - 未知のタグのエラー
    //
    // 【なぜこのテストが必要か】
    // - タグ名とフィールド名はクライアントとの契約であり、
    //   enum のリネームで壊れてはならない
    // ========================================

    #[test]
    fn test_deserialize_ping() {
        // テスト項目: {"type":"ping"} が Ping にデシリアライズされる
        // given (前提条件):
        let raw = r#"{"type":"ping"}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(raw).unwrap();

        // then (期待する結果):
        assert_eq!(event, ClientEvent::Ping {});
    }

    #[test]
    fn test_deserialize_message() {
        // テスト項目: message タグのメッセージがテキストつきでデシリアライズされる
        // given (前提条件):
        let raw = r#"{"type":"message","message":"hello"}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(raw).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::Message {
                message: "hello".to_string()
            }
        );
    }

    #[test]
    fn test_deserialize_message_without_body_defaults_to_empty() {
        // テスト項目: message フィールド省略時に空文字列になる
        // given (前提条件):
        let raw = r#"{"type":"message"}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(raw).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::Message {
                message: String::new()
            }
        );
    }

    #[test]
    fn test_deserialize_typing_without_flag_defaults_to_false() {
        // テスト項目: is_typing フィールド省略時に false になる
        // given (前提条件):
        let raw = r#"{"type":"typing"}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(raw).unwrap();

        // then (期待する結果):
        assert_eq!(event, ClientEvent::Typing { is_typing: false });
    }

    #[test]
    fn test_deserialize_unknown_tag_is_error() {
        // テスト項目: 未知のタグがデシリアライズエラーになる
        // given (前提条件):
        let raw = r#"{"type":"shout","message":"HEY"}"#;

        // when (操作):
        let result = serde_json::from_str::<ClientEvent>(raw);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_connected() {
        // テスト項目: Connected が期待するワイヤーフォーマットになる
        // given (前提条件):
        let event = ServerEvent::Connected {
            user_name: "Otter123".to_string(),
            room_id: "A1B2C3D4".to_string(),
            participant_count: 2,
        };

        // when (操作):
        let value = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({
                "type": "connected",
                "user_name": "Otter123",
                "room_id": "A1B2C3D4",
                "participant_count": 2
            })
        );
    }

    #[test]
    fn test_serialize_user_joined_and_left() {
        // テスト項目: 入退室通知のタグが snake_case になる
        // given (前提条件):
        let joined = ServerEvent::UserJoined {
            user_name: "Falcon512".to_string(),
            participant_count: 3,
        };
        let left = ServerEvent::UserLeft {
            user_name: "Falcon512".to_string(),
            participant_count: 2,
        };

        // when (操作):
        let joined_value = serde_json::to_value(&joined).unwrap();
        let left_value = serde_json::to_value(&left).unwrap();

        // then (期待する結果):
        assert_eq!(joined_value["type"], "user_joined");
        assert_eq!(left_value["type"], "user_left");
        assert_eq!(joined_value["participant_count"], 3);
        assert_eq!(left_value["participant_count"], 2);
    }

    #[test]
    fn test_serialize_message_includes_timestamp() {
        // テスト項目: チャットメッセージにタイムスタンプが含まれる
        // given (前提条件):
        let event = ServerEvent::Message {
            user_name: "Otter123".to_string(),
            message: "hello".to_string(),
            timestamp: 1700000000000,
        };

        // when (操作):
        let value = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({
                "type": "message",
                "user_name": "Otter123",
                "message": "hello",
                "timestamp": 1700000000000_i64
            })
        );
    }

    #[test]
    fn test_serialize_pong_has_only_tag() {
        // テスト項目: Pong がタグのみの JSON になる
        // given (前提条件):
        let event = ServerEvent::Pong {};

        // when (操作):
        let value = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(value, json!({"type": "pong"}));
    }

    #[test]
    fn test_serialize_error() {
        // テスト項目: エラー通知が message フィールドを持つ
        // given (前提条件):
        let event = ServerEvent::Error {
            message: "Room not found".to_string(),
        };

        // when (操作):
        let value = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({"type": "error", "message": "Room not found"})
        );
    }
}
