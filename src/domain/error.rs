//! ドメイン層のエラー定義

use thiserror::Error;

use super::value_object::RoomId;

/// 値オブジェクト生成時の検証エラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// 空文字列は許容されない
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Registry 操作のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// 指定された ID のルームが存在しない
    ///
    /// join はルームを暗黙に作成しない。呼び出し元はクライアントへ
    /// エラー通知を送信し、セッションを終了する。
    #[error("room '{0}' not found")]
    RoomNotFound(RoomId),
}

/// メッセージ送信のエラー
///
/// ブロードキャスト中の個別送信失敗はファンアウトを中断せず、
/// 送信者にも伝播しない（ログに記録されるのみ）。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessagePushError {
    /// 接続ハンドルが登録されていない
    #[error("connection '{0}' not found")]
    ConnectionNotFound(String),

    /// 送信チャンネルへの書き込みに失敗した
    #[error("failed to push event to connection: {0}")]
    PushFailed(String),
}
