//! ドメインエンティティ定義
//!
//! Room（チャットルーム）と Participant（参加者）のエンティティ。
//! Room の参加者リストは参加順を保持し、接続 ID で一意です。

use super::value_object::{ConnectionId, DisplayName, RoomId, Timestamp};

/// ルーム内の参加者
///
/// 接続ごとに生成され、同時に複数のルームに所属することはない。
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    /// 接続 ID（接続ごとに一意、再利用されない）
    pub connection_id: ConnectionId,
    /// 匿名表示名（接続の間は不変）
    pub display_name: DisplayName,
    /// 参加時刻
    pub joined_at: Timestamp,
}

impl Participant {
    /// 新しい Participant を作成
    pub fn new(connection_id: ConnectionId, display_name: DisplayName, joined_at: Timestamp) -> Self {
        Self {
            connection_id,
            display_name,
            joined_at,
        }
    }
}

/// チャットルーム
///
/// 明示的な作成リクエストでのみ作成され、最後の参加者が退出した瞬間に
/// Registry から削除される。参加者が残っている間は削除されない。
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    /// ルーム ID（作成時に生成、不変）
    pub id: RoomId,
    /// 作成時刻
    pub created_at: Timestamp,
    /// 参加者リスト（挿入順 = 参加順）
    pub participants: Vec<Participant>,
    /// 削除済みフラグ
    ///
    /// 最後の退出で true になる。Registry のマップから削除される前に
    /// このフラグが立つため、削除と並行した join はルームを復活させられない。
    closed: bool,
}

impl Room {
    /// 新しい Room を作成（参加者リストは空）
    pub fn new(id: RoomId, created_at: Timestamp) -> Self {
        Self {
            id,
            created_at,
            participants: Vec::new(),
            closed: false,
        }
    }

    /// 参加者を追加
    ///
    /// connection_id の一意性は ID 生成側（UUID v4）が保証する。
    pub fn add_participant(&mut self, participant: Participant) {
        self.participants.push(participant);
    }

    /// 参加者を削除し、削除された参加者を返す
    ///
    /// 既に存在しない場合は None を返す（冪等）。
    pub fn remove_participant(&mut self, connection_id: &ConnectionId) -> Option<Participant> {
        let index = self
            .participants
            .iter()
            .position(|p| &p.connection_id == connection_id)?;
        Some(self.participants.remove(index))
    }

    /// 参加者数を取得
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// 参加者がいないか
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// ルームを削除済みとしてマーク
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// ルームが削除済みか
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// 参加者の接続 ID リストを取得（参加順）
    ///
    /// exclude が指定された場合、その接続 ID を除く。
    pub fn participant_ids(&self, exclude: Option<&ConnectionId>) -> Vec<ConnectionId> {
        self.participants
            .iter()
            .map(|p| &p.connection_id)
            .filter(|id| Some(*id) != exclude)
            .cloned()
            .collect()
    }
}
