//! ID・表示名の生成
//!
//! ルーム ID・接続 ID・匿名表示名を生成するファクトリ。
//! 状態を持たない純粋なユーティリティです。

use rand::{Rng, seq::SliceRandom};
use uuid::Uuid;

use super::value_object::{ConnectionId, DisplayName, RoomId};

/// 匿名表示名のテーマ単語リスト
const ANONYMOUS_NAMES: &[&str] = &[
    "Falcon", "Otter", "Lynx", "Heron", "Badger", "Dolphin", "Ibis", "Marten", "Osprey", "Puffin",
    "Raccoon", "Swift", "Tapir", "Viper", "Wombat", "Gecko", "Jackal", "Kestrel", "Lemur", "Magpie",
];

/// ルーム ID を生成するファクトリ
pub struct RoomIdFactory;

impl RoomIdFactory {
    /// 新しいルーム ID を生成
    ///
    /// UUID v4（122 ビットのエントロピー）を 16 進数表記で 8 文字に切り詰め、
    /// 大文字に変換する。切り詰めにより衝突確率はゼロではないため、
    /// Registry 側で未使用であることを確認してから採用する。
    pub fn generate() -> RoomId {
        let token = Uuid::new_v4().simple().to_string();
        let id = token[..8].to_uppercase();
        RoomId::new(id).expect("generated room id should be valid")
    }
}

/// 接続 ID を生成するファクトリ
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// 新しい接続 ID を生成（UUID v4、ハイフン区切り）
    pub fn generate() -> ConnectionId {
        ConnectionId::new(Uuid::new_v4().to_string())
            .expect("generated connection id should be valid")
    }
}

/// 匿名表示名を生成するファクトリ
pub struct DisplayNameFactory;

impl DisplayNameFactory {
    /// 新しい表示名を生成
    ///
    /// テーマ単語リストから一様ランダムに 1 語選び、100〜999 の数値を
    /// 付加する。プロセス内での一意性は保証しない（衝突は許容される）。
    pub fn generate() -> DisplayName {
        let mut rng = rand::thread_rng();
        let word = ANONYMOUS_NAMES
            .choose(&mut rng)
            .expect("name list should not be empty");
        let suffix: u32 = rng.gen_range(100..1000);
        DisplayName::new(format!("{}{}", word, suffix))
            .expect("generated display name should be valid")
    }
}
