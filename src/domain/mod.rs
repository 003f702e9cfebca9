//! ドメイン層
//!
//! ルーム・参加者・イベントのドメインモデルと、Infrastructure 層が実装する
//! インターフェース（RoomRegistry / MessagePusher）を定義します。

pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod pusher;
pub mod registry;
pub mod value_object;

pub use entity::{Participant, Room};
pub use error::{MessagePushError, RegistryError, ValueObjectError};
pub use event::{InboundEvent, OutboundEvent};
pub use factory::{ConnectionIdFactory, DisplayNameFactory, RoomIdFactory};
pub use pusher::{MessagePusher, PusherChannel};
pub use registry::{LeaveOutcome, RoomRegistry};
pub use value_object::{ConnectionId, DisplayName, RoomId, Timestamp};
