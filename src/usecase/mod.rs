//! ユースケース層
//!
//! アプリケーションの操作単位を定義します。各ユースケースはドメイン層の
//! trait（RoomRegistry / MessagePusher / Clock）にのみ依存し、
//! WebSocket や HTTP の詳細を知りません。

pub mod create_room;
pub mod error;
pub mod get_room_info;
pub mod join_room;
pub mod leave_room;
pub mod notify_typing;
pub mod send_message;

pub use create_room::CreateRoomUseCase;
pub use error::{GetRoomInfoError, JoinError};
pub use get_room_info::GetRoomInfoUseCase;
pub use join_room::{JoinRoomUseCase, JoinedParticipant};
pub use leave_room::LeaveRoomUseCase;
pub use notify_typing::NotifyTypingUseCase;
pub use send_message::SendMessageUseCase;
