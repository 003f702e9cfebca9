//! ルーム・接続管理の実装
//!
//! ## 概要
//!
//! このモジュールは `RoomRegistry` trait の具体的な実装を提供します。
//!
//! ## 実装
//!
//! - `inmemory`: HashMap をストアとして使う単一プロセス実装

pub mod inmemory;

pub use inmemory::InMemoryRoomRegistry;
