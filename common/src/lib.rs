//! spoilcheck共通クレート
//!
//! ハーネスとStorySpoilサービス間で共有するワイヤ型・プロトコル定義・
//! 設定・エラー型

#![warn(missing_docs)]

/// 設定管理
pub mod config;

/// エラー型定義
pub mod error;

/// 通信プロトコル定義
pub mod protocol;

/// 共通型定義
pub mod types;
