//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! セットアップ段階のエラーはランを中断する。ステップ単位の失敗は
//! ここには含めず、`spoilcheck`側のレポート型で表現する。

use thiserror::Error;

/// ハーネスのエラー型
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Authentication failed (cached token rejected and credential exchange failed)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// ハーネス用Result型
pub type HarnessResult<T> = Result<T, HarnessError>;
