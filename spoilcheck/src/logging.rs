//! ロギング初期化ユーティリティ
//!
//! tracing-subscriberをコンソール出力で初期化する。ハーネスのコアは
//! ログファイルを含め一切のファイルを生成しない。

use tracing_subscriber::EnvFilter;

/// ログレベル指定用の環境変数
pub const LOG_LEVEL_ENV: &str = "SPOILCHECK_LOG_LEVEL";

/// ロギングを初期化する
///
/// レベルは`SPOILCHECK_LOG_LEVEL`から読み、未設定なら`info`。
///
/// # Errors
/// サブスクライバーの二重初期化などで失敗した場合。
pub fn init() -> Result<(), String> {
    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| format!("Failed to initialize logging: {e}"))
}
