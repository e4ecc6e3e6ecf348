//! run サブコマンド
//!
//! 認証を解決し、宣言済みステップ列を実行して結果を表示する。

use clap::Args;
use tracing::info;

use spoilcheck_common::config::HarnessConfig;

use crate::{auth, workflow};

/// run サブコマンドの引数
///
/// フラグ未指定時は対応する環境変数、どちらもなければデフォルト値。
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Service base URL
    #[arg(long, env = "SPOILCHECK_BASE_URL")]
    pub base_url: Option<String>,

    /// Cached bearer token to try before logging in
    #[arg(long, env = "SPOILCHECK_TOKEN")]
    pub token: Option<String>,

    /// Fallback login username
    #[arg(long, env = "SPOILCHECK_USERNAME")]
    pub username: Option<String>,

    /// Fallback login password
    #[arg(long, env = "SPOILCHECK_PASSWORD")]
    pub password: Option<String>,
}

impl RunArgs {
    /// 引数とデフォルトから設定を組み立てる
    pub fn into_config(self) -> HarnessConfig {
        let mut config = HarnessConfig::default();
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        config.cached_token = self.token;
        if let Some(username) = self.username {
            config.username = username;
        }
        if let Some(password) = self.password {
            config.password = password;
        }
        config
    }
}

/// Execute the run command
///
/// # Errors
/// 認証解決に失敗した場合、またはいずれかのステップが失敗した場合。
pub async fn execute(args: RunArgs) -> Result<(), anyhow::Error> {
    let config = args.into_config();
    info!(base_url = %config.base_url, "Starting contract run");

    let client = auth::resolve(&config).await?;
    let report = workflow::run(&client).await;

    print!("{}", report.render());

    if report.all_passed() {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "{} of {} steps failed",
            report.failed_count(),
            report.steps().len()
        ))
    }
}
