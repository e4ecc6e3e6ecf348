//! login サブコマンド
//!
//! 資格情報をトークンに交換し、取得したトークンを標準出力へ表示する。

use clap::Args;

use spoilcheck_common::config::HarnessConfig;

use crate::auth;

/// login サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    /// Service base URL
    #[arg(long, env = "SPOILCHECK_BASE_URL")]
    pub base_url: Option<String>,

    /// Login username
    #[arg(long, env = "SPOILCHECK_USERNAME")]
    pub username: Option<String>,

    /// Login password
    #[arg(long, env = "SPOILCHECK_PASSWORD")]
    pub password: Option<String>,
}

impl LoginArgs {
    /// 引数とデフォルトから設定を組み立てる
    pub fn into_config(self) -> HarnessConfig {
        let mut config = HarnessConfig::default();
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(username) = self.username {
            config.username = username;
        }
        if let Some(password) = self.password {
            config.password = password;
        }
        config
    }
}

/// Execute the login command
///
/// # Errors
/// ログインが拒否された場合、またはトークンが取得できなかった場合。
pub async fn execute(args: LoginArgs) -> Result<(), anyhow::Error> {
    let config = args.into_config();
    let token = auth::exchange(&config.credentials(), &config.base_url).await?;
    println!("{}", token.as_str());
    Ok(())
}
