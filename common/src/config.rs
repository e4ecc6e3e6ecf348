//! 設定管理
//!
//! 環境変数からのハーネス設定読み込み

use serde::{Deserialize, Serialize};

use crate::types::{Credentials, Token};

/// ベースURL指定用の環境変数
pub const BASE_URL_ENV: &str = "SPOILCHECK_BASE_URL";
/// キャッシュ済みトークン指定用の環境変数
pub const TOKEN_ENV: &str = "SPOILCHECK_TOKEN";
/// フォールバック認証ユーザー名の環境変数
pub const USERNAME_ENV: &str = "SPOILCHECK_USERNAME";
/// フォールバック認証パスワードの環境変数
pub const PASSWORD_ENV: &str = "SPOILCHECK_PASSWORD";

/// ハーネス設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HarnessConfig {
    /// サービスのベースURL (デフォルト: 本番StorySpoil API)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// キャッシュ済みBearerトークン（未設定なら即時ログイン）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_token: Option<String>,

    /// フォールバック認証のユーザー名
    #[serde(default = "default_username")]
    pub username: String,

    /// フォールバック認証のパスワード
    #[serde(default = "default_password")]
    pub password: String,
}

fn default_base_url() -> String {
    "https://d3s5nxhwblsjbi.cloudfront.net/api/".to_string()
}

fn default_username() -> String {
    "LilTest".to_string()
}

fn default_password() -> String {
    "liltest".to_string()
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            cached_token: None,
            username: default_username(),
            password: default_password(),
        }
    }
}

impl HarnessConfig {
    /// 環境変数から設定を読み込む
    ///
    /// 未設定の項目はデフォルト値になる。
    pub fn from_env() -> Self {
        Self {
            base_url: env_or(BASE_URL_ENV, default_base_url),
            cached_token: env_opt(TOKEN_ENV),
            username: env_or(USERNAME_ENV, default_username),
            password: env_or(PASSWORD_ENV, default_password),
        }
    }

    /// フォールバック資格情報を返す
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password)
    }

    /// キャッシュ済みトークンを返す（空文字列は未設定扱い）
    pub fn cached_token(&self) -> Option<Token> {
        self.cached_token.as_deref().and_then(Token::new)
    }
}

/// 環境変数を読む（未設定・空白のみは`None`）
fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// 環境変数を読む（未設定ならデフォルト値）
fn env_or(name: &str, default: fn() -> String) -> String {
    env_opt(name).unwrap_or_else(default)
}
