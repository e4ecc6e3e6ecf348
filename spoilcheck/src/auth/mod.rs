//! 認証解決
//!
//! キャッシュ済みトークンのプローブと、拒否時の資格情報ログインによる
//! フォールバック。解決はランの開始前に一度だけ行われ、失敗した場合は
//! ステップを一つも実行せずランを中断する。

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{info, warn};

use spoilcheck_common::config::HarnessConfig;
use spoilcheck_common::error::{HarnessError, HarnessResult};
use spoilcheck_common::protocol::{field_ci, AuthRequest, AUTH_PATH, STORY_ALL_PATH};
use spoilcheck_common::types::{Credentials, Token};

use crate::client::{StoryClient, HTTP_TIMEOUT_SECS};

/// トークンプローブの判定結果
///
/// 認証失敗系のステータスのみを拒否とみなす。それ以外（5xx等）は
/// プローブの関心外であり、最初の実ステップで表面化させる。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// トークンは受理された（または認証以外の理由で判定不能）
    Accepted,
    /// トークンは拒否された（401/403）
    Rejected,
}

impl ProbeOutcome {
    /// ステータスコードからプローブ結果を判定する
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Rejected,
            _ => Self::Accepted,
        }
    }
}

/// 認証を解決し、検証済みのクライアントを返す
///
/// キャッシュ済みトークンでクライアントを構築して`Story/All`をプローブし、
/// 401/403なら資格情報でログインして新しいトークンで組み直す。
/// キャッシュトークンが設定されていない場合はプローブを省略して直接
/// ログインする。
///
/// # Errors
/// ログインが拒否された、またはトークンフィールドが欠落/空の場合は
/// `HarnessError::Authentication`。
pub async fn resolve(config: &HarnessConfig) -> HarnessResult<StoryClient> {
    let credentials = config.credentials();

    let Some(cached) = config.cached_token() else {
        info!("No cached token configured, requesting a fresh one");
        let token = exchange(&credentials, &config.base_url).await?;
        return StoryClient::new(&config.base_url, token);
    };

    let client = StoryClient::new(&config.base_url, cached)?;
    match probe(&client).await {
        ProbeOutcome::Accepted => {
            info!("Using cached token");
            Ok(client)
        }
        ProbeOutcome::Rejected => {
            warn!("Cached token rejected, requesting a fresh one");
            let token = exchange(&credentials, &config.base_url).await?;
            info!("Obtained a fresh token");
            StoryClient::new(&config.base_url, token)
        }
    }
}

/// キャッシュ済みトークンの受理状態を問い合わせる
///
/// プローブ自体のトランスポート障害は拒否として扱わない。到達性の問題は
/// 認証の問題ではないため、最初の実ステップに表面化を委ねる。
async fn probe(client: &StoryClient) -> ProbeOutcome {
    match client.send(Method::GET, STORY_ALL_PATH).await {
        Ok(observed) => ProbeOutcome::from_status(observed.status),
        Err(err) => {
            warn!(error = %err, "Token probe failed at transport level");
            ProbeOutcome::Accepted
        }
    }
}

/// 資格情報をトークンに交換する
///
/// `User/Authentication`にログインし、応答から`accessToken`フィールドを
/// 大文字小文字を無視して取り出す。
///
/// # Errors
/// リクエストが失敗した、ステータスが成功でない、またはトークン
/// フィールドが欠落/空の場合は`HarnessError::Authentication`。
pub async fn exchange(credentials: &Credentials, base_url: &str) -> HarnessResult<Token> {
    if !credentials.is_valid() {
        return Err(HarnessError::Authentication(
            "Username and password must be non-empty".to_string(),
        ));
    }

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()
        .map_err(|e| HarnessError::Http(format!("Failed to create HTTP client: {e}")))?;

    let url = format!("{}/{}", base_url.trim_end_matches('/'), AUTH_PATH);
    let request = AuthRequest::from(credentials);

    let response = http_client
        .post(&url)
        .json(&request)
        .send()
        .await
        .map_err(|e| HarnessError::Authentication(format!("Login request to {url} failed: {e}")))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| HarnessError::Authentication(format!("Failed to read login response: {e}")))?;

    if !status.is_success() {
        return Err(HarnessError::Authentication(format!(
            "Failed to authenticate. Status: {status}, Content: {body}"
        )));
    }

    token_from_body(&body).ok_or_else(|| {
        HarnessError::Authentication(format!(
            "Login response carries no usable token. Content: {body}"
        ))
    })
}

/// ログイン応答ボディからトークンを取り出す（大文字小文字無視）
///
/// ボディがJSONでない、フィールドがない、または空白のみの場合は`None`。
pub fn token_from_body(body: &str) -> Option<Token> {
    let value: Value = serde_json::from_str(body).ok()?;
    field_ci(&value, "accessToken")?.as_str().and_then(Token::new)
}
