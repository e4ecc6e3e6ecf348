//! 認証済みHTTPクライアント
//!
//! ベースURLとBearerトークンに束縛されたreqwestラッパー

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use tracing::debug;

use spoilcheck_common::error::{HarnessError, HarnessResult};
use spoilcheck_common::types::Token;

/// HTTPリクエストのタイムアウト（秒）
pub(crate) const HTTP_TIMEOUT_SECS: u64 = 30;

/// HTTP呼び出しの観測結果
#[derive(Debug, Clone)]
pub struct Observed {
    /// ステータスコード
    pub status: StatusCode,
    /// 生の応答ボディ
    pub body: String,
}

/// 認証済みStorySpoilクライアント
///
/// ラン開始時に一度だけ構築され、ラン中はトークンを変更しない。
#[derive(Debug, Clone)]
pub struct StoryClient {
    http_client: Client,
    base_url: String,
    token: Token,
}

impl StoryClient {
    /// 新しいクライアントを作成する
    ///
    /// # Errors
    /// 下層のHTTPクライアント構築に失敗した場合。
    pub fn new(base_url: impl Into<String>, token: Token) -> HarnessResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| HarnessError::Http(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            token,
        })
    }

    /// ベースURLを返す
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 保持しているトークンを返す
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// 相対パスから完全なURLを組み立てる
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// ボディなしのリクエストを送信する
    ///
    /// # Errors
    /// 接続失敗などのトランスポート障害のみ。非2xxステータスは契約として
    /// 呼び出し側が検証するため、ここでは失敗扱いにしない。
    pub async fn send(&self, method: Method, path: &str) -> HarnessResult<Observed> {
        let url = self.url_for(path);
        let request = self.request(method, &url);
        self.execute(request, &url).await
    }

    /// JSONボディ付きのリクエストを送信する
    ///
    /// # Errors
    /// `send`と同じくトランスポート障害のみ。
    pub async fn send_json<T: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &T,
    ) -> HarnessResult<Observed> {
        let url = self.url_for(path);
        let request = self.request(method, &url).json(body);
        self.execute(request, &url).await
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http_client
            .request(method, url)
            .bearer_auth(self.token.as_str())
    }

    async fn execute(&self, request: RequestBuilder, url: &str) -> HarnessResult<Observed> {
        debug!(%url, "Sending request");

        let response = request
            .send()
            .await
            .map_err(|e| HarnessError::Http(format!("Request to {url} failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HarnessError::Http(format!("Failed to read response body from {url}: {e}")))?;

        debug!(%status, body = %body, "Received response");

        Ok(Observed { status, body })
    }
}
