//! 共通型定義
//!
//! Credentials, Token, StoryPayload等のコアデータ型

use serde::{Deserialize, Serialize};

/// フォールバック認証に使うログイン資格情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// ユーザー名
    pub username: String,
    /// パスワード
    pub password: String,
}

impl Credentials {
    /// 新しい資格情報を作成する
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// 資格情報として有効か検証する
    pub fn is_valid(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.trim().is_empty()
    }
}

/// Bearerトークン（不透明文字列）
///
/// 設定から与えられるか、トークン交換呼び出しで取得される。
/// 一度取得したら変更されない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// トークンを作成する
    ///
    /// 空文字列・空白のみの場合は`None`（有効なトークンは常に非空）。
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// トークン文字列を返す
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// テスト対象のストーリーレコード
///
/// フィールド名の大文字小文字はサービスの実契約そのまま
/// （`Title`/`Description`はPascalCase、`url`のみ小文字）。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoryPayload {
    /// タイトル（作成時必須）
    #[serde(rename = "Title")]
    pub title: String,
    /// 説明（作成時必須）
    #[serde(rename = "Description")]
    pub description: String,
    /// 画像URL（任意）
    #[serde(rename = "url", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl StoryPayload {
    /// 新しいペイロードを作成する
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        url: Option<&str>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: url.map(str::to_string),
        }
    }

    /// 作成リクエストとして有効か検証する
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }
}
