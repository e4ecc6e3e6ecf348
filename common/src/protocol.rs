//! 通信プロトコル定義
//!
//! ハーネス↔StorySpoilサービス間のエンドポイントとワイヤ形式

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::types::Credentials;

/// 認証エンドポイント
pub const AUTH_PATH: &str = "User/Authentication";

/// ストーリー一覧エンドポイント（トークン検証のプローブにも使う）
pub const STORY_ALL_PATH: &str = "Story/All";

/// ストーリー作成エンドポイント
pub const STORY_CREATE_PATH: &str = "Story/Create";

/// 編集エンドポイントのパスを組み立てる
pub fn story_edit_path(id: &str) -> String {
    format!("Story/Edit/{id}")
}

/// 削除エンドポイントのパスを組み立てる
pub fn story_delete_path(id: &str) -> String {
    format!("Story/Delete/{id}")
}

/// 割り当てられないことが保証されるセンチネルID（nil UUID）
pub fn nil_story_id() -> String {
    Uuid::nil().to_string()
}

/// ログインリクエスト
///
/// サービス契約により`userName`のみcamelCase。
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AuthRequest {
    /// ユーザー名
    #[serde(rename = "userName")]
    pub user_name: String,
    /// パスワード
    pub password: String,
}

impl From<&Credentials> for AuthRequest {
    fn from(credentials: &Credentials) -> Self {
        Self {
            user_name: credentials.username.clone(),
            password: credentials.password.clone(),
        }
    }
}

/// 正規化したサーバー応答
///
/// サーバー応答はフィールド名の大文字小文字が揺れるため、取り込みは
/// 大文字小文字を無視して行う。`story_id`は作成成功時のみ返る。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiResponse {
    /// メッセージ（ワイヤ上は`msg`）
    pub message: Option<String>,
    /// 作成されたストーリーのID（ワイヤ上は`storyId`）
    pub story_id: Option<String>,
}

impl ApiResponse {
    /// 応答ボディをパースする
    ///
    /// # Errors
    /// ボディがJSONとして不正な場合。
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(body)?;
        Ok(Self::from_value(&value))
    }

    /// パース済みJSONから取り込む
    pub fn from_value(value: &Value) -> Self {
        Self {
            message: field_ci(value, "msg")
                .and_then(Value::as_str)
                .map(str::to_string),
            story_id: field_ci(value, "storyId")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }
}

/// 大文字小文字を無視してJSONオブジェクトのフィールドを引く
///
/// オブジェクトでない値に対しては`None`。
pub fn field_ci<'a>(value: &'a Value, name: &str) -> Option<&'a Value> {
    value
        .as_object()?
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, field)| field)
}
