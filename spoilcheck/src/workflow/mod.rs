//! 順序付きステップ実行エンジン
//!
//! 宣言済みのステップ列を文字通りの順序で実行し、ステップごとに応答
//! 契約を検証する。並びは第一級のデータ構造であり、エンジンが並べ替え
//! や並列化を行うことはない。ステップ間の状態は各ステップの戻り値と
//! して明示的に引き回す。

use reqwest::{Method, StatusCode};
use tracing::{debug, info};

use spoilcheck_common::protocol::{
    self, ApiResponse, STORY_ALL_PATH, STORY_CREATE_PATH,
};
use spoilcheck_common::types::StoryPayload;

use crate::client::StoryClient;
use crate::report::{body_snippet, RunReport, StepFailure, StepReport};

/// 作成ステップが使う画像URL
const POSTER_URL: &str =
    "https://www.artdesign.ph/wp-content/uploads/2024/05/typ130-No-Problems-Just-Meow-Meow-Poster-02.png";

/// ステップ間で引き回すワークフロー状態
///
/// `last_created_story_id`は作成ステップの成功時のみ設定され、以降の
/// ステップからは読み取り専用。ラン中にクリアされることはない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowState {
    /// 作成ステップが生成したストーリーID
    pub last_created_story_id: Option<String>,
}

/// ステップのパス指定
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSpec {
    /// 固定パス
    Fixed(String),
    /// `Story/Edit/{lastCreatedStoryId}`
    EditLastCreated,
    /// `Story/Delete/{lastCreatedStoryId}`
    DeleteLastCreated,
}

impl PathSpec {
    /// 状態からリクエストパスを解決する
    ///
    /// # Errors
    /// 作成ステップ依存のパスでIDが未設定なら`MissingPrecondition`。
    /// 空のパスセグメントでHTTP呼び出しを行うことはない。
    pub fn resolve(&self, state: &WorkflowState) -> Result<String, StepFailure> {
        match self {
            Self::Fixed(path) => Ok(path.clone()),
            Self::EditLastCreated => Ok(protocol::story_edit_path(require_id(state)?)),
            Self::DeleteLastCreated => Ok(protocol::story_delete_path(require_id(state)?)),
        }
    }
}

fn require_id(state: &WorkflowState) -> Result<&str, StepFailure> {
    state
        .last_created_story_id
        .as_deref()
        .ok_or(StepFailure::MissingPrecondition)
}

/// ステップの応答契約
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    /// 期待ステータスコード
    pub status: StatusCode,
    /// 期待メッセージ（Noneならメッセージ検証なし）
    pub message: Option<&'static str>,
    /// 非空の`storyId`を要求するか（作成ステップのみ）
    pub requires_story_id: bool,
    /// 生ボディに含まれるべきマーカー（大文字小文字無視）
    pub body_marker: Option<&'static str>,
}

impl Expectation {
    /// ステータスのみ検証する契約
    pub fn status_only(status: StatusCode) -> Self {
        Self {
            status,
            message: None,
            requires_story_id: false,
            body_marker: None,
        }
    }

    /// ステータスとメッセージを検証する契約
    pub fn with_message(status: StatusCode, message: &'static str) -> Self {
        Self {
            message: Some(message),
            ..Self::status_only(status)
        }
    }

    /// 作成成功の契約（201、メッセージ、非空storyId）
    pub fn created(message: &'static str) -> Self {
        Self {
            requires_story_id: true,
            ..Self::with_message(StatusCode::CREATED, message)
        }
    }

    /// 生ボディのマーカー存在のみ検証する契約
    ///
    /// 一覧応答の形はサービス側で規定されていないため、意図的に弱い
    /// 契約のまま（マーカーの存在確認のみ）にしている。
    pub fn with_marker(status: StatusCode, marker: &'static str) -> Self {
        Self {
            body_marker: Some(marker),
            ..Self::status_only(status)
        }
    }

    /// 観測結果を契約と突き合わせる
    ///
    /// 作成契約の場合は取り出した`storyId`を返す。
    ///
    /// # Errors
    /// ステータス/メッセージ/マーカーの不一致は`ContractMismatch`、
    /// 構造化フィールドを期待しているのにパースできないボディは
    /// `MalformedResponse`。
    pub fn check(&self, status: StatusCode, body: &str) -> Result<Option<String>, StepFailure> {
        if status != self.status {
            return Err(StepFailure::ContractMismatch {
                detail: format!(
                    "expected status {}, observed {} (body: {})",
                    self.status,
                    status,
                    body_snippet(body)
                ),
            });
        }

        if let Some(marker) = self.body_marker {
            if !body.to_ascii_lowercase().contains(&marker.to_ascii_lowercase()) {
                return Err(StepFailure::ContractMismatch {
                    detail: format!(
                        "response body does not contain \"{marker}\" (body: {})",
                        body_snippet(body)
                    ),
                });
            }
        }

        if self.message.is_none() && !self.requires_story_id {
            return Ok(None);
        }

        let response = ApiResponse::parse(body).map_err(|err| StepFailure::MalformedResponse {
            detail: err.to_string(),
            raw: body_snippet(body),
        })?;

        if let Some(expected) = self.message {
            match response.message.as_deref() {
                Some(observed) if observed == expected => {}
                observed => {
                    return Err(StepFailure::ContractMismatch {
                        detail: format!("expected message {expected:?}, observed {observed:?}"),
                    })
                }
            }
        }

        if self.requires_story_id {
            return match response.story_id {
                Some(id) if !id.trim().is_empty() => Ok(Some(id)),
                _ => Err(StepFailure::ContractMismatch {
                    detail: "expected a non-empty storyId".to_string(),
                }),
            };
        }

        Ok(None)
    }
}

/// ステップ記述子
///
/// 順序付きステップ列の1エントリ。実行順は`declared_steps()`の並び
/// そのもの。
#[derive(Debug, Clone)]
pub struct StepDescriptor {
    /// ステップ名
    pub name: &'static str,
    /// HTTPメソッド
    pub method: Method,
    /// パス指定
    pub path: PathSpec,
    /// リクエストボディ
    pub body: Option<StoryPayload>,
    /// 応答契約
    pub expect: Expectation,
}

/// 宣言済みのステップ列を返す
///
/// 並び順は契約の一部。作成ステップ（先頭）が生成するIDに編集と削除が
/// 依存する。後半の3ステップは失敗経路の契約を検証する。
pub fn declared_steps() -> Vec<StepDescriptor> {
    vec![
        StepDescriptor {
            name: "create",
            method: Method::POST,
            path: PathSpec::Fixed(STORY_CREATE_PATH.to_string()),
            body: Some(StoryPayload::new("My Test Story", "Meowsies", Some(POSTER_URL))),
            expect: Expectation::created("Successfully created!"),
        },
        StepDescriptor {
            name: "edit",
            method: Method::PUT,
            path: PathSpec::EditLastCreated,
            body: Some(StoryPayload::new(
                "Edited Story Title",
                "Edited story description",
                Some(POSTER_URL),
            )),
            expect: Expectation::with_message(StatusCode::OK, "Successfully edited"),
        },
        StepDescriptor {
            name: "list",
            method: Method::GET,
            path: PathSpec::Fixed(STORY_ALL_PATH.to_string()),
            body: None,
            expect: Expectation::with_marker(StatusCode::OK, "title"),
        },
        StepDescriptor {
            name: "delete",
            method: Method::DELETE,
            path: PathSpec::DeleteLastCreated,
            body: None,
            expect: Expectation::with_message(StatusCode::OK, "Deleted successfully!"),
        },
        StepDescriptor {
            name: "create-invalid",
            method: Method::POST,
            path: PathSpec::Fixed(STORY_CREATE_PATH.to_string()),
            body: Some(StoryPayload::new("", "", None)),
            expect: Expectation::status_only(StatusCode::BAD_REQUEST),
        },
        StepDescriptor {
            name: "edit-missing",
            method: Method::PUT,
            path: PathSpec::Fixed(protocol::story_edit_path(&protocol::nil_story_id())),
            body: Some(StoryPayload::new(
                "NonExistent",
                "Trying to edit missing story",
                None,
            )),
            expect: Expectation::with_message(StatusCode::NOT_FOUND, "No spoilers..."),
        },
        StepDescriptor {
            name: "delete-missing",
            method: Method::DELETE,
            path: PathSpec::Fixed(protocol::story_delete_path(&protocol::nil_story_id())),
            body: None,
            expect: Expectation::with_message(
                StatusCode::BAD_REQUEST,
                "Unable to delete this story spoiler!",
            ),
        },
    ]
}

/// 宣言済みステップ列を順番に実行する
pub async fn run(client: &StoryClient) -> RunReport {
    run_steps(client, declared_steps()).await
}

/// 任意のステップ列を順番に実行する
///
/// ステップの失敗は記録して続行する。前のステップのHTTP往復と検証が
/// 完了するまで次のステップは開始しない。
pub async fn run_steps(client: &StoryClient, steps: Vec<StepDescriptor>) -> RunReport {
    let mut report = RunReport::new();
    let mut state = WorkflowState::default();

    for step in steps {
        let (step_report, next_state) = execute_step(client, step, state).await;
        info!(
            step = step_report.name,
            verdict = step_report.verdict_label(),
            "Step finished"
        );
        report.push(step_report);
        state = next_state;
    }

    report
}

/// 1ステップを実行し、レポートと更新後の状態を返す
async fn execute_step(
    client: &StoryClient,
    step: StepDescriptor,
    state: WorkflowState,
) -> (StepReport, WorkflowState) {
    let path = match step.path.resolve(&state) {
        Ok(path) => path,
        Err(failure) => return (StepReport::failed(step.name, None, None, failure), state),
    };

    let observed = match &step.body {
        Some(payload) => client.send_json(step.method.clone(), &path, payload).await,
        None => client.send(step.method.clone(), &path).await,
    };
    let observed = match observed {
        Ok(observed) => observed,
        Err(err) => {
            let failure = StepFailure::Transport {
                detail: err.to_string(),
            };
            return (StepReport::failed(step.name, None, None, failure), state);
        }
    };

    debug!(step = step.name, status = %observed.status, body = %observed.body, "Observed response");

    match step.expect.check(observed.status, &observed.body) {
        Ok(Some(story_id)) => {
            let next = WorkflowState {
                last_created_story_id: Some(story_id),
            };
            (
                StepReport::passed(step.name, observed.status, observed.body),
                next,
            )
        }
        Ok(None) => (
            StepReport::passed(step.name, observed.status, observed.body),
            state,
        ),
        Err(failure) => (
            StepReport::failed(step.name, Some(observed.status), Some(observed.body), failure),
            state,
        ),
    }
}
