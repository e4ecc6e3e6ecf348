//! ステップ実行結果とランレポート
//!
//! ステップごとの合否と観測値、ラン全体の集計を保持する。レポートは
//! コンソールに出力されるのみで、ファイル等への永続化は行わない。

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use thiserror::Error;

/// 応答ボディを失敗詳細へ載せる際の最大長
const BODY_SNIPPET_MAX: usize = 200;

/// ステップ単位の失敗
///
/// いずれもそのステップに記録されるのみで、後続ステップの実行は
/// 妨げない。
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StepFailure {
    /// 作成ステップがIDを生成しておらず、依存ステップを実行できない
    #[error("Missing precondition: no story id was recorded by the create step")]
    MissingPrecondition,

    /// 観測されたステータス/メッセージが宣言された契約と一致しない
    #[error("Contract mismatch: {detail}")]
    ContractMismatch {
        /// 不一致の内容
        detail: String,
    },

    /// 応答ボディを期待する形にパースできない
    #[error("Malformed response: {detail} (body: {raw})")]
    MalformedResponse {
        /// パースエラーの内容
        detail: String,
        /// 生ボディ（切り詰め済み）
        raw: String,
    },

    /// トランスポート障害（接続失敗等）
    #[error("Transport failure: {detail}")]
    Transport {
        /// 障害の内容
        detail: String,
    },
}

/// 1ステップの実行結果
#[derive(Debug, Clone)]
pub struct StepReport {
    /// ステップ名
    pub name: &'static str,
    /// 観測されたステータスコード（HTTP呼び出し前に失敗した場合None）
    pub status: Option<StatusCode>,
    /// 観測された生ボディ
    pub body: Option<String>,
    /// 合否
    pub outcome: Result<(), StepFailure>,
}

impl StepReport {
    /// 合格したステップの結果を作る
    pub fn passed(name: &'static str, status: StatusCode, body: String) -> Self {
        Self {
            name,
            status: Some(status),
            body: Some(body),
            outcome: Ok(()),
        }
    }

    /// 失敗したステップの結果を作る
    pub fn failed(
        name: &'static str,
        status: Option<StatusCode>,
        body: Option<String>,
        failure: StepFailure,
    ) -> Self {
        Self {
            name,
            status,
            body,
            outcome: Err(failure),
        }
    }

    /// 合格したか
    pub fn is_passed(&self) -> bool {
        self.outcome.is_ok()
    }

    /// 表示用ラベル
    pub fn verdict_label(&self) -> &'static str {
        if self.is_passed() {
            "PASS"
        } else {
            "FAIL"
        }
    }
}

/// ラン全体のレポート
#[derive(Debug, Clone)]
pub struct RunReport {
    steps: Vec<StepReport>,
    started_at: DateTime<Utc>,
}

impl RunReport {
    /// 空のレポートを作る
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            started_at: Utc::now(),
        }
    }

    /// ステップ結果を実行順に追加する
    pub fn push(&mut self, step: StepReport) {
        self.steps.push(step);
    }

    /// 実行順のステップ結果を返す
    pub fn steps(&self) -> &[StepReport] {
        &self.steps
    }

    /// ラン開始時刻を返す
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// 全ステップ合格ならtrue
    pub fn all_passed(&self) -> bool {
        self.steps.iter().all(StepReport::is_passed)
    }

    /// 合格したステップ数
    pub fn passed_count(&self) -> usize {
        self.steps.iter().filter(|step| step.is_passed()).count()
    }

    /// 失敗したステップ数
    pub fn failed_count(&self) -> usize {
        self.steps.len() - self.passed_count()
    }

    /// コンソール向けに整形する
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("STEP\tVERDICT\tHTTP\tDETAIL\n");
        for step in &self.steps {
            let http = step
                .status
                .map(|status| status.as_u16().to_string())
                .unwrap_or_else(|| "-".to_string());
            let detail = match &step.outcome {
                Ok(()) => "-".to_string(),
                Err(failure) => failure.to_string(),
            };
            out.push_str(&format!(
                "{}\t{}\t{}\t{}\n",
                step.name,
                step.verdict_label(),
                http,
                detail
            ));
        }
        out.push_str(&format!(
            "Run result: {} ({}/{} steps passed, started {})\n",
            if self.all_passed() { "PASS" } else { "FAIL" },
            self.passed_count(),
            self.steps.len(),
            self.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        out
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}

/// 失敗詳細向けにボディを切り詰める
pub fn body_snippet(body: &str) -> String {
    if body.len() <= BODY_SNIPPET_MAX {
        return body.to_string();
    }
    let cut = body
        .char_indices()
        .take_while(|(index, _)| *index < BODY_SNIPPET_MAX)
        .last()
        .map(|(index, ch)| index + ch.len_utf8())
        .unwrap_or(0);
    format!("{}...", &body[..cut])
}
