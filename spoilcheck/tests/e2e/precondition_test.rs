//! 前提条件エラーのE2Eテスト
//!
//! 作成ステップが失敗したランで、依存ステップだけが前提条件エラーに
//! なり、独立したステップは引き続き実行されることを検証する。

use spoilcheck::report::StepFailure;
use spoilcheck::{auth, workflow};
use spoilcheck_common::config::HarnessConfig;

use crate::support::story_api;

#[tokio::test]
async fn failed_create_fails_only_the_dependent_steps() {
    let server = story_api::spawn_story_api_failing_create().await;
    let config = HarnessConfig {
        base_url: server.base_url(),
        cached_token: Some(story_api::VALID_CACHED_TOKEN.to_string()),
        username: story_api::VALID_USERNAME.to_string(),
        password: story_api::VALID_PASSWORD.to_string(),
    };
    let client = auth::resolve(&config).await.unwrap();

    let report = workflow::run(&client).await;
    let steps = report.steps();

    // 作成は500で契約違反
    assert!(matches!(
        steps[0].outcome,
        Err(StepFailure::ContractMismatch { .. })
    ));

    // IDに依存する編集・削除はHTTP呼び出しなしで前提条件エラー
    assert!(matches!(steps[1].outcome, Err(StepFailure::MissingPrecondition)));
    assert!(steps[1].status.is_none());
    assert!(matches!(steps[3].outcome, Err(StepFailure::MissingPrecondition)));
    assert!(steps[3].status.is_none());

    // 一覧は独立して実行される（ストアが空なのでマーカー契約は破れる）
    assert!(steps[2].status.is_some());
    assert!(matches!(
        steps[2].outcome,
        Err(StepFailure::ContractMismatch { .. })
    ));

    // 失敗経路の3ステップは作成の成否と無関係に合格する
    assert!(steps[4].is_passed());
    assert!(steps[5].is_passed());
    assert!(steps[6].is_passed());

    assert_eq!(report.passed_count(), 3);
    assert_eq!(report.failed_count(), 4);

    server.stop().await;
}
