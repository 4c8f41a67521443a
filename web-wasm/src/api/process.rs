//! 処理トリガ（手動・自動）とジョブ状態の問い合わせ

use super::client::ApiClient;
use excel_cleaner_common::{FilterRule, JobStatus, JobSubmitResponse, ProcessResult, Result};
use serde::Serialize;

#[derive(Serialize)]
struct ProcessRequest<'a> {
    filter_rules: &'a [FilterRule],
}

/// 手動処理。同期で結果（削除行数・ログ・生成物）が返る
pub async fn process_manual(
    client: &ApiClient,
    file_id: i64,
    rules: &[FilterRule],
) -> Result<ProcessResult> {
    client
        .post_json(&format!("/process/{}", file_id), &ProcessRequest { filter_rules: rules })
        .await
}

/// 自動処理の投入。job_idが返り、以後はジョブ状態をポーリングする
pub async fn process_automated(
    client: &ApiClient,
    file_id: i64,
    rules: &[FilterRule],
) -> Result<JobSubmitResponse> {
    client
        .post_json(
            &format!("/process-automated/{}", file_id),
            &ProcessRequest { filter_rules: rules },
        )
        .await
}

pub async fn job_status(client: &ApiClient, job_id: i64) -> Result<JobStatus> {
    client.get_json(&format!("/job-status/{}", job_id)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use excel_cleaner_common::FilterRule;

    #[test]
    fn test_process_request_shape() {
        let rules = vec![FilterRule::new("F", "0"), FilterRule::new("6", "x")];
        let json = serde_json::to_string(&ProcessRequest { filter_rules: &rules })
            .expect("serialize failed");
        assert_eq!(
            json,
            r#"{"filter_rules":[{"column":"F","value":"0"},{"column":"6","value":"x"}]}"#
        );
    }

    #[test]
    fn test_process_request_empty_rules() {
        // ルール0件も正当な送信（解釈はサーバ側）
        let json = serde_json::to_string(&ProcessRequest { filter_rules: &[] })
            .expect("serialize failed");
        assert_eq!(json, r#"{"filter_rules":[]}"#);
    }
}
