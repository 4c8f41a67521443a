//! サーバAPIのワイヤ型定義
//!
//! フィールド名はサーバのJSON（snake_case）にそのまま対応する。
//! サーバ所有のレコードはクライアント側ではキャッシュとして読み取り
//! 専用に扱い、明示的な再取得または削除系操作でのみ無効化する。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// フィルタルール（列と一致値のペア）
///
/// `column`は列文字("F")または1始まりの番号("6")。入力時に大文字化
/// される以外の検証はサーバに委ねる。`value`の"0"や空文字は
/// 「空セル・ゼロセルに一致」の番兵値。ルール同士はサーバ側でAND結合。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRule {
    pub column: String,
    pub value: String,
}

impl FilterRule {
    pub fn new(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// アップロード済みファイル
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: i64,
    pub original_filename: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub processed: bool,
}

/// 過去の処理ジョブ1件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub job_id: i64,
    #[serde(default)]
    pub processed_at: String,
    pub status: String,
    #[serde(default)]
    pub deleted_rows: u64,
    /// 実行時のルールのスナップショット（古いレコードではnull）
    #[serde(default)]
    pub filter_rules: Option<Vec<FilterRule>>,
    #[serde(default)]
    pub processed_filename: Option<String>,
    #[serde(default)]
    pub result_file_id: Option<i64>,
}

/// ジョブ状態の列挙
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobState {
    /// サーバのステータス文字列をパースする（未知の文字列はNone）
    pub fn parse(status: &str) -> Option<Self> {
        match status {
            "pending" => Some(JobState::Pending),
            "processing" => Some(JobState::Processing),
            "completed" => Some(JobState::Completed),
            "failed" => Some(JobState::Failed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::Pending => "pending",
            JobState::Processing => "processing",
            JobState::Completed => "completed",
            JobState::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed | JobState::Failed)
    }
}

/// ポーリング中のジョブ状態レスポンス
///
/// 自動処理リクエストの間だけ存在する一時レコード。終端状態に
/// 達した時点で破棄される。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobStatus {
    pub status: String,
    #[serde(default)]
    pub download_file_id: Option<i64>,
    #[serde(default)]
    pub download_filename: Option<String>,
    #[serde(default)]
    pub report_file_id: Option<i64>,
    #[serde(default)]
    pub report_filename: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl JobStatus {
    pub fn state(&self) -> Option<JobState> {
        JobState::parse(&self.status)
    }
}

/// `POST /upload` のレスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub file_id: i64,
    pub filename: String,
    #[serde(default)]
    pub duplicate: bool,
}

/// ダウンロード可能な生成物への参照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadRef {
    pub file_id: i64,
    pub filename: String,
}

/// `POST /process/{fileId}` の同期処理結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessResult {
    #[serde(default)]
    pub deleted_rows: u64,
    #[serde(default)]
    pub processing_log: Vec<String>,
    #[serde(default)]
    pub sheets_affected: u64,
    /// 種別 (macro/instructions/report) → 生成物
    #[serde(default)]
    pub downloads: BTreeMap<String, DownloadRef>,
}

/// `POST /process-automated/{fileId}` のレスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSubmitResponse {
    pub job_id: i64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub estimated_time: Option<f64>,
}

/// 生成済み成果物1件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    pub file_id: i64,
    pub filename: String,
}

/// `GET /files/{id}/generated` のレスポンス
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedFiles {
    #[serde(default)]
    pub macros: Vec<ArtifactRecord>,
    #[serde(default)]
    pub instructions: Vec<ArtifactRecord>,
    #[serde(default)]
    pub reports: Vec<ArtifactRecord>,
    #[serde(default)]
    pub processed: Vec<ArtifactRecord>,
}

impl GeneratedFiles {
    /// マクロが既に生成済みか（手動処理ボタンの無効化条件）
    pub fn has_macros(&self) -> bool {
        !self.macros.is_empty()
    }
}

/// `DELETE /files/{id}/history` のレスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearHistoryResponse {
    pub deleted_count: u64,
}

/// `GET /profile` のレスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// 招待（管理者API）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: i64,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub invitation_url: Option<String>,
    #[serde(default)]
    pub used: bool,
    #[serde(default)]
    pub expired: bool,
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// ユーザ一覧・詳細（管理者API）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub file_count: u64,
    #[serde(default)]
    pub job_count: u64,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_rule_roundtrip() {
        let rule = FilterRule::new("F", "0");
        let json = serde_json::to_string(&rule).expect("serialize failed");
        assert_eq!(json, r#"{"column":"F","value":"0"}"#);
        let back: FilterRule = serde_json::from_str(&json).expect("deserialize failed");
        assert_eq!(back, rule);
    }

    #[test]
    fn test_history_record_null_rules() {
        let json = r#"{
            "job_id": 7,
            "processed_at": "2026-08-01T12:00:00Z",
            "status": "completed",
            "deleted_rows": 12,
            "filter_rules": null,
            "processed_filename": "clean.xlsx",
            "result_file_id": 20
        }"#;
        let record: HistoryRecord = serde_json::from_str(json).expect("deserialize failed");
        assert_eq!(record.job_id, 7);
        assert!(record.filter_rules.is_none());
        assert_eq!(record.result_file_id, Some(20));
    }

    #[test]
    fn test_history_record_missing_optionals() {
        let json = r#"{"job_id": 1, "status": "processing"}"#;
        let record: HistoryRecord = serde_json::from_str(json).expect("deserialize failed");
        assert_eq!(record.deleted_rows, 0);
        assert!(record.filter_rules.is_none());
        assert!(record.processed_filename.is_none());
    }

    #[test]
    fn test_job_state_parse() {
        assert_eq!(JobState::parse("pending"), Some(JobState::Pending));
        assert_eq!(JobState::parse("processing"), Some(JobState::Processing));
        assert_eq!(JobState::parse("completed"), Some(JobState::Completed));
        assert_eq!(JobState::parse("failed"), Some(JobState::Failed));
        assert_eq!(JobState::parse("queued"), None);
        assert_eq!(JobState::parse("COMPLETED"), None);
    }

    #[test]
    fn test_job_state_terminal() {
        assert!(JobState::Completed.is_terminal());
        assert!(JobState::Failed.is_terminal());
        assert!(!JobState::Pending.is_terminal());
        assert!(!JobState::Processing.is_terminal());
    }

    #[test]
    fn test_job_status_minimal() {
        let status: JobStatus = serde_json::from_str(r#"{"status":"pending"}"#)
            .expect("deserialize failed");
        assert_eq!(status.state(), Some(JobState::Pending));
        assert!(status.download_file_id.is_none());
        assert!(status.error.is_none());
    }

    #[test]
    fn test_job_status_completed() {
        let json = r#"{
            "status": "completed",
            "download_file_id": 20,
            "download_filename": "processed.xlsx",
            "report_file_id": 21,
            "report_filename": "report.xlsx"
        }"#;
        let status: JobStatus = serde_json::from_str(json).expect("deserialize failed");
        assert_eq!(status.state(), Some(JobState::Completed));
        assert_eq!(status.download_file_id, Some(20));
        assert_eq!(status.report_filename.as_deref(), Some("report.xlsx"));
    }

    #[test]
    fn test_upload_response_duplicate_default() {
        let resp: UploadResponse =
            serde_json::from_str(r#"{"file_id":1,"filename":"test.xlsx"}"#)
                .expect("deserialize failed");
        assert!(!resp.duplicate);
    }

    #[test]
    fn test_process_result_downloads_map() {
        let json = r#"{
            "deleted_rows": 3,
            "processing_log": ["Sheet1: 2 rows", "Sheet2: 1 row"],
            "sheets_affected": 2,
            "downloads": {
                "macro": {"file_id": 10, "filename": "cleaner.bas"},
                "instructions": {"file_id": 11, "filename": "howto.txt"}
            }
        }"#;
        let result: ProcessResult = serde_json::from_str(json).expect("deserialize failed");
        assert_eq!(result.deleted_rows, 3);
        assert_eq!(result.processing_log.len(), 2);
        assert_eq!(result.downloads["macro"].file_id, 10);
        assert_eq!(result.downloads["instructions"].filename, "howto.txt");
    }

    #[test]
    fn test_generated_files_has_macros() {
        let empty = GeneratedFiles::default();
        assert!(!empty.has_macros());

        let json = r#"{"macros":[{"file_id":5,"filename":"m.bas"}]}"#;
        let generated: GeneratedFiles = serde_json::from_str(json).expect("deserialize failed");
        assert!(generated.has_macros());
        assert!(generated.reports.is_empty());
    }

    #[test]
    fn test_clear_history_response() {
        let resp: ClearHistoryResponse =
            serde_json::from_str(r#"{"deleted_count":2}"#).expect("deserialize failed");
        assert_eq!(resp.deleted_count, 2);
    }
}
