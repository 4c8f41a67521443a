//! Excel Cleaner Common Library
//!
//! Webクライアント(WASM)と共有される型とロジック:
//! - サーバAPIのワイヤ型
//! - フィルタルールのリスト操作と一致判定
//! - アップロードファイル名の検証
//! - ジョブポーリングの状態管理

pub mod types;
pub mod filter;
pub mod upload;
pub mod polling;
pub mod error;

pub use types::{
    AdminUser, ArtifactRecord, ClearHistoryResponse, DownloadRef, FileRecord,
    FilterRule, GeneratedFiles, HistoryRecord, Invitation, JobState, JobStatus,
    JobSubmitResponse, ProcessResult, UploadResponse, UserProfile,
};
pub use filter::{add_rule, default_rules, remove_rule, rules_match, update_rule, RuleField};
pub use upload::{filename_from_content_disposition, is_supported_filename, validate_upload_filename};
pub use polling::{PollConfig, PollOutcome, PollTracker};
pub use error::{extract_server_message, Error, Result};
