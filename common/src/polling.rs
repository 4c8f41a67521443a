//! 自動処理ジョブのポーリング状態管理
//!
//! ポーリングの判断ロジック（終端判定・試行回数の上限・連続失敗の
//! しきい値）をI/Oから切り離した純粋な形で持つ。実際のスリープと
//! HTTP要求はWASM側のドライバが担当し、応答のたびにここへ結果を
//! 食わせて次の一手を受け取る。

use crate::types::{JobState, JobStatus};

/// ポーリング設定
///
/// 値は可視の契約で固定されていない調整項目。既定は2秒間隔・
/// 150回（約5分）・連続3回失敗で打ち切り。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    pub interval_ms: u32,
    pub max_attempts: u32,
    pub max_consecutive_errors: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: 2_000,
            max_attempts: 150,
            max_consecutive_errors: 3,
        }
    }
}

/// 1回の観測に対する判断
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// 次の間隔後にもう一度問い合わせる
    Continue,
    /// ジョブ完了。ダウンロード情報を含む最終ステータス
    Completed(JobStatus),
    /// ジョブ失敗。サーバ提供のエラーメッセージ
    Failed(String),
    /// 試行回数の上限に達した
    TimedOut,
    /// 連続失敗のしきい値に達しワークフローを放棄した
    Errored(String),
    /// 呼び出し側がキャンセルした（ドライバのみが返す）
    Aborted,
    /// 認証切れ。呼び出し側がトークンを破棄する（ドライバのみが返す）
    Unauthorized,
}

impl PollOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollOutcome::Continue)
    }
}

/// ポーリングの進行状態
#[derive(Debug, Clone)]
pub struct PollTracker {
    config: PollConfig,
    attempts: u32,
    consecutive_errors: u32,
}

impl PollTracker {
    pub fn new(config: PollConfig) -> Self {
        Self {
            config,
            attempts: 0,
            consecutive_errors: 0,
        }
    }

    /// これまでに観測した応答数
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// ステータス応答を1件観測する
    ///
    /// 未知のステータス文字列は進行中扱いにせず、失敗予算に
    /// カウントする。
    pub fn record_status(&mut self, status: &JobStatus) -> PollOutcome {
        self.attempts += 1;
        match status.state() {
            Some(JobState::Completed) => PollOutcome::Completed(status.clone()),
            Some(JobState::Failed) => {
                let message = status
                    .error
                    .clone()
                    .unwrap_or_else(|| "Processing failed".to_string());
                PollOutcome::Failed(message)
            }
            Some(JobState::Pending) | Some(JobState::Processing) => {
                self.consecutive_errors = 0;
                self.budget_check()
            }
            None => self.note_error(format!("unknown job status: {}", status.status)),
        }
    }

    /// 問い合わせ自体の失敗（ネットワーク/5xx）を1件観測する
    pub fn record_error(&mut self, message: impl Into<String>) -> PollOutcome {
        self.attempts += 1;
        self.note_error(message.into())
    }

    fn note_error(&mut self, message: String) -> PollOutcome {
        self.consecutive_errors += 1;
        if self.consecutive_errors >= self.config.max_consecutive_errors {
            PollOutcome::Errored(message)
        } else {
            self.budget_check()
        }
    }

    fn budget_check(&self) -> PollOutcome {
        if self.attempts >= self.config.max_attempts {
            PollOutcome::TimedOut
        } else {
            PollOutcome::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(max_attempts: u32, max_errors: u32) -> PollConfig {
        PollConfig {
            interval_ms: 1,
            max_attempts,
            max_consecutive_errors: max_errors,
        }
    }

    fn status(s: &str) -> JobStatus {
        JobStatus {
            status: s.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_pending_and_processing_continue() {
        let mut tracker = PollTracker::new(config(10, 3));
        assert_eq!(tracker.record_status(&status("pending")), PollOutcome::Continue);
        assert_eq!(tracker.record_status(&status("processing")), PollOutcome::Continue);
        assert_eq!(tracker.attempts(), 2);
    }

    #[test]
    fn test_completed_is_terminal_with_payload() {
        let mut tracker = PollTracker::new(config(10, 3));
        let done = JobStatus {
            status: "completed".to_string(),
            download_file_id: Some(20),
            download_filename: Some("processed.xlsx".to_string()),
            ..Default::default()
        };
        match tracker.record_status(&done) {
            PollOutcome::Completed(payload) => {
                assert_eq!(payload.download_file_id, Some(20));
                assert_eq!(payload.download_filename.as_deref(), Some("processed.xlsx"));
            }
            other => panic!("expected Completed, got {:?}", other),
        }
    }

    #[test]
    fn test_failed_carries_server_message() {
        let mut tracker = PollTracker::new(config(10, 3));
        let failed = JobStatus {
            status: "failed".to_string(),
            error: Some("corrupt sheet".to_string()),
            ..Default::default()
        };
        assert_eq!(
            tracker.record_status(&failed),
            PollOutcome::Failed("corrupt sheet".to_string())
        );
    }

    #[test]
    fn test_failed_without_message_falls_back() {
        let mut tracker = PollTracker::new(config(10, 3));
        assert_eq!(
            tracker.record_status(&status("failed")),
            PollOutcome::Failed("Processing failed".to_string())
        );
    }

    #[test]
    fn test_consecutive_error_threshold() {
        let mut tracker = PollTracker::new(config(100, 3));
        assert_eq!(tracker.record_error("timeout"), PollOutcome::Continue);
        assert_eq!(tracker.record_error("timeout"), PollOutcome::Continue);
        assert_eq!(
            tracker.record_error("timeout"),
            PollOutcome::Errored("timeout".to_string())
        );
    }

    #[test]
    fn test_error_counter_resets_on_success() {
        let mut tracker = PollTracker::new(config(100, 3));
        tracker.record_error("blip");
        tracker.record_error("blip");
        assert_eq!(tracker.record_status(&status("processing")), PollOutcome::Continue);
        // カウンタはリセット済み
        assert_eq!(tracker.record_error("blip"), PollOutcome::Continue);
    }

    #[test]
    fn test_unknown_status_counts_as_error() {
        let mut tracker = PollTracker::new(config(100, 2));
        assert_eq!(tracker.record_status(&status("queued")), PollOutcome::Continue);
        match tracker.record_status(&status("queued")) {
            PollOutcome::Errored(message) => assert!(message.contains("queued")),
            other => panic!("expected Errored, got {:?}", other),
        }
    }

    #[test]
    fn test_attempt_budget_times_out() {
        let mut tracker = PollTracker::new(config(3, 10));
        assert_eq!(tracker.record_status(&status("pending")), PollOutcome::Continue);
        assert_eq!(tracker.record_status(&status("pending")), PollOutcome::Continue);
        assert_eq!(tracker.record_status(&status("pending")), PollOutcome::TimedOut);
    }

    #[test]
    fn test_terminal_classification() {
        assert!(!PollOutcome::Continue.is_terminal());
        assert!(PollOutcome::TimedOut.is_terminal());
        assert!(PollOutcome::Aborted.is_terminal());
        assert!(PollOutcome::Unauthorized.is_terminal());
        assert!(PollOutcome::Failed("x".to_string()).is_terminal());
    }
}
