//! ジョブポーリングのドライバ
//!
//! 判断ロジックは共通クレートのPollTrackerに置き、ここは
//! スリープ・HTTP要求・キャンセル確認だけを回す。キャンセルは
//! 明示的なフラグで行い、ファイルの選択解除やコンポーネント破棄が
//! フラグを立てる。進行中の要求は中断しない（次の問い合わせを
//! やめるだけ）。サーバへのキャンセル要求も送らない。

use crate::api::{self, client::ApiClient};
use excel_cleaner_common::{Error, JobStatus, PollConfig, PollOutcome, PollTracker, Result};
use gloo::timers::future::TimeoutFuture;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// ポーリングのキャンセルフラグ
pub type CancelFlag = Arc<AtomicBool>;

pub fn new_cancel_flag() -> CancelFlag {
    Arc::new(AtomicBool::new(false))
}

pub fn cancel(flag: &CancelFlag) {
    flag.store(true, Ordering::Relaxed);
}

/// 終端状態になるまでジョブ状態を問い合わせ続ける
///
/// `on_attempt`は観測のたびに試行回数を受け取る（表示用）。
pub async fn run_job_poll(
    client: &ApiClient,
    job_id: i64,
    config: PollConfig,
    cancel_flag: CancelFlag,
    mut on_attempt: impl FnMut(u32),
) -> PollOutcome {
    let interval_ms = config.interval_ms;
    let mut tracker = PollTracker::new(config);

    loop {
        TimeoutFuture::new(interval_ms).await;
        if cancel_flag.load(Ordering::Relaxed) {
            return PollOutcome::Aborted;
        }

        let response = api::process::job_status(client, job_id).await;
        // 要求中にキャンセルされた場合もここで拾う。古いタスクが
        // 終端結果を持ち帰って新しい実行の状態を上書きしないように。
        let cancelled = cancel_flag.load(Ordering::Relaxed);
        let outcome = resolve_response(&mut tracker, cancelled, response);
        on_attempt(tracker.attempts());

        if outcome.is_terminal() {
            return outcome;
        }
    }
}

/// 応答（または失敗）をひとつの観測として折り込む
///
/// 認証切れはトラッカーに数えず即座に打ち切る。再試行しても
/// 同じ401が返るだけで、呼び出し側がログアウト処理を行う。
fn resolve_response(
    tracker: &mut PollTracker,
    cancelled: bool,
    response: Result<JobStatus>,
) -> PollOutcome {
    if cancelled {
        return PollOutcome::Aborted;
    }
    match response {
        Ok(status) => tracker.record_status(&status),
        Err(Error::Unauthorized) => PollOutcome::Unauthorized,
        Err(e) => tracker.record_error(crate::util::user_message(&e)),
    }
}
