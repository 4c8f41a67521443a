//! 処理トリガコンポーネント（手動・自動）
//!
//! 手動: 同期エンドポイントを叩き、結果（削除行数・ログ・生成物）を
//! その場で表示する。マクロが既に生成済みのファイルでは二重生成を
//! 防ぐためボタンを無効化する。
//!
//! 自動: ジョブを投入してからポーリングで終端状態を待つ。現在の
//! ルール構成が過去の完了ジョブと完全一致する場合は冗長な再実行を
//! 防ぐためボタンを無効化する。ファイルの選択変更とコンポーネント
//! 破棄はキャンセルフラグを立ててポーリングを放棄する。

use crate::api;
use crate::auth::use_auth;
use crate::poll::{self, CancelFlag};
use crate::util;
use excel_cleaner_common::{
    rules_match, Error, FileRecord, FilterRule, GeneratedFiles, HistoryRecord, JobState,
    JobStatus, PollConfig, PollOutcome, ProcessResult,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 自動処理ワークフローの表示状態
#[derive(Clone, PartialEq)]
enum AutoState {
    Idle,
    Submitting,
    Polling(u32),
    Done(JobStatus),
    Failed(String),
}

#[component]
pub fn ProcessPanel<F>(
    file: Signal<Option<FileRecord>>,
    rules: Signal<Vec<FilterRule>>,
    history: RwSignal<Vec<HistoryRecord>>,
    generated: RwSignal<Option<GeneratedFiles>>,
    /// 処理がサーバ側で記録を残したあとに呼ばれる（履歴・生成物の再取得用）
    on_processed: F,
) -> impl IntoView
where
    F: Fn() + 'static + Clone + Send + Sync,
{
    let auth = use_auth();
    let (manual_busy, set_manual_busy) = signal(false);
    let manual_result = RwSignal::new(None::<ProcessResult>);
    let auto_state = RwSignal::new(AutoState::Idle);
    let cancel_slot = RwSignal::new(None::<CancelFlag>);

    // ファイル選択が変わったら進行中のポーリングを放棄し表示を戻す
    Effect::new(move |prev: Option<Option<i64>>| {
        let current = file.get().map(|f| f.id);
        if let Some(prev_id) = prev {
            if prev_id != current {
                if let Some(flag) = cancel_slot.get_untracked() {
                    poll::cancel(&flag);
                }
                auto_state.set(AutoState::Idle);
                manual_result.set(None);
            }
        }
        current
    });

    on_cleanup(move || {
        if let Some(flag) = cancel_slot.get_untracked() {
            poll::cancel(&flag);
        }
    });

    let has_macros = move || {
        generated
            .get()
            .map(|g| g.has_macros())
            .unwrap_or(false)
    };
    let auto_busy =
        move || matches!(auto_state.get(), AutoState::Submitting | AutoState::Polling(_));
    // 現在のルールが過去の完了ジョブと位置まで含めて一致するか
    let matches_prior_job = move || {
        let current = rules.get();
        history.get().iter().any(|record| {
            JobState::parse(&record.status) == Some(JobState::Completed)
                && rules_match(&current, record.filter_rules.as_deref())
        })
    };
    let manual_disabled = move || file.get().is_none() || manual_busy.get() || has_macros();
    let auto_disabled = move || file.get().is_none() || auto_busy() || matches_prior_job();

    // 生成物ダウンロード（失敗はアラート表示のみ、自動リトライなし）
    let download = move |file_id: i64, filename: String| {
        spawn_local(async move {
            if let Err(e) = api::download::download_file(&auth.client(), file_id, &filename).await
            {
                auth.handle_error(&e);
                gloo::console::error!(format!("download failed: {}", e));
                util::alert(&format!("Download failed: {}", util::user_message(&e)));
            }
        });
    };

    let manual_callback = on_processed.clone();
    let on_manual = move |_| {
        let Some(target) = file.get_untracked() else {
            return;
        };
        let snapshot = rules.get_untracked();
        set_manual_busy.set(true);
        manual_result.set(None);
        let on_processed = manual_callback.clone();
        spawn_local(async move {
            match api::process::process_manual(&auth.client(), target.id, &snapshot).await {
                Ok(result) => {
                    manual_result.set(Some(result));
                    on_processed();
                }
                Err(e) => {
                    auth.handle_error(&e);
                    gloo::console::error!(format!("manual processing failed: {}", e));
                    util::alert(&format!("Processing failed: {}", util::user_message(&e)));
                }
            }
            set_manual_busy.set(false);
        });
    };

    let automated_callback = on_processed.clone();
    let on_automated = move |_| {
        let Some(target) = file.get_untracked() else {
            return;
        };
        let snapshot = rules.get_untracked();
        let on_processed = automated_callback.clone();

        // 前回のポーリングが残っていれば破棄してから始める
        if let Some(flag) = cancel_slot.get_untracked() {
            poll::cancel(&flag);
        }
        let flag = poll::new_cancel_flag();
        cancel_slot.set(Some(flag.clone()));
        auto_state.set(AutoState::Submitting);

        spawn_local(async move {
            let client = auth.client();
            let job = match api::process::process_automated(&client, target.id, &snapshot).await {
                Ok(resp) => resp,
                Err(e) => {
                    auth.handle_error(&e);
                    gloo::console::error!(format!("automated submit failed: {}", e));
                    auto_state.set(AutoState::Failed(util::user_message(&e)));
                    return;
                }
            };

            auto_state.set(AutoState::Polling(0));
            let outcome = poll::run_job_poll(
                &client,
                job.job_id,
                PollConfig::default(),
                flag,
                move |attempt| auto_state.set(AutoState::Polling(attempt)),
            )
            .await;

            match outcome {
                PollOutcome::Completed(status) => {
                    auto_state.set(AutoState::Done(status));
                    // 完了で履歴が1件増えている。再取得しないと同じルールの
                    // 再実行抑止が次の選択まで効かない。
                    on_processed();
                }
                PollOutcome::Failed(message) => {
                    auto_state.set(AutoState::Failed(message));
                    on_processed();
                }
                PollOutcome::Errored(message) => {
                    gloo::console::error!(format!("polling abandoned: {}", message));
                    auto_state.set(AutoState::Failed(message));
                }
                PollOutcome::TimedOut => {
                    auto_state.set(AutoState::Failed(
                        "Timed out waiting for the job to finish".to_string(),
                    ));
                }
                PollOutcome::Aborted => auto_state.set(AutoState::Idle),
                PollOutcome::Unauthorized => {
                    auto_state.set(AutoState::Idle);
                    auth.handle_error(&Error::Unauthorized);
                }
                PollOutcome::Continue => unreachable!("driver only returns terminal outcomes"),
            }
        });
    };

    view! {
        <div class="process-panel">
            <h3>"Processing"</h3>
            <div class="process-buttons">
                <button class="btn btn-primary" disabled=manual_disabled on:click=on_manual>
                    {move || if manual_busy.get() { "Processing..." } else { "Generate macro" }}
                </button>
                <button class="btn btn-primary" disabled=auto_disabled on:click=on_automated>
                    {move || match auto_state.get() {
                        AutoState::Submitting => "Submitting...".to_string(),
                        AutoState::Polling(attempt) => format!("Processing... ({})", attempt),
                        _ => "Process automatically".to_string(),
                    }}
                </button>
            </div>
            <Show when=has_macros>
                <p class="text-muted">"Macros were already generated for this file."</p>
            </Show>
            <Show when=matches_prior_job>
                <p class="text-muted">
                    "These filters already ran to completion for this file."
                </p>
            </Show>

            {move || {
                manual_result.get().map(|result| {
                    let summary = if result.deleted_rows == 0 {
                        "File is clean: no rows matched the filters.".to_string()
                    } else {
                        format!(
                            "Deleted {} rows across {} sheet(s)",
                            result.deleted_rows, result.sheets_affected
                        )
                    };
                    view! {
                        <div class="process-result">
                            <p class="result-summary">{summary}</p>
                            <ul class="processing-log">
                                {result
                                    .processing_log
                                    .iter()
                                    .map(|line| view! { <li>{line.clone()}</li> })
                                    .collect_view()}
                            </ul>
                            <div class="download-buttons">
                                {result
                                    .downloads
                                    .iter()
                                    .map(|(kind, artifact)| {
                                        let file_id = artifact.file_id;
                                        let filename = artifact.filename.clone();
                                        let label = format!("Download {}", kind);
                                        view! {
                                            <button
                                                class="btn btn-secondary btn-small"
                                                on:click=move |_| {
                                                    download(file_id, filename.clone())
                                                }
                                            >
                                                {label}
                                            </button>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        </div>
                    }
                })
            }}

            {move || match auto_state.get() {
                AutoState::Done(status) => {
                    let download_button = status.download_file_id.map(|file_id| {
                        let filename = status
                            .download_filename
                            .clone()
                            .unwrap_or_else(|| "processed.xlsx".to_string());
                        view! {
                            <button
                                class="btn btn-secondary btn-small"
                                on:click=move |_| download(file_id, filename.clone())
                            >
                                "Download processed file"
                            </button>
                        }
                    });
                    let report_button = status.report_file_id.map(|file_id| {
                        let filename = status
                            .report_filename
                            .clone()
                            .unwrap_or_else(|| "report.xlsx".to_string());
                        view! {
                            <button
                                class="btn btn-secondary btn-small"
                                on:click=move |_| download(file_id, filename.clone())
                            >
                                "Download report"
                            </button>
                        }
                    });
                    Some(view! {
                        <div class="auto-result">
                            <p class="result-summary">"Automated processing completed."</p>
                            <div class="download-buttons">
                                {download_button}
                                {report_button}
                            </div>
                        </div>
                    }.into_any())
                }
                AutoState::Failed(message) => Some(view! {
                    <div class="auto-result">
                        <p class="error-text">{format!("Automated processing failed: {}", message)}</p>
                    </div>
                }.into_any()),
                _ => None,
            }}
        </div>
    }
}
