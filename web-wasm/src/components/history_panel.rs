//! 処理履歴ビューアコンポーネント
//!
//! 履歴の取得はファイル選択の変化に合わせて親が行い、ここは
//! 表示と削除系操作を担当する。1件削除は成功時にローカルの
//! キャッシュから楽観的に取り除く（再取得しない）。全削除は
//! 管理者のみで、成功時はローカルリストを空にして削除件数を
//! 通知する。失敗時はどちらもリストを変えない。

use crate::api;
use crate::auth::use_auth;
use crate::util;
use excel_cleaner_common::{HistoryRecord, JobState};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 履歴取得の表示状態
#[derive(Clone, PartialEq)]
pub enum HistoryState {
    Idle,
    Loading,
    Error(String),
    Loaded,
}

#[component]
pub fn HistoryPanel(
    file_id: Signal<Option<i64>>,
    history: RwSignal<Vec<HistoryRecord>>,
    state: RwSignal<HistoryState>,
    is_admin: Signal<bool>,
) -> impl IntoView {
    let auth = use_auth();

    let on_delete_item = move |job_id: i64| {
        let Some(current_file) = file_id.get_untracked() else {
            return;
        };
        if !util::confirm("Delete this history entry?") {
            return;
        }
        spawn_local(async move {
            match api::history::delete_history_item(&auth.client(), current_file, job_id).await {
                Ok(()) => {
                    history.update(|records| records.retain(|r| r.job_id != job_id));
                }
                Err(e) => {
                    auth.handle_error(&e);
                    gloo::console::error!(format!("history delete failed: {}", e));
                    util::alert(&format!("Delete failed: {}", util::user_message(&e)));
                }
            }
        });
    };

    let on_clear_all = move |_| {
        let Some(current_file) = file_id.get_untracked() else {
            return;
        };
        if !util::confirm("Clear the entire processing history for this file?") {
            return;
        }
        spawn_local(async move {
            match api::history::clear_history(&auth.client(), current_file).await {
                Ok(resp) => {
                    history.set(Vec::new());
                    util::alert(&util::clear_history_message(resp.deleted_count));
                }
                Err(e) => {
                    auth.handle_error(&e);
                    gloo::console::error!(format!("history clear failed: {}", e));
                    util::alert(&format!("Clear failed: {}", util::user_message(&e)));
                }
            }
        });
    };

    view! {
        <div class="history-panel">
            <div class="history-header">
                <h3>"Processing history"</h3>
                <Show when=move || {
                    is_admin.get() && state.get() == HistoryState::Loaded
                        && !history.get().is_empty()
                }>
                    <button class="btn btn-tertiary btn-small" on:click=on_clear_all>
                        "Clear all"
                    </button>
                </Show>
            </div>
            {move || match state.get() {
                HistoryState::Idle => view! {
                    <p class="text-muted">"Select a file to see its processing history."</p>
                }.into_any(),
                HistoryState::Loading => view! {
                    <p class="text-muted">"Loading history..."</p>
                }.into_any(),
                HistoryState::Error(message) => view! {
                    <p class="error-text">{format!("Could not load history: {}", message)}</p>
                }.into_any(),
                HistoryState::Loaded => view! {
                    <Show
                        when=move || !history.get().is_empty()
                        fallback=|| view! {
                            <p class="text-muted">"No processing history for this file."</p>
                        }
                    >
                        <ul class="history-list">
                            <For
                                each=move || history.get()
                                key=|record| record.job_id
                                children=move |record| {
                                    view! { <HistoryItem record=record on_delete=on_delete_item /> }
                                }
                            />
                        </ul>
                    </Show>
                }.into_any(),
            }}
        </div>
    }
}

#[component]
fn HistoryItem<F>(record: HistoryRecord, on_delete: F) -> impl IntoView
where
    F: Fn(i64) + 'static + Clone + Send + Sync,
{
    let job_id = record.job_id;
    let failed = JobState::parse(&record.status) == Some(JobState::Failed);
    let badge_class = format!("status-badge {}", record.status);

    // スナップショットがnullまたは空のときはセクションごと省略
    let rule_snapshot = record
        .filter_rules
        .as_ref()
        .filter(|rules| !rules.is_empty())
        .map(|rules| {
            view! {
                <div class="rule-snapshot">
                    {rules
                        .iter()
                        .map(|rule| {
                            view! {
                                <span class="rule-chip">
                                    {format!("{} = '{}'", rule.column, rule.value)}
                                </span>
                            }
                        })
                        .collect_view()}
                </div>
            }
        });

    view! {
        <li class="history-item">
            <div class="history-meta">
                <span class=badge_class>{record.status.clone()}</span>
                <span class="text-muted">{record.processed_at.clone()}</span>
                {record.processed_filename.clone().map(|name| {
                    view! { <span class="history-filename">{name}</span> }
                })}
            </div>
            <p>{format!("Deleted {} rows", record.deleted_rows)}</p>
            <Show when=move || failed>
                <p class="error-text">"Processing failed for this run."</p>
            </Show>
            {rule_snapshot}
            <button
                class="btn btn-tertiary btn-small"
                on:click=move |_| on_delete(job_id)
            >
                "Delete"
            </button>
        </li>
    }
}
