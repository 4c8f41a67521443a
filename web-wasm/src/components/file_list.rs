//! アップロード済みファイルの一覧コンポーネント

use crate::util;
use excel_cleaner_common::FileRecord;
use leptos::prelude::*;

/// バイト数の表示用整形
fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

#[component]
pub fn FileList<FS, FD, FR>(
    files: RwSignal<Vec<FileRecord>>,
    selected_id: RwSignal<Option<i64>>,
    on_select: FS,
    on_delete: FD,
    on_refresh: FR,
) -> impl IntoView
where
    FS: Fn(i64) + 'static + Clone + Send + Sync,
    FD: Fn(i64) + 'static + Clone + Send + Sync,
    FR: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="file-list">
            <div class="file-list-header">
                <h3>"Files"</h3>
                <button
                    class="btn btn-secondary btn-small"
                    on:click={
                        let on_refresh = on_refresh.clone();
                        move |_| on_refresh(())
                    }
                >
                    "Refresh"
                </button>
            </div>
            <Show
                when=move || !files.get().is_empty()
                fallback=|| view! { <p class="text-muted">"No files uploaded yet."</p> }
            >
                <ul>
                    <For
                        each=move || files.get()
                        key=|file| file.id
                        children={
                            let on_select = on_select.clone();
                            let on_delete = on_delete.clone();
                            move |file| {
                            let on_select = on_select.clone();
                            let on_delete = on_delete.clone();
                            let file_id = file.id;
                            let processed = file.processed;
                            let filename = file.original_filename.clone();
                            let is_selected = move || selected_id.get() == Some(file_id);
                            view! {
                                <li class="file-row" class:selected=is_selected>
                                    <span
                                        class="file-name"
                                        on:click=move |_| on_select(file_id)
                                    >
                                        {file.original_filename.clone()}
                                    </span>
                                    <span class="file-size text-muted">
                                        {format_size(file.file_size)}
                                    </span>
                                    <Show when=move || processed>
                                        <span class="badge processed">"processed"</span>
                                    </Show>
                                    <button
                                        class="btn btn-tertiary btn-small"
                                        on:click=move |_| {
                                            let message =
                                                format!("Delete \"{}\"?", filename);
                                            if util::confirm(&message) {
                                                on_delete(file_id);
                                            }
                                        }
                                    >
                                        "Delete"
                                    </button>
                                </li>
                            }
                        }
                        }
                    />
                </ul>
            </Show>
        </div>
    }
}
