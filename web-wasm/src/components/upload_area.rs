//! アップロードエリアコンポーネント
//!
//! 拡張子の検証はリクエスト発行前に行い、弾いた場合は
//! ネットワーク要求を出さない。重複ファイルの扱い（通知と
//! 既存エントリの選択）は親のハンドラ側。

use crate::api;
use crate::auth::use_auth;
use crate::util;
use excel_cleaner_common::{validate_upload_filename, UploadResponse};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn UploadArea<F>(on_uploaded: F) -> impl IntoView
where
    F: Fn(UploadResponse) + 'static + Clone + Send + Sync,
{
    let auth = use_auth();
    let (uploading, set_uploading) = signal(false);
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let on_change = move |_| {
        let Some(input) = input_ref.get_untracked() else {
            return;
        };
        let Some(files) = input.files() else {
            return;
        };
        let Some(file) = files.get(0) else {
            return;
        };

        let name = file.name();
        if let Err(e) = validate_upload_filename(&name) {
            util::alert(&util::user_message(&e));
            input.set_value("");
            return;
        }

        set_uploading.set(true);
        let on_uploaded = on_uploaded.clone();
        spawn_local(async move {
            match api::files::upload_file(&auth.client(), &file).await {
                Ok(resp) => on_uploaded(resp),
                Err(e) => {
                    auth.handle_error(&e);
                    gloo::console::error!(format!("upload failed: {}", e));
                    util::alert(&format!("Upload failed: {}", util::user_message(&e)));
                }
            }
            set_uploading.set(false);
            // 同じファイルを選び直せるよう入力値を空に戻す
            if let Some(input) = input_ref.get_untracked() {
                input.set_value("");
            }
        });
    };

    view! {
        <div class="upload-area">
            <label for="file-input">"Upload a spreadsheet (.xlsx / .xls)"</label>
            <input
                id="file-input"
                type="file"
                accept=".xlsx,.xls"
                node_ref=input_ref
                disabled=move || uploading.get()
                on:change=on_change
            />
            <Show when=move || uploading.get()>
                <p class="text-muted">"Uploading..."</p>
            </Show>
        </div>
    }
}
