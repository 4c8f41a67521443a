//! メインアプリケーションコンポーネント
//!
//! ダッシュボードの状態（ファイル一覧・選択・フィルタルール・
//! 履歴キャッシュ）はすべてここが所有し、子コンポーネントには
//! シグナルとコールバックだけを渡す。

use crate::api;
use crate::auth::AuthContext;
use crate::components::{
    admin_panel::AdminPanel,
    file_list::FileList,
    filter_editor::FilterEditor,
    header::Header,
    history_panel::{HistoryPanel, HistoryState},
    login_form::LoginForm,
    process_panel::ProcessPanel,
    upload_area::UploadArea,
};
use crate::util;
use excel_cleaner_common::{
    default_rules, FileRecord, FilterRule, GeneratedFiles, HistoryRecord, UploadResponse,
    UserProfile,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let auth = AuthContext::load();
    provide_context(auth);

    // ダッシュボード状態
    let profile = RwSignal::new(None::<UserProfile>);
    let files = RwSignal::new(Vec::<FileRecord>::new());
    let selected_id = RwSignal::new(None::<i64>);
    let rules = RwSignal::new(default_rules());
    let history = RwSignal::new(Vec::<HistoryRecord>::new());
    let history_state = RwSignal::new(HistoryState::Idle);
    let generated = RwSignal::new(None::<GeneratedFiles>);

    let refresh_files = move || {
        spawn_local(async move {
            match api::files::list_files(&auth.client()).await {
                Ok(list) => files.set(list),
                Err(e) => {
                    auth.handle_error(&e);
                    gloo::console::error!(format!("file list fetch failed: {}", e));
                }
            }
        });
    };

    let refresh_profile = move || {
        spawn_local(async move {
            match api::fetch_profile(&auth.client()).await {
                Ok(user) => profile.set(Some(user)),
                Err(e) => {
                    auth.handle_error(&e);
                    gloo::console::error!(format!("profile fetch failed: {}", e));
                }
            }
        });
    };

    // ログイン状態の変化でデータを読み直す
    Effect::new(move |_| {
        if auth.token.get().is_some() {
            refresh_files();
            refresh_profile();
        } else {
            profile.set(None);
            files.set(Vec::new());
            selected_id.set(None);
        }
    });

    // 履歴と生成物の再取得。選択変更時と処理完了時の両方から呼ぶ
    let refresh_selection_caches = move |file_id: i64| {
        spawn_local(async move {
            let client = auth.client();
            match api::history::fetch_history(&client, file_id).await {
                Ok(records) => {
                    history.set(records);
                    history_state.set(HistoryState::Loaded);
                }
                Err(e) => {
                    auth.handle_error(&e);
                    gloo::console::error!(format!("history fetch failed: {}", e));
                    history_state.set(HistoryState::Error(util::user_message(&e)));
                }
            }
            match api::files::generated_files(&client, file_id).await {
                Ok(artifacts) => generated.set(Some(artifacts)),
                Err(e) => {
                    auth.handle_error(&e);
                    gloo::console::error!(format!("generated fetch failed: {}", e));
                    generated.set(None);
                }
            }
        });
    };

    // 選択ファイルの変化で履歴と生成物を読み直す
    Effect::new(move |_| {
        let Some(file_id) = selected_id.get() else {
            history.set(Vec::new());
            history_state.set(HistoryState::Idle);
            generated.set(None);
            return;
        };
        history_state.set(HistoryState::Loading);
        refresh_selection_caches(file_id);
    });

    let selected_file = Signal::derive(move || {
        selected_id
            .get()
            .and_then(|id| files.get().into_iter().find(|f| f.id == id))
    });
    let is_admin = Signal::derive(move || profile.get().map(|p| p.is_admin).unwrap_or(false));

    // アップロード完了ハンドラ
    let on_uploaded = move |resp: UploadResponse| {
        if resp.duplicate {
            // 既存エントリを指すだけで新しい行は作らない
            util::alert(&util::duplicate_upload_message(&resp.filename));
            if files.get_untracked().iter().any(|f| f.id == resp.file_id) {
                selected_id.set(Some(resp.file_id));
            }
        } else {
            refresh_files();
            selected_id.set(Some(resp.file_id));
        }
    };

    // 選択ハンドラ（同じ行をもう一度クリックで選択解除）
    let on_select = move |file_id: i64| {
        if selected_id.get_untracked() == Some(file_id) {
            selected_id.set(None);
        } else {
            selected_id.set(Some(file_id));
        }
    };

    // ファイル削除ハンドラ
    let on_delete_file = move |file_id: i64| {
        spawn_local(async move {
            match api::files::delete_file(&auth.client(), file_id).await {
                Ok(()) => {
                    if selected_id.get_untracked() == Some(file_id) {
                        selected_id.set(None);
                    }
                    refresh_files();
                }
                Err(e) => {
                    auth.handle_error(&e);
                    gloo::console::error!(format!("file delete failed: {}", e));
                    util::alert(&format!("Delete failed: {}", util::user_message(&e)));
                }
            }
        });
    };

    // ルール変更はスナップショット全体を置き換える
    let on_rules_changed = move |next: Vec<FilterRule>| rules.set(next);

    // 処理完了でサーバ側の履歴・生成物が変わるので読み直す
    let on_processed = move || {
        if let Some(file_id) = selected_id.get_untracked() {
            refresh_selection_caches(file_id);
        }
    };

    let on_login = move |token: String| auth.login(token);
    let on_logout = move |_: ()| auth.logout();

    view! {
        <div class="container">
            <Header profile=profile on_logout=on_logout />

            <Show
                when=move || auth.is_logged_in()
                fallback=move || view! { <LoginForm on_login=on_login /> }
            >
                <UploadArea on_uploaded=on_uploaded />

                <FileList
                    files=files
                    selected_id=selected_id
                    on_select=on_select
                    on_delete=on_delete_file
                    on_refresh=move |_: ()| refresh_files()
                />

                <FilterEditor rules=rules.into() on_change=on_rules_changed />

                <ProcessPanel
                    file=selected_file
                    rules=rules.into()
                    history=history
                    generated=generated
                    on_processed=on_processed
                />

                <HistoryPanel
                    file_id=selected_id.into()
                    history=history
                    state=history_state
                    is_admin=is_admin
                />

                <Show when=move || is_admin.get()>
                    <AdminPanel />
                </Show>
            </Show>
        </div>
    }
}
