//! 管理者パネルコンポーネント
//!
//! 招待の発行・失効、ユーザの一覧・詳細・削除、診断表示。
//! いずれも管理APIへの配線のみで、判断はすべてサーバ側。

use crate::api;
use crate::auth::use_auth;
use crate::util;
use excel_cleaner_common::{AdminUser, Invitation};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn AdminPanel() -> impl IntoView {
    let auth = use_auth();
    let invitations = RwSignal::new(Vec::<Invitation>::new());
    let users = RwSignal::new(Vec::<AdminUser>::new());
    let last_invitation_url = RwSignal::new(None::<String>);
    let diagnostics = RwSignal::new(None::<String>);

    let load_invitations = move || {
        spawn_local(async move {
            match api::admin::list_invitations(&auth.client()).await {
                Ok(list) => invitations.set(list),
                Err(e) => {
                    auth.handle_error(&e);
                    gloo::console::error!(format!("invitation list failed: {}", e));
                }
            }
        });
    };

    let load_users = move || {
        spawn_local(async move {
            match api::admin::list_users(&auth.client()).await {
                Ok(list) => users.set(list),
                Err(e) => {
                    auth.handle_error(&e);
                    gloo::console::error!(format!("user list failed: {}", e));
                }
            }
        });
    };

    // 初回表示で両リストを読む
    load_invitations();
    load_users();

    let on_generate_invitation = move |_| {
        spawn_local(async move {
            match api::admin::create_invitation(&auth.client()).await {
                Ok(invitation) => {
                    last_invitation_url.set(invitation.invitation_url.clone());
                    load_invitations();
                }
                Err(e) => {
                    auth.handle_error(&e);
                    util::alert(&format!("Invitation failed: {}", util::user_message(&e)));
                }
            }
        });
    };

    let on_expire = move |invitation_id: i64| {
        if !util::confirm("Expire this invitation?") {
            return;
        }
        spawn_local(async move {
            match api::admin::expire_invitation(&auth.client(), invitation_id).await {
                Ok(()) => load_invitations(),
                Err(e) => {
                    auth.handle_error(&e);
                    util::alert(&format!("Expire failed: {}", util::user_message(&e)));
                }
            }
        });
    };

    // 削除前にファイル数・ジョブ数を提示して確認を取る
    let on_delete_user = move |user_id: i64| {
        spawn_local(async move {
            let client = auth.client();
            let user = match api::admin::get_user(&client, user_id).await {
                Ok(user) => user,
                Err(e) => {
                    auth.handle_error(&e);
                    util::alert(&format!("Lookup failed: {}", util::user_message(&e)));
                    return;
                }
            };
            let message = format!(
                "Delete user {}? This removes {} files and {} jobs.",
                user.email, user.file_count, user.job_count
            );
            if !util::confirm(&message) {
                return;
            }
            match api::admin::delete_user(&client, user_id).await {
                Ok(()) => load_users(),
                Err(e) => {
                    auth.handle_error(&e);
                    util::alert(&format!("Delete failed: {}", util::user_message(&e)));
                }
            }
        });
    };

    let run_diagnostic = move |which: &'static str| {
        spawn_local(async move {
            let client = auth.client();
            let result = match which {
                "storage" => api::admin::debug_storage(&client).await,
                _ => api::admin::test_github(&client).await,
            };
            match result {
                Ok(value) => {
                    let text = serde_json::to_string_pretty(&value)
                        .unwrap_or_else(|_| value.to_string());
                    diagnostics.set(Some(text));
                }
                Err(e) => {
                    auth.handle_error(&e);
                    diagnostics.set(Some(format!("Error: {}", util::user_message(&e))));
                }
            }
        });
    };

    view! {
        <div class="admin-panel">
            <h3>"Administration"</h3>

            <div class="admin-section">
                <h4>"Invitations"</h4>
                <button class="btn btn-primary btn-small" on:click=on_generate_invitation>
                    "Generate invitation"
                </button>
                {move || {
                    last_invitation_url.get().map(|url| {
                        let copy_url = url.clone();
                        view! {
                            <div class="invitation-url">
                                <code>{url}</code>
                                <button
                                    class="btn btn-secondary btn-small"
                                    on:click=move |_| util::copy_to_clipboard(&copy_url)
                                >
                                    "Copy"
                                </button>
                            </div>
                        }
                    })
                }}
                <ul class="invitation-list">
                    <For
                        each=move || invitations.get()
                        key=|invitation| invitation.id
                        children=move |invitation| {
                            let invitation_id = invitation.id;
                            let inactive = invitation.used || invitation.expired;
                            let status = if invitation.used {
                                "used"
                            } else if invitation.expired {
                                "expired"
                            } else {
                                "active"
                            };
                            view! {
                                <li class="invitation-row">
                                    <code>{invitation.code.clone()}</code>
                                    <span class=format!("badge {}", status)>{status}</span>
                                    {invitation.expires_at.clone().map(|at| {
                                        view! { <span class="text-muted">{at}</span> }
                                    })}
                                    <Show when=move || !inactive>
                                        <button
                                            class="btn btn-tertiary btn-small"
                                            on:click=move |_| on_expire(invitation_id)
                                        >
                                            "Expire"
                                        </button>
                                    </Show>
                                </li>
                            }
                        }
                    />
                </ul>
            </div>

            <div class="admin-section">
                <h4>"Users"</h4>
                <ul class="user-list">
                    <For
                        each=move || users.get()
                        key=|user| user.id
                        children=move |user| {
                            let user_id = user.id;
                            view! {
                                <li class="user-row">
                                    <span class="user-email">{user.email.clone()}</span>
                                    <Show when={
                                        let is_admin = user.is_admin;
                                        move || is_admin
                                    }>
                                        <span class="badge admin">"admin"</span>
                                    </Show>
                                    <span class="text-muted">
                                        {format!(
                                            "{} files, {} jobs",
                                            user.file_count, user.job_count
                                        )}
                                    </span>
                                    <button
                                        class="btn btn-tertiary btn-small"
                                        on:click=move |_| on_delete_user(user_id)
                                    >
                                        "Delete"
                                    </button>
                                </li>
                            }
                        }
                    />
                </ul>
            </div>

            <div class="admin-section">
                <h4>"Diagnostics"</h4>
                <div class="diagnostic-buttons">
                    <button
                        class="btn btn-secondary btn-small"
                        on:click=move |_| run_diagnostic("storage")
                    >
                        "Debug storage"
                    </button>
                    <button
                        class="btn btn-secondary btn-small"
                        on:click=move |_| run_diagnostic("github")
                    >
                        "Test connectivity"
                    </button>
                </div>
                {move || {
                    diagnostics.get().map(|text| view! { <pre class="diagnostic-output">{text}</pre> })
                }}
            </div>
        </div>
    }
}
