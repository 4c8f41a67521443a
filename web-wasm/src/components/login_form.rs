//! ログインフォームコンポーネント
//!
//! アクセストークンの貼り付け式。登録・発行フローはサーバ側の
//! 範囲なのでここでは扱わない。401でトークンが破棄されると
//! この画面に戻る。

use crate::util;
use leptos::prelude::*;

#[component]
pub fn LoginForm<F>(on_login: F) -> impl IntoView
where
    F: Fn(String) + 'static + Clone + Send + Sync,
{
    let (token, set_token) = signal(String::new());

    let submit = move |_| {
        let value = token.get_untracked().trim().to_string();
        if value.is_empty() {
            util::alert("Enter an access token.");
            return;
        }
        on_login(value);
    };

    view! {
        <div class="login-form">
            <h2>"Sign in"</h2>
            <p class="text-muted">"Paste your access token to continue."</p>
            <input
                type="password"
                placeholder="Access token..."
                prop:value=move || token.get()
                on:input=move |ev| {
                    set_token.set(event_target_value(&ev));
                }
            />
            <button class="btn btn-primary" on:click=submit>
                "Sign in"
            </button>
        </div>
    }
}
