//! ヘッダーコンポーネント

use excel_cleaner_common::UserProfile;
use leptos::prelude::*;

#[component]
pub fn Header<F>(profile: RwSignal<Option<UserProfile>>, on_logout: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <header class="header">
            <h1>"Excel Cleaner"</h1>
            {move || {
                let on_logout = on_logout.clone();
                profile.get().map(|user| {
                    view! {
                        <div class="header-user">
                            <span class="user-email">{user.email}</span>
                            <button
                                class="btn btn-tertiary btn-small"
                                on:click=move |_| on_logout(())
                            >
                                "Log out"
                            </button>
                        </div>
                    }
                })
            }}
        </header>
    }
}
