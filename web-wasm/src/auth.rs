//! 認証トークンの保持とLocalStorageへの永続化
//!
//! トークンはLocalStorageの固定キー1つに保存する。要求コードが
//! ストレージを直接読むことはなく、常にこのコンテキスト経由で
//! クライアントを組み立てる。401を受けた操作はhandle_errorへ
//! エラーを渡し、トークン破棄とログイン画面への復帰を一箇所で行う。

use crate::api::client::ApiClient;
use excel_cleaner_common::Error;
use gloo::storage::{LocalStorage, Storage};
use leptos::prelude::*;

const TOKEN_KEY: &str = "excel_cleaner_token";

fn load_token() -> Option<String> {
    LocalStorage::get::<String>(TOKEN_KEY)
        .ok()
        .filter(|token| !token.is_empty())
}

/// アプリ全体で共有する認証コンテキスト
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub token: RwSignal<Option<String>>,
}

impl AuthContext {
    /// 保存済みトークンがあれば復元した状態で作る
    pub fn load() -> Self {
        Self {
            token: RwSignal::new(load_token()),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.get().is_some()
    }

    /// 現在のトークンでAPIクライアントを組み立てる
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.token.get_untracked())
    }

    pub fn login(&self, token: String) {
        let _ = LocalStorage::set(TOKEN_KEY, &token);
        self.token.set(Some(token));
    }

    pub fn logout(&self) {
        LocalStorage::delete(TOKEN_KEY);
        self.token.set(None);
    }

    /// 401ならトークンを破棄してログイン画面へ戻す
    pub fn handle_error(&self, error: &Error) {
        if matches!(error, Error::Unauthorized) {
            self.logout();
        }
    }
}

/// コンポーネントから認証コンテキストを取り出す
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext not provided")
}
