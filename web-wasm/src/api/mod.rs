//! サーバAPI連携
//!
//! JSON-over-HTTPS REST。認証が要る要求にはすべて
//! `Authorization: Bearer {token}` を付ける。

pub mod client;
pub mod files;
pub mod process;
pub mod history;
pub mod admin;
pub mod download;

use client::ApiClient;
use excel_cleaner_common::{Result, UserProfile};

/// ログイン中ユーザのプロフィールを取得する
pub async fn fetch_profile(client: &ApiClient) -> Result<UserProfile> {
    client.get_json("/profile").await
}
