//! 管理者API（招待・ユーザ・診断）
//!
//! リクエスト/レスポンスの配線のみで業務ロジックは持たない。
//! 診断系はサーバが返したものをそのまま表示に回す。

use super::client::ApiClient;
use excel_cleaner_common::{AdminUser, Invitation, Result};

pub async fn list_invitations(client: &ApiClient) -> Result<Vec<Invitation>> {
    client.get_json("/admin/invitations").await
}

/// 招待を発行する。レスポンスに招待URLが含まれる
pub async fn create_invitation(client: &ApiClient) -> Result<Invitation> {
    client
        .post_json("/admin/create-invitation", &serde_json::json!({}))
        .await
}

pub async fn expire_invitation(client: &ApiClient, invitation_id: i64) -> Result<()> {
    client
        .post_empty(&format!("/admin/invitations/{}/expire", invitation_id))
        .await
}

pub async fn list_users(client: &ApiClient) -> Result<Vec<AdminUser>> {
    client.get_json("/admin/users").await
}

pub async fn get_user(client: &ApiClient, user_id: i64) -> Result<AdminUser> {
    client.get_json(&format!("/admin/users/{}", user_id)).await
}

pub async fn delete_user(client: &ApiClient, user_id: i64) -> Result<()> {
    client.delete(&format!("/admin/users/{}", user_id)).await
}

pub async fn debug_storage(client: &ApiClient) -> Result<serde_json::Value> {
    client.get_json("/debug/storage").await
}

pub async fn test_github(client: &ApiClient) -> Result<serde_json::Value> {
    client.get_json("/test-github").await
}
