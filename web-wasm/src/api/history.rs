//! 処理履歴のCRUD

use super::client::ApiClient;
use excel_cleaner_common::{ClearHistoryResponse, HistoryRecord, Result};

pub async fn fetch_history(client: &ApiClient, file_id: i64) -> Result<Vec<HistoryRecord>> {
    client.get_json(&format!("/files/{}/history", file_id)).await
}

pub async fn delete_history_item(client: &ApiClient, file_id: i64, job_id: i64) -> Result<()> {
    client
        .delete(&format!("/files/{}/history/{}", file_id, job_id))
        .await
}

/// 履歴の全削除（管理者のみ）。削除件数が返る
pub async fn clear_history(client: &ApiClient, file_id: i64) -> Result<ClearHistoryResponse> {
    client.delete_json(&format!("/files/{}/history", file_id)).await
}
