//! ファイル一覧・アップロード・生成物

use super::client::ApiClient;
use excel_cleaner_common::{Error, FileRecord, GeneratedFiles, Result, UploadResponse};
use web_sys::{File, FormData};

pub async fn list_files(client: &ApiClient) -> Result<Vec<FileRecord>> {
    client.get_json("/files").await
}

/// multipartでファイルを1件アップロードする
///
/// 拡張子の検証は呼び出し側が済ませている前提（弾いた場合は
/// ここまで到達しない）。
pub async fn upload_file(client: &ApiClient, file: &File) -> Result<UploadResponse> {
    let form = FormData::new()
        .map_err(|e| Error::Network(format!("FormData creation failed: {:?}", e)))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|e| Error::Network(format!("FormData append failed: {:?}", e)))?;
    client.post_form("/upload", form).await
}

pub async fn generated_files(client: &ApiClient, file_id: i64) -> Result<GeneratedFiles> {
    client.get_json(&format!("/files/{}/generated", file_id)).await
}

pub async fn delete_file(client: &ApiClient, file_id: i64) -> Result<()> {
    client.delete(&format!("/files/{}", file_id)).await
}
