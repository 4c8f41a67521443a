//! バイナリダウンロードとブラウザ保存

use super::client::ApiClient;
use excel_cleaner_common::{filename_from_content_disposition, Error, Result};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// ファイルを取得してブラウザの保存ダイアログを起動する
///
/// ファイル名はContent-Dispositionを優先し、なければ呼び出し側が
/// 渡したメタデータ由来の名前を使う。
pub async fn download_file(client: &ApiClient, file_id: i64, fallback_name: &str) -> Result<()> {
    let (bytes, disposition) = client.get_bytes(&format!("/download/{}", file_id)).await?;
    let filename = disposition
        .as_deref()
        .and_then(filename_from_content_disposition)
        .unwrap_or_else(|| fallback_name.to_string());
    save_bytes(&bytes, &filename)
        .map_err(|e| Error::Network(format!("save failed: {:?}", e)))
}

/// バイト列をBlob化しアンカー経由で保存させる
fn save_bytes(bytes: &[u8], filename: &str) -> std::result::Result<(), JsValue> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let options = BlobPropertyBag::new();
    options.set_type("application/octet-stream");
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;

    let url = Url::create_object_url_with_blob(&blob)?;
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();
    Url::revoke_object_url(&url)?;
    Ok(())
}
