//! fetchベースのAPIクライアント
//!
//! レスポンスの扱いは一律:
//! - 2xx: JSONをデシリアライズ（またはボディ破棄/バイト列取得）
//! - 401: `Error::Unauthorized`（呼び出し側がトークンを破棄する）
//! - その他の非2xx: ボディからサーバのメッセージを抽出して`Error::Api`
//! - fetch自体の失敗: `Error::Network`
//! 自動リトライはどの経路にもない。

use excel_cleaner_common::{extract_server_message, Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, RequestMode, Response};

/// APIのベースURL（リバースプロキシ配下の相対パス）
pub const DEFAULT_API_BASE: &str = "/api";

/// リクエストボディの種類
enum Body {
    None,
    Json(String),
    Form(FormData),
}

/// ベアラトークン付きAPIクライアント
///
/// 要求のたびに認証コンテキストから組み立てる使い捨ての値。
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(token: Option<String>) -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            token,
        }
    }

    #[allow(dead_code)]
    pub fn with_base_url(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.send("GET", path, Body::None).await?;
        decode_json(resp).await
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let json = serde_json::to_string(body)?;
        let resp = self.send("POST", path, Body::Json(json)).await?;
        decode_json(resp).await
    }

    /// ボディなしPOST（expireなどのアクション系エンドポイント）
    pub async fn post_empty(&self, path: &str) -> Result<()> {
        self.send("POST", path, Body::None).await?;
        Ok(())
    }

    pub async fn post_form<T: DeserializeOwned>(&self, path: &str, form: FormData) -> Result<T> {
        let resp = self.send("POST", path, Body::Form(form)).await?;
        decode_json(resp).await
    }

    pub async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.send("DELETE", path, Body::None).await?;
        decode_json(resp).await
    }

    /// レスポンスボディを捨てるDELETE
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send("DELETE", path, Body::None).await?;
        Ok(())
    }

    /// バイナリ取得。ボディとContent-Dispositionヘッダを返す
    pub async fn get_bytes(&self, path: &str) -> Result<(Vec<u8>, Option<String>)> {
        let resp = self.send("GET", path, Body::None).await?;
        let disposition = resp
            .headers()
            .get("Content-Disposition")
            .ok()
            .flatten();
        let promise = resp.array_buffer().map_err(js_err)?;
        let buffer = JsFuture::from(promise).await.map_err(js_err)?;
        let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
        Ok((bytes, disposition))
    }

    async fn send(&self, method: &str, path: &str, body: Body) -> Result<Response> {
        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);

        match &body {
            Body::None => {}
            Body::Json(json) => opts.set_body(&JsValue::from_str(json)),
            // multipartの境界はブラウザが付けるのでContent-Typeは設定しない
            Body::Form(form) => opts.set_body(form.as_ref()),
        }

        let request = Request::new_with_str_and_init(&self.url(path), &opts).map_err(js_err)?;
        if let Some(token) = &self.token {
            request
                .headers()
                .set("Authorization", &format!("Bearer {}", token))
                .map_err(js_err)?;
        }
        if matches!(body, Body::Json(_)) {
            request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(js_err)?;
        }

        let window = web_sys::window().ok_or_else(|| Error::Network("no window".to_string()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_err)?;
        let resp: Response = resp_value
            .dyn_into()
            .map_err(|_| Error::Network("fetch returned a non-Response value".to_string()))?;

        check_status(resp).await
    }
}

/// 非2xxをエラーへ写像する
async fn check_status(resp: Response) -> Result<Response> {
    if resp.status() == 401 {
        return Err(Error::Unauthorized);
    }
    if !resp.ok() {
        let status = resp.status();
        let body = read_text(&resp).await.unwrap_or_default();
        let message = extract_server_message(&body)
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        return Err(Error::Api { status, message });
    }
    Ok(resp)
}

async fn read_text(resp: &Response) -> Option<String> {
    let promise = resp.text().ok()?;
    JsFuture::from(promise).await.ok()?.as_string()
}

async fn decode_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let promise = resp.json().map_err(js_err)?;
    let value = JsFuture::from(promise).await.map_err(js_err)?;
    serde_wasm_bindgen::from_value(value).map_err(|e| Error::Decode(e.to_string()))
}

fn js_err(value: JsValue) -> Error {
    let message = value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value));
    Error::Network(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let client = ApiClient::new(None);
        assert_eq!(client.url("/files"), "/api/files");
        assert_eq!(client.url("/files/3/history"), "/api/files/3/history");
    }

    #[test]
    fn test_custom_base_url() {
        let client = ApiClient::with_base_url("https://cleaner.example/api", None);
        assert_eq!(client.url("/upload"), "https://cleaner.example/api/upload");
    }
}
