//! ブラウザダイアログの薄いラッパと定型メッセージ

use excel_cleaner_common::Error;
use wasm_bindgen_futures::JsFuture;

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// クリップボードへコピー（失敗はコンソールにのみ残す）
pub fn copy_to_clipboard(text: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let promise = window.navigator().clipboard().write_text(text);
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            gloo::console::error!(format!("clipboard write failed: {:?}", e));
        }
    });
}

/// ユーザに見せるエラーメッセージ
///
/// サーバ提供のメッセージがあればそれを、なければ汎用文言を返す。
pub fn user_message(error: &Error) -> String {
    match error {
        Error::Api { message, .. } => message.clone(),
        Error::Unauthorized => "Session expired. Please log in again.".to_string(),
        Error::Validation(message) => message.clone(),
        _ => "Request failed".to_string(),
    }
}

pub fn duplicate_upload_message(filename: &str) -> String {
    format!("File \"{}\" already exists", filename)
}

pub fn clear_history_message(count: u64) -> String {
    format!("Cleared {} history items", count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_api() {
        let error = Error::Api {
            status: 500,
            message: "sheet is locked".to_string(),
        };
        assert_eq!(user_message(&error), "sheet is locked");
    }

    #[test]
    fn test_user_message_network_generic() {
        let error = Error::Network("fetch rejected".to_string());
        assert_eq!(user_message(&error), "Request failed");
    }

    #[test]
    fn test_user_message_validation_passthrough() {
        let error = Error::Validation("Only .xlsx and .xls files can be uploaded.".to_string());
        assert_eq!(user_message(&error), "Only .xlsx and .xls files can be uploaded.");
    }

    #[test]
    fn test_user_message_unauthorized() {
        assert!(user_message(&Error::Unauthorized).contains("log in"));
    }

    #[test]
    fn test_duplicate_upload_message() {
        let message = duplicate_upload_message("test.xlsx");
        assert!(message.contains("already exists"));
        assert!(message.contains("test.xlsx"));
    }

    #[test]
    fn test_clear_history_message() {
        assert_eq!(clear_history_message(2), "Cleared 2 history items");
    }
}
