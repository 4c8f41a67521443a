//! アップロード/ダウンロードまわりの純粋ヘルパ

use crate::error::{Error, Result};

/// アップロード対象として受け付けるファイル名か
///
/// 拡張子 .xlsx / .xls のみ（大文字小文字は区別しない）。
/// ここで弾いた場合はネットワーク要求を一切発行しない。
pub fn is_supported_filename(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.ends_with(".xlsx") || lower.ends_with(".xls")
}

/// アップロード前のファイル名検証
///
/// 受け付けない拡張子は`Error::Validation`にする。表示文面は
/// 他のエラーと同じく`user_message`経由で出す想定。
pub fn validate_upload_filename(name: &str) -> Result<()> {
    if is_supported_filename(name) {
        Ok(())
    } else {
        Err(Error::Validation(
            "Only .xlsx and .xls files can be uploaded.".to_string(),
        ))
    }
}

/// Content-Dispositionヘッダからファイル名を取り出す
///
/// `attachment; filename="processed.xlsx"` 形式を想定。引用符は
/// あってもなくてもよい。見つからなければNone（呼び出し側が
/// メタデータ由来の名前にフォールバックする）。
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    for part in header.split(';') {
        let part = part.trim();
        let Some(prefix) = part.get(..9) else {
            continue;
        };
        if prefix.eq_ignore_ascii_case("filename=") {
            let name = part[9..].trim().trim_matches('"');
            if !name.is_empty() {
                return Some(name.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_xlsx() {
        assert!(is_supported_filename("report.xlsx"));
    }

    #[test]
    fn test_accepts_xls() {
        assert!(is_supported_filename("legacy.xls"));
    }

    #[test]
    fn test_accepts_mixed_case() {
        assert!(is_supported_filename("REPORT.XLSX"));
        assert!(is_supported_filename("Data.Xls"));
    }

    #[test]
    fn test_rejects_other_extensions() {
        assert!(!is_supported_filename("data.csv"));
        assert!(!is_supported_filename("macro.xlsm"));
        assert!(!is_supported_filename("notes.txt"));
    }

    #[test]
    fn test_rejects_no_extension() {
        assert!(!is_supported_filename("xlsx"));
        assert!(!is_supported_filename(""));
    }

    #[test]
    fn test_validate_accepts_supported_name() {
        assert!(validate_upload_filename("report.xlsx").is_ok());
    }

    #[test]
    fn test_validate_rejects_with_validation_error() {
        let err = validate_upload_filename("data.csv").unwrap_err();
        match err {
            Error::Validation(message) => {
                assert_eq!(message, "Only .xlsx and .xls files can be uploaded.");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_disposition_quoted() {
        let header = r#"attachment; filename="processed.xlsx""#;
        assert_eq!(
            filename_from_content_disposition(header),
            Some("processed.xlsx".to_string())
        );
    }

    #[test]
    fn test_disposition_unquoted() {
        let header = "attachment; filename=report.xls";
        assert_eq!(
            filename_from_content_disposition(header),
            Some("report.xls".to_string())
        );
    }

    #[test]
    fn test_disposition_case_insensitive_key() {
        let header = "attachment; Filename=\"a.xlsx\"";
        assert_eq!(
            filename_from_content_disposition(header),
            Some("a.xlsx".to_string())
        );
    }

    #[test]
    fn test_disposition_missing() {
        assert_eq!(filename_from_content_disposition("inline"), None);
        assert_eq!(filename_from_content_disposition(""), None);
    }

    #[test]
    fn test_disposition_empty_name() {
        assert_eq!(filename_from_content_disposition("attachment; filename=\"\""), None);
    }
}
