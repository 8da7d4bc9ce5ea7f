//! Security Module
//!
//! 入力サイズの上限と、出力ファイル名の安全化を提供するモジュール。
//! スプレッドシートの値をファイル名に使うため、パストラバーサルや
//! ファイルシステムで使用できない文字を取り除きます。

/// セキュリティ設定
#[derive(Debug, Clone)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 2GB (2_147_483_648 bytes)
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: 2_147_483_648, // 2GB
        }
    }
}

/// ファイル名に使用できない文字（Windowsの予約文字とパス区切り）
const FORBIDDEN_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// ファイル名の語幹を安全化
///
/// # 引数
///
/// * `raw` - 命名列の値
///
/// # 戻り値
///
/// * `Some(String)` - 安全化された語幹
/// * `None` - 安全化の結果、使用できる文字が残らなかった場合（`.`や`..`を含む）
///
/// # 規則
///
/// - 禁止文字と制御文字は`_`に置換
/// - 前後の空白と末尾の`.`を除去
pub(crate) fn sanitize_file_stem(raw: &str) -> Option<String> {
    let replaced: String = raw
        .chars()
        .map(|c| {
            if FORBIDDEN_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    let trimmed = replaced.trim().trim_end_matches('.').trim_end();

    if trimmed.is_empty() {
        return None;
    }

    Some(trimmed.to_string())
}

/// 拡張子の検証と正規化
///
/// 先頭の`.`は取り除きます（`.md` -> `md`）。
///
/// # 戻り値
///
/// * `Ok(String)` - 正規化された拡張子
/// * `Err(String)` - 空、またはパス区切りなどの禁止文字を含む場合
pub(crate) fn validate_extension(extension: &str) -> Result<String, String> {
    let normalized = extension.trim().trim_start_matches('.');

    if normalized.is_empty() {
        return Err("Output extension must not be empty".to_string());
    }

    if let Some(c) = normalized
        .chars()
        .find(|c| FORBIDDEN_CHARS.contains(c) || c.is_control() || c.is_whitespace())
    {
        return Err(format!(
            "Output extension contains an invalid character {:?}: {}",
            c, extension
        ));
    }

    Ok(normalized.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_plain_value() {
        assert_eq!(sanitize_file_stem("World").as_deref(), Some("World"));
        assert_eq!(
            sanitize_file_stem("Invoice 2025-01").as_deref(),
            Some("Invoice 2025-01")
        );
    }

    #[test]
    fn test_sanitize_path_traversal() {
        assert_eq!(
            sanitize_file_stem("../../etc/passwd").as_deref(),
            Some(".._.._etc_passwd")
        );
        assert_eq!(sanitize_file_stem("..").as_deref(), None);
        assert_eq!(sanitize_file_stem(".").as_deref(), None);
    }

    #[test]
    fn test_sanitize_forbidden_chars() {
        assert_eq!(
            sanitize_file_stem("a<b>c:d\"e|f?g*h").as_deref(),
            Some("a_b_c_d_e_f_g_h")
        );
        assert_eq!(
            sanitize_file_stem("C:\\Windows\\system32").as_deref(),
            Some("C__Windows_system32")
        );
        assert_eq!(sanitize_file_stem("line\nbreak").as_deref(), Some("line_break"));
    }

    #[test]
    fn test_sanitize_trims() {
        assert_eq!(sanitize_file_stem("  name  ").as_deref(), Some("name"));
        assert_eq!(sanitize_file_stem("name...").as_deref(), Some("name"));
        assert_eq!(sanitize_file_stem("   ").as_deref(), None);
    }

    #[test]
    fn test_validate_extension() {
        assert_eq!(validate_extension("txt").unwrap(), "txt");
        assert_eq!(validate_extension(".md").unwrap(), "md");
        assert_eq!(validate_extension("tar.gz").unwrap(), "tar.gz");
        assert!(validate_extension("").is_err());
        assert!(validate_extension(".").is_err());
        assert!(validate_extension("a/b").is_err());
        assert!(validate_extension("a b").is_err());
    }
}
