//! Public API Types
//!
//! 公開APIで使用する列挙型と書式コンテキストを定義するモジュール。

/// 日付の出力形式
///
/// 日付セルを文字列に変換する際の出力形式を指定します。
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DateFormat {
    /// ISO 8601形式
    ///
    /// 日付のみ: `2025-11-20`、時刻付き: `2025-11-20 13:45:00`
    Iso8601,

    /// カスタム形式（chrono互換フォーマット文字列）
    ///
    /// # フォーマット指定子（主要なもの）
    ///
    /// - `%Y`: 4桁の年（例: 2025）
    /// - `%m`: 2桁の月（01-12）
    /// - `%d`: 2桁の日（01-31）
    /// - `%H`: 24時間形式の時（00-23）
    /// - `%M`: 分（00-59）
    /// - `%S`: 秒（00-59）
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsxpopulate::{DateFormat, PopulatorBuilder};
    ///
    /// # fn main() -> Result<(), xlsxpopulate::PopulateError> {
    /// let populator = PopulatorBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%d/%m/%Y".to_string()))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    Custom(String),
}

impl DateFormat {
    /// chronoに渡すフォーマット文字列を返す
    pub(crate) fn pattern(&self, with_time: bool) -> &str {
        match self {
            DateFormat::Iso8601 if with_time => "%Y-%m-%d %H:%M:%S",
            DateFormat::Iso8601 => "%Y-%m-%d",
            DateFormat::Custom(pattern) => pattern,
        }
    }
}

/// 論理値セルの表記
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum BoolStyle {
    /// `True` / `False`（デフォルト）
    #[default]
    TitleCase,

    /// `TRUE` / `FALSE`（Excelの表示と同じ）
    UpperCase,

    /// `true` / `false`
    LowerCase,
}

impl BoolStyle {
    pub(crate) fn render(self, value: bool) -> &'static str {
        match (self, value) {
            (BoolStyle::TitleCase, true) => "True",
            (BoolStyle::TitleCase, false) => "False",
            (BoolStyle::UpperCase, true) => "TRUE",
            (BoolStyle::UpperCase, false) => "FALSE",
            (BoolStyle::LowerCase, true) => "true",
            (BoolStyle::LowerCase, false) => "false",
        }
    }
}

/// セル値を文字列に変換する際の書式コンテキスト
///
/// 実行全体で1つのコンテキストを使用します。プロセスのロケールには依存しないため、
/// 同じ入力からは環境に関係なく同じ出力が得られます。
///
/// # 使用例
///
/// ```rust
/// use xlsxpopulate::{BoolStyle, DateFormat, FormatContext};
///
/// let context = FormatContext {
///     decimal_separator: ',',
///     date_format: DateFormat::Custom("%d.%m.%Y".to_string()),
///     bool_style: BoolStyle::LowerCase,
///     ..FormatContext::default()
/// };
/// assert_eq!(context.decimal_separator, ',');
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatContext {
    /// 小数点の記号（デフォルト: `.`）
    pub decimal_separator: char,

    /// 時刻成分を持たない日付セルの形式
    pub date_format: DateFormat,

    /// 時刻成分を持つ日付セルの形式
    pub datetime_format: DateFormat,

    /// 論理値の表記
    pub bool_style: BoolStyle,
}

impl Default for FormatContext {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            date_format: DateFormat::Iso8601,
            datetime_format: DateFormat::Iso8601,
            bool_style: BoolStyle::default(),
        }
    }
}

/// ヘッダー名が重複した場合の扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum DuplicateHeaderPolicy {
    /// 重複を検出した時点でエラーにする（デフォルト）
    #[default]
    Reject,

    /// 後の列の値で上書きする
    ///
    /// レコードのキー順は最初に出現した位置のままです。
    LastWins,
}

/// 出力ファイル名が衝突した場合の扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum CollisionPolicy {
    /// 後のレコードで上書きする（デフォルト）
    #[default]
    Overwrite,

    /// 2回目以降は `<stem>-<index>.<ext>` にする
    AppendIndex,
}

/// テンプレートのコンパイルオプション
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TemplateOptions {
    /// テンプレート本文からCR/LFを取り除いてからコンパイルする
    ///
    /// フィールド値に含まれる改行はそのまま出力されます。
    /// デフォルトは`false`（テンプレートの改行を保持）。
    pub collapse_newlines: bool,
}
