//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use std::path::PathBuf;

use thiserror::Error;

/// xlsxpopulateクレート全体で使用するエラー型
///
/// スプレッドシートの読み込み、テンプレートのコンパイル・レンダリング、
/// 出力ファイルの書き込み中に発生するすべてのエラーを統一的に扱います。
///
/// # エラーの種類
///
/// - 前提条件エラー: `TemplateNotFound`, `SpreadsheetNotFound`, `OutputDirNotFound`, `EmptyTemplate`
/// - シート不正: `EmptyWorksheet`, `InvalidHeader`, `DuplicateHeader`, `MissingHeaderForColumn`
/// - テンプレート: `TemplateCompile`, `Render`
/// - レコード単位のI/O: `Write`
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxpopulate::PopulateError;
/// use std::fs::File;
///
/// fn open_values(path: &str) -> Result<File, PopulateError> {
///     let file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(file)
/// }
/// ```
#[derive(Error, Debug)]
pub enum PopulateError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// スプレッドシートの解析中に発生したエラー（calamine由来）
    #[error("Failed to parse spreadsheet: {0}")]
    Parse(#[from] calamine::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `PopulatorBuilder::build()`時に、拡張子や日付形式が不正な場合に発生します。
    #[error("Configuration error: {0}")]
    Config(String),

    /// 入力サイズなどのセキュリティ制限に違反したエラー
    #[error("Security violation: {0}")]
    SecurityViolation(String),

    /// テンプレートファイルが存在しない
    #[error("The template file does not exist: {}", .0.display())]
    TemplateNotFound(PathBuf),

    /// スプレッドシートファイルが存在しない
    #[error("The spreadsheet file does not exist: {}", .0.display())]
    SpreadsheetNotFound(PathBuf),

    /// 出力ディレクトリが存在しない、またはディレクトリではない
    #[error("The output directory does not exist: {}", .0.display())]
    OutputDirNotFound(PathBuf),

    /// テンプレートが空
    #[error("The template is empty")]
    EmptyTemplate,

    /// ワークシートにデータ範囲がない、またはヘッダーが1つも解決できない
    #[error("Worksheet is empty")]
    EmptyWorksheet,

    /// ヘッダーセルが空、空白のみ、または文字列ではない
    ///
    /// `row`と`col`は1始まり、`address`はA1記法です。
    #[error("Invalid header name on row: {row}, column: {col}, cell address: {address}")]
    InvalidHeader {
        /// 行番号（1始まり）
        row: u32,
        /// 列番号（1始まり）
        col: u32,
        /// セルの座標（A1記法）
        address: String,
    },

    /// 同じヘッダー名が複数の列に存在する
    #[error("Duplicate header name '{name}' at {duplicate} (first defined at {first})")]
    DuplicateHeader {
        /// 重複したヘッダー名
        name: String,
        /// 最初に定義されたセル（A1記法）
        first: String,
        /// 重複が検出されたセル（A1記法）
        duplicate: String,
    },

    /// データ列に対応するヘッダーが存在しない
    #[error("No header found for column: {col} on row: {row}, cell address: {address}")]
    MissingHeaderForColumn {
        /// 行番号（1始まり）
        row: u32,
        /// 列番号（1始まり）
        col: u32,
        /// セルの座標（A1記法）
        address: String,
    },

    /// テンプレートの構文エラー
    #[error("Failed to compile template: {}", describe_tera_error(.0))]
    TemplateCompile(#[source] tera::Error),

    /// レコードに対するレンダリングの失敗（未定義の変数など）
    #[error("Failed to render record {index}: {}", describe_tera_error(.source))]
    Render {
        /// レコードの位置（1始まり）
        index: usize,
        /// teraのエラー
        #[source]
        source: tera::Error,
    },

    /// 出力ファイルの書き込み失敗
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        /// 書き込み先のパス
        path: PathBuf,
        /// 元のI/Oエラー
        #[source]
        source: std::io::Error,
    },
}

impl PopulateError {
    /// 実行前の前提条件（入力ファイル、出力先、空テンプレート）に関するエラーかどうか
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            PopulateError::TemplateNotFound(_)
                | PopulateError::SpreadsheetNotFound(_)
                | PopulateError::OutputDirNotFound(_)
                | PopulateError::EmptyTemplate
        )
    }

    /// シートの構造が不正なことによるエラーかどうか
    pub fn is_malformed_sheet(&self) -> bool {
        matches!(
            self,
            PopulateError::EmptyWorksheet
                | PopulateError::InvalidHeader { .. }
                | PopulateError::DuplicateHeader { .. }
                | PopulateError::MissingHeaderForColumn { .. }
        )
    }
}

/// teraのエラーメッセージにsourceチェーンを連結する
fn describe_tera_error(error: &tera::Error) -> String {
    use std::error::Error as _;

    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
