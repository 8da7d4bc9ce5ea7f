//! Builder Module
//!
//! Fluent Builder APIを提供し、`Populator`インスタンスを段階的に構築する。

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use chrono::format::{Item, StrftimeItems};
use tracing::{debug, info};

use crate::api::{
    BoolStyle, CollisionPolicy, DateFormat, DuplicateHeaderPolicy, FormatContext, TemplateOptions,
};
use crate::error::PopulateError;
use crate::extractor::extract_records;
use crate::formatter::CellFormatter;
use crate::naming::{NameRegistry, OutputNamer};
use crate::parser::WorkbookParser;
use crate::security::validate_extension;
use crate::template::CompiledTemplate;
use crate::types::{OutputDescriptor, Record, RunSummary};

/// 出力ファイルのデフォルト拡張子
pub const DEFAULT_EXTENSION: &str = "txt";

/// 実行設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct PopulateConfig {
    /// ファイル名の語幹に使うヘッダー名
    pub naming_column: Option<String>,

    /// 出力ファイルの拡張子
    pub extension: String,

    /// セル値の書式コンテキスト
    pub format_context: FormatContext,

    /// テンプレートのコンパイルオプション
    pub template_options: TemplateOptions,

    /// ヘッダー重複時の扱い
    pub duplicate_headers: DuplicateHeaderPolicy,

    /// ファイル名衝突時の扱い
    pub collision_policy: CollisionPolicy,
}

impl Default for PopulateConfig {
    fn default() -> Self {
        Self {
            naming_column: None,
            extension: DEFAULT_EXTENSION.to_string(),
            format_context: FormatContext::default(),
            template_options: TemplateOptions::default(),
            duplicate_headers: DuplicateHeaderPolicy::default(),
            collision_policy: CollisionPolicy::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxpopulate::{CollisionPolicy, PopulatorBuilder};
///
/// # fn main() -> Result<(), xlsxpopulate::PopulateError> {
/// let populator = PopulatorBuilder::new()
///     .with_naming_column("Name")
///     .with_extension("md")
///     .with_collision_policy(CollisionPolicy::AppendIndex)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PopulatorBuilder {
    /// 内部設定（構築中）
    config: PopulateConfig,
}

impl Default for PopulatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PopulatorBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 命名列: なし（`output-<index>.txt`）
    /// - 拡張子: `txt`
    /// - 書式: 小数点`.`、日付ISO 8601、論理値`True`/`False`
    /// - 改行の除去: しない
    /// - ヘッダー重複: エラー
    /// - ファイル名衝突: 上書き
    pub fn new() -> Self {
        Self {
            config: PopulateConfig::default(),
        }
    }

    /// ファイル名の語幹に使うヘッダー名を指定する
    ///
    /// 空白のみの名前は未指定として扱います。
    pub fn with_naming_column(mut self, column: impl Into<String>) -> Self {
        let column = column.into();
        self.config.naming_column = if column.trim().is_empty() {
            None
        } else {
            Some(column)
        };
        self
    }

    /// 出力ファイルの拡張子を指定する（先頭の`.`は省略可）
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.config.extension = extension.into();
        self
    }

    /// 書式コンテキストをまとめて指定する
    pub fn with_format_context(mut self, context: FormatContext) -> Self {
        self.config.format_context = context;
        self
    }

    /// 小数点の記号を指定する
    pub fn with_decimal_separator(mut self, separator: char) -> Self {
        self.config.format_context.decimal_separator = separator;
        self
    }

    /// 時刻成分を持たない日付の形式を指定する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsxpopulate::{DateFormat, PopulatorBuilder};
    ///
    /// let builder = PopulatorBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%Y年%m月%d日".to_string()));
    /// ```
    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.config.format_context.date_format = format;
        self
    }

    /// 時刻成分を持つ日付の形式を指定する
    pub fn with_datetime_format(mut self, format: DateFormat) -> Self {
        self.config.format_context.datetime_format = format;
        self
    }

    /// 論理値の表記を指定する
    pub fn with_bool_style(mut self, style: BoolStyle) -> Self {
        self.config.format_context.bool_style = style;
        self
    }

    /// テンプレート本文の改行を除去するかを指定する
    pub fn collapse_newlines(mut self, collapse: bool) -> Self {
        self.config.template_options.collapse_newlines = collapse;
        self
    }

    /// ヘッダー重複時の扱いを指定する
    pub fn with_duplicate_headers(mut self, policy: DuplicateHeaderPolicy) -> Self {
        self.config.duplicate_headers = policy;
        self
    }

    /// ファイル名衝突時の扱いを指定する
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.config.collision_policy = policy;
        self
    }

    /// 設定を検証し、`Populator`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `PopulateError::Config(String)`: 設定の検証に失敗した場合
    ///   * 拡張子が空、またはパス区切りなどを含む
    ///   * カスタム日付形式が空、または不正な書式指定子を含む
    ///   * 小数点の記号が制御文字
    pub fn build(mut self) -> Result<Populator, PopulateError> {
        // 1. 拡張子の検証
        self.config.extension =
            validate_extension(&self.config.extension).map_err(PopulateError::Config)?;

        // 2. カスタム日付形式の検証
        let context = &self.config.format_context;
        for format in [&context.date_format, &context.datetime_format] {
            if let DateFormat::Custom(pattern) = format {
                validate_date_pattern(pattern)?;
            }
        }

        // 3. 小数点記号の検証
        if context.decimal_separator.is_control() {
            return Err(PopulateError::Config(format!(
                "Invalid decimal separator: {:?}",
                context.decimal_separator
            )));
        }

        Ok(Populator::new(self.config))
    }
}

fn validate_date_pattern(pattern: &str) -> Result<(), PopulateError> {
    if pattern.is_empty() || StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(PopulateError::Config(format!(
            "Invalid date format string: '{}'",
            pattern
        )));
    }
    Ok(())
}

/// ファイル出力を伴う実行の入力パス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    /// テンプレートファイル
    pub template: PathBuf,

    /// スプレッドシートファイル
    pub spreadsheet: PathBuf,

    /// 出力ディレクトリ（事前に存在している必要がある）
    pub output_dir: PathBuf,
}

/// テンプレート展開のファサード
///
/// スプレッドシートの各行をテンプレートに差し込み、行ごとに1つの出力を生成します。
///
/// # 使用例
///
/// ```rust,no_run
/// use std::fs::File;
/// use xlsxpopulate::PopulatorBuilder;
///
/// # fn main() -> Result<(), xlsxpopulate::PopulateError> {
/// let populator = PopulatorBuilder::new().with_naming_column("Name").build()?;
/// let outputs = populator.populate("Hello {{Name}}", File::open("values.xlsx")?)?;
/// for output in outputs {
///     println!("{}: {}", output.file_name, output.content);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Populator {
    /// 実行設定
    config: PopulateConfig,

    /// セルフォーマッター
    formatter: CellFormatter,

    /// ファイル名の決定規則
    namer: OutputNamer,
}

impl Populator {
    pub(crate) fn new(config: PopulateConfig) -> Self {
        Self {
            formatter: CellFormatter::new(),
            namer: OutputNamer::new(config.naming_column.clone(), config.extension.clone()),
            config,
        }
    }

    /// テンプレートをこの設定でコンパイルする
    pub fn compile(&self, template_text: &str) -> Result<CompiledTemplate, PopulateError> {
        CompiledTemplate::compile(template_text, self.config.template_options)
    }

    /// スプレッドシートの先頭シートからレコードを抽出する
    ///
    /// ワークブックはこの呼び出しの中で開かれ、戻る前に解放されます。
    pub fn extract<R: Read>(&self, input: R) -> Result<Vec<Record>, PopulateError> {
        let mut parser = WorkbookParser::open(input)?;
        let (sheet, range) = parser.first_sheet_range()?;
        drop(parser);

        debug!(sheet = %sheet, "extracting records");

        extract_records(
            &range,
            &self.formatter,
            &self.config.format_context,
            self.config.duplicate_headers,
        )
    }

    /// レコードの出力ファイル名（衝突の扱いは適用しない）
    pub fn file_name(&self, record: &Record, index: usize) -> String {
        self.namer.name(record, index)
    }

    /// メモリ上でテンプレートを展開する
    ///
    /// # 引数
    ///
    /// * `template_text` - テンプレート本文
    /// * `input` - スプレッドシートのリーダー
    ///
    /// # 戻り値
    ///
    /// 行順の`OutputDescriptor`。データ行がない場合は空のベクター。
    pub fn populate<R: Read>(
        &self,
        template_text: &str,
        input: R,
    ) -> Result<Vec<OutputDescriptor>, PopulateError> {
        let template = self.compile(template_text)?;
        let records = self.extract(input)?;
        self.render_all(&template, &records)
    }

    /// コンパイル済みテンプレートで全レコードを展開する
    pub fn render_all(
        &self,
        template: &CompiledTemplate,
        records: &[Record],
    ) -> Result<Vec<OutputDescriptor>, PopulateError> {
        let mut registry = NameRegistry::new(self.config.collision_policy);

        records
            .iter()
            .enumerate()
            .map(|(offset, record)| {
                let index = offset + 1;
                Ok(OutputDescriptor {
                    index,
                    file_name: self.namer.name_unique(record, index, &mut registry),
                    content: template.render(record, index)?,
                })
            })
            .collect()
    }

    /// ファイルを読み込み、レコードごとに出力ディレクトリへ書き込む
    ///
    /// # 処理フロー
    ///
    /// 1. 前提条件の検証（テンプレート、スプレッドシート、出力ディレクトリの存在）
    /// 2. テンプレートの読み込みとコンパイル（空の場合はエラー）
    /// 3. レコードの抽出（0件は正常終了）
    /// 4. 各レコードについて、ファイル名の決定・レンダリング・書き込み
    ///
    /// 書き込みに失敗した時点で処理を中断し、`PopulateError::Write`を返します。
    /// 既存のファイルは確認なしに上書きされます。
    pub fn run(&self, paths: &RunPaths) -> Result<RunSummary, PopulateError> {
        check_preconditions(paths)?;

        let template_text = fs::read_to_string(&paths.template)?;
        let template = self.compile(&template_text)?;

        let records = self.extract(fs::File::open(&paths.spreadsheet)?)?;
        info!(
            count = records.len(),
            "{} records found in {}",
            records.len(),
            paths.spreadsheet.display()
        );

        let mut summary = RunSummary {
            records_found: records.len(),
            ..RunSummary::default()
        };
        let mut registry = NameRegistry::new(self.config.collision_policy);

        for (offset, record) in records.iter().enumerate() {
            let index = offset + 1;
            let file_name = self.namer.name_unique(record, index, &mut registry);
            let content = template.render(record, index)?;
            let path = paths.output_dir.join(&file_name);

            info!(index, "Saving {}", path.display());
            fs::write(&path, content).map_err(|source| PopulateError::Write {
                path: path.clone(),
                source,
            })?;

            summary.files_written += 1;
            summary.written.push(path);
        }

        info!(
            files = summary.files_written,
            "Processing {} completed",
            paths.spreadsheet.display()
        );

        Ok(summary)
    }
}

/// 入力ファイルと出力ディレクトリの存在を確認する
fn check_preconditions(paths: &RunPaths) -> Result<(), PopulateError> {
    if !paths.template.is_file() {
        return Err(PopulateError::TemplateNotFound(paths.template.clone()));
    }
    if !paths.spreadsheet.is_file() {
        return Err(PopulateError::SpreadsheetNotFound(paths.spreadsheet.clone()));
    }
    if !paths.output_dir.is_dir() {
        return Err(PopulateError::OutputDirNotFound(paths.output_dir.clone()));
    }
    Ok(())
}
