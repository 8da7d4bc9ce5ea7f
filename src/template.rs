//! Template Module
//!
//! teraを使用したテンプレートのコンパイルとレンダリング。
//! テンプレートは実行ごとに1回だけコンパイルし、全レコードで再利用します。

use tera::{Context, Tera};

use crate::api::TemplateOptions;
use crate::error::PopulateError;
use crate::types::Record;

/// tera内部でのテンプレート名（拡張子なしなので自動エスケープの対象外）
const TEMPLATE_NAME: &str = "template";

/// レコード全体を参照するための変数名
///
/// `{{ record["First Name"] }}` のように、識別子にできないヘッダー名を参照できます。
pub const RECORD_VARIABLE: &str = "record";

/// コンパイル済みテンプレート
///
/// レンダリングは状態を持たないため、同じレコードに対しては常に同じ結果を返します。
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    tera: Tera,
}

impl CompiledTemplate {
    /// テンプレートをコンパイル
    ///
    /// # 引数
    ///
    /// * `text` - テンプレート本文
    /// * `options` - コンパイルオプション
    ///
    /// # 戻り値
    ///
    /// * `Ok(CompiledTemplate)` - コンパイルに成功した場合
    /// * `Err(PopulateError::EmptyTemplate)` - 本文が空の場合
    /// * `Err(PopulateError::TemplateCompile)` - 構文エラーの場合
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use xlsxpopulate::{CompiledTemplate, Record, TemplateOptions};
    ///
    /// # fn main() -> Result<(), xlsxpopulate::PopulateError> {
    /// let template = CompiledTemplate::compile("Hello {{Name}}", TemplateOptions::default())?;
    /// let record = Record::from_pairs([("Name", "World")]);
    /// assert_eq!(template.render(&record, 1)?, "Hello World");
    /// # Ok(())
    /// # }
    /// ```
    pub fn compile(text: &str, options: TemplateOptions) -> Result<Self, PopulateError> {
        if text.is_empty() {
            return Err(PopulateError::EmptyTemplate);
        }

        let source = if options.collapse_newlines {
            text.replace(['\r', '\n'], "")
        } else {
            text.to_string()
        };

        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_template(TEMPLATE_NAME, &source)
            .map_err(PopulateError::TemplateCompile)?;

        Ok(Self { tera })
    }

    /// レコードに対してテンプレートをレンダリング
    ///
    /// 各ヘッダー名はトップレベルの変数として、レコード全体は`record`として渡されます。
    /// `record`という名前のヘッダーがある場合はヘッダーの値が優先されます。
    ///
    /// # 引数
    ///
    /// * `record` - レンダリング対象のレコード
    /// * `index` - レコードの位置（1始まり、エラーメッセージ用）
    ///
    /// # 発生し得るエラー
    ///
    /// * `PopulateError::Render` - 未定義の変数を参照した場合など
    pub fn render(&self, record: &Record, index: usize) -> Result<String, PopulateError> {
        let mut context = Context::new();
        context.insert(RECORD_VARIABLE, record);
        for (key, value) in record.iter() {
            context.insert(key, value);
        }

        self.tera
            .render(TEMPLATE_NAME, &context)
            .map_err(|source| PopulateError::Render { index, source })
    }
}
