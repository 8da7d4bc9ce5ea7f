//! Naming Module
//!
//! レコードごとの出力ファイル名を決定するモジュール。

use std::collections::HashSet;

use tracing::warn;

use crate::api::CollisionPolicy;
use crate::security::sanitize_file_stem;
use crate::types::Record;

/// 出力ファイル名の決定規則
///
/// 命名列が未設定、レコードにその列がない、または値が空白のみの場合は
/// `output-<index>.<ext>` を使用します。
#[derive(Debug, Clone)]
pub(crate) struct OutputNamer {
    /// ファイル名の語幹に使うヘッダー名
    naming_column: Option<String>,

    /// 正規化済みの拡張子（先頭の`.`なし）
    extension: String,
}

impl OutputNamer {
    pub fn new(naming_column: Option<String>, extension: String) -> Self {
        Self {
            naming_column,
            extension,
        }
    }

    /// ファイル名の語幹（拡張子なし）
    fn stem(&self, record: &Record, index: usize) -> String {
        self.naming_column
            .as_deref()
            .and_then(|column| record.get(column))
            .filter(|value| !value.trim().is_empty())
            .and_then(sanitize_file_stem)
            .unwrap_or_else(|| format!("output-{}", index))
    }

    /// レコードの出力ファイル名
    ///
    /// # 引数
    ///
    /// * `record` - 対象レコード
    /// * `index` - レコードの位置（1始まり）
    pub fn name(&self, record: &Record, index: usize) -> String {
        format!("{}.{}", self.stem(record, index), self.extension)
    }

    /// 衝突の扱いを適用した出力ファイル名
    pub fn name_unique(&self, record: &Record, index: usize, registry: &mut NameRegistry) -> String {
        let stem = self.stem(record, index);
        registry.claim(stem, index, &self.extension)
    }
}

/// 1回の実行内で使用済みのファイル名を記録する
#[derive(Debug)]
pub(crate) struct NameRegistry {
    policy: CollisionPolicy,

    /// 大文字小文字を区別しないファイルシステムを考慮し、小文字化して保持
    used: HashSet<String>,
}

impl NameRegistry {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self {
            policy,
            used: HashSet::new(),
        }
    }

    /// ファイル名を確定して記録する
    fn claim(&mut self, stem: String, index: usize, extension: &str) -> String {
        let file_name = format!("{}.{}", stem, extension);

        if self.used.insert(file_name.to_lowercase()) {
            return file_name;
        }

        match self.policy {
            CollisionPolicy::Overwrite => {
                warn!(file = %file_name, index, "output name already used, overwriting");
                file_name
            }
            CollisionPolicy::AppendIndex => {
                let mut candidate = format!("{}-{}.{}", stem, index, extension);
                let mut attempt = 2;
                while !self.used.insert(candidate.to_lowercase()) {
                    candidate = format!("{}-{}-{}.{}", stem, index, attempt, extension);
                    attempt += 1;
                }
                candidate
            }
        }
    }
}
