//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use std::path::PathBuf;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// セル座標（0始まり、シート上の絶対位置）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    /// 新しい座標を生成
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// A1形式の文字列に変換（例: (0, 0) -> "A1"）
    #[allow(clippy::wrong_self_convention)]
    pub fn to_a1_notation(&self) -> String {
        let col_str = Self::col_index_to_letter(self.col);
        format!("{}{}", col_str, self.row + 1)
    }

    /// 列インデックスを文字列に変換（0 -> "A", 25 -> "Z", 26 -> "AA"）
    fn col_index_to_letter(mut col: u32) -> String {
        let mut result = String::new();
        loop {
            let remainder = col % 26;
            result.insert(0, (b'A' + remainder as u8) as char);
            if col < 26 {
                break;
            }
            col = col / 26 - 1;
        }
        result
    }
}

/// 1行分のデータ（ヘッダー名 → 文字列値）
///
/// キーはヘッダーの列順に並びます。同じデータセット内のすべてのレコードは
/// 同じキー集合を同じ順序で持ちます。
///
/// # 使用例
///
/// ```rust
/// use xlsxpopulate::Record;
///
/// let record = Record::from_pairs([("Name", "World"), ("City", "Tokyo")]);
/// assert_eq!(record.get("Name"), Some("World"));
/// assert_eq!(record.keys().collect::<Vec<_>>(), vec!["Name", "City"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// キーと値のペアからレコードを生成する
    ///
    /// 同じキーが複数回現れた場合は後の値で上書きされます。
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut record = Self::default();
        for (key, value) in pairs {
            record.insert(key.into(), value.into());
        }
        record
    }

    /// 値を設定する（既存キーは位置を保ったまま上書き）
    pub(crate) fn insert(&mut self, key: String, value: String) {
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((key, value)),
        }
    }

    /// ヘッダー名に対応する値を取得
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// ヘッダー名を列順に返す
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// (ヘッダー名, 値) を列順に返す
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// 1レコード分の出力（ファイル名とレンダリング結果）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDescriptor {
    /// レコードの位置（1始まり）
    pub index: usize,

    /// 出力ファイル名（ディレクトリを含まない）
    pub file_name: String,

    /// レンダリングされた内容
    pub content: String,
}

/// ファイル出力を伴う実行の結果
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
pub struct RunSummary {
    /// スプレッドシートから読み込んだレコード数
    pub records_found: usize,

    /// 書き込んだファイル数（上書きを含む）
    pub files_written: usize,

    /// 書き込んだファイルのパス（書き込み順）
    pub written: Vec<PathBuf>,
}
