//! Extractor Module
//!
//! セル範囲をヘッダー付きのレコード列に変換するモジュール。
//!
//! シートの1行目をヘッダー行として、A列から使用範囲の右端までの列 → ヘッダー名の対応を作り、
//! 2行目から使用範囲の最終行までの各行を同じ列順で`Record`に変換します。
//! 使用範囲がA1から始まらない場合、範囲外のセルは未記入として扱います。

use std::collections::{BTreeMap, HashMap};

use calamine::{Data, Range};
use tracing::debug;

use crate::api::{DuplicateHeaderPolicy, FormatContext};
use crate::error::PopulateError;
use crate::formatter::CellFormatter;
use crate::types::{CellCoord, Record};

/// ヘッダー行から作られた列 → ヘッダー名の対応
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HeaderSet {
    /// 列インデックス（0始まり） → ヘッダー名
    bindings: BTreeMap<u32, String>,

    /// 重複を除いたヘッダー名の数
    unique: usize,
}

impl HeaderSet {
    /// シートの1行目（A1から使用範囲の右端まで）からヘッダーを読み取る
    ///
    /// 左から順に走査し、最初に見つかった不正なヘッダーでエラーを返します。
    /// 使用範囲外のセルは未記入として扱うため、1行目やA列が空のシートはエラーになります。
    ///
    /// # 発生し得るエラー
    ///
    /// * `PopulateError::EmptyWorksheet` - 範囲が空、または列が0
    /// * `PopulateError::InvalidHeader` - 空・空白のみ・文字列以外のヘッダーセル
    /// * `PopulateError::DuplicateHeader` - `DuplicateHeaderPolicy::Reject`で重複を検出した場合
    pub fn from_range(
        range: &Range<Data>,
        policy: DuplicateHeaderPolicy,
    ) -> Result<Self, PopulateError> {
        let (_, end_col) = match range.end() {
            Some(end) if !range.is_empty() => end,
            _ => return Err(PopulateError::EmptyWorksheet),
        };

        let mut bindings = BTreeMap::new();
        let mut first_seen: HashMap<&str, CellCoord> = HashMap::new();

        for col in 0..=end_col {
            let coord = CellCoord::new(0, col);

            let name = match range.get_value((coord.row, coord.col)) {
                Some(Data::String(s)) if !s.trim().is_empty() => s.as_str(),
                _ => {
                    return Err(PopulateError::InvalidHeader {
                        row: coord.row + 1,
                        col: coord.col + 1,
                        address: coord.to_a1_notation(),
                    })
                }
            };

            if let Some(first) = first_seen.get(name) {
                match policy {
                    DuplicateHeaderPolicy::Reject => {
                        return Err(PopulateError::DuplicateHeader {
                            name: name.to_string(),
                            first: first.to_a1_notation(),
                            duplicate: coord.to_a1_notation(),
                        });
                    }
                    DuplicateHeaderPolicy::LastWins => {
                        debug!(header = name, cell = %coord.to_a1_notation(), "duplicate header, later column wins");
                    }
                }
            } else {
                first_seen.insert(name, coord);
            }

            bindings.insert(coord.col, name.to_string());
        }

        if bindings.is_empty() {
            return Err(PopulateError::EmptyWorksheet);
        }

        Ok(Self {
            unique: first_seen.len(),
            bindings,
        })
    }

    /// 列インデックス（0始まり）に対応するヘッダー名
    pub fn get(&self, col: u32) -> Option<&str> {
        self.bindings.get(&col).map(String::as_str)
    }

    /// 重複を除いたヘッダー名の数（= 各レコードのキー数）
    pub fn unique_len(&self) -> usize {
        self.unique
    }
}

/// セル範囲からレコード列を抽出
///
/// # 引数
///
/// * `range` - 先頭シートのセル範囲（シート上の絶対座標）
/// * `formatter` - セル値を文字列に変換するフォーマッター
/// * `context` - 書式コンテキスト
/// * `policy` - ヘッダー重複時の扱い
///
/// # 戻り値
///
/// 行順のレコード列。ヘッダー行のみの場合は空のベクター。
pub(crate) fn extract_records(
    range: &Range<Data>,
    formatter: &CellFormatter,
    context: &FormatContext,
    policy: DuplicateHeaderPolicy,
) -> Result<Vec<Record>, PopulateError> {
    let headers = HeaderSet::from_range(range, policy)?;

    // from_rangeで空範囲は除外済み
    let (end_row, end_col) = range.end().ok_or(PopulateError::EmptyWorksheet)?;

    let mut records = Vec::with_capacity(end_row as usize);

    for row in 1..=end_row {
        let mut record = Record::with_capacity(headers.unique_len());

        for col in 0..=end_col {
            let coord = CellCoord::new(row, col);

            let header = headers
                .get(coord.col)
                .ok_or_else(|| PopulateError::MissingHeaderForColumn {
                    row: coord.row + 1,
                    col: coord.col + 1,
                    address: coord.to_a1_notation(),
                })?;

            let value = formatter.format_cell(range.get_value((coord.row, coord.col)), context);
            record.insert(header.to_string(), value);
        }

        records.push(record);
    }

    debug!(
        headers = headers.unique_len(),
        records = records.len(),
        "extracted records"
    );

    Ok(records)
}
