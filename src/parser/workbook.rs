//! Workbook Parser
//!
//! calamineを使用したワークブックの読み込み。
//! 先頭のワークシートのセル範囲だけを取り出します。

use std::io::{Cursor, Read, Seek};

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use tracing::debug;

use crate::error::PopulateError;
use crate::security::SecurityConfig;

/// ワークブックパーサー
///
/// calamineのラッパーとして、ワークブックレベルの操作を提供します。
/// 形式（xlsx, xlsm, xlsb, xls, ods）は内容から自動判別します。
pub(crate) struct WorkbookParser<RS: Read + Seek> {
    workbook: Sheets<RS>,
}

impl WorkbookParser<Cursor<Vec<u8>>> {
    /// ワークブックを開く
    ///
    /// 入力全体をメモリに読み込みます。
    ///
    /// # 引数
    ///
    /// * `reader` - スプレッドシートを読み込むためのリーダー
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - 読み込みに成功した場合
    /// * `Err(PopulateError::SecurityViolation)` - 入力サイズが上限を超えた場合
    /// * `Err(PopulateError::Parse)` - スプレッドシートとして解析できない場合
    pub fn open<R: Read>(reader: R) -> Result<Self, PopulateError> {
        let security_config = SecurityConfig::default();

        // 上限+1バイトまで読んで超過を検出する
        let mut buffer = Vec::new();
        let bytes_read = reader
            .take(security_config.max_input_file_size + 1)
            .read_to_end(&mut buffer)?;

        if bytes_read as u64 > security_config.max_input_file_size {
            return Err(PopulateError::SecurityViolation(format!(
                "Input file size exceeds maximum: {} bytes",
                security_config.max_input_file_size
            )));
        }

        debug!(bytes = bytes_read, "opening workbook");

        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;

        Ok(WorkbookParser { workbook })
    }
}

impl<RS: Read + Seek> WorkbookParser<RS> {
    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// 先頭のワークシートのセル範囲を取得
    ///
    /// # 戻り値
    ///
    /// * `Ok((String, Range<Data>))` - シート名とセル範囲
    /// * `Err(PopulateError::EmptyWorksheet)` - ワークシートが1つもない場合
    /// * `Err(PopulateError::Parse)` - シートの解析に失敗した場合
    pub fn first_sheet_range(&mut self) -> Result<(String, Range<Data>), PopulateError> {
        let name = self
            .sheet_names()
            .into_iter()
            .next()
            .ok_or(PopulateError::EmptyWorksheet)?;

        let range = self
            .workbook
            .worksheet_range_at(0)
            .ok_or(PopulateError::EmptyWorksheet)??;

        debug!(sheet = %name, size = ?range.get_size(), "read first worksheet");

        Ok((name, range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_invalid_input() {
        let result = WorkbookParser::open(Cursor::new(b"not a spreadsheet".to_vec()));
        assert!(matches!(result, Err(PopulateError::Parse(_))));
    }

    #[test]
    fn test_open_empty_input() {
        let result = WorkbookParser::open(Cursor::new(Vec::new()));
        assert!(result.is_err());
    }
}
