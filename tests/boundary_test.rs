//! Boundary Tests for xlsxpopulate
//!
//! 空のシート、1行目・A列の欠落、長い値、大量の行など、境界条件を検証します。

use rust_xlsxwriter::*;
use std::io::Cursor;
use xlsxpopulate::{PopulateError, PopulatorBuilder};

// Helper module for generating boundary test fixtures
mod fixtures {
    use super::*;

    /// セルが1つもないシート
    pub fn generate_empty_sheet() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("EmptySheet")?;
        Ok(workbook.save_to_buffer()?)
    }

    /// 1行目が空で、A2から値が始まる表
    pub fn generate_blank_first_row() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        worksheet.write_string(1, 0, "Alice")?;
        worksheet.write_string(2, 0, "Bob")?;

        Ok(workbook.save_to_buffer()?)
    }

    /// A列が空で、B1からヘッダーが始まる表
    pub fn generate_blank_first_column() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        worksheet.write_string(0, 1, "Name")?;
        worksheet.write_string(1, 1, "Alice")?;

        Ok(workbook.save_to_buffer()?)
    }

    /// 途中に空行を挟み、右端の列が一部の行にしかない表
    pub fn generate_ragged_table() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        worksheet.write_string(0, 0, "Name")?;
        worksheet.write_string(0, 1, "City")?;
        worksheet.write_string(1, 0, "Alice")?;
        worksheet.write_string(3, 0, "Carol")?;
        worksheet.write_string(3, 1, "Nara")?;

        Ok(workbook.save_to_buffer()?)
    }

    /// 指定した長さの値を持つ表
    pub fn generate_long_value(length: usize) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        worksheet.write_string(0, 0, "Body")?;
        worksheet.write_string(1, 0, "x".repeat(length))?;

        Ok(workbook.save_to_buffer()?)
    }

    /// 指定した行数の表
    pub fn generate_many_rows(rows: u32) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        worksheet.write_string(0, 0, "Id")?;
        worksheet.write_string(0, 1, "Label")?;
        for r in 1..=rows {
            worksheet.write_number(r, 0, r as f64)?;
            worksheet.write_string(r, 1, format!("row {}", r))?;
        }

        Ok(workbook.save_to_buffer()?)
    }

    /// Unicodeのヘッダーと値、セル内改行を含む表
    pub fn generate_unicode() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        worksheet.write_string(0, 0, "名前")?;
        worksheet.write_string(0, 1, "メモ")?;
        worksheet.write_string(1, 0, "山田太郎")?;
        worksheet.write_string(1, 1, "1行目\n2行目")?;

        Ok(workbook.save_to_buffer()?)
    }

    /// 数値のヘッダーを持つ表
    pub fn generate_numeric_header() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        worksheet.write_string(0, 0, "Name")?;
        worksheet.write_string(0, 1, "Score")?;
        worksheet.write_number(0, 2, 2025.0)?;
        worksheet.write_string(1, 0, "a")?;

        Ok(workbook.save_to_buffer()?)
    }
}

/// セルが1つもないシートはEmptyWorksheetエラー
#[test]
fn test_empty_sheet() {
    let data = fixtures::generate_empty_sheet().unwrap();
    let populator = PopulatorBuilder::new().build().unwrap();

    let result = populator.populate("Hello {{ Name }}", Cursor::new(data));
    match result {
        Err(err @ PopulateError::EmptyWorksheet) => assert!(err.is_malformed_sheet()),
        other => panic!("Expected EmptyWorksheet, got {:?}", other),
    }
}

/// 空の入力は解析エラー
#[test]
fn test_empty_input() {
    let populator = PopulatorBuilder::new().build().unwrap();
    let result = populator.populate("x", Cursor::new(Vec::<u8>::new()));
    assert!(matches!(result, Err(PopulateError::Parse(_))));
}

/// 1行目が空のシートはデータ行をヘッダーとして扱わずにエラーになる
#[test]
fn test_blank_first_row_is_rejected() {
    let data = fixtures::generate_blank_first_row().unwrap();
    let populator = PopulatorBuilder::new().build().unwrap();

    match populator.populate("Hello {{ Alice }}", Cursor::new(data)) {
        Err(PopulateError::InvalidHeader { row, col, address }) => {
            assert_eq!((row, col), (1, 1));
            assert_eq!(address, "A1");
        }
        other => panic!("Expected InvalidHeader, got {:?}", other),
    }
}

/// A列が空のシートは読み飛ばさずにエラーになる
#[test]
fn test_blank_first_column_is_rejected() {
    let data = fixtures::generate_blank_first_column().unwrap();
    let populator = PopulatorBuilder::new().build().unwrap();

    match populator.populate("{{ Name }}", Cursor::new(data)) {
        Err(PopulateError::InvalidHeader { row, col, address }) => {
            assert_eq!((row, col), (1, 1));
            assert_eq!(address, "A1");
        }
        other => panic!("Expected InvalidHeader, got {:?}", other),
    }
}

/// 空行と欠けたセルは空文字列のレコードになる
#[test]
fn test_ragged_rows_fill_missing_cells() {
    let data = fixtures::generate_ragged_table().unwrap();
    let populator = PopulatorBuilder::new().build().unwrap();

    let outputs = populator
        .populate("{{ Name }}|{{ City }}", Cursor::new(data))
        .unwrap();

    let contents: Vec<_> = outputs.iter().map(|o| o.content.as_str()).collect();
    assert_eq!(contents, vec!["Alice|", "|", "Carol|Nara"]);
}

/// 数値のヘッダーは不正
#[test]
fn test_numeric_header_is_invalid() {
    let data = fixtures::generate_numeric_header().unwrap();
    let populator = PopulatorBuilder::new().build().unwrap();

    match populator.populate("{{ Name }}", Cursor::new(data)) {
        Err(PopulateError::InvalidHeader { row, col, .. }) => assert_eq!((row, col), (1, 3)),
        other => panic!("Expected InvalidHeader, got {:?}", other),
    }
}

/// Excelのセル上限（32,767文字）の値もそのまま渡る
#[test]
fn test_max_length_cell_value() {
    let data = fixtures::generate_long_value(32_767).unwrap();
    let populator = PopulatorBuilder::new().build().unwrap();

    let outputs = populator.populate("{{ Body }}", Cursor::new(data)).unwrap();
    assert_eq!(outputs[0].content.len(), 32_767);
}

/// 長い値を命名列に使ってもファイル名は生成される
#[test]
fn test_long_naming_value() {
    let data = fixtures::generate_long_value(200).unwrap();
    let populator = PopulatorBuilder::new()
        .with_naming_column("Body")
        .build()
        .unwrap();

    let outputs = populator.populate("-", Cursor::new(data)).unwrap();
    assert_eq!(outputs[0].file_name, format!("{}.txt", "x".repeat(200)));
}

/// 大量の行は行順に処理される
#[test]
fn test_many_rows_keep_order() {
    let data = fixtures::generate_many_rows(2_000).unwrap();
    let populator = PopulatorBuilder::new().build().unwrap();

    let outputs = populator
        .populate("{{ Id }}:{{ Label }}", Cursor::new(data))
        .unwrap();

    assert_eq!(outputs.len(), 2_000);
    assert_eq!(outputs[0].content, "1:row 1");
    assert_eq!(outputs[1_999].content, "2000:row 2000");
    assert_eq!(outputs[1_999].file_name, "output-2000.txt");
    assert!(outputs.iter().enumerate().all(|(i, o)| o.index == i + 1));
}

/// Unicodeのヘッダーはrecord変数から参照でき、セル内改行は保持される
#[test]
fn test_unicode_headers_and_cell_newlines() {
    let data = fixtures::generate_unicode().unwrap();
    let populator = PopulatorBuilder::new()
        .with_naming_column("名前")
        .collapse_newlines(true)
        .build()
        .unwrap();

    let outputs = populator
        .populate("{{ record[\"名前\"] }}:\n{{ record[\"メモ\"] }}", Cursor::new(data))
        .unwrap();

    assert_eq!(outputs[0].file_name, "山田太郎.txt");
    assert_eq!(outputs[0].content, "山田太郎:1行目\n2行目");
}

/// 改行だけのテンプレートは空ではない
#[test]
fn test_newline_only_template_is_not_empty() {
    let data = fixtures::generate_many_rows(1).unwrap();
    let populator = PopulatorBuilder::new().build().unwrap();

    let outputs = populator.populate("\n", Cursor::new(data)).unwrap();
    assert_eq!(outputs[0].content, "\n");
}

/// 空のテンプレートはシートより先に拒否される
#[test]
fn test_empty_template_rejected() {
    let populator = PopulatorBuilder::new().build().unwrap();
    let result = populator.populate("", Cursor::new(b"garbage".to_vec()));
    assert!(matches!(result, Err(PopulateError::EmptyTemplate)));
}
