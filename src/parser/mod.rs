//! Parser Module
//!
//! calamineを使用したスプレッドシート解析。
//! ワークブックを開き、先頭シートのセル範囲を取り出します。

mod workbook;

pub(crate) use workbook::WorkbookParser;
