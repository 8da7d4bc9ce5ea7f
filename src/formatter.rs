//! Formatter Module
//!
//! セル値を文字列に変換する処理を提供するモジュール。
//! 変換規則は`FormatContext`で明示的に与えられ、プロセスのロケールには依存しません。

use std::fmt::Write as _;

use calamine::Data;
use chrono::{Duration, NaiveDateTime, Timelike};

use crate::api::FormatContext;

/// セルフォーマッター
///
/// セル値のフォーマット処理のファサードとして機能します。
#[derive(Debug)]
pub(crate) struct CellFormatter {
    /// 日付フォーマッター
    date_formatter: DateFormatter,

    /// 数値フォーマッター
    number_formatter: NumberFormatter,
}

impl CellFormatter {
    /// 新しいCellFormatterインスタンスを生成
    pub fn new() -> Self {
        Self {
            date_formatter: DateFormatter,
            number_formatter: NumberFormatter,
        }
    }

    /// セル値を文字列に変換
    ///
    /// # 引数
    ///
    /// * `cell` - calamineのセルデータ（`None`は範囲内の未記入セル）
    /// * `context` - 書式コンテキスト
    ///
    /// # 戻り値
    ///
    /// 変換後の文字列。空セルは空文字列になります。
    pub fn format_cell(&self, cell: Option<&Data>, context: &FormatContext) -> String {
        let Some(cell) = cell else {
            return String::new();
        };

        match cell {
            Data::String(s) => s.clone(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) => self.number_formatter.format(*f, context),
            Data::Bool(b) => context.bool_style.render(*b).to_string(),
            Data::DateTime(dt) => {
                if dt.is_duration() {
                    match dt.as_duration() {
                        Some(duration) => self.date_formatter.format_duration(duration),
                        None => self.number_formatter.format(dt.as_f64(), context),
                    }
                } else {
                    match dt.as_datetime() {
                        Some(datetime) => self.date_formatter.format(datetime, context),
                        // chronoで表現できないシリアル値は数値のまま出力
                        None => self.number_formatter.format(dt.as_f64(), context),
                    }
                }
            }
            Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
            Data::Error(e) => e.to_string(),
            Data::Empty => String::new(),
        }
    }
}

impl Default for CellFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// 日付フォーマッター
#[derive(Debug)]
pub(crate) struct DateFormatter;

impl DateFormatter {
    /// 日付をフォーマット
    ///
    /// 時刻成分が0時ちょうどの場合は`date_format`、それ以外は`datetime_format`を使用します。
    /// フォーマット文字列は`PopulatorBuilder::build()`で検証済みですが、
    /// 書き込みに失敗した場合はISO 8601にフォールバックします。
    pub fn format(&self, datetime: NaiveDateTime, context: &FormatContext) -> String {
        let has_time = datetime.num_seconds_from_midnight() != 0 || datetime.nanosecond() != 0;
        let pattern = if has_time {
            context.datetime_format.pattern(true)
        } else {
            context.date_format.pattern(false)
        };

        let mut formatted = String::new();
        if write!(formatted, "{}", datetime.format(pattern)).is_err() {
            let fallback = if has_time { "%Y-%m-%d %H:%M:%S" } else { "%Y-%m-%d" };
            formatted = datetime.format(fallback).to_string();
        }
        formatted
    }

    /// 経過時間を `[h]:mm:ss` 形式でフォーマット
    pub fn format_duration(&self, duration: Duration) -> String {
        let total = duration.num_seconds();
        let sign = if total < 0 { "-" } else { "" };
        let total = total.unsigned_abs();
        format!(
            "{}{}:{:02}:{:02}",
            sign,
            total / 3600,
            (total % 3600) / 60,
            total % 60
        )
    }
}

/// 数値フォーマッター
#[derive(Debug)]
pub(crate) struct NumberFormatter;

impl NumberFormatter {
    /// 数値をフォーマット
    ///
    /// 最短の往復可能表現を使用し、整数値は小数部なしで出力します（`3.0` -> `3`）。
    /// 小数点は`context.decimal_separator`に置き換えます。
    pub fn format(&self, value: f64, context: &FormatContext) -> String {
        // -0.0 は "0" として扱う
        let value = if value == 0.0 { 0.0 } else { value };
        let formatted = value.to_string();

        if context.decimal_separator == '.' {
            formatted
        } else {
            formatted.replace('.', &context.decimal_separator.to_string())
        }
    }
}
