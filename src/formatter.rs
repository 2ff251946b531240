//! Formatter Module
//!
//! calamineのセル値を`CellValue`に変換するモジュール。
//! 日付セルはchronoで設定された形式の文字列に変換します。

use std::fmt::Write as _;

use calamine::{Data, ExcelDateTime};
use chrono::{Duration, NaiveDateTime};

use crate::api::DateFormat;
use crate::error::CaptionError;
use crate::types::CellValue;

/// Excelで表現できる最大のシリアル値（9999-12-31）
const MAX_SERIAL: f64 = 2_958_465.0;

/// セルフォーマッター
#[derive(Debug, Clone)]
pub(crate) struct CellFormatter {
    date_formatter: DateFormatter,
}

impl CellFormatter {
    pub fn new(date_format: DateFormat) -> Self {
        Self {
            date_formatter: DateFormatter { date_format },
        }
    }

    /// セル値を変換
    ///
    /// - `Int`/`Float` → `Number`
    /// - `String` → `Text`（空文字列は`Empty`）
    /// - `DateTime` → 日付文字列の`Text`（期間値は`[h]:mm:ss`）
    /// - 日付として表現できないシリアル値 → `Number`
    /// - ISO 8601文字列の日付・期間 → `Text`
    /// - エラー値（`#N/A`など）→ `Empty`
    pub fn format_cell(&self, cell: &Data) -> Result<CellValue, CaptionError> {
        let value = match cell {
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::String(s) => CellValue::from(s.as_str()),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) if dt.is_duration() => match dt.as_duration() {
                Some(duration) => CellValue::Text(render_duration(duration)),
                None => CellValue::Number(dt.as_f64()),
            },
            Data::DateTime(dt) => match self.date_formatter.format(dt)? {
                Some(text) => CellValue::Text(text),
                None => CellValue::Number(dt.as_f64()),
            },
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::from(s.as_str()),
            _ => CellValue::Empty,
        };
        Ok(value)
    }
}

/// 日付フォーマッター
///
/// 1900年・1904年どちらの日付システムも、calamineの`ExcelDateTime`が
/// 持つフラグに従って変換します。
#[derive(Debug, Clone)]
pub(crate) struct DateFormatter {
    date_format: DateFormat,
}

impl DateFormatter {
    /// 日付セルをフォーマット
    ///
    /// シリアル値が`0..=2958465`の範囲外（Excelでは`#####`と表示される値）の場合は
    /// `Ok(None)`を返し、呼び出し側で数値として扱います。
    pub fn format(&self, datetime: &ExcelDateTime) -> Result<Option<String>, CaptionError> {
        if !(0.0..=MAX_SERIAL).contains(&datetime.as_f64()) {
            return Ok(None);
        }

        match datetime.as_datetime() {
            Some(naive) => render_datetime(&naive, &self.date_format).map(Some),
            None => Ok(None),
        }
    }
}

/// 日付を指定形式で文字列化
///
/// 不正な書式指定子を含む場合は`Config`エラーを返します。
pub(crate) fn render_datetime(
    datetime: &NaiveDateTime,
    date_format: &DateFormat,
) -> Result<String, CaptionError> {
    let pattern = match date_format {
        DateFormat::Iso8601 => "%Y-%m-%d",
        DateFormat::Custom(pattern) => pattern.as_str(),
    };

    let mut out = String::new();
    write!(out, "{}", datetime.format(pattern)).map_err(|_| {
        CaptionError::Config(format!("Invalid date format string: '{}'", pattern))
    })?;
    Ok(out)
}

/// 期間を`[h]:mm:ss`形式で文字列化（24時間を超えても繰り上げない）
fn render_duration(duration: Duration) -> String {
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
