//! Delimited Text Parser
//!
//! csvクレートを使用して、先頭行をヘッダーとするカンマ区切りテキストを読み込みます。

use csv::{ByteRecord, ReaderBuilder};

use crate::error::CaptionError;
use crate::security::SecurityConfig;
use crate::types::{CellValue, Row, Table};

const UTF8_BOM: char = '\u{feff}';

/// CSVパーサー
#[derive(Debug, Clone)]
pub(crate) struct CsvParser {
    /// 区切り文字（デフォルト: カンマ）
    delimiter: u8,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// 区切り文字を指定
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// バイト列から表を読み込む
    ///
    /// - 列数が行ごとに異なっていても許容する（不足分は`Empty`）
    /// - 不正なUTF-8は置換文字に変換する
    /// - 空文字列のセルは`Empty`として扱う
    pub fn parse(&self, data: &[u8], security: &SecurityConfig) -> Result<Table, CaptionError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(data);

        let headers: Vec<String> = reader
            .byte_headers()?
            .iter()
            .map(|h| {
                String::from_utf8_lossy(h)
                    .trim_start_matches(UTF8_BOM)
                    .trim()
                    .to_string()
            })
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(CaptionError::EmptyInput);
        }

        let mut rows = Vec::new();
        let mut record = ByteRecord::new();
        while reader.read_byte_record(&mut record)? {
            let values = record
                .iter()
                .map(|field| CellValue::from(&*String::from_utf8_lossy(field)))
                .collect();

            let row = Row::from_values(&headers, values);
            if row.is_blank() {
                continue;
            }

            rows.push(row);
            security.check_row_count(rows.len())?;
        }

        tracing::debug!(columns = headers.len(), rows = rows.len(), "parsed csv");

        Ok(Table { headers, rows })
    }
}
