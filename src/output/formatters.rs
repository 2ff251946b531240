//! Output Formatters Implementation
//!
//! 各出力フォーマットの実装を提供するモジュール。

use crate::error::CaptionError;
use crate::types::CaptionBatch;
use rust_xlsxwriter::{Format, Workbook};
use std::io::Write;

/// XLSX出力のシート名
pub const XLSX_SHEET_NAME: &str = "Captions";

/// Excelの1セルあたりの最大文字数
pub const XLSX_MAX_CELL_CHARS: usize = 32_767;

/// テキスト形式のフォーマッター
///
/// キャプションを区切り文字で連結し、最後に改行を1つ付けます。
pub struct TextFormatter<'a> {
    pub separator: &'a str,
}

impl TextFormatter<'_> {
    pub fn render<W: Write>(&self, batch: &CaptionBatch, writer: &mut W) -> Result<(), CaptionError> {
        if batch.is_empty() {
            return Ok(());
        }

        for (idx, text) in batch.texts().enumerate() {
            if idx > 0 {
                write!(writer, "{}", self.separator)?;
            }
            write!(writer, "{}", text)?;
        }
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// JSON形式のフォーマッター
///
/// `[{"row": 0, "caption": "..."}, ...]`の配列を出力します。
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn render<W: Write>(&self, batch: &CaptionBatch, writer: &mut W) -> Result<(), CaptionError> {
        serde_json::to_writer_pretty(&mut *writer, &batch.captions)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// CSV形式のフォーマッター（`Row,Caption`）
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn render<W: Write>(&self, batch: &CaptionBatch, writer: &mut W) -> Result<(), CaptionError> {
        let mut csv_writer = csv::Writer::from_writer(&mut *writer);
        csv_writer.write_record(["Row", "Caption"])?;
        for caption in &batch.captions {
            csv_writer.write_record([caption.row_index.to_string().as_str(), caption.text.as_str()])?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// XLSX形式のフォーマッター
///
/// `Captions`シートの1行目をヘッダー（`Row`, `Caption`）とし、
/// 以降に1キャプション1行で出力します。
/// Excelのセル上限（32,767文字）を超えるキャプションは切り詰めます。
pub struct XlsxFormatter;

impl XlsxFormatter {
    pub fn render<W: Write>(&self, batch: &CaptionBatch, writer: &mut W) -> Result<(), CaptionError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(XLSX_SHEET_NAME)?;

        let header = Format::new().set_bold();
        let wrap = Format::new().set_text_wrap();

        worksheet.write_string_with_format(0, 0, "Row", &header)?;
        worksheet.write_string_with_format(0, 1, "Caption", &header)?;
        worksheet.set_column_width(1, 80)?;

        for (i, caption) in batch.captions.iter().enumerate() {
            let r = (i + 1) as u32;
            worksheet.write_number(r, 0, caption.row_index as f64)?;
            let text = truncate_cell(&caption.text);
            if text.len() < caption.text.len() {
                tracing::warn!(
                    row = caption.row_index,
                    chars = caption.text.chars().count(),
                    "caption exceeds the XLSX cell limit and was truncated"
                );
            }
            worksheet.write_string_with_format(r, 1, text, &wrap)?;
        }

        let buffer = workbook.save_to_buffer()?;
        writer.write_all(&buffer)?;
        writer.flush()?;
        Ok(())
    }
}

/// セル上限の文字数で切り詰める（文字境界を保つ）
fn truncate_cell(text: &str) -> &str {
    match text.char_indices().nth(XLSX_MAX_CELL_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
