//! Output Format Module
//!
//! Strategy Patternによる出力フォーマット（ダウンロード用ファイル）の抽象化を提供するモジュール。

mod formatters;

use crate::api::OutputFormat;
use crate::error::CaptionError;
use crate::types::CaptionBatch;
use std::io::Write;

pub use formatters::*;

/// 出力フォーマッター（Strategy Pattern）
///
/// 各出力フォーマット（Text, JSON, CSV, XLSX）をenumとして表現します。
#[derive(Debug, Clone)]
pub(crate) enum OutputFormatter {
    Text { separator: String },
    Json,
    Csv,
    Xlsx,
}

impl OutputFormatter {
    /// 出力フォーマットからフォーマッターを生成
    pub fn from_format(format: OutputFormat, separator: &str) -> Self {
        match format {
            OutputFormat::Text => OutputFormatter::Text {
                separator: separator.to_string(),
            },
            OutputFormat::Json => OutputFormatter::Json,
            OutputFormat::Csv => OutputFormatter::Csv,
            OutputFormat::Xlsx => OutputFormatter::Xlsx,
        }
    }

    /// キャプションを指定されたフォーマットで出力する
    ///
    /// # 引数
    ///
    /// * `batch` - 出力するキャプション
    /// * `writer` - 出力先のライター
    pub fn render<W: Write>(&self, batch: &CaptionBatch, writer: &mut W) -> Result<(), CaptionError> {
        match self {
            OutputFormatter::Text { separator } => TextFormatter { separator }.render(batch, writer),
            OutputFormatter::Json => JsonFormatter.render(batch, writer),
            OutputFormatter::Csv => CsvFormatter.render(batch, writer),
            OutputFormatter::Xlsx => XlsxFormatter.render(batch, writer),
        }
    }
}
