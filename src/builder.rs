//! Builder Module
//!
//! Fluent Builder APIを提供し、`Captioner`インスタンスを段階的に構築する。

use crate::api::{DateFormat, InputFormat, OutputFormat, SheetSelector};
use crate::caption::generate_caption;
use crate::columns::missing_columns;
use crate::error::CaptionError;
use crate::security::SecurityConfig;
use crate::types::{Caption, CaptionBatch, Row, Table};
use chrono::NaiveDate;
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// デフォルトのキャプション区切り（空行）
pub const DEFAULT_SEPARATOR: &str = "\n\n";

/// キャプション生成処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct CaptionConfig {
    /// 入力形式
    pub input_format: InputFormat,

    /// シート選択方式（Excel入力のみ）
    pub sheet_selector: SheetSelector,

    /// 日付形式（Excelの日付セル）
    pub date_format: DateFormat,

    /// CSVの区切り文字
    pub csv_delimiter: u8,

    /// 出力フォーマット
    pub output_format: OutputFormat,

    /// テキスト出力時のキャプション区切り
    pub separator: String,

    /// 行を並列に処理するか
    pub parallel: bool,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            input_format: InputFormat::Auto,
            sheet_selector: SheetSelector::First,
            date_format: DateFormat::Iso8601,
            csv_delimiter: b',',
            output_format: OutputFormat::Text,
            separator: DEFAULT_SEPARATOR.to_string(),
            parallel: true,
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use listing_caption::{CaptionerBuilder, OutputFormat, SheetSelector};
///
/// # fn main() -> Result<(), listing_caption::CaptionError> {
/// let captioner = CaptionerBuilder::new()
///     .with_sheet_selector(SheetSelector::Name("Listings".to_string()))
///     .with_output_format(OutputFormat::Json)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct CaptionerBuilder {
    config: CaptionConfig,
}

impl CaptionerBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 入力形式: 自動判定
    /// - シート選択: 最初のシート
    /// - 日付形式: ISO 8601 (YYYY-MM-DD)
    /// - CSV区切り文字: カンマ
    /// - 出力形式: テキスト（空行区切り）
    /// - 並列処理: 有効
    pub fn new() -> Self {
        Self::default()
    }

    /// 入力形式を指定する
    pub fn with_input_format(mut self, format: InputFormat) -> Self {
        self.config.input_format = format;
        self
    }

    /// Excel入力時に読み込むシートを選択する
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// Excelの日付セルの出力形式を指定する
    ///
    /// ```rust,no_run
    /// use listing_caption::{CaptionerBuilder, DateFormat};
    ///
    /// let builder = CaptionerBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%d/%m/%Y".to_string()));
    /// ```
    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.config.date_format = format;
        self
    }

    /// CSVの区切り文字を指定する（デフォルト: `,`）
    pub fn with_csv_delimiter(mut self, delimiter: u8) -> Self {
        self.config.csv_delimiter = delimiter;
        self
    }

    /// 出力フォーマットを指定する
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    /// テキスト出力時のキャプション区切りを指定する（デフォルト: 空行）
    pub fn with_separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.config.separator = separator.into();
        self
    }

    /// 行を並列に処理するかを指定する
    ///
    /// どちらの場合も出力はファイルの行順になります。
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// 設定を検証し、`Captioner`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `CaptionError::Config(String)`: 設定の検証に失敗した場合
    ///   * カスタム日付形式が空、または不正な書式文字列
    ///   * 区切り文字が空
    ///   * CSV区切り文字が改行・ダブルクォート
    pub fn build(self) -> Result<Captioner, CaptionError> {
        // 1. カスタム日付形式の検証
        if let DateFormat::Custom(ref format_str) = self.config.date_format {
            let test_date = NaiveDate::from_ymd_opt(2025, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .ok_or_else(|| CaptionError::Config("Failed to create test date".to_string()))?;
            let formatted =
                crate::formatter::render_datetime(&test_date, &self.config.date_format)?;
            if formatted.is_empty() {
                return Err(CaptionError::Config(format!(
                    "Invalid date format string: '{}'",
                    format_str
                )));
            }
        }

        // 2. 区切り文字の検証
        if self.config.separator.is_empty() {
            return Err(CaptionError::Config(
                "Caption separator must not be empty".to_string(),
            ));
        }

        if matches!(self.config.csv_delimiter, b'\n' | b'\r' | b'"') {
            return Err(CaptionError::Config(format!(
                "Invalid CSV delimiter: {:?}",
                self.config.csv_delimiter as char
            )));
        }

        Ok(Captioner::new(self.config))
    }
}

/// キャプション生成処理のファサード
///
/// 表の読み込み、キャプション生成、ダウンロード用ファイルへの書き出しを行います。
///
/// # 使用例
///
/// ```rust,no_run
/// use listing_caption::CaptionerBuilder;
/// use std::fs::File;
///
/// # fn main() -> Result<(), listing_caption::CaptionError> {
/// let captioner = CaptionerBuilder::new().build()?;
/// let input = File::open("listings.xlsx")?;
/// let output = File::create("captions.txt")?;
/// captioner.convert(input, output)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Captioner {
    config: CaptionConfig,
    security: SecurityConfig,
}

impl Captioner {
    pub(crate) fn new(config: CaptionConfig) -> Self {
        Self {
            config,
            security: SecurityConfig::default(),
        }
    }

    /// 入力を表として読み込む
    ///
    /// 入力全体をメモリに読み込んでから形式を判定します。
    pub fn load<R: Read>(&self, input: R) -> Result<Table, CaptionError> {
        let data = self.security.read_limited(input)?;
        crate::parser::parse_table(data, &self.config, &self.security)
    }

    /// 表の全行のキャプションを生成する
    ///
    /// 想定列がヘッダーに無い場合は警告を記録しますが、生成は続行します。
    pub fn caption_table(&self, table: &Table) -> CaptionBatch {
        let missing: Vec<String> = missing_columns(&table.headers)
            .into_iter()
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            tracing::warn!(
                missing = %missing.join(", "),
                "expected columns are missing; their caption segments will be empty"
            );
        }

        let captions = self.caption_rows(&table.rows);
        tracing::info!(captions = captions.len(), "captions generated");

        CaptionBatch {
            captions,
            missing_columns: missing,
        }
    }

    fn caption_rows(&self, rows: &[Row]) -> Vec<Caption> {
        let make = |(row_index, row): (usize, &Row)| Caption {
            row_index,
            text: generate_caption(row),
        };

        if self.config.parallel {
            rows.par_iter().enumerate().map(make).collect()
        } else {
            rows.iter().enumerate().map(make).collect()
        }
    }

    /// 入力を読み込み、キャプションを生成する
    pub fn generate<R: Read>(&self, input: R) -> Result<CaptionBatch, CaptionError> {
        let table = self.load(input)?;
        Ok(self.caption_table(&table))
    }

    /// ファイルパスから読み込み、キャプションを生成する
    ///
    /// 入力形式が`Auto`の場合は、まず拡張子から形式を推定します。
    pub fn generate_from_path<P: AsRef<Path>>(&self, path: P) -> Result<CaptionBatch, CaptionError> {
        let path = path.as_ref();
        let file = File::open(path)?;

        if self.config.input_format == InputFormat::Auto {
            let hinted = InputFormat::from_path(path);
            if hinted != InputFormat::Auto {
                let mut config = self.config.clone();
                config.input_format = hinted;
                let captioner = Captioner {
                    config,
                    security: self.security.clone(),
                };
                return captioner.generate(file);
            }
        }

        self.generate(file)
    }

    /// キャプションを設定された出力形式で書き出す
    pub fn export<W: Write>(&self, batch: &CaptionBatch, output: W) -> Result<(), CaptionError> {
        let formatter = crate::output::OutputFormatter::from_format(
            self.config.output_format,
            &self.config.separator,
        );
        let mut writer = BufWriter::new(output);
        formatter.render(batch, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// 入力を読み込み、キャプションを生成して書き出す
    ///
    /// 読み込みや生成に失敗した場合、出力には何も書き込みません。
    pub fn convert<R: Read, W: Write>(&self, input: R, output: W) -> Result<(), CaptionError> {
        let batch = self.generate(input)?;
        self.export(&batch, output)
    }

    /// 入力を読み込み、出力形式で文字列に変換する
    ///
    /// XLSX形式はバイナリのため、この関数では`Config`エラーになります。
    pub fn convert_to_string<R: Read>(&self, input: R) -> Result<String, CaptionError> {
        if self.config.output_format == OutputFormat::Xlsx {
            return Err(CaptionError::Config(
                "XLSX output cannot be represented as a string".to_string(),
            ));
        }

        let mut buffer = Vec::new();
        self.convert(input, &mut buffer)?;

        let result = String::from_utf8(buffer).map_err(|e| {
            CaptionError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        Ok(result)
    }

    /// 出力形式
    pub fn output_format(&self) -> OutputFormat {
        self.config.output_format
    }
}
