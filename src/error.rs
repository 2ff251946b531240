//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。
//!
//! キャプション生成そのもの（`caption`モジュール）はエラーを返しません。
//! ここで定義するエラーは、ファイルの読み込み・エクスポート・設定検証など
//! 周辺レイヤーでのみ発生します。

use thiserror::Error;

/// listing-captionクレート全体で使用するエラー型
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー（ファイル読み込み失敗など）
/// - `Excel`: Excelファイルの解析中に発生したエラー（calamine由来）
/// - `Zip`: ZIPアーカイブの検査中に発生したエラー
/// - `Csv`: CSVの解析・書き込み中に発生したエラー（csv由来）
/// - `Xlsx`: XLSXエクスポート中に発生したエラー（rust_xlsxwriter由来）
/// - `Json`: JSONエクスポート中に発生したエラー（serde_json由来）
/// - `Config`: 設定の検証に失敗したエラー
/// - `SheetNotFound`: 指定されたシートが存在しない
/// - `EmptyInput`: 入力にヘッダー行が存在しない
/// - `SecurityViolation`: 入力サイズ・行数・アーカイブの上限違反
///
/// # 使用例
///
/// ```rust,no_run
/// use listing_caption::CaptionError;
/// use std::fs::File;
///
/// fn open_listing_file(path: &str) -> Result<(), CaptionError> {
///     let _file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum CaptionError {
    /// I/O操作中に発生したエラー
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Excelファイルの解析中に発生したエラー
    ///
    /// ファイル形式が不正、破損したファイルなどが原因となります。
    #[error("Failed to parse Excel file: {0}")]
    Excel(#[from] calamine::Error),

    /// ZIPアーカイブの読み込みエラー
    ///
    /// xlsx/odsなどのZIPコンテナが破損している場合に発生します。
    #[error("ZIP archive error: {0}")]
    Zip(String),

    /// CSVの解析・書き込み中に発生したエラー
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// XLSXエクスポート中に発生したエラー
    #[error("XLSX export error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// JSONエクスポート中に発生したエラー
    #[error("JSON export error: {0}")]
    Json(#[from] serde_json::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `CaptionerBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use listing_caption::{CaptionerBuilder, CaptionError};
    ///
    /// let result = CaptionerBuilder::new()
    ///     .with_separator("")  // 空の区切り文字は無効
    ///     .build();
    ///
    /// if let Err(CaptionError::Config(msg)) = result {
    ///     println!("設定エラー: {}", msg);
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// 指定されたシートが見つからない
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// 入力が空、またはヘッダー行が存在しない
    #[error("Input contains no header row")]
    EmptyInput,

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力ファイルサイズ・行数・アーカイブ展開サイズなどの上限を超えた場合、
    /// またはアーカイブ内に不正なパスが含まれる場合に発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}
