//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

use std::path::Path;

/// 入力ファイルの形式
///
/// 読み込むファイルの形式を指定します。`Auto`の場合は先頭バイトから判定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum InputFormat {
    /// 先頭バイト（マジックナンバー）から自動判定（デフォルト）
    ///
    /// - `PK\x03\x04`（ZIP: xlsx/xlsm/xlsb/ods）→ Excel
    /// - `D0 CF 11 E0`（OLE2: xls）→ Excel
    /// - それ以外 → CSV
    #[default]
    Auto,

    /// カンマ区切りテキスト（先頭行がヘッダー）
    Csv,

    /// Excel系ワークブック（calamineが対応する形式すべて）
    Excel,
}

impl InputFormat {
    /// ファイル拡張子から入力形式を推定
    ///
    /// 未知の拡張子の場合は`Auto`を返します。
    ///
    /// ```rust
    /// use listing_caption::InputFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(InputFormat::from_path(Path::new("listings.xlsx")), InputFormat::Excel);
    /// assert_eq!(InputFormat::from_path(Path::new("listings.CSV")), InputFormat::Csv);
    /// assert_eq!(InputFormat::from_path(Path::new("listings")), InputFormat::Auto);
    /// ```
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("csv") | Some("txt") => InputFormat::Csv,
            Some("xlsx") | Some("xlsm") | Some("xlsb") | Some("xls") | Some("ods") => {
                InputFormat::Excel
            }
            _ => InputFormat::Auto,
        }
    }
}

/// シート選択方式
///
/// Excel入力時に、キャプション対象の表を含むシートを1つ選択します。
/// CSV入力では無視されます。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum SheetSelector {
    /// 最初のシート（デフォルト）
    #[default]
    First,

    /// インデックス指定（0始まり）
    Index(usize),

    /// シート名指定
    Name(String),
}

/// 日付の出力形式
///
/// Excelの日付セルをテキストに変換する際の出力形式を指定します。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum DateFormat {
    /// ISO 8601形式（YYYY-MM-DD）
    #[default]
    Iso8601,

    /// カスタム形式（chrono互換フォーマット文字列）
    ///
    /// 例: `DateFormat::Custom("%d/%m/%Y".to_string())`
    Custom(String),
}

/// 出力フォーマット
///
/// 生成したキャプションをダウンロード用に書き出す形式を指定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum OutputFormat {
    /// プレーンテキスト（デフォルト）
    ///
    /// キャプションを区切り文字（デフォルトは空行）で連結します。
    #[default]
    Text,

    /// JSON形式
    ///
    /// ```json
    /// [
    ///   { "row": 0, "caption": "No brokerage offer 🥳🥳🥳\n..." }
    /// ]
    /// ```
    Json,

    /// CSV形式（`Row,Caption`の2列）
    Csv,

    /// XLSX形式（`Captions`シートに`Row`と`Caption`の2列）
    Xlsx,
}

impl OutputFormat {
    /// ファイル拡張子から出力形式を推定
    ///
    /// 未知の拡張子の場合は`None`を返します。
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" | "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "csv" => Some(OutputFormat::Csv),
            "xlsx" => Some(OutputFormat::Xlsx),
            _ => None,
        }
    }

    /// 形式名（`text`, `json`, `csv`, `xlsx`）から出力形式を取得
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "text" | "txt" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "csv" => Some(OutputFormat::Csv),
            "xlsx" => Some(OutputFormat::Xlsx),
            _ => None,
        }
    }
}
