//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use serde::{Deserialize, Serialize};

use crate::columns;

/// セルの値を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 文字列
    Text(String),

    /// 数値（f64）
    Number(f64),

    /// 論理値
    Bool(bool),

    /// 空セル・欠損値
    Empty,
}

impl CellValue {
    /// 値が空かどうかを判定
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// 値を文字列として取得
    ///
    /// 整数値の数値は小数点なしで出力します（`2.0` → `"2"`）。
    /// 有限でない数値と空セルは空文字列になり、`NaN`のような
    /// プレースホルダーは決して出力しません。
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) if n.is_finite() => n.to_string(),
            CellValue::Number(_) => String::new(),
            CellValue::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            CellValue::Empty => String::new(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// 1件の物件レコード（列名 → 値の順序付きマップ）
///
/// 列の順序は入力ファイルのヘッダー順を保持します。
/// 存在しない列の参照は常に空文字列になります。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    fields: Vec<(String, CellValue)>,
}

impl Row {
    /// 空の行を生成
    pub fn new() -> Self {
        Self::default()
    }

    /// ヘッダーと値の列から行を生成
    ///
    /// 値がヘッダーより少ない場合は`Empty`で補い、多い場合は余りを捨てます。
    pub fn from_values(headers: &[String], values: Vec<CellValue>) -> Self {
        let mut values = values.into_iter();
        let fields = headers
            .iter()
            .map(|h| (h.clone(), values.next().unwrap_or(CellValue::Empty)))
            .collect();
        Self { fields }
    }

    /// (列名, 値)の組から行を生成
    ///
    /// ```rust
    /// use listing_caption::Row;
    ///
    /// let row = Row::from_pairs([("City1", "Pune"), ("BHK", "2")]);
    /// assert_eq!(row.text("City1"), "Pune");
    /// assert_eq!(row.text("Location"), "");
    /// ```
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<CellValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut row = Self::new();
        for (k, v) in pairs {
            row.insert(k, v);
        }
        row
    }

    /// 列を追加（同名の列が既にある場合は値を置き換える）
    pub fn insert<K: Into<String>, V: Into<CellValue>>(&mut self, name: K, value: V) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// 列の値を取得（同名の列が複数ある場合は最初のもの）
    pub fn get(&self, name: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// 列の値を文字列として取得（欠損時は空文字列）
    pub fn text(&self, name: &str) -> String {
        self.get(name).map(CellValue::as_text).unwrap_or_default()
    }

    /// 列名の一覧（ヘッダー順）
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// 列数
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// 列が1つもないか
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// すべての値が空か
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|(_, v)| v.is_empty())
    }
}

/// ローダーが返す表データ
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    /// ヘッダー行（列名）
    pub headers: Vec<String>,

    /// データ行（ファイル順）
    pub rows: Vec<Row>,
}

/// キャプション生成に使用する列の型付きビュー
///
/// `Row`の動的な列参照を、列ごとのフィールドに置き換えたものです。
/// 欠損した列はすべて空文字列になります。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Listing {
    #[serde(rename = "Property_Type")]
    pub property_type: String,

    #[serde(rename = "Commercial-Property-Type")]
    pub commercial_property_type: String,

    #[serde(rename = "Residential-Property")]
    pub residential_property: String,

    #[serde(rename = "Location")]
    pub location: String,

    #[serde(rename = "City1")]
    pub city: String,

    #[serde(rename = "BHK")]
    pub bhk: String,

    #[serde(rename = "Super-Built-up-Plot-Space")]
    pub plot_space: String,

    #[serde(rename = "Super-Built-up-Construction-Area")]
    pub construction_area: String,

    #[serde(rename = "Furniture-Details")]
    pub furniture_details: String,

    #[serde(rename = "Current-Status")]
    pub current_status: String,

    #[serde(rename = "JRM-Mobile-Number")]
    pub mobile_number: String,

    #[serde(rename = "Property-Link")]
    pub property_link: String,
}

impl Listing {
    /// 行から型付きビューを生成
    pub fn from_row(row: &Row) -> Self {
        Self {
            property_type: row.text(columns::PROPERTY_TYPE),
            commercial_property_type: row.text(columns::COMMERCIAL_PROPERTY_TYPE),
            residential_property: row.text(columns::RESIDENTIAL_PROPERTY),
            location: row.text(columns::LOCATION),
            city: row.text(columns::CITY),
            bhk: row.text(columns::BHK),
            plot_space: row.text(columns::PLOT_SPACE),
            construction_area: row.text(columns::CONSTRUCTION_AREA),
            furniture_details: row.text(columns::FURNITURE_DETAILS),
            current_status: row.text(columns::CURRENT_STATUS),
            mobile_number: row.text(columns::MOBILE_NUMBER),
            property_link: row.text(columns::PROPERTY_LINK),
        }
    }

    /// この物件のキャプションを生成
    pub fn caption(&self) -> String {
        crate::caption::render_listing(self)
    }
}

/// 1行分の生成結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Caption {
    /// データ行のインデックス（0始まり、ヘッダー行を除く）
    #[serde(rename = "row")]
    pub row_index: usize,

    /// キャプション本文（改行区切り）
    #[serde(rename = "caption")]
    pub text: String,
}

/// 1ファイル分の生成結果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CaptionBatch {
    /// キャプション（ファイル順）
    pub captions: Vec<Caption>,

    /// ヘッダーに存在しなかった想定列（警告用）
    pub missing_columns: Vec<String>,
}

impl CaptionBatch {
    /// キャプション数
    pub fn len(&self) -> usize {
        self.captions.len()
    }

    /// キャプションが1つもないか
    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }

    /// キャプション本文のイテレーター
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.captions.iter().map(|c| c.text.as_str())
    }
}
