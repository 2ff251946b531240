//! Column Catalog
//!
//! 物件データの想定列名と、列の存在チェック（警告用）。

pub const PROPERTY_TYPE: &str = "Property_Type";
pub const COMMERCIAL_PROPERTY_TYPE: &str = "Commercial-Property-Type";
pub const RESIDENTIAL_PROPERTY: &str = "Residential-Property";
pub const LOCATION: &str = "Location";
pub const CITY: &str = "City1";
pub const BHK: &str = "BHK";
pub const PLOT_SPACE: &str = "Super-Built-up-Plot-Space";
pub const CONSTRUCTION_AREA: &str = "Super-Built-up-Construction-Area";
pub const FURNITURE_DETAILS: &str = "Furniture-Details";
pub const CURRENT_STATUS: &str = "Current-Status";
pub const MOBILE_NUMBER: &str = "JRM-Mobile-Number";
pub const PROPERTY_LINK: &str = "Property-Link";

/// キャプション生成で参照する列の一覧
///
/// 存在しなくても生成は失敗しません（該当箇所が空文字列になるだけ）。
pub const EXPECTED_COLUMNS: [&str; 12] = [
    PROPERTY_TYPE,
    COMMERCIAL_PROPERTY_TYPE,
    RESIDENTIAL_PROPERTY,
    LOCATION,
    CITY,
    BHK,
    PLOT_SPACE,
    CONSTRUCTION_AREA,
    FURNITURE_DETAILS,
    CURRENT_STATUS,
    MOBILE_NUMBER,
    PROPERTY_LINK,
];

/// ヘッダーに含まれていない想定列を返す
///
/// 戻り値は`EXPECTED_COLUMNS`の順序に従います。列名は完全一致で比較します。
///
/// ```rust
/// use listing_caption::columns::missing_columns;
///
/// let headers = ["Location", "City1"];
/// let missing = missing_columns(&headers);
/// assert!(missing.contains(&"BHK"));
/// assert!(!missing.contains(&"City1"));
/// ```
pub fn missing_columns<S: AsRef<str>>(headers: &[S]) -> Vec<&'static str> {
    EXPECTED_COLUMNS
        .iter()
        .copied()
        .filter(|expected| !headers.iter().any(|h| h.as_ref() == *expected))
        .collect()
}
