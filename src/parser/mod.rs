//! Parser Module
//!
//! アップロードされたファイル（CSV/Excel）を`Table`に読み込むモジュール。
//! 入力形式の判定と、形式ごとのパーサーへの振り分けを行います。

mod delimited;
mod workbook;

pub(crate) use delimited::CsvParser;
pub(crate) use workbook::WorkbookParser;

use crate::api::InputFormat;
use crate::builder::CaptionConfig;
use crate::error::CaptionError;
use crate::formatter::CellFormatter;
use crate::security::SecurityConfig;
use crate::types::Table;

/// ZIPアーカイブのシグネチャ（xlsx/xlsm/xlsb/ods）
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// OLE2複合ドキュメントのシグネチャ（xls）
const OLE2_MAGIC: [u8; 4] = [0xD0, 0xCF, 0x11, 0xE0];

/// 先頭バイトから入力形式を判定
///
/// `Auto`以外が指定されていればそのまま返します。
pub(crate) fn resolve_format(requested: InputFormat, data: &[u8]) -> InputFormat {
    match requested {
        InputFormat::Auto if data.starts_with(&ZIP_MAGIC) || data.starts_with(&OLE2_MAGIC) => {
            InputFormat::Excel
        }
        InputFormat::Auto => InputFormat::Csv,
        other => other,
    }
}

/// バイト列を表として読み込む
///
/// 読み込みに失敗した場合は、部分的な結果を返さずにエラーで中断します。
pub(crate) fn parse_table(
    data: Vec<u8>,
    config: &CaptionConfig,
    security: &SecurityConfig,
) -> Result<Table, CaptionError> {
    let format = resolve_format(config.input_format, &data);
    tracing::debug!(?format, bytes = data.len(), "detected input format");

    match format {
        InputFormat::Excel => {
            if data.starts_with(&ZIP_MAGIC) {
                security.inspect_archive(&data)?;
            }
            let formatter = CellFormatter::new(config.date_format.clone());
            let mut parser = WorkbookParser::open(data)?;
            let sheet_name = parser.select_sheet(&config.sheet_selector)?;
            parser.parse_sheet(&sheet_name, &formatter, security)
        }
        _ => CsvParser::new()
            .with_delimiter(config.csv_delimiter)
            .parse(&data, security),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_format_magic_bytes() {
        assert_eq!(
            resolve_format(InputFormat::Auto, &[0x50, 0x4B, 0x03, 0x04, 0x14]),
            InputFormat::Excel
        );
        assert_eq!(
            resolve_format(InputFormat::Auto, &[0xD0, 0xCF, 0x11, 0xE0, 0xA1]),
            InputFormat::Excel
        );
        assert_eq!(
            resolve_format(InputFormat::Auto, b"Property_Type,City1\n"),
            InputFormat::Csv
        );
        assert_eq!(resolve_format(InputFormat::Auto, b""), InputFormat::Csv);
    }

    #[test]
    fn test_resolve_format_explicit_wins() {
        assert_eq!(
            resolve_format(InputFormat::Csv, &[0x50, 0x4B, 0x03, 0x04]),
            InputFormat::Csv
        );
        assert_eq!(
            resolve_format(InputFormat::Excel, b"a,b"),
            InputFormat::Excel
        );
    }

    #[test]
    fn test_parse_table_csv() {
        let config = CaptionConfig::default();
        let table = parse_table(
            b"City1,BHK\nPune,2\n".to_vec(),
            &config,
            &SecurityConfig::default(),
        )
        .unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].text("City1"), "Pune");
    }

    #[test]
    fn test_parse_table_invalid_excel() {
        let config = CaptionConfig {
            input_format: InputFormat::Excel,
            ..Default::default()
        };
        let result = parse_table(b"not a workbook".to_vec(), &config, &SecurityConfig::default());
        assert!(matches!(result, Err(CaptionError::Excel(_))));
    }
}
