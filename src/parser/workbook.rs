//! Workbook Parser
//!
//! calamineを使用してExcel系ワークブック（xlsx/xlsm/xlsb/xls/ods）から
//! 1シート分の表を読み込みます。

use calamine::{open_workbook_auto_from_rs, Reader, Sheets};
use std::io::Cursor;

use crate::api::SheetSelector;
use crate::error::CaptionError;
use crate::formatter::CellFormatter;
use crate::security::SecurityConfig;
use crate::types::{CellValue, Row, Table};

/// ワークブックパーサー
///
/// calamineのラッパーとして、シート選択と表の抽出を提供します。
pub(crate) struct WorkbookParser {
    workbook: Sheets<Cursor<Vec<u8>>>,
}

impl WorkbookParser {
    /// メモリ上のバイト列からワークブックを開く
    ///
    /// 形式（xlsx/xls/ods など）はcalamineが自動判定します。
    pub fn open(buffer: Vec<u8>) -> Result<Self, CaptionError> {
        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        Ok(Self { workbook })
    }

    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// シート選択方式に基づいてシート名を決定
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 選択されたシート名
    /// * `Err(CaptionError::SheetNotFound)` - シートが存在しない、またはインデックスが範囲外の場合
    pub fn select_sheet(&self, selector: &SheetSelector) -> Result<String, CaptionError> {
        let names = self.sheet_names();

        match selector {
            SheetSelector::First => names
                .into_iter()
                .next()
                .ok_or_else(|| CaptionError::SheetNotFound("workbook has no sheets".to_string())),

            SheetSelector::Index(index) => {
                let total = names.len();
                names.into_iter().nth(*index).ok_or_else(|| {
                    CaptionError::SheetNotFound(format!(
                        "index {} is out of range (total: {})",
                        index, total
                    ))
                })
            }

            SheetSelector::Name(name) => {
                if names.contains(name) {
                    Ok(name.clone())
                } else {
                    Err(CaptionError::SheetNotFound(format!("'{}'", name)))
                }
            }
        }
    }

    /// シートをパースして表を抽出
    ///
    /// 使用範囲の先頭行をヘッダーとし、以降をデータ行とします。
    /// すべてのセルが空のデータ行はスキップします。
    pub fn parse_sheet(
        &mut self,
        sheet_name: &str,
        formatter: &CellFormatter,
        security: &SecurityConfig,
    ) -> Result<Table, CaptionError> {
        let range = self.workbook.worksheet_range(sheet_name)?;
        let mut rows_iter = range.rows();

        let header_cells = rows_iter.next().ok_or(CaptionError::EmptyInput)?;
        let headers = header_cells
            .iter()
            .map(|cell| {
                formatter
                    .format_cell(cell)
                    .map(|value| value.as_text().trim().to_string())
            })
            .collect::<Result<Vec<String>, CaptionError>>()?;

        if headers.iter().all(|h| h.is_empty()) {
            return Err(CaptionError::EmptyInput);
        }

        let mut rows = Vec::new();
        for cells in rows_iter {
            let values = cells
                .iter()
                .map(|cell| formatter.format_cell(cell))
                .collect::<Result<Vec<CellValue>, CaptionError>>()?;

            let row = Row::from_values(&headers, values);
            if row.is_blank() {
                continue;
            }

            rows.push(row);
            security.check_row_count(rows.len())?;
        }

        tracing::debug!(
            sheet = sheet_name,
            columns = headers.len(),
            rows = rows.len(),
            "parsed worksheet"
        );

        Ok(Table { headers, rows })
    }
}

// calamineで読み込むワークブックが必要なため、テストは統合テスト（tests/）で実装します。
