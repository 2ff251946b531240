//! Security Module
//!
//! 入力データに対する上限チェックを実装するモジュール。
//! 巨大ファイル、ZIP bomb、パストラバーサル、極端な行数によるメモリ枯渇を防ぎます。

use std::io::{Cursor, Read};

use zip::ZipArchive;

use crate::error::CaptionError;

/// セキュリティ設定
#[derive(Debug, Clone)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 100MB (104_857_600 bytes)
    pub max_input_file_size: u64,
    /// データ行の最大数
    /// デフォルト: 1,048,576（Excelの最大行数）
    pub max_row_count: usize,
    /// 展開後の最大サイズ（バイト）
    /// デフォルト: 1GB (1_073_741_824 bytes)
    pub max_decompressed_size: u64,
    /// ZIPアーカイブ内の最大ファイル数
    /// デフォルト: 10000
    pub max_file_count: usize,
    /// アーカイブ内の単一ファイルの最大サイズ（バイト）
    /// デフォルト: 100MB (104_857_600 bytes)
    pub max_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: 104_857_600, // 100MB
            max_row_count: 1_048_576,
            max_decompressed_size: 1_073_741_824, // 1GB
            max_file_count: 10_000,
            max_file_size: 104_857_600, // 100MB
        }
    }
}

impl SecurityConfig {
    /// 入力全体をメモリに読み込む（サイズ上限付き）
    ///
    /// 上限を1バイトでも超えた時点で読み込みを打ち切り、
    /// `SecurityViolation`を返します。
    pub fn read_limited<R: Read>(&self, reader: R) -> Result<Vec<u8>, CaptionError> {
        let mut buffer = Vec::new();
        let bytes_read = reader
            .take(self.max_input_file_size.saturating_add(1))
            .read_to_end(&mut buffer)?;

        if bytes_read as u64 > self.max_input_file_size {
            return Err(CaptionError::SecurityViolation(format!(
                "Input file size exceeds maximum: {} bytes",
                self.max_input_file_size
            )));
        }

        Ok(buffer)
    }

    /// ZIPアーカイブ（xlsx/xlsm/xlsb/ods）の中身を展開前に検査
    ///
    /// 中央ディレクトリに記録されたファイル数・各ファイルの展開後サイズ・
    /// 累計サイズ・パスを検証します。calamineに渡す前に呼び出します。
    pub fn inspect_archive(&self, data: &[u8]) -> Result<(), CaptionError> {
        let mut archive =
            ZipArchive::new(Cursor::new(data)).map_err(|e| CaptionError::Zip(e.to_string()))?;

        if archive.len() > self.max_file_count {
            return Err(CaptionError::SecurityViolation(format!(
                "ZIP archive contains too many files: {} (max: {})",
                archive.len(),
                self.max_file_count
            )));
        }

        let mut total_decompressed_size = 0u64;
        for i in 0..archive.len() {
            let file = archive
                .by_index(i)
                .map_err(|e| CaptionError::Zip(e.to_string()))?;

            let file_name = file.name();
            validate_zip_path(file_name).map_err(|e| {
                CaptionError::SecurityViolation(format!("Invalid ZIP path: {}", e))
            })?;

            let file_size = file.size();
            if file_size > self.max_file_size {
                return Err(CaptionError::SecurityViolation(format!(
                    "File '{}' exceeds maximum size: {} bytes (max: {} bytes)",
                    file_name, file_size, self.max_file_size
                )));
            }

            total_decompressed_size = total_decompressed_size
                .checked_add(file_size)
                .ok_or_else(|| {
                    CaptionError::SecurityViolation(
                        "Total decompressed size calculation overflow".to_string(),
                    )
                })?;

            if total_decompressed_size > self.max_decompressed_size {
                return Err(CaptionError::SecurityViolation(format!(
                    "Total decompressed size exceeds maximum: {} bytes (max: {} bytes)",
                    total_decompressed_size, self.max_decompressed_size
                )));
            }
        }

        tracing::debug!(
            entries = archive.len(),
            decompressed = total_decompressed_size,
            "archive inspection passed"
        );
        Ok(())
    }

    /// 行数の上限チェック
    pub fn check_row_count(&self, rows: usize) -> Result<(), CaptionError> {
        if rows > self.max_row_count {
            return Err(CaptionError::SecurityViolation(format!(
                "Row count exceeds maximum: {} rows (max: {} rows)",
                rows, self.max_row_count
            )));
        }
        Ok(())
    }
}

/// ZIP内のファイルパスを検証
///
/// 空のパス、絶対パス、`..`、バックスラッシュを含むパスを拒否します。
fn validate_zip_path(path: &str) -> Result<(), String> {
    if path.is_empty() {
        return Err("Empty path is not allowed".to_string());
    }

    if path.starts_with('/') || path.starts_with("C:\\") || path.starts_with("c:\\") {
        return Err(format!("Absolute path is not allowed: {}", path));
    }

    if path.split('/').any(|segment| segment == "..") {
        return Err(format!("Path traversal detected: {}", path));
    }

    if path.contains('\\') {
        return Err(format!("Backslash in path is not allowed: {}", path));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::{FileOptions, ZipWriter};
    use zip::CompressionMethod;

    fn small() -> SecurityConfig {
        SecurityConfig {
            max_input_file_size: 8,
            max_row_count: 2,
            max_decompressed_size: 24,
            max_file_count: 2,
            max_file_size: 16,
        }
    }

    fn archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut data = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut data));
            let options = FileOptions::default().compression_method(CompressionMethod::Stored);
            for (name, content) in entries {
                zip.start_file(*name, options).unwrap();
                zip.write_all(content).unwrap();
            }
            zip.finish().unwrap();
        }
        data
    }

    #[test]
    fn test_inspect_archive_within_limits() {
        let data = archive(&[("xl/workbook.xml", b"12345678"), ("xl/styles.xml", b"1234")]);
        assert!(small().inspect_archive(&data).is_ok());
    }

    #[test]
    fn test_inspect_archive_too_many_files() {
        let data = archive(&[("a.xml", b"1"), ("b.xml", b"2"), ("c.xml", b"3")]);
        match small().inspect_archive(&data) {
            Err(CaptionError::SecurityViolation(msg)) => assert!(msg.contains("too many files")),
            other => panic!("Expected SecurityViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_inspect_archive_file_too_large() {
        let data = archive(&[("xl/sharedStrings.xml", &[b'a'; 17])]);
        match small().inspect_archive(&data) {
            Err(CaptionError::SecurityViolation(msg)) => {
                assert!(msg.contains("exceeds maximum size"));
            }
            other => panic!("Expected SecurityViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_inspect_archive_total_too_large() {
        let data = archive(&[("a.xml", &[b'a'; 16]), ("b.xml", &[b'b'; 16])]);
        match small().inspect_archive(&data) {
            Err(CaptionError::SecurityViolation(msg)) => {
                assert!(msg.contains("Total decompressed size"));
            }
            other => panic!("Expected SecurityViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_inspect_archive_path_traversal() {
        let data = archive(&[("../evil.xml", b"x")]);
        assert!(matches!(
            small().inspect_archive(&data),
            Err(CaptionError::SecurityViolation(_))
        ));
    }

    #[test]
    fn test_inspect_archive_not_a_zip() {
        assert!(matches!(
            small().inspect_archive(b"PK\x03\x04garbage"),
            Err(CaptionError::Zip(_))
        ));
    }

    #[test]
    fn test_validate_zip_path() {
        assert!(validate_zip_path("xl/worksheets/sheet1.xml").is_ok());
        assert!(validate_zip_path("xl/..hidden.xml").is_ok());
        assert!(validate_zip_path("").is_err());
        assert!(validate_zip_path("/etc/passwd").is_err());
        assert!(validate_zip_path("C:\\Windows\\system32").is_err());
        assert!(validate_zip_path("xl/../../etc/passwd").is_err());
        assert!(validate_zip_path("xl\\workbook.xml").is_err());
    }

    #[test]
    fn test_read_limited_within_limit() {
        let data = small().read_limited(Cursor::new(b"12345678".to_vec())).unwrap();
        assert_eq!(data.len(), 8);
    }

    #[test]
    fn test_read_limited_exceeds_limit() {
        let result = small().read_limited(Cursor::new(b"123456789".to_vec()));
        match result {
            Err(CaptionError::SecurityViolation(msg)) => {
                assert!(msg.contains("Input file size exceeds maximum"));
            }
            other => panic!("Expected SecurityViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_check_row_count() {
        assert!(small().check_row_count(2).is_ok());
        assert!(matches!(
            small().check_row_count(3),
            Err(CaptionError::SecurityViolation(_))
        ));
    }
}
