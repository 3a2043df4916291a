//! File acquisition boundary: extension validation and first-worksheet
//! decoding. The extension check runs before any decode attempt so an
//! unsupported file is rejected without touching its contents.

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

/// Spreadsheet extensions the decoder accepts.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["xls", "xlsx", "xlsm", "xlsb"];

/// True when the path carries an accepted spreadsheet extension
/// (case-insensitive).
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| ext.eq_ignore_ascii_case(s))
        })
}

fn check_extension(path: &Path) -> Result<()> {
    if is_supported(path) {
        Ok(())
    } else {
        Err(eyre!(
            "Unsupported file type {:?}: expected an Excel file (.xlsx, .xls, .xlsm, .xlsb)",
            path.file_name().unwrap_or(path.as_os_str())
        ))
    }
}

fn first_sheet<RS>(workbook: &mut Sheets<RS>) -> Result<Range<Data>>
where
    RS: Read + Seek,
{
    workbook
        .worksheet_range_at(0)
        .ok_or_else(|| eyre!("Excel: workbook has no worksheets"))?
        .map_err(|e| eyre!("Excel: {}", e))
}

/// Decodes the first worksheet of the file at `path`. Fails before reading
/// when the extension is not an accepted spreadsheet type; decode failures
/// surface as a single error with nothing partially decoded.
pub fn read_sheet(path: &Path) -> Result<Range<Data>> {
    check_extension(path)?;
    let mut workbook = open_workbook_auto(path).map_err(|e| eyre!("Excel: {}", e))?;
    first_sheet(&mut workbook)
}

/// Decodes the first worksheet from an in-memory byte buffer. `filename` is
/// the originating name as supplied by the caller; only its extension is
/// inspected.
pub fn read_sheet_from_bytes(bytes: &[u8], filename: &str) -> Result<Range<Data>> {
    check_extension(Path::new(filename))?;
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| eyre!("Excel: {}", e))?;
    first_sheet(&mut workbook)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn supported_extensions_case_insensitive() {
        assert!(is_supported(Path::new("ledger.xlsx")));
        assert!(is_supported(Path::new("LEDGER.XLSX")));
        assert!(is_supported(Path::new("/data/old.xls")));
        assert!(is_supported(Path::new("macro.xlsm")));
        assert!(is_supported(Path::new("binary.xlsb")));
    }

    #[test]
    fn unsupported_extensions_rejected() {
        assert!(!is_supported(Path::new("data.csv")));
        assert!(!is_supported(Path::new("notes.txt")));
        assert!(!is_supported(Path::new("noextension")));
        assert!(!is_supported(Path::new("archive.xlsx.gz")));
    }

    #[test]
    fn read_sheet_rejects_extension_before_touching_the_file() {
        // the path does not exist; the extension check must fail first
        let path = PathBuf::from("/nonexistent/data.csv");
        let err = read_sheet(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported file type"));
    }

    #[test]
    fn read_sheet_from_bytes_rejects_bad_extension() {
        let err = read_sheet_from_bytes(b"not a workbook", "data.csv").unwrap_err();
        assert!(err.to_string().contains("Unsupported file type"));
    }

    #[test]
    fn garbage_bytes_with_good_extension_fail_decode() {
        let err = read_sheet_from_bytes(b"definitely not a zip archive", "data.xlsx").unwrap_err();
        assert!(err.to_string().starts_with("Excel:"));
    }
}
