// 📥 Dataset Importer - SWIFT spreadsheet (XLSX or CSV) → SQLite
// Bad rows are logged and skipped; only a broken header aborts the load

use crate::db::insert_swift_code;
use crate::error::{Result, SwiftError};
use crate::model::SwiftRecord;
use crate::validator::validate_record;
use calamine::{open_workbook_auto, Data, Reader};
use csv::StringRecord;
use rusqlite::Connection;
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

pub const COL_SWIFT_CODE: &str = "SWIFT CODE";
pub const COL_NAME: &str = "NAME";
pub const COL_ADDRESS: &str = "ADDRESS";
pub const COL_COUNTRY_ISO2: &str = "COUNTRY ISO2 CODE";
pub const COL_COUNTRY_NAME: &str = "COUNTRY NAME";

pub const REQUIRED_COLUMNS: [&str; 5] = [
    COL_SWIFT_CODE,
    COL_NAME,
    COL_ADDRESS,
    COL_COUNTRY_ISO2,
    COL_COUNTRY_NAME,
];

/// Outcome of one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Data rows read (header excluded).
    pub rows: usize,
    pub inserted: usize,
    /// Rows whose code was already stored, either earlier in this file or before the run.
    pub duplicates: usize,
    /// Rows skipped for failing validation or being unreadable.
    pub invalid: usize,
}

// ============================================================================
// COLUMN MAPPING
// ============================================================================

/// Positions of the required columns in the header row.
#[derive(Debug)]
struct ColumnMap {
    swift_code: usize,
    name: usize,
    address: usize,
    country_iso2: usize,
    country_name: usize,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_uppercase())
            .collect();
        let position = |name: &str| normalized.iter().position(|h| h == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|col| position(col).is_none())
            .map(|col| col.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(SwiftError::MissingColumns(missing));
        }

        let index = |name: &str| position(name).unwrap_or_default();
        Ok(ColumnMap {
            swift_code: index(COL_SWIFT_CODE),
            name: index(COL_NAME),
            address: index(COL_ADDRESS),
            country_iso2: index(COL_COUNTRY_ISO2),
            country_name: index(COL_COUNTRY_NAME),
        })
    }

    fn to_record(&self, row: &StringRecord) -> SwiftRecord {
        let cell = |idx: usize| row.get(idx).unwrap_or("");
        SwiftRecord::from_dataset_row(
            cell(self.swift_code),
            cell(self.name),
            cell(self.address),
            cell(self.country_iso2),
            cell(self.country_name),
        )
    }
}

// ============================================================================
// DATASET FORMATS
// ============================================================================

/// Source format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// Excel / OpenDocument workbook; the first sheet is read.
    Spreadsheet,
    Csv,
}

impl DatasetFormat {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => DatasetFormat::Spreadsheet,
            _ => DatasetFormat::Csv,
        }
    }
}

/// One data row with the source line it came from (header is line 1).
struct DatasetRow {
    line: u64,
    cells: StringRecord,
}

// ============================================================================
// IMPORT
// ============================================================================

/// Import a dataset file into the store. `.xlsx`/`.xls`/`.ods` files are read
/// as workbooks, anything else as CSV.
pub fn import_dataset(conn: &Connection, path: &Path) -> Result<ImportReport> {
    let format = DatasetFormat::from_path(path);
    info!(path = %path.display(), ?format, "importing SWIFT dataset");

    match format {
        DatasetFormat::Spreadsheet => import_workbook(conn, path),
        DatasetFormat::Csv => import_from_reader(conn, File::open(path)?),
    }
}

/// Import from any CSV source with a header row.
pub fn import_from_reader<R: Read>(conn: &Connection, reader: R) -> Result<ImportReport> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnMap::from_headers(rdr.headers()?)?;

    let rows = rdr.into_records().map(|result| {
        result.map(|cells| DatasetRow {
            line: cells.position().map(|p| p.line()).unwrap_or_default(),
            cells,
        })
    });

    import_rows(conn, &columns, rows)
}

/// Import the first worksheet of a workbook; its first row is the header.
pub fn import_workbook(conn: &Connection, path: &Path) -> Result<ImportReport> {
    let mut workbook = open_workbook_auto(path)?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Err(SwiftError::MissingColumns(missing_all())),
    };

    let mut sheet_rows = range.rows().map(|row| {
        row.iter()
            .map(|cell| match cell {
                Data::Empty => String::new(),
                other => other.to_string(),
            })
            .collect::<StringRecord>()
    });

    let headers = sheet_rows.next().unwrap_or_else(StringRecord::new);
    let columns = ColumnMap::from_headers(&headers)?;

    let rows = sheet_rows.enumerate().map(|(index, cells)| {
        Ok(DatasetRow {
            line: index as u64 + 2,
            cells,
        })
    });

    import_rows(conn, &columns, rows)
}

fn missing_all() -> Vec<String> {
    REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect()
}

/// Shared row loop for every format.
///
/// Each row is normalised to uppercase and run through the same validation
/// as an interactive create. Invalid rows and duplicate codes are logged and
/// skipped, so re-running the same dataset only adds what is missing.
fn import_rows<I>(conn: &Connection, columns: &ColumnMap, rows: I) -> Result<ImportReport>
where
    I: Iterator<Item = std::result::Result<DatasetRow, csv::Error>>,
{
    let mut report = ImportReport::default();

    for (index, result) in rows.enumerate() {
        let row_number = index + 1;
        report.rows += 1;

        let row = match result {
            Ok(row) => row,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!(row = row_number, error = %e, "skipping unreadable row");
                report.invalid += 1;
                continue;
            }
        };
        let line = row.line;

        let candidate = columns.to_record(&row.cells);

        if let Err(errors) = validate_record(&candidate) {
            let reason = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(
                row = row_number,
                line,
                code = %candidate.swift_code,
                %reason,
                "skipping invalid row"
            );
            report.invalid += 1;
            continue;
        }

        match insert_swift_code(conn, &candidate) {
            Ok(()) => report.inserted += 1,
            Err(SwiftError::DuplicateKey(code)) => {
                warn!(row = row_number, line, %code, "skipping duplicate SWIFT code");
                report.duplicates += 1;
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        rows = report.rows,
        inserted = report.inserted,
        duplicates = report.duplicates,
        invalid = report.invalid,
        "SWIFT dataset import finished"
    );

    Ok(report)
}
