// Spreadsheet row extraction.
//
// Decodes the positional source schema exactly once: column 6 is the
// employee name, column 7 the role, columns 8 and 9 the issued/signed order
// counts. Only rows carrying an allowed role survive; everything downstream
// works with named-field `DeliveryRecord`s.
use crate::types::DeliveryRecord;
use crate::util::parse_count;
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::path::Path;
use thiserror::Error;

/// Roles that count toward the sign-off report.
pub const ALLOWED_ROLES: [&str; 2] = ["Shipper-chính thức", "Admin"];

const NAME_FIELD: usize = 6;
const ROLE_FIELD: usize = 7;
const ISSUED_FIELD: usize = 8;
const SIGNED_FIELD: usize = 9;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("file not found: {0}")]
    FileNotFound(String),
    #[error("unsupported file format: .{0} (expected .xlsx, .xls or .csv)")]
    UnsupportedFormat(String),
    #[error("workbook has no readable sheet")]
    NoSheet,
    #[error("no rows with role {} or {}", ALLOWED_ROLES[0], ALLOWED_ROLES[1])]
    NoMatchingRows,
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Workbook(#[from] calamine::Error),
}

/// Diagnostics from one load, printed by the CLI.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub total_rows: usize,
    pub kept_rows: usize,
}

/// Load delivery records from an `.xlsx`/`.xls` workbook (first sheet) or a
/// `.csv` file. The header row is skipped; rows whose role is not in
/// [`ALLOWED_ROLES`] are dropped. Fails with [`ExtractError::NoMatchingRows`]
/// when nothing survives the role filter, so the aggregator never sees an
/// empty batch.
pub fn load_records(path: &Path) -> Result<(Vec<DeliveryRecord>, LoadReport), ExtractError> {
    if !path.exists() {
        return Err(ExtractError::FileNotFound(path.display().to_string()));
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let (records, report) = match ext.as_str() {
        "xlsx" | "xls" => load_workbook(path)?,
        "csv" => load_csv(path)?,
        other => return Err(ExtractError::UnsupportedFormat(other.to_string())),
    };
    if records.is_empty() {
        return Err(ExtractError::NoMatchingRows);
    }
    Ok((records, report))
}

fn load_workbook(path: &Path) -> Result<(Vec<DeliveryRecord>, LoadReport), ExtractError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ExtractError::NoSheet)??;

    let mut records = Vec::new();
    let mut total_rows = 0usize;
    // First row is the header.
    for row in range.rows().skip(1) {
        total_rows += 1;
        let cell = |idx: usize| row.get(idx).map(cell_text).unwrap_or_default();
        let role = cell(ROLE_FIELD);
        if !ALLOWED_ROLES.contains(&role.as_str()) {
            continue;
        }
        let issued = cell(ISSUED_FIELD);
        let signed = cell(SIGNED_FIELD);
        records.push(DeliveryRecord {
            name: cell(NAME_FIELD),
            role,
            orders_issued: parse_count(Some(issued.as_str())),
            orders_signed: parse_count(Some(signed.as_str())),
        });
    }
    let kept_rows = records.len();
    Ok((records, LoadReport { total_rows, kept_rows }))
}

fn load_csv(path: &Path) -> Result<(Vec<DeliveryRecord>, LoadReport), ExtractError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let mut records = Vec::new();
    let mut total_rows = 0usize;
    for result in rdr.records() {
        total_rows += 1;
        let row = result?;
        let role = row.get(ROLE_FIELD).map(str::trim).unwrap_or_default();
        if !ALLOWED_ROLES.contains(&role) {
            continue;
        }
        records.push(DeliveryRecord {
            name: row
                .get(NAME_FIELD)
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            role: role.to_string(),
            orders_issued: parse_count(row.get(ISSUED_FIELD)),
            orders_signed: parse_count(row.get(SIGNED_FIELD)),
        });
    }
    let kept_rows = records.len();
    Ok((records, LoadReport { total_rows, kept_rows }))
}

/// Render a workbook cell as trimmed text. Whole-number floats print
/// without the decimal point so count columns parse like their CSV
/// counterparts.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Int(i) => i.to_string(),
        other => other.to_string().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "stt,a,b,c,d,e,ten,phan_loai,don_phat,don_ky\n";

    fn csv_file(body: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(HEADER.as_bytes()).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn keeps_only_allowed_roles() {
        let file = csv_file(
            "1,,,,,,An,Admin,10,7\n\
             2,,,,,,Mai,Kế toán,5,5\n\
             3,,,,,,Bình,Shipper-chính thức,8,4\n",
        );
        let (records, report) = load_records(file.path()).unwrap();
        assert_eq!(report.total_rows, 3);
        assert_eq!(report.kept_rows, 2);
        assert_eq!(records[0].name, "An");
        assert_eq!(records[1].name, "Bình");
        assert_eq!(records[1].role, "Shipper-chính thức");
    }

    #[test]
    fn malformed_counts_coerce_to_zero() {
        let file = csv_file("1,,,,,,An,Admin,n/a,\n");
        let (records, _) = load_records(file.path()).unwrap();
        assert_eq!(records[0].orders_issued, 0);
        assert_eq!(records[0].orders_signed, 0);
    }

    #[test]
    fn short_rows_are_dropped_by_the_role_filter() {
        // Second row ends before the role column.
        let file = csv_file(
            "1,,,,,,An,Admin,10,7\n\
             2,,,,,,Mai\n",
        );
        let (records, report) = load_records(file.path()).unwrap();
        assert_eq!(report.total_rows, 2);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn all_rows_filtered_is_an_error() {
        let file = csv_file("1,,,,,,Mai,Kế toán,5,5\n");
        let err = load_records(file.path()).unwrap_err();
        assert!(matches!(err, ExtractError::NoMatchingRows));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_records(Path::new("does_not_exist.csv")).unwrap_err();
        assert!(matches!(err, ExtractError::FileNotFound(_)));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"whatever").unwrap();
        let err = load_records(file.path()).unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(_)));
    }
}
