use crate::collate::vietnamese_cmp;
use crate::types::{DeliveryRecord, Evaluation, ReportRow, ReportSummary, TOTAL_LABEL};
use crate::util::format_percent;
use std::collections::HashMap;
use thiserror::Error;

const PASS_THRESHOLD: f64 = 60.0;
const REVIEW_THRESHOLD: f64 = 70.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("no records to aggregate")]
    EmptyInput,
}

// Per-employee accumulator. Lives only for the duration of one
// `build_report` call.
struct Bucket {
    role: String,
    issued: i64,
    signed: i64,
}

/// Build the sign-off report from role-filtered delivery records.
///
/// Records are grouped by employee name; the role of the first record seen
/// for a name sticks even if later records disagree. Employee rows come out
/// in Vietnamese alphabetical order with a single grand-total row (`TỔNG`)
/// appended last. Pure and deterministic: the same input always yields the
/// same output.
pub fn build_report(records: &[DeliveryRecord]) -> Result<Vec<ReportRow>, ReportError> {
    if records.is_empty() {
        return Err(ReportError::EmptyInput);
    }

    let mut buckets: HashMap<String, Bucket> = HashMap::new();
    for r in records {
        // Role is assigned on insertion only, so the first sighting wins
        // regardless of map iteration order.
        let b = buckets.entry(r.name.clone()).or_insert_with(|| Bucket {
            role: r.role.clone(),
            issued: 0,
            signed: 0,
        });
        b.issued += r.orders_issued;
        b.signed += r.orders_signed;
    }

    let mut rows: Vec<ReportRow> = buckets
        .into_iter()
        .map(|(name, b)| make_row(name, b.role, b.issued, b.signed))
        .collect();
    rows.sort_by(|a, b| vietnamese_cmp(&a.name, &b.name));

    // Grand totals come from the bucket rows, not from re-summing raw
    // records; the total row is excluded from the name sort.
    let total_issued: i64 = rows.iter().map(|r| r.orders_issued).sum();
    let total_signed: i64 = rows.iter().map(|r| r.orders_signed).sum();
    rows.push(make_row(
        TOTAL_LABEL.to_string(),
        String::new(),
        total_issued,
        total_signed,
    ));

    Ok(rows)
}

fn make_row(name: String, role: String, issued: i64, signed: i64) -> ReportRow {
    let ratio = if issued > 0 {
        signed as f64 / issued as f64 * 100.0
    } else {
        0.0
    };
    let target_raw = issued as f64 * 0.6;
    // The shortfall rounds from the raw target, not the rounded one.
    let shortfall_raw = target_raw - signed as f64;
    let evaluation = if ratio >= PASS_THRESHOLD {
        Evaluation::Dat
    } else {
        Evaluation::KhongDat
    };

    ReportRow {
        name,
        role,
        orders_issued: issued,
        orders_signed: signed,
        // May go negative when signed > issued; kept unclamped as a
        // data-quality signal.
        orders_unsigned: issued - signed,
        signature_ratio: format_percent(ratio),
        evaluation,
        target60: target_raw.round() as i64,
        shortfall60: shortfall_raw.round().max(0.0) as i64,
        margin60: format_percent(ratio - PASS_THRESHOLD),
        margin70: format_percent(ratio - REVIEW_THRESHOLD),
    }
}

/// Derive the JSON summary from a finished report.
pub fn generate_summary(rows: &[ReportRow]) -> ReportSummary {
    let employees: Vec<&ReportRow> = rows.iter().filter(|r| r.name != TOTAL_LABEL).collect();
    let total_issued: i64 = employees.iter().map(|r| r.orders_issued).sum();
    let total_signed: i64 = employees.iter().map(|r| r.orders_signed).sum();
    let overall_ratio = if total_issued > 0 {
        total_signed as f64 / total_issued as f64 * 100.0
    } else {
        0.0
    };
    let pass_count = employees
        .iter()
        .filter(|r| r.evaluation == Evaluation::Dat)
        .count();
    ReportSummary {
        employee_count: employees.len(),
        total_issued,
        total_signed,
        total_unsigned: total_issued - total_signed,
        overall_ratio,
        pass_count,
        fail_count: employees.len() - pass_count,
        generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}
