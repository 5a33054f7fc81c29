use serde::Serialize;
use std::fmt;
use tabled::Tabled;

/// Name of the synthetic grand-total row appended to every report.
pub const TOTAL_LABEL: &str = "TỔNG";

/// One cleaned source row: name, role and the two order counts, decoded once
/// at the extraction boundary so nothing downstream indexes by column.
#[derive(Debug, Clone)]
pub struct DeliveryRecord {
    pub name: String,
    pub role: String,
    pub orders_issued: i64,
    pub orders_signed: i64,
}

/// Pass/fail verdict against the 60% signature-ratio threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Evaluation {
    #[serde(rename = "Đạt")]
    Dat,
    #[serde(rename = "Không đạt")]
    KhongDat,
}

impl Evaluation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Evaluation::Dat => "Đạt",
            Evaluation::KhongDat => "Không đạt",
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the finished report. The ratio and margin columns are
/// pre-formatted display strings (two decimals, `%` suffix); consumers must
/// not parse them back into numbers.
#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct ReportRow {
    #[serde(rename = "Nhân viên phát kiện")]
    #[tabled(rename = "Nhân viên phát kiện")]
    pub name: String,
    #[serde(rename = "Phân loại")]
    #[tabled(rename = "Phân loại")]
    pub role: String,
    #[serde(rename = "Số đơn hàng phát")]
    #[tabled(rename = "Số đơn hàng phát")]
    pub orders_issued: i64,
    #[serde(rename = "Tổng đơn ký nhận")]
    #[tabled(rename = "Tổng đơn ký nhận")]
    pub orders_signed: i64,
    #[serde(rename = "Chưa ký nhận")]
    #[tabled(rename = "Chưa ký nhận")]
    pub orders_unsigned: i64,
    #[serde(rename = "Tỷ lệ ký nhận thực tế")]
    #[tabled(rename = "Tỷ lệ ký nhận thực tế")]
    pub signature_ratio: String,
    #[serde(rename = "Đánh giá")]
    #[tabled(rename = "Đánh giá")]
    pub evaluation: Evaluation,
    #[serde(rename = "Lượng đơn cần đạt 60%")]
    #[tabled(rename = "Lượng đơn cần đạt 60%")]
    pub target60: i64,
    #[serde(rename = "Lượng đơn thiếu cần xử lý 60%")]
    #[tabled(rename = "Lượng đơn thiếu cần xử lý 60%")]
    pub shortfall60: i64,
    #[serde(rename = "T1 -60%")]
    #[tabled(rename = "T1 -60%")]
    pub margin60: String,
    #[serde(rename = "T2 -70%")]
    #[tabled(rename = "T2 -70%")]
    pub margin70: String,
}

/// Aggregate stats written to `summary.json` next to the report CSV.
#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub employee_count: usize,
    pub total_issued: i64,
    pub total_signed: i64,
    pub total_unsigned: i64,
    pub overall_ratio: f64,
    pub pass_count: usize,
    pub fail_count: usize,
    pub generated_at: String,
}
