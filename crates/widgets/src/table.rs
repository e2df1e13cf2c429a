use crate::format::{format_currency, format_ms, format_rate, group_thousands};
use pulse_core::Sample;
use serde::Serialize;

/// Error-count badge level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Ok,
    Warn,
    Critical,
}

impl Severity {
    /// 0 errors is ok, fewer than 5 is a warning, anything else is critical.
    pub fn from_errors(errors: u32) -> Self {
        match errors {
            0    => Self::Ok,
            1..=4 => Self::Warn,
            _    => Self::Critical,
        }
    }
}

/// One row of the live data table, pre-formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub timestamp:     i64,
    pub time:          String,
    pub users:         String,
    pub revenue:       String,
    pub connections:   String,
    pub throughput:    String,
    pub errors:        u32,
    pub severity:      Severity,
    pub response_time: String,
}

impl TableRow {
    pub fn from_sample(sample: &Sample, time_format: &str) -> Self {
        Self {
            timestamp:     sample.timestamp,
            time:          sample.local_time().format(time_format).to_string(),
            users:         group_thousands(u64::from(sample.users)),
            revenue:       format_currency(sample.revenue),
            connections:   sample.connections.to_string(),
            throughput:    format_rate(u64::from(sample.throughput)),
            errors:        sample.errors,
            severity:      Severity::from_errors(sample.errors),
            response_time: format_ms(sample.response_time),
        }
    }
}

/// Column headings, in row order.
pub const TABLE_HEADERS: [&str; 7] = [
    "Timestamp",
    "Users",
    "Revenue",
    "Connections",
    "Throughput",
    "Errors",
    "Response Time",
];

/// The newest `rows` samples of `window`, newest first.
pub fn live_rows<'a, I>(window: I, rows: usize, time_format: &str) -> Vec<TableRow>
where
    I: IntoIterator<Item = &'a Sample>,
    I::IntoIter: DoubleEndedIterator,
{
    window
        .into_iter()
        .rev()
        .take(rows)
        .map(|s| TableRow::from_sample(s, time_format))
        .collect()
}
