use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One synthetic metric observation.
///
/// Samples are immutable once generated; the stream buffer only ever appends
/// and evicts whole samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    /// Milliseconds since the Unix epoch.
    pub timestamp:     i64,
    pub users:         u32,
    pub revenue:       f64,
    pub connections:   u32,
    /// Requests per second.
    pub throughput:    u32,
    /// Error count for the tick, always in `0..10`.
    pub errors:        u32,
    /// Response time in milliseconds.
    pub response_time: f64,
}

impl Sample {
    /// Timestamp converted to the local timezone.
    ///
    /// Out-of-range timestamps fall back to the Unix epoch.
    pub fn local_time(&self) -> DateTime<Local> {
        Local
            .timestamp_millis_opt(self.timestamp)
            .single()
            .unwrap_or_else(|| DateTime::<Local>::from(std::time::UNIX_EPOCH))
    }

    /// Read one field as `f64`, for charting.
    #[must_use]
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Users        => f64::from(self.users),
            Metric::Revenue      => self.revenue,
            Metric::Connections  => f64::from(self.connections),
            Metric::Throughput   => f64::from(self.throughput),
            Metric::Errors       => f64::from(self.errors),
            Metric::ResponseTime => self.response_time,
        }
    }
}

/// Running headline counters shown on the key-metric cards.
///
/// Updated once per tick: users and revenue drift by small random deltas,
/// connections and throughput mirror the newest sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsCounters {
    pub total_users:        u64,
    pub revenue:            f64,
    pub active_connections: u64,
    pub throughput:         u64,
}

impl Default for MetricsCounters {
    fn default() -> Self {
        Self {
            total_users:        1_247_832,
            revenue:            89_432.50,
            active_connections: 15_647,
            throughput:         2_341,
        }
    }
}

impl MetricsCounters {
    /// Apply one tick's drift and mirror the latest sample.
    ///
    /// Users saturate at zero and revenue is clamped at zero so the counters
    /// never go negative.
    pub fn apply_tick(&mut self, user_delta: i64, revenue_delta: f64, latest: &Sample) {
        self.total_users        = self.total_users.saturating_add_signed(user_delta);
        self.revenue            = (self.revenue + revenue_delta).max(0.0);
        self.active_connections = u64::from(latest.connections);
        self.throughput         = u64::from(latest.throughput);
    }
}

/// Selectable history span.  One sample stands for one minute of history,
/// so each preset maps to a sample count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String")]
pub enum Timeframe {
    #[default]
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "6h")]
    SixHours,
    #[serde(rename = "24h")]
    TwentyFourHours,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Self::OneHour, Self::SixHours, Self::TwentyFourHours];

    /// Number of samples covered by this timeframe.
    #[must_use]
    pub const fn sample_count(self) -> usize {
        match self {
            Self::OneHour         => 60,
            Self::SixHours        => 360,
            Self::TwentyFourHours => 1440,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneHour         => "1h",
            Self::SixHours        => "6h",
            Self::TwentyFourHours => "24h",
        }
    }

    /// Human label used by the timeframe selector.
    pub const fn label(self) -> &'static str {
        match self {
            Self::OneHour         => "Last Hour",
            Self::SixHours        => "Last 6 Hours",
            Self::TwentyFourHours => "Last 24 Hours",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1h"  => Ok(Self::OneHour),
            "6h"  => Ok(Self::SixHours),
            "24h" => Ok(Self::TwentyFourHours),
            other => Err(format!("unknown timeframe '{other}' (expected 1h, 6h or 24h)")),
        }
    }
}

impl TryFrom<String> for Timeframe {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Field selector over [`Sample`].
///
/// Deserializes through [`FromStr`], so config files accept the same
/// spellings as typed commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Metric {
    #[default]
    Users,
    Revenue,
    Connections,
    Throughput,
    Errors,
    ResponseTime,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Self::Users,
        Self::Revenue,
        Self::Connections,
        Self::Throughput,
        Self::Errors,
        Self::ResponseTime,
    ];

    /// Metrics offered by the activity timeline selector.
    pub const TIMELINE: [Metric; 3] = [Self::Users, Self::Revenue, Self::Connections];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Users        => "users",
            Self::Revenue      => "revenue",
            Self::Connections  => "connections",
            Self::Throughput   => "throughput",
            Self::Errors       => "errors",
            Self::ResponseTime => "response_time",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Users        => "Users",
            Self::Revenue      => "Revenue",
            Self::Connections  => "Connections",
            Self::Throughput   => "Throughput",
            Self::Errors       => "Errors",
            Self::ResponseTime => "Response Time",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        match normalised.as_str() {
            "users"        => Ok(Self::Users),
            "revenue"      => Ok(Self::Revenue),
            "connections"  => Ok(Self::Connections),
            "throughput"   => Ok(Self::Throughput),
            "errors"       => Ok(Self::Errors),
            "responsetime" => Ok(Self::ResponseTime),
            _ => Err(format!("unknown metric '{}'", s.trim())),
        }
    }
}

impl TryFrom<String> for Metric {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
