use pulse_core::{Metric, MetricsCounters, Timeframe};
use serde::{Deserialize, Serialize};

/// Root configuration structure parsed from `pulse.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    /// Sample generation and buffering.
    pub stream: StreamConfig,
    /// Starting values for the headline counters.
    pub counters: CountersConfig,
    /// What the frame printer shows and how often.
    pub display: DisplayConfig,
    /// Colour / styling settings.
    pub theme: ThemeConfig,
}

/// Ticker and buffer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Period between ticks while streaming, in milliseconds.
    pub tick_interval_ms: u64,
    /// Maximum number of samples retained.
    pub capacity: usize,
    /// Pre-fill the buffer with `capacity` historical samples at startup.
    pub backfill: bool,
    /// Spacing between backfilled samples, in milliseconds.
    pub backfill_spacing_ms: u64,
    /// Fixed RNG seed.  `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Start streaming as soon as the dashboard is up.
    pub autostart: bool,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms:    1_000,
            capacity:            1_000,
            backfill:            true,
            backfill_spacing_ms: 60_000,
            seed:                None,
            autostart:           true,
        }
    }
}

/// Initial headline counter values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CountersConfig {
    pub total_users:        u64,
    pub revenue:            f64,
    pub active_connections: u64,
    pub throughput:         u64,
}

impl Default for CountersConfig {
    fn default() -> Self {
        let counters = MetricsCounters::default();
        Self {
            total_users:        counters.total_users,
            revenue:            counters.revenue,
            active_connections: counters.active_connections,
            throughput:         counters.throughput,
        }
    }
}

impl From<&CountersConfig> for MetricsCounters {
    fn from(cfg: &CountersConfig) -> Self {
        Self {
            total_users:        cfg.total_users,
            revenue:            cfg.revenue.max(0.0),
            active_connections: cfg.active_connections,
            throughput:         cfg.throughput,
        }
    }
}

/// Frame output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Initially selected timeframe.
    pub timeframe: Timeframe,
    /// Initially selected timeline metric.
    pub metric: Metric,
    /// `text` for a human-readable dashboard, `json` for one object per line.
    pub format: OutputFormat,
    /// Emit a frame every N applied ticks.
    pub render_every: u32,
    /// Rows in the live data table.
    pub table_rows: usize,
    /// Points shown in the text timeline sparkline.
    pub sparkline_width: usize,
    /// Stop after this many seconds.  `None` runs until quit / ctrl-c.
    pub run_for_secs: Option<u64>,
    /// Shut down when the command input reaches end-of-file.
    pub exit_on_eof: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timeframe:       Timeframe::OneHour,
            metric:          Metric::Users,
            format:          OutputFormat::Text,
            render_every:    5,
            table_rows:      10,
            sparkline_width: 60,
            run_for_secs:    None,
            exit_on_eof:     false,
        }
    }
}

/// Frame output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Theme / styling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Emit ANSI colour escapes in text output.
    pub color: bool,
    /// Primary text colour (hex, e.g. `"#e5e7eb"`).
    pub foreground: String,
    /// Secondary / label text colour.
    pub muted: String,
    /// Accent used for headings and the timeline.
    pub accent: String,
    /// Healthy / positive status colour.
    pub success: String,
    /// Warning colour.
    pub warning: String,
    /// Critical colour.
    pub danger: String,
    /// `strftime` format for timestamps in the timeline and table.
    pub time_format: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            color:       true,
            foreground:  "#e5e7eb".to_string(), // gray-200
            muted:       "#9ca3af".to_string(), // gray-400
            accent:      "#8b5cf6".to_string(), // violet-500
            success:     "#4ade80".to_string(), // green-400
            warning:     "#ca8a04".to_string(), // yellow-600
            danger:      "#dc2626".to_string(), // red-600
            time_format: "%H:%M:%S".to_string(),
        }
    }
}
