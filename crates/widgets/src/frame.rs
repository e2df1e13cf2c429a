use crate::cards::{metric_cards, MetricCard};
use crate::devices::{DeviceShare, DEVICE_DISTRIBUTION};
use crate::format::group_thousands;
use crate::regions::RegionalSummary;
use crate::table::{live_rows, TableRow};
use crate::timeline::Timeline;
use chrono::{Local, TimeZone};
use pulse_core::{Metric, Timeframe};
use pulse_stream::{Clock, Dashboard, HeatCell, Heatmap, HEATMAP_DAYS, HEATMAP_MAX};
use serde::Serialize;

/// Knobs for building a [`Frame`].
#[derive(Debug, Clone)]
pub struct FrameOptions {
    /// Rows in the live data table.
    pub table_rows:  usize,
    /// `strftime` format for sample timestamps.
    pub time_format: String,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            table_rows:  10,
            time_format: "%H:%M:%S".to_string(),
        }
    }
}

/// Fixed service-health figures shown in the footer.
pub const SYSTEM_STATUS: &str = "Operational";
pub const LATENCY_MS: u32 = 42;
pub const UPTIME_PCT: f64 = 99.97;

/// Header / footer status line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamStatus {
    pub streaming:       bool,
    pub epoch:           u64,
    pub points:          usize,
    /// `points` with thousands separators.
    pub points_text:     String,
    pub timeframe:       Timeframe,
    pub timeframe_label: &'static str,
    pub metric:          Metric,
    /// Local time of this frame.
    pub last_updated:    String,
    pub system_status:   &'static str,
    pub latency_ms:      u32,
    pub uptime_pct:      f64,
}

/// Heatmap plus its axis labels and colour domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapView {
    pub days:  [&'static str; 7],
    pub max:   f64,
    pub cells: Vec<HeatCell>,
}

impl From<Heatmap> for HeatmapView {
    fn from(heatmap: Heatmap) -> Self {
        Self {
            days:  HEATMAP_DAYS,
            max:   HEATMAP_MAX,
            cells: heatmap.cells,
        }
    }
}

/// One complete snapshot of every dashboard view, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub generated_at: i64,
    pub status:       StreamStatus,
    pub cards:        [MetricCard; 4],
    pub timeline:     Timeline,
    pub devices:      &'static [DeviceShare],
    pub regions:      RegionalSummary,
    pub heatmap:      HeatmapView,
    pub table:        Vec<TableRow>,
}

impl Frame {
    /// Snapshot `dashboard`.  The heatmap is passed in because drawing it
    /// consumes randomness from the dashboard's generator.
    pub fn build<R, C: Clock>(
        dashboard: &Dashboard<R, C>,
        heatmap: Heatmap,
        options: &FrameOptions,
    ) -> Self {
        let now = dashboard.now_ms();
        let timeframe = dashboard.selected_timeframe();
        let metric = dashboard.selected_metric();
        let points = dashboard.buffer_length();

        let status = StreamStatus {
            streaming:       dashboard.is_streaming(),
            epoch:           dashboard.epoch(),
            points,
            points_text:     group_thousands(points as u64),
            timeframe,
            timeframe_label: timeframe.label(),
            metric,
            last_updated:    local_label(now, &options.time_format),
            system_status:   SYSTEM_STATUS,
            latency_ms:      LATENCY_MS,
            uptime_pct:      UPTIME_PCT,
        };

        Self {
            generated_at: now,
            status,
            cards:    metric_cards(&dashboard.current_metrics()),
            timeline: Timeline::build(dashboard.selected_window(), metric, timeframe, &options.time_format),
            devices:  &DEVICE_DISTRIBUTION,
            regions:  RegionalSummary::default(),
            heatmap:  heatmap.into(),
            table:    live_rows(dashboard.selected_window(), options.table_rows, &options.time_format),
        }
    }
}

/// Format a millisecond timestamp as local time; empty if out of range.
fn local_label(ms: i64, format: &str) -> String {
    Local
        .timestamp_millis_opt(ms)
        .single()
        .map(|t| t.format(format).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_stream::{DashboardSettings, ManualClock, SampleGenerator};

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn frame_reflects_dashboard_state() {
        let settings = DashboardSettings { capacity: 500, ..DashboardSettings::default() };
        let (mut dash, _rx) =
            Dashboard::new(settings, SampleGenerator::from_seed(Some(1)), ManualClock::new(NOW));
        dash.seed_history();
        let heatmap = dash.heatmap();

        let frame = Frame::build(&dash, heatmap, &FrameOptions::default());

        assert_eq!(frame.generated_at, NOW);
        assert!(!frame.status.streaming);
        assert_eq!(frame.status.points, 500);
        assert_eq!(frame.status.points_text, "500");
        assert_eq!(frame.status.timeframe, Timeframe::OneHour);
        assert_eq!(frame.timeline.points.len(), 60);
        assert_eq!(frame.table.len(), 10);
        assert_eq!(frame.table[0].timestamp, NOW - 60_000);
        assert_eq!(frame.heatmap.cells.len(), 168);
        assert_eq!(frame.devices.len(), 3);
        assert_eq!(frame.regions.rows.len(), 5);
        assert_eq!(frame.status.system_status, "Operational");
        assert_eq!(frame.status.latency_ms, 42);
        assert_eq!(frame.status.uptime_pct, 99.97);
    }

    #[test]
    fn empty_dashboard_frame() {
        let (mut dash, _rx) = Dashboard::new(
            DashboardSettings::default(),
            SampleGenerator::from_seed(Some(2)),
            ManualClock::new(NOW),
        );
        let heatmap = dash.heatmap();
        let options = FrameOptions { table_rows: 5, ..FrameOptions::default() };

        let frame = Frame::build(&dash, heatmap, &options);
        assert!(frame.timeline.is_empty());
        assert!(frame.table.is_empty());
        assert_eq!(frame.cards[0].value, "1,247,832");
    }
}
