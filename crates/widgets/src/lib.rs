//! Display-ready projections of the dashboard state.
//!
//! Every view here is plain data (`Serialize`), so any renderer can consume
//! it: the text printer in `pulse-renderer`, a JSON consumer, or a GUI.

pub mod cards;
pub mod devices;
pub mod format;
pub mod frame;
pub mod regions;
pub mod table;
pub mod timeline;

pub use cards::{metric_cards, MetricCard, Tone};
pub use devices::{DeviceShare, DEVICE_DISTRIBUTION};
pub use frame::{
    Frame, FrameOptions, HeatmapView, StreamStatus, LATENCY_MS, SYSTEM_STATUS, UPTIME_PCT,
};
pub use regions::{Region, RegionRow, RegionalSummary, REGIONS};
pub use table::{live_rows, Severity, TableRow, TABLE_HEADERS};
pub use timeline::{Timeline, TimelinePoint};
