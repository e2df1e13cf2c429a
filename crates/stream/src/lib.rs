//! Synthetic metric stream: sample generation, the bounded history buffer,
//! the cancellable ticker and the [`Dashboard`] context that ties them
//! together.

pub mod buffer;
pub mod clock;
pub mod dashboard;
pub mod generator;
pub mod ticker;

pub use buffer::{metric_series, StreamBuffer, Window, DEFAULT_CAPACITY};
pub use clock::{Clock, ManualClock, SystemClock};
pub use dashboard::{Applied, Dashboard, DashboardSettings};
pub use generator::{HeatCell, Heatmap, Modulation, SampleGenerator, HEATMAP_DAYS, HEATMAP_MAX};
pub use ticker::Ticker;
