pub mod error;
pub mod event;
pub mod state;

pub use error::{PulseError, Result};
pub use event::{Command, Message};
pub use state::{Metric, MetricsCounters, Sample, Timeframe};
