use pulse_core::{Metric, Sample, Timeframe};
use serde::Serialize;

/// One labelled point on the activity timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    pub timestamp: i64,
    /// Local wall-clock label, e.g. `"14:03:27"`.
    pub time:      String,
    pub value:     f64,
}

/// Selected metric over the selected timeframe, ready to chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    pub metric:    Metric,
    pub timeframe: Timeframe,
    pub points:    Vec<TimelinePoint>,
    pub min:       f64,
    pub max:       f64,
    pub mean:      f64,
}

impl Timeline {
    /// Project `window` onto `metric`, labelling each point with
    /// `time_format` (`strftime` syntax) in local time.
    pub fn build<'a>(
        window: impl IntoIterator<Item = &'a Sample>,
        metric: Metric,
        timeframe: Timeframe,
        time_format: &str,
    ) -> Self {
        let points: Vec<TimelinePoint> = window
            .into_iter()
            .map(|s| TimelinePoint {
                timestamp: s.timestamp,
                time:      s.local_time().format(time_format).to_string(),
                value:     s.value(metric),
            })
            .collect();

        let (min, max, mean) = summarize(points.iter().map(|p| p.value));
        Self { metric, timeframe, points, min, max, mean }
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// `(min, max, mean)`; all zero for an empty series.
fn summarize(values: impl Iterator<Item = f64>) -> (f64, f64, f64) {
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        count += 1;
        sum += v;
        min = min.min(v);
        max = max.max(v);
    }
    if count == 0 {
        return (0.0, 0.0, 0.0);
    }
    (min, max, sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(ts: i64, users: u32) -> Sample {
        Sample {
            timestamp:     ts,
            users,
            revenue:       1_000.0,
            connections:   100,
            throughput:    500,
            errors:        0,
            response_time: 50.0,
        }
    }

    #[test]
    fn projects_selected_metric_in_order() {
        let samples = [sample(0, 10), sample(60_000, 30), sample(120_000, 20)];
        let timeline = Timeline::build(&samples, Metric::Users, Timeframe::OneHour, "%H:%M");

        assert_eq!(timeline.values(), vec![10.0, 30.0, 20.0]);
        assert_eq!(timeline.min, 10.0);
        assert_eq!(timeline.max, 30.0);
        assert_eq!(timeline.mean, 20.0);
        assert_eq!(timeline.points[1].timestamp, 60_000);
        assert_eq!(timeline.points[1].time.len(), 5);
    }

    #[test]
    fn empty_window_is_empty_timeline() {
        let empty: [Sample; 0] = [];
        let timeline = Timeline::build(&empty, Metric::Revenue, Timeframe::SixHours, "%H:%M:%S");
        assert!(timeline.is_empty());
        assert_eq!((timeline.min, timeline.max, timeline.mean), (0.0, 0.0, 0.0));
    }
}
