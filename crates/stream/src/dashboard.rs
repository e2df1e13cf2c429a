use crate::buffer::{StreamBuffer, Window, DEFAULT_CAPACITY};
use crate::clock::{Clock, SystemClock};
use crate::generator::{Heatmap, SampleGenerator};
use crate::ticker::Ticker;
use pulse_config::PulseConfig;
use pulse_core::{Message, Metric, MetricsCounters, Sample, Timeframe};
use rand::{rngs::StdRng, Rng};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, trace};

/// Capacity of the event bus shared by the ticker and input sources.
const BUS_CAPACITY: usize = 64;

/// Construction parameters for a [`Dashboard`].
#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub capacity:            usize,
    pub tick_period:         Duration,
    pub backfill_spacing_ms: i64,
    pub counters:            MetricsCounters,
    pub timeframe:           Timeframe,
    pub metric:              Metric,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            capacity:            DEFAULT_CAPACITY,
            tick_period:         Duration::from_millis(1_000),
            backfill_spacing_ms: 60_000,
            counters:            MetricsCounters::default(),
            timeframe:           Timeframe::default(),
            metric:              Metric::default(),
        }
    }
}

impl From<&PulseConfig> for DashboardSettings {
    fn from(config: &PulseConfig) -> Self {
        Self {
            capacity:            config.stream.capacity,
            tick_period:         Duration::from_millis(config.stream.tick_interval_ms),
            backfill_spacing_ms: i64::try_from(config.stream.backfill_spacing_ms).unwrap_or(i64::MAX),
            counters:            MetricsCounters::from(&config.counters),
            timeframe:           config.display.timeframe,
            metric:              config.display.metric,
        }
    }
}

/// What [`Dashboard::update`] did with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// A tick generated and appended one sample.
    Ticked,
    /// Streaming state or a selection changed.
    Changed,
    /// Nothing happened: stale tick, redundant control, or a message the
    /// dashboard does not own (`Render`, `Shutdown`).
    Ignored,
}

/// Owned dashboard state: the stream buffer, headline counters, selections,
/// and the streaming toggle with its ticker.
///
/// There is exactly one mutator.  The ticker task only *sends* tick messages;
/// the event loop that owns the dashboard applies them through
/// [`Dashboard::update`], one at a time, so readers always observe a whole
/// tick or none of it.
pub struct Dashboard<R = StdRng, C = SystemClock> {
    generator:    SampleGenerator<R>,
    clock:        C,
    buffer:       StreamBuffer,
    counters:     MetricsCounters,
    settings:     DashboardSettings,
    timeframe:    Timeframe,
    metric:       Metric,
    /// Streaming session counter; bumped on every start.
    epoch:        u64,
    ticker:       Option<Ticker>,
    tx:           mpsc::Sender<Message>,
    ticks:        u64,
}

impl Dashboard<StdRng, SystemClock> {
    /// Build a dashboard from the loaded configuration.
    pub fn from_config(config: &PulseConfig) -> (Self, mpsc::Receiver<Message>) {
        Self::new(
            DashboardSettings::from(config),
            SampleGenerator::from_seed(config.stream.seed),
            SystemClock,
        )
    }
}

impl<R: Rng, C: Clock> Dashboard<R, C> {
    /// Create an empty, stopped dashboard.  Returns the receiving end of the
    /// event bus; the owner of the dashboard should drain it and feed every
    /// message back into [`Dashboard::update`].
    pub fn new(
        settings: DashboardSettings,
        generator: SampleGenerator<R>,
        clock: C,
    ) -> (Self, mpsc::Receiver<Message>) {
        let (tx, rx) = mpsc::channel(BUS_CAPACITY);
        let dashboard = Self {
            generator,
            clock,
            buffer:    StreamBuffer::new(settings.capacity),
            counters:  settings.counters,
            timeframe: settings.timeframe,
            metric:    settings.metric,
            settings,
            epoch:     0,
            ticker:    None,
            tx,
            ticks:     0,
        };
        (dashboard, rx)
    }

    /// Another handle onto the event bus, for input sources.
    pub fn sender(&self) -> mpsc::Sender<Message> {
        self.tx.clone()
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    /// Replace the buffer contents with `capacity` historical samples spaced
    /// `backfill_spacing_ms` apart, the newest one spacing before now.
    pub fn seed_history(&mut self) {
        let now      = self.clock.now_ms();
        let capacity = self.buffer.capacity();
        let spacing  = self.settings.backfill_spacing_ms;

        self.buffer.clear();
        for i in 0..capacity {
            let steps_back = (capacity - i) as i64;
            let t = now.saturating_sub(steps_back.saturating_mul(spacing));
            self.buffer.append(self.generator.historical(t));
        }

        info!(samples = self.buffer.len(), spacing_ms = spacing, "history backfilled");
    }

    /// Start the tick producer.  No-op while already streaming.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&mut self) {
        if self.is_streaming() {
            debug!(epoch = self.epoch, "start ignored: already streaming");
            return;
        }

        self.epoch += 1;
        self.ticker = Some(Ticker::spawn(self.settings.tick_period, self.epoch, self.tx.clone()));
        info!(
            epoch = self.epoch,
            period_ms = self.settings.tick_period.as_millis() as u64,
            "stream started"
        );
    }

    /// Stop the tick producer.  Always clears the ticker handle; calling it
    /// while stopped is a no-op.
    pub fn stop(&mut self) {
        match self.ticker.take() {
            Some(ticker) => {
                ticker.cancel();
                info!(epoch = ticker.epoch(), ticks = self.ticks, "stream stopped");
            }
            None => debug!("stop ignored: not streaming"),
        }
    }

    /// Flip between streaming and paused.
    pub fn toggle(&mut self) {
        if self.is_streaming() {
            self.stop();
        } else {
            self.start();
        }
    }

    // ── Mutation ──────────────────────────────────────────────────────────────

    /// Generate one sample, append it, and update the counters.
    ///
    /// The timestamp handed to the generator never goes backwards, even if
    /// the wall clock does.
    pub fn tick(&mut self) -> Sample {
        let now = self.clock.now_ms();
        let t = match self.buffer.latest() {
            Some(last) => now.max(last.timestamp),
            None       => now,
        };

        let sample = self.generator.generate(t);
        self.buffer.append(sample);

        let (user_delta, revenue_delta) = self.generator.counter_drift();
        self.counters.apply_tick(user_delta, revenue_delta, &sample);
        self.ticks += 1;

        trace!(
            timestamp = sample.timestamp,
            users = sample.users,
            buffered = self.buffer.len(),
            "tick applied"
        );
        sample
    }

    /// Apply one event-bus message.
    pub fn update(&mut self, message: Message) -> Applied {
        match message {
            Message::Tick { epoch } => {
                if !self.is_streaming() || epoch != self.epoch {
                    trace!(epoch, current = self.epoch, "dropping stale tick");
                    return Applied::Ignored;
                }
                self.tick();
                Applied::Ticked
            }
            Message::StartStream => {
                if self.is_streaming() {
                    return Applied::Ignored;
                }
                self.start();
                Applied::Changed
            }
            Message::StopStream => {
                if !self.is_streaming() {
                    return Applied::Ignored;
                }
                self.stop();
                Applied::Changed
            }
            Message::ToggleStream => {
                self.toggle();
                Applied::Changed
            }
            Message::SelectTimeframe(timeframe) => {
                if timeframe == self.timeframe {
                    return Applied::Ignored;
                }
                self.timeframe = timeframe;
                info!(%timeframe, "timeframe selected");
                Applied::Changed
            }
            Message::SelectMetric(metric) => {
                if metric == self.metric {
                    return Applied::Ignored;
                }
                self.metric = metric;
                info!(%metric, "metric selected");
                Applied::Changed
            }
            Message::Render | Message::Shutdown => Applied::Ignored,
        }
    }

    /// Draw a fresh synthetic heatmap from the dashboard's random source.
    pub fn heatmap(&mut self) -> Heatmap {
        self.generator.heatmap()
    }
}

impl<R, C: Clock> Dashboard<R, C> {
    /// Current wall-clock reading.
    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }
}

impl<R, C> Dashboard<R, C> {
    // ── Reads ─────────────────────────────────────────────────────────────────

    /// Ordered samples for `timeframe`.
    pub fn current_window(&self, timeframe: Timeframe) -> Window<'_> {
        self.buffer.timeframe(timeframe)
    }

    /// Ordered samples for the selected timeframe.
    pub fn selected_window(&self) -> Window<'_> {
        self.current_window(self.timeframe)
    }

    pub fn current_metrics(&self) -> MetricsCounters {
        self.counters
    }

    pub fn buffer_length(&self) -> usize {
        self.buffer.len()
    }

    pub fn buffer(&self) -> &StreamBuffer {
        &self.buffer
    }

    pub fn is_streaming(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Ticks applied since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn selected_timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn selected_metric(&self) -> Metric {
        self.metric
    }

    pub fn tick_period(&self) -> Duration {
        self.settings.tick_period
    }
}

impl<R, C> std::fmt::Debug for Dashboard<R, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("buffered", &self.buffer.len())
            .field("counters", &self.counters)
            .field("timeframe", &self.timeframe)
            .field("metric", &self.metric)
            .field("epoch", &self.epoch)
            .field("streaming", &self.ticker.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::metric_series;
    use crate::clock::ManualClock;
    use tokio::time;

    const NOW: i64 = 1_700_000_000_000;
    const PERIOD: Duration = Duration::from_millis(1_000);

    type TestDashboard = Dashboard<StdRng, ManualClock>;

    fn dashboard(capacity: usize) -> (TestDashboard, mpsc::Receiver<Message>, ManualClock) {
        let clock = ManualClock::new(NOW);
        let settings = DashboardSettings {
            capacity,
            tick_period: PERIOD,
            ..DashboardSettings::default()
        };
        let (dash, rx) = Dashboard::new(settings, SampleGenerator::from_seed(Some(11)), clock.clone());
        (dash, rx, clock)
    }

    /// Apply everything the bus delivers until it has been quiet for `quiet`.
    async fn drain(dash: &mut TestDashboard, rx: &mut mpsc::Receiver<Message>, quiet: Duration) -> Vec<Applied> {
        let mut applied = Vec::new();
        while let Ok(Some(message)) = time::timeout(quiet, rx.recv()).await {
            applied.push(dash.update(message));
        }
        applied
    }

    #[test]
    fn seed_history_fills_capacity_at_minute_spacing() {
        let (mut dash, _rx, _clock) = dashboard(1_000);
        dash.seed_history();

        assert_eq!(dash.buffer_length(), 1_000);
        let window: Vec<&Sample> = dash.buffer().window(1_000).collect();
        assert_eq!(window[0].timestamp, NOW - 1_000 * 60_000);
        assert_eq!(window[999].timestamp, NOW - 60_000);
        assert!(window.windows(2).all(|w| w[1].timestamp - w[0].timestamp == 60_000));
    }

    #[test]
    fn seeding_twice_does_not_duplicate() {
        let (mut dash, _rx, _clock) = dashboard(50);
        dash.seed_history();
        dash.seed_history();
        assert_eq!(dash.buffer_length(), 50);
    }

    #[test]
    fn fill_then_evict_scenario() {
        let (mut dash, _rx, clock) = dashboard(1_000);
        for _ in 0..1_000 {
            clock.advance(1_000);
            dash.tick();
        }
        assert_eq!(dash.buffer_length(), 1_000);
        let oldest = *dash.buffer().oldest().unwrap();

        clock.advance(1_000);
        dash.tick();
        assert_eq!(dash.buffer_length(), 1_000);
        assert!(dash.current_window(Timeframe::TwentyFourHours).all(|s| *s != oldest));
        assert!(dash.buffer().window(1_000).all(|s| s.timestamp > oldest.timestamp));
    }

    #[test]
    fn one_hour_window_is_last_sixty() {
        let (mut dash, _rx, _clock) = dashboard(1_000);
        dash.seed_history();

        let all: Vec<Sample> = dash.buffer().window(1_000).copied().collect();
        let hour: Vec<Sample> = dash.current_window(Timeframe::OneHour).copied().collect();
        assert_eq!(hour.len(), 60);
        assert_eq!(hour.as_slice(), &all[940..]);
    }

    #[test]
    fn timestamps_never_go_backwards() {
        let (mut dash, _rx, clock) = dashboard(10);
        dash.tick();
        clock.advance(-5_000);
        let second = dash.tick();
        assert_eq!(second.timestamp, NOW);

        clock.advance(10_000);
        assert_eq!(dash.tick().timestamp, NOW + 5_000);
    }

    #[test]
    fn tick_mirrors_latest_sample_into_counters() {
        let (mut dash, _rx, _clock) = dashboard(10);
        let before = dash.current_metrics();
        let sample = dash.tick();
        let after = dash.current_metrics();

        assert_eq!(after.active_connections, u64::from(sample.connections));
        assert_eq!(after.throughput, u64::from(sample.throughput));
        let drift = after.total_users as i64 - before.total_users as i64;
        assert!((-5..5).contains(&drift));
        assert!((after.revenue - before.revenue).abs() <= 50.0);
    }

    #[test]
    fn stop_when_stopped_is_a_noop() {
        let (mut dash, _rx, _clock) = dashboard(10);
        dash.stop();
        dash.stop();
        assert!(!dash.is_streaming());
        assert_eq!(dash.update(Message::StopStream), Applied::Ignored);
    }

    #[test]
    fn selections_change_the_window() {
        let (mut dash, _rx, _clock) = dashboard(1_000);
        dash.seed_history();

        assert_eq!(dash.update(Message::SelectTimeframe(Timeframe::SixHours)), Applied::Changed);
        assert_eq!(dash.selected_window().len(), 360);
        assert_eq!(dash.update(Message::SelectTimeframe(Timeframe::SixHours)), Applied::Ignored);

        assert_eq!(dash.update(Message::SelectMetric(Metric::Revenue)), Applied::Changed);
        let series = metric_series(dash.selected_window(), dash.selected_metric());
        assert_eq!(series.len(), 360);
    }

    #[test]
    fn ticks_are_ignored_while_stopped() {
        let (mut dash, _rx, _clock) = dashboard(10);
        assert_eq!(dash.update(Message::Tick { epoch: 0 }), Applied::Ignored);
        assert_eq!(dash.buffer_length(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_drives_appends_while_streaming() {
        let (mut dash, mut rx, _clock) = dashboard(10);
        dash.start();
        assert!(dash.is_streaming());

        for expected in 1..=3 {
            let message = rx.recv().await.unwrap();
            assert_eq!(dash.update(message), Applied::Ticked);
            assert_eq!(dash.buffer_length(), expected);
        }
        dash.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn no_append_after_stop() {
        let (mut dash, mut rx, _clock) = dashboard(100);
        dash.start();

        let message = rx.recv().await.unwrap();
        dash.update(message);
        assert_eq!(dash.buffer_length(), 1);

        // Let a few more ticks queue up unprocessed, then stop.
        time::advance(PERIOD * 3).await;
        tokio::task::yield_now().await;
        dash.stop();

        // Queued ticks are dropped and nothing new arrives, however long we wait.
        let applied = drain(&mut dash, &mut rx, PERIOD * 10).await;
        assert!(applied.iter().all(|a| *a == Applied::Ignored));
        time::advance(PERIOD * 50).await;
        let applied = drain(&mut dash, &mut rx, PERIOD * 10).await;
        assert!(applied.is_empty());
        assert_eq!(dash.buffer_length(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_ignores_ticks_from_previous_session() {
        let (mut dash, _rx, _clock) = dashboard(10);
        dash.start();
        let first = dash.epoch();
        dash.stop();
        dash.start();

        assert_eq!(dash.update(Message::Tick { epoch: first }), Applied::Ignored);
        assert_eq!(dash.update(Message::Tick { epoch: dash.epoch() }), Applied::Ticked);
        assert_eq!(dash.buffer_length(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_round_trip() {
        let (mut dash, _rx, _clock) = dashboard(10);
        assert_eq!(dash.update(Message::ToggleStream), Applied::Changed);
        assert!(dash.is_streaming());
        assert_eq!(dash.update(Message::StartStream), Applied::Ignored);
        assert_eq!(dash.update(Message::ToggleStream), Applied::Changed);
        assert!(!dash.is_streaming());
    }
}
