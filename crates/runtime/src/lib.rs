//! Terminal front-end for `pulse`.
//!
//! Owns the event loop and wires together all background tasks:
//! - Stream ticker (spawned by the dashboard while streaming)
//! - Stdin command stream
//! - Ctrl-C and the optional `run_for_secs` deadline

pub mod input;

use pulse_config::{default_path, load as load_config};
use pulse_core::{Message, Result};
use pulse_renderer::Renderer;
use pulse_stream::{Applied, Clock, Dashboard};
use pulse_widgets::Frame;
use rand::Rng;
use std::future::Future;
use std::io::{self, BufWriter, Write};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Run the dashboard until `quit`, ctrl-c, stdin EOF (when configured) or the
/// `run_for_secs` deadline.
pub async fn run() -> Result<()> {
    let config = load_config(default_path())?;

    let (mut dashboard, mut rx) = Dashboard::from_config(&config);
    if config.stream.backfill {
        dashboard.seed_history();
    }
    if config.stream.autostart {
        dashboard.start();
    }

    let _input = input::spawn_commands(
        tokio::io::stdin(),
        dashboard.sender(),
        config.display.exit_on_eof,
    );

    let mut app = App::new(
        dashboard,
        Renderer::from_config(&config),
        config.display.render_every,
        BufWriter::new(io::stdout()),
    );
    app.emit()?;

    let run_for = config.display.run_for_secs.map(Duration::from_secs);
    app.event_loop(&mut rx, shutdown_signal(run_for)).await
}

// ── App ───────────────────────────────────────────────────────────────────────

/// The dashboard plus its output sink.
pub struct App<R, C, W> {
    dashboard:    Dashboard<R, C>,
    renderer:     Renderer,
    /// Emit a frame after this many applied ticks.
    render_every: u32,
    since_render: u32,
    frames:       u64,
    out:          W,
}

impl<R: Rng, C: Clock, W: Write> App<R, C, W> {
    pub fn new(dashboard: Dashboard<R, C>, renderer: Renderer, render_every: u32, out: W) -> Self {
        Self {
            dashboard,
            renderer,
            render_every: render_every.max(1),
            since_render: 0,
            frames:       0,
            out,
        }
    }

    /// Drain the event bus until a `Shutdown` arrives or `stop` resolves,
    /// then stop streaming and emit a final frame.
    pub async fn event_loop<F>(&mut self, rx: &mut mpsc::Receiver<Message>, stop: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(stop);

        loop {
            tokio::select! {
                msg = rx.recv() => match msg {
                    Some(Message::Shutdown) => {
                        info!("Shutdown requested");
                        break;
                    }
                    Some(msg) => self.handle(msg)?,
                    None => break,
                },
                () = &mut stop => break,
            }
        }

        self.shutdown()
    }

    /// Apply one message and emit a frame when it is due.
    pub fn handle(&mut self, msg: Message) -> Result<()> {
        let render_requested = msg == Message::Render;

        match self.dashboard.update(msg) {
            Applied::Ticked => {
                self.since_render += 1;
                if self.since_render >= self.render_every {
                    self.emit()?;
                }
            }
            Applied::Changed => self.emit()?,
            Applied::Ignored if render_requested => self.emit()?,
            Applied::Ignored => {}
        }
        Ok(())
    }

    /// Render the current state to the output sink.
    pub fn emit(&mut self) -> Result<()> {
        let heatmap = self.dashboard.heatmap();
        let frame = Frame::build(&self.dashboard, heatmap, &self.renderer.frame_options());
        let rendered = self.renderer.render(&frame)?;

        writeln!(self.out, "{rendered}")?;
        self.out.flush()?;

        self.since_render = 0;
        self.frames += 1;
        debug!(frames = self.frames, points = frame.status.points, "frame emitted");
        Ok(())
    }

    /// Stop the ticker and emit a last frame.
    pub fn shutdown(&mut self) -> Result<()> {
        self.dashboard.stop();
        self.emit()?;
        info!(
            frames = self.frames,
            ticks = self.dashboard.ticks(),
            "pulse stopped"
        );
        Ok(())
    }
}

impl<R, C, W> App<R, C, W> {
    pub fn dashboard(&self) -> &Dashboard<R, C> {
        &self.dashboard
    }

    /// Frames written so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Resolves on ctrl-c or once `run_for` has elapsed.
async fn shutdown_signal(run_for: Option<Duration>) {
    let deadline = async {
        match run_for {
            Some(limit) => {
                tokio::time::sleep(limit).await;
                info!("Run time of {}s elapsed", limit.as_secs());
            }
            None => std::future::pending::<()>().await,
        }
    };
    tokio::pin!(deadline);

    tokio::select! {
        res = tokio::signal::ctrl_c() => match res {
            Ok(()) => info!("Ctrl-C received"),
            Err(e) => {
                error!("Cannot listen for ctrl-c: {e}");
                deadline.await;
            }
        },
        () = &mut deadline => {}
    }
}
