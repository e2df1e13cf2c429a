use crate::state::{Metric, Timeframe};

/// All messages (events) that can flow through the application event bus.
///
/// Sources:
/// - Ticker task           → `Tick`
/// - Stdin command stream  → stream controls, selections, `Render`, `Shutdown`
/// - Signal handler        → `Shutdown`
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // ── Ticker ────────────────────────────────────────────────────────────────
    /// One scheduled generate-and-append cycle.  `epoch` identifies the
    /// streaming session that scheduled it; ticks from an older session are
    /// dropped.
    Tick { epoch: u64 },

    // ── Stream controls ───────────────────────────────────────────────────────
    StartStream,
    StopStream,
    ToggleStream,

    // ── Selections ────────────────────────────────────────────────────────────
    /// Timeframe selector changed.
    SelectTimeframe(Timeframe),
    /// Timeline metric selector changed.
    SelectMetric(Metric),

    // ── Internal ──────────────────────────────────────────────────────────────
    /// Emit a frame immediately.
    Render,
    /// Graceful shutdown requested.
    Shutdown,
}

/// A line typed on the command input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Start,
    Stop,
    Toggle,
    Timeframe(Timeframe),
    Metric(Metric),
    Render,
    Quit,
    /// Blank line.
    Empty,
    /// Anything we don't recognise; carries the raw line for the warning.
    Unknown(String),
}

impl Command {
    /// Parse one input line.  Matching is case-insensitive.
    pub fn parse(line: &str) -> Self {
        let word = line.trim();
        if word.is_empty() {
            return Self::Empty;
        }

        match word.to_ascii_lowercase().as_str() {
            "start" | "play"        => Self::Start,
            "stop" | "pause"        => Self::Stop,
            "s" | "toggle"          => Self::Toggle,
            "r" | "render"          => Self::Render,
            "q" | "quit" | "exit"   => Self::Quit,
            _ => {
                if let Ok(tf) = word.parse::<Timeframe>() {
                    Self::Timeframe(tf)
                } else if let Ok(metric) = word.parse::<Metric>() {
                    Self::Metric(metric)
                } else {
                    Self::Unknown(word.to_string())
                }
            }
        }
    }

    /// Map the command onto the event bus, filtering out no-op input.
    pub fn into_message(self) -> Option<Message> {
        match self {
            Self::Start          => Some(Message::StartStream),
            Self::Stop           => Some(Message::StopStream),
            Self::Toggle         => Some(Message::ToggleStream),
            Self::Timeframe(tf)  => Some(Message::SelectTimeframe(tf)),
            Self::Metric(metric) => Some(Message::SelectMetric(metric)),
            Self::Render         => Some(Message::Render),
            Self::Quit           => Some(Message::Shutdown),
            Self::Empty | Self::Unknown(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_stream_controls() {
        assert_eq!(Command::parse("start"), Command::Start);
        assert_eq!(Command::parse("  STOP "), Command::Stop);
        assert_eq!(Command::parse("s"), Command::Toggle);
    }

    #[test]
    fn parse_selections() {
        assert_eq!(Command::parse("24h"), Command::Timeframe(Timeframe::TwentyFourHours));
        assert_eq!(Command::parse("revenue"), Command::Metric(Metric::Revenue));
    }

    #[test]
    fn parse_unknown_line() {
        let cmd = Command::parse("explode");
        assert!(matches!(cmd, Command::Unknown(ref raw) if raw == "explode"));
        assert_eq!(cmd.into_message(), None);
    }

    #[test]
    fn quit_maps_to_shutdown() {
        assert_eq!(Command::parse("q").into_message(), Some(Message::Shutdown));
        assert_eq!(Command::parse("").into_message(), None);
    }
}
