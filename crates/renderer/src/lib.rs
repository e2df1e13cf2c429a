//! Turns dashboard [`Frame`]s into output.
//!
//! Two formats are supported:
//! - `text`: a themed, multi-line terminal snapshot
//! - `json`: one compact JSON object per frame, newline-delimited

pub mod sparkline;
pub mod text;

use pulse_config::{OutputFormat, PulseConfig};
use pulse_core::{PulseError, Result};
use pulse_theme::Theme;
use pulse_widgets::{Frame, FrameOptions};

/// Output settings resolved from the configuration.
#[derive(Debug, Clone)]
pub struct Renderer {
    pub format:          OutputFormat,
    pub theme:           Theme,
    pub sparkline_width: usize,
    pub table_rows:      usize,
}

impl Renderer {
    /// Build a [`Renderer`] from the loaded configuration.
    pub fn from_config(config: &PulseConfig) -> Self {
        Self {
            format:          config.display.format,
            theme:           Theme::from_config(&config.theme),
            sparkline_width: config.display.sparkline_width,
            table_rows:      config.display.table_rows,
        }
    }

    /// Options for [`Frame::build`] matching this renderer.
    pub fn frame_options(&self) -> FrameOptions {
        FrameOptions {
            table_rows:  self.table_rows,
            time_format: self.theme.time_format.clone(),
        }
    }

    /// Render one frame in the configured format.  JSON output carries no
    /// trailing newline.
    pub fn render(&self, frame: &Frame) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(text::render_text(frame, &self.theme, self.sparkline_width)),
            OutputFormat::Json => serde_json::to_string(frame)
                .map_err(|e| PulseError::Render(format!("cannot encode frame: {e}"))),
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::from_config(&PulseConfig::default())
    }
}
