pub mod colors;
pub mod style;

pub use colors::{Color, VIRIDIS};
pub use style::{paint, paint_bold, Role};

use pulse_config::ThemeConfig;

/// Compiled theme derived from [`ThemeConfig`].
///
/// All colors are pre-parsed from hex strings.  Calling
/// [`Theme::from_config`] is infallible: invalid color strings fall back to
/// safe defaults.
#[derive(Debug, Clone)]
pub struct Theme {
    /// When `false`, text output carries no ANSI escapes.
    pub color:       bool,
    pub foreground:  Color,
    pub muted:       Color,
    pub accent:      Color,
    pub success:     Color,
    pub warning:     Color,
    pub danger:      Color,
    /// `strftime` format for sample timestamps.
    pub time_format: String,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        Self {
            color:       cfg.color,
            foreground:  Color::from_hex(&cfg.foreground).unwrap_or(Color::WHITE),
            muted:       Color::from_hex(&cfg.muted).unwrap_or(Color::GRAY),
            accent:      Color::from_hex(&cfg.accent).unwrap_or(Color::VIOLET),
            success:     Color::from_hex(&cfg.success).unwrap_or(Color::GREEN),
            warning:     Color::from_hex(&cfg.warning).unwrap_or(Color::YELLOW),
            danger:      Color::from_hex(&cfg.danger).unwrap_or(Color::RED),
            time_format: cfg.time_format.clone(),
        }
    }

    /// Resolve a semantic role to a concrete colour.
    pub fn color_for(&self, role: Role) -> Color {
        match role {
            Role::Foreground => self.foreground,
            Role::Muted      => self.muted,
            Role::Accent     => self.accent,
            Role::Success    => self.success,
            Role::Warning    => self.warning,
            Role::Danger     => self.danger,
        }
    }

    /// Paint `text` with the colour for `role`.
    pub fn paint(&self, text: &str, role: Role) -> String {
        paint(text, self.color_for(role), self.color)
    }

    /// Bold variant of [`Theme::paint`].
    pub fn paint_bold(&self, text: &str, role: Role) -> String {
        paint_bold(text, self.color_for(role), self.color)
    }

    /// Viridis colour for a heatmap cell over the domain `[0, max]`.
    /// Values outside the domain take the end colours.
    pub fn heat(&self, value: f64, max: f64) -> Color {
        let t = if max > 0.0 { value / max } else { 0.0 };
        Color::viridis(t)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_hex_falls_back() {
        let cfg = ThemeConfig {
            accent: "not-a-colour".into(),
            ..ThemeConfig::default()
        };
        assert_eq!(Theme::from_config(&cfg).accent, Color::VIOLET);
    }

    #[test]
    fn heat_follows_viridis_domain() {
        let theme = Theme::default();
        assert_eq!(theme.heat(-30.0, 130.0), VIRIDIS[0]);
        assert_eq!(theme.heat(65.0, 130.0), VIRIDIS[4]);
        assert_eq!(theme.heat(130.0, 130.0), VIRIDIS[8]);
        assert_eq!(theme.heat(10.0, 0.0), VIRIDIS[0]);
    }

    #[test]
    fn colourless_theme_paints_plain_text() {
        let cfg = ThemeConfig { color: false, ..ThemeConfig::default() };
        let theme = Theme::from_config(&cfg);
        assert_eq!(theme.paint("Live", Role::Accent), "Live");
    }
}
