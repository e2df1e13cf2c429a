use crate::colors::Color;

/// Semantic colour slot used by the text renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Foreground,
    Muted,
    Accent,
    Success,
    Warning,
    Danger,
}

/// ANSI reset sequence.
pub const RESET: &str = "\x1b[0m";
/// ANSI bold.
pub const BOLD: &str = "\x1b[1m";

/// Wrap `text` in a 24-bit foreground colour, or return it unchanged when
/// colour output is disabled.
pub fn paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        format!("{}{text}{RESET}", color.ansi_fg())
    } else {
        text.to_string()
    }
}

/// Like [`paint`] but bold.
pub fn paint_bold(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        format!("{BOLD}{}{text}{RESET}", color.ansi_fg())
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_paint_is_plain() {
        assert_eq!(paint("ok", Color::GREEN, false), "ok");
    }

    #[test]
    fn enabled_paint_wraps_in_escapes() {
        let s = paint("ok", Color::GREEN, true);
        assert!(s.starts_with("\x1b[38;2;74;222;128m"));
        assert!(s.ends_with(RESET));
    }
}
