/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const GRAY:   Self = Self { r: 0x9c, g: 0xa3, b: 0xaf }; // #9ca3af
    pub const WHITE:  Self = Self { r: 0xe5, g: 0xe7, b: 0xeb }; // #e5e7eb
    pub const VIOLET: Self = Self { r: 0x8b, g: 0x5c, b: 0xf6 }; // #8b5cf6
    pub const CYAN:   Self = Self { r: 0x06, g: 0xb6, b: 0xd4 }; // #06b6d4
    pub const GREEN:  Self = Self { r: 0x4a, g: 0xde, b: 0x80 }; // #4ade80
    pub const YELLOW: Self = Self { r: 0xca, g: 0x8a, b: 0x04 }; // #ca8a04
    pub const RED:    Self = Self { r: 0xdc, g: 0x26, b: 0x26 }; // #dc2626

    /// Parse a CSS-style hex color string (`#RRGGBB`, `#RRGGBBAA` or `#RGB`).
    /// Alpha is accepted and ignored; terminals have no blending.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let byte = |s: &str| -> Option<u8> { u8::from_str_radix(s, 16).ok() };

        match hex.len() {
            3 => {
                let nibble = |i: usize| byte(&hex[i..i + 1]).map(|n| n * 17);
                Some(Self { r: nibble(0)?, g: nibble(1)?, b: nibble(2)? })
            }
            6 | 8 => Some(Self {
                r: byte(&hex[0..2])?,
                g: byte(&hex[2..4])?,
                b: byte(&hex[4..6])?,
            }),
            _ => None,
        }
    }

    /// `#rrggbb` form, as used in JSON frames.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// 24-bit ANSI foreground escape sequence.
    #[inline]
    pub fn ansi_fg(self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }

    /// Sample the viridis ramp at `t`, clamped to `[0, 1]`.
    pub fn viridis(t: f64) -> Self {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let last = VIRIDIS.len() - 1;
        let pos = t * last as f64;
        let lo = (pos.floor() as usize).min(last - 1);
        VIRIDIS[lo].mix(VIRIDIS[lo + 1], pos - lo as f64)
    }

    /// Linear interpolation towards `other`; `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn mix(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Self {
            r: lerp(self.r, other.r),
            g: lerp(self.g, other.g),
            b: lerp(self.b, other.b),
        }
    }
}

/// Evenly spaced stops of the viridis colour map, dark to bright.
pub const VIRIDIS: [Color; 9] = [
    Color { r: 0x44, g: 0x01, b: 0x54 },
    Color { r: 0x47, g: 0x2d, b: 0x7b },
    Color { r: 0x3b, g: 0x52, b: 0x8b },
    Color { r: 0x2c, g: 0x72, b: 0x8e },
    Color { r: 0x21, g: 0x91, b: 0x8c },
    Color { r: 0x28, g: 0xae, b: 0x80 },
    Color { r: 0x5e, g: 0xc9, b: 0x62 },
    Color { r: 0xad, g: 0xdc, b: 0x30 },
    Color { r: 0xfd, g: 0xe7, b: 0x25 },
];
