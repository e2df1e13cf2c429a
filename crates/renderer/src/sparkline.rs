/// Block glyphs from lowest to highest.
pub const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Average `values` down to at most `width` buckets.
///
/// Shorter input is returned unchanged.
pub fn downsample(values: &[f64], width: usize) -> Vec<f64> {
    if width == 0 || values.is_empty() {
        return Vec::new();
    }
    if values.len() <= width {
        return values.to_vec();
    }

    (0..width)
        .map(|bucket| {
            let start = bucket * values.len() / width;
            let end = ((bucket + 1) * values.len() / width).max(start + 1);
            let slice = &values[start..end];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

/// One glyph per value, scaled between the series min and max.
pub fn sparkline(values: &[f64]) -> String {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    let span = max - min;

    values
        .iter()
        .map(|v| {
            if span <= f64::EPSILON {
                return BARS[BARS.len() / 2];
            }
            let level = ((v - min) / span * (BARS.len() - 1) as f64).round() as usize;
            BARS[level.min(BARS.len() - 1)]
        })
        .collect()
}

/// Horizontal bar of `width` cells filled to `fraction`.
pub fn bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    let mut out = "█".repeat(filled);
    out.push_str(&"░".repeat(width - filled));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downsample_averages_buckets() {
        let values: Vec<f64> = (0..8).map(f64::from).collect();
        assert_eq!(downsample(&values, 4), vec![0.5, 2.5, 4.5, 6.5]);
        assert_eq!(downsample(&values, 20).len(), 8);
        assert!(downsample(&values, 0).is_empty());
    }

    #[test]
    fn sparkline_spans_full_range() {
        let line = sparkline(&[1.0, 5.0, 9.0]);
        assert_eq!(line.chars().count(), 3);
        assert_eq!(line.chars().next(), Some('▁'));
        assert_eq!(line.chars().last(), Some('█'));
    }

    #[test]
    fn flat_series_draws_mid_bars() {
        assert_eq!(sparkline(&[3.0, 3.0]), "▅▅");
        assert_eq!(sparkline(&[]), "");
    }

    #[test]
    fn bar_is_clamped() {
        assert_eq!(bar(0.5, 4), "██░░");
        assert_eq!(bar(2.0, 3), "███");
        assert_eq!(bar(-1.0, 2), "░░");
    }
}
