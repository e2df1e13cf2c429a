use crate::sparkline::{bar, downsample, sparkline};
use pulse_theme::{paint, Role, Theme};
use pulse_widgets::{Frame, HeatmapView, Severity, Tone, TABLE_HEADERS};
use std::fmt::Write;

/// Width of the region share bars.
const REGION_BAR_WIDTH: usize = 20;
/// Glyph used for one heatmap cell.
const HEAT_CELL: &str = "■";

/// Render `frame` as a multi-line text block.
pub fn render_text(frame: &Frame, theme: &Theme, sparkline_width: usize) -> String {
    let mut out = String::new();
    header(&mut out, frame, theme);
    cards(&mut out, frame, theme);
    timeline(&mut out, frame, theme, sparkline_width);
    devices(&mut out, frame, theme);
    regions(&mut out, frame, theme);
    heatmap(&mut out, &frame.heatmap, theme);
    table(&mut out, frame, theme);
    footer(&mut out, frame, theme);
    out
}

fn section(out: &mut String, title: &str, theme: &Theme) {
    let _ = writeln!(out, "\n{}", theme.paint_bold(title, Role::Accent));
}

fn header(out: &mut String, frame: &Frame, theme: &Theme) {
    let status = &frame.status;
    let state = if status.streaming {
        theme.paint_bold("● LIVE", Role::Success)
    } else {
        theme.paint_bold("○ PAUSED", Role::Muted)
    };
    let _ = writeln!(
        out,
        "{}  {}  {}",
        theme.paint_bold("Analytics Dashboard", Role::Foreground),
        state,
        theme.paint(status.timeframe_label, Role::Muted),
    );
}

fn cards(out: &mut String, frame: &Frame, theme: &Theme) {
    section(out, "Key Metrics", theme);
    for card in &frame.cards {
        let role = match card.tone {
            Tone::Positive => Role::Success,
            Tone::Live | Tone::Realtime => Role::Accent,
        };
        let _ = writeln!(
            out,
            "  {} {}  {}",
            theme.paint(&format!("{:<20}", card.label), Role::Muted),
            theme.paint_bold(&format!("{:>16}", card.value), Role::Foreground),
            theme.paint(card.badge, role),
        );
    }
}

fn timeline(out: &mut String, frame: &Frame, theme: &Theme, width: usize) {
    let tl = &frame.timeline;
    section(out, &format!("Activity Timeline · {}", tl.metric.label()), theme);
    if tl.is_empty() {
        let _ = writeln!(out, "  {}", theme.paint("no data", Role::Muted));
        return;
    }

    let line = sparkline(&downsample(&tl.values(), width));
    let _ = writeln!(out, "  {}", theme.paint(&line, Role::Accent));

    let first = tl.points.first().map(|p| p.time.as_str()).unwrap_or_default();
    let last = tl.points.last().map(|p| p.time.as_str()).unwrap_or_default();
    let _ = writeln!(
        out,
        "  {} → {}  min {:.1}  max {:.1}  mean {:.1}",
        theme.paint(first, Role::Muted),
        theme.paint(last, Role::Muted),
        tl.min,
        tl.max,
        tl.mean,
    );
}

fn devices(out: &mut String, frame: &Frame, theme: &Theme) {
    section(out, "Device Distribution", theme);
    for device in frame.devices {
        let color = pulse_theme::Color::from_hex(device.color).unwrap_or(theme.accent);
        let _ = writeln!(
            out,
            "  {:<8} {} {:>3}%",
            device.name,
            paint(&bar(f64::from(device.percent) / 100.0, REGION_BAR_WIDTH), color, theme.color),
            device.percent,
        );
    }
}

fn regions(out: &mut String, frame: &Frame, theme: &Theme) {
    section(out, "Regional Performance", theme);
    let max = frame.regions.max_users().max(1) as f64;
    for row in &frame.regions.rows {
        let _ = writeln!(
            out,
            "  {:<14} {} {:>9}  {}",
            row.name,
            theme.paint(&bar(row.users as f64 / max, REGION_BAR_WIDTH), Role::Accent),
            row.users_text,
            theme.paint(&format!("+{:.1}%", row.growth_pct), Role::Success),
        );
    }
}

fn heatmap(out: &mut String, view: &HeatmapView, theme: &Theme) {
    section(out, "Response Time Heatmap", theme);
    for (day, label) in view.days.iter().enumerate() {
        let _ = write!(out, "  {label} ");
        for cell in view.cells.iter().filter(|c| usize::from(c.day) == day) {
            let color = theme.heat(cell.value, view.max);
            out.push_str(&paint(HEAT_CELL, color, theme.color));
        }
        out.push('\n');
    }
}

fn table(out: &mut String, frame: &Frame, theme: &Theme) {
    section(out, "Live Data", theme);
    let header = format!(
        "  {:<10} {:>7} {:>11} {:>11} {:>10} {:>6} {:>10}",
        TABLE_HEADERS[0],
        TABLE_HEADERS[1],
        TABLE_HEADERS[2],
        TABLE_HEADERS[3],
        TABLE_HEADERS[4],
        TABLE_HEADERS[5],
        TABLE_HEADERS[6],
    );
    let _ = writeln!(out, "{}", theme.paint(&header, Role::Muted));

    for row in &frame.table {
        let role = match row.severity {
            Severity::Ok       => Role::Success,
            Severity::Warn     => Role::Warning,
            Severity::Critical => Role::Danger,
        };
        let _ = writeln!(
            out,
            "  {:<10} {:>7} {:>11} {:>11} {:>10} {} {:>10}",
            row.time,
            row.users,
            row.revenue,
            row.connections,
            row.throughput,
            theme.paint(&format!("{:>6}", row.errors), role),
            row.response_time,
        );
    }
}

fn footer(out: &mut String, frame: &Frame, theme: &Theme) {
    let status = &frame.status;
    let _ = writeln!(
        out,
        "\n{}",
        theme.paint(
            &format!(
                "Last updated: {} | Processing {} data points · Streaming: {}",
                status.last_updated,
                status.points_text,
                if status.streaming { "ON" } else { "OFF" },
            ),
            Role::Muted,
        )
    );
    let _ = writeln!(
        out,
        "{} {}  {} {}  {} {}",
        theme.paint("System Status:", Role::Muted),
        theme.paint(status.system_status, Role::Success),
        theme.paint("Latency:", Role::Muted),
        theme.paint(&format!("{}ms", status.latency_ms), Role::Accent),
        theme.paint("Uptime:", Role::Muted),
        theme.paint(&format!("{:.2}%", status.uptime_pct), Role::Accent),
    );
}
