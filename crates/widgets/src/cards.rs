use crate::format::{format_currency, format_rate, group_thousands};
use pulse_core::MetricsCounters;
use serde::Serialize;

/// Colour hint for a card's badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Live,
    Realtime,
}

/// One headline metric card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: String,
    /// Short trailer under the value, e.g. `"+12.5%"` or `"Live"`.
    pub badge: &'static str,
    pub tone:  Tone,
}

/// The four key-metric cards, left to right.
pub fn metric_cards(counters: &MetricsCounters) -> [MetricCard; 4] {
    [
        MetricCard {
            label: "Total Users",
            value: group_thousands(counters.total_users),
            badge: "+12.5%",
            tone:  Tone::Positive,
        },
        MetricCard {
            label: "Revenue",
            value: format_currency(counters.revenue),
            badge: "+8.3%",
            tone:  Tone::Positive,
        },
        MetricCard {
            label: "Active Connections",
            value: group_thousands(counters.active_connections),
            badge: "Live",
            tone:  Tone::Live,
        },
        MetricCard {
            label: "Throughput",
            value: format_rate(counters.throughput),
            badge: "Real-time",
            tone:  Tone::Realtime,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_counters_render() {
        let cards = metric_cards(&MetricsCounters::default());
        assert_eq!(cards[0].value, "1,247,832");
        assert_eq!(cards[1].value, "$89,432.50");
        assert_eq!(cards[2].value, "15,647");
        assert_eq!(cards[3].value, "2341/s");
        assert_eq!(cards[2].tone, Tone::Live);
    }
}
