use crate::format::group_thousands;
use serde::Serialize;

/// Static per-region user counts and growth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Region {
    pub name:       &'static str,
    pub users:      u64,
    /// Year-over-year growth in percent.
    pub growth_pct: f64,
}

pub const REGIONS: [Region; 5] = [
    Region { name: "North America", users: 450_000, growth_pct: 12.5 },
    Region { name: "Europe",        users: 380_000, growth_pct: 8.3 },
    Region { name: "Asia Pacific",  users: 520_000, growth_pct: 18.7 },
    Region { name: "Latin America", users: 180_000, growth_pct: 15.2 },
    Region { name: "Africa",        users: 95_000,  growth_pct: 22.1 },
];

/// One bar of the regional performance chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionRow {
    pub name:       &'static str,
    pub users:      u64,
    pub users_text: String,
    pub growth_pct: f64,
    /// Share of all users across regions, in percent.
    pub share_pct:  f64,
}

/// Regional performance summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalSummary {
    pub rows:        Vec<RegionRow>,
    pub total_users: u64,
    /// Region with the highest growth.
    pub fastest:     &'static str,
}

impl RegionalSummary {
    pub fn build(regions: &[Region]) -> Self {
        let total_users: u64 = regions.iter().map(|r| r.users).sum();

        let rows = regions
            .iter()
            .map(|r| RegionRow {
                name:       r.name,
                users:      r.users,
                users_text: group_thousands(r.users),
                growth_pct: r.growth_pct,
                share_pct:  if total_users == 0 {
                    0.0
                } else {
                    r.users as f64 / total_users as f64 * 100.0
                },
            })
            .collect();

        let fastest = regions
            .iter()
            .max_by(|a, b| a.growth_pct.total_cmp(&b.growth_pct))
            .map_or("", |r| r.name);

        Self { rows, total_users, fastest }
    }

    /// Largest region by users, for scaling bar lengths.
    pub fn max_users(&self) -> u64 {
        self.rows.iter().map(|r| r.users).max().unwrap_or(0)
    }
}

impl Default for RegionalSummary {
    fn default() -> Self {
        Self::build(&REGIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_and_shares() {
        let summary = RegionalSummary::default();
        assert_eq!(summary.total_users, 1_625_000);
        assert_eq!(summary.fastest, "Africa");
        assert_eq!(summary.max_users(), 520_000);

        let share_sum: f64 = summary.rows.iter().map(|r| r.share_pct).sum();
        assert!((share_sum - 100.0).abs() < 1e-9);
        assert_eq!(summary.rows[2].users_text, "520,000");
    }

    #[test]
    fn empty_region_list() {
        let summary = RegionalSummary::build(&[]);
        assert_eq!(summary.total_users, 0);
        assert_eq!(summary.fastest, "");
        assert!(summary.rows.is_empty());
    }
}
