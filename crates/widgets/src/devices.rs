use serde::Serialize;

/// Share of sessions by device class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceShare {
    pub name:    &'static str,
    pub percent: u8,
    /// Slice colour (hex).
    pub color:   &'static str,
}

pub const DEVICE_DISTRIBUTION: [DeviceShare; 3] = [
    DeviceShare { name: "Desktop", percent: 45, color: "#8b5cf6" },
    DeviceShare { name: "Mobile",  percent: 35, color: "#06b6d4" },
    DeviceShare { name: "Tablet",  percent: 20, color: "#10b981" },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_sum_to_one_hundred() {
        let total: u32 = DEVICE_DISTRIBUTION.iter().map(|d| u32::from(d.percent)).sum();
        assert_eq!(total, 100);
    }
}
