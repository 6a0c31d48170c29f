use serde::{Deserialize, Serialize};

/// User-configurable analytics settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Length of the "recent" summary tier, in calendar months.
    pub recent_window_months: u32,

    /// Number of calendar months covered by the spending chart,
    /// current month included.
    pub chart_window_months: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            recent_window_months: 3,
            chart_window_months: 6,
        }
    }
}
