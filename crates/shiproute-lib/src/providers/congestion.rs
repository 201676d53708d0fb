use crate::constants::DEFAULT_CONGESTION_LEVEL;
use crate::error::Result;

use super::CongestionProvider;

/// Congestion provider that reports the same level for every port.
///
/// Stands in until a live congestion feed exists; the default level sits
/// exactly on the heavy-congestion threshold and so raises no issue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantCongestion {
    pub level: f64,
}

impl Default for ConstantCongestion {
    fn default() -> Self {
        Self {
            level: DEFAULT_CONGESTION_LEVEL,
        }
    }
}

impl CongestionProvider for ConstantCongestion {
    fn congestion(&self, _port: &str) -> Result<f64> {
        Ok(self.level)
    }
}
