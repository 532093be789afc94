//! Anomaly report collected during the document walk
//!
//! Operator-facing record of every flagged line, serializable to JSON.

use serde::{Deserialize, Serialize};

use crate::document::models::Region;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthAnomaly {
    pub region: Region,
    pub text: String,
    /// End of the previous interval, which this line's start should match.
    pub expected_start: u32,
    pub found_start: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentageAnomaly {
    pub region: Region,
    pub text: String,
    pub sum: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub depth_discontinuities: Vec<DepthAnomaly>,
    pub percentage_mismatches: Vec<PercentageAnomaly>,
}

impl AnomalyReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_depth(
        &mut self,
        region: Region,
        text: &str,
        expected_start: u32,
        found_start: u32,
    ) {
        self.depth_discontinuities.push(DepthAnomaly {
            region,
            text: text.to_string(),
            expected_start,
            found_start,
        });
    }

    pub fn record_percentage(&mut self, region: Region, text: &str, sum: u32) {
        self.percentage_mismatches.push(PercentageAnomaly {
            region,
            text: text.to_string(),
            sum,
        });
    }

    pub fn total(&self) -> usize {
        self.depth_discontinuities.len() + self.percentage_mismatches.len()
    }

    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }
}
