//! Depth-interval parsing and continuity tracking
//!
//! Sample description lines open with a `start-end` depth interval in
//! meters. Intervals are expected to tile the well: each start should equal
//! the previous interval's end. `WalkState` carries that previous end across
//! the whole document traversal, not per region.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static DEPTH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+)-(\d+)").unwrap());

/// A leading depth interval and the exact text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthInterval {
    pub start: u32,
    pub end: u32,
    pub matched_text: String,
}

/// Parses a leading `start-end` interval. Only anchored at the start of the
/// line; trailing text is ignored. Returns `None` when the line does not
/// open with an interval.
pub fn parse_depth_interval(text: &str) -> Option<DepthInterval> {
    let caps = DEPTH_RE.captures(text)?;
    let start = caps[1].parse().ok()?;
    let end = caps[2].parse().ok()?;
    Some(DepthInterval {
        start,
        end,
        matched_text: caps[0].to_string(),
    })
}

/// Running state threaded through the entire document walk.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkState {
    pub previous_end: Option<u32>,
}

impl WalkState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks the interval against the previous end and records its end as
    /// the new previous end. Returns true when the interval is discontinuous.
    /// The state updates on every parsed interval, flagged or not.
    pub fn advance(&mut self, interval: &DepthInterval) -> bool {
        let discontinuous = self
            .previous_end
            .is_some_and(|previous| interval.start != previous);
        self.previous_end = Some(interval.end);
        discontinuous
    }
}
