//! Score accumulation and drop speed progression

use std::time::Duration;

/// Points awarded per cleared row
pub const POINTS_PER_LINE: u64 = 100;
/// Drop interval at the start of a game
pub const INITIAL_DROP_INTERVAL: Duration = Duration::from_millis(1000);
/// Fastest the drop interval ever gets
pub const MIN_DROP_INTERVAL: Duration = Duration::from_millis(200);
/// Speed-up applied once per lock that clears at least one row
pub const DROP_INTERVAL_STEP: Duration = Duration::from_millis(50);

/// Scoring state for one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Total lines cleared
    pub lines: u32,
    /// Time between automatic drops
    pub drop_interval: Duration,
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}

impl Score {
    pub fn new() -> Self {
        Self {
            points: 0,
            lines: 0,
            drop_interval: INITIAL_DROP_INTERVAL,
        }
    }

    /// Apply the result of one lock. A lock that clears nothing changes nothing;
    /// otherwise every row is worth `POINTS_PER_LINE` and the drop interval
    /// shrinks by a single step regardless of how many rows went.
    pub fn add_clear(&mut self, lines_cleared: usize) {
        if lines_cleared == 0 {
            return;
        }
        self.points += lines_cleared as u64 * POINTS_PER_LINE;
        self.lines += lines_cleared as u32;
        self.drop_interval = self
            .drop_interval
            .saturating_sub(DROP_INTERVAL_STEP)
            .max(MIN_DROP_INTERVAL);
    }
}
