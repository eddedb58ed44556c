//! Split time computation
//!
//! Turns a goal time and a race distance into the cumulative split table printed
//! on the band. Everything here is pure: identical inputs always give identical
//! output and nothing is read from or written to the outside world.
//!
//! Intermediate markers use the per-unit pace truncated to whole seconds. The
//! finish row always carries the full goal duration, so the printed finish time
//! matches what the runner typed even when truncation would have landed a few
//! seconds short.

use tracing::{debug, warn};

use crate::types::{GoalTime, RaceDistance, SplitRecord};

/// Stateless split calculator
pub struct SplitCalculator;

impl SplitCalculator {
    /// Parse `goal_text` and compute the split table for `distance`.
    ///
    /// Returns `None` (a no-op) when the goal text has no numeric hours field.
    pub fn compute(goal_text: &str, distance: &RaceDistance) -> Option<Vec<SplitRecord>> {
        let goal = GoalTime::parse(goal_text)?;
        Some(Self::splits_for(goal, distance))
    }

    /// Compute the split table for an already parsed goal time.
    pub fn splits_for(goal: GoalTime, distance: &RaceDistance) -> Vec<SplitRecord> {
        let total_seconds = goal.total_seconds();
        let pace_per_unit = total_seconds as f64 / distance.value();
        let whole_units = distance.whole_units();

        let mut splits = Vec::with_capacity(whole_units as usize + 1);
        for unit in 1..=whole_units {
            let elapsed = (pace_per_unit * f64::from(unit)).floor() as u64;
            splits.push(SplitRecord::whole(unit, elapsed));
        }
        splits.push(SplitRecord::finish(distance.marker_label(), total_seconds));

        debug!(
            "Computed {} splits for {} over {} ({:.2}s per {})",
            splits.len(),
            goal,
            distance,
            pace_per_unit,
            distance.unit()
        );

        splits
    }
}

/// Holds the most recent successfully computed split table.
///
/// Recomputing with malformed goal text keeps the previous table in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitTable {
    splits: Vec<SplitRecord>,
}

impl SplitTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute from configuration.
    ///
    /// Returns `true` when the table was replaced, `false` when the goal text could
    /// not be parsed and the previous table was kept.
    pub fn update(&mut self, goal_text: &str, distance: &RaceDistance) -> bool {
        match SplitCalculator::compute(goal_text, distance) {
            Some(splits) => {
                self.splits = splits;
                true
            }
            None => {
                warn!("Ignoring unparseable goal time '{}', keeping previous splits", goal_text);
                false
            }
        }
    }

    /// Current split rows
    pub fn splits(&self) -> &[SplitRecord] {
        &self.splits
    }

    /// Whether nothing has been computed yet
    pub fn is_empty(&self) -> bool {
        self.splits.is_empty()
    }
}
