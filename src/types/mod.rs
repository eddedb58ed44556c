//! Core types for pace band data.
//!
//! ## Overview
//!
//! - [`GoalTime`] is the parsed target finish time
//! - [`RaceDistance`] is a validated positive distance tagged with a [`DistanceUnit`]
//! - [`StandardDistance`] is the fixed full/half marathon table used for lossless unit switching
//! - [`SplitRecord`] is one row of the band: a [`Marker`] and its cumulative [`ElapsedTime`]
//!
//! ## Usage Example
//!
//! ```rust
//! use paceband::types::{DistanceUnit, GoalTime, RaceDistance, StandardDistance};
//!
//! let goal = GoalTime::parse("3:00:00").unwrap();
//! assert_eq!(goal.total_seconds(), 10_800);
//!
//! let half = RaceDistance::standard(StandardDistance::HalfMarathon, DistanceUnit::Kilometers);
//! let in_miles = half.with_unit(DistanceUnit::Miles).unwrap();
//! assert_eq!(in_miles.value(), 13.1094);
//! ```

mod distance;
mod goal_time;
mod split;

pub use distance::{DistanceUnit, MAX_DISTANCE, RaceDistance, STANDARD_TOLERANCE, StandardDistance};
pub use goal_time::GoalTime;
pub use split::{ElapsedTime, Marker, SplitRecord};
