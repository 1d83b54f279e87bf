//! Fluent walks over calendar and clock units.
//!
//! A walk starts on a time value and steps one unit at a time toward a
//! bound, either running an action per step or collecting what the action
//! returns:
//!
//! ```rust
//! use chrono::{Datelike, NaiveDate};
//! use time_walk::prelude::*;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 2, 17).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let days = start.of_the(Unit::Month).map_each(Unit::Day, |time| time.day()).unwrap();
//! assert_eq!(days.len(), 29);
//!
//! // The bound and the iterator can be given in either order.
//! let later = start.map_each_later(Unit::Day).until_then(NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(), |time| time.day());
//! assert_eq!(later.unwrap(), Some(Outcome::Collected(vec![18, 19])));
//! ```
//!
//! Limits and deferred calls live on a [`Chain`], which is consumed by the
//! call that runs it.

pub extern crate time_walk_calendar as calendar;

pub use crate::calendar::{IntoBound, TimeError, TimePoint, Unit};

mod options;
pub use crate::options::*;

pub mod resolve;
pub use crate::resolve::{Direction, Limits, Window};

pub mod engine;
pub use crate::engine::{Outcome, Steps};

mod chain;
pub use crate::chain::*;

mod shorthand;
pub use crate::shorthand::UnitWalk;

pub mod prelude {
  pub use crate::{Chain, IterationOptions, Operation, Outcome, Preset, TimeWalk, Unit, UnitWalk};
}
