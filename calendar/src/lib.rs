//! Calendar arithmetic that time walks are built on.
//!
//! Nothing in here knows about chains or iteration. It only describes what a
//! time value has to be able to do (step by a unit, snap to the edges of a
//! unit, compare) so that the walking engine can drive it.

use failure::Fail;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

mod chrono_impls;

/// One granularity of calendar or clock measurement.
///
/// Units are declared from smallest to largest, so the derived ordering is
/// ordering by containment: `Unit::Year > Unit::Month`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
  Microsecond,
  Second,
  Minute,
  Hour,
  Day,
  Month,
  Year,
}

impl Unit {
  /// Every unit, largest first.
  pub const ALL: [Unit; 7] = [
    Unit::Year,
    Unit::Month,
    Unit::Day,
    Unit::Hour,
    Unit::Minute,
    Unit::Second,
    Unit::Microsecond,
  ];

  /// The immediately larger unit, if there is one.
  pub fn parent(self) -> Option<Unit> {
    match self {
      Unit::Year => None,
      Unit::Month => Some(Unit::Year),
      Unit::Day => Some(Unit::Month),
      Unit::Hour => Some(Unit::Day),
      Unit::Minute => Some(Unit::Hour),
      Unit::Second => Some(Unit::Minute),
      Unit::Microsecond => Some(Unit::Second),
    }
  }

  /// The units contained in this one, largest first.
  pub fn children(self) -> &'static [Unit] {
    let position = Unit::ALL
      .iter()
      .position(|unit| *unit == self)
      .unwrap_or(Unit::ALL.len() - 1);
    &Unit::ALL[position + 1..]
  }

  pub fn name(self) -> &'static str {
    match self {
      Unit::Year => "year",
      Unit::Month => "month",
      Unit::Day => "day",
      Unit::Hour => "hour",
      Unit::Minute => "minute",
      Unit::Second => "second",
      Unit::Microsecond => "microsecond",
    }
  }
}

impl fmt::Display for Unit {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for Unit {
  type Err = TimeError;
  fn from_str(name: &str) -> Result<Unit, TimeError> {
    let normalized = name.trim().to_ascii_lowercase();
    let singular = normalized.strip_suffix('s').unwrap_or(&normalized);
    Unit::ALL
      .iter()
      .copied()
      .find(|unit| unit.name() == singular)
      .ok_or_else(|| TimeError::UnknownUnit(name.to_owned()))
  }
}

#[derive(Clone, PartialEq, Eq, Debug, Fail)]
pub enum TimeError {
  #[fail(
    display = "moving by {} {}(s) left the representable time range",
    count, unit
  )]
  OutOfRange { unit: Unit, count: i64 },
  #[fail(display = "could not truncate to the {} boundary", unit)]
  Truncation { unit: Unit },
  #[fail(display = "unknown time unit {:?}", _0)]
  UnknownUnit(String),
}

/// A point in time that can be walked one unit at a time.
///
/// Implementations must keep stepping consistent with ordering:
/// `t.successor(unit)? > t` and `t.predecessor(unit)? < t` for every unit.
pub trait TimePoint: Clone + Ord + fmt::Debug {
  type Error: Fail;

  /// Moves by `count` whole units (negative moves backward).
  fn advance(&self, unit: Unit, count: i64) -> Result<Self, Self::Error>;

  /// The first instant inside the `unit` containing this point.
  fn beginning_of(&self, unit: Unit) -> Result<Self, Self::Error>;

  /// The last representable instant inside the `unit` containing this point.
  fn end_of(&self, unit: Unit) -> Result<Self, Self::Error>;

  fn successor(&self, unit: Unit) -> Result<Self, Self::Error> {
    self.advance(unit, 1)
  }
  fn predecessor(&self, unit: Unit) -> Result<Self, Self::Error> {
    self.advance(unit, -1)
  }
}

/// Values that can stand as the bound (or start) of a walk over `T`.
///
/// Every time point is its own bound; date-only values become midnight.
pub trait IntoBound<T> {
  fn into_bound(self) -> T;
}

impl<T: TimePoint> IntoBound<T> for T {
  fn into_bound(self) -> T {
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parents_follow_containment() {
    for pair in Unit::ALL.windows(2) {
      assert_eq!(pair[1].parent(), Some(pair[0]));
      assert!(pair[0] > pair[1]);
    }
    assert_eq!(Unit::Year.parent(), None);
  }

  #[test]
  fn children_are_everything_smaller() {
    assert_eq!(Unit::Day.children(), &[Unit::Hour, Unit::Minute, Unit::Second, Unit::Microsecond]);
    assert!(Unit::Microsecond.children().is_empty());
    assert_eq!(Unit::Year.children().len(), 6);
  }

  #[test]
  fn parses_names() {
    let inputs = vec![
      ("day", Unit::Day),
      ("Days", Unit::Day),
      (" hour ", Unit::Hour),
      ("microseconds", Unit::Microsecond),
      ("YEAR", Unit::Year),
    ];
    for (input, unit) in inputs {
      assert_eq!(input.parse::<Unit>(), Ok(unit));
    }
    assert_eq!(
      "fortnight".parse::<Unit>(),
      Err(TimeError::UnknownUnit("fortnight".to_owned()))
    );
  }

  #[test]
  fn serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Unit::Minute).unwrap(), "\"minute\"");
    let unit: Unit = serde_json::from_str("\"month\"").unwrap();
    assert_eq!(unit, Unit::Month);
  }

  #[test]
  fn display_matches_parse() {
    for unit in Unit::ALL.iter() {
      assert_eq!(unit.to_string().parse::<Unit>(), Ok(*unit));
    }
  }
}
