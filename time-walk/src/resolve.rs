//! Turning a unit, options, and the limits set on a chain into a concrete
//! window to walk.

use tracing::debug;

use crate::{IterationOptions, TimePoint, Unit};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
  Forward,
  Backward,
}

impl Direction {
  /// Forward only when `start` is strictly earlier; a window whose ends
  /// coincide is walked backward.
  pub fn between<T: TimePoint>(start: &T, until: &T) -> Direction {
    if start < until {
      Direction::Forward
    } else {
      Direction::Backward
    }
  }

  pub fn step<T: TimePoint>(self, time: &T, unit: Unit) -> Result<T, T::Error> {
    match self {
      Direction::Forward => time.successor(unit),
      Direction::Backward => time.predecessor(unit),
    }
  }
}

/// Limits a walk can be confined by, as collected on a chain.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Limits<T> {
  pub until: Option<T>,
  pub of_the: Option<Unit>,
}

impl<T> Default for Limits<T> {
  fn default() -> Self {
    Limits {
      until: None,
      of_the: None,
    }
  }
}

/// A resolved walk: where it starts, where it stops, and which way it goes.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Window<T> {
  pub unit: Unit,
  pub start: T,
  pub until: T,
  pub direction: Direction,
  pub options: IterationOptions,
}

impl<T: TimePoint> Window<T> {
  /// Whether `time` is still on the near side of the bound.
  pub fn admits(&self, time: &T) -> bool {
    match self.direction {
      Direction::Forward => *time <= self.until,
      Direction::Backward => *time >= self.until,
    }
  }
}

/// Computes the window for walking `unit` from `receiver`.
///
/// Without a scope, the bound is the explicit one or one parent unit past
/// the receiver (one unit, for units with no parent). With an `of_the`
/// scope, the window is exactly the scope unit containing the receiver:
/// truncated start, included start, excluded end, whatever `options` said.
pub fn resolve<T: TimePoint>(
  receiver: &T,
  limits: &Limits<T>,
  unit: Unit,
  mut options: IterationOptions,
) -> Result<Window<T>, T::Error> {
  let (mut start, mut until) = match limits.of_the {
    None => {
      let until = match &limits.until {
        Some(until) => until.clone(),
        None => receiver.advance(unit.parent().unwrap_or(unit), 1)?,
      };
      (receiver.clone(), until)
    }
    Some(scope) => {
      options.beginning_of = true;
      options.include_start = true;
      options.include_end = false;
      (
        receiver.beginning_of(scope)?,
        receiver.successor(scope)?.beginning_of(scope)?,
      )
    }
  };

  let direction = Direction::between(&start, &until);

  if options.beginning_of {
    start = start.beginning_of(unit)?;
  }
  if !options.include_start {
    start = direction.step(&start, unit)?;
  }
  if !options.include_end {
    until = until.predecessor(unit)?.end_of(unit)?;
  }

  debug!(
    %unit,
    ?direction,
    ?start,
    ?until,
    scope = ?limits.of_the,
    include_start = options.include_start,
    include_end = options.include_end,
    "resolved walk window"
  );

  Ok(Window {
    unit,
    start,
    until,
    direction,
    options,
  })
}
