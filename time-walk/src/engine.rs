use std::iter::FusedIterator;
use tracing::trace;

use crate::resolve::Window;
use crate::TimePoint;

/// Lazily walks a resolved window.
///
/// A step that the time type refuses is yielded once as an error, after the
/// last point that was reached; the walk ends there.
#[derive(Debug)]
pub struct Steps<T: TimePoint> {
  window: Window<T>,
  cursor: Option<Result<T, T::Error>>,
}

impl<T: TimePoint> Steps<T> {
  pub fn new(window: Window<T>) -> Steps<T> {
    let cursor = Some(Ok(window.start.clone()));
    Steps { window, cursor }
  }
  pub fn window(&self) -> &Window<T> {
    &self.window
  }
}

impl<T: TimePoint> Iterator for Steps<T> {
  type Item = Result<T, T::Error>;

  fn next(&mut self) -> Option<Self::Item> {
    match self.cursor.take()? {
      Err(error) => Some(Err(error)),
      Ok(time) => {
        if !self.window.admits(&time) {
          return None;
        }
        self.cursor = Some(self.window.direction.step(&time, self.window.unit));
        Some(Ok(time))
      }
    }
  }
}

impl<T: TimePoint> FusedIterator for Steps<T> {}

/// What a walk hands back.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Outcome<T, R> {
  /// A side-effecting walk returns the time value it was started on.
  Receiver(T),
  Collected(Vec<R>),
}

impl<T, R> Outcome<T, R> {
  pub fn receiver(self) -> Option<T> {
    match self {
      Outcome::Receiver(receiver) => Some(receiver),
      Outcome::Collected(_) => None,
    }
  }
  pub fn collected(self) -> Option<Vec<R>> {
    match self {
      Outcome::Receiver(_) => None,
      Outcome::Collected(collected) => Some(collected),
    }
  }
}

/// Runs `action` on every point of the window, discarding what it returns.
pub fn visit<T, R, F>(window: Window<T>, mut action: F) -> Result<usize, T::Error>
where
  T: TimePoint,
  F: FnMut(&T) -> R,
{
  let mut visited = 0;
  for time in Steps::new(window) {
    let time = time?;
    trace!(?time, "visiting");
    action(&time);
    visited += 1;
  }
  Ok(visited)
}

/// Runs `action` on every point of the window, keeping what it returns.
pub fn collect<T, R, F>(window: Window<T>, mut action: F) -> Result<Vec<R>, T::Error>
where
  T: TimePoint,
  F: FnMut(&T) -> R,
{
  let mut collected = Vec::new();
  for time in Steps::new(window) {
    let time = time?;
    trace!(?time, "collecting");
    collected.push(action(&time));
  }
  Ok(collected)
}

/// Runs a window according to its `map_result` option.
pub fn run<T, R, F>(receiver: &T, window: Window<T>, action: F) -> Result<Outcome<T, R>, T::Error>
where
  T: TimePoint,
  F: FnMut(&T) -> R,
{
  if window.options.map_result {
    collect(window, action).map(Outcome::Collected)
  } else {
    visit(window, action)?;
    Ok(Outcome::Receiver(receiver.clone()))
  }
}
