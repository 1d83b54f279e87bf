use tracing::debug;

use crate::engine::{self, Outcome, Steps};
use crate::resolve::{resolve, Limits, Window};
use crate::{IntoBound, IterationOptions, Operation, Preset, TimePoint, Unit};

/// One fluent expression over a time value.
///
/// Limiter calls (`until`, `of_the`, `from`) and deferred iterator calls
/// (`each_later` and friends) can come in either order; whichever call
/// finally supplies an action runs the walk. The chain is consumed by that
/// call, so nothing set here can leak into a later expression on the same
/// time value.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Chain<T> {
  receiver: T,
  limits: Limits<T>,
  pending: Option<Operation>,
}

impl<T: TimePoint> Chain<T> {
  pub fn new(receiver: T) -> Chain<T> {
    Chain {
      receiver,
      limits: Limits::default(),
      pending: None,
    }
  }

  pub fn receiver(&self) -> &T {
    &self.receiver
  }
  pub fn limits(&self) -> &Limits<T> {
    &self.limits
  }
  pub fn pending(&self) -> Option<&Operation> {
    self.pending.as_ref()
  }

  pub fn until<B: IntoBound<T>>(mut self, bound: B) -> Chain<T> {
    self.limits.until = Some(bound.into_bound());
    self
  }
  pub fn until_then<B, R, F>(self, bound: B, action: F) -> Result<Option<Outcome<T, R>>, T::Error>
  where
    B: IntoBound<T>,
    F: FnMut(&T) -> R,
  {
    self.until(bound).resolve(action)
  }

  /// Confines the walk to the one `unit` that contains the receiver.
  pub fn of_the(mut self, unit: Unit) -> Chain<T> {
    self.limits.of_the = Some(unit);
    self
  }
  pub fn of_the_then<R, F>(self, unit: Unit, action: F) -> Result<Option<Outcome<T, R>>, T::Error>
  where
    F: FnMut(&T) -> R,
  {
    self.of_the(unit).resolve(action)
  }

  /// Walks from `start` up to the current receiver instead.
  ///
  /// The chain is rebuilt on `start` with the old receiver as its bound. A
  /// pending iterator call moves across; limits set on the old receiver
  /// do not.
  pub fn from<B: IntoBound<T>>(self, start: B) -> Chain<T> {
    let Chain {
      receiver, pending, ..
    } = self;
    Chain {
      receiver: start.into_bound(),
      limits: Limits {
        until: Some(receiver),
        of_the: None,
      },
      pending,
    }
  }
  pub fn from_then<B, R, F>(self, start: B, action: F) -> Result<Option<Outcome<T, R>>, T::Error>
  where
    B: IntoBound<T>,
    F: FnMut(&T) -> R,
  {
    self.from(start).resolve(action)
  }

  /// Records an iterator call to be run once an action is supplied.
  ///
  /// Only one call is ever pending; a second one replaces the first.
  pub fn defer(mut self, operation: Operation) -> Chain<T> {
    if let Some(replaced) = self.pending.replace(operation) {
      debug!(?replaced, ?operation, "replacing deferred walk");
    } else {
      debug!(?operation, "deferring walk");
    }
    self
  }
  pub fn each_later(self, unit: Unit) -> Chain<T> {
    self.defer(Operation::new(unit, Preset::Each))
  }
  pub fn beginning_of_each_later(self, unit: Unit) -> Chain<T> {
    self.defer(Operation::new(unit, Preset::BeginningOfEach))
  }
  pub fn map_each_later(self, unit: Unit) -> Chain<T> {
    self.defer(Operation::new(unit, Preset::MapEach))
  }
  pub fn map_beginning_of_each_later(self, unit: Unit) -> Chain<T> {
    self.defer(Operation::new(unit, Preset::MapBeginningOfEach))
  }

  /// Runs the pending call with `action`.
  ///
  /// `Ok(None)` means there was nothing to resolve.
  pub fn resolve<R, F>(mut self, action: F) -> Result<Option<Outcome<T, R>>, T::Error>
  where
    F: FnMut(&T) -> R,
  {
    match self.pending.take() {
      None => {
        debug!("nothing to resolve");
        Ok(None)
      }
      Some(operation) => {
        debug!(?operation, "resolving deferred walk");
        self.dispatch(operation, action).map(Some)
      }
    }
  }

  fn dispatch<R, F>(self, operation: Operation, action: F) -> Result<Outcome<T, R>, T::Error>
  where
    F: FnMut(&T) -> R,
  {
    let window = self.window(operation.unit, operation.effective_options())?;
    match operation.preset {
      Preset::Each | Preset::BeginningOfEach => {
        engine::visit(window, action)?;
        Ok(Outcome::Receiver(self.receiver))
      }
      Preset::MapEach | Preset::MapBeginningOfEach => engine::collect(window, action).map(Outcome::Collected),
    }
  }

  pub fn window(&self, unit: Unit, options: IterationOptions) -> Result<Window<T>, T::Error> {
    resolve(&self.receiver, &self.limits, unit, options)
  }

  /// The points a walk would visit, as a lazy iterator.
  pub fn steps(&self, unit: Unit, options: IterationOptions) -> Result<Steps<T>, T::Error> {
    self.window(unit, options).map(Steps::new)
  }

  /// Walks `unit` with arbitrary options; `options.map_result` decides
  /// whether results are collected.
  pub fn iterate<R, F>(self, unit: Unit, options: IterationOptions, action: F) -> Result<Outcome<T, R>, T::Error>
  where
    F: FnMut(&T) -> R,
  {
    let window = self.window(unit, options)?;
    engine::run(&self.receiver, window, action)
  }

  pub fn each<F: FnMut(&T)>(self, unit: Unit, action: F) -> Result<T, T::Error> {
    self.visit(Operation::new(unit, Preset::Each), action)
  }
  pub fn beginning_of_each<F: FnMut(&T)>(self, unit: Unit, action: F) -> Result<T, T::Error> {
    self.visit(Operation::new(unit, Preset::BeginningOfEach), action)
  }
  pub fn map_each<R, F: FnMut(&T) -> R>(self, unit: Unit, action: F) -> Result<Vec<R>, T::Error> {
    self.collect(Operation::new(unit, Preset::MapEach), action)
  }
  pub fn map_beginning_of_each<R, F: FnMut(&T) -> R>(self, unit: Unit, action: F) -> Result<Vec<R>, T::Error> {
    self.collect(Operation::new(unit, Preset::MapBeginningOfEach), action)
  }

  fn visit<F: FnMut(&T)>(self, operation: Operation, action: F) -> Result<T, T::Error> {
    engine::visit(self.window(operation.unit, operation.effective_options())?, action)?;
    Ok(self.receiver)
  }
  fn collect<R, F: FnMut(&T) -> R>(self, operation: Operation, action: F) -> Result<Vec<R>, T::Error> {
    engine::collect(self.window(operation.unit, operation.effective_options())?, action)
  }
}

/// Fluent walks started directly on a time value.
///
/// Every method starts a fresh [`Chain`] on a clone of `self`.
pub trait TimeWalk: TimePoint {
  fn walk(&self) -> Chain<Self> {
    Chain::new(self.clone())
  }

  fn until<B: IntoBound<Self>>(&self, bound: B) -> Chain<Self> {
    self.walk().until(bound)
  }
  fn of_the(&self, unit: Unit) -> Chain<Self> {
    self.walk().of_the(unit)
  }
  fn from<B: IntoBound<Self>>(&self, start: B) -> Chain<Self> {
    self.walk().from(start)
  }

  fn defer(&self, operation: Operation) -> Chain<Self> {
    self.walk().defer(operation)
  }
  fn each_later(&self, unit: Unit) -> Chain<Self> {
    self.walk().each_later(unit)
  }
  fn beginning_of_each_later(&self, unit: Unit) -> Chain<Self> {
    self.walk().beginning_of_each_later(unit)
  }
  fn map_each_later(&self, unit: Unit) -> Chain<Self> {
    self.walk().map_each_later(unit)
  }
  fn map_beginning_of_each_later(&self, unit: Unit) -> Chain<Self> {
    self.walk().map_beginning_of_each_later(unit)
  }

  fn iterate<R, F: FnMut(&Self) -> R>(
    &self,
    unit: Unit,
    options: IterationOptions,
    action: F,
  ) -> Result<Outcome<Self, R>, Self::Error> {
    self.walk().iterate(unit, options, action)
  }
  fn steps(&self, unit: Unit, options: IterationOptions) -> Result<Steps<Self>, Self::Error> {
    self.walk().steps(unit, options)
  }

  fn each<F: FnMut(&Self)>(&self, unit: Unit, action: F) -> Result<Self, Self::Error> {
    self.walk().each(unit, action)
  }
  fn beginning_of_each<F: FnMut(&Self)>(&self, unit: Unit, action: F) -> Result<Self, Self::Error> {
    self.walk().beginning_of_each(unit, action)
  }
  fn map_each<R, F: FnMut(&Self) -> R>(&self, unit: Unit, action: F) -> Result<Vec<R>, Self::Error> {
    self.walk().map_each(unit, action)
  }
  fn map_beginning_of_each<R, F: FnMut(&Self) -> R>(&self, unit: Unit, action: F) -> Result<Vec<R>, Self::Error> {
    self.walk().map_beginning_of_each(unit, action)
  }
}

impl<T: TimePoint> TimeWalk for T {}
