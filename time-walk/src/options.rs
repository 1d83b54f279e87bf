use serde::{Deserialize, Serialize};

use crate::Unit;

/// Per-walk switches.
///
/// Deserializing fills any missing field from `Default`, so a stored preset
/// only needs to mention what it changes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct IterationOptions {
  /// Collect the return value of every step.
  pub map_result: bool,
  /// Snap the starting point to the beginning of the walked unit.
  pub beginning_of: bool,
  /// Accepted and carried along, but resolution never reads it.
  pub end_of: bool,
  pub include_start: bool,
  pub include_end: bool,
}

impl Default for IterationOptions {
  fn default() -> Self {
    IterationOptions {
      map_result: false,
      beginning_of: false,
      end_of: false,
      include_start: false,
      include_end: true,
    }
  }
}

/// The four ways of iterating: with or without beginning-of truncation,
/// for side effects or collecting results.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
  Each,
  BeginningOfEach,
  MapEach,
  MapBeginningOfEach,
}

impl Preset {
  pub fn collects(self) -> bool {
    match self {
      Preset::Each | Preset::BeginningOfEach => false,
      Preset::MapEach | Preset::MapBeginningOfEach => true,
    }
  }
  pub fn truncates(self) -> bool {
    match self {
      Preset::Each | Preset::MapEach => false,
      Preset::BeginningOfEach | Preset::MapBeginningOfEach => true,
    }
  }

  /// Forces this preset's flags onto caller options.
  ///
  /// `map_result` always follows the preset. The truncating presets force
  /// `beginning_of` on; the others leave whatever the caller asked for.
  pub fn apply(self, mut options: IterationOptions) -> IterationOptions {
    options.map_result = self.collects();
    options.beginning_of |= self.truncates();
    options
  }
}

/// An iterator call that has been recorded but not run yet.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub struct Operation {
  pub unit: Unit,
  pub preset: Preset,
  #[serde(default)]
  pub options: IterationOptions,
}

impl Operation {
  pub fn new(unit: Unit, preset: Preset) -> Operation {
    Operation {
      unit,
      preset,
      options: IterationOptions::default(),
    }
  }
  pub fn with_options(mut self, options: IterationOptions) -> Operation {
    self.options = options;
    self
  }
  /// The options the walk will actually run with.
  pub fn effective_options(&self) -> IterationOptions {
    self.preset.apply(self.options)
  }
}
