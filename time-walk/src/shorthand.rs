//! Per-unit names for every iterator and the scope limiter:
//! `each_day`, `beginning_of_each_day`, `map_each_day`,
//! `map_beginning_of_each_day`, `of_the_day`, and so on for every unit.

use crate::{Chain, Operation, Preset, TimePoint, TimeWalk, Unit};

macro_rules! unit_shorthands {
  ($(
    $Unit: ident {
      $each: ident,
      $beginning_of_each: ident,
      $map_each: ident,
      $map_beginning_of_each: ident,
      $of_the: ident,
    }
  )*) => {
    impl<T: TimePoint> Chain<T> {
      $(
        pub fn $each<F: FnMut(&T)>(self, action: F) -> Result<T, T::Error> {
          self.each(Unit::$Unit, action)
        }
        pub fn $beginning_of_each<F: FnMut(&T)>(self, action: F) -> Result<T, T::Error> {
          self.beginning_of_each(Unit::$Unit, action)
        }
        pub fn $map_each<R, F: FnMut(&T) -> R>(self, action: F) -> Result<Vec<R>, T::Error> {
          self.map_each(Unit::$Unit, action)
        }
        pub fn $map_beginning_of_each<R, F: FnMut(&T) -> R>(self, action: F) -> Result<Vec<R>, T::Error> {
          self.map_beginning_of_each(Unit::$Unit, action)
        }
        pub fn $of_the(self) -> Chain<T> {
          self.of_the(Unit::$Unit)
        }
      )*
    }

    /// The per-unit forms of [`TimeWalk`], available on every time value.
    pub trait UnitWalk: TimeWalk {
      $(
        fn $each<F: FnMut(&Self)>(&self, action: F) -> Result<Self, Self::Error> {
          self.walk().$each(action)
        }
        fn $beginning_of_each<F: FnMut(&Self)>(&self, action: F) -> Result<Self, Self::Error> {
          self.walk().$beginning_of_each(action)
        }
        fn $map_each<R, F: FnMut(&Self) -> R>(&self, action: F) -> Result<Vec<R>, Self::Error> {
          self.walk().$map_each(action)
        }
        fn $map_beginning_of_each<R, F: FnMut(&Self) -> R>(&self, action: F) -> Result<Vec<R>, Self::Error> {
          self.walk().$map_beginning_of_each(action)
        }
        fn $of_the(&self) -> Chain<Self> {
          self.walk().$of_the()
        }
      )*
    }

    // Deferred forms, for handing to `Chain::defer`.
    impl Operation {
      $(
        pub fn $each() -> Operation {
          Operation::new(Unit::$Unit, Preset::Each)
        }
        pub fn $beginning_of_each() -> Operation {
          Operation::new(Unit::$Unit, Preset::BeginningOfEach)
        }
        pub fn $map_each() -> Operation {
          Operation::new(Unit::$Unit, Preset::MapEach)
        }
        pub fn $map_beginning_of_each() -> Operation {
          Operation::new(Unit::$Unit, Preset::MapBeginningOfEach)
        }
      )*
    }
  }
}

unit_shorthands! {
  Year {each_year, beginning_of_each_year, map_each_year, map_beginning_of_each_year, of_the_year,}
  Month {each_month, beginning_of_each_month, map_each_month, map_beginning_of_each_month, of_the_month,}
  Day {each_day, beginning_of_each_day, map_each_day, map_beginning_of_each_day, of_the_day,}
  Hour {each_hour, beginning_of_each_hour, map_each_hour, map_beginning_of_each_hour, of_the_hour,}
  Minute {each_minute, beginning_of_each_minute, map_each_minute, map_beginning_of_each_minute, of_the_minute,}
  Second {each_second, beginning_of_each_second, map_each_second, map_beginning_of_each_second, of_the_second,}
  Microsecond {
    each_microsecond,
    beginning_of_each_microsecond,
    map_each_microsecond,
    map_beginning_of_each_microsecond,
    of_the_microsecond,
  }
}

impl<T: TimeWalk> UnitWalk for T {}
