use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Timelike, Utc};
use std::convert::TryFrom;

use super::*;

fn shift_months(time: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
  let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
  if months >= 0 {
    time.checked_add_months(magnitude)
  } else {
    time.checked_sub_months(magnitude)
  }
}

fn fixed_delta(unit: Unit, count: i64) -> Option<TimeDelta> {
  match unit {
    Unit::Day => TimeDelta::try_days(count),
    Unit::Hour => TimeDelta::try_hours(count),
    Unit::Minute => TimeDelta::try_minutes(count),
    Unit::Second => TimeDelta::try_seconds(count),
    Unit::Microsecond => Some(TimeDelta::microseconds(count)),
    Unit::Year | Unit::Month => None,
  }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
  date.and_time(NaiveTime::MIN)
}

impl TimePoint for NaiveDateTime {
  type Error = TimeError;

  fn advance(&self, unit: Unit, count: i64) -> Result<Self, TimeError> {
    let moved = match unit {
      // calendar units clamp to the end of a shorter month
      Unit::Year => count.checked_mul(12).and_then(|months| shift_months(*self, months)),
      Unit::Month => shift_months(*self, count),
      _ => fixed_delta(unit, count).and_then(|delta| self.checked_add_signed(delta)),
    };
    moved.ok_or(TimeError::OutOfRange { unit, count })
  }

  fn beginning_of(&self, unit: Unit) -> Result<Self, TimeError> {
    let date = self.date();
    let truncated = match unit {
      Unit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1).map(midnight),
      Unit::Month => NaiveDate::from_ymd_opt(date.year(), date.month(), 1).map(midnight),
      Unit::Day => Some(midnight(date)),
      Unit::Hour => self
        .with_minute(0)
        .and_then(|time| time.with_second(0))
        .and_then(|time| time.with_nanosecond(0)),
      Unit::Minute => self.with_second(0).and_then(|time| time.with_nanosecond(0)),
      Unit::Second => self.with_nanosecond(0),
      Unit::Microsecond => self.with_nanosecond(self.nanosecond() / 1_000 * 1_000),
    };
    truncated.ok_or(TimeError::Truncation { unit })
  }

  fn end_of(&self, unit: Unit) -> Result<Self, TimeError> {
    let next = self.beginning_of(unit)?.successor(unit)?;
    next
      .checked_sub_signed(TimeDelta::nanoseconds(1))
      .ok_or(TimeError::OutOfRange { unit, count: 1 })
  }
}

// Utc has no offset changes, so everything goes through the naive value.
impl TimePoint for DateTime<Utc> {
  type Error = TimeError;

  fn advance(&self, unit: Unit, count: i64) -> Result<Self, TimeError> {
    Ok(Utc.from_utc_datetime(&self.naive_utc().advance(unit, count)?))
  }
  fn beginning_of(&self, unit: Unit) -> Result<Self, TimeError> {
    Ok(Utc.from_utc_datetime(&self.naive_utc().beginning_of(unit)?))
  }
  fn end_of(&self, unit: Unit) -> Result<Self, TimeError> {
    Ok(Utc.from_utc_datetime(&self.naive_utc().end_of(unit)?))
  }
}

impl IntoBound<NaiveDateTime> for NaiveDate {
  fn into_bound(self) -> NaiveDateTime {
    midnight(self)
  }
}
impl IntoBound<DateTime<Utc>> for NaiveDate {
  fn into_bound(self) -> DateTime<Utc> {
    Utc.from_utc_datetime(&midnight(self))
  }
}
impl IntoBound<DateTime<Utc>> for NaiveDateTime {
  fn into_bound(self) -> DateTime<Utc> {
    Utc.from_utc_datetime(&self)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;
  use quickcheck::quickcheck;

  fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
      .and_then(|date| date.and_hms_opt(hour, minute, second))
      .unwrap()
  }

  fn arbitrary_time() -> impl Strategy<Value = NaiveDateTime> {
    (
      1800i32..2200,
      1u32..=12,
      1u32..=28,
      0u32..24,
      0u32..60,
      0u32..60,
      0u32..1_000_000_000,
    )
      .prop_map(|(year, month, day, hour, minute, second, nano)| {
        at(year, month, day, hour, minute, second)
          .with_nanosecond(nano)
          .unwrap()
      })
  }

  #[test]
  fn month_arithmetic_clamps() {
    let inputs = vec![
      (at(2024, 1, 31, 10, 0, 0), Unit::Month, 1, at(2024, 2, 29, 10, 0, 0)),
      (at(2023, 1, 31, 10, 0, 0), Unit::Month, 1, at(2023, 2, 28, 10, 0, 0)),
      (at(2024, 3, 31, 0, 0, 0), Unit::Month, -1, at(2024, 2, 29, 0, 0, 0)),
      (at(2024, 2, 29, 0, 0, 0), Unit::Year, 1, at(2025, 2, 28, 0, 0, 0)),
      (at(2024, 12, 31, 23, 0, 0), Unit::Hour, 1, at(2025, 1, 1, 0, 0, 0)),
      (at(2024, 1, 1, 0, 0, 0), Unit::Second, -1, at(2023, 12, 31, 23, 59, 59)),
    ];
    for (start, unit, count, expected) in inputs {
      println!("{:?}", (start, unit, count));
      assert_eq!(start.advance(unit, count), Ok(expected));
    }
  }

  #[test]
  fn truncation_edges() {
    let time = at(2024, 7, 16, 13, 45, 12).with_nanosecond(123_456_789).unwrap();
    assert_eq!(time.beginning_of(Unit::Year), Ok(at(2024, 1, 1, 0, 0, 0)));
    assert_eq!(time.beginning_of(Unit::Month), Ok(at(2024, 7, 1, 0, 0, 0)));
    assert_eq!(time.beginning_of(Unit::Day), Ok(at(2024, 7, 16, 0, 0, 0)));
    assert_eq!(time.beginning_of(Unit::Hour), Ok(at(2024, 7, 16, 13, 0, 0)));
    assert_eq!(time.beginning_of(Unit::Minute), Ok(at(2024, 7, 16, 13, 45, 0)));
    assert_eq!(time.beginning_of(Unit::Second), Ok(at(2024, 7, 16, 13, 45, 12)));
    assert_eq!(
      time.beginning_of(Unit::Microsecond),
      Ok(at(2024, 7, 16, 13, 45, 12).with_nanosecond(123_456_000).unwrap())
    );

    let last_nano = |time: NaiveDateTime| time.with_nanosecond(999_999_999).unwrap();
    assert_eq!(time.end_of(Unit::Year), Ok(last_nano(at(2024, 12, 31, 23, 59, 59))));
    assert_eq!(time.end_of(Unit::Month), Ok(last_nano(at(2024, 7, 31, 23, 59, 59))));
    assert_eq!(time.end_of(Unit::Day), Ok(last_nano(at(2024, 7, 16, 23, 59, 59))));
    assert_eq!(time.end_of(Unit::Second), Ok(last_nano(at(2024, 7, 16, 13, 45, 12))));
    assert_eq!(
      time.end_of(Unit::Microsecond),
      Ok(at(2024, 7, 16, 13, 45, 12).with_nanosecond(123_456_999).unwrap())
    );
  }

  #[test]
  fn out_of_range_is_reported() {
    assert_eq!(
      NaiveDateTime::MAX.successor(Unit::Day),
      Err(TimeError::OutOfRange { unit: Unit::Day, count: 1 })
    );
    assert_eq!(
      NaiveDateTime::MIN.predecessor(Unit::Year),
      Err(TimeError::OutOfRange { unit: Unit::Year, count: -1 })
    );
  }

  #[test]
  fn dates_become_midnight() {
    let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    let naive: NaiveDateTime = date.into_bound();
    assert_eq!(naive, at(2024, 2, 29, 0, 0, 0));
    let utc: DateTime<Utc> = date.into_bound();
    assert_eq!(utc.naive_utc(), naive);
  }

  #[test]
  fn utc_matches_naive() {
    let naive = at(2020, 2, 29, 23, 30, 0);
    let utc = Utc.from_utc_datetime(&naive);
    for unit in Unit::ALL.iter().copied() {
      assert_eq!(utc.successor(unit).unwrap().naive_utc(), naive.successor(unit).unwrap());
      assert_eq!(utc.end_of(unit).unwrap().naive_utc(), naive.end_of(unit).unwrap());
    }
  }

  proptest! {
    #[test]
    fn stepping_respects_ordering (time in arbitrary_time(), index in 0usize..7) {
      let unit = Unit::ALL[index];
      prop_assert!(time.successor(unit).unwrap() > time);
      prop_assert!(time.predecessor(unit).unwrap() < time);
    }

    #[test]
    fn unit_edges_bracket_the_point (time in arbitrary_time(), index in 0usize..7) {
      let unit = Unit::ALL[index];
      let beginning = time.beginning_of(unit).unwrap();
      let end = time.end_of(unit).unwrap();
      prop_assert!(beginning <= time && time <= end);
      prop_assert_eq!(end.beginning_of(unit).unwrap(), beginning);
      prop_assert_eq!(beginning.successor(unit).unwrap().beginning_of(unit).unwrap(), end.successor(unit).unwrap().beginning_of(unit).unwrap());
    }
  }

  quickcheck! {
    fn fixed_units_round_trip (seconds: i32, count: i16) -> bool {
      let time = at(2000, 1, 1, 0, 0, 0) + TimeDelta::seconds(i64::from(seconds));
      [Unit::Day, Unit::Hour, Unit::Minute, Unit::Second, Unit::Microsecond].iter().all(|unit| {
        let count = i64::from(count);
        time.advance(*unit, count).and_then(|moved| moved.advance(*unit, -count)) == Ok(time)
      })
    }
  }
}
