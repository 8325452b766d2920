use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Single time source for streak bookkeeping.
///
/// Streaks compare calendar days, so everything downstream works with
/// [`Clock::today`], the UTC date of [`Clock::now`].
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock that uses the current system time.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    /// Returns a clock fixed at the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    /// Returns a clock pinned to midday (UTC) of the given calendar date.
    #[must_use]
    pub fn fixed_date(date: NaiveDate) -> Self {
        date.and_hms_opt(12, 0, 0)
            .map_or(Self::Default, |midday| Self::Fixed(midday.and_utc()))
    }

    /// Returns the current time according to the clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Calendar day (UTC) the clock currently points at.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// If this is a fixed clock, advance it by the given duration.
    ///
    /// Has no effect on `Clock::Default`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }

    /// Advance a fixed clock by whole days.
    pub fn advance_days(&mut self, days: i64) {
        self.advance(Duration::days(days));
    }

    /// Returns true if this clock is fixed.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Clock::Fixed(_))
    }
}

/// Deterministic timestamp for tests and examples (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` fixed at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_calendar_day() {
        let clock = fixed_clock();
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2023, 11, 14).unwrap());
    }

    #[test]
    fn advance_days_moves_fixed_clock() {
        let mut clock = fixed_clock();
        clock.advance_days(2);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2023, 11, 16).unwrap());
    }

    #[test]
    fn advance_is_ignored_for_system_clock() {
        let mut clock = Clock::default_clock();
        clock.advance_days(30);
        assert!(!clock.is_fixed());
    }

    #[test]
    fn fixed_date_pins_midday() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let clock = Clock::fixed_date(date);
        assert_eq!(clock.today(), date);
        assert_eq!(clock.now().format("%H:%M").to_string(), "12:00");
    }
}
