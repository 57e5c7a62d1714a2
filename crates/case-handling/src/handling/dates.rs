use std::fmt;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::warn;

/// Source of "today" for the fallback applied to unparsable date text.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Reads the local calendar date from the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single date, used for reproducible runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Result of parsing a `d/M/yyyy` date, recording whether the fallback fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDate {
    pub date: NaiveDate,
    pub fell_back: bool,
}

/// Date predicates consumed by rule sets.
///
/// Every operation accepts date text in `d/M/yyyy` order. Text that does not denote a
/// calendar date never fails: it resolves to the clock's current date instead.
#[derive(Clone)]
pub struct DateCalculator {
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for DateCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateCalculator")
            .field("today", &self.clock.today())
            .finish()
    }
}

impl Default for DateCalculator {
    fn default() -> Self {
        Self::system()
    }
}

impl DateCalculator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    pub fn fixed(today: NaiveDate) -> Self {
        Self::new(Arc::new(FixedClock(today)))
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn parse(&self, text: &str) -> NaiveDate {
        self.parse_detailed(text).date
    }

    pub fn parse_detailed(&self, text: &str) -> ParsedDate {
        match parse_day_month_year(text) {
            Some(date) => ParsedDate {
                date,
                fell_back: false,
            },
            None => {
                let today = self.clock.today();
                warn!(input = text, %today, "unparsable date text, falling back to today");
                ParsedDate {
                    date: today,
                    fell_back: true,
                }
            }
        }
    }

    /// Signed number of calendar days from `from` to `to`.
    pub fn days_between(&self, from: &str, to: &str) -> i64 {
        let start = self.parse(from);
        let end = self.parse(to);
        end.signed_duration_since(start).num_days()
    }

    pub fn same_day(&self, a: &str, b: &str) -> bool {
        self.parse(a) == self.parse(b)
    }

    pub fn is_before(&self, a: &str, b: &str) -> bool {
        self.parse(a) < self.parse(b)
    }

    pub fn is_after(&self, a: &str, b: &str) -> bool {
        self.is_before(b, a)
    }
}

fn parse_day_month_year(text: &str) -> Option<NaiveDate> {
    let mut parts = text.split('/');
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let well_formed = |part: &str, min: usize, max: usize| {
        (min..=max).contains(&part.len()) && part.bytes().all(|byte| byte.is_ascii_digit())
    };
    if !(well_formed(day, 1, 2) && well_formed(month, 1, 2) && well_formed(year, 4, 4)) {
        return None;
    }

    NaiveDate::parse_from_str(text, "%d/%m/%Y").ok()
}
