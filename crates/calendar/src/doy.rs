//! Day-of-year newtype for the 365-day synthetic year.

use crate::error::CalendarError;
use crate::month::DAYS_PER_MONTH;

/// Number of days in every synthetic year.
pub const DAYS_PER_YEAR: u16 = 365;

/// `(month, day_in_month)` for each 0-based day index, built at compile time.
const MONTH_DAY: [(u8, u8); DAYS_PER_YEAR as usize] = build_month_day();

const fn build_month_day() -> [(u8, u8); DAYS_PER_YEAR as usize] {
    let mut table = [(0u8, 0u8); DAYS_PER_YEAR as usize];
    let mut idx = 0;
    let mut m = 0;
    while m < 12 {
        let mut d = 1;
        while d <= DAYS_PER_MONTH[m] {
            table[idx] = ((m + 1) as u8, d);
            idx += 1;
            d += 1;
        }
        m += 1;
    }
    table
}

/// Day of the synthetic year, 1..=365.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Doy(u16);

impl Doy {
    /// 1 January.
    pub const FIRST: Doy = Doy(1);
    /// 31 December.
    pub const LAST: Doy = Doy(DAYS_PER_YEAR);

    /// Creates a `Doy`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDoy`] if `doy` is not in 1..=365.
    pub fn new(doy: u16) -> Result<Self, CalendarError> {
        if !(1..=DAYS_PER_YEAR).contains(&doy) {
            return Err(CalendarError::InvalidDoy { doy });
        }
        Ok(Self(doy))
    }

    /// Iterates over all 365 days in order.
    pub fn all() -> impl DoubleEndedIterator<Item = Doy> + ExactSizeIterator {
        (1..=DAYS_PER_YEAR).map(Doy)
    }

    /// Returns the raw day-of-year (1..=365).
    pub fn get(self) -> u16 {
        self.0
    }

    /// Returns the 0-based index (0..=364).
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Returns `(month, day_in_month)`.
    pub fn month_day(self) -> (u8, u8) {
        MONTH_DAY[self.index()]
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u8 {
        self.month_day().0
    }

    /// Returns the following day, or `None` after 31 December.
    pub fn succ(self) -> Option<Doy> {
        (self.0 < DAYS_PER_YEAR).then(|| Doy(self.0 + 1))
    }
}
