//! # cistern-calendar
//!
//! Day-of-year arithmetic for the fixed 365-day synthetic year.
//!
//! Synthetic rainfall years never model 29 February: every year has exactly
//! [`DAYS_PER_YEAR`] days and February always has 28.
//!
//! ```
//! use cistern_calendar::Doy;
//!
//! let doy = Doy::new(60).unwrap();
//! assert_eq!(doy.month_day(), (3, 1));
//! assert_eq!(doy.month(), 3);
//! ```

mod doy;
mod error;
mod month;

pub use doy::{DAYS_PER_YEAR, Doy};
pub use error::CalendarError;
pub use month::{MONTH_LABELS, days_in_month};
