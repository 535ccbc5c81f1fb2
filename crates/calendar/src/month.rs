//! Month lengths and labels.

use crate::error::CalendarError;

/// Days in each month, January first. February is always 28 days.
pub(crate) const DAYS_PER_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Three-letter English month labels, January first.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Returns the number of days in a 1-indexed month.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12.
pub fn days_in_month(month: u8) -> Result<u8, CalendarError> {
    check_month(month)?;
    Ok(DAYS_PER_MONTH[(month - 1) as usize])
}

fn check_month(month: u8) -> Result<(), CalendarError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(CalendarError::InvalidMonth { month })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_lengths_sum_to_year() {
        let total: u16 = DAYS_PER_MONTH.iter().map(|&d| u16::from(d)).sum();
        assert_eq!(total, 365);
    }

    #[test]
    fn february_has_no_leap_day() {
        assert_eq!(days_in_month(2).unwrap(), 28);
    }

    #[test]
    fn labels() {
        assert_eq!(MONTH_LABELS[0], "Jan");
        assert_eq!(MONTH_LABELS[11], "Dec");
    }

    #[test]
    fn out_of_range_month() {
        assert_eq!(
            days_in_month(0).unwrap_err(),
            CalendarError::InvalidMonth { month: 0 }
        );
    }
}
