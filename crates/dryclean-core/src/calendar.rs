//! Month grids for the pickup/delivery date picker.

use chrono::{Datelike, NaiveDate};

/// One calendar week, Sunday first. Days outside the month are `None`.
pub type Week = [Option<NaiveDate>; 7];

/// Builds the day grid for `year`/`month` (1-based month).
///
/// Returns `None` for an invalid month. The first week is padded with
/// leading `None`s up to the weekday of the 1st; the last week is padded
/// with trailing `None`s.
#[must_use]
pub fn month_grid(year: i32, month: u32) -> Option<Vec<Week>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let lead = first.weekday().num_days_from_sunday() as usize;

    let mut weeks = Vec::with_capacity(6);
    let mut week: Week = [None; 7];
    let mut slot = lead;

    for day in first.iter_days().take_while(|d| d.month() == month) {
        week[slot] = Some(day);
        slot += 1;
        if slot == 7 {
            weeks.push(week);
            week = [None; 7];
            slot = 0;
        }
    }
    if slot > 0 {
        weeks.push(week);
    }

    Some(weeks)
}

/// Moves `year`/`month` by `delta` months, wrapping across years.
///
/// Returns `None` if the result does not fit in an `i32` month count.
#[must_use]
pub fn shift_month(year: i32, month: u32, delta: i32) -> Option<(i32, u32)> {
    let zero_based = year
        .checked_mul(12)?
        .checked_add(i32::try_from(month).ok()?.checked_sub(1)?)?
        .checked_add(delta)?;
    let new_year = zero_based.div_euclid(12);
    let new_month = u32::try_from(zero_based.rem_euclid(12)).ok()? + 1;
    Some((new_year, new_month))
}

/// Whether `date` may be picked: not before `today`.
#[must_use]
pub fn is_selectable(date: NaiveDate, today: NaiveDate) -> bool {
    date >= today
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: Option<NaiveDate>) -> Option<u32> {
        d.map(|d| d.day())
    }

    #[test]
    fn grid_pads_leading_days() {
        // 2025-10-01 is a Wednesday.
        let grid = month_grid(2025, 10).expect("valid month");
        let first_week: Vec<_> = grid[0].iter().copied().map(day).collect();
        assert_eq!(
            first_week,
            vec![None, None, None, Some(1), Some(2), Some(3), Some(4)]
        );
        assert_eq!(grid.len(), 5);
        let last_week: Vec<_> = grid[4].iter().copied().map(day).collect();
        assert_eq!(
            last_week,
            vec![Some(26), Some(27), Some(28), Some(29), Some(30), Some(31), None]
        );
    }

    #[test]
    fn grid_for_month_starting_on_sunday_has_no_leading_padding() {
        // 2026-02-01 is a Sunday and February 2026 has 28 days.
        let grid = month_grid(2026, 2).unwrap();
        assert_eq!(grid.len(), 4);
        assert_eq!(day(grid[0][0]), Some(1));
        assert_eq!(day(grid[3][6]), Some(28));
    }

    #[test]
    fn grid_handles_leap_february() {
        let grid = month_grid(2024, 2).unwrap();
        let count = grid.iter().flatten().filter(|d| d.is_some()).count();
        assert_eq!(count, 29);
    }

    #[test]
    fn grid_rejects_invalid_month() {
        assert!(month_grid(2025, 13).is_none());
        assert!(month_grid(2025, 0).is_none());
    }

    #[test]
    fn shift_month_wraps_years() {
        assert_eq!(shift_month(2025, 12, 1), Some((2026, 1)));
        assert_eq!(shift_month(2025, 1, -1), Some((2024, 12)));
        assert_eq!(shift_month(2025, 6, 0), Some((2025, 6)));
        assert_eq!(shift_month(2025, 3, -15), Some((2023, 12)));
    }

    #[test]
    fn shift_month_rejects_overflowing_offsets() {
        assert_eq!(shift_month(2026, 10, i32::MAX), None);
        assert_eq!(shift_month(-2026, 10, i32::MIN), None);
        assert_eq!(shift_month(i32::MAX, 1, 0), None);
    }

    #[test]
    fn past_days_are_not_selectable() {
        let today = NaiveDate::from_ymd_opt(2025, 10, 19).unwrap();
        assert!(!is_selectable(today.pred_opt().unwrap(), today));
        assert!(is_selectable(today, today));
    }
}
