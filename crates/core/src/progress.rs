//! Date and funding math for project pages

use chrono::{Datelike, Days, Months, NaiveDate};

/// How far `today` is between `start` and `end`, in whole percent.
///
/// `None` unless both dates are set and the range is at least one day long.
pub fn progress_percent(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> Option<u8> {
    let (start, end) = (start?, end?);
    let total = (end - start).num_days();
    if total <= 0 {
        return None;
    }

    let elapsed = (today - start).num_days();
    let percent = (elapsed * 100 / total).clamp(0, 100);
    u8::try_from(percent).ok()
}

/// Days until `end`; negative once the project is overdue
pub fn days_remaining(end: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
    end.map(|end| (end - today).num_days())
}

/// Share of the goal raised, rounded half to even and capped at 100
pub fn funding_percentage(goal: f64, raised: f64) -> u8 {
    if goal.is_nan() || goal <= 0.0 || raised.is_nan() {
        return 0;
    }
    // Clamped to 0..=100 first, so the cast cannot truncate
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let percent = ((raised / goal) * 100.0).round_ties_even().clamp(0.0, 100.0) as u8;
    percent
}

/// Month `delta` months away from `year`/`month`
pub fn shift_month(year: i32, month: u32, delta: i32) -> Option<(i32, u32)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let shifted = if delta >= 0 {
        first.checked_add_months(Months::new(delta.unsigned_abs()))?
    } else {
        first.checked_sub_months(Months::new(delta.unsigned_abs()))?
    };
    Some((shifted.year(), shifted.month()))
}

/// Every day shown on a Monday-first calendar page for the month: whole weeks
/// from the Monday on or before the 1st to the Sunday on or after the last
/// day.
pub fn month_grid(year: i32, month: u32) -> Option<Vec<NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;

    let lead = u64::from(first.weekday().num_days_from_monday());
    let tail = 6 - u64::from(last.weekday().num_days_from_monday());
    let start = first.checked_sub_days(Days::new(lead))?;
    let end = last.checked_add_days(Days::new(tail))?;

    Some(start.iter_days().take_while(|day| *day <= end).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn progress_needs_both_dates_and_a_positive_range() {
        let today = date(2025, 6, 1);
        assert_eq!(progress_percent(None, Some(today), today), None);
        assert_eq!(progress_percent(Some(today), None, today), None);
        assert_eq!(progress_percent(Some(today), Some(today), today), None);
        assert_eq!(
            progress_percent(Some(date(2025, 6, 2)), Some(date(2025, 6, 1)), today),
            None
        );
    }

    #[test]
    fn progress_is_truncated_and_clamped() {
        let start = Some(date(2025, 1, 1));
        let end = Some(date(2025, 1, 4));
        assert_eq!(progress_percent(start, end, date(2025, 1, 2)), Some(33));
        assert_eq!(progress_percent(start, end, date(2025, 1, 3)), Some(66));
        assert_eq!(progress_percent(start, end, date(2024, 12, 1)), Some(0));
        assert_eq!(progress_percent(start, end, date(2025, 2, 1)), Some(100));
    }

    #[test]
    fn days_remaining_goes_negative_when_overdue() {
        let end = Some(date(2025, 6, 10));
        assert_eq!(days_remaining(end, date(2025, 6, 1)), Some(9));
        assert_eq!(days_remaining(end, date(2025, 6, 12)), Some(-2));
        assert_eq!(days_remaining(None, date(2025, 6, 12)), None);
    }

    #[test]
    fn funding_percentage_rounds_and_caps() {
        assert_eq!(funding_percentage(0.0, 50.0), 0);
        assert_eq!(funding_percentage(200.0, 50.0), 25);
        assert_eq!(funding_percentage(300.0, 100.0), 33);
        assert_eq!(funding_percentage(300.0, 200.0), 67);
        assert_eq!(funding_percentage(100.0, 250.0), 100);
    }

    #[test]
    fn funding_percentage_rounds_halves_to_even() {
        assert_eq!(funding_percentage(200.0, 25.0), 12);
        assert_eq!(funding_percentage(200.0, 27.0), 14);
        assert_eq!(funding_percentage(1000.0, 5.0), 0);
    }

    #[test]
    fn month_grid_covers_whole_weeks() {
        // March 2025 starts on a Saturday and ends on a Monday
        let days = month_grid(2025, 3).unwrap();
        assert_eq!(days.len() % 7, 0);
        assert_eq!(days.first(), Some(&date(2025, 2, 24)));
        assert_eq!(days.last(), Some(&date(2025, 4, 6)));
        assert_eq!(days[0].weekday(), Weekday::Mon);
        assert!(days.contains(&date(2025, 3, 31)));

        assert_eq!(month_grid(2025, 13), None);
    }

    #[test]
    fn shift_month_crosses_years() {
        assert_eq!(shift_month(2025, 1, -1), Some((2024, 12)));
        assert_eq!(shift_month(2025, 12, 1), Some((2026, 1)));
        assert_eq!(shift_month(2025, 6, 0), Some((2025, 6)));
    }
}
