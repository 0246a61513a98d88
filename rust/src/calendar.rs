//! Sprint day construction from an availability specification.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::models::{Availability, SprintDay};

/// English weekday name, as shown on sprint days.
pub fn weekday_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

/// Hours available on a date.
///
/// Lookup order: exact-date override, then the weekend/weekday bucket, then zero.
pub fn hours_for_date(availability: &Availability, date: NaiveDate) -> f64 {
    if let Some(&hours) = availability.date_overrides.get(&date) {
        return hours;
    }
    let bucket = if is_weekend(date.weekday()) {
        availability.weekend_hours
    } else {
        availability.weekday_hours
    };
    bucket.unwrap_or(0.0)
}

/// Build the ordered sprint days starting at `start_date`.
///
/// Returns exactly `sprint_length` days with nothing scheduled. Days past the end
/// of the representable calendar are not produced.
pub fn build_sprint_days(
    availability: &Availability,
    start_date: NaiveDate,
    sprint_length: usize,
) -> Vec<SprintDay> {
    (0..sprint_length)
        .map_while(|offset| start_date.checked_add_days(Days::new(offset as u64)))
        .map(|date| SprintDay {
            date,
            weekday_name: weekday_name(date),
            hours_available: hours_for_date(availability, date),
            hours_scheduled: 0.0,
            items: Vec::new(),
        })
        .collect()
}

/// Sum of hours available across the sprint.
pub fn total_available_hours(days: &[SprintDay]) -> f64 {
    days.iter().map(|day| day.hours_available).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn weekly(weekday: f64, weekend: f64) -> Availability {
        Availability {
            weekday_hours: Some(weekday),
            weekend_hours: Some(weekend),
            date_overrides: BTreeMap::new(),
        }
    }

    #[test]
    fn test_seven_days_from_saturday() {
        // 2024-05-04 is a Saturday
        let days = build_sprint_days(&weekly(3.0, 6.0), d(2024, 5, 4), 7);

        assert_eq!(days.len(), 7);
        assert_eq!(days[0].date, d(2024, 5, 4));
        assert_eq!(days[0].weekday_name, "Saturday");
        assert_eq!(days[1].weekday_name, "Sunday");
        assert_eq!(days[2].weekday_name, "Monday");
        assert_eq!(days[6].date, d(2024, 5, 10));

        let hours: Vec<f64> = days.iter().map(|day| day.hours_available).collect();
        assert_eq!(hours, vec![6.0, 6.0, 3.0, 3.0, 3.0, 3.0, 3.0]);
        assert_eq!(total_available_hours(&days), 27.0);

        for day in &days {
            assert_eq!(day.hours_scheduled, 0.0);
            assert!(day.items.is_empty());
        }
    }

    #[test]
    fn test_weekday_names_cover_full_week() {
        // 2024-05-06 is a Monday
        let names: Vec<String> = (6..13).map(|day| weekday_name(d(2024, 5, day))).collect();
        assert_eq!(
            names,
            vec!["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
        );
    }

    #[test]
    fn test_date_override_wins_over_bucket() {
        let mut availability = weekly(3.0, 6.0);
        availability.date_overrides.insert(d(2024, 5, 6), 0.0);
        availability.date_overrides.insert(d(2024, 5, 4), 1.5);

        let days = build_sprint_days(&availability, d(2024, 5, 4), 3);
        assert_eq!(days[0].hours_available, 1.5);
        assert_eq!(days[1].hours_available, 6.0);
        assert_eq!(days[2].hours_available, 0.0);
    }

    #[test]
    fn test_missing_data_degrades_to_zero() {
        let availability = Availability {
            weekday_hours: Some(2.0),
            weekend_hours: None,
            date_overrides: BTreeMap::new(),
        };
        let days = build_sprint_days(&availability, d(2024, 5, 4), 3);
        assert_eq!(days[0].hours_available, 0.0);
        assert_eq!(days[1].hours_available, 0.0);
        assert_eq!(days[2].hours_available, 2.0);

        let empty = build_sprint_days(&Availability::default(), d(2024, 5, 4), 7);
        assert_eq!(total_available_hours(&empty), 0.0);
    }

    #[test]
    fn test_custom_sprint_length_crosses_month() {
        let days = build_sprint_days(&weekly(1.0, 1.0), d(2024, 1, 30), 4);
        let dates: Vec<NaiveDate> = days.iter().map(|day| day.date).collect();
        assert_eq!(
            dates,
            vec![d(2024, 1, 30), d(2024, 1, 31), d(2024, 2, 1), d(2024, 2, 2)]
        );
    }
}
