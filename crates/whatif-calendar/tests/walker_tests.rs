use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use whatif_calendar::{add_business_days, business_days_between, is_business_day};

/// Day-at-a-time reference walk
fn naive_walk(start: NaiveDate, days: u64) -> NaiveDate {
    let mut current = start;
    let mut remaining = days;
    while remaining > 0 {
        current = current.succ_opt().unwrap();
        if is_business_day(current) {
            remaining -= 1;
        }
    }
    current
}

fn any_date() -> impl Strategy<Value = NaiveDate> {
    // 2000-01-01 plus up to ~60 years
    (0u64..22_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Days::new(offset)
    })
}

proptest! {
    #[test]
    fn prop_week_skipping_matches_reference_walk(start in any_date(), days in 0u64..400) {
        prop_assert_eq!(add_business_days(start, days), Some(naive_walk(start, days)));
    }

    #[test]
    fn prop_positive_walk_lands_on_business_day(start in any_date(), days in 1u64..400) {
        let end = add_business_days(start, days).unwrap();
        prop_assert!(is_business_day(end));
        prop_assert!(end > start);
    }

    #[test]
    fn prop_counting_inverts_walking(start in any_date(), days in 0u64..400) {
        let end = add_business_days(start, days).unwrap();
        prop_assert_eq!(business_days_between(start, end), i64::try_from(days).unwrap());
    }
}

#[test]
fn test_new_year_walk() {
    let tuesday = NaiveDate::from_ymd_opt(2025, 12, 30).unwrap();
    let expected = [
        (1, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()),
        (2, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()),
        (3, NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()),
        (4, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()),
    ];
    for (days, date) in expected {
        assert_eq!(add_business_days(tuesday, days), Some(date));
    }
}
