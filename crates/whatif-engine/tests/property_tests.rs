use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use whatif_calendar::is_business_day;
use whatif_engine::{
    BacklogItem, FixedClock, FixedSample, ForecastEngine, RiskDrivers, SeededSampler, ShockAction,
    ShockDirective,
};

fn any_today() -> impl Strategy<Value = NaiveDate> {
    (0u64..3_650).prop_map(|offset| NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Days::new(offset))
}

fn any_drivers() -> impl Strategy<Value = RiskDrivers> {
    (0.0..=100.0f64, 0.0..=100.0f64, 0.0..=100.0f64).prop_map(|(c, s, a)| RiskDrivers {
        cognitive_load: c,
        system_complexity: s,
        absence_risk: a,
    })
}

fn item_with_offset(today: NaiveDate, due_offset: Option<i64>) -> BacklogItem {
    let item = BacklogItem::new("PRJ-P").with_assignee("u1");
    match due_offset {
        Some(offset) if offset >= 0 => item.with_due_date(today + Days::new(offset.unsigned_abs())),
        Some(offset) => item.with_due_date(today - Days::new(offset.unsigned_abs())),
        None => item,
    }
}

proptest! {
    #[test]
    fn prop_forecast_never_before_today(
        today in any_today(),
        due_offset in proptest::option::of(-90i64..180),
        drivers in any_drivers(),
        sample in 0.0..1.0f64,
        shocked in any::<bool>(),
    ) {
        let item = item_with_offset(today, due_offset);
        let shock = ShockDirective::new(["u1"], ShockAction::Sick3);
        let result = ForecastEngine::default()
            .forecast(&item, &drivers, shocked.then_some(&shock), &FixedClock(today), &mut FixedSample(sample))
            .unwrap();

        prop_assert!(result.simulated_date >= today);
        if result.breakdown.walk_days() > 0 {
            prop_assert!(is_business_day(result.simulated_date));
        } else {
            prop_assert_eq!(result.simulated_date, today);
        }
        prop_assert_eq!(result.is_overdue, due_offset.is_some_and(|o| o < 0));
        prop_assert_eq!(result.is_shocked, shocked);
        if due_offset.is_none() {
            prop_assert_eq!(result.delay_days, result.risk_days);
            prop_assert_eq!(result.original_date, None);
        }
    }

    #[test]
    fn prop_risk_days_cover_extra_duration(
        today in any_today(),
        due_offset in proptest::option::of(-90i64..180),
        drivers in any_drivers(),
        sample in 0.0..1.0f64,
    ) {
        let item = item_with_offset(today, due_offset);
        let result = ForecastEngine::default()
            .forecast(&item, &drivers, None, &FixedClock(today), &mut FixedSample(sample))
            .unwrap();

        #[allow(clippy::cast_precision_loss)]
        let extra = result.breakdown.total_days - result.breakdown.remaining_days as f64;
        #[allow(clippy::cast_precision_loss)]
        let risk = result.risk_days as f64;
        prop_assert!(risk + 1e-9 >= extra);
        prop_assert!(risk < extra + 1.0 + 1e-9);
    }

    #[test]
    fn prop_seeded_forecast_is_deterministic(
        today in any_today(),
        due_offset in proptest::option::of(-90i64..180),
        drivers in any_drivers(),
        seed in any::<u64>(),
    ) {
        let engine = ForecastEngine::default();
        let item = item_with_offset(today, due_offset);
        let clock = FixedClock(today);

        let first = engine.forecast(&item, &drivers, None, &clock, &mut SeededSampler::from_seed(seed)).unwrap();
        let second = engine.forecast(&item, &drivers, None, &clock, &mut SeededSampler::from_seed(seed)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_cognitive_load_is_monotonic(
        today in any_today(),
        due_offset in 0i64..180,
        low in 0.0..=100.0f64,
        high in 0.0..=100.0f64,
        complexity in 0.0..=100.0f64,
        sample in 0.0..1.0f64,
    ) {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let engine = ForecastEngine::default();
        let item = item_with_offset(today, Some(due_offset));
        let clock = FixedClock(today);

        let forecast = |load: f64| {
            let drivers = RiskDrivers { cognitive_load: load, system_complexity: complexity, absence_risk: 0.0 };
            engine.forecast(&item, &drivers, None, &clock, &mut FixedSample(sample)).unwrap()
        };
        let slow = forecast(high);
        let fast = forecast(low);

        prop_assert!(slow.breakdown.total_days >= fast.breakdown.total_days);
        prop_assert!(slow.risk_days >= fast.risk_days);
        prop_assert!(slow.simulated_date >= fast.simulated_date);
    }

    #[test]
    fn prop_no_work_no_movement(today in any_today(), due_back in 0u64..90, sample in 0.0..1.0f64) {
        // Due today or earlier leaves no remaining days
        let item = BacklogItem::new("PRJ-Z").with_due_date(today - Days::new(due_back));
        let result = ForecastEngine::default()
            .forecast(&item, &RiskDrivers::default(), None, &FixedClock(today), &mut FixedSample(sample))
            .unwrap();
        prop_assert_eq!(result.simulated_date, today);
        prop_assert_eq!(result.risk_days, 0);
    }
}
