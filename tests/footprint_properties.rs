use chrono::NaiveDate;
use ecotrack_carbon::{
    compute_footprint, electricity_footprint, food_footprint, record_entry, round_kg,
    transport_footprint, waste_footprint, CalculationRequest, EntryPayload, FactorTables,
    FoodConsumption, Month, Report, GRID_AVERAGE,
};
use proptest::prelude::*;

fn has_three_decimals(kg: f64) -> bool {
    let scaled = kg * 1000.0;
    (scaled - scaled.round()).abs() < 1e-6
}

#[test]
fn reference_values() {
    let t = FactorTables::standard();
    assert_eq!(electricity_footprint(&t, 1000.0, 1.0, 1.0, Some(GRID_AVERAGE)), 0.43);
    assert_eq!(electricity_footprint(&t, 3500.0, 2.0, 1.0, Some("COAL")), 6.65);
    assert_eq!(electricity_footprint(&t, 1000.0, 1.0, 1.0, Some("UNKNOWN")), 0.43);
    assert_eq!(transport_footprint(&t, "Bicycle", 100.0), 0.0);
    assert_eq!(transport_footprint(&t, "Car (Gasoline)", 50.0), 9.6);
    assert_eq!(food_footprint(&t, "Beef", 1.0), 27.0);
    assert_eq!(food_footprint(&t, "Vegetables", 2.0), 4.0);
    assert_eq!(waste_footprint(10.0), 5.0);
}

#[test]
fn jsonl_entries_to_report() {
    let t = FactorTables::standard();
    let today = NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date");
    let lines = [
        r#"{"category":"Energy","applianceName":"Refrigerator","hoursUsed":24,"date":"2025-01-05"}"#,
        r#"{"category":"transportation","transportType":"Car (Gasoline)","distance":50}"#,
        r#"{"category":"Food","foodType":"Beef","quantity":1,"date":"2025-03-01"}"#,
        r#"{"category":"Waste","quantityKg":10,"date":"2025-01-31"}"#,
    ];
    let entries: Vec<_> = lines
        .iter()
        .map(|l| {
            let payload = EntryPayload::from_json(l).expect("payload parses");
            record_entry(&payload, &t, today).expect("entry records")
        })
        .collect();

    let report = Report::build(&entries, Month::new(2025, 3));
    assert_eq!(report.summary.count, 4);
    assert_eq!(report.summary.total, 43.148);
    assert_eq!(report.categories.len(), 4);
    let march = report.monthly.expect("month requested");
    assert_eq!(march.len(), 2);
    assert_eq!(march.iter().map(|c| c.count).sum::<usize>(), 2);
}

proptest! {
    #[test]
    fn results_are_non_negative_and_rounded(
        power in 0.0f64..10_000.0,
        hours in 0.0f64..24.0,
        days in 0.0f64..365.0,
        source_idx in 0usize..9,
    ) {
        let t = FactorTables::standard();
        let sources = t.energy_sources();
        let source = sources.get(source_idx).copied().unwrap_or("NOT_A_SOURCE");
        let kg = electricity_footprint(&t, power, hours, days, Some(source));
        prop_assert!(kg >= 0.0);
        prop_assert!(has_three_decimals(kg));
    }

    #[test]
    fn any_distance_any_type_is_non_negative(distance in -1_000.0f64..100_000.0, name in ".{0,20}") {
        let t = FactorTables::standard();
        let kg = transport_footprint(&t, &name, distance);
        prop_assert!(kg >= 0.0);
        prop_assert!(has_three_decimals(kg));
    }

    #[test]
    fn compute_is_deterministic(quantity in 0.0f64..1_000.0, idx in 0usize..14) {
        let t = FactorTables::standard();
        let food_type = t.food_types()[idx].to_string();
        let req = CalculationRequest::Food(FoodConsumption { food_type, quantity_kg: quantity });
        prop_assert_eq!(compute_footprint(&t, &req), compute_footprint(&t, &req));
    }

    #[test]
    fn rounding_is_stable(kg in 0.0f64..1_000_000.0) {
        let once = round_kg(kg);
        prop_assert_eq!(round_kg(once), once);
        prop_assert!((once - kg).abs() <= 0.0005 + 1e-9);
    }
}
