use chrono::{Days, NaiveDate};
use commodity_forecast::models::{LinearTrendRegressor, RandomForestRegressor};
use commodity_forecast::{
    forecast, ForecastEngine, ForecastError, Observation, TrendDirection,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn obs(d: &str, price: f64) -> Observation {
    Observation::parse(d, price).unwrap()
}

fn daily(prices: &[f64]) -> Vec<Observation> {
    let origin = date("2024-01-01");
    prices
        .iter()
        .enumerate()
        .map(|(i, &p)| Observation::new(origin + Days::new(i as u64), p).unwrap())
        .collect()
}

fn scenario() -> Vec<Observation> {
    vec![
        obs("2024-01-01", 100.0),
        obs("2024-01-02", 102.0),
        obs("2024-01-03", 101.0),
        obs("2024-01-04", 105.0),
        obs("2024-01-05", 107.0),
    ]
}

#[rstest]
fn test_short_series_never_forecast(
    #[values(0, 1, 2, 3, 4)] count: usize,
    #[values(0, 1, 7, 30)] horizon: usize,
) {
    let series = daily(&vec![100.0; count]);
    let result = forecast(&series, horizon);

    match result {
        Err(ForecastError::InsufficientData { required, actual }) => {
            assert_eq!(required, 5);
            assert_eq!(actual, count);
        }
        other => panic!("Expected InsufficientData, got {:?}", other),
    }
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(7)]
#[case(45)]
fn test_output_shape(#[case] horizon: usize) {
    let result = forecast(&scenario(), horizon).unwrap();

    assert_eq!(result.future_dates.len(), horizon);
    assert_eq!(result.predicted_prices.len(), horizon);
    assert!(result.predicted_prices.iter().all(|p| *p >= 0.0));
}

#[test]
fn test_dates_continue_daily_after_latest_observation() {
    // Irregular, unsorted history with gaps
    let series = vec![
        obs("2024-01-10", 50.0),
        obs("2024-01-01", 48.0),
        obs("2024-01-20", 53.0),
        obs("2024-01-03", 47.5),
        obs("2024-01-11", 51.0),
    ];
    let result = forecast(&series, 4).unwrap();

    assert_eq!(
        result.future_dates,
        vec![
            date("2024-01-21"),
            date("2024-01-22"),
            date("2024-01-23"),
            date("2024-01-24"),
        ]
    );
    for pair in result.future_dates.windows(2) {
        assert_eq!((pair[1] - pair[0]).num_days(), 1);
    }
}

#[test]
fn test_identical_input_gives_identical_output() {
    let series = daily(&[
        120.0, 118.5, 125.0, 131.0, 127.0, 122.0, 119.0, 140.0, 135.0, 128.0,
    ]);
    let a = forecast(&series, 10).unwrap();
    let b = forecast(&series, 10).unwrap();

    assert_eq!(a, b);
    for (x, y) in a.predicted_prices.iter().zip(b.predicted_prices.iter()) {
        assert_eq!(x.to_bits(), y.to_bits());
    }
}

#[test]
fn test_input_order_does_not_matter() {
    let sorted = daily(&[80.0, 82.5, 81.0, 86.0, 90.0, 88.0, 91.5, 93.0]);
    let mut shuffled = sorted.clone();
    shuffled.swap(0, 5);
    shuffled.swap(2, 7);
    shuffled.reverse();

    let engine = ForecastEngine::new();
    assert_eq!(
        engine.forecast(&sorted, 5).unwrap(),
        engine.forecast(&shuffled, 5).unwrap()
    );

    let forest = ForecastEngine::with_regressor(RandomForestRegressor::default());
    assert_eq!(
        forest.forecast(&sorted, 5).unwrap(),
        forest.forecast(&shuffled, 5).unwrap()
    );
}

#[test]
fn test_caller_series_left_untouched() {
    let series = vec![
        obs("2024-01-05", 5.0),
        obs("2024-01-01", 1.0),
        obs("2024-01-04", 4.0),
        obs("2024-01-02", 2.0),
        obs("2024-01-03", 3.0),
    ];
    let before = series.clone();
    forecast(&series, 2).unwrap();

    assert_eq!(series, before);
}

#[test]
fn test_rising_series_trends_up() {
    let prices: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
    let result = forecast(&daily(&prices), 7).unwrap();

    assert_eq!(result.trend_direction, TrendDirection::Up);
    assert!(result.predicted_prices[6] > 109.0);
}

#[rstest]
#[case(vec![100.0; 10])]
#[case((0..10).map(|i| 200.0 - 3.0 * i as f64).collect())]
#[case(vec![50.0, 49.0, 51.0, 47.0, 46.0, 45.5, 44.0])]
fn test_flat_or_falling_series_trends_down(#[case] prices: Vec<f64>) {
    let result = forecast(&daily(&prices), 7).unwrap();

    assert_eq!(result.trend_direction, TrendDirection::Down);
}

#[test]
fn test_flat_series_predicts_flat() {
    let result = forecast(&daily(&[100.0; 6]), 3).unwrap();

    assert_eq!(result.predicted_prices, vec![100.0, 100.0, 100.0]);
}

#[test]
fn test_five_day_scenario() {
    let result = forecast(&scenario(), 3).unwrap();

    assert_eq!(
        result.date_labels(),
        vec!["2024-01-06", "2024-01-07", "2024-01-08"]
    );
    assert_eq!(result.predicted_prices.len(), 3);
    for price in &result.predicted_prices {
        assert!(*price > 95.0 && *price < 125.0, "price {} out of range", price);
        assert_eq!((price * 100.0).round() / 100.0, *price);
    }
    // The drift of +1.7/day keeps the last forecast above the last close of 107
    assert_eq!(result.trend_direction, TrendDirection::Up);
}

#[test]
fn test_three_observations_is_an_error() {
    let series = vec![
        obs("2024-01-01", 100.0),
        obs("2024-01-02", 102.0),
        obs("2024-01-03", 101.0),
    ];

    for horizon in [1, 3, 7, 100] {
        let error = forecast(&series, horizon).unwrap_err();
        assert!(error.is_insufficient_data());
        assert!(!error.to_string().is_empty());
    }
}

#[test]
fn test_trend_uses_last_of_equal_dates() {
    let base = [
        obs("2024-01-01", 100.0),
        obs("2024-01-02", 101.0),
        obs("2024-01-03", 102.0),
        obs("2024-01-04", 103.0),
    ];
    let engine = ForecastEngine::with_regressor(LinearTrendRegressor::new());

    // The fitted line is flat at 101 either way; only the last duplicate differs
    let mut low_last = base.to_vec();
    low_last.extend([obs("2024-01-05", 110.0), obs("2024-01-05", 90.0)]);
    let result = engine.forecast(&low_last, 1).unwrap();
    assert_eq!(result.trend_direction, TrendDirection::Up);

    let mut high_last = base.to_vec();
    high_last.extend([obs("2024-01-05", 90.0), obs("2024-01-05", 110.0)]);
    let result = engine.forecast(&high_last, 1).unwrap();
    assert_eq!(result.trend_direction, TrendDirection::Down);
}

#[test]
fn test_all_observations_on_one_date() {
    let series: Vec<Observation> = [10.0, 12.0, 11.0, 13.0, 14.0]
        .iter()
        .map(|&p| obs("2024-06-01", p))
        .collect();
    let result = forecast(&series, 2).unwrap();

    assert_eq!(result.future_dates, vec![date("2024-06-02"), date("2024-06-03")]);
    // No time axis to split on, so the forecast sits near the mean price
    for price in &result.predicted_prices {
        assert!((price - 12.0).abs() < 1.0, "price {} far from mean", price);
    }
    // The last supplied price (14) is the reference
    assert_eq!(result.trend_direction, TrendDirection::Down);
}

#[test]
fn test_concurrent_calls_agree() {
    let series = daily(&[60.0, 61.0, 59.5, 63.0, 64.0, 62.0, 66.0]);
    let engine = ForecastEngine::new();
    let expected = engine.forecast(&series, 7).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| engine.forecast(&series, 7).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
