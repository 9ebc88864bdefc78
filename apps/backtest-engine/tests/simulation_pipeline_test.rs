//! End-to-end pipeline tests: signals -> simulation -> metrics -> risk.

use backtest_engine::backtest::{BacktestJob, BatchRunner, simulate};
use backtest_engine::config::{RiskConfig, SimulationConfig};
use backtest_engine::error::BacktestError;
use backtest_engine::models::{PriceBar, Signal};
use backtest_engine::risk::RiskAnalyzer;
use backtest_engine::strategy::{SignalSource, SmaCrossover};

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use test_case::test_case;

fn bars_from_closes(closes: &[i64]) -> Vec<PriceBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let date = NaiveDate::from_ymd_opt(2024, 1, 1)
                .and_then(|d| d.checked_add_days(chrono::Days::new(i as u64)))
                .unwrap();
            let close = Decimal::new(c, 0);
            PriceBar::new(date, close, close, close, close, 10_000)
        })
        .collect()
}

#[test]
fn flat_market_full_pipeline() {
    // Flat closes at 100 with a mid-series buy: portfolio value never moves,
    // every metric lands on its degenerate zero.
    let bars = bars_from_closes(&[100, 100, 100]);
    let signals = [Signal::Hold, Signal::Buy, Signal::Hold];

    let (run, summary) = simulate(
        bars.clone(),
        &signals,
        Decimal::new(1000, 0),
        &SimulationConfig::default(),
    )
    .unwrap();

    assert_eq!(run.portfolio_values, vec![Decimal::new(1000, 0); 3]);
    assert_eq!(summary.total_return_pct, 0.0);
    assert_eq!(summary.sharpe_ratio, 0.0);
    assert_eq!(summary.max_drawdown_pct, 0.0);

    let report = RiskAnalyzer::default()
        .analyze(&run.portfolio_values, &bars, None)
        .unwrap();
    for (_, value) in report.summary.as_map() {
        assert_eq!(value, 0.0);
    }
}

#[test]
fn round_trip_trade_pipeline() {
    // Buy at 110 (8 units, cash 120), sell at 90 (cash 840): a losing trade
    // that the history and final value must both reflect.
    let bars = bars_from_closes(&[100, 110, 90]);
    let signals = [Signal::Hold, Signal::Buy, Signal::Sell];

    let (run, summary) = simulate(
        bars,
        &signals,
        Decimal::new(1000, 0),
        &SimulationConfig::default(),
    )
    .unwrap();

    assert_eq!(
        run.portfolio_values,
        vec![
            Decimal::new(1000, 0),
            Decimal::new(1000, 0),
            Decimal::new(840, 0)
        ]
    );
    assert_eq!(summary.final_portfolio_value, Decimal::new(840, 0));
    assert!((summary.total_return_pct - (-16.0)).abs() < 1e-9);
    assert!(summary.max_drawdown_pct > 0.0);
}

#[test]
fn risk_tail_ordering_holds_end_to_end() {
    // A volatile buy-and-hold run. The tail metrics must nest: CVaR is at
    // least as pessimistic as its VaR, and 99% at least as pessimistic as 95%.
    let closes: Vec<i64> = (0..120)
        .map(|i| 100 + ((i * 17) % 29) - ((i * 7) % 13))
        .collect();
    let bars = bars_from_closes(&closes);
    let mut signals = vec![Signal::Hold; closes.len()];
    signals[1] = Signal::Buy;

    let (run, _) = simulate(
        bars.clone(),
        &signals,
        Decimal::new(100_000, 0),
        &SimulationConfig::default(),
    )
    .unwrap();

    let report = RiskAnalyzer::default()
        .analyze(&run.portfolio_values, &bars, None)
        .unwrap();
    let risk = &report.summary;

    assert!(risk.var_99 <= risk.var_95);
    assert!(risk.cvar_95 <= risk.var_95);
    assert!(risk.cvar_99 <= risk.var_99);
    assert!(risk.max_daily_loss <= risk.cvar_99);
    assert!(risk.max_daily_gain >= 0.0);
    assert!((0.0..=1.0).contains(&risk.positive_days_ratio));
    for (_, value) in risk.as_map() {
        assert!(value.is_finite());
    }
}

#[test]
fn rolling_analytics_have_expected_lengths() {
    let closes: Vec<i64> = (0..150).map(|i| 100 + (i * 11) % 41).collect();
    let bars = bars_from_closes(&closes);
    let mut signals = vec![Signal::Hold; closes.len()];
    signals[0] = Signal::Buy;

    let (run, _) = simulate(
        bars.clone(),
        &signals,
        Decimal::new(100_000, 0),
        &SimulationConfig::default(),
    )
    .unwrap();

    let report = RiskAnalyzer::new(RiskConfig::default())
        .analyze(&run.portfolio_values, &bars, None)
        .unwrap();

    // 150 values -> 149 returns; each window emits returns - window + 1 points.
    let returns = 149;
    for series in &report.rolling.volatility {
        assert_eq!(series.values.len(), returns - series.window + 1);
    }
    assert_eq!(report.rolling.var_95.values.len(), returns - 60 + 1);
    assert!(report.rolling.correlation.is_some());
}

#[test_case(2, 3; "tight windows")]
#[test_case(5, 10; "mid windows")]
#[test_case(20, 50; "default windows")]
fn crossover_signals_always_align(short: usize, long: usize) {
    let closes: Vec<i64> = (0..200).map(|i| 100 + (i * 13) % 57).collect();
    let bars = bars_from_closes(&closes);

    let source = SmaCrossover::new(short, long).unwrap();
    let signals = source.generate_signals(&bars);

    assert_eq!(signals.len(), bars.len());
    // Nothing can cross before the long average exists.
    assert!(signals[..long].iter().all(|s| *s == Signal::Hold));
}

#[test]
fn batch_runner_matches_single_runs() {
    let closes_a: Vec<i64> = (0..90).map(|i| 100 + (i * 3) % 17).collect();
    let closes_b: Vec<i64> = (0..90).map(|i| 200 - (i * 5) % 23).collect();
    let source = SmaCrossover::new(5, 15).unwrap();
    let config = SimulationConfig::default();

    let results = BatchRunner::new(config.clone()).run(
        &source,
        vec![
            BacktestJob {
                symbol: "AAA".to_string(),
                bars: bars_from_closes(&closes_a),
                initial_capital: Decimal::new(10_000, 0),
            },
            BacktestJob {
                symbol: "BBB".to_string(),
                bars: bars_from_closes(&closes_b),
                initial_capital: Decimal::new(10_000, 0),
            },
        ],
    );

    for (closes, result) in [(&closes_a, &results[0]), (&closes_b, &results[1])] {
        let bars = bars_from_closes(closes);
        let signals = source.generate_signals(&bars);
        let (standalone, _) =
            simulate(bars, &signals, Decimal::new(10_000, 0), &config).unwrap();

        let Ok((batched, _)) = &result.outcome else {
            panic!("batch job should succeed");
        };
        assert_eq!(batched.portfolio_values, standalone.portfolio_values);
    }
}

#[test]
fn validation_failures_reject_before_any_state_change() {
    let config = SimulationConfig::default();

    assert_eq!(
        simulate(Vec::new(), &[], Decimal::new(1000, 0), &config),
        Err(BacktestError::EmptySeries)
    );

    let bars = bars_from_closes(&[100, 101]);
    assert_eq!(
        simulate(bars, &[Signal::Hold], Decimal::new(1000, 0), &config),
        Err(BacktestError::LengthMismatch {
            expected: 2,
            actual: 1
        })
    );
}

#[test]
fn reports_serialize_to_json() {
    let bars = bars_from_closes(&[100, 110, 90, 95]);
    let signals = [Signal::Hold, Signal::Buy, Signal::Sell, Signal::Hold];

    let (run, summary) = simulate(
        bars.clone(),
        &signals,
        Decimal::new(1000, 0),
        &SimulationConfig::default(),
    )
    .unwrap();
    let report = RiskAnalyzer::default()
        .analyze(&run.portfolio_values, &bars, None)
        .unwrap();

    let json = serde_json::to_string(&summary).unwrap();
    assert!(json.contains("total_return_pct"));

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("sortino_ratio"));

    let json = serde_json::to_string(&run.bars[1].signal).unwrap();
    assert_eq!(json, "\"BUY\"");
}

proptest! {
    /// Signals at bar i may only read bars 0..=i: mutating every bar after
    /// the prefix must not change the prefix of the signal series.
    #[test]
    fn crossover_is_causal(
        closes in prop::collection::vec(50i64..150, 30..60),
        cut in 10usize..25,
        shift in 1i64..40,
    ) {
        let source = SmaCrossover::new(3, 7).unwrap();

        let bars = bars_from_closes(&closes);
        let mut mutated_closes = closes.clone();
        for c in &mut mutated_closes[cut..] {
            *c += shift;
        }
        let mutated = bars_from_closes(&mutated_closes);

        let a = source.generate_signals(&bars);
        let b = source.generate_signals(&mutated);

        prop_assert_eq!(&a[..cut], &b[..cut]);
    }

    /// Portfolio value always reconciles and the history aligns 1:1 with
    /// the input series, whatever the signal pattern.
    #[test]
    fn history_always_aligned(
        closes in prop::collection::vec(50i64..150, 2..40),
        seed in any::<u64>(),
    ) {
        let bars = bars_from_closes(&closes);
        let signals: Vec<Signal> = (0..closes.len())
            .map(|i| match (seed >> (i % 60)) % 3 {
                0 => Signal::Buy,
                1 => Signal::Sell,
                _ => Signal::Hold,
            })
            .collect();

        let (run, _) = simulate(
            bars,
            &signals,
            Decimal::new(10_000, 0),
            &SimulationConfig::default(),
        ).unwrap();

        prop_assert_eq!(run.portfolio_values.len(), closes.len());
        prop_assert_eq!(run.bars.len(), closes.len());
        for value in &run.portfolio_values {
            prop_assert!(*value > Decimal::ZERO);
        }
    }

    /// Ratio metrics are invariant under a uniform scaling of prices and
    /// capital.
    #[test]
    fn ratio_metrics_scale_invariant(
        closes in prop::collection::vec(50i64..150, 5..30),
        scale in 2i64..20,
    ) {
        let signals: Vec<Signal> = std::iter::once(Signal::Buy)
            .chain(std::iter::repeat(Signal::Hold))
            .take(closes.len())
            .collect();
        let scaled_closes: Vec<i64> = closes.iter().map(|c| c * scale).collect();

        let config = SimulationConfig::default();
        let (_, base) = simulate(
            bars_from_closes(&closes),
            &signals,
            Decimal::new(10_000, 0),
            &config,
        ).unwrap();
        let (_, scaled) = simulate(
            bars_from_closes(&scaled_closes),
            &signals,
            Decimal::new(10_000 * scale, 0),
            &config,
        ).unwrap();

        prop_assert!((base.total_return_pct - scaled.total_return_pct).abs() < 1e-9);
        prop_assert!((base.sharpe_ratio - scaled.sharpe_ratio).abs() < 1e-9);
        prop_assert!((base.max_drawdown_pct - scaled.max_drawdown_pct).abs() < 1e-9);
    }
}
