//! Crossover signal generation.
//!
//! A Buy fires at the bar where the fast EMA crosses from at-or-below
//! to above the slow EMA, gated by the prevailing trend (or by RSI
//! bands when configured); Sell is the mirror. Optional whole-window
//! filters are conjunctive: an enabled filter that found nothing zeroes
//! every signal in the column.

use crate::{config::StrategyConfig, indicators::IndicatorFrame, trend::TrendLabel, Signal};

/// RSI band a Buy must fall inside when the RSI gate is enabled.
pub const RSI_BUY_BAND: (f64, f64) = (50.0, 70.0);
/// RSI band a Sell must fall inside when the RSI gate is enabled.
pub const RSI_SELL_BAND: (f64, f64) = (30.0, 50.0);

/// Compute the full per-bar signal column, without filters.
///
/// Bar 0 is always Flat: a crossover needs the previous bar's values
/// and nothing else is carried between bars.
pub fn generate(
    frame: &IndicatorFrame,
    trends: &[TrendLabel],
    config: &StrategyConfig,
) -> Vec<Signal> {
    let n = frame.len();
    let mut signals = vec![Signal::Flat; n];
    let fast = frame.ema_fast();
    let slow = frame.ema_slow();

    for i in 1..n {
        let crossed_up = fast[i - 1] <= slow[i - 1] && fast[i] > slow[i];
        let crossed_down = fast[i - 1] >= slow[i - 1] && fast[i] < slow[i];

        if crossed_up && buy_gate(frame, trends, config, i) {
            signals[i] = Signal::Buy;
        } else if crossed_down && sell_gate(frame, trends, config, i) {
            signals[i] = Signal::Sell;
        }
    }
    signals
}

/// Apply the configured whole-window filters, zeroing the column when an
/// enabled filter found nothing in its evaluation window.
pub fn apply_filters(
    mut signals: Vec<Signal>,
    config: &StrategyConfig,
    patterns_found: bool,
    breakout_found: bool,
) -> Vec<Signal> {
    let elliott_veto = config.use_elliott_filter && !breakout_found;
    let price_action_veto = config.use_price_action_filter && !patterns_found;
    if elliott_veto || price_action_veto {
        signals.fill(Signal::Flat);
    }
    signals
}

#[inline]
fn buy_gate(
    frame: &IndicatorFrame,
    trends: &[TrendLabel],
    config: &StrategyConfig,
    index: usize,
) -> bool {
    if config.use_rsi_gate {
        // An undefined (warm-up) RSI value fails the gate outright.
        match frame.rsi()[index] {
            Some(value) => value > RSI_BUY_BAND.0 && value < RSI_BUY_BAND.1,
            None => false,
        }
    } else {
        trends[index].is_up()
    }
}

#[inline]
fn sell_gate(
    frame: &IndicatorFrame,
    trends: &[TrendLabel],
    config: &StrategyConfig,
    index: usize,
) -> bool {
    if config.use_rsi_gate {
        match frame.rsi()[index] {
            Some(value) => value > RSI_SELL_BAND.0 && value < RSI_SELL_BAND.1,
            None => false,
        }
    } else {
        trends[index].is_down()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StrategyConfig;
    use crate::trend;
    use crate::Bar;
    use chrono::DateTime;

    fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                Bar::new(
                    DateTime::from_timestamp(i as i64 * 60, 0).unwrap(),
                    close,
                    close + 0.5,
                    close - 0.5,
                    close,
                )
            })
            .collect()
    }

    fn column(closes: &[f64], config: &StrategyConfig) -> Vec<Signal> {
        let frame = IndicatorFrame::compute(&bars_from_closes(closes), config);
        let trends = trend::classify_all(&frame, config.strict_trend);
        generate(&frame, &trends, config)
    }

    #[test]
    fn test_constant_series_stays_flat() {
        let config = StrategyConfig::default();
        let signals = column(&vec![100.0; 60], &config);
        assert!(signals.iter().all(|s| s.is_flat()));
    }

    #[test]
    fn test_rising_series_fires_one_buy_at_the_crossover() {
        let config = StrategyConfig::default();
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let signals = column(&closes, &config);
        // Seeded EMAs are equal at bar 0, so the fast EMA crosses above
        // at bar 1 and never gives the level back.
        assert_eq!(signals[1], Signal::Buy);
        let buys = signals.iter().filter(|s| **s == Signal::Buy).count();
        assert_eq!(buys, 1);
        assert!(!signals.contains(&Signal::Sell));
    }

    #[test]
    fn test_falling_series_fires_one_sell_at_the_crossover() {
        let config = StrategyConfig::default();
        let closes: Vec<f64> = (0..60).map(|i| 200.0 - i as f64).collect();
        let signals = column(&closes, &config);
        assert_eq!(signals[1], Signal::Sell);
        assert!(!signals.contains(&Signal::Buy));
    }

    #[test]
    fn test_rsi_gate_blocks_warm_up_crossovers() {
        let config = StrategyConfig {
            use_rsi_gate: true,
            ..Default::default()
        };
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let signals = column(&closes, &config);
        // The only crossover lands at bar 1 where RSI is still None, and
        // after warm-up RSI saturates at 100, outside the buy band.
        assert!(signals.iter().all(|s| s.is_flat()));
    }

    #[test]
    fn test_elliott_filter_zeroes_column_when_no_breakout() {
        let config = StrategyConfig {
            use_elliott_filter: true,
            ..Default::default()
        };
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let signals = column(&closes, &config);
        assert!(signals.contains(&Signal::Buy));
        let filtered = apply_filters(signals, &config, true, false);
        assert!(filtered.iter().all(|s| s.is_flat()));
    }

    #[test]
    fn test_price_action_filter_keeps_column_when_patterns_exist() {
        let config = StrategyConfig {
            use_price_action_filter: true,
            ..Default::default()
        };
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let signals = column(&closes, &config);
        let filtered = apply_filters(signals.clone(), &config, true, false);
        assert_eq!(signals, filtered);
    }

    #[test]
    fn test_disabled_filters_never_veto() {
        let config = StrategyConfig::default();
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let signals = column(&closes, &config);
        let filtered = apply_filters(signals.clone(), &config, false, false);
        assert_eq!(signals, filtered);
    }
}
