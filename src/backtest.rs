//! One-pass hit-rate backtest.
//!
//! This is strictly a hit-rate statistic, not a P&L simulation: no
//! position sizing, no compounding, no re-fitting. A signal generated
//! at bar i-1 is assumed actionable starting at bar i (one-bar
//! execution lag), and a "hit" is a positive signed forward return.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Ohlc, Signal};

/// Hit rate over one signal column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracyResult {
    /// Percentage of lagged signals followed by a favourable move,
    /// rounded to two decimals. Exactly 0 when no signals fired.
    pub accuracy_pct: f64,
    /// Number of non-flat signals in the column.
    pub signal_count: usize,
}

impl AccuracyResult {
    /// The no-signals result.
    pub fn zero() -> Self {
        Self {
            accuracy_pct: 0.0,
            signal_count: 0,
        }
    }
}

/// Replay a signal column against next-bar returns.
///
/// `signals` and `closes` must be the same length; the shorter of the
/// two bounds the replay. Zero closes are skipped rather than divided by.
pub fn accuracy(signals: &[Signal], closes: &[f64]) -> AccuracyResult {
    let n = signals.len().min(closes.len());
    let signal_count = signals[..n].iter().filter(|s| !s.is_flat()).count();
    if signal_count == 0 {
        return AccuracyResult::zero();
    }

    let mut wins = 0usize;
    for i in 1..n.saturating_sub(1) {
        if closes[i] == 0.0 {
            continue;
        }
        let forward_return = (closes[i + 1] - closes[i]) / closes[i];
        let strategy_return = f64::from(signals[i - 1].value()) * forward_return;
        if strategy_return > 0.0 {
            wins += 1;
        }
    }

    AccuracyResult {
        accuracy_pct: round2(wins as f64 / signal_count as f64 * 100.0),
        signal_count,
    }
}

/// Hit rate for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyAccuracy {
    pub date: NaiveDate,
    pub accuracy_pct: f64,
    pub signal_count: usize,
}

/// Group the per-bar hit/signal counts by UTC calendar date.
///
/// Days without signals report 0. Bars without timestamps are ignored.
pub fn daily_accuracy<T: Ohlc>(bars: &[T], signals: &[Signal]) -> Vec<DailyAccuracy> {
    let n = bars.len().min(signals.len());
    // (date, wins, signals), kept in first-seen order - bar timestamps
    // are strictly increasing so this is chronological.
    let mut days: Vec<(NaiveDate, usize, usize)> = Vec::new();

    for i in 0..n {
        let Some(ts) = bars[i].timestamp() else {
            continue;
        };
        let Some(date) = chrono::DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()) else {
            continue;
        };

        let mut win = false;
        if i >= 1 && i + 1 < n && bars[i].close() != 0.0 {
            let forward_return = (bars[i + 1].close() - bars[i].close()) / bars[i].close();
            win = f64::from(signals[i - 1].value()) * forward_return > 0.0;
        }
        let signalled = !signals[i].is_flat();

        match days.last_mut() {
            Some(entry) if entry.0 == date => {
                entry.1 += usize::from(win);
                entry.2 += usize::from(signalled);
            }
            _ => days.push((date, usize::from(win), usize::from(signalled))),
        }
    }

    days.into_iter()
        .map(|(date, wins, count)| DailyAccuracy {
            date,
            accuracy_pct: if count == 0 {
                0.0
            } else {
                round2(wins as f64 / count as f64 * 100.0)
            },
            signal_count: count,
        })
        .collect()
}

#[inline]
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
