//! Derived per-bar indicator columns (EMA, RSI).
//!
//! Derived columns are explicit, typed fields rather than an ad hoc
//! column bag. EMA columns are defined from bar 0 via the seeded
//! recurrence; RSI carries an explicit `None` warm-up prefix instead of
//! NaN, so no comparison ever touches an undefined value silently.

use crate::{config::StrategyConfig, Ohlc};

/// Exponential moving average with alpha = 2 / (span + 1).
///
/// Seeded with the first close, then `ema[i] = a*close[i] + (1-a)*ema[i-1]`.
/// For a constant series the output equals that constant at every bar.
pub fn ema(closes: &[f64], span: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(closes.len());
    let Some(&first) = closes.first() else {
        return out;
    };
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut prev = first;
    out.push(prev);
    for &close in &closes[1..] {
        prev = alpha * close + (1.0 - alpha) * prev;
        out.push(prev);
    }
    out
}

/// RSI via Wilder's smoothing.
///
/// The first `period` values are `None` (a delta window has not filled
/// yet). When the smoothed average loss is zero the output is pinned to
/// exactly 100 rather than dividing by zero; output is always in [0, 100].
pub fn rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = closes.len();
    let mut out = vec![None; n];
    if n < period + 1 {
        return out;
    }

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for i in 1..=period {
        let delta = closes[i] - closes[i - 1];
        if delta > 0.0 {
            avg_gain += delta;
        } else {
            avg_loss += -delta;
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;
    out[period] = Some(rsi_value(avg_gain, avg_loss));

    let smoothing = (period - 1) as f64;
    for i in period + 1..n {
        let delta = closes[i] - closes[i - 1];
        let (gain, loss) = if delta > 0.0 {
            (delta, 0.0)
        } else {
            (0.0, -delta)
        };
        avg_gain = (avg_gain * smoothing + gain) / period as f64;
        avg_loss = (avg_loss * smoothing + loss) / period as f64;
        out[i] = Some(rsi_value(avg_gain, avg_loss));
    }
    out
}

#[inline]
fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss <= 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

/// Close column plus the aligned derived columns for one bar window.
///
/// Derived columns are additive annotations; the underlying bars are
/// never mutated.
#[derive(Debug, Clone)]
pub struct IndicatorFrame {
    closes: Vec<f64>,
    ema_fast: Vec<f64>,
    ema_slow: Vec<f64>,
    rsi: Vec<Option<f64>>,
    fast_span: usize,
    slow_span: usize,
    rsi_period: usize,
}

impl IndicatorFrame {
    /// Compute all derived columns for a window. Works for any window
    /// length, including empty; length guards live in the consumers.
    pub fn compute<T: Ohlc>(bars: &[T], config: &StrategyConfig) -> Self {
        let closes: Vec<f64> = bars.iter().map(|b| b.close()).collect();
        let fast_span = config.fast_span.get();
        let slow_span = config.slow_span.get();
        let rsi_period = config.rsi_period.get();
        Self {
            ema_fast: ema(&closes, fast_span),
            ema_slow: ema(&closes, slow_span),
            rsi: rsi(&closes, rsi_period),
            closes,
            fast_span,
            slow_span,
            rsi_period,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.closes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    #[inline]
    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    #[inline]
    pub fn ema_fast(&self) -> &[f64] {
        &self.ema_fast
    }

    #[inline]
    pub fn ema_slow(&self) -> &[f64] {
        &self.ema_slow
    }

    #[inline]
    pub fn rsi(&self) -> &[Option<f64>] {
        &self.rsi
    }

    #[inline]
    pub fn fast_span(&self) -> usize {
        self.fast_span
    }

    #[inline]
    pub fn slow_span(&self) -> usize {
        self.slow_span
    }

    #[inline]
    pub fn rsi_period(&self) -> usize {
        self.rsi_period
    }
}
