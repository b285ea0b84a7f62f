//! Per-bar trend classification from the fast/slow EMA relation.

use serde::{Deserialize, Serialize};

use crate::indicators::IndicatorFrame;

/// Discrete trend label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrendLabel {
    Uptrend,
    Downtrend,
    #[default]
    Sideways,
    /// The series is shorter than the slow EMA span; no trend can be read.
    Insufficient,
}

impl TrendLabel {
    #[inline]
    pub fn is_up(self) -> bool {
        matches!(self, TrendLabel::Uptrend)
    }

    #[inline]
    pub fn is_down(self) -> bool {
        matches!(self, TrendLabel::Downtrend)
    }
}

impl std::fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendLabel::Uptrend => write!(f, "Uptrend"),
            TrendLabel::Downtrend => write!(f, "Downtrend"),
            TrendLabel::Sideways => write!(f, "Sideways"),
            TrendLabel::Insufficient => write!(f, "Insufficient"),
        }
    }
}

/// Number of consecutive bars the EMA spread must hold its sign for in
/// strict mode.
pub const STRICT_PERSISTENCE: usize = 3;

/// Classify the trend at one bar index.
///
/// Returns [`TrendLabel::Insufficient`] when the whole series is shorter
/// than the slow span, regardless of index; the spread of a half-warmed
/// slow EMA reads as noise, not trend.
pub fn classify_at(frame: &IndicatorFrame, index: usize, strict: bool) -> TrendLabel {
    if frame.len() < frame.slow_span() || index >= frame.len() {
        return TrendLabel::Insufficient;
    }
    if strict {
        if index + 1 < STRICT_PERSISTENCE {
            return TrendLabel::Sideways;
        }
        let first = spread_label(frame, index);
        for back in 1..STRICT_PERSISTENCE {
            if spread_label(frame, index - back) != first {
                return TrendLabel::Sideways;
            }
        }
        first
    } else {
        spread_label(frame, index)
    }
}

/// Classify every bar. The per-bar labels are what the signal gate and
/// the backtester consume; the presentation layer shows only the last.
pub fn classify_all(frame: &IndicatorFrame, strict: bool) -> Vec<TrendLabel> {
    (0..frame.len())
        .map(|i| classify_at(frame, i, strict))
        .collect()
}

#[inline]
fn spread_label(frame: &IndicatorFrame, index: usize) -> TrendLabel {
    let fast = frame.ema_fast()[index];
    let slow = frame.ema_slow()[index];
    if fast > slow {
        TrendLabel::Uptrend
    } else if fast < slow {
        TrendLabel::Downtrend
    } else {
        TrendLabel::Sideways
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StrategyConfig;
    use crate::indicators::IndicatorFrame;
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

    fn frame(closes: &[f64]) -> IndicatorFrame {
        IndicatorFrame::compute(&bars_from_closes(closes), &StrategyConfig::default())
    }

    #[test]
    fn test_short_series_is_insufficient() {
        let f = frame(&[100.0; 10]);
        assert_eq!(classify_at(&f, 9, false), TrendLabel::Insufficient);
        assert!(classify_all(&f, false)
            .iter()
            .all(|t| *t == TrendLabel::Insufficient));
    }

    #[test]
    fn test_constant_series_is_sideways() {
        let f = frame(&[100.0; 60]);
        assert_eq!(classify_at(&f, 59, false), TrendLabel::Sideways);
    }

    #[test]
    fn test_rising_series_is_uptrend() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let f = frame(&closes);
        assert_eq!(classify_at(&f, 59, false), TrendLabel::Uptrend);
    }

    #[test]
    fn test_falling_series_is_downtrend() {
        let closes: Vec<f64> = (0..60).map(|i| 200.0 - i as f64).collect();
        let f = frame(&closes);
        assert_eq!(classify_at(&f, 59, false), TrendLabel::Downtrend);
    }

    #[test]
    fn test_strict_needs_three_consistent_bars() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let f = frame(&closes);
        // Spread flips positive at bar 1; bars 0..2 are not yet consistent.
        assert_eq!(classify_at(&f, 1, true), TrendLabel::Sideways);
        assert_eq!(classify_at(&f, 2, true), TrendLabel::Sideways);
        assert_eq!(classify_at(&f, 3, true), TrendLabel::Uptrend);
        assert_eq!(classify_at(&f, 59, true), TrendLabel::Uptrend);
    }

    #[test]
    fn test_classify_all_matches_classify_at() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i % 7) as f64).collect();
        let f = frame(&closes);
        let all = classify_all(&f, false);
        for (i, label) in all.iter().enumerate() {
            assert_eq!(*label, classify_at(&f, i, false));
        }
    }
}
