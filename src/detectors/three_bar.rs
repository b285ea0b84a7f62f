//! Three-bar candlestick pattern detectors (star reversals).

use crate::{Ohlc, OhlcExt, Ratio};

use super::{PatternDetector, PatternKind};

/// Morning Star: a bearish bar, then a small-bodied star whose open
/// gaps below the first bar's close, then a bullish reversal bar.
/// The hit anchors on the third bar.
#[derive(Debug, Clone)]
pub struct MorningStarDetector {
    /// Star body must be strictly below this fraction of the star's range.
    pub max_star_body_ratio: Ratio,
}

impl Default for MorningStarDetector {
    fn default() -> Self {
        Self {
            max_star_body_ratio: Ratio::new_const(0.2),
        }
    }
}

impl PatternDetector for MorningStarDetector {
    fn min_bars(&self) -> usize {
        3
    }

    fn detect<T: Ohlc>(&self, bars: &[T], index: usize) -> Option<PatternKind> {
        if index < 2 {
            return None;
        }
        let first = bars.get(index - 2)?;
        let star = bars.get(index - 1)?;
        let third = bars.get(index)?;

        if !first.is_bearish() {
            return None;
        }
        if star.body() >= self.max_star_body_ratio.get() * star.range() {
            return None;
        }
        // Star must gap beyond the first bar's close (downward here).
        if star.open() >= first.close() {
            return None;
        }
        if !third.is_bullish() {
            return None;
        }

        Some(PatternKind::MorningStar)
    }
}

/// Evening Star: mirror of [`MorningStarDetector`] - bullish first bar,
/// small star gapping above its close, bearish reversal bar.
#[derive(Debug, Clone)]
pub struct EveningStarDetector {
    pub max_star_body_ratio: Ratio,
}

impl Default for EveningStarDetector {
    fn default() -> Self {
        Self {
            max_star_body_ratio: Ratio::new_const(0.2),
        }
    }
}

impl PatternDetector for EveningStarDetector {
    fn min_bars(&self) -> usize {
        3
    }

    fn detect<T: Ohlc>(&self, bars: &[T], index: usize) -> Option<PatternKind> {
        if index < 2 {
            return None;
        }
        let first = bars.get(index - 2)?;
        let star = bars.get(index - 1)?;
        let third = bars.get(index)?;

        if !first.is_bullish() {
            return None;
        }
        if star.body() >= self.max_star_body_ratio.get() * star.range() {
            return None;
        }
        if star.open() <= first.close() {
            return None;
        }
        if !third.is_bearish() {
            return None;
        }

        Some(PatternKind::EveningStar)
    }
}
