//! Single-bar candlestick pattern detectors.

use crate::{Ohlc, OhlcExt, Ratio};

use super::{PatternDetector, PatternKind};

/// Pin Bar: the body is a small fraction of the full high-low range,
/// the rest being wick. Direction is left to context, so the pattern is
/// reported as neutral.
#[derive(Debug, Clone)]
pub struct PinBarDetector {
    /// Body must be strictly below this fraction of the range.
    pub max_body_ratio: Ratio,
}

impl Default for PinBarDetector {
    fn default() -> Self {
        Self {
            max_body_ratio: Ratio::new_const(0.3),
        }
    }
}

impl PatternDetector for PinBarDetector {
    fn min_bars(&self) -> usize {
        1
    }

    fn detect<T: Ohlc>(&self, bars: &[T], index: usize) -> Option<PatternKind> {
        let bar = bars.get(index)?;
        // Zero-range bars never qualify: 0 < 0.3 * 0 is false.
        if bar.body() < self.max_body_ratio.get() * bar.range() {
            return Some(PatternKind::PinBar);
        }
        None
    }
}
