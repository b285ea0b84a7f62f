//! Two-bar candlestick pattern detectors.

use crate::{Ohlc, OhlcExt};

use super::{PatternDetector, PatternKind};

/// Engulfing: the current body fully contains the prior body, with the
/// two bars closing in opposite directions.
#[derive(Debug, Clone, Default)]
pub struct EngulfingDetector;

impl PatternDetector for EngulfingDetector {
    fn min_bars(&self) -> usize {
        2
    }

    fn detect<T: Ohlc>(&self, bars: &[T], index: usize) -> Option<PatternKind> {
        if index < 1 {
            return None;
        }
        let prev = bars.get(index - 1)?;
        let curr = bars.get(index)?;

        // Bullish: bearish prior swallowed by a bullish current body.
        if prev.is_bearish()
            && curr.is_bullish()
            && curr.close() > prev.open()
            && curr.open() < prev.close()
        {
            return Some(PatternKind::BullishEngulfing);
        }

        // Bearish mirror.
        if prev.is_bullish()
            && curr.is_bearish()
            && curr.close() < prev.open()
            && curr.open() > prev.close()
        {
            return Some(PatternKind::BearishEngulfing);
        }

        None
    }
}

/// Inside Bar: the current high-low range sits strictly inside the
/// prior bar's range.
#[derive(Debug, Clone, Default)]
pub struct InsideBarDetector;

impl PatternDetector for InsideBarDetector {
    fn min_bars(&self) -> usize {
        2
    }

    fn detect<T: Ohlc>(&self, bars: &[T], index: usize) -> Option<PatternKind> {
        if index < 1 {
            return None;
        }
        let prev = bars.get(index - 1)?;
        let curr = bars.get(index)?;

        if curr.high() < prev.high() && curr.low() > prev.low() {
            return Some(PatternKind::InsideBar);
        }
        None
    }
}
