//! Candlestick pattern detectors.
//!
//! Each detector classifies a local geometric relationship over a 1-3
//! bar window. Detectors are not mutually exclusive: a bar may carry
//! zero, one or several labels, and [`scan`] reports every match.

mod single_bar;
mod three_bar;
mod two_bar;

pub use single_bar::PinBarDetector;
pub use three_bar::{EveningStarDetector, MorningStarDetector};
pub use two_bar::{EngulfingDetector, InsideBarDetector};

use serde::{Deserialize, Serialize};

use crate::{Direction, Ohlc};

/// Minimum window length for a full scan. Shorter windows yield an
/// empty pattern list, never an error.
pub const MIN_SCAN_BARS: usize = 3;

// ============================================================
// PATTERN TYPES
// ============================================================

/// Named candlestick pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    BullishEngulfing,
    BearishEngulfing,
    InsideBar,
    PinBar,
    MorningStar,
    EveningStar,
}

impl PatternKind {
    /// Display name as shown to users.
    pub fn name(self) -> &'static str {
        match self {
            PatternKind::BullishEngulfing => "Bullish Engulfing",
            PatternKind::BearishEngulfing => "Bearish Engulfing",
            PatternKind::InsideBar => "Inside Bar",
            PatternKind::PinBar => "Pin Bar",
            PatternKind::MorningStar => "Morning Star",
            PatternKind::EveningStar => "Evening Star",
        }
    }

    /// Typical directional bias of the pattern.
    pub fn direction(self) -> Direction {
        match self {
            PatternKind::BullishEngulfing | PatternKind::MorningStar => Direction::Bullish,
            PatternKind::BearishEngulfing | PatternKind::EveningStar => Direction::Bearish,
            PatternKind::InsideBar | PatternKind::PinBar => Direction::Neutral,
        }
    }
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A detected pattern anchored at a bar index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternHit {
    /// Index of the bar the pattern completes on.
    pub index: usize,
    /// Epoch seconds of that bar, when the source carries timestamps.
    pub timestamp: Option<i64>,
    pub kind: PatternKind,
}

// ============================================================
// DETECTOR TRAIT AND DISPATCH
// ============================================================

/// A single pattern rule evaluated at one bar index.
pub trait PatternDetector {
    /// Bars the rule needs, ending at the probed index.
    fn min_bars(&self) -> usize;

    /// Classify the window ending at `index`.
    fn detect<T: Ohlc>(&self, bars: &[T], index: usize) -> Option<PatternKind>;
}

/// All builtin detectors - enum dispatch, no vtable.
#[derive(Debug, Clone)]
pub enum BuiltinDetector {
    PinBar(PinBarDetector),
    Engulfing(EngulfingDetector),
    InsideBar(InsideBarDetector),
    MorningStar(MorningStarDetector),
    EveningStar(EveningStarDetector),
}

impl BuiltinDetector {
    #[inline]
    pub fn min_bars(&self) -> usize {
        match self {
            Self::PinBar(d) => d.min_bars(),
            Self::Engulfing(d) => d.min_bars(),
            Self::InsideBar(d) => d.min_bars(),
            Self::MorningStar(d) => d.min_bars(),
            Self::EveningStar(d) => d.min_bars(),
        }
    }

    #[inline]
    pub fn detect<T: Ohlc>(&self, bars: &[T], index: usize) -> Option<PatternKind> {
        match self {
            Self::PinBar(d) => d.detect(bars, index),
            Self::Engulfing(d) => d.detect(bars, index),
            Self::InsideBar(d) => d.detect(bars, index),
            Self::MorningStar(d) => d.detect(bars, index),
            Self::EveningStar(d) => d.detect(bars, index),
        }
    }
}

/// The full builtin detector set with default thresholds.
pub fn default_detectors() -> Vec<BuiltinDetector> {
    vec![
        BuiltinDetector::Engulfing(EngulfingDetector::default()),
        BuiltinDetector::InsideBar(InsideBarDetector::default()),
        BuiltinDetector::PinBar(PinBarDetector::default()),
        BuiltinDetector::MorningStar(MorningStarDetector::default()),
        BuiltinDetector::EveningStar(EveningStarDetector::default()),
    ]
}

// ============================================================
// SCANNING
// ============================================================

/// Scan the whole window with a custom detector set.
///
/// There is no incremental mode: every call rescans from the start.
/// Windows shorter than [`MIN_SCAN_BARS`] produce an empty list.
pub fn scan_with<T: Ohlc>(detectors: &[BuiltinDetector], bars: &[T]) -> Vec<PatternHit> {
    let mut hits = Vec::new();
    if bars.len() < MIN_SCAN_BARS {
        return hits;
    }
    for index in 2..bars.len() {
        for detector in detectors {
            if index + 1 >= detector.min_bars() {
                if let Some(kind) = detector.detect(bars, index) {
                    hits.push(PatternHit {
                        index,
                        timestamp: bars[index].timestamp(),
                        kind,
                    });
                }
            }
        }
    }
    hits
}

/// Scan the whole window with the default detector set.
pub fn scan<T: Ohlc>(bars: &[T]) -> Vec<PatternHit> {
    scan_with(&default_detectors(), bars)
}
