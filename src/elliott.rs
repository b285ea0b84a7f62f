//! Elliott-style breakout heuristic.
//!
//! This is a fixed 6-bar-lookback breakout check, not an implementation
//! of wave theory: the bar 5 back from the end is taken as the wave-1
//! top and the bar 4 back as the wave-2 bottom, and the latest close is
//! compared against them in the direction of the prevailing trend.
//! Treat the output as a coarse confluence hint.

use serde::{Deserialize, Serialize};

use crate::{trend::TrendLabel, Direction, Ohlc};

/// Bars required before the lookback offsets can be read.
pub const MIN_BARS: usize = 6;

/// A breakout beyond the heuristic wave levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveBreakout {
    pub direction: Direction,
    /// The level that was broken.
    pub level: f64,
}

impl WaveBreakout {
    /// Alert text for the presentation layer / alert sink.
    pub fn message(&self) -> String {
        match self.direction {
            Direction::Bearish => format!("Wave-3 downtrend breakout below {:.2}", self.level),
            _ => format!("Wave-3 uptrend breakout above {:.2}", self.level),
        }
    }
}

/// Probe the last six bars for a breakout in the direction of `trend`.
///
/// Returns None for windows shorter than [`MIN_BARS`] and whenever the
/// latest close has not cleared the relevant level.
pub fn detect_breakout<T: Ohlc>(bars: &[T], trend: TrendLabel) -> Option<WaveBreakout> {
    let n = bars.len();
    if n < MIN_BARS {
        return None;
    }

    let wave1_top = bars[n - 5].high();
    let wave2_bottom = bars[n - 4].low();
    let last_close = bars[n - 1].close();

    if trend.is_up() && last_close > wave1_top {
        return Some(WaveBreakout {
            direction: Direction::Bullish,
            level: wave1_top,
        });
    }
    if trend.is_down() && last_close < wave2_bottom {
        return Some(WaveBreakout {
            direction: Direction::Bearish,
            level: wave2_bottom,
        });
    }
    None
}
