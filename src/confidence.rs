//! Confluence score over patterns, breakout and trend.

use serde::{Deserialize, Serialize};

use crate::{
    detectors::{PatternHit, PatternKind},
    elliott::WaveBreakout,
    trend::TrendLabel,
};

/// Score at or above which the verdict turns Strong Buy (mirrored for
/// Strong Sell).
pub const STRONG_THRESHOLD: i32 = 3;

/// Verdict derived from the confluence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    StrongBuy,
    StrongSell,
    Neutral,
}

/// Confluence of the independent heuristics for one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confidence {
    pub score: i32,
    pub verdict: Verdict,
    /// Which inputs moved the score, for display.
    pub reasons: Vec<&'static str>,
}

/// Score one evaluation window.
///
/// +1 for bullish-engulfing presence, -1 for bearish-engulfing presence,
/// +1 for any breakout (the breakout term is unsigned), +1/-1 for an
/// up/down trend.
pub fn score(
    patterns: &[PatternHit],
    breakout: Option<&WaveBreakout>,
    trend: TrendLabel,
) -> Confidence {
    let mut score = 0;
    let mut reasons = Vec::new();

    if patterns
        .iter()
        .any(|p| p.kind == PatternKind::BullishEngulfing)
    {
        score += 1;
        reasons.push("price action bullish");
    }
    if patterns
        .iter()
        .any(|p| p.kind == PatternKind::BearishEngulfing)
    {
        score -= 1;
        reasons.push("price action bearish");
    }
    if breakout.is_some() {
        score += 1;
        reasons.push("wave breakout");
    }
    match trend {
        TrendLabel::Uptrend => {
            score += 1;
            reasons.push("ema uptrend");
        }
        TrendLabel::Downtrend => {
            score -= 1;
            reasons.push("ema downtrend");
        }
        TrendLabel::Sideways | TrendLabel::Insufficient => {}
    }

    let verdict = if score >= STRONG_THRESHOLD {
        Verdict::StrongBuy
    } else if score <= -STRONG_THRESHOLD {
        Verdict::StrongSell
    } else {
        Verdict::Neutral
    };

    Confidence {
        score,
        verdict,
        reasons,
    }
}
