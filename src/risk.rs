//! Stop-loss / take-profit derivation.

use serde::{Deserialize, Serialize};

use crate::{trend::TrendLabel, Signal};

/// Risk fraction applied to the entry price in an uptrend.
pub const UPTREND_RISK_FRACTION: f64 = 0.015;
/// Risk fraction applied otherwise. The asymmetry is deliberate: stops
/// widen whenever the trend is not a confirmed uptrend.
pub const DEFAULT_RISK_FRACTION: f64 = 0.02;
/// Target distance as a multiple of the stop distance.
pub const REWARD_MULTIPLE: f64 = 2.0;

/// Stop/target levels for one prospective trade.
///
/// Recomputed per request from the entry price; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeLevels {
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    /// |take_profit - entry| / |entry - stop_loss|; None when the stop
    /// distance is zero (flat signal).
    pub risk_reward: Option<f64>,
}

/// Derive stop/target levels from entry price, signal and trend.
///
/// A flat signal collapses both levels to the entry and leaves the
/// risk/reward ratio undefined.
pub fn trade_levels(entry: f64, signal: Signal, trend: TrendLabel) -> TradeLevels {
    let risk = if trend.is_up() {
        UPTREND_RISK_FRACTION
    } else {
        DEFAULT_RISK_FRACTION
    };

    let (stop_loss, take_profit) = match signal {
        Signal::Buy => {
            let stop = entry * (1.0 - risk);
            (stop, entry + (entry - stop) * REWARD_MULTIPLE)
        }
        Signal::Sell => {
            let stop = entry * (1.0 + risk);
            (stop, entry - (stop - entry) * REWARD_MULTIPLE)
        }
        Signal::Flat => (entry, entry),
    };

    let risk_distance = (entry - stop_loss).abs();
    let risk_reward = (risk_distance > 0.0).then(|| (take_profit - entry).abs() / risk_distance);

    TradeLevels {
        entry,
        stop_loss,
        take_profit,
        risk_reward,
    }
}
