//! Strategy configuration.
//!
//! Every heuristic combination (EMA spans, RSI gating, Elliott and
//! price-action filtering, strict trend) is a field here, so one
//! pipeline serves all of them instead of one code path each.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, Span};

/// Configuration for one [`crate::Analyzer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Fast EMA span.
    pub fast_span: Span,
    /// Slow EMA span. Also the minimum window length for a non-degraded
    /// evaluation.
    pub slow_span: Span,
    /// RSI lookback period.
    pub rsi_period: Span,
    /// Gate crossovers on RSI bands instead of the per-bar trend label.
    pub use_rsi_gate: bool,
    /// Zero the whole signal column unless an Elliott breakout fired.
    pub use_elliott_filter: bool,
    /// Zero the whole signal column unless any candlestick pattern was found.
    pub use_price_action_filter: bool,
    /// Require sign(fast - slow) to hold for 3 bars before labelling a trend.
    pub strict_trend: bool,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            fast_span: Span::new_const(20),
            slow_span: Span::new_const(50),
            rsi_period: Span::new_const(14),
            use_rsi_gate: false,
            use_elliott_filter: false,
            use_price_action_filter: false,
            strict_trend: false,
        }
    }
}

impl StrategyConfig {
    /// Check cross-field consistency. Field-level bounds (spans > 0) are
    /// already enforced by [`Span`].
    pub fn validate(&self) -> Result<()> {
        if self.fast_span >= self.slow_span {
            return Err(Error::InvalidConfig(format!(
                "fast_span ({}) must be shorter than slow_span ({})",
                self.fast_span.get(),
                self.slow_span.get()
            )));
        }
        if self.rsi_period.get() < 2 {
            return Err(Error::InvalidConfig(
                "rsi_period must be at least 2".to_string(),
            ));
        }
        Ok(())
    }

    /// Minimum window length for a non-degraded evaluation.
    #[inline]
    pub fn min_bars(&self) -> usize {
        self.slow_span.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(StrategyConfig::default().validate().is_ok());
    }

    #[test]
    fn test_fast_must_be_below_slow() {
        let config = StrategyConfig {
            fast_span: Span::new_const(50),
            slow_span: Span::new_const(20),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let equal = StrategyConfig {
            fast_span: Span::new_const(20),
            slow_span: Span::new_const(20),
            ..Default::default()
        };
        assert!(equal.validate().is_err());
    }

    #[test]
    fn test_rsi_period_lower_bound() {
        let config = StrategyConfig {
            rsi_period: Span::new_const(1),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let config = StrategyConfig {
            use_rsi_gate: true,
            use_elliott_filter: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: StrategyConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_deserialize_rejects_zero_span() {
        let json = r#"{"fast_span": 0}"#;
        assert!(serde_json::from_str::<StrategyConfig>(json).is_err());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: StrategyConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, StrategyConfig::default());
        assert_eq!(config.min_bars(), 50);
    }
}
