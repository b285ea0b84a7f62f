//! # sigzone - OHLC signal pipeline
//!
//! Technical-analysis pipeline for OHLC market data: EMA/RSI indicators,
//! candlestick pattern detection, trend classification, crossover trade
//! signals, stop/target levels and a one-pass hit-rate backtest.
//!
//! ## Quick Start
//!
//! ```rust
//! use sigzone::prelude::*;
//!
//! let analyzer = Analyzer::new(StrategyConfig::default()).unwrap();
//!
//! // Bars usually come from a SeriesProvider; any Ohlc impl works.
//! let bars: Vec<Bar> = vec![];
//! let analysis = analyzer.evaluate(&bars);
//! assert_eq!(analysis.signal, Signal::Flat);
//! ```
//!
//! The whole pipeline is a pure function of the bar window it is given:
//! no state is carried between evaluations, and every derived value is
//! recomputed per call. Callers that need caching own it themselves,
//! keyed by (symbol, interval, fetch time).

pub mod alert;
pub mod backtest;
pub mod confidence;
pub mod config;
pub mod detectors;
pub mod elliott;
pub mod indicators;
pub mod provider;
pub mod risk;
pub mod signal;
pub mod store;
pub mod trend;

pub mod prelude {
    pub use crate::{
        alert::{AlertSink, NtfySink},
        backtest::{daily_accuracy, AccuracyResult, DailyAccuracy},
        confidence::{Confidence, Verdict},
        config::StrategyConfig,
        // Detectors
        detectors::*,
        elliott::WaveBreakout,
        evaluate_parallel,
        indicators::IndicatorFrame,
        provider::{Interval, SeriesProvider, YahooChartClient},
        risk::TradeLevels,
        store::{ChartEntry, ChartStore},
        trend::TrendLabel,
        Analysis, Analyzer, Bar, Direction, Error, Ohlc, OhlcExt, Ratio, Result, Signal, Span,
        SymbolAnalysis,
    };
}

// ============================================================
// ERRORS
// ============================================================

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the analytical core.
///
/// Insufficient data normally *degrades* an evaluation to a neutral
/// result instead of erroring; [`Error::InsufficientData`] is only
/// returned by APIs that make the precondition explicit, such as
/// [`Analyzer::evaluate_strict`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("Invalid value: {0}")]
    InvalidValue(&'static str),

    #[error("{field} = {value} out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Insufficient data: need {need} bars, got {got}")]
    InsufficientData { need: usize, got: usize },
}

// ============================================================
// VALIDATED TYPES
// ============================================================

/// Normalized value in range 0.0..=1.0, used for geometry thresholds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Ratio(f64);

impl Ratio {
    /// Create a new Ratio, validating the value is in [0.0, 1.0]
    pub fn new(value: f64) -> Result<Self> {
        if value.is_nan() || value.is_infinite() {
            return Err(Error::InvalidValue("Ratio cannot be NaN or infinite"));
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(Error::OutOfRange {
                field: "Ratio",
                value,
                min: 0.0,
                max: 1.0,
            });
        }
        Ok(Self(value))
    }

    /// Create a Ratio from a compile-time constant (library internal use)
    #[doc(hidden)]
    pub const fn new_const(value: f64) -> Self {
        Self(value)
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl serde::Serialize for Ratio {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(s)
    }
}

impl<'de> serde::Deserialize<'de> for Ratio {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let value = f64::deserialize(d)?;
        Ratio::new(value).map_err(serde::de::Error::custom)
    }
}

/// Lookback span for an indicator (EMA span or RSI period, must be > 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span(usize);

impl Span {
    /// Create a new Span, validating value is > 0
    pub fn new(value: usize) -> Result<Self> {
        if value == 0 {
            return Err(Error::InvalidValue("Span must be > 0"));
        }
        Ok(Self(value))
    }

    #[doc(hidden)]
    pub const fn new_const(value: usize) -> Self {
        Self(value)
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

impl serde::Serialize for Span {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(s)
    }
}

impl<'de> serde::Deserialize<'de> for Span {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let value = usize::deserialize(d)?;
        Span::new(value).map_err(serde::de::Error::custom)
    }
}

// ============================================================
// OHLC TRAITS
// ============================================================

/// Core OHLC data trait. Volume is deliberately absent: nothing in the
/// pipeline consumes it.
pub trait Ohlc {
    fn open(&self) -> f64;
    fn high(&self) -> f64;
    fn low(&self) -> f64;
    fn close(&self) -> f64;

    /// Unix epoch seconds, when the source carries timestamps.
    fn timestamp(&self) -> Option<i64> {
        None
    }
}

/// Extension trait with computed candle geometry.
pub trait OhlcExt: Ohlc {
    #[inline]
    fn body(&self) -> f64 {
        (self.close() - self.open()).abs()
    }

    #[inline]
    fn range(&self) -> f64 {
        self.high() - self.low()
    }

    #[inline]
    fn upper_shadow(&self) -> f64 {
        self.high() - self.open().max(self.close())
    }

    #[inline]
    fn lower_shadow(&self) -> f64 {
        self.open().min(self.close()) - self.low()
    }

    #[inline]
    fn is_bullish(&self) -> bool {
        self.close() > self.open()
    }

    #[inline]
    fn is_bearish(&self) -> bool {
        self.close() < self.open()
    }

    /// Body as ratio of range. Returns None if range is ~0.
    #[inline]
    fn body_ratio(&self) -> Option<f64> {
        let range = self.range();
        (range > f64::EPSILON).then(|| self.body() / range)
    }
}

impl<T: Ohlc> OhlcExt for T {}

// ============================================================
// BAR
// ============================================================

/// One timestamped OHLC record.
///
/// Timestamps are assumed strictly increasing within a series and the
/// usual high >= body >= low geometry is assumed from the provider; it
/// is not re-validated here.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bar {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Bar {
    pub fn new(
        timestamp: chrono::DateTime<chrono::Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
        }
    }
}

impl Ohlc for Bar {
    fn open(&self) -> f64 {
        self.open
    }

    fn high(&self) -> f64 {
        self.high
    }

    fn low(&self) -> f64 {
        self.low
    }

    fn close(&self) -> f64 {
        self.close
    }

    fn timestamp(&self) -> Option<i64> {
        Some(self.timestamp.timestamp())
    }
}

// ============================================================
// CORE ENUMS
// ============================================================

/// Directional bias of a pattern or breakout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    Bullish,
    Neutral,
    Bearish,
}

impl Direction {
    #[inline]
    pub fn is_bullish(self) -> bool {
        matches!(self, Direction::Bullish)
    }

    #[inline]
    pub fn is_bearish(self) -> bool {
        matches!(self, Direction::Bearish)
    }
}

/// Per-bar trade signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Signal {
    Buy,
    Sell,
    #[default]
    Flat,
}

impl Signal {
    /// Numeric representation: Buy = +1, Sell = -1, Flat = 0.
    #[inline]
    pub fn value(self) -> i8 {
        match self {
            Signal::Buy => 1,
            Signal::Sell => -1,
            Signal::Flat => 0,
        }
    }

    #[inline]
    pub fn is_flat(self) -> bool {
        matches!(self, Signal::Flat)
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::Buy => write!(f, "Buy"),
            Signal::Sell => write!(f, "Sell"),
            Signal::Flat => write!(f, "No Signal"),
        }
    }
}

// ============================================================
// ANALYSIS RESULT
// ============================================================

/// Result of one pipeline evaluation over a bar window.
///
/// The five presentation outputs (trend, signal, levels, accuracy,
/// patterns) plus the confluence score and the full signal column the
/// backtest was computed from.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Analysis {
    /// Trend at the latest bar.
    pub trend: trend::TrendLabel,
    /// Signal at the latest bar.
    pub signal: Signal,
    /// Stop/target levels for the latest bar; None when the window is empty.
    pub levels: Option<risk::TradeLevels>,
    /// Hit rate of the configured strategy (filters applied).
    pub accuracy: backtest::AccuracyResult,
    /// Hit rate of the unfiltered crossover strategy.
    pub baseline_accuracy: backtest::AccuracyResult,
    /// Every candlestick pattern found in the window.
    pub patterns: Vec<detectors::PatternHit>,
    /// Elliott-style breakout, when the heuristic fired.
    pub breakout: Option<elliott::WaveBreakout>,
    /// Confluence score over patterns, breakout and trend.
    pub confidence: confidence::Confidence,
    /// Per-bar signal column (filters applied), same length as the window.
    pub signals: Vec<Signal>,
}

// ============================================================
// ANALYZER
// ============================================================

/// Config-validated pipeline engine.
///
/// Every heuristic combination (RSI gate, Elliott filter, price-action
/// filter, strict trend) is a [`config::StrategyConfig`] field, not a
/// separate code path.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: config::StrategyConfig,
}

impl Analyzer {
    pub fn new(config: config::StrategyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[inline]
    pub fn config(&self) -> &config::StrategyConfig {
        &self.config
    }

    /// Evaluate one bar window.
    ///
    /// Windows shorter than the slow EMA span degrade to a neutral
    /// result (trend `Insufficient`, all-Flat signals, zero accuracy);
    /// candlestick patterns are still reported when at least 3 bars are
    /// present, since the detector has no EMA dependency.
    pub fn evaluate<T: Ohlc>(&self, bars: &[T]) -> Analysis {
        let n = bars.len();
        tracing::debug!(bars = n, "evaluating window");

        let patterns = detectors::scan(bars);

        if n < self.config.min_bars() {
            let trend_label = trend::TrendLabel::Insufficient;
            let signals = vec![Signal::Flat; n];
            let levels = bars
                .last()
                .map(|bar| risk::trade_levels(bar.close(), Signal::Flat, trend_label));
            let confidence = confidence::score(&patterns, None, trend_label);
            return Analysis {
                trend: trend_label,
                signal: Signal::Flat,
                levels,
                accuracy: backtest::AccuracyResult::zero(),
                baseline_accuracy: backtest::AccuracyResult::zero(),
                patterns,
                breakout: None,
                confidence,
                signals,
            };
        }

        let frame = indicators::IndicatorFrame::compute(bars, &self.config);
        let trends = trend::classify_all(&frame, self.config.strict_trend);
        let latest_trend = trends[n - 1];

        let breakout = elliott::detect_breakout(bars, latest_trend);

        let raw = signal::generate(&frame, &trends, &self.config);
        let signals = signal::apply_filters(
            raw.clone(),
            &self.config,
            !patterns.is_empty(),
            breakout.is_some(),
        );

        let baseline_accuracy = backtest::accuracy(&raw, frame.closes());
        let accuracy = backtest::accuracy(&signals, frame.closes());

        let latest_signal = signals.last().copied().unwrap_or(Signal::Flat);
        let levels = bars
            .last()
            .map(|bar| risk::trade_levels(bar.close(), latest_signal, latest_trend));
        let confidence = confidence::score(&patterns, breakout.as_ref(), latest_trend);

        Analysis {
            trend: latest_trend,
            signal: latest_signal,
            levels,
            accuracy,
            baseline_accuracy,
            patterns,
            breakout,
            confidence,
            signals,
        }
    }

    /// Like [`Analyzer::evaluate`], but errors instead of degrading when
    /// the window is shorter than the slow EMA span.
    pub fn evaluate_strict<T: Ohlc>(&self, bars: &[T]) -> Result<Analysis> {
        let need = self.config.min_bars();
        if bars.len() < need {
            return Err(Error::InsufficientData {
                need,
                got: bars.len(),
            });
        }
        Ok(self.evaluate(bars))
    }
}

// ============================================================
// PARALLEL EVALUATION
// ============================================================

use rayon::prelude::*;

/// Result of evaluating a single instrument.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SymbolAnalysis {
    pub symbol: String,
    pub analysis: Analysis,
}

/// Evaluate multiple instruments in parallel with one shared config.
pub fn evaluate_parallel<'a, T, I>(analyzer: &Analyzer, instruments: I) -> Vec<SymbolAnalysis>
where
    T: Ohlc + Sync + 'a,
    I: IntoParallelIterator<Item = (&'a str, &'a [T])>,
{
    instruments
        .into_par_iter()
        .map(|(symbol, bars)| SymbolAnalysis {
            symbol: symbol.to_string(),
            analysis: analyzer.evaluate(bars),
        })
        .collect()
}

// ============================================================
// TESTS
// ============================================================
