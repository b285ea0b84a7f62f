//! Benchmarks for the evaluation pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sigzone::prelude::*;

/// Simple bench bar structure
#[derive(Debug, Clone, Copy)]
struct BenchBar {
    o: f64,
    h: f64,
    l: f64,
    c: f64,
}

impl Ohlc for BenchBar {
    fn open(&self) -> f64 {
        self.o
    }

    fn high(&self) -> f64 {
        self.h
    }

    fn low(&self) -> f64 {
        self.l
    }

    fn close(&self) -> f64 {
        self.c
    }
}

/// Generate realistic pseudo-random bars
fn generate_bars(n: usize) -> Vec<BenchBar> {
    let mut bars = Vec::with_capacity(n);
    let mut price = 100.0;

    for i in 0..n {
        let change = ((i * 7 + 13) % 100) as f64 / 50.0 - 1.0; // Deterministic "random"
        let volatility = 2.0 + ((i * 3) % 10) as f64 / 5.0;

        let o = price;
        let c = price + change;
        let h = o.max(c) + volatility * 0.5;
        let l = o.min(c) - volatility * 0.5;

        bars.push(BenchBar { o, h, l, c });
        price = c;
    }

    bars
}

fn bench_evaluate(c: &mut Criterion) {
    let bars = generate_bars(1000);
    let analyzer = Analyzer::new(StrategyConfig::default()).unwrap();

    c.bench_function("evaluate_1000_bars", |b| {
        b.iter(|| {
            let _ = black_box(analyzer.evaluate(black_box(&bars)));
        })
    });
}

fn bench_evaluate_all_filters(c: &mut Criterion) {
    let bars = generate_bars(1000);
    let config = StrategyConfig {
        use_rsi_gate: true,
        use_elliott_filter: true,
        use_price_action_filter: true,
        strict_trend: true,
        ..Default::default()
    };
    let analyzer = Analyzer::new(config).unwrap();

    c.bench_function("evaluate_1000_bars_all_filters", |b| {
        b.iter(|| {
            let _ = black_box(analyzer.evaluate(black_box(&bars)));
        })
    });
}

fn bench_pattern_scan(c: &mut Criterion) {
    let bars = generate_bars(1000);

    c.bench_function("pattern_scan_1000_bars", |b| {
        b.iter(|| {
            let _ = black_box(scan(black_box(&bars)));
        })
    });
}

fn bench_parallel_symbols(c: &mut Criterion) {
    let analyzer = Analyzer::new(StrategyConfig::default()).unwrap();
    let series: Vec<Vec<BenchBar>> = (0..8).map(|i| generate_bars(500 + i * 50)).collect();
    let symbols = ["BTC-USD", "GC=F", "^NSEI", "RELIANCE.NS", "TCS.NS", "INFY.NS", "ETH-USD", "SI=F"];

    c.bench_function("evaluate_parallel_8_symbols", |b| {
        b.iter(|| {
            let instruments: Vec<(&str, &[BenchBar])> = symbols
                .iter()
                .zip(&series)
                .map(|(s, bars)| (*s, bars.as_slice()))
                .collect();
            let _ = black_box(evaluate_parallel(&analyzer, instruments));
        })
    });
}

criterion_group!(
    benches,
    bench_evaluate,
    bench_evaluate_all_filters,
    bench_pattern_scan,
    bench_parallel_symbols
);
criterion_main!(benches);
