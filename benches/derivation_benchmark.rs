use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ratedeck::config::PortalConfig;
use ratedeck::core::currency::{CurrencyCode, FxRateTable};
use ratedeck::core::product::ProductType;
use ratedeck::engine::derivation::DerivationEngine;
use ratedeck::sample::{generate_outbound_rows, SampleConfig};

fn bench_derive_100_rows(c: &mut Criterion) {
    let config = PortalConfig::standard();
    let fx = FxRateTable::new(CurrencyCode::new("USD"));
    let product = ProductType::new("international_outbound_rates");
    let rows = generate_outbound_rows(&SampleConfig {
        row_count: 100,
        ..Default::default()
    });

    c.bench_function("derive_100_rows", |b| {
        b.iter(|| {
            DerivationEngine::derive(
                &config.derivations,
                &fx,
                &product,
                black_box(rows.clone()),
            )
        })
    });
}

fn bench_derive_10_000_rows(c: &mut Criterion) {
    let config = PortalConfig::standard();
    let fx = FxRateTable::new(CurrencyCode::new("USD"));
    let product = ProductType::new("international_outbound_rates");
    let rows = generate_outbound_rows(&SampleConfig {
        row_count: 10_000,
        ..Default::default()
    });

    c.bench_function("derive_10_000_rows", |b| {
        b.iter(|| {
            DerivationEngine::derive(
                &config.derivations,
                &fx,
                &product,
                black_box(rows.clone()),
            )
        })
    });
}

criterion_group!(benches, bench_derive_100_rows, bench_derive_10_000_rows);
criterion_main!(benches);
