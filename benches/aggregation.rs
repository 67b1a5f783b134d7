use callstat_core::aggregation::UsageAggregator;
use callstat_core::types::{CallDirection, CallKind, CallLogEntry, CallType};
use callstat_pricing::{CostCalculator, Estimator, QuotaConfig};
use chrono::NaiveDate;
use criterion::{Criterion, criterion_group, criterion_main};
use futures::stream;
use std::hint::black_box;
use std::time::Duration;

fn create_test_entries(count: usize) -> Vec<CallLogEntry> {
    let base = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    (0..count)
        .map(|i| CallLogEntry {
            id: i.to_string(),
            deleted: "0".to_string(),
            time: base + chrono::Duration::minutes(i as i64),
            duration: Duration::from_secs((i % 900) as u64),
            number: "04012345".to_string(),
            direction: CallDirection::SuccessfulOutbound,
            partner: format!("0170{i:06}"),
            call_type: CallType::Regular,
            status: String::new(),
            kind: CallKind::from(match i % 4 {
                0 | 1 => "national",
                2 => "mobile",
                _ => "international",
            }),
            fax_status: String::new(),
            fax_error_reason: String::new(),
        })
        .collect()
}

fn benchmark_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");

    for count in [100, 10_000] {
        let entries = create_test_entries(count);
        group.bench_function(format!("aggregate_{count}_entries"), |b| {
            b.iter(|| UsageAggregator::aggregate(black_box(&entries)))
        });
    }

    group.finish();
}

fn benchmark_stream_aggregation(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let entries = create_test_entries(10_000);

    c.bench_function("aggregate_stream_10000_entries", |b| {
        b.iter(|| {
            let stream = stream::iter(entries.clone().into_iter().map(Ok));
            runtime.block_on(UsageAggregator::aggregate_stream(black_box(stream)))
        })
    });
}

fn benchmark_pricing(c: &mut Criterion) {
    let usage = UsageAggregator::aggregate(&create_test_entries(10_000));
    let calculator = CostCalculator::new(QuotaConfig::new(1000, 100));
    let estimator = Estimator::new(
        Duration::from_secs(31 * 86_400),
        Duration::from_secs(35 * 86_400),
    )
    .unwrap();

    c.bench_function("project_and_price", |b| {
        b.iter(|| calculator.calculate(&estimator.project(black_box(&usage)).unwrap()))
    });
}

criterion_group!(
    benches,
    benchmark_aggregation,
    benchmark_stream_aggregation,
    benchmark_pricing
);
criterion_main!(benches);
