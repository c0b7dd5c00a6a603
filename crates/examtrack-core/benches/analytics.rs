use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use examtrack_core::analytics::compute_analytics;
use examtrack_core::cache::SnapshotCache;
use examtrack_core::model::{ExamId, ExamRecord, Field, FieldId, FieldScore};

fn make_fields(n: i64) -> Vec<Field> {
    (1..=n)
        .map(|id| Field {
            id: FieldId(id),
            name: format!("field-{id}"),
            description: None,
            color: None,
        })
        .collect()
}

fn make_exams(n: i64, fields: i64) -> Vec<ExamRecord> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let created = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    (0..n)
        .map(|i| ExamRecord {
            id: ExamId(i),
            name: format!("exam-{i}"),
            // reverse order so the progress sort has work to do
            date: start + Duration::days(n - i),
            passed: i % 3 != 0,
            total_score: if i % 5 == 0 { None } else { Some((i % 100) as u32) },
            max_total_score: Some(100),
            field_scores: (1..=fields)
                .map(|f| FieldScore {
                    field_id: FieldId(f),
                    score: ((i + f) % 25) as u32,
                    max_score: 25,
                    created_at: created + Duration::hours(i),
                })
                .collect(),
            notes: None,
        })
        .collect()
}

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_analytics");

    for (exams, fields) in [(10, 3), (100, 10), (1000, 20)] {
        let exam_list = make_exams(exams, fields);
        let field_list = make_fields(fields);
        group.bench_function(format!("exams={exams},fields={fields}"), |b| {
            b.iter(|| compute_analytics(black_box(&exam_list), black_box(&field_list)))
        });
    }

    group.finish();
}

fn bench_cache_hit(c: &mut Criterion) {
    let exams = make_exams(1000, 20);
    let fields = make_fields(20);
    let mut cache = SnapshotCache::new();
    cache.get_or_compute(&exams, &fields);

    c.bench_function("snapshot_cache_hit", |b| {
        b.iter(|| cache.get_or_compute(black_box(&exams), black_box(&fields)))
    });
}

criterion_group!(benches, bench_compute, bench_cache_hit);
criterion_main!(benches);
