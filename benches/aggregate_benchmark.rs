use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rift_rewind::models::MatchParticipantStat;
use rift_rewind::services::aggregator::{aggregate, AggregateOptions};

const CHAMPIONS: [&str; 8] = [
    "Ahri", "Jinx", "Garen", "Lux", "Yasuo", "Thresh", "Ezreal", "Leona",
];

/// Build a season of synthetic matches spread across the year.
fn synthetic_season(n: usize) -> Vec<MatchParticipantStat> {
    (0..n)
        .map(|i| MatchParticipantStat {
            champion_name: CHAMPIONS[i % CHAMPIONS.len()].to_string(),
            kills: (i % 17) as i32,
            deaths: (i % 9) as i32,
            assists: (i % 13) as i32,
            win: i % 2 == 0,
            duration_seconds: 1200 + (i as i64 % 1500),
            damage_dealt: 15_000 + (i as i64 * 311) % 30_000,
            penta_kills: (i % 97 == 0) as i32,
            quadra_kills: (i % 41 == 0) as i32,
            triple_kills: (i % 5 == 0) as i32,
            timestamp: Utc
                .with_ymd_and_hms(
                    2025,
                    1 + (i as u32 % 12),
                    1 + (i as u32 % 28),
                    i as u32 % 24,
                    (i as u32 * 7) % 60,
                    0,
                )
                .unwrap(),
            queue_id: if i % 3 == 0 { 420 } else { 450 },
        })
        .collect()
}

fn benchmark_aggregate(c: &mut Criterion) {
    let full_year = synthetic_season(100);
    let options = AggregateOptions::default();
    let offset_options = AggregateOptions {
        top_n: 5,
        utc_offset_minutes: -480,
    };

    let mut group = c.benchmark_group("aggregate");

    group.bench_function("full_year_100_matches", |b| {
        b.iter(|| aggregate(black_box(&full_year), black_box(&options)))
    });

    group.bench_function("full_year_with_utc_offset", |b| {
        b.iter(|| aggregate(black_box(&full_year), black_box(&offset_options)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_aggregate);
criterion_main!(benches);
