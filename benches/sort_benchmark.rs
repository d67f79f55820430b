use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::hint::black_box;
use personal_hub::models::nba::sort_rows;
use personal_hub::models::{Player, PlayerRow, PlayerStats, SortKey, SortOrder, UpstreamId};

/// A league-sized table: every fifth player has no stats.
fn league_rows(count: i64) -> Vec<PlayerRow> {
    (0..count)
        .map(|i| {
            let player = Player {
                id: UpstreamId::Number(i),
                name: format!("Player {:03}", (i * 7919) % count),
                position: Some(["G", "F", "C"][(i % 3) as usize].to_string()),
                extra: serde_json::Map::new(),
            };
            let stats = (i % 5 != 0).then(|| PlayerStats {
                games_played: (i % 82) as f64,
                points: ((i * 37) % 300) as f64 / 10.0,
                rebounds: ((i * 13) % 120) as f64 / 10.0,
                assists: ((i * 11) % 100) as f64 / 10.0,
                steals: ((i * 3) % 25) as f64 / 10.0,
                blocks: ((i * 5) % 30) as f64 / 10.0,
                extra: serde_json::Map::new(),
            });
            PlayerRow { player, stats }
        })
        .collect()
}

fn benchmark_sort_rows(c: &mut Criterion) {
    let rows = league_rows(500);

    let mut group = c.benchmark_group("stat_table_sort");

    group.bench_function("points_desc", |b| {
        b.iter_batched(
            || rows.clone(),
            |mut rows| sort_rows(black_box(&mut rows), SortKey::Points, SortOrder::Desc),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("name_asc", |b| {
        b.iter_batched(
            || rows.clone(),
            |mut rows| sort_rows(black_box(&mut rows), SortKey::Name, SortOrder::Asc),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, benchmark_sort_rows);
criterion_main!(benches);
