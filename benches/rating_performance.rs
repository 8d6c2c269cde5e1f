//! Performance benchmarks for rating calculations

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use team_trueskill::rating::gaussian;
use team_trueskill::types::Participant;
use team_trueskill::{RatingEngine, TrueSkillEngine, TrueSkillParams};

fn team(prefix: &str, size: usize, base_mu: f64) -> Vec<Participant> {
    (0..size)
        .map(|i| {
            Participant::new(
                format!("{}{}", prefix, i),
                base_mu + i as f64 * 25.0,
                150.0 + i as f64 * 20.0,
            )
        })
        .collect()
}

fn bench_rating_calculations(c: &mut Criterion) {
    let engine = TrueSkillEngine::new(TrueSkillParams::default()).unwrap();

    let solo_a = team("a", 1, 1000.0);
    let solo_b = team("b", 1, 1100.0);
    c.bench_function("rating_calculation_1v1", |b| {
        b.iter(|| black_box(engine.update_teams(&solo_a, &solo_b, 3.0, 1.0)))
    });

    let team_a = team("a", 5, 1000.0);
    let team_b = team("b", 5, 950.0);
    c.bench_function("rating_calculation_5v5", |b| {
        b.iter(|| black_box(engine.update_teams(&team_a, &team_b, 2.0, 2.0)))
    });
}

fn bench_gaussian_primitives(c: &mut Criterion) {
    c.bench_function("gaussian_v_w", |b| {
        b.iter(|| {
            let t = black_box(0.75);
            black_box(gaussian::v(0.0, t, 1.0) + gaussian::w(0.0, t, 1.0))
        })
    });
}

criterion_group!(benches, bench_rating_calculations, bench_gaussian_primitives);
criterion_main!(benches);
