use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_match::core::CycleDiff;
use tui_match::engine::rules::{generate, resolve};
use tui_match::engine::SimpleRng;
use tui_match::term::Renderer;
use tui_match::types::{Coord, GameState, MoveAttempt};

/// An 8x8 board and the first legal move's result from it.
fn resolved_pair() -> (GameState, GameState) {
    let mut rng = SimpleRng::new(12345);
    let before = GameState::new(generate(8, 8, 5, &mut rng), 0);
    for y in 0..8 {
        for x in 0..7 {
            let Some(attempt) = MoveAttempt::new(Coord::new(x, y), Coord::new(x + 1, y)) else {
                continue;
            };
            let after = resolve(before.clone(), attempt, 5, &mut rng);
            if after != before {
                return (before, after);
            }
        }
    }
    (before.clone(), before)
}

fn bench_cycle_diff(c: &mut Criterion) {
    let (before, after) = resolved_pair();

    c.bench_function("cycle_diff_8x8", |b| {
        b.iter(|| CycleDiff::between(black_box(&before.board), black_box(&after.board)))
    });
}

fn bench_render(c: &mut Criterion) {
    let (before, _) = resolved_pair();
    let renderer = Renderer::default();

    c.bench_function("render_frame_8x8", |b| {
        b.iter(|| renderer.render(black_box(&before.board), before.score, Some(Coord::new(3, 3)), true))
    });
}

criterion_group!(benches, bench_cycle_diff, bench_render);
criterion_main!(benches);
