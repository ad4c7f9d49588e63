use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use minegrid_core::*;

fn generate(c: &mut Criterion) {
    let tiers = [
        ("beginner", Settings::beginner()),
        ("intermediate", Settings::intermediate()),
        ("expert", Settings::expert()),
    ];

    for (name, settings) in tiers {
        for placement in [Placement::Rejection, Placement::Shuffle] {
            let mut generator = RandomGenerator::with_placement(0xDE70, placement);
            c.bench_function(&format!("generate/{name}/{placement:?}"), |b| {
                b.iter(|| generator.generate(black_box(&settings)))
            });
        }
    }

    // nearly full boards are where rejection sampling pays for duplicates
    let dense = Settings::new(20, 24, 470).expect("valid settings");
    for placement in [Placement::Rejection, Placement::Shuffle] {
        let mut generator = RandomGenerator::with_placement(0xDE70, placement);
        c.bench_function(&format!("generate/dense/{placement:?}"), |b| {
            b.iter(|| generator.generate(black_box(&dense)))
        });
    }
}

fn cascade(c: &mut Criterion) {
    let empty = Grid::from_mine_coords((200, 200), &[]).expect("valid layout");
    c.bench_function("cascade/empty_200x200", |b| {
        b.iter(|| {
            let mut grid = empty.clone();
            reveal_from(&mut grid, black_box((100, 100)))
        })
    });

    let mut generator = RandomGenerator::new(0xDE70);
    let settings = Settings::expert();
    c.bench_function("session/expert_first_reveal", |b| {
        b.iter(|| {
            let grid = generator.generate(&settings);
            let mut session =
                Session::from_grid(grid, RandomGenerator::new(1)).expect("valid grid");
            session.reveal(black_box((12, 10)))
        })
    });
}

criterion_group!(benches, generate, cascade);
criterion_main!(benches);
