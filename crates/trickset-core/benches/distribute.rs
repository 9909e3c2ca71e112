use criterion::{Criterion, black_box, criterion_group, criterion_main};
use trickset_core::engine::allocate::distribute;
use trickset_core::model::requirement::Requirement;
use trickset_core::model::trick::Trick;

fn sample_tricks(count: u32) -> Vec<Trick> {
    (0..count)
        .map(|id| {
            let identical = 1 + id % 4;
            Trick::new(id, format!("Trick {id}"))
                .with_requirements([Requirement::identical(identical), Requirement::any(2)])
        })
        .collect()
}

fn distribute_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("distribute");
    for (decks, tricks) in [(1u32, 4u32), (6, 12), (20, 40)] {
        let book = sample_tricks(tricks);
        group.bench_function(format!("decks_{decks}_tricks_{tricks}"), |b| {
            b.iter(|| distribute(black_box(decks), black_box(&book)))
        });
    }
    group.finish();
}

criterion_group!(benches, distribute_bench);
criterion_main!(benches);
