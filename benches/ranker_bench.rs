use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use wordle_assist::ranker::partition;
use wordle_assist::{evaluate, load_dictionary, rank, RankerConfig, SortPolicy, Word};

fn bench_evaluate(c: &mut Criterion) {
    let guess = Word::parse("geese").unwrap();
    let solution = Word::parse("creep").unwrap();
    c.bench_function("evaluate", |b| {
        b.iter(|| evaluate(black_box(&guess), black_box(&solution)))
    });
}

fn bench_partition(c: &mut Criterion) {
    let dictionary = load_dictionary().unwrap();
    let guess = Word::parse("roate").unwrap();
    c.bench_function("partition_full_answers", |b| {
        b.iter(|| partition(black_box(&guess), black_box(dictionary.answers())))
    });
}

fn bench_rank_opening(c: &mut Criterion) {
    let dictionary = load_dictionary().unwrap();
    let config = RankerConfig::default();
    c.bench_function("rank_opening", |b| {
        b.iter(|| {
            rank(
                black_box(dictionary.guesses()),
                black_box(dictionary.answers()),
                SortPolicy::ByOverall,
                &config,
            )
        })
    });
}

criterion_group!(benches, bench_evaluate, bench_partition, bench_rank_opening);
criterion_main!(benches);
