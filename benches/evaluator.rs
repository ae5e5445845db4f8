use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use holdem_engine::cards::{parse_cards, Card};
use holdem_engine::evaluator::{evaluate_cards, evaluate_holdem, evaluate_seven};
use holdem_engine::hand::{Board, HoleCards};

fn bench_evaluate_cards(c: &mut Criterion) {
    let cases = [
        ("high_card", "Ah Kd 7s 5c 2d"),
        ("royal", "As Ks Qs Js Ts"),
        ("two_pair_of_six", "Jc Jd 9c 9h 2s 4d"),
    ];

    let mut g = c.benchmark_group("evaluate_cards");
    for (name, hand) in cases {
        let cards = parse_cards(hand).unwrap_or_default();
        g.bench_with_input(BenchmarkId::new(name, hand), &cards, |b, input| {
            b.iter(|| evaluate_cards(black_box(input)))
        });
    }
    g.finish();
}

fn bench_evaluate_seven(c: &mut Criterion) {
    let seven: [Card; 7] = match parse_cards("As Ah Ks Qs Js Ts 9s").map(<[Card; 7]>::try_from) {
        Ok(Ok(cards)) => cards,
        _ => return,
    };
    c.bench_function("evaluate_seven", |b| b.iter(|| evaluate_seven(black_box(&seven))));
}

fn bench_evaluate_holdem(c: &mut Criterion) {
    let (Ok(hole), Ok(board)) = ("9c 9d".parse::<HoleCards>(), "9h 5s 2d Kc Kd".parse::<Board>())
    else {
        return;
    };
    c.bench_function("evaluate_holdem", |b| {
        b.iter(|| evaluate_holdem(black_box(&hole), black_box(&board)))
    });
}

criterion_group!(benches, bench_evaluate_cards, bench_evaluate_seven, bench_evaluate_holdem);
criterion_main!(benches);
