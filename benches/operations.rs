use automaflow::{algorithms::moore_partition_refinement, prelude::*};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const BENCH_SIZE: u32 = 8;
const RANDOM: [u32; 3] = [3, 2, 7];

/// An NFA over `{a, b, c}` whose edges are spread by stepping through the states with
/// stride `n`, with every third state final.
fn pseudorandom_nfa(states: u32, n: u32) -> Automaton {
    let mut aut = Automaton::new(format!("stride {n}"));
    for sym in ['a', 'b', 'c'] {
        aut.new_symbol(sym).unwrap();
    }
    for i in 0..states {
        aut.new_state(format!("q{i}"), Role::new(i == 0, i % 3 == 2))
            .unwrap();
    }

    let mut c: u32 = 0;
    for sym in ['a', 'b', 'c'] {
        for i in 1..=states {
            aut.new_transition(i, sym, c + 1).unwrap();
            c = c.wrapping_add(n) % states;
            // every other state branches
            if i % 2 == 0 {
                aut.new_transition(i, sym, c + 1).unwrap();
            }
        }
    }
    aut
}

fn data() -> (Vec<Automaton>, Vec<Automaton>) {
    let nfas: Vec<_> = RANDOM
        .iter()
        .map(|n| pseudorandom_nfa(BENCH_SIZE, *n))
        .collect();
    let dfas = nfas.iter().map(|nfa| nfa.determinize().into_owned()).collect();
    (nfas, dfas)
}

fn benchings(c: &mut Criterion) {
    let (nfas, dfas) = data();
    c.bench_function("subset construction", |b| {
        b.iter(|| {
            for nfa in black_box(&nfas) {
                nfa.determinize();
            }
        })
    });
    c.bench_function("moore refinement", |b| {
        b.iter(|| {
            for dfa in black_box(&dfas) {
                moore_partition_refinement(dfa);
            }
        })
    });
    c.bench_function("accepted words", |b| {
        b.iter(|| {
            for nfa in black_box(&nfas) {
                nfa.accepted_words(6);
            }
        })
    });
    c.bench_function("bounded equivalence", |b| {
        b.iter(|| {
            for (nfa, dfa) in black_box(nfas.iter().zip(&dfas)) {
                let _ = nfa.bounded_equivalence(dfa, 8);
            }
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = benchings
}
criterion_main!(benches);
