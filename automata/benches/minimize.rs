use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dfa::{alphabet, Dfa};

const SIZES: [usize; 3] = [16, 128, 512];
const STRIDES: [usize; 3] = [3, 7, 11];

fn pseudorandom_dfa(states: usize, n: usize) -> Dfa {
    let mut dfa = Dfa::new(alphabet!("a", "b", "c", "d"));
    for i in 0..states {
        dfa.add_state(&i.to_string());
    }

    let mut c: usize = 0;
    for sym in dfa.alphabet().universe() {
        for i in 0..states {
            dfa.set_transition(i, sym, c).unwrap();
            c = c.wrapping_add(n) % states;
        }
    }
    for i in (0..states).filter(|i| i % n == 0) {
        dfa.set_accepting(i, true).unwrap();
    }
    dfa.set_initial(0).unwrap();
    dfa
}

fn benchings(c: &mut Criterion) {
    for (size, stride) in SIZES.into_iter().zip(STRIDES) {
        let dfa = pseudorandom_dfa(size, stride);
        c.bench_function(&format!("minimize_{size}"), |b| {
            b.iter(|| black_box(&dfa).minimize().unwrap())
        });
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = benchings
}
criterion_main!(benches);
