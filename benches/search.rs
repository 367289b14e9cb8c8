use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dat_trie::DoubleArrayTrie;

// ── Hand-rolled LCG (no external deps) ──────────────────────────────────────

struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0
    }
    /// Returns a value in [0, bound).
    fn next_range(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

// ── Hiragana string keys (10K) ───────────────────────────────────────────────

/// 'あ' (U+3041) .. 'ん' (U+3093) — 83 hiragana codepoints
const HIRAGANA_START: u32 = 0x3041;
const HIRAGANA_COUNT: u64 = 83;

fn generate_keys(n: usize, seed: u64) -> Vec<String> {
    let mut rng = Lcg::new(seed);
    let mut set = std::collections::BTreeSet::new();
    while set.len() < n {
        let len = (rng.next_range(7) + 2) as usize; // 2..=8
        let key: String = (0..len)
            .map(|_| {
                let cp = HIRAGANA_START + rng.next_range(HIRAGANA_COUNT) as u32;
                char::from_u32(cp).unwrap()
            })
            .collect();
        set.insert(key);
    }
    set.into_iter().collect() // already sorted & unique
}

fn bench_build(c: &mut Criterion) {
    let keys = generate_keys(10_000, 42);
    c.bench_function("build_10k_hiragana", |b| {
        b.iter(|| DoubleArrayTrie::build(black_box(&keys)));
    });
}

fn bench_dump_load(c: &mut Criterion) {
    let keys = generate_keys(10_000, 42);
    let trie = DoubleArrayTrie::build(&keys).unwrap();
    let dir = std::env::temp_dir();
    let path = dir.join("dat-trie-bench.gz");
    trie.dump(&path).unwrap();

    c.bench_function("dump_10k", |b| {
        b.iter(|| black_box(&trie).dump(black_box(&path)).unwrap());
    });
    c.bench_function("load_10k", |b| {
        b.iter(|| DoubleArrayTrie::load(black_box(&path)).unwrap());
    });
    std::fs::remove_file(&path).ok();
}

fn bench_matches(c: &mut Criterion) {
    let keys = generate_keys(10_000, 42);
    let trie = DoubleArrayTrie::build(&keys).unwrap();

    let mut rng = Lcg::new(123);
    let hit_keys: Vec<&String> = (0..1000)
        .map(|_| &keys[rng.next_range(keys.len() as u64) as usize])
        .collect();
    let miss_keys: Vec<String> = (0..1000)
        .map(|_| {
            let len = (rng.next_range(7) + 2) as usize;
            (0..len)
                .map(|_| {
                    let cp = 0x30A0 + rng.next_range(83) as u32; // katakana range — guaranteed miss
                    char::from_u32(cp).unwrap()
                })
                .collect()
        })
        .collect();

    c.bench_function("matches_hit_1k", |b| {
        b.iter(|| {
            for key in &hit_keys {
                black_box(trie.matches(black_box(key)));
            }
        });
    });

    c.bench_function("matches_miss_1k", |b| {
        b.iter(|| {
            for key in &miss_keys {
                black_box(trie.matches(black_box(key)));
            }
        });
    });
}

fn bench_obtain_prefixes(c: &mut Criterion) {
    let keys = generate_keys(10_000, 42);
    let trie = DoubleArrayTrie::build(&keys).unwrap();

    let mut rng = Lcg::new(777);
    let probes: Vec<String> = (0..100)
        .map(|_| {
            let key = &keys[rng.next_range(keys.len() as u64) as usize];
            key.chars().take(2).collect::<String>()
        })
        .collect();

    c.bench_function("obtain_prefixes_100", |b| {
        b.iter(|| {
            for probe in &probes {
                black_box(trie.obtain_prefixes(black_box(probe)));
            }
        });
    });
}

fn bench_analysis(c: &mut Criterion) {
    let keys = generate_keys(10_000, 42);
    let trie = DoubleArrayTrie::build(&keys).unwrap();

    let mut rng = Lcg::new(999);
    let sentence: String = (0..200)
        .map(|_| {
            let cp = HIRAGANA_START + rng.next_range(HIRAGANA_COUNT) as u32;
            char::from_u32(cp).unwrap()
        })
        .collect();

    c.bench_function("analysis_200char_sentence", |b| {
        b.iter(|| black_box(trie.analysis(black_box(&sentence))));
    });
}

criterion_group!(
    benches,
    bench_build,
    bench_dump_load,
    bench_matches,
    bench_obtain_prefixes,
    bench_analysis,
);
criterion_main!(benches);
