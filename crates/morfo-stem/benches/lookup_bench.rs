// Criterion benchmarks for morfo-stem.
//
// Most benchmarks run on a synthetic dictionary generated in memory, so they
// need no external files. `lookup_real_dictionary` additionally needs a
// `pl.dict`/`pl.info` pair; set MORFO_DICT_PATH to the directory holding it.
//
// Run:
//   cargo bench -p morfo-stem
//   MORFO_DICT_PATH=/path/to/dicts cargo bench -p morfo-stem

use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use morfo_fsa::fixture::Cfsa2Builder;
use morfo_fsa::{Fsa, FsaTraversal, sequences};
use morfo_stem::{Dictionary, DictionaryLookup, EncoderType, SequenceEncoder};

// ---------------------------------------------------------------------------
// Synthetic dictionary
// ---------------------------------------------------------------------------

const STEMS: &[&str] = &[
    "dom", "kot", "las", "pies", "zamek", "miasto", "rzeka", "okno", "drzewo", "kwiat",
];
const ENDINGS: &[&str] = &["", "a", "u", "y", "em", "ami", "ach", "om", "owi", "ie"];

/// Every stem with every ending, repeated with numeric prefixes for volume.
fn synthetic_forms() -> Vec<(String, String)> {
    let mut forms = Vec::new();
    for prefix in 0..20 {
        for stem in STEMS {
            for ending in ENDINGS {
                let lemma = format!("{stem}{prefix:02}");
                forms.push((format!("{lemma}{ending}"), lemma));
            }
        }
    }
    forms
}

fn synthetic_dictionary() -> (Arc<Dictionary>, Vec<String>) {
    let forms = synthetic_forms();
    let encoder = EncoderType::Suffix;
    let mut encoded = Vec::new();
    let sequences: Vec<Vec<u8>> = forms
        .iter()
        .map(|(form, lemma)| {
            encoder.encode(&mut encoded, form.as_bytes(), lemma.as_bytes());
            let mut seq = form.as_bytes().to_vec();
            seq.push(b'+');
            seq.extend_from_slice(&encoded);
            seq.extend_from_slice(b"+subst:sg");
            seq
        })
        .collect();

    let data = Cfsa2Builder::new().build(&sequences);
    let dictionary = Dictionary::read_from(data.as_slice(), &b"fsa.dict.encoder=SUFFIX\nfsa.dict.separator=+\n"[..])
        .expect("synthetic dictionary");
    let words = forms.into_iter().map(|(form, _)| form).collect();
    (Arc::new(dictionary), words)
}

fn find_dictionary() -> Option<std::path::PathBuf> {
    let dir = std::env::var("MORFO_DICT_PATH").ok()?;
    let path = std::path::PathBuf::from(dir).join("pl.dict");
    path.is_file().then_some(path)
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Look up every synthetic form once.
fn bench_lookup(c: &mut Criterion) {
    let (dictionary, words) = synthetic_dictionary();
    let mut lookup = DictionaryLookup::new(dictionary);

    c.bench_function("lookup_2000_forms", |b| {
        b.iter(|| {
            for word in &words {
                std::hint::black_box(lookup.lookup(word).len());
            }
        });
    });
}

/// Raw automaton matching without stem decoding.
fn bench_match(c: &mut Criterion) {
    let (dictionary, words) = synthetic_dictionary();
    let fsa = dictionary.fsa();
    let traversal = FsaTraversal::new(fsa);

    c.bench_function("match_2000_forms", |b| {
        b.iter(|| {
            for word in &words {
                std::hint::black_box(traversal.match_from_root(word.as_bytes()));
            }
        });
    });
}

/// Enumerate the whole automaton.
fn bench_enumerate(c: &mut Criterion) {
    let (dictionary, _) = synthetic_dictionary();
    let fsa = dictionary.fsa();

    c.bench_function("enumerate_all_sequences", |b| {
        b.iter(|| std::hint::black_box(sequences(fsa, fsa.root_node()).count()));
    });
}

/// Perfect hashing on an automaton built with right-language counts.
fn bench_perfect_hash(c: &mut Criterion) {
    let words: Vec<String> = synthetic_forms().into_iter().map(|(form, _)| form).collect();
    let data = Cfsa2Builder::new().with_numbers(true).build(&words);
    let fsa = morfo_fsa::read(data.as_slice()).expect("numbered automaton");
    let traversal = FsaTraversal::new(fsa.as_ref());

    c.bench_function("perfect_hash_2000_forms", |b| {
        b.iter(|| {
            for word in &words {
                std::hint::black_box(traversal.perfect_hash_from_root(word.as_bytes()).ok());
            }
        });
    });
}

/// Encode and decode one stem with every codec.
fn bench_codecs(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    for encoder in EncoderType::ALL {
        let mut encoded = Vec::new();
        let mut decoded = Vec::new();
        group.bench_function(encoder.name(), |b| {
            b.iter(|| {
                encoder.encode(&mut encoded, b"najpiekniejszymi", b"piekny");
                encoder
                    .decode(&mut decoded, b"najpiekniejszymi", &encoded)
                    .expect("round trip");
                std::hint::black_box(decoded.len());
            });
        });
    }
    group.finish();
}

/// Look up common Polish forms in a real dictionary.
fn bench_real_dictionary(c: &mut Criterion) {
    let Some(path) = find_dictionary() else {
        eprintln!("[bench_real_dictionary] pl.dict not found, skipping (set MORFO_DICT_PATH)");
        c.bench_function("lookup_real_dictionary (skipped)", |b| b.iter(|| {}));
        return;
    };

    let dictionary = Dictionary::read(&path).expect("pl.dict");
    let mut lookup = DictionaryLookup::new(Arc::new(dictionary));
    let words = [
        "psa", "domu", "kotami", "lasy", "zamku", "miastach", "rzece", "oknie", "drzewa",
        "kwiatów", "mieli", "przyszli", "najlepszy", "ładnie", "nieduży",
    ];

    c.bench_function("lookup_real_dictionary", |b| {
        b.iter(|| {
            for word in &words {
                std::hint::black_box(lookup.lookup(word).len());
            }
        });
    });
}

criterion_group!(
    benches,
    bench_lookup,
    bench_match,
    bench_enumerate,
    bench_perfect_hash,
    bench_codecs,
    bench_real_dictionary,
);
criterion_main!(benches);
