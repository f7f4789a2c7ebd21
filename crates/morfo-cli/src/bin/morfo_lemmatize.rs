// morfo-lemmatize: Convert text to a lemma frequency list.
//
// Reads running text from stdin, looks up each word token, and produces a
// frequency list of lemmas. Ambiguous words have their score split evenly
// among their stems. Words the dictionary does not know are counted
// separately.
//
// Usage:
//   morfo-lemmatize [-d DICT_PATH] [-l LANG]
//
// Options:
//   -d, --dict-path PATH   Dictionary file, or directory containing LANG.dict
//   -l, --lang LANG        Dictionary language (default: pl)
//   -h, --help             Print help

use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use morfo_stem::DictionaryLookup;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_path, args) = morfo_cli::parse_dict_path(&args);
    let (lang, args) = morfo_cli::parse_lang(&args);

    if morfo_cli::wants_help(&args) {
        println!("morfo-lemmatize: Convert text to a lemma frequency list.");
        println!();
        println!("Usage: morfo-lemmatize [-d DICT_PATH] [-l LANG]");
        println!();
        println!("Reads text from stdin, looks up every word, and produces a");
        println!("frequency list of lemmas. Ambiguous words have their");
        println!("score split evenly among possible lemmas.");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH   Dictionary file, or directory containing LANG.dict");
        println!("  -l, --lang LANG        Dictionary language (default: {})", morfo_cli::DEFAULT_LANG);
        println!("  -h, --help             Print this help");
        return;
    }

    let dictionary = morfo_cli::load_dictionary(dict_path.as_deref(), &lang)
        .unwrap_or_else(|e| morfo_cli::fatal(&e));
    let mut lookup = DictionaryLookup::new(Arc::new(dictionary));

    let stdin = io::stdin();
    let mut known_freqs: HashMap<String, f64> = HashMap::new();
    let mut unknown_freqs: HashMap<String, u64> = HashMap::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("error reading stdin: {e}");
                break;
            }
        };

        for word in morfo_cli::words(&line) {
            let lemmas = morfo_cli::lemmas(&mut lookup, word);
            if lemmas.is_empty() {
                *unknown_freqs.entry(word.to_string()).or_insert(0) += 1;
            } else {
                let weight = 1.0 / lemmas.len() as f64;
                for lemma in lemmas {
                    *known_freqs.entry(lemma).or_insert(0.0) += weight;
                }
            }
        }
    }

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    // Sort known lemmas by frequency (descending), then alphabetically
    let mut known_list: Vec<(String, f64)> = known_freqs.into_iter().collect();
    known_list.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    let _ = writeln!(out, "=== Known words ===");
    for (lemma, freq) in &known_list {
        let _ = writeln!(out, "{lemma}\t{freq}");
    }

    let mut unknown_list: Vec<(String, u64)> = unknown_freqs.into_iter().collect();
    unknown_list.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let _ = writeln!(out, "=== Unknown words ===");
    for (word, freq) in &unknown_list {
        let _ = writeln!(out, "{word}\t{freq}");
    }
}
