// morfo-lookup: Look up words in a morfo dictionary.
//
// Prints every stem and tag stored for each word, one entry per line.
//
// Usage:
//   morfo-lookup [-d DICT_PATH] [-l LANG] [WORD...]
//
// Options:
//   -d, --dict-path PATH   Dictionary file, or directory containing LANG.dict
//   -l, --lang LANG        Dictionary language (default: pl)
//   -h, --help             Print help

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use morfo_stem::DictionaryLookup;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_path, args) = morfo_cli::parse_dict_path(&args);
    let (lang, args) = morfo_cli::parse_lang(&args);

    if morfo_cli::wants_help(&args) {
        println!("morfo-lookup: Look up words in a morfo dictionary.");
        println!();
        println!("Usage: morfo-lookup [-d DICT_PATH] [-l LANG] [WORD...]");
        println!();
        println!("If WORD arguments are given, looks up each word.");
        println!("Otherwise reads words from stdin (one per line).");
        println!();
        println!("Output: word<TAB>stem<TAB>tag, one line per dictionary entry.");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH   Dictionary file, or directory containing LANG.dict");
        println!("  -l, --lang LANG        Dictionary language (default: {})", morfo_cli::DEFAULT_LANG);
        println!("  -h, --help             Print this help");
        return;
    }

    let words: Vec<String> = args.iter().filter(|a| !a.starts_with('-')).cloned().collect();

    let dictionary = morfo_cli::load_dictionary(dict_path.as_deref(), &lang)
        .unwrap_or_else(|e| morfo_cli::fatal(&e));
    let mut lookup = DictionaryLookup::new(Arc::new(dictionary));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let mut lookup_word = |word: &str, out: &mut io::BufWriter<io::StdoutLock<'_>>| {
        let found = lookup.lookup(word);
        if found.is_empty() {
            let _ = writeln!(out, "{word}\t-\t-");
        }
        for data in found {
            let _ = writeln!(out, "{data}");
        }
    };

    if words.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("error reading stdin: {e}");
                    break;
                }
            };
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            lookup_word(word, &mut out);
        }
    } else {
        for word in &words {
            lookup_word(word, &mut out);
        }
    }
}
