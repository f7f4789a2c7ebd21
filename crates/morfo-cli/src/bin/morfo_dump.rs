// morfo-dump: Print the contents of a morfo dictionary.
//
// Without options, prints every sequence stored in the automaton, one per
// line, decoded from the dictionary encoding. With --info, prints the
// automaton header, flags and statistics together with the metadata
// attributes instead.
//
// Usage:
//   morfo-dump [-d DICT_PATH] [-l LANG] [--info]
//
// Options:
//   -d, --dict-path PATH   Dictionary file, or directory containing LANG.dict
//   -l, --lang LANG        Dictionary language (default: pl)
//       --info             Print header, statistics and metadata
//   -h, --help             Print help

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use morfo_fsa::info::FsaInfo;
use morfo_fsa::{Fsa, FsaHeader, SequenceEnumerator};
use morfo_stem::Dictionary;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_path, args) = morfo_cli::parse_dict_path(&args);
    let (lang, args) = morfo_cli::parse_lang(&args);

    if morfo_cli::wants_help(&args) {
        println!("morfo-dump: Print the contents of a morfo dictionary.");
        println!();
        println!("Usage: morfo-dump [-d DICT_PATH] [-l LANG] [--info]");
        println!();
        println!("Prints every sequence stored in the dictionary automaton,");
        println!("or a summary of the dictionary with --info.");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH   Dictionary file, or directory containing LANG.dict");
        println!("  -l, --lang LANG        Dictionary language (default: {})", morfo_cli::DEFAULT_LANG);
        println!("      --info             Print header, statistics and metadata");
        println!("  -h, --help             Print this help");
        return;
    }

    let info = args.iter().any(|a| a == "--info");

    let path = morfo_cli::find_dictionary(dict_path.as_deref(), &lang)
        .unwrap_or_else(|e| morfo_cli::fatal(&e));
    let dictionary = Dictionary::read(&path)
        .unwrap_or_else(|e| morfo_cli::fatal(&format!("failed to load {}: {e}", path.display())));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    if info {
        print_info(&path, &dictionary, &mut out);
    } else {
        print_sequences(&dictionary, &mut out);
    }
}

fn print_info(path: &Path, dictionary: &Dictionary, out: &mut impl Write) {
    let header = File::open(path)
        .map_err(|e| e.to_string())
        .and_then(|mut f| FsaHeader::read(&mut f).map_err(|e| e.to_string()))
        .unwrap_or_else(|e| morfo_cli::fatal(&e));

    let fsa = dictionary.fsa();
    let metadata = dictionary.metadata();

    let _ = writeln!(out, "file: {}", morfo_cli::display_path(path));
    let _ = writeln!(out, "format: {}", header.version);
    let _ = writeln!(out, "flags: {}", fsa.flags());
    let _ = writeln!(out, "{}", FsaInfo::new(fsa));
    let _ = writeln!(out, "encoder: {}", metadata.encoder_type());
    let _ = writeln!(out, "encoding: {}", metadata.encoding().name());
    let _ = writeln!(out, "separator: {}", metadata.separator_char());
    let _ = writeln!(out, "=== Metadata ===");
    let attributes = metadata.attributes();
    for key in attributes.keys() {
        if let Some(value) = attributes.get(key) {
            let _ = writeln!(out, "{key}={value}");
        }
    }
}

fn print_sequences(dictionary: &Dictionary, out: &mut impl Write) {
    let fsa = dictionary.fsa();
    let encoding = dictionary.metadata().encoding();
    let mut sequences = SequenceEnumerator::from_node(fsa, fsa.root_node());
    while let Some(sequence) = sequences.next_sequence(fsa) {
        let (text, _) = encoding.decode_without_bom_handling(sequence);
        let _ = writeln!(out, "{text}");
    }
}
