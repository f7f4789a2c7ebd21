// morfo-cli: shared utilities for CLI tools.

use std::path::{Path, PathBuf};
use std::process;

use morfo_stem::{Dictionary, DictionaryLookup};

/// Language used when `-l/--lang` is not given.
pub const DEFAULT_LANG: &str = "pl";

/// Automaton file extension.
const DICT_EXTENSION: &str = "dict";

/// Environment variable naming a dictionary directory or file.
const DICT_PATH_ENV: &str = "MORFO_DICT_PATH";

/// Search for `<lang>.dict` and load it together with its `.info` file.
///
/// Search order:
/// 1. `dict_path` argument (a dictionary file, or a directory holding one)
/// 2. `MORFO_DICT_PATH` environment variable (file or directory)
/// 3. `~/.morfo`
/// 4. `/usr/share/morfo`
/// 5. Current working directory
pub fn load_dictionary(dict_path: Option<&str>, lang: &str) -> Result<Dictionary, String> {
    let path = find_dictionary(dict_path, lang)?;
    Dictionary::read(&path).map_err(|e| format!("failed to load {}: {e}", path.display()))
}

/// Locate the dictionary file without loading it. See [`load_dictionary`].
pub fn find_dictionary(dict_path: Option<&str>, lang: &str) -> Result<PathBuf, String> {
    let file_name = format!("{lang}.{DICT_EXTENSION}");
    let search_paths = build_search_paths(dict_path);

    for path in &search_paths {
        if path.is_file() {
            return Ok(path.clone());
        }
        let candidate = path.join(&file_name);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    Err(format!(
        "could not find {} in any of the search paths:\n{}",
        file_name,
        search_paths
            .iter()
            .map(|p| format!("  - {}", p.display()))
            .collect::<Vec<_>>()
            .join("\n")
    ))
}

/// Build the list of files and directories to search for dictionaries.
fn build_search_paths(dict_path: Option<&str>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. Explicit path from argument
    if let Some(p) = dict_path {
        paths.push(PathBuf::from(p));
    }

    // 2. MORFO_DICT_PATH environment variable
    if let Ok(env_path) = std::env::var(DICT_PATH_ENV) {
        paths.push(PathBuf::from(env_path));
    }

    // 3. Home directory
    if let Some(home) = home_dir() {
        paths.push(home.join(".morfo"));
    }

    // 4. System path
    paths.push(PathBuf::from("/usr/share/morfo"));

    // 5. Current directory
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd);
    }

    paths
}

/// Get the user's home directory.
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// Parse a `--dict-path=PATH` or `-d PATH` argument from command line args.
///
/// Returns `(dict_path, remaining_args)`.
pub fn parse_dict_path(args: &[String]) -> (Option<String>, Vec<String>) {
    parse_option(args, "--dict-path", "-d")
}

/// Parse a `--lang=LANG` or `-l LANG` argument, defaulting to
/// [`DEFAULT_LANG`].
///
/// Returns `(lang, remaining_args)`.
pub fn parse_lang(args: &[String]) -> (String, Vec<String>) {
    let (lang, remaining) = parse_option(args, "--lang", "-l");
    (lang.unwrap_or_else(|| DEFAULT_LANG.to_string()), remaining)
}

fn parse_option(args: &[String], long: &str, short: &str) -> (Option<String>, Vec<String>) {
    let mut value = None;
    let mut remaining = Vec::new();
    let mut skip_next = false;
    let long_eq = format!("{long}=");

    for (i, arg) in args.iter().enumerate() {
        if skip_next {
            skip_next = false;
            continue;
        }
        if let Some(val) = arg.strip_prefix(&long_eq) {
            value = Some(val.to_string());
        } else if arg == long || arg == short {
            if i + 1 < args.len() {
                value = Some(args[i + 1].clone());
                skip_next = true;
            } else {
                fatal(&format!("{arg} requires a value"));
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    (value, remaining)
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}

/// Split running text into word tokens (maximal runs of alphanumeric
/// characters).
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
}

/// Stems of `word`, retrying with the lowercased word when the word as
/// written is unknown. Entries without a stem count as the word itself.
pub fn lemmas(lookup: &mut DictionaryLookup, word: &str) -> Vec<String> {
    let found = collect_stems(lookup, word);
    if !found.is_empty() {
        return found;
    }
    let lower = word.to_lowercase();
    if lower != word {
        return collect_stems(lookup, &lower);
    }
    found
}

fn collect_stems(lookup: &mut DictionaryLookup, word: &str) -> Vec<String> {
    lookup
        .lookup(word)
        .iter()
        .map(|d| d.stem().map_or_else(|| d.word().to_string(), |s| s.into_owned()))
        .collect()
}

/// Display a path relative to the working directory when possible.
pub fn display_path(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}
