// Key/value parser for `.info` files.
//
// The format is the classic properties syntax: one `key=value` (or
// `key: value`, or `key value`) entry per line, `#` and `!` comment lines,
// and backslash escapes in both keys and values.

use std::io::BufRead;

use hashbrown::HashMap;

use super::MetadataError;

/// A flat map of string attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: HashMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read entries from `reader`, one per line. Later keys override earlier
    /// ones.
    pub fn load<R: BufRead>(reader: R) -> Result<Self, MetadataError> {
        let mut props = Properties::new();
        for (n, line) in reader.lines().enumerate() {
            props.parse_line(&line?, n + 1)?;
        }
        Ok(props)
    }

    /// Parse entries from an in-memory string.
    pub fn parse(text: &str) -> Result<Self, MetadataError> {
        let mut props = Properties::new();
        for (n, line) in text.lines().enumerate() {
            props.parse_line(line, n + 1)?;
        }
        Ok(props)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn parse_line(&mut self, line: &str, line_number: usize) -> Result<(), MetadataError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            return Ok(());
        }

        let mut key_end = line.len();
        let mut has_separator = false;
        let mut escaped = false;
        for (i, c) in line.char_indices() {
            if escaped {
                escaped = false;
                continue;
            }
            match c {
                '\\' => escaped = true,
                '=' | ':' => {
                    key_end = i;
                    has_separator = true;
                    break;
                }
                ' ' | '\t' | '\x0c' => {
                    key_end = i;
                    break;
                }
                _ => {}
            }
        }

        let mut rest = &line[key_end..];
        if has_separator {
            rest = &rest[1..];
        }
        rest = rest.trim_start_matches(is_blank);
        if !has_separator {
            if let Some(stripped) = rest.strip_prefix(['=', ':']) {
                rest = stripped.trim_start_matches(is_blank);
            }
        }

        let key = unescape(&line[..key_end], line_number)?;
        let value = unescape(rest, line_number)?;
        self.entries.insert(key, value);
        Ok(())
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

fn unescape(text: &str, line_number: usize) -> Result<String, MetadataError> {
    if !text.contains('\\') {
        return Ok(text.to_string());
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = (hex.len() == 4)
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .and_then(char::from_u32);
                match decoded {
                    Some(ch) => out.push(ch),
                    None => {
                        return Err(MetadataError::MalformedEscape {
                            line: line_number,
                            escape: format!("\\u{hex}"),
                        });
                    }
                }
            }
            Some(other) => out.push(other),
            // A lone trailing backslash is dropped.
            None => {}
        }
    }
    Ok(out)
}
