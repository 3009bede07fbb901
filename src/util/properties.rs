//! Minimal reader for Java-style `.properties` files.
//!
//! Framework tooling writes `local.properties` next to the Android project
//! (`flutter.sdk`, `flutter.versionName`, `flutter.versionCode`, ...).
//! Only the subset those files use is supported: `key=value` or
//! `key: value` lines, `#`/`!` comments, and backslash escapes. Line
//! continuations are not supported.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

/// Parse properties content into an ordered map. Later keys win.
pub fn parse(content: &str) -> BTreeMap<String, String> {
    let mut props = BTreeMap::new();

    for line in content.lines() {
        let line = line.trim_start();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let (key, value) = split_pair(line);
        let key = unescape(key.trim_end());
        if key.is_empty() {
            continue;
        }
        props.insert(key, unescape(value.trim()));
    }

    props
}

/// Read and parse a properties file.
pub fn load(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read properties file: {}", path.display()))?;
    Ok(parse(&content))
}

/// Split at the first unescaped `=` or `:`.
fn split_pair(line: &str) -> (&str, &str) {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => return (&line[..i], &line[i + 1..]),
            _ => {}
        }
    }
    (line, "")
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
