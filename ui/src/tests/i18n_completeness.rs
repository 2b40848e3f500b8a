//! Every `t!` key used in `src/` must exist in the fallback bundle, and every
//! locale must define every fallback key.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

const FTL_FILENAME: &str = "decisionmate-ui.ftl";
const FALLBACK: &str = "en-US";

fn is_key_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '-')
}

/// Message ids defined at the start of a line (`id = ...`). Terms,
/// comments and continuation lines are skipped.
fn ftl_keys(content: &str) -> BTreeSet<String> {
    content
        .lines()
        .filter(|line| !line.starts_with(char::is_whitespace))
        .filter_map(|line| line.split_once('='))
        .map(|(id, _)| id.trim())
        .filter(|id| !id.is_empty() && !id.starts_with('-') && id.chars().all(is_key_char))
        .map(str::to_string)
        .collect()
}

/// Literal first arguments of `t!(...)`, allowing whitespace or a line
/// break before the literal.
fn source_keys(content: &str) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    let mut rest = content;
    while let Some(pos) = rest.find("t!(") {
        // `format!(`, `assert!(` and friends also end in `t!(`.
        let glued = rest[..pos]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric() || c == '_');
        rest = &rest[pos + 3..];
        if glued {
            continue;
        }
        let trimmed = rest.trim_start();
        let Some(literal) = trimmed.strip_prefix('"') else {
            continue;
        };
        if let Some(end) = literal.find('"') {
            let key = &literal[..end];
            if !key.is_empty() && key.chars().all(is_key_char) {
                found.insert(key.to_string());
            }
        }
    }
    found
}

fn rust_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(path) = stack.pop() {
        if path.is_dir() {
            if let Ok(entries) = fs::read_dir(&path) {
                stack.extend(entries.flatten().map(|entry| entry.path()));
            }
        } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
            files.push(path);
        }
    }
    files
}

fn locale_bundles(i18n_root: &Path) -> BTreeMap<String, BTreeSet<String>> {
    let mut bundles = BTreeMap::new();
    for entry in fs::read_dir(i18n_root).expect("i18n directory").flatten() {
        let path = entry.path();
        let Some(locale) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if !path.is_dir() || !locale.contains('-') {
            continue;
        }
        let file = path.join(FTL_FILENAME);
        let content = fs::read_to_string(&file)
            .unwrap_or_else(|err| panic!("locale {locale} has no {FTL_FILENAME}: {err}"));
        bundles.insert(locale.to_string(), ftl_keys(&content));
    }
    bundles
}

#[test]
fn referenced_keys_exist_in_every_locale() {
    let crate_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let bundles = locale_bundles(&crate_root.join("i18n"));
    let fallback = bundles.get(FALLBACK).expect("fallback bundle present");
    assert!(!fallback.is_empty(), "fallback bundle defines no messages");

    let referenced: BTreeSet<String> = rust_files(&crate_root.join("src"))
        .iter()
        .filter_map(|path| fs::read_to_string(path).ok())
        .flat_map(|content| source_keys(&content))
        .collect();

    let missing: Vec<_> = referenced.difference(fallback).cloned().collect();
    assert!(
        missing.is_empty(),
        "keys used in src/ but missing from {FALLBACK}:\n  {}",
        missing.join("\n  ")
    );

    let mut report = String::new();
    for (locale, keys) in &bundles {
        let gaps: Vec<_> = fallback.difference(keys).cloned().collect();
        if !gaps.is_empty() {
            report.push_str(&format!("{locale}: {}\n", gaps.join(", ")));
        }
    }
    assert!(report.is_empty(), "locales missing fallback keys:\n{report}");

    let unused: Vec<_> = fallback.difference(&referenced).cloned().collect();
    if !unused.is_empty() {
        eprintln!("[i18n] fallback keys not referenced from src/: {}", unused.join(", "));
    }
}

#[test]
fn key_scanner_handles_multiline_calls() {
    let src = "let a = t!(\"nav-dashboard\");\nlet b = t!(\n    \"export-failed\",\n    error = e\n);\nfl!(x, \"ignored\");";
    let keys = source_keys(src);
    assert!(keys.contains("nav-dashboard"));
    assert!(keys.contains("export-failed"));
    assert_eq!(keys.len(), 2);
}
