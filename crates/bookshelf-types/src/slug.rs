//! Slug derivation.
//!
//! A slug is a unique, URL-safe, human-readable identifier derived from a
//! title or name, distinct from the numeric primary key.

use std::collections::HashSet;

/// Placeholder base used when the input text contains nothing usable.
const EMPTY_FALLBACK: &str = "untitled";

/// Derives a unique slug for `text` against the set of `existing` slugs.
///
/// Lowercases the input, keeps ASCII alphanumerics, and collapses every
/// other run of characters into a single hyphen. Empty or whitespace-only
/// input falls back to `untitled`. On collision with a member of
/// `existing`, a numeric suffix (`-2`, `-3`, ...) is appended until the
/// result is unique.
///
/// Pure and deterministic given its inputs.
pub fn make_slug(existing: &HashSet<String>, text: &str) -> String {
    let base = normalize(text);
    let base = if base.is_empty() {
        EMPTY_FALLBACK.to_string()
    } else {
        base
    };

    if !existing.contains(&base) {
        return base;
    }

    let mut suffix = 2u64;
    loop {
        let candidate = format!("{base}-{suffix}");
        if !existing.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Lowercases and hyphenates `text`, dropping everything that is not ASCII
/// alphanumeric. Never produces leading, trailing, or doubled hyphens.
fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut gap = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if gap && !out.is_empty() {
                out.push('-');
            }
            gap = false;
            out.push(c.to_ascii_lowercase());
        } else {
            gap = true;
        }
    }

    out
}
