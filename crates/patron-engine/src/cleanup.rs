//! Text cleanup passes.
//!
//! Two levels: a per-column pass that only collapses line breaks and
//! runs of spaces, and a range pass that additionally fixes spacing
//! around punctuation. Values containing `@` are exempt from the
//! punctuation rules so email addresses are never mangled.

use std::sync::LazyLock;

use regex::Regex;

use patron_model::CellValue;

use crate::outcome::Outcome;

static LINE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|\n|\r").expect("line-break regex compiles"));

static MULTI_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("multi-space regex compiles"));

const PUNCTUATION: &[char] = &[',', '.', '?', '!', ':', ';', ')', '}', ']', '/'];

/// Column pass: line breaks become spaces, runs of whitespace collapse.
pub fn clean_line_breaks(value: &CellValue) -> Outcome {
    let CellValue::Text(original) = value else {
        return Outcome::Unchanged;
    };
    let cleaned = MULTI_SPACE_RE
        .replace_all(&LINE_BREAK_RE.replace_all(original, " "), " ")
        .into_owned();
    if cleaned == *original {
        Outcome::Unchanged
    } else {
        Outcome::Normalized(CellValue::Text(cleaned))
    }
}

/// Range pass: punctuation spacing (non-email values only), then line
/// breaks, whitespace collapse, and a final trim.
pub fn clean_advanced(value: &CellValue) -> Outcome {
    let CellValue::Text(original) = value else {
        return Outcome::Unchanged;
    };
    let mut cleaned = if original.contains('@') {
        original.clone()
    } else {
        fix_punctuation_spacing(original)
    };
    cleaned = LINE_BREAK_RE.replace_all(&cleaned, " ").into_owned();
    cleaned = MULTI_SPACE_RE.replace_all(&cleaned, " ").into_owned();
    let cleaned = cleaned.trim().to_string();
    if cleaned == *original {
        Outcome::Unchanged
    } else {
        Outcome::Normalized(CellValue::Text(cleaned))
    }
}

/// Drop whitespace before punctuation and ensure one space after it,
/// unless the next character is whitespace, more punctuation, or end
/// of string.
fn fix_punctuation_spacing(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            let mut j = i;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            if j < chars.len() && PUNCTUATION.contains(&chars[j]) {
                // The whole run belongs to the punctuation that follows.
                i = j;
                continue;
            }
            out.push(c);
            i += 1;
            continue;
        }
        out.push(c);
        if PUNCTUATION.contains(&c)
            && let Some(&next) = chars.get(i + 1)
            && !next.is_whitespace()
            && !PUNCTUATION.contains(&next)
        {
            out.push(' ');
        }
        i += 1;
    }
    out
}
