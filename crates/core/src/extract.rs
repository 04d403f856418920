//! Pattern-based field extraction from free-form model output.
//!
//! The model is asked to follow a template but nothing enforces it: fields can
//! be reordered, wrapped in markdown, or missing entirely. Every function here
//! is total. Absence of a match is an expected outcome that maps to a fallback
//! or `None`, never an error.

use regex_lite::Regex;

/// Case-insensitive pattern for a label, anchored on word boundaries when the
/// label starts/ends with a word character.
fn label_pattern(label: &str) -> String {
    let label = label.trim();
    let lead = if label.starts_with(|c: char| c.is_ascii_alphanumeric()) {
        r"\b"
    } else {
        ""
    };
    let trail = if label.ends_with(|c: char| c.is_ascii_alphanumeric()) {
        r"\b"
    } else {
        ""
    };
    format!("(?i){}{}{}", lead, regex_lite::escape(label), trail)
}

/// Extract the number that follows `label`.
///
/// Accepts `:`, `=`, whitespace and markdown emphasis between label and value,
/// plus an optional parenthesised unit (`PM2.5 (μg/m³): 12`). Returns
/// `fallback` when the label is missing or never followed by a number.
pub fn extract_number(text: &str, label: &str, fallback: f64) -> f64 {
    find_number(text, label).unwrap_or(fallback)
}

/// Like [`extract_number`], for fields that have no sensible default.
pub fn find_number(text: &str, label: &str) -> Option<f64> {
    if label.trim().is_empty() {
        return None;
    }

    let pattern = format!(
        r"{}[\s:=*_]*(?:\([^)\n]*\)[\s:=*_]*)?([-+]?(?:\d+(?:\.\d*)?|\.\d+))",
        label_pattern(label)
    );

    Regex::new(&pattern)
        .ok()
        .and_then(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Extract the remainder of the line after `label:`.
///
/// The value stops at a newline or a `|` field separator and is trimmed of
/// whitespace and markdown emphasis. Occurrences with an empty value are
/// skipped; `None` when no occurrence carries one.
pub fn extract_line(text: &str, label: &str) -> Option<String> {
    if label.trim().is_empty() {
        return None;
    }

    let pattern = format!(r"{}[*_]*[ \t]*:[ \t*_]*([^\n|]*)", label_pattern(label));
    let re = Regex::new(&pattern).ok()?;

    let found = re
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| clean_value(m.as_str()))
        .find(|value| !value.is_empty());
    found
}

fn clean_value(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(['*', '_'])
        .trim()
        .to_string()
}

/// Split `text` into one slice per provider name.
///
/// The result is aligned with `provider_names`. Each present name's slice runs
/// from its first (case-insensitive) occurrence to the next first occurrence
/// of any other present name, or to the end of the text. Names that never
/// appear get an empty slice and do not act as boundaries.
pub fn segment_by_provider<'t, S: AsRef<str>>(
    text: &'t str,
    provider_names: &[S],
) -> Vec<&'t str> {
    let starts: Vec<Option<usize>> = provider_names
        .iter()
        .map(|name| find_case_insensitive(text, name.as_ref()))
        .collect();

    let mut boundaries: Vec<usize> = starts.iter().flatten().copied().collect();
    boundaries.sort_unstable();
    boundaries.dedup();

    starts
        .iter()
        .map(|start| match start {
            Some(start) => {
                let end = boundaries
                    .iter()
                    .copied()
                    .find(|b| b > start)
                    .unwrap_or(text.len());
                &text[*start..end]
            }
            None => "",
        })
        .collect()
}

fn find_case_insensitive(text: &str, needle: &str) -> Option<usize> {
    let needle = needle.trim();
    if needle.is_empty() {
        return None;
    }
    Regex::new(&format!("(?i){}", regex_lite::escape(needle)))
        .ok()?
        .find(text)
        .map(|m| m.start())
}

/// Collect up to `max_items` bulleted lines (`* item` / `-item`) in order.
///
/// Leading marker runs are stripped. Lines that are only markers (`---`) or
/// entirely bold (`**Heading**`) are not bullets.
pub fn extract_bullet_list(text: &str, max_items: usize) -> Vec<String> {
    text.lines()
        .filter_map(bullet_item)
        .take(max_items)
        .collect()
}

fn bullet_item(line: &str) -> Option<String> {
    let line = line.trim();
    if !line.starts_with(['*', '-']) || is_bold_line(line) {
        return None;
    }
    let item = line
        .trim_start_matches(|c: char| c == '*' || c == '-' || c.is_whitespace())
        .trim_end();
    if item.is_empty() {
        None
    } else {
        Some(item.to_string())
    }
}

fn is_bold_line(line: &str) -> bool {
    line.len() > 4 && line.starts_with("**") && line.ends_with("**")
}
