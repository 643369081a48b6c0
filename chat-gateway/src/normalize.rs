//! Output normalization: an ordered sequence of pure text transforms.
//!
//! Generated text is cleaned in fixed steps, each a standalone `&str ->
//! String` function with no I/O and no knowledge of any UI:
//!
//! 1. [`strip_control_chars`] — drop zero-width and control characters
//! 2. [`collapse_spaces`]     — squeeze runs of horizontal whitespace
//! 3. [`normalize_bullets`]   — unify list markers into `• `, one per line
//! 4. [`collapse_blank_lines`] — cap consecutive blank lines at one
//! 5. [`strip_empty_sections`] — drop attribution sections with no value
//!
//! [`normalize_answer`] composes them in that order.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::PLACEHOLDER_VALUES;

static HORIZONTAL_WS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());
static TRAILING_WS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m) +$").unwrap());
static LEADING_WS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^ +").unwrap());
static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(?:[-*]|\d+\.)\s+").unwrap());
static INLINE_BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([^\n]) ?•").unwrap());
static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());
static EMPTY_MANUFACTURER: LazyLock<Regex> = LazyLock::new(|| {
    // The placeholder alternation stays in sync with the assembler's
    // exclusion list by construction.
    let placeholders = PLACEHOLDER_VALUES.join("|");
    Regex::new(&format!(
        r"(?im)^(?:• )?MANUFACTURER:\n• ?(?:{placeholders})? *$\n?"
    ))
    .unwrap()
});

const ZERO_WIDTH: [char; 4] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'];

/// Remove zero-width characters and control characters other than newline
/// and tab (tabs are folded into spaces by the next step).
pub fn strip_control_chars(s: &str) -> String {
    s.chars()
        .filter(|c| *c == '\n' || *c == '\t' || (!c.is_control() && !ZERO_WIDTH.contains(c)))
        .collect()
}

/// Squeeze runs of spaces/tabs into one space and trim line edges.
/// Newlines are preserved; vertical structure is handled separately.
pub fn collapse_spaces(s: &str) -> String {
    let squeezed = HORIZONTAL_WS.replace_all(s, " ");
    let no_trailing = TRAILING_WS.replace_all(&squeezed, "");
    LEADING_WS.replace_all(&no_trailing, "").into_owned()
}

/// Convert `-`/`*`/`1.` list markers into the single `• ` convention and
/// force every bullet onto its own line.
pub fn normalize_bullets(s: &str) -> String {
    let unified = LIST_MARKER.replace_all(s, "• ");
    INLINE_BULLET.replace_all(&unified, "$1\n•").into_owned()
}

/// Cap runs of newlines at two (one blank line).
pub fn collapse_blank_lines(s: &str) -> String {
    BLANK_RUN.replace_all(s, "\n\n").into_owned()
}

/// Remove a `MANUFACTURER:` section whose only bullet is empty or a
/// placeholder value. Sections with real values are left untouched.
pub fn strip_empty_sections(s: &str) -> String {
    EMPTY_MANUFACTURER.replace_all(s, "").into_owned()
}

/// Full normalization pipeline in the documented order, with one final
/// blank-line pass to absorb the hole a removed section leaves behind.
pub fn normalize_answer(s: &str) -> String {
    let s = strip_control_chars(s);
    let s = collapse_spaces(&s);
    let s = normalize_bullets(&s);
    let s = collapse_blank_lines(&s);
    let s = strip_empty_sections(&s);
    collapse_blank_lines(&s).trim().to_string()
}
