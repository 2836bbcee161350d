//! Text heuristics — pure string functions shared by the rule engine and the
//! pipeline. All analysis here is deliberately shallow (substring, token, and
//! small regex checks); that is a design constraint, not a gap.

pub mod similarity;

use regex::Regex;

/// Strips semicolons, colons, and every dash variant, then collapses
/// whitespace. Idempotent: sanitizing twice equals sanitizing once.
pub fn sanitize_punctuation(text: &str) -> String {
    let stripped: String = text
        .chars()
        .filter(|c| !matches!(c, ';' | ':' | '-' | '\u{2013}' | '\u{2014}'))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Counts non-empty segments produced by splitting on runs of `.`, `!`, `?`.
pub fn count_sentences(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|segment| !segment.trim().is_empty())
        .count()
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Appends a period if the text does not already end in terminal punctuation.
pub fn ensure_terminal_punctuation(text: &str) -> String {
    let t = text.trim();
    if t.is_empty() {
        return String::new();
    }
    if t.ends_with(['.', '!', '?']) {
        t.to_string()
    } else {
        format!("{t}.")
    }
}

/// Reassembles up to `max` sentences. Every kept sentence ends in terminal
/// punctuation; a trailing fragment without punctuation gets a period.
pub fn trim_to_sentences(text: &str, max: usize) -> String {
    let raw = text.trim();
    if raw.is_empty() || max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut kept = 0;
    let mut current = String::new();
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            // Collapse a punctuation run ("!!", "...") down to its first mark.
            while let Some(&next) = chars.peek() {
                if matches!(next, '.' | '!' | '?') {
                    chars.next();
                } else {
                    break;
                }
            }
            let chunk = current.trim();
            if !chunk.is_empty() {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(chunk);
                out.push(c);
                kept += 1;
                if kept >= max {
                    return out;
                }
            }
            current.clear();
        } else {
            current.push(c);
        }
    }

    let chunk = current.trim();
    if !chunk.is_empty() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(chunk);
        out.push('.');
    }
    out
}

/// Truncates to `max_words` words, re-terminating the result if truncated.
pub fn trim_to_max_words(text: &str, max_words: usize) -> String {
    let t = text.trim();
    let words: Vec<&str> = t.split_whitespace().collect();
    if words.len() <= max_words {
        return t.to_string();
    }
    ensure_terminal_punctuation(&words[..max_words].join(" "))
}

/// Case-insensitive prefix check, tolerant of a following space, comma, or
/// apostrophe (ASCII or Unicode).
pub fn starts_with_employee_name(text: &str, name: &str) -> bool {
    let t = text.trim().to_lowercase();
    let n = name.trim().to_lowercase();
    if t.is_empty() || n.is_empty() {
        return false;
    }
    [" ", ",", "'", "\u{2019}"]
        .iter()
        .any(|sep| t.starts_with(&format!("{n}{sep}")))
}

/// Case-insensitive suffix check after stripping terminal punctuation.
pub fn ends_with_employee_name(text: &str, name: &str) -> bool {
    let t = text.trim().to_lowercase();
    let n = name.trim().to_lowercase();
    if t.is_empty() || n.is_empty() {
        return false;
    }
    let cleaned = t.trim_end_matches(['.', '!', '?']).trim_end();
    cleaned.ends_with(&n)
}

/// Narrative openers that invite over-specific, hard-to-edit prose.
const STORY_OPENERS: &[&str] = &[
    "after ",
    "after a ",
    "after an ",
    "after the ",
    "last week",
    "yesterday",
    "this weekend",
    "when i",
    "when we",
    "on my way",
];

pub fn starts_with_story_opener(text: &str) -> bool {
    let t = text.trim().to_lowercase();
    STORY_OPENERS.iter().any(|opener| t.starts_with(opener))
}

/// Locative/channel prepositions that signal the generator treated the
/// employee name as a place ("through Cambria", "at Maria").
fn name_context_pattern(name: &str) -> Regex {
    Regex::new(&format!(
        r"(?i)\b(?:through|thru|via|in|at|from|out of)\s+{}\b",
        regex::escape(name.trim())
    ))
    .expect("name context pattern is valid")
}

pub fn has_bad_name_context(text: &str, name: &str) -> bool {
    if text.trim().is_empty() || name.trim().is_empty() {
        return false;
    }
    name_context_pattern(name).is_match(text)
}

/// Repairs bad name context by rewriting the preposition to "with {name}".
pub fn fix_bad_name_context(text: &str, name: &str) -> String {
    let name = name.trim();
    if text.trim().is_empty() || name.is_empty() {
        return text.to_string();
    }
    name_context_pattern(name)
        .replace_all(text, regex::NoExpand(&format!("with {name}")))
        .into_owned()
}

/// Final tokens that mark a truncated, ungrammatical sentence.
const FRAGMENT_ENDINGS: &[&str] = &[
    "she", "he", "they", "really", "so", "and", "but", "because", "who", "that", "how", "i",
    "we", "my", "the", "a", "an", "to", "with", "for", "of", "in", "at", "from",
];

/// True if the text trails off: dangling quote/comma, a stopword or
/// single-character final token, or nothing at all.
pub fn ends_like_fragment(text: &str) -> bool {
    let t = text.trim();
    if t.is_empty() {
        return true;
    }
    if t.ends_with(',') || t.ends_with('"') || t.ends_with('\'') {
        return true;
    }

    let cleaned = t.trim_end_matches(['.', '!', '?']).trim().to_lowercase();
    let last = cleaned.split_whitespace().last().unwrap_or("");
    if last.chars().count() <= 1 {
        return true;
    }
    FRAGMENT_ENDINGS.contains(&last)
}

/// Removes a leading list marker ("1)", "2.", "3 -") from a batch line.
pub fn strip_list_marker(text: &str) -> String {
    let marker = Regex::new(r"^\s*\d+\s*[.)\-]\s*").expect("list marker pattern is valid");
    marker.replace(text.trim(), "").trim().to_string()
}

/// Lowercases, folds Unicode apostrophes to ASCII, replaces all punctuation
/// except apostrophes with spaces, and collapses whitespace.
pub fn normalize_for_comparison(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .chars()
        .map(|c| match c {
            '\u{2019}' => '\'',
            c if c.is_ascii_alphanumeric() || c == '\'' => c,
            _ => ' ',
        })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Counts case-insensitive, non-overlapping occurrences of the name.
pub fn count_name_occurrences(text: &str, name: &str) -> usize {
    let t = text.to_lowercase();
    let n = name.trim().to_lowercase();
    if n.is_empty() {
        return 0;
    }
    t.match_indices(&n).count()
}
