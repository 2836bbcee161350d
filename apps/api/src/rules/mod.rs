//! Category rule engine — per-category acceptance predicate and candidate
//! scoring. Each category is a static data record (see `catalog`), not a code
//! branch; the predicate below is the single shared shape.

pub mod catalog;
pub mod prompts;

use crate::category::Category;
use crate::text::{
    count_name_occurrences, count_sentences, count_words, ends_like_fragment,
    ends_with_employee_name, has_bad_name_context, normalize_for_comparison,
    starts_with_employee_name, starts_with_story_opener,
};

/// Whether the employee name must appear in an accepted candidate.
/// Early and late rule-set versions disagreed on exactly-once vs at-least-once
/// for some categories, so this is per-category configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePresence {
    ExactlyOnce,
    AtLeastOnce,
    Optional,
}

/// Generation strategy for a category. Loop bounds are hard caps, never
/// unbounded; combined with the provider timeout this bounds request latency.
#[derive(Debug, Clone, Copy)]
pub enum Strategy {
    Retry { max_attempts: u32 },
    Batch { request_count: u32 },
}

/// Static rule record for one business category. Read-only after startup.
/// Banned-phrase lists encode discovered generator failure modes and are
/// append-only tuning knobs.
pub struct CategoryRules {
    pub category: Category,
    /// Topic phrase rendered into prompts ("getting nails done", "a massage").
    pub prompt_topic: &'static str,
    pub banned_phrases: &'static [&'static str],
    /// Any-of requirement; empty slice means no topic requirement.
    pub required_topic_tokens: &'static [&'static str],
    pub min_words: usize,
    pub max_words: usize,
    pub sentence_count_max: usize,
    /// Probability of targeting two sentences instead of one (detailing only).
    pub two_sentence_chance: f32,
    /// Post-process word clamps by sentence target.
    pub word_clamp_one: usize,
    pub word_clamp_two: usize,
    pub name_presence: NamePresence,
    pub forbid_name_start: bool,
    pub forbid_name_end: bool,
    /// Sentence openers rejected outright ("the massage was").
    pub forbidden_openers: &'static [&'static str],
    /// Soft cliché list used for scoring, not rejection.
    pub cliche_phrases: &'static [&'static str],
    /// Extra score added when the candidate starts with a phrase.
    pub penalized_openers: &'static [(&'static str, f32)],
    pub soft_word_target: usize,
    pub length_penalty: f32,
    pub strategy: Strategy,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Fallback templates; `{employee}` is interpolated.
    pub fallback_named: &'static [&'static str],
    pub fallback_no_name: &'static [&'static str],
    /// Extra natural-language rule lines appended to prompts.
    pub extra_prompt_rules: &'static [&'static str],
}

impl CategoryRules {
    pub fn word_clamp(&self, sentence_target: usize) -> usize {
        if sentence_target >= 2 {
            self.word_clamp_two
        } else {
            self.word_clamp_one
        }
    }
}

/// Why a candidate was rejected. This is expected control flow driving the
/// next loop iteration or the fallback, not an error; it exists so rejection
/// decisions show up in debug logs and in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    TooManySentences,
    StartsWithName,
    EndsWithName,
    StoryOpener,
    BadNameContext,
    TooFewWords,
    TooManyWords,
    BannedPhrase(&'static str),
    MissingTopicToken,
    SuppressedNamePresent,
    NameMissing,
    NameNotExactlyOnce,
    MissingTerminalPunctuation,
    FragmentEnding,
    ForbiddenOpener,
}

/// The shared acceptance predicate, parameterized entirely by the rule record.
pub fn check(
    rules: &CategoryRules,
    text: &str,
    employee: &str,
    suppress_name: bool,
) -> Result<(), Rejection> {
    let t = text.trim();
    if t.is_empty() {
        return Err(Rejection::Empty);
    }

    if count_sentences(t) > rules.sentence_count_max {
        return Err(Rejection::TooManySentences);
    }

    if rules.forbid_name_start && starts_with_employee_name(t, employee) {
        return Err(Rejection::StartsWithName);
    }
    if rules.forbid_name_end && ends_with_employee_name(t, employee) {
        return Err(Rejection::EndsWithName);
    }

    if starts_with_story_opener(t) {
        return Err(Rejection::StoryOpener);
    }
    if has_bad_name_context(t, employee) {
        return Err(Rejection::BadNameContext);
    }

    let word_count = count_words(t);
    if word_count < rules.min_words {
        return Err(Rejection::TooFewWords);
    }
    if word_count > rules.max_words {
        return Err(Rejection::TooManyWords);
    }

    let low = t.to_lowercase();
    if let Some(&phrase) = rules.banned_phrases.iter().find(|p| low.contains(**p)) {
        return Err(Rejection::BannedPhrase(phrase));
    }

    if !rules.required_topic_tokens.is_empty()
        && !rules.required_topic_tokens.iter().any(|token| low.contains(token))
    {
        return Err(Rejection::MissingTopicToken);
    }

    let occurrences = count_name_occurrences(t, employee);
    if suppress_name {
        if occurrences > 0 {
            return Err(Rejection::SuppressedNamePresent);
        }
    } else {
        match rules.name_presence {
            NamePresence::ExactlyOnce if occurrences == 0 => return Err(Rejection::NameMissing),
            NamePresence::ExactlyOnce if occurrences > 1 => {
                return Err(Rejection::NameNotExactlyOnce)
            }
            NamePresence::AtLeastOnce if occurrences == 0 => return Err(Rejection::NameMissing),
            _ => {}
        }
    }

    if !t.ends_with(['.', '!', '?']) {
        return Err(Rejection::MissingTerminalPunctuation);
    }
    if ends_like_fragment(t) {
        return Err(Rejection::FragmentEnding);
    }

    if rules
        .forbidden_openers
        .iter()
        .any(|opener| low.starts_with(opener))
    {
        return Err(Rejection::ForbiddenOpener);
    }

    Ok(())
}

pub fn is_acceptable(rules: &CategoryRules, text: &str, employee: &str, suppress_name: bool) -> bool {
    check(rules, text, employee, suppress_name).is_ok()
}

/// Ranks an already-valid candidate; lower is better. Weighted cliché hits
/// plus a penalty proportional to word count over the soft target, biasing
/// selection toward shorter, less marketing-flavored output.
pub fn score(rules: &CategoryRules, text: &str) -> f32 {
    let low = normalize_for_comparison(text);
    let mut total = 0.0_f32;

    for phrase in rules.cliche_phrases {
        if low.contains(phrase) {
            total += 3.0;
        }
    }
    for (opener, penalty) in rules.penalized_openers {
        if low.starts_with(opener) {
            total += penalty;
        }
    }

    let over_target = count_words(text).saturating_sub(rules.soft_word_target);
    total += over_target as f32 * rules.length_penalty;

    total
}
