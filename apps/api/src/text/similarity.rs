//! Word-trigram Jaccard similarity — rejects near-duplicate candidates
//! within a single batch. Nothing here persists across requests.

use std::collections::HashSet;

use crate::text::normalize_for_comparison;

/// Builds the word-trigram set of a string. Strings shorter than three words
/// degrade to their word set so short candidates still compare meaningfully.
pub fn trigram_set(text: &str) -> HashSet<String> {
    let normalized = normalize_for_comparison(text);
    let words: Vec<&str> = normalized.split_whitespace().collect();

    if words.len() < 3 {
        return words.iter().map(|w| w.to_string()).collect();
    }

    words
        .windows(3)
        .map(|window| window.join(" "))
        .collect()
}

/// Jaccard index of two sets. Two empty sets are defined as identical (1.0).
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

pub fn similarity(a: &str, b: &str) -> f64 {
    jaccard(&trigram_set(a), &trigram_set(b))
}

/// True if the candidate exactly matches an accepted member after
/// normalization, or its trigram similarity to any member meets the threshold.
pub fn is_near_duplicate(candidate: &str, accepted: &[String], threshold: f64) -> bool {
    let normalized = normalize_for_comparison(candidate);
    for member in accepted {
        if normalize_for_comparison(member) == normalized {
            return true;
        }
        if similarity(candidate, member) >= threshold {
            return true;
        }
    }
    false
}
