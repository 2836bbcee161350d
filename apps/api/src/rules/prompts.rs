//! Prompt builders — render each category's rule record back into
//! natural-language instructions for the generator. A freshly sampled style
//! hint is folded in per attempt so consecutive retries don't converge on the
//! same rejected phrasing.

use crate::rules::{CategoryRules, NamePresence};

/// Style/angle hints sampled per prompt to induce lexical variety.
pub const STYLE_HINTS: &[&str] = &[
    "Make it sound like a real Google review starter that is easy for a customer to edit.",
    "Keep it genuine but general so the customer can personalize it.",
    "Sound normal and not robotic, leaving room for the customer to add details.",
    "Stay positive and a little vague, like a template someone could tweak.",
    "Focus on how easy the visit felt without inventing specifics.",
    "Mention the helpful attitude without sounding like an ad.",
];

pub fn pick_style(rng: &mut fastrand::Rng) -> &'static str {
    STYLE_HINTS[rng.usize(..STYLE_HINTS.len())]
}

/// Builds the single-draft prompt used by the retry strategy.
pub fn build_single_prompt(
    rules: &CategoryRules,
    employee: &str,
    notes: &str,
    suppress_name: bool,
    sentence_target: usize,
    style: &str,
) -> String {
    let mut prompt = format!(
        "Write a Google review draft for {}.\n\nHard rules:\n",
        rules.prompt_topic
    );

    if sentence_target >= 2 {
        prompt.push_str("- One or two sentences only.\n");
    } else {
        prompt.push_str("- Exactly ONE sentence.\n");
    }
    prompt.push_str("- Do NOT start with a story opener.\n");
    push_shared_rules(&mut prompt, rules, employee, suppress_name);
    prompt.push_str("- Keep it short and general like a template so the customer can edit.\n");
    prompt.push_str("- Do NOT use semicolons, colons, or any dashes.\n");
    prompt.push_str("- Make it a complete sentence that ends cleanly.\n");

    push_notes_and_style(&mut prompt, notes, style);
    prompt.push_str("\nReturn ONLY the review text.");
    prompt
}

/// Builds the multi-line prompt used by the batch strategy.
pub fn build_batch_prompt(
    rules: &CategoryRules,
    employee: &str,
    notes: &str,
    suppress_name: bool,
    line_count: u32,
    style: &str,
) -> String {
    let mut prompt = format!(
        "Write {line_count} VERY DIFFERENT one-sentence Google review drafts for {}.\n\nHard rules:\n",
        rules.prompt_topic
    );

    prompt.push_str("- Each line is ONE complete sentence only.\n");
    prompt.push_str(&format!(
        "- Keep each sentence {} to {} words.\n",
        rules.min_words, rules.max_words
    ));
    push_shared_rules(&mut prompt, rules, employee, suppress_name);
    prompt.push_str(
        "- Avoid overly salesy words like amazing, fantastic, incredible, top notch.\n",
    );
    prompt.push_str("- Do NOT use semicolons, colons, or any dashes.\n");

    push_notes_and_style(&mut prompt, notes, style);
    prompt.push_str(&format!(
        "\nReturn ONLY the {line_count} sentences, each on a new line."
    ));
    prompt
}

/// Rule lines shared by both prompt shapes: topic tokens, name placement,
/// person-not-place guard, banned phrases, per-category extras.
fn push_shared_rules(
    prompt: &mut String,
    rules: &CategoryRules,
    employee: &str,
    suppress_name: bool,
) {
    match rules.required_topic_tokens {
        [] => {}
        [token] => prompt.push_str(&format!(
            "- Include the word \"{token}\" in every sentence.\n"
        )),
        tokens => prompt.push_str(&format!(
            "- Include at least ONE of these words in every sentence: {}.\n",
            tokens.join(", ")
        )),
    }

    if suppress_name {
        prompt.push_str("- Do NOT include any employee name.\n");
    } else {
        match rules.name_presence {
            NamePresence::ExactlyOnce => prompt.push_str(&format!(
                "- Mention \"{employee}\" exactly once in each sentence.\n"
            )),
            NamePresence::AtLeastOnce => prompt.push_str(&format!(
                "- Mention \"{employee}\" exactly once.\n"
            )),
            NamePresence::Optional => prompt.push_str(&format!(
                "- If natural, mention \"{employee}\" once.\n"
            )),
        }
        if rules.forbid_name_start && rules.forbid_name_end {
            prompt.push_str(&format!("- Do NOT start or end with \"{employee}\".\n"));
        } else if rules.forbid_name_start {
            prompt.push_str(&format!("- Do NOT start with \"{employee}\".\n"));
        }
        prompt.push_str(&format!(
            "- Treat \"{employee}\" as a PERSON (not a place): do NOT say \"through {employee}\" or \"in {employee}\" or \"at {employee}\".\n"
        ));
    }

    if !rules.banned_phrases.is_empty() {
        prompt.push_str(&format!(
            "- Do NOT use any of these phrases: {}.\n",
            rules.banned_phrases.join(", ")
        ));
    }
    for rule in rules.extra_prompt_rules {
        prompt.push_str(&format!("- {rule}\n"));
    }
}

fn push_notes_and_style(prompt: &mut String, notes: &str, style: &str) {
    let notes = notes.trim();
    prompt.push_str("\nOptional notes (tone only):\n");
    if notes.is_empty() {
        prompt.push_str("(none)\n");
    } else {
        prompt.push_str(notes);
        prompt.push('\n');
    }
    prompt.push_str(&format!("\nInstruction:\n{style}\n"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::rules::catalog::rules_for;

    #[test]
    fn test_single_prompt_names_the_employee_and_topic() {
        let rules = rules_for(Category::Solar);
        let prompt = build_single_prompt(rules, "Tom", "", false, 1, STYLE_HINTS[0]);
        assert!(prompt.contains("Exactly ONE sentence."));
        assert!(prompt.contains("\"Tom\""));
        assert!(prompt.contains("solar"));
        assert!(prompt.contains("PERSON (not a place)"));
        assert!(prompt.contains("Return ONLY the review text."));
    }

    #[test]
    fn test_single_prompt_two_sentence_target() {
        let rules = rules_for(Category::AutoDetailing);
        let prompt = build_single_prompt(rules, "Will", "", false, 2, STYLE_HINTS[1]);
        assert!(prompt.contains("One or two sentences only."));
    }

    #[test]
    fn test_single_prompt_lists_banned_phrases() {
        let rules = rules_for(Category::Solar);
        let prompt = build_single_prompt(rules, "Tom", "", false, 1, STYLE_HINTS[0]);
        assert!(prompt.contains("walked me through"));
        assert!(prompt.contains("consultation"));
    }

    #[test]
    fn test_suppress_name_prompt_omits_employee() {
        let rules = rules_for(Category::Massage);
        let prompt = build_batch_prompt(rules, "Lena", "", true, 12, STYLE_HINTS[2]);
        assert!(prompt.contains("Do NOT include any employee name."));
        assert!(!prompt.contains("Lena"));
    }

    #[test]
    fn test_batch_prompt_requests_line_count_and_bounds() {
        let rules = rules_for(Category::Nails);
        let prompt = build_batch_prompt(rules, "Maria", "", false, 12, STYLE_HINTS[0]);
        assert!(prompt.contains("Write 12 VERY DIFFERENT one-sentence"));
        assert!(prompt.contains("Keep each sentence 7 to 16 words."));
        assert!(prompt.contains("Do NOT start or end with \"Maria\"."));
        assert!(prompt.contains("Return ONLY the 12 sentences, each on a new line."));
    }

    #[test]
    fn test_insurance_prompt_lists_any_of_tokens() {
        let rules = rules_for(Category::Insurance);
        let prompt = build_batch_prompt(rules, "Raj", "", false, 12, STYLE_HINTS[0]);
        assert!(prompt.contains("Include at least ONE of these words"));
        assert!(prompt.contains("coverage"));
    }

    #[test]
    fn test_notes_are_rendered_or_none() {
        let rules = rules_for(Category::Nails);
        let with_notes =
            build_batch_prompt(rules, "Maria", "gel refill, quick visit", false, 12, STYLE_HINTS[0]);
        assert!(with_notes.contains("gel refill, quick visit"));
        let without = build_batch_prompt(rules, "Maria", "  ", false, 12, STYLE_HINTS[0]);
        assert!(without.contains("(none)"));
    }

    #[test]
    fn test_pick_style_is_deterministic_with_seed() {
        let mut a = fastrand::Rng::with_seed(7);
        let mut b = fastrand::Rng::with_seed(7);
        assert_eq!(pick_style(&mut a), pick_style(&mut b));
    }

    #[test]
    fn test_pick_style_varies_across_draws() {
        let mut rng = fastrand::Rng::with_seed(1);
        let draws: Vec<&str> = (0..32).map(|_| pick_style(&mut rng)).collect();
        let first = draws[0];
        assert!(draws.iter().any(|s| *s != first));
    }
}
