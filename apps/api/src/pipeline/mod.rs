//! Draft pipeline — orchestrates generate → post-process → validate →
//! dedupe → rerank → fallback for a single request. Every path out of this
//! module returns a usable review string; provider failures degrade to the
//! category's fallback pool instead of surfacing an error.

pub mod handlers;

use tracing::{debug, warn};

use crate::category::Category;
use crate::llm_client::Completer;
use crate::rules::catalog::rules_for;
use crate::rules::prompts::{build_batch_prompt, build_single_prompt, pick_style};
use crate::rules::{check, score, CategoryRules, Strategy};
use crate::text::similarity::is_near_duplicate;
use crate::text::{
    ensure_terminal_punctuation, fix_bad_name_context, sanitize_punctuation, strip_list_marker,
    trim_to_max_words, trim_to_sentences,
};

/// Trigram-Jaccard threshold above which two batch candidates are considered
/// the same review. The single dedupe tuning knob.
pub const SIM_THRESHOLD: f64 = 0.34;
/// Final selection samples uniformly from the best-scored candidates rather
/// than always returning rank one, so repeated identical requests vary.
const TOP_CANDIDATE_POOL: usize = 3;

/// A fully resolved draft request, produced by the handler layer.
#[derive(Debug, Clone)]
pub struct DraftRequest {
    pub employee: String,
    pub category: Category,
    pub notes: String,
    pub suppress_name: bool,
}

pub async fn generate_review(provider: &dyn Completer, request: &DraftRequest) -> String {
    let mut rng = fastrand::Rng::new();
    generate_review_with_rng(provider, request, &mut rng).await
}

/// Deterministic entry point; the RNG drives sentence-target sampling, style
/// hint choice, and final candidate selection.
pub async fn generate_review_with_rng(
    provider: &dyn Completer,
    request: &DraftRequest,
    rng: &mut fastrand::Rng,
) -> String {
    let rules = rules_for(request.category);
    let sentence_target = if rng.f32() < rules.two_sentence_chance {
        2
    } else {
        1
    };

    match rules.strategy {
        Strategy::Retry { max_attempts } => {
            run_retry(provider, rules, request, sentence_target, max_attempts, rng).await
        }
        Strategy::Batch { request_count } => {
            run_batch(provider, rules, request, sentence_target, request_count, rng).await
        }
    }
}

/// One candidate per provider call, up to `max_attempts` calls. A fresh style
/// hint is sampled per attempt so retries don't replay the rejected phrasing.
async fn run_retry(
    provider: &dyn Completer,
    rules: &CategoryRules,
    request: &DraftRequest,
    sentence_target: usize,
    max_attempts: u32,
    rng: &mut fastrand::Rng,
) -> String {
    for attempt in 1..=max_attempts {
        let style = pick_style(rng);
        let prompt = build_single_prompt(
            rules,
            &request.employee,
            &request.notes,
            request.suppress_name,
            sentence_target,
            style,
        );

        let raw = match provider
            .complete(&prompt, rules.temperature, rules.max_tokens)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                warn!("generation attempt {attempt} failed: {e}");
                continue;
            }
        };

        let candidate = postprocess(&raw, &request.employee, sentence_target, rules);
        match check(rules, &candidate, &request.employee, request.suppress_name) {
            Ok(()) => return candidate,
            Err(rejection) => {
                debug!("attempt {attempt} rejected ({rejection:?}): {candidate}");
            }
        }
    }

    fallback(rules, request, sentence_target, rng)
}

/// One provider call returning many lines; validate, dedupe, rerank, then
/// sample from the top of the ranking.
async fn run_batch(
    provider: &dyn Completer,
    rules: &CategoryRules,
    request: &DraftRequest,
    sentence_target: usize,
    request_count: u32,
    rng: &mut fastrand::Rng,
) -> String {
    let style = pick_style(rng);
    let prompt = build_batch_prompt(
        rules,
        &request.employee,
        &request.notes,
        request.suppress_name,
        request_count,
        style,
    );

    let raw = match provider
        .complete(&prompt, rules.temperature, rules.max_tokens)
        .await
    {
        Ok(text) => text,
        Err(e) => {
            warn!("batch generation failed: {e}");
            return fallback(rules, request, sentence_target, rng);
        }
    };

    let mut accepted = select_candidates(rules, request, sentence_target, &raw);
    if accepted.is_empty() {
        return fallback(rules, request, sentence_target, rng);
    }

    // Stable sort keeps arrival order among score ties.
    accepted.sort_by(|a, b| {
        score(rules, a)
            .partial_cmp(&score(rules, b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let pool = accepted.len().min(TOP_CANDIDATE_POOL);
    accepted.swap_remove(rng.usize(..pool))
}

/// Filters the raw batch text down to validated, deduplicated candidates.
/// Split out from `run_batch` so the whole filter chain is testable without a
/// provider.
fn select_candidates(
    rules: &CategoryRules,
    request: &DraftRequest,
    sentence_target: usize,
    raw: &str,
) -> Vec<String> {
    let mut accepted: Vec<String> = Vec::new();

    for line in raw.lines() {
        let line = strip_list_marker(line);
        if line.trim().is_empty() {
            continue;
        }
        let candidate = postprocess(&line, &request.employee, sentence_target, rules);
        match check(rules, &candidate, &request.employee, request.suppress_name) {
            Ok(()) => {
                if is_near_duplicate(&candidate, &accepted, SIM_THRESHOLD) {
                    debug!("dropping near-duplicate candidate: {candidate}");
                } else {
                    accepted.push(candidate);
                }
            }
            Err(rejection) => {
                debug!("batch line rejected ({rejection:?}): {candidate}");
            }
        }
    }

    accepted
}

/// Normalizes raw generator output into validation shape. Fallback templates
/// go through the same chain, so nothing reaches the response unprocessed.
fn postprocess(raw: &str, employee: &str, sentence_target: usize, rules: &CategoryRules) -> String {
    let text = sanitize_punctuation(raw);
    let text = fix_bad_name_context(&text, employee);
    let text = trim_to_sentences(&text, sentence_target);
    let text = ensure_terminal_punctuation(&text);
    trim_to_max_words(&text, rules.word_clamp(sentence_target))
}

/// Last resort when every generated candidate was rejected or the provider
/// was unreachable. Picks a random template from the category pool.
fn fallback(
    rules: &CategoryRules,
    request: &DraftRequest,
    sentence_target: usize,
    rng: &mut fastrand::Rng,
) -> String {
    let pool = if request.suppress_name {
        rules.fallback_no_name
    } else {
        rules.fallback_named
    };
    let template = pool[rng.usize(..pool.len())];
    let filled = template.replace("{employee}", request.employee.trim());
    warn!(
        "falling back to template for category {:?}",
        rules.category
    );
    postprocess(&filled, &request.employee, sentence_target, rules)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::LlmError;

    /// Provider fake that replays scripted responses in order. Once the
    /// script runs out, every further call times out.
    struct ScriptedCompleter {
        responses: Mutex<VecDeque<Result<String, LlmError>>>,
    }

    impl ScriptedCompleter {
        fn new(responses: Vec<Result<String, LlmError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }
    }

    #[async_trait]
    impl Completer for ScriptedCompleter {
        async fn complete(
            &self,
            _prompt: &str,
            _temperature: f32,
            _max_tokens: u32,
        ) -> Result<String, LlmError> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(LlmError::Timeout))
        }
    }

    fn request(employee: &str, category: Category, suppress_name: bool) -> DraftRequest {
        DraftRequest {
            employee: employee.to_string(),
            category,
            notes: String::new(),
            suppress_name,
        }
    }

    #[tokio::test]
    async fn test_batch_returns_a_validated_line() {
        let batch = "\
1. So glad Maria suggested the almond shape for my nails.\n\
2. Quick appointment and the gel color Maria picked works great for my nails.\n\
3. Booked a basic manicure and Maria kept my nails looking natural.\n\
Thanks to Maria my nails are amazing!";
        let provider = ScriptedCompleter::new(vec![Ok(batch.to_string())]);
        let mut rng = fastrand::Rng::with_seed(11);

        let review = generate_review_with_rng(
            &provider,
            &request("Maria", Category::Nails, false),
            &mut rng,
        )
        .await;

        // The banned-phrase line must never surface; any of the three valid
        // candidates may win.
        assert!(!review.to_lowercase().contains("thanks to"));
        assert!(review.to_lowercase().contains("nails"));
        assert!(review.contains("Maria"));
        assert!(review.ends_with('.'));
    }

    #[tokio::test]
    async fn test_suppressed_name_falls_back_to_no_name_pool() {
        // Every scripted response violates suppression by naming Tom.
        let bad = || Ok("Really happy I went over solar options with Tom.".to_string());
        let provider = ScriptedCompleter::new(vec![bad(), bad(), bad(), bad()]);
        let mut rng = fastrand::Rng::with_seed(3);

        let review =
            generate_review_with_rng(&provider, &request("Tom", Category::Solar, true), &mut rng)
                .await;

        assert!(!review.contains("Tom"));
        assert!(review.to_lowercase().contains("solar"));
        assert!(review.ends_with(['.', '!', '?']));
    }

    #[tokio::test]
    async fn test_provider_outage_still_yields_review() {
        let provider = ScriptedCompleter::new(vec![]);
        let mut rng = fastrand::Rng::with_seed(9);

        let review = generate_review_with_rng(
            &provider,
            &request("Lena", Category::Massage, false),
            &mut rng,
        )
        .await;

        assert!(!review.trim().is_empty());
        assert!(review.ends_with(['.', '!', '?']));
        assert!(!review.contains([';', ':', '-']));
    }

    #[tokio::test]
    async fn test_retry_accepts_first_valid_attempt() {
        let provider = ScriptedCompleter::new(vec![
            Err(LlmError::EmptyContent),
            Ok("I'm impressed; the panels went up fast!!".to_string()),
            Ok("Really happy I went over solar options with Tom.".to_string()),
        ]);
        let mut rng = fastrand::Rng::with_seed(2);
        let mut req = request("Tom", Category::Solar, false);
        req.notes = "rooftop install".to_string();

        let review = generate_review_with_rng(&provider, &req, &mut rng).await;
        assert_eq!(review, "Really happy I went over solar options with Tom.");
    }

    #[test]
    fn test_select_candidates_dedupes_paraphrases() {
        let rules = rules_for(Category::Nails);
        let raw = "\
My nails came out looking clean and neat because Maria was patient.\n\
My nails came out looking clean and tidy because Maria was patient.\n\
Quick appointment and the gel color Maria suggested works great for my nails.";
        let req = request("Maria", Category::Nails, false);

        let accepted = select_candidates(rules, &req, 1, raw);
        assert_eq!(accepted.len(), 2);
    }

    #[test]
    fn test_select_candidates_drops_invalid_lines() {
        let rules = rules_for(Category::Nails);
        let raw = "\
Maria did my nails and Maria was great about my nails today.\n\
   \n\
2) So glad Maria suggested the almond shape for my nails.";
        let req = request("Maria", Category::Nails, false);

        let accepted = select_candidates(rules, &req, 1, raw);
        assert_eq!(
            accepted,
            vec!["So glad Maria suggested the almond shape for my nails.".to_string()]
        );
    }

    #[test]
    fn test_postprocess_repairs_punctuation_and_context() {
        let rules = rules_for(Category::Solar);
        let out = postprocess(
            "Got my panels sorted through Tom — great pace; zero pressure",
            "Tom",
            1,
            rules,
        );
        assert!(out.contains("with Tom"));
        assert!(!out.contains(['—', ';', '-']));
        assert!(out.ends_with('.'));
    }

    #[test]
    fn test_fallback_interpolates_employee() {
        let rules = rules_for(Category::Nails);
        let mut rng = fastrand::Rng::with_seed(4);
        let out = fallback(rules, &request("Maria", Category::Nails, false), 1, &mut rng);
        assert!(out.contains("Maria"));
        assert!(out.ends_with('.'));
    }

    #[test]
    fn test_fallback_no_name_pool_when_suppressed() {
        for category in [
            Category::AutoDetailing,
            Category::Solar,
            Category::Nails,
            Category::Massage,
            Category::Insurance,
            Category::Skin,
        ] {
            let rules = rules_for(category);
            let mut rng = fastrand::Rng::with_seed(8);
            let out = fallback(rules, &request("Maria", category, true), 1, &mut rng);
            assert!(!out.contains("Maria"), "{category:?}: {out}");
            assert!(!out.contains("{employee}"), "{category:?}: {out}");
        }
    }
}
