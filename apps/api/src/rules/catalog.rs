//! Static per-category rule table. Each category is a data record; the
//! engine in `rules` and the orchestrator in `pipeline` are parameterized by
//! these records and carry no category-specific branches.
//!
//! Threshold values (word bounds, retry counts, batch sizes) are tuning
//! knobs with a single current value each.

use crate::category::Category;
use crate::rules::{CategoryRules, NamePresence, Strategy};

const RETRY_ATTEMPTS: u32 = 4;
const BATCH_LINES: u32 = 12;

const SOFT_WORD_TARGET: usize = 12;
const LENGTH_PENALTY: f32 = 0.7;

/// Generic salesy vocabulary penalized during ranking across categories.
const COMMON_CLICHES: &[&str] = &[
    "amazing",
    "fantastic",
    "incredible",
    "highly recommend",
    "top notch",
];

static AUTO_DETAILING: CategoryRules = CategoryRules {
    category: Category::AutoDetailing,
    prompt_topic: "an auto detailing service",
    banned_phrases: &[],
    required_topic_tokens: &[],
    min_words: 10,
    max_words: 40,
    sentence_count_max: 2,
    two_sentence_chance: 0.25,
    word_clamp_one: 20,
    word_clamp_two: 28,
    name_presence: NamePresence::Optional,
    forbid_name_start: true,
    forbid_name_end: false,
    forbidden_openers: &[],
    cliche_phrases: COMMON_CLICHES,
    penalized_openers: &[],
    soft_word_target: SOFT_WORD_TARGET,
    length_penalty: LENGTH_PENALTY,
    strategy: Strategy::Retry {
        max_attempts: RETRY_ATTEMPTS,
    },
    temperature: 1.05,
    max_tokens: 90,
    fallback_named: &[
        "My car looks great after the detail, {employee} did a solid job.",
        "Really happy with how clean my car came out, {employee} did solid work.",
    ],
    fallback_no_name: &[
        "My car looks great after the detail, the crew did a solid job.",
        "Really happy with how clean my car came out after the detail.",
    ],
    extra_prompt_rules: &[],
};

static SOLAR: CategoryRules = CategoryRules {
    category: Category::Solar,
    prompt_topic: "a solar visit",
    banned_phrases: &[
        "easy to understand",
        "made it easy to understand",
        "made it easy",
        "made everything easy",
        "super easy",
        "very easy",
        "straightforward",
        "simple and easy",
        "smooth",
        "the process",
        "process",
        "walked me through",
        "broke it down",
        "answered all my questions",
        "solar conversation",
        "conversation",
        "consultation",
    ],
    required_topic_tokens: &["solar"],
    min_words: 8,
    max_words: 14,
    sentence_count_max: 1,
    two_sentence_chance: 0.0,
    word_clamp_one: 14,
    word_clamp_two: 14,
    name_presence: NamePresence::AtLeastOnce,
    forbid_name_start: true,
    forbid_name_end: false,
    forbidden_openers: &[],
    cliche_phrases: COMMON_CLICHES,
    penalized_openers: &[],
    soft_word_target: SOFT_WORD_TARGET,
    length_penalty: LENGTH_PENALTY,
    strategy: Strategy::Retry {
        max_attempts: RETRY_ATTEMPTS,
    },
    temperature: 1.25,
    max_tokens: 70,
    fallback_named: &[
        "Solid overall and {employee} was great with solar.",
        "Glad I talked with {employee} about solar.",
        "Good visit and {employee} was helpful with solar.",
        "Really appreciate {employee} being respectful about solar.",
    ],
    fallback_no_name: &[
        "Really glad I moved forward with solar.",
        "Good visit and the solar answers were helpful.",
        "Happy with how my solar questions were handled.",
    ],
    extra_prompt_rules: &["Do NOT mention the business name."],
};

static NAILS: CategoryRules = CategoryRules {
    category: Category::Nails,
    prompt_topic: "getting nails done",
    banned_phrases: &[
        "thanks to",
        "thank you",
        "experience",
        "great time chatting",
        "had a great time chatting",
        "chatting with",
    ],
    required_topic_tokens: &["nail"],
    min_words: 7,
    max_words: 16,
    sentence_count_max: 1,
    two_sentence_chance: 0.0,
    word_clamp_one: 14,
    word_clamp_two: 14,
    name_presence: NamePresence::ExactlyOnce,
    forbid_name_start: true,
    forbid_name_end: true,
    forbidden_openers: &[],
    cliche_phrases: &[
        "amazing",
        "fantastic",
        "incredible",
        "best",
        "highly recommend",
        "top notch",
    ],
    penalized_openers: &[],
    soft_word_target: SOFT_WORD_TARGET,
    length_penalty: LENGTH_PENALTY,
    strategy: Strategy::Batch {
        request_count: BATCH_LINES,
    },
    temperature: 1.2,
    max_tokens: 240,
    fallback_named: &[
        "Love my nails, {employee} did a great job.",
        "My nails turned out great, {employee} did awesome.",
        "So happy with my nails, {employee} did great work.",
        "These nails are so cute, {employee} did great.",
    ],
    fallback_no_name: &[
        "Love my nails, the whole visit went great.",
        "My nails turned out great and booking was easy.",
    ],
    extra_prompt_rules: &[
        "Do NOT mention the business name.",
        "Avoid \"thanks\", \"thank you\", and the word \"experience\".",
    ],
};

static MASSAGE: CategoryRules = CategoryRules {
    category: Category::Massage,
    prompt_topic: "a massage",
    banned_phrases: &[
        "session",
        "experience",
        "deep tissue",
        "sports massage",
        "hot stone",
        "prenatal",
        "trigger points",
        "injury",
        "pain is gone",
        "rejuvenated",
        "melt away",
        "melted away",
        "left me feeling",
        "can't wait to return",
        "can\u{2019}t wait to return",
        "return for another",
        "exactly what i needed",
        "incredibly relaxing",
        "completely relaxed",
        "fantastic",
        "amazing",
        "excellent massage",
        "completely renewed",
        "renewed and lighter",
    ],
    required_topic_tokens: &["massage"],
    min_words: 7,
    max_words: 16,
    sentence_count_max: 1,
    two_sentence_chance: 0.0,
    word_clamp_one: 14,
    word_clamp_two: 14,
    name_presence: NamePresence::ExactlyOnce,
    forbid_name_start: true,
    forbid_name_end: true,
    forbidden_openers: &["the massage was"],
    cliche_phrases: &[
        "amazing",
        "fantastic",
        "incredible",
        "excellent",
        "rejuvenated",
        "renewed",
        "melt away",
        "stress",
        "left feeling",
    ],
    penalized_openers: &[("left feeling", 6.0)],
    soft_word_target: SOFT_WORD_TARGET,
    length_penalty: LENGTH_PENALTY,
    strategy: Strategy::Batch {
        request_count: BATCH_LINES,
    },
    temperature: 1.2,
    max_tokens: 240,
    fallback_named: &["Great massage with {employee}, I feel better after."],
    fallback_no_name: &["Great massage today, I feel better after."],
    extra_prompt_rules: &[
        "Do NOT invent medical claims.",
        "Do NOT use the words \"session\" or \"experience\".",
    ],
};

static INSURANCE: CategoryRules = CategoryRules {
    category: Category::Insurance,
    prompt_topic: "an insurance office",
    banned_phrases: &[
        "experience",
        "session",
        "saved me",
        "saved us",
        "guarantee",
        "guaranteed",
        "always",
        "best ever",
        "top notch",
        "amazing",
        "fantastic",
        "incredible",
        "lowest rate",
        "cheapest",
    ],
    required_topic_tokens: &["insurance", "policy", "coverage", "agent", "helpful", "questions"],
    min_words: 7,
    max_words: 16,
    sentence_count_max: 1,
    two_sentence_chance: 0.0,
    word_clamp_one: 14,
    word_clamp_two: 14,
    name_presence: NamePresence::ExactlyOnce,
    forbid_name_start: true,
    forbid_name_end: true,
    forbidden_openers: &[],
    cliche_phrases: COMMON_CLICHES,
    penalized_openers: &[],
    soft_word_target: SOFT_WORD_TARGET,
    length_penalty: LENGTH_PENALTY,
    strategy: Strategy::Batch {
        request_count: BATCH_LINES,
    },
    temperature: 1.15,
    max_tokens: 240,
    fallback_named: &[
        "Really helpful with my insurance questions, {employee} was quick and professional.",
    ],
    fallback_no_name: &[
        "Really helpful with my insurance questions, quick and professional.",
    ],
    extra_prompt_rules: &[
        "Do NOT mention the business name.",
        "Avoid guarantees, rate or price promises, and \"saved me money\" claims.",
    ],
};

static SKIN: CategoryRules = CategoryRules {
    category: Category::Skin,
    prompt_topic: "a skin and laser clinic",
    banned_phrases: &[
        "cured",
        "guarantee",
        "guaranteed",
        "results",
        "100%",
        "permanent",
        "fixed my",
        "diagnosed",
        "acne is gone",
        "wrinkles are gone",
        "scar is gone",
        "pain is gone",
        "highly recommend",
        "top notch",
        "amazing",
        "fantastic",
        "incredible",
        "experience",
        "session",
        "procedure",
    ],
    required_topic_tokens: &["skin", "laser", "treatment", "clinic", "staff"],
    min_words: 7,
    max_words: 16,
    sentence_count_max: 1,
    two_sentence_chance: 0.0,
    word_clamp_one: 14,
    word_clamp_two: 14,
    name_presence: NamePresence::Optional,
    forbid_name_start: true,
    forbid_name_end: true,
    forbidden_openers: &[],
    cliche_phrases: COMMON_CLICHES,
    penalized_openers: &[],
    soft_word_target: SOFT_WORD_TARGET,
    length_penalty: LENGTH_PENALTY,
    strategy: Strategy::Batch {
        request_count: BATCH_LINES,
    },
    temperature: 1.15,
    max_tokens: 240,
    fallback_named: &["Great skin treatment today, {employee} was kind and professional."],
    fallback_no_name: &["Great skin treatment today, the staff was kind and professional."],
    extra_prompt_rules: &[
        "Do NOT mention the business name.",
        "Do NOT invent medical outcomes, guarantees, or before and after claims.",
    ],
};

/// Looks up the static rule record for a category.
pub fn rules_for(category: Category) -> &'static CategoryRules {
    match category {
        Category::AutoDetailing => &AUTO_DETAILING,
        Category::Solar => &SOLAR,
        Category::Nails => &NAILS,
        Category::Massage => &MASSAGE,
        Category::Insurance => &INSURANCE,
        Category::Skin => &SKIN,
    }
}
