// Shared prompt constants. Per-category rule text is built in
// rules::prompts alongside the rule catalog; this file holds only the
// cross-cutting system prompt.

/// System prompt applied to every generation call.
pub const SYSTEM_PROMPT: &str = "You write short, human-sounding Google reviews. \
    Vary sentence shapes between drafts. \
    Never leave a trailing sentence fragment. \
    Never invent specific factual claims like prices, dates, or addresses.";
