//! Category normalization — maps free-form business-type input to a fixed enum.
//!
//! Resolution order: explicit alias table on the raw type, then keyword hints
//! scanned over the business name, then the service notes. Always returns a
//! value; the default is `AutoDetailing` (the original caller's primary use
//! case — unknown input must not land in a stricter category).

/// Business category. Determines which rule set, prompt template, and
/// fallback pool apply for the whole request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    AutoDetailing,
    Solar,
    Nails,
    Massage,
    Insurance,
    Skin,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::AutoDetailing => "auto_detailing",
            Category::Solar => "solar",
            Category::Nails => "nails",
            Category::Massage => "massage",
            Category::Insurance => "insurance",
            Category::Skin => "skin",
        }
    }
}

/// Exact aliases accepted for each category after lowercasing and trimming.
const ALIASES: &[(&str, Category)] = &[
    ("auto_detailing", Category::AutoDetailing),
    ("auto-detailing", Category::AutoDetailing),
    ("auto detailing", Category::AutoDetailing),
    ("detail", Category::AutoDetailing),
    ("detailing", Category::AutoDetailing),
    ("car_detailing", Category::AutoDetailing),
    ("solar", Category::Solar),
    ("solar_panels", Category::Solar),
    ("solar-panels", Category::Solar),
    ("nail", Category::Nails),
    ("nails", Category::Nails),
    ("nail_salon", Category::Nails),
    ("nail-salon", Category::Nails),
    ("massage", Category::Massage),
    ("massages", Category::Massage),
    ("massage_therapy", Category::Massage),
    ("massage-therapy", Category::Massage),
    ("insurance", Category::Insurance),
    ("ins", Category::Insurance),
    ("auto_insurance", Category::Insurance),
    ("home_insurance", Category::Insurance),
    ("life_insurance", Category::Insurance),
    ("allstate", Category::Insurance),
    ("skin", Category::Skin),
    ("skincare", Category::Skin),
    ("skin-care", Category::Skin),
    ("laser", Category::Skin),
    ("cosmetic", Category::Skin),
    ("cosmetics", Category::Skin),
    ("aesthetic", Category::Skin),
    ("aesthetics", Category::Skin),
    ("medspa", Category::Skin),
    ("med-spa", Category::Skin),
    ("spa", Category::Skin),
    ("skin_medical", Category::Skin),
];

/// Keyword hints used when the raw type is missing or unrecognized.
/// Scanned in this order; first category with a hit wins.
const HINTS: &[(Category, &[&str])] = &[
    (
        Category::Solar,
        &[
            "solar", "panel", "panels", "kw", "kilowatt", "utility", "roof", "rooftop",
            "inverter", "pv",
        ],
    ),
    (
        Category::Nails,
        &["nail", "nails", "manicure", "pedicure", "acrylic", "gel polish"],
    ),
    (Category::Massage, &["massage", "masseuse", "bodywork"]),
    (
        Category::Insurance,
        &["insurance", "policy", "coverage", "premium", "claim", "agent", "allstate"],
    ),
    (
        Category::Skin,
        &["skin", "laser", "medspa", "med spa", "facial", "botox", "aesthetic"],
    ),
    (
        Category::AutoDetailing,
        &["detail", "ceramic", "wax", "tint", "car wash", "interior"],
    ),
];

/// Resolves a category from the raw business type, with keyword fallback on
/// the business name and then the service notes. Never fails.
pub fn resolve_category(raw_type: &str, business_name: &str, notes: &str) -> Category {
    let raw = raw_type.trim().to_lowercase();

    if !raw.is_empty() {
        if let Some((_, category)) = ALIASES.iter().find(|(alias, _)| *alias == raw) {
            return *category;
        }
    }

    for text in [business_name, notes] {
        if let Some(category) = scan_hints(text) {
            return category;
        }
    }

    Category::AutoDetailing
}

fn scan_hints(text: &str) -> Option<Category> {
    let low = text.trim().to_lowercase();
    if low.is_empty() {
        return None;
    }

    for (category, hints) in HINTS {
        if hints.iter().any(|hint| low.contains(hint)) {
            return Some(*category);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_detailing_variants() {
        assert_eq!(resolve_category("detail", "", ""), Category::AutoDetailing);
        assert_eq!(resolve_category("Detailing", "", ""), Category::AutoDetailing);
        assert_eq!(
            resolve_category("auto-detailing", "", ""),
            Category::AutoDetailing
        );
    }

    #[test]
    fn test_alias_nails_variants() {
        for raw in ["nail", "nails", "nail_salon", "nail-salon"] {
            assert_eq!(resolve_category(raw, "", ""), Category::Nails);
        }
    }

    #[test]
    fn test_alias_massage_therapy() {
        assert_eq!(resolve_category("massage_therapy", "", ""), Category::Massage);
    }

    #[test]
    fn test_alias_skin_cluster() {
        for raw in ["medspa", "laser", "aesthetics", "spa", "skin_medical"] {
            assert_eq!(resolve_category(raw, "", ""), Category::Skin);
        }
    }

    #[test]
    fn test_alias_insurance_shorthand() {
        assert_eq!(resolve_category("ins", "", ""), Category::Insurance);
        assert_eq!(resolve_category("allstate", "", ""), Category::Insurance);
    }

    #[test]
    fn test_alias_is_trimmed_and_lowercased() {
        assert_eq!(resolve_category("  SOLAR  ", "", ""), Category::Solar);
    }

    #[test]
    fn test_empty_type_defaults_to_detailing() {
        assert_eq!(resolve_category("", "", ""), Category::AutoDetailing);
    }

    #[test]
    fn test_unrecognized_type_defaults_to_detailing() {
        assert_eq!(
            resolve_category("plumbing", "", ""),
            Category::AutoDetailing
        );
    }

    #[test]
    fn test_hint_from_business_name() {
        assert_eq!(
            resolve_category("", "Sunrise Solar Co", ""),
            Category::Solar
        );
        assert_eq!(
            resolve_category("", "Luxe Nail Studio", ""),
            Category::Nails
        );
    }

    #[test]
    fn test_hint_from_notes_when_no_type() {
        // Scenario: no businessType, notes mention rooftop panels.
        assert_eq!(
            resolve_category("", "", "they quoted me for rooftop panels"),
            Category::Solar
        );
    }

    #[test]
    fn test_business_name_scanned_before_notes() {
        assert_eq!(
            resolve_category("", "Coastal Massage", "asked about insurance"),
            Category::Massage
        );
    }

    #[test]
    fn test_category_as_str() {
        assert_eq!(Category::AutoDetailing.as_str(), "auto_detailing");
        assert_eq!(Category::Skin.as_str(), "skin");
    }
}
