use serde::{Deserialize, Serialize};

/// Canonical interest categories used as the classifier feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestCategory {
    Coding,
    Biology,
    Art,
    Business,
    Physics,
}

impl InterestCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Coding => "coding",
            Self::Biology => "biology",
            Self::Art => "art",
            Self::Business => "business",
            Self::Physics => "physics",
        }
    }
}

/// External tokenizer hook. Implementations reduce free text to its
/// noun/verb tokens before keyword matching; when no filter is wired in,
/// the raw text is matched as-is.
pub trait TokenFilter: Send + Sync {
    fn content_tokens(&self, text: &str) -> String;
}

// Ordered, first-match-wins. The order is part of the observable behavior
// ("science" maps to physics only because no earlier rule claims it), so
// this stays an explicit list rather than a map.
const KEYWORD_RULES: &[(&str, InterestCategory)] = &[
    ("coding", InterestCategory::Coding),
    ("programming", InterestCategory::Coding),
    ("software", InterestCategory::Coding),
    ("biology", InterestCategory::Biology),
    ("medicine", InterestCategory::Biology),
    ("health", InterestCategory::Biology),
    ("art", InterestCategory::Art),
    ("design", InterestCategory::Art),
    ("creative", InterestCategory::Art),
    ("business", InterestCategory::Business),
    ("management", InterestCategory::Business),
    ("finance", InterestCategory::Business),
    ("physics", InterestCategory::Physics),
    ("science", InterestCategory::Physics),
    ("engineering", InterestCategory::Physics),
];

/// Maps free text to a canonical interest category via case-insensitive
/// substring rules. No match falls back to `Coding`.
pub fn normalize(text: &str, filter: Option<&dyn TokenFilter>) -> InterestCategory {
    let filtered = match filter {
        Some(f) => f.content_tokens(text),
        None => text.to_string(),
    };
    let haystack = filtered.to_lowercase();

    for (keyword, category) in KEYWORD_RULES {
        if haystack.contains(keyword) {
            return *category;
        }
    }

    InterestCategory::Coding
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_coding_keywords() {
        assert_eq!(
            normalize("I love coding and software", None),
            InterestCategory::Coding
        );
        assert_eq!(normalize("Programming is fun", None), InterestCategory::Coding);
    }

    #[test]
    fn empty_text_defaults_to_coding() {
        assert_eq!(normalize("", None), InterestCategory::Coding);
        assert_eq!(normalize("nothing relevant here", None), InterestCategory::Coding);
    }

    #[test]
    fn first_matching_rule_wins() {
        // "coding" appears before "design" in the rule table.
        assert_eq!(
            normalize("coding and design", None),
            InterestCategory::Coding
        );
        // "medicine" outranks "science" by table order.
        assert_eq!(
            normalize("medicine is a science", None),
            InterestCategory::Biology
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(normalize("BIOLOGY", None), InterestCategory::Biology);
        assert_eq!(normalize("Finance major", None), InterestCategory::Business);
    }

    #[test]
    fn token_filter_output_is_what_gets_matched() {
        struct Keep(&'static str);
        impl TokenFilter for Keep {
            fn content_tokens(&self, _text: &str) -> String {
                self.0.to_string()
            }
        }

        assert_eq!(
            normalize("irrelevant", Some(&Keep("physics"))),
            InterestCategory::Physics
        );
        assert_eq!(normalize("physics", Some(&Keep(""))), InterestCategory::Coding);
    }
}
