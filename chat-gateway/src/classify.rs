//! Keyword-based query routing.
//!
//! A query is either drug-related (retrieval runs) or general conversation
//! (retrieval is skipped). The decision is a case-insensitive substring
//! match against a fixed keyword list — configuration data, not logic, so
//! tests can substitute synthetic lists.
//!
//! Known-imprecise by design: a drug question that happens to use none of
//! the keywords falls through to the general path. That false negative is an
//! accepted trade-off; broader matching rules are deliberately not guessed.

/// Routing decision for one query. Derived purely from query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Domain-relevant: embed, rank, and ground the prompt in the corpus.
    Drug,
    /// General conversation: straight to the open-ended template.
    General,
}

/// Domain vocabulary for the default corpus (FDA drug labels).
const DRUG_KEYWORDS: &[&str] = &[
    "drug",
    "medicine",
    "medication",
    "pill",
    "tablet",
    "capsule",
    "injection",
    "prescription",
    "treatment",
    "therapy",
    "pharmacy",
    "pharmacist",
    "dosage",
    "side effect",
    "contraindication",
    "interaction",
    "overdose",
    "allergy",
    "antibiotic",
    "painkiller",
    "antidepressant",
    "vitamin",
    "supplement",
];

/// Pure, total classifier: same input always yields the same decision.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    /// Lowercased at construction so `classify` stays allocation-light.
    keywords: Vec<String>,
}

impl KeywordClassifier {
    /// Build a classifier over a custom keyword list.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Decide whether `query` should go through retrieval.
    pub fn classify(&self, query: &str) -> QueryKind {
        let lower = query.to_lowercase();
        if self.keywords.iter().any(|k| lower.contains(k)) {
            QueryKind::Drug
        } else {
            QueryKind::General
        }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(DRUG_KEYWORDS.iter().copied())
    }
}
