//! Context assembly: ranked documents → structured, deduplicated blocks.
//!
//! Field selection is driven by a const mapping table so the assembler and
//! the prompt template can never drift apart, and placeholder filtering is a
//! const exclusion list instead of string checks scattered through output
//! formatting.

use std::collections::HashSet;

use rag_core::ScoredDocument;

/// Metadata key → output label, in render order.
///
/// Keys are the ingestion field names stored in `StoredDocument::metadata`.
pub const FIELD_LABELS: &[(&str, &str)] = &[
    ("genericName", "Generic/Proper Name"),
    ("activeIngredients", "Active Ingredients"),
    ("pharmacologicClass", "Pharmacologic Class"),
    ("labelType", "Label Type"),
    ("dosageForm", "Dosage Form"),
    ("routeOfAdministration", "Route of Administration"),
    ("company", "Manufacturer"),
];

/// Values that mean "no data" and must never reach the prompt.
pub const PLACEHOLDER_VALUES: &[&str] = &["not specified", "n/a", "unknown"];

/// One rendered document: title plus the metadata fields that survived
/// placeholder filtering.
#[derive(Debug, Clone)]
pub struct ContextEntry {
    pub title: String,
    /// `(label, value)` pairs in `FIELD_LABELS` order.
    pub fields: Vec<(&'static str, String)>,
    pub content: String,
    pub similarity: f32,
}

/// Structured context for one request. Transient: built once per request and
/// discarded after the generation call.
#[derive(Debug, Clone, Default)]
pub struct PromptContext {
    pub entries: Vec<ContextEntry>,
}

impl PromptContext {
    /// True when retrieval produced nothing usable; downstream must take the
    /// explicit disclaimer path instead of rendering an empty context.
    pub fn no_matches(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the numbered context block fed into the grounded template.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&format!("{}. DRUG INFORMATION:\n", i + 1));
            out.push_str(&format!("• Name: {}\n", entry.title));
            for (label, value) in &entry.fields {
                out.push_str(&format!("• {label}: {value}\n"));
            }
            out.push_str(&format!("• Content: {}\n", entry.content.trim()));
        }
        out
    }
}

/// True when `value` carries no data worth rendering.
fn is_placeholder(value: &str) -> bool {
    let v = value.trim();
    v.is_empty() || PLACEHOLDER_VALUES.iter().any(|p| v.eq_ignore_ascii_case(p))
}

fn normalized(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Build the structured context from ranked documents.
///
/// Two documents describe the same underlying drug when their normalized
/// titles match, or when their (active ingredient, dosage form) pairs match;
/// later duplicates are dropped so rank order decides which copy survives.
pub fn assemble(ranked: &[ScoredDocument]) -> PromptContext {
    let mut seen_titles: HashSet<String> = HashSet::new();
    let mut seen_ingredient_form: HashSet<(String, String)> = HashSet::new();
    let mut entries = Vec::with_capacity(ranked.len());

    for scored in ranked {
        let doc = &scored.document;

        let title_key = normalized(&doc.title);
        let ingredient_form = match (
            doc.metadata.get("activeIngredients"),
            doc.metadata.get("dosageForm"),
        ) {
            (Some(ing), Some(form)) if !is_placeholder(ing) && !is_placeholder(form) => {
                Some((normalized(ing), normalized(form)))
            }
            _ => None,
        };

        if seen_titles.contains(&title_key) {
            continue;
        }
        if let Some(key) = &ingredient_form {
            if seen_ingredient_form.contains(key) {
                continue;
            }
        }

        seen_titles.insert(title_key);
        if let Some(key) = ingredient_form {
            seen_ingredient_form.insert(key);
        }

        let fields = FIELD_LABELS
            .iter()
            .filter_map(|(key, label)| {
                doc.metadata
                    .get(*key)
                    .filter(|v| !is_placeholder(v))
                    .map(|v| (*label, v.trim().to_string()))
            })
            .collect();

        entries.push(ContextEntry {
            title: doc.title.clone(),
            fields,
            content: doc.content.clone(),
            similarity: scored.similarity,
        });
    }

    PromptContext { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rag_core::StoredDocument;
    use std::collections::HashMap;

    fn scored(title: &str, meta: &[(&str, &str)], similarity: f32) -> ScoredDocument {
        let metadata: HashMap<String, String> = meta
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ScoredDocument {
            document: StoredDocument {
                id: title.to_lowercase(),
                title: title.into(),
                content: format!("label text for {title}"),
                embedding: vec![],
                metadata,
            },
            similarity,
        }
    }

    #[test]
    fn placeholder_and_missing_fields_are_omitted() {
        let docs = [scored(
            "Ibuprofen",
            &[
                ("activeIngredients", "ibuprofen"),
                ("company", "Not specified"),
                ("labelType", "N/A"),
                ("dosageForm", "  "),
            ],
            0.9,
        )];
        let ctx = assemble(&docs);
        assert_eq!(ctx.entries.len(), 1);

        let labels: Vec<&str> = ctx.entries[0].fields.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["Active Ingredients"]);
    }

    #[test]
    fn duplicate_titles_keep_the_higher_ranked_copy() {
        let docs = [
            scored("Advil", &[("activeIngredients", "ibuprofen")], 0.9),
            scored("ADVIL ", &[("activeIngredients", "ibuprofen")], 0.8),
        ];
        let ctx = assemble(&docs);
        assert_eq!(ctx.entries.len(), 1);
        assert_eq!(ctx.entries[0].similarity, 0.9);
    }

    #[test]
    fn same_ingredient_and_form_is_one_drug() {
        let docs = [
            scored(
                "Advil",
                &[("activeIngredients", "Ibuprofen"), ("dosageForm", "Tablet")],
                0.9,
            ),
            scored(
                "Motrin",
                &[("activeIngredients", "ibuprofen"), ("dosageForm", "tablet")],
                0.85,
            ),
            scored(
                "Motrin IB Gel",
                &[("activeIngredients", "ibuprofen"), ("dosageForm", "gel")],
                0.8,
            ),
        ];
        let ctx = assemble(&docs);
        let titles: Vec<&str> = ctx.entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Advil", "Motrin IB Gel"]);
    }

    #[test]
    fn empty_ranking_is_flagged_no_matches() {
        let ctx = assemble(&[]);
        assert!(ctx.no_matches());
        assert!(ctx.render().is_empty());
    }

    #[test]
    fn render_numbers_entries_sequentially() {
        let docs = [
            scored("Ibuprofen", &[("activeIngredients", "ibuprofen")], 0.9),
            scored("Aspirin", &[("activeIngredients", "aspirin")], 0.7),
        ];
        let rendered = assemble(&docs).render();
        assert!(rendered.contains("1. DRUG INFORMATION:\n• Name: Ibuprofen"));
        assert!(rendered.contains("2. DRUG INFORMATION:\n• Name: Aspirin"));
        assert!(rendered.contains("• Active Ingredients: ibuprofen"));
    }
}
