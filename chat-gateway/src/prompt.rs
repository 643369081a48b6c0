//! Prompt templates and the two-state template policy.
//!
//! One request is either RETRIEVAL (grounded, structured, disclaiming
//! non-database items) or GENERAL (short, open-ended). The state is entered
//! exclusively from the classifier's decision and never changes within a
//! request.

use crate::classify::QueryKind;
use crate::context::PromptContext;

/// Which template a request uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTemplate {
    /// Grounded in retrieved drug labels.
    Retrieval,
    /// Open-ended conversation.
    General,
}

impl PromptTemplate {
    /// Template selection depends only on the classification decision.
    pub fn for_query(kind: QueryKind) -> Self {
        match kind {
            QueryKind::Drug => PromptTemplate::Retrieval,
            QueryKind::General => PromptTemplate::General,
        }
    }
}

/// Canned reply for a domain query with zero usable matches. Generation is
/// not called on this path; an empty-looking context must never reach the
/// model.
pub const NO_MATCHES_DISCLAIMER: &str = "I don't have any specific information about that \
medication in my database. Please consult your healthcare provider for medical advice.";

/// Instructions for grounded answers.
///
/// Keep this short: the structural rules that matter are few, and the
/// context block below the instructions does the heavy lifting.
const GROUNDED_GUIDELINES: &str = r#"
You are a medical information assistant specializing in FDA-approved medications.
Answer the user's query from the provided FDA drug label context only.

Rules:
1. Only include sections for which the context has actual data; omit empty ones.
2. Never show fields whose value would be "Not specified" or "N/A".
3. Do not mention drugs absent from the context, and do not duplicate drugs
   that share an active ingredient and dosage form.
4. Number each drug's information block sequentially (1., 2., ...), use
   bullet points (•) for all items, and keep section headers in CAPS on
   their own line.
5. Always remind the user to consult a healthcare provider.
"#;

/// Build the grounded prompt: guidelines, rendered context, query.
pub fn build_grounded_prompt(query: &str, context: &PromptContext) -> String {
    let mut out = String::new();
    out.push_str(GROUNDED_GUIDELINES.trim());
    out.push_str("\n\nContext from FDA drug labels:\n");
    out.push_str(&context.render());
    out.push_str("\nUser Query: ");
    out.push_str(query.trim());
    out.push('\n');
    out
}

/// Build the short open-ended prompt for general conversation.
pub fn build_general_prompt(query: &str) -> String {
    format!(
        "You are a helpful AI assistant. Provide a concise and friendly response to the \
user's query.\n\nUser Query: {}\n\nKeep your response brief and to the point. If the query \
is unclear, ask for clarification.\n",
        query.trim()
    )
}
