//! Prompt formatting applied before a query reaches a model.

/// Instructions prepended to every user question sent to a model.
pub const DEFAULT_PREAMBLE: &str = "You are a business analytics assistant for an \
operations dashboard covering sales, procurement, billing and security. Answer the \
user's question concisely and factually. If the answer depends on data you do not \
have, say so and suggest which dashboard or report to check.";

/// Wraps a raw user query in the assistant preamble.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    preamble: String,
}

impl PromptTemplate {
    pub fn new(preamble: impl Into<String>) -> Self {
        Self {
            preamble: preamble.into(),
        }
    }

    pub fn format(&self, query: &str) -> String {
        let preamble = self.preamble.trim();
        if preamble.is_empty() {
            return query.to_string();
        }

        format!("{}\n\nUser question: {}\nAnswer:", preamble, query)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_PREAMBLE)
    }
}
