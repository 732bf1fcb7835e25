use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceOrigin {
    Graph,
    Vector,
}

impl EvidenceOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceOrigin::Graph => "graph",
            EvidenceOrigin::Vector => "vector",
        }
    }
}

/// One normalized evidence candidate, regardless of retrieval modality.
/// Graph-derived candidates carry no original score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvidenceItem {
    pub text: String,
    pub origin: EvidenceOrigin,
    pub original_score: Option<f32>,
}

/// A reranked candidate. `candidate_index` points back to the item's
/// position in the pre-rerank candidate list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedItem {
    pub text: String,
    pub score: f32,
    pub origin: EvidenceOrigin,
    pub candidate_index: usize,
}

/// Rerank output: at most top-n items, most relevant first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedEvidence {
    pub items: Vec<RankedItem>,
}

impl RankedEvidence {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Render the ranked evidence into the single context string handed to
    /// the answer synthesizer, most relevant first.
    pub fn context_string(&self) -> String {
        let mut blocks: Vec<String> = Vec::with_capacity(self.items.len());
        for (i, item) in self.items.iter().enumerate() {
            blocks.push(format!(
                "[{rank}] ({origin}, score={score:.4})\n{text}",
                rank = i + 1,
                origin = item.origin.as_str(),
                score = item.score,
                text = item.text,
            ));
        }
        blocks.join("\n\n")
    }
}

/// Serialize an arbitrary structured value to exactly one string. Strings
/// render unquoted; null renders as the empty string (kept as a present
/// candidate, not dropped); records and lists render as compact JSON.
/// serde_json's default map is ordered by key, so the output is
/// deterministic for identical inputs.
pub fn render_structured(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
