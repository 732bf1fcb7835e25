use hqa_core::error::AppError;
use hqa_core::evidence::{
    render_structured, EvidenceItem, EvidenceOrigin, RankedEvidence, RankedItem,
};
use serde_json::Value;

use crate::rerank::Reranker;
use crate::vector::VectorHit;

/// Normalization step: merge both retrieval modalities into one candidate
/// list. The serialized graph result is always the first candidate, even
/// when empty, so graph evidence is never silently dropped and always sits
/// at a fixed position. Vector hits follow in retriever order. Identical
/// texts are kept as separate candidates; recall wins over dedup here.
pub fn fuse_candidates(graph_result: &Value, vector_hits: &[VectorHit]) -> Vec<EvidenceItem> {
    let mut candidates: Vec<EvidenceItem> = Vec::with_capacity(1 + vector_hits.len());
    candidates.push(EvidenceItem {
        text: render_structured(graph_result),
        origin: EvidenceOrigin::Graph,
        original_score: None,
    });
    for hit in vector_hits {
        candidates.push(EvidenceItem {
            text: hit.text.clone(),
            origin: EvidenceOrigin::Vector,
            original_score: hit.score,
        });
    }
    candidates
}

/// Fusion & rerank: build the candidate list, score it against the question
/// with the reranking capability, and return at most `top_n` items ordered
/// by descending relevance. Ties keep the earlier pre-rerank candidate
/// first. A reranker failure is fatal for the run; there is no fallback to
/// unranked concatenation.
pub fn fuse_and_rerank(
    reranker: &dyn Reranker,
    question: &str,
    graph_result: &Value,
    vector_hits: &[VectorHit],
    top_n: u32,
) -> Result<RankedEvidence, AppError> {
    let candidates = fuse_candidates(graph_result, vector_hits);
    let documents: Vec<String> = candidates.iter().map(|c| c.text.clone()).collect();

    let mut results = reranker.rerank(question, &documents, top_n).map_err(|e| {
        if e.code == "RERANK_FAILED" {
            e
        } else {
            AppError::new("RERANK_FAILED", "Reranking capability failed")
                .with_details(e.to_string())
                .with_retryable(e.retryable)
        }
    })?;

    for result in results.iter() {
        if result.index >= candidates.len() {
            return Err(
                AppError::new("RERANK_FAILED", "Rerank result index out of range")
                    .with_details(format!(
                        "index={}; candidates={}",
                        result.index,
                        candidates.len()
                    )),
            );
        }
    }

    // Local ordering guarantee, independent of provider ordering.
    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.index.cmp(&b.index))
    });
    results.truncate(top_n as usize);

    let items: Vec<RankedItem> = results
        .into_iter()
        .map(|r| RankedItem {
            origin: candidates[r.index].origin,
            candidate_index: r.index,
            text: r.text,
            score: r.score,
        })
        .collect();

    Ok(RankedEvidence { items })
}
