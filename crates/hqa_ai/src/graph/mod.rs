use hqa_core::error::AppError;

/// Turns a natural-language question into a query in the graph store's
/// native query language.
pub trait QueryGenerator {
    fn generate_query(&self, question: &str) -> Result<String, AppError>;
}

/// Executes a query against the graph store. The result is an arbitrary
/// structured value and may legitimately be null or empty.
pub trait GraphStore {
    fn execute(&self, query: &str) -> Result<serde_json::Value, AppError>;
}

pub mod cypher_gen;
pub mod http_graph;
