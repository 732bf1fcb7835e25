pub const RAG_SYSTEM_PROMPT: &str = r#"You are an assistant that answers questions using only the retrieved context you are given.

Rules (non-negotiable):
1) Use ONLY the context below. Do not use outside knowledge and do not invent facts.
2) The context mixes graph query results (structured records) and text passages; treat both as evidence.
3) If the context does not contain the answer, reply that you do not know.
4) Answer concisely and address the question directly, honoring any formatting the question asks for.
"#;

pub fn rag_user_prompt(question: &str, context: &str) -> String {
    format!(
        r#"Question:
{question}

Context:
{context}

Answer the question using only the context above."#
    )
}

pub const CYPHER_SYSTEM_PROMPT: &str = r#"You translate natural-language questions into Cypher queries for a graph database.

Rules (non-negotiable):
1) Return exactly one Cypher query and nothing else: no prose, no explanation.
2) Use only labels, relationship types, and properties that appear in the schema provided.
3) Match string properties case-insensitively where the query language allows it.
4) If the question cannot be answered from the schema, return a query that yields no rows rather than inventing schema elements.
"#;

pub fn cypher_generation_prompt(schema: &str, question: &str) -> String {
    format!(
        r#"Graph schema:
{schema}

Question:
{question}

Cypher query:"#
    )
}
