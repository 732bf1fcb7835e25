pub mod cohere;
pub mod embeddings;
pub mod fuse;
pub mod graph;
pub mod llm;
pub mod openai;
pub mod pipeline;
pub mod prompts;
pub mod rerank;
pub mod vector;
