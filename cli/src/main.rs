use hqa_ai::cohere::CohereClient;
use hqa_ai::embeddings::openai_embed::OpenAiEmbedder;
use hqa_ai::graph::cypher_gen::LlmQueryGenerator;
use hqa_ai::graph::http_graph::HttpGraphStore;
use hqa_ai::llm::openai_llm::OpenAiGenerator;
use hqa_ai::openai::OpenAiClient;
use hqa_ai::pipeline::{HybridPipeline, PipelineOptions};
use hqa_ai::rerank::cohere_rerank::CohereReranker;
use hqa_ai::vector::http_index::HttpVectorIndex;
use hqa_core::config::AppConfig;
use hqa_core::error::AppError;

const DEMO_QUESTIONS: [&str; 4] = [
    "Who are the founders of BlackRock? Return the names as a numbered list.",
    "Where did Larry Fink graduate from?",
    "When was Susan Wagner born?",
    "How did Larry Fink and Rob Kapito meet?",
];

fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            report(&e);
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&config) {
        report(&e);
        std::process::exit(1);
    }
}

fn run(config: &AppConfig) -> Result<(), AppError> {
    let openai = OpenAiClient::new(&config.openai_base_url, &config.openai_api_key)?;
    let cohere = CohereClient::new(&config.cohere_base_url, &config.cohere_api_key)?;

    let embedder = OpenAiEmbedder::new(openai.clone(), config.embed_model.as_str());
    let generator = OpenAiGenerator::new(
        openai,
        config.chat_model.as_str(),
        config.temperature,
        config.seed,
    );
    let query_generator = LlmQueryGenerator::new(generator.clone(), config.graph_schema.as_str());
    let vector_index = HttpVectorIndex::new(&config.vector_base_url)?;
    let graph_store = HttpGraphStore::new(&config.graph_base_url)?;
    let reranker = CohereReranker::new(cohere, config.rerank_model.as_str());

    let pipeline = HybridPipeline::new(
        &embedder,
        &vector_index,
        &query_generator,
        &graph_store,
        &reranker,
        &generator,
        PipelineOptions {
            vector_top_k: config.vector_top_k,
            rerank_top_n: config.rerank_top_n,
        },
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    let questions: Vec<String> = if args.is_empty() {
        DEMO_QUESTIONS.iter().map(|q| q.to_string()).collect()
    } else {
        args
    };

    // One failed question does not abort the rest of the batch.
    for (i, question) in questions.iter().enumerate() {
        if i > 0 {
            println!("---");
        }
        println!("Q: {question}\n");
        match pipeline.run(question) {
            Ok(answer) => println!("{answer}"),
            Err(e) => report(&e),
        }
    }

    Ok(())
}

fn report(e: &AppError) {
    eprintln!("{e}");
    if let Some(details) = &e.details {
        eprintln!("  {details}");
    }
}
