use std::error::Error;

use chat_gateway::{ChatGateway, GatewayConfig};
use llm_service::GeminiService;
use llm_service::config::default_config::{config_gemini_chat, config_gemini_embedding};
use rag_core::JsonlDocumentStore;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file.
    // Fails if .env file not found, not readable or invalid.
    dotenvy::dotenv()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,chat_gateway=info"))
        .unwrap();

    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if query.trim().is_empty() {
        eprintln!("usage: pharmachat-backend <query>");
        std::process::exit(2);
    }

    let embedder = GeminiService::new(config_gemini_embedding()?)?;
    let generator = GeminiService::new(config_gemini_chat()?)?;

    let corpus_path =
        std::env::var("CORPUS_PATH").unwrap_or_else(|_| "data/drug_labels.jsonl".to_string());
    let store = JsonlDocumentStore::new(&corpus_path);

    let gateway = ChatGateway::new(embedder, generator, store, GatewayConfig::from_env());

    match gateway.answer(&query).await {
        Ok(answer) => println!("{answer}"),
        Err(e) => {
            tracing::error!(status = ?e.status(), error = %e, "answer failed");
            std::process::exit(1);
        }
    }

    Ok(())
}
