//! Finsight terminal front-end.
//!
//! Thin display layer over the conversation core: reads prompts line by line,
//! submits them to the orchestrator, and renders the resulting model turns,
//! source lists, and error banner. Carries no decision logic.

use std::process;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use finsight::adapters::ai::{GeminiAnalyst, GeminiConfig};
use finsight::application::ChatOrchestrator;
use finsight::config::AppConfig;
use finsight::domain::transcript::{Source, Turn};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Failed to load configuration: {}", error);
            process::exit(1);
        }
    };

    // Missing credential is fatal before any request can be made.
    if let Err(error) = config.validate() {
        eprintln!("Invalid configuration: {}", error);
        process::exit(1);
    }

    let gemini = GeminiConfig::new(config.ai.gemini_api_key.clone().unwrap_or_default())
        .with_model(config.ai.model.clone())
        .with_base_url(config.ai.base_url.clone())
        .with_timeout(config.ai.timeout());

    let mut orchestrator = ChatOrchestrator::new(Arc::new(GeminiAnalyst::new(gemini)));

    for turn in orchestrator.snapshot().transcript() {
        render_model_turn(turn);
    }
    println!("\nType a financial question, or /quit to exit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print_prompt();
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(error) => {
                eprintln!("Failed to read input: {}", error);
                break;
            }
        };

        if line.trim() == "/quit" {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        println!("Analyzing...");
        let already_rendered = orchestrator.snapshot().len();
        orchestrator.submit(&line).await;

        let session = orchestrator.snapshot();
        for turn in &session.transcript()[already_rendered..] {
            if turn.is_model() {
                render_model_turn(turn);
            }
        }
        if let Some(banner) = session.last_error() {
            eprintln!("{}", banner);
        }
    }
}

fn print_prompt() {
    use std::io::Write;

    print!("\n> ");
    let _ = std::io::stdout().flush();
}

fn render_model_turn(turn: &Turn) {
    println!("\n{}", turn.content());

    if let Some(sources) = turn.visible_sources() {
        println!("\nSources:");
        for source in sources {
            println!("  - {} ({})", source_label(source), source.uri);
        }
    }
}

/// Link text for a citation: the title, falling back to the uri when blank.
fn source_label(source: &Source) -> &str {
    if source.title.is_empty() {
        &source.uri
    } else {
        &source.title
    }
}
