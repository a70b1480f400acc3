use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pagelens::audit::TurnLog;
use pagelens::config::ProviderConfig;
use pagelens::core::errors::{AppError, AppResult};
use pagelens::core::types::{RetrievalTurn, SectionRef, TurnStatus};
use pagelens::pdf;
use pagelens::providers::openai::ChatClient;
use pagelens::reasoner::{orchestrator::Retriever, synthesizer};
use pagelens::structure;

#[derive(Debug, Parser)]
#[command(
    name = "pagelens",
    about = "Reasoning-based question answering over PDF document outlines"
)]
struct Cli {
    /// Directory scanned for PDF documents.
    #[arg(long, default_value = "docs")]
    docs_dir: PathBuf,
    /// Directory holding `<name>_structure.json` files from the external indexer.
    #[arg(long, default_value = "structures")]
    structures_dir: PathBuf,
    /// Directory for the append-only turn log.
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
    /// Chat model name.
    #[arg(long)]
    model: Option<String>,
    /// OpenAI-compatible endpoint base URL.
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> AppResult<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PAGELENS_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = ProviderConfig::from_env();
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if config.api_key.is_none() {
        println!("Warning: no API key found. Set DASHSCOPE_API_KEY or OPENAI_API_KEY.");
    }

    let pdfs = list_pdfs(&cli.docs_dir)?;
    let Some(selected) = select_document(&pdfs)? else {
        return Ok(());
    };
    let pdf_path = cli.docs_dir.join(&selected);

    let stem = Path::new(&selected)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| selected.clone());
    let structure_path = cli.structures_dir.join(format!("{stem}_structure.json"));
    if !structure_path.exists() {
        println!(
            "No structure file at {}.\nRun the document indexer first to generate it.",
            structure_path.display()
        );
        return Ok(());
    }

    println!("Loading structure from {}...", structure_path.display());
    let mut file = structure::load_structure(&structure_path)?;
    structure::ensure_ids(&mut file.structure);
    let retriever = Retriever::new(&file.structure)?;

    let chat = ChatClient::new(&config)?;
    let log = TurnLog::new(&cli.log_dir);

    println!("\n{}", "=".repeat(50));
    println!("Pagelens Q&A ({})", config.model);
    println!("Document: {}", file.doc_name);
    println!("{}", "=".repeat(50));

    let stdin = io::stdin();
    loop {
        print!("\nAsk a question (or 'q' to quit): ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let question = line.trim();
        if matches!(question.to_ascii_lowercase().as_str(), "q" | "quit" | "exit") {
            break;
        }
        if question.is_empty() {
            continue;
        }

        println!("\nThinking (retrieving relevant pages)...");
        let retrieval = retriever.retrieve(&chat, question).await;
        println!("Identified relevant pages: {:?}", retrieval.pages);

        if retrieval.pages.is_empty() {
            println!("No relevant content found based on the document structure.");
            log.record(&RetrievalTurn {
                timestamp: Utc::now(),
                question: question.to_string(),
                mode: retrieval.mode,
                node_ids: retrieval.node_ids,
                sections: vec![],
                pages: vec![],
                context: String::new(),
                answer: String::new(),
                status: TurnStatus::NoPages,
            });
            continue;
        }

        println!("Reading content...");
        let context = match pdf::extract_pages(&pdf_path, &retrieval.pages) {
            Ok(context) => context,
            Err(err) => {
                tracing::warn!(code = err.code(), "text extraction failed: {err}");
                String::new()
            }
        };

        println!("Generating answer...");
        let answer = synthesizer::synthesize(&chat, question, &context).await;

        println!("\nAnswer:\n{answer}");
        println!("{}", "-".repeat(50));

        log.record(&RetrievalTurn {
            timestamp: Utc::now(),
            question: question.to_string(),
            mode: retrieval.mode,
            node_ids: retrieval.node_ids,
            sections: retrieval.sections.iter().map(|node| SectionRef::from_node(node)).collect(),
            pages: retrieval.pages,
            context,
            answer,
            status: TurnStatus::Ok,
        });
    }

    Ok(())
}

fn list_pdfs(dir: &Path) -> AppResult<Vec<String>> {
    let entries = std::fs::read_dir(dir)
        .map_err(|err| AppError::Io(format!("cannot read docs dir {dir:?}: {err}")))?;
    let mut pdfs = Vec::new();
    for entry in entries {
        let name = entry?.file_name().to_string_lossy().to_string();
        if name.to_ascii_lowercase().ends_with(".pdf") {
            pdfs.push(name);
        }
    }
    pdfs.sort();
    if pdfs.is_empty() {
        return Err(AppError::NotFound(format!("no PDF files in {dir:?}")));
    }
    Ok(pdfs)
}

fn select_document(pdfs: &[String]) -> AppResult<Option<String>> {
    println!("\nAvailable documents:");
    for (idx, name) in pdfs.iter().enumerate() {
        println!("{}. {name}", idx + 1);
    }
    let stdin = io::stdin();
    loop {
        print!("\nSelect a document by number (or 'q' to quit): ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let choice = line.trim();
        if matches!(choice.to_ascii_lowercase().as_str(), "q" | "quit" | "exit") {
            return Ok(None);
        }
        match choice.parse::<usize>() {
            Ok(number) if (1..=pdfs.len()).contains(&number) => {
                return Ok(Some(pdfs[number - 1].clone()))
            }
            _ => println!("Invalid selection. Please try again."),
        }
    }
}
