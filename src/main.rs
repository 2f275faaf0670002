use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use careline::config;
use careline::triage::{DefaultTriageEngine, KnowledgeBase, TriageEngine};

#[derive(Parser)]
#[command(
    name = "careline",
    about = "Rule-based symptom triage chat",
    version
)]
struct Cli {
    /// Path to a knowledge base JSON file (defaults to the built-in table)
    #[arg(long)]
    knowledge: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let cli = Cli::parse();
    let knowledge = load_knowledge(cli.knowledge);
    let engine = DefaultTriageEngine::new(knowledge);

    let session_id = match engine.start_session() {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Could not start session: {e}");
            std::process::exit(1);
        }
    };

    println!(
        "{} v{} — describe your symptoms (empty line or Ctrl-D to quit).",
        config::APP_NAME,
        config::APP_VERSION,
    );

    let stdin = io::stdin();
    loop {
        print!("you> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Failed to read input: {e}");
                break;
            }
        }

        let text = line.trim();
        if text.is_empty() {
            break;
        }

        match engine.handle_message(&session_id, text) {
            Ok(reply) => println!("\n{}\n", reply.message),
            Err(e) => {
                eprintln!("Turn failed: {e}");
                break;
            }
        }
    }

    let _ = engine.end_session(&session_id);
}

/// Pick the knowledge base: an explicit --knowledge file is authoritative,
/// then the per-user override file, then the built-in table.
fn load_knowledge(explicit: Option<PathBuf>) -> KnowledgeBase {
    if let Some(path) = explicit {
        return KnowledgeBase::load(&path).unwrap_or_else(|e| {
            eprintln!("Could not load knowledge base: {e}");
            std::process::exit(1);
        });
    }

    let override_path = config::knowledge_override_path();
    if override_path.exists() {
        match KnowledgeBase::load(&override_path) {
            Ok(kb) => {
                tracing::info!(path = %override_path.display(), "Loaded knowledge override");
                return kb;
            }
            Err(e) => {
                tracing::warn!(
                    path = %override_path.display(),
                    error = %e,
                    "Ignoring unreadable knowledge override"
                );
            }
        }
    }

    KnowledgeBase::builtin()
}
