mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "wellness-kb")]
#[command(about = "Semantic knowledge base for sexual-wellness questions", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    // ===== MCP Server (also default) =====
    /// Start MCP server on stdio
    #[cfg(feature = "mcp")]
    Mcp {
        #[arg(long, help = "Show MCP client configuration instructions")]
        install: bool,
    },

    // ===== Knowledge Base =====
    /// Write a default .wellness-kb.json config file
    Init {
        #[arg(long, help = "Overwrite an existing config")]
        force: bool,
    },
    /// Answer a question from the knowledge base
    Query {
        text: String,
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// Raw nearest-neighbour search with scores
    Search {
        text: String,
        #[arg(long, short, default_value = "3", help = "Limit results")]
        limit: usize,
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// Add a question/answer pair
    Add {
        #[arg(long, short)]
        question: String,
        #[arg(long, short)]
        answer: String,
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// Show document count, embedder and storage paths
    Status {
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// Discard the stored corpus and reseed it from the built-in documents
    Rebuild {
        #[arg(long, help = "JSON output")]
        json: bool,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        // Default: run MCP server
        None => {
            #[cfg(feature = "mcp")]
            {
                run_mcp_server()
            }
            #[cfg(not(feature = "mcp"))]
            {
                eprintln!("MCP feature not enabled. Build with --features mcp");
                std::process::exit(1);
            }
        }

        #[cfg(feature = "mcp")]
        Some(Commands::Mcp { install }) => {
            if install {
                print_mcp_install_instructions()
            } else {
                run_mcp_server()
            }
        }

        Some(Commands::Init { force }) => commands::init::run(force),
        Some(Commands::Query { text, json }) => commands::query::run(&text, json),
        Some(Commands::Search { text, limit, json }) => commands::search::run(&text, limit, json),
        Some(Commands::Add {
            question,
            answer,
            json,
        }) => commands::add::run(&question, &answer, json),
        Some(Commands::Status { json }) => commands::status::run(json),
        Some(Commands::Rebuild { json }) => commands::rebuild::run(json),
    }
}

#[cfg(feature = "mcp")]
fn run_mcp_server() -> anyhow::Result<()> {
    use std::sync::Arc;
    use wellness_kb::core::paths::KbPaths;
    use wellness_kb::KnowledgeMatcher;

    let paths = KbPaths::new()?;
    let matcher = Arc::new(KnowledgeMatcher::open(&paths)?);
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(wellness_kb::mcp::run_mcp_server(matcher))
}

#[cfg(feature = "mcp")]
fn print_mcp_install_instructions() -> anyhow::Result<()> {
    use colored::Colorize;
    use wellness_kb::core::paths::{get_root, ROOT_PATH_ENV};

    let root = get_root()?.to_string_lossy().to_string();

    println!("{}", "Wellness KB MCP Server Installation Guide".bold().cyan());
    println!();
    println!("{}", "Root directory priority:".bold());
    println!("  1. {} environment variable", ROOT_PATH_ENV.yellow());
    println!("  2. Current working directory (fallback)");
    println!();
    println!("{}", "MCP client configuration (.mcp.json):".dimmed());
    println!(
        r#"{{
  "mcpServers": {{
    "wellness-kb": {{
      "command": "wellness-kb",
      "args": ["mcp"],
      "env": {{
        "{}": "{}"
      }}
    }}
  }}
}}"#,
        ROOT_PATH_ENV, root
    );
    println!();
    println!("{}", "Available tools:".bold());
    println!(
        "  • {} - Answer a question with disclaimer and follow-ups",
        "wellness_query".green()
    );
    println!(
        "  • {} - Raw nearest-neighbour search",
        "wellness_search".green()
    );
    println!(
        "  • {} - Add a question/answer pair",
        "wellness_add_knowledge".green()
    );
    println!("  • {} - Knowledge base summary", "wellness_status".green());

    Ok(())
}
