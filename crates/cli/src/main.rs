use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rag_studio_chunker::{join_pages, Chunker, Page, StrategyKind};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

mod options;

#[derive(Parser)]
#[command(name = "rag-chunk")]
#[command(about = "Split documents into retrieval chunks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chunk a text file or a JSON page list
    Chunk(ChunkArgs),

    /// List available strategies with their default options
    Strategies(StrategiesArgs),
}

#[derive(Args)]
struct ChunkArgs {
    /// Strategy name (character, paragraph, sentence, recursive, hierarchical, semantic)
    #[arg(short, long)]
    strategy: String,

    /// Plain text input file, or - for stdin
    #[arg(long, conflicts_with = "pages", required_unless_present = "pages")]
    text: Option<PathBuf>,

    /// JSON array of {"page_number", "text"} objects, or - for stdin
    #[arg(long)]
    pages: Option<PathBuf>,

    /// Strategy options file (JSON or TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override a single option, e.g. chunk_size=500 (repeatable)
    #[arg(short = 'o', long = "option", value_parser = options::parse_override)]
    overrides: Vec<(String, Value)>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct StrategiesArgs {
    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
struct StrategyInfo {
    name: &'static str,
    requires_embeddings: bool,
    defaults: Value,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Chunk(args) => run_chunk(args).await,
        Commands::Strategies(args) => run_strategies(&args),
    }
}

async fn run_chunk(args: ChunkArgs) -> Result<()> {
    let file_options = args
        .config
        .as_deref()
        .map(options::load_options_file)
        .transpose()?;
    let strategy_options = options::merge_options(file_options, args.overrides);

    // No embedding service is wired into the binary; semantic fails here
    let chunker = Chunker::from_options(&args.strategy, &strategy_options, None)
        .with_context(|| format!("Failed to build '{}' strategy", args.strategy))?;

    let report = match (&args.text, &args.pages) {
        (_, Some(path)) => {
            let raw = read_input(path)?;
            let pages: Vec<Page> = serde_json::from_str(&raw)
                .with_context(|| format!("Invalid page list in {}", path.display()))?;
            log::debug!("loaded {} pages", pages.len());
            let text = join_pages(&pages);
            chunker.run(&text, Some(&pages)).await?
        }
        (Some(path), None) => {
            let text = read_input(path)?;
            chunker.run(&text, None).await?
        }
        (None, None) => anyhow::bail!("Provide --text or --pages"),
    };

    print_json(&report, args.pretty)
}

fn run_strategies(args: &StrategiesArgs) -> Result<()> {
    let infos: Vec<StrategyInfo> = StrategyKind::ALL
        .into_iter()
        .map(|kind| StrategyInfo {
            name: kind.as_str(),
            requires_embeddings: kind.requires_embeddings(),
            defaults: Value::Object(kind.default_config()),
        })
        .collect();
    print_json(&infos, args.pretty)
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read input from stdin")?;
        return Ok(buffer);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    print_stdout(&output)
}

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}
