use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::fs;
use std::io::{self, BufRead, IsTerminal};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use trigrep::output::{OutputFormat, print_results};
use trigrep::{Index, IndexBuilder, IndexConfig, SearchQueryExecutor};

#[derive(Parser)]
#[command(name = "trigrep")]
#[command(about = "Index a directory tree in memory and search it for literal substrings")]
struct Cli {
    /// Directory (or single file) to index
    path: PathBuf,

    /// Queries to run; read one per line from stdin when omitted
    query: Vec<String>,

    /// JSON file with indexer settings (flags take precedence)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Worker threads for indexing (0 = one per core)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Skip hidden files and directories
    #[arg(long)]
    no_hidden: bool,

    /// Honor .gitignore and .ignore files
    #[arg(long)]
    respect_ignore: bool,

    /// Follow symbolic links
    #[arg(short = 'L', long)]
    follow_links: bool,

    /// Skip files larger than this many bytes
    #[arg(long)]
    max_file_size: Option<u64>,

    /// Do not draw the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Cancel indexing after this many seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Print results as JSON lines
    #[arg(long)]
    json: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let builder = IndexBuilder::with_config(&cli.path, config);

    if let Some(secs) = cli.timeout {
        let token = builder.cancel_token();
        thread::spawn(move || {
            thread::sleep(Duration::from_secs(secs));
            token.cancel();
        });
    }

    let index = builder
        .build()
        .with_context(|| format!("Failed to index {}", cli.path.display()))?;

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Plain {
            color: !cli.no_color && io::stdout().is_terminal(),
        }
    };

    if cli.query.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("Failed to read query from stdin")?;
            if !line.is_empty() {
                run_query(&index, &line, format)?;
            }
        }
    } else {
        for query in &cli.query {
            run_query(&index, query, format)?;
        }
    }

    Ok(())
}

fn run_query(index: &Index, query: &str, format: OutputFormat) -> Result<()> {
    match SearchQueryExecutor::new(index).search(query) {
        Ok(results) => print_results(&results, format).context("Failed to write results"),
        Err(err) => {
            // A bad query should not stop the ones after it
            eprintln!("{}", err);
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> Result<IndexConfig> {
    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => IndexConfig::default(),
    };

    if let Some(threads) = cli.threads {
        config.threads = threads;
    }
    if let Some(max) = cli.max_file_size {
        config.max_file_size = max;
    }
    if cli.no_hidden {
        config.include_hidden = false;
    }
    if cli.respect_ignore {
        config.respect_ignore_files = true;
    }
    if cli.follow_links {
        config.follow_links = true;
    }
    if cli.no_progress {
        config.progress = false;
    }
    Ok(config)
}

fn read_config(path: &Path) -> Result<IndexConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
