use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use repo_search::{
    ErrorMessage, HttpSearchFetcher, PipelineConfig, PipelineController, QueryUrlBuilder,
    SearchFetcher, SearchResult, TokioClock,
    config::DEFAULT_DEBOUNCE_MS,
    format_search_item, format_summary,
    interactive::InteractiveSearch,
    profiling,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "repo-search",
    version,
    about = "Search GitHub repositories from the terminal",
    long_about = None
)]
struct Cli {
    /// Search query (GitHub repository search syntax)
    #[arg(required_unless_present = "interactive")]
    query: Option<String>,

    /// Interactive search-as-you-type mode
    #[arg(short = 'i', long)]
    interactive: bool,

    /// Maximum number of results to print
    #[arg(short = 'n', long, default_value = "30")]
    max_results: usize,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Quiet period before a query is searched, in milliseconds
    #[arg(long, env = "REPO_SEARCH_DEBOUNCE_MS", default_value_t = DEFAULT_DEBOUNCE_MS)]
    debounce_ms: u64,

    /// API token sent as a bearer credential
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, hide = true)]
    token: Option<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Append diagnostics to this file in interactive mode
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    JsonL,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = PipelineConfig::default()
        .with_debounce_ms(cli.debounce_ms)
        .with_token(cli.token.clone());

    if cli.interactive {
        if let Some(path) = &cli.log_file {
            profiling::init_file_tracing(cli.verbose, path)?;
        }
        run_interactive(config, cli.query.unwrap_or_default()).await?;
        return Ok(ExitCode::SUCCESS);
    }

    profiling::init_tracing(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let query = cli.query.clone().unwrap_or_default();
    run_once(&cli, &config, &query).await
}

async fn run_interactive(config: PipelineConfig, initial_query: String) -> Result<()> {
    let fetcher = HttpSearchFetcher::new(&config).context("Failed to build HTTP client")?;
    let controller = PipelineController::spawn(&config, fetcher, Arc::new(TokioClock));

    // The terminal loop blocks, so keep it off the runtime's worker threads
    let (result, controller) = tokio::task::spawn_blocking(move || {
        let mut interactive = InteractiveSearch::new(controller, &initial_query);
        let result = interactive.run();
        (result, interactive.into_controller())
    })
    .await
    .context("Interactive UI thread panicked")?;

    controller.shutdown().await;
    result
}

async fn run_once(cli: &Cli, config: &PipelineConfig, query: &str) -> Result<ExitCode> {
    let builder = QueryUrlBuilder::from_config(config);
    let request = match builder.build(query) {
        Ok(Some(request)) => request,
        Ok(None) => bail!("Query must not be empty (use --interactive to type one)"),
        Err(e) => {
            eprintln!("{}", ErrorMessage::from(&e).text);
            return Ok(ExitCode::FAILURE);
        }
    };

    if cli.verbose {
        eprintln!("Requesting: {}", request.url());
    }

    let fetcher = HttpSearchFetcher::new(config).context("Failed to build HTTP client")?;
    let result = match fetcher.fetch(request).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{}", ErrorMessage::from(&e).text);
            return Ok(ExitCode::FAILURE);
        }
    };

    print_results(&result, cli)?;
    Ok(ExitCode::SUCCESS)
}

fn print_results(result: &SearchResult, cli: &Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let shown = result.items.len().min(cli.max_results);

    match cli.format {
        OutputFormat::Text => {
            if result.items.is_empty() {
                writeln!(&mut handle, "No results found.")?;
            } else {
                for item in &result.items[..shown] {
                    writeln!(&mut handle, "{}", format_search_item(item, !cli.no_color))?;
                }
                writeln!(&mut handle)?;
                writeln!(&mut handle, "{}", format_summary(result, shown))?;
            }
        }
        OutputFormat::Json => {
            let truncated = SearchResult {
                items: result.items[..shown].to_vec(),
                ..result.clone()
            };
            serde_json::to_writer_pretty(&mut handle, &truncated)?;
            writeln!(&mut handle)?;
        }
        OutputFormat::JsonL => {
            for item in &result.items[..shown] {
                serde_json::to_writer(&mut handle, item)?;
                writeln!(&mut handle)?;
            }
        }
    }
    Ok(())
}
