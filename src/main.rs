//! Prefix-Complete: local-first autocomplete
//!
//! This is the main entry point for the application.

use anyhow::Result;
use prefix_complete::{
    autocomplete::{get_backend, CompletionService},
    config::{self, Settings},
    controller::{ConsoleDisplay, InputEvent, InteractionController},
    history::SearchHistory,
    index::{self, PrefixIndex},
    metrics::Metrics,
    network::HttpClient,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Parsed command line
struct Args {
    config: Option<PathBuf>,
    interactive: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let Some(args) = parse_args()? else {
        return Ok(());
    };

    let settings = config::load(args.config.as_deref())?;
    init_logging(&settings, args.interactive);

    info!("Starting Prefix-Complete v{}", prefix_complete::VERSION);
    info!("Loaded configuration for instance: {}", settings.general.instance_name);

    let service = build_service(&settings)?;

    if args.interactive {
        run_interactive(&settings, service).await
    } else {
        serve(settings, service).await
    }
}

fn init_logging(settings: &Settings, interactive: bool) {
    let default_level = if settings.general.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    // Keep stdout for suggestion rows in interactive mode
    if interactive {
        builder.with_writer(std::io::stderr).init();
    } else {
        builder.init();
    }
}

/// Seed the index and wire it to the configured backend
fn build_service(settings: &Settings) -> Result<CompletionService> {
    let index = PrefixIndex::with_words(&settings.index.seed_words);
    info!("Seeded index with {} words", index.len());

    let client = HttpClient::with_settings(&settings.outgoing)?;
    let backend = get_backend(&settings.autocomplete.backend, client, &settings.autocomplete)?;
    info!("Using {} lookup backend", backend.name());

    Ok(CompletionService::new(
        index::shared(index),
        backend,
        Arc::new(Metrics::new()),
    ))
}

async fn serve(settings: Settings, service: CompletionService) -> Result<()> {
    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    let state = AppState::new(settings, service)?;
    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Read queries from stdin, one per line; `!word` accepts a suggestion
async fn run_interactive(settings: &Settings, service: CompletionService) -> Result<()> {
    let (tx, rx) = mpsc::channel(32);

    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let event = match line.strip_prefix('!') {
                Some(choice) => InputEvent::Accept(choice.to_string()),
                None => InputEvent::Query(line),
            };
            if tx.send(event).await.is_err() {
                break;
            }
        }
        Ok::<_, std::io::Error>(())
    });

    let controller = InteractionController::new(
        service,
        SearchHistory::new(settings.autocomplete.history_size),
        ConsoleDisplay::new(std::io::stdout()),
    )
    .with_debounce(Duration::from_millis(settings.autocomplete.debounce_ms));

    controller.run(rx).await;
    reader.await??;

    Ok(())
}

/// Returns `None` when the invocation only asked for help or version
fn parse_args() -> Result<Option<Args>> {
    let mut args = Args {
        config: None,
        interactive: false,
    };

    let mut argv = std::env::args().skip(1);
    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "-c" | "--config" => {
                let path = argv
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("{} requires a file argument", arg))?;
                args.config = Some(PathBuf::from(path));
            }
            "-i" | "--interactive" => args.interactive = true,
            "-h" | "--help" => {
                print_usage();
                return Ok(None);
            }
            "-V" | "--version" => {
                println!("prefix-complete {}", prefix_complete::VERSION);
                return Ok(None);
            }
            other => anyhow::bail!("Unknown argument: {} (try --help)", other),
        }
    }

    Ok(Some(args))
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
Prefix-Complete v{}
Local-first autocomplete with an external lookup fallback

USAGE:
    prefix-complete [OPTIONS]

OPTIONS:
    -c, --config <FILE>    Path to configuration file
    -i, --interactive      Read queries from stdin instead of serving HTTP
    -h, --help             Print help information
    -V, --version          Print version information

ENVIRONMENT VARIABLES:
    PREFIX_COMPLETE_SETTINGS_PATH  Path to settings.yml
    PREFIX_COMPLETE_DEBUG          Enable debug logging (true/false)
    PREFIX_COMPLETE_PORT           Server port
    PREFIX_COMPLETE_BIND_ADDRESS   Bind address
    PREFIX_COMPLETE_BACKEND        Lookup backend (wikipedia, duckduckgo, brave)
    PREFIX_COMPLETE_DEBOUNCE_MS    Input quiet period in milliseconds
    RUST_LOG                       Log filter
"#,
        prefix_complete::VERSION
    );
}
