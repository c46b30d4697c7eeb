use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tokenbind::api;
use tokenbind::models::{AppConfig, Document};
use tokenbind::server;

#[derive(Parser)]
#[command(name = "tokenbind")]
#[command(about = "Color token matching and binding server for design documents")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Scan a document once and print the result as JSON
    Scan {
        /// Collection name to match against
        #[arg(short, long)]
        collection: String,

        /// Mode name, e.g. "Light" or "Dark"
        #[arg(short, long, default_value = "Light")]
        mode: String,

        /// Restrict matching to the configured group filters
        #[arg(short, long)]
        group_filters: bool,

        /// Document YAML file (defaults to DOCUMENT_FILE)
        #[arg(short, long)]
        document: Option<PathBuf>,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tokenbind API",
        description = "Color token matching and binding for design documents",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_collections,
        api::handle_scan,
        api::handle_candidates,
        api::handle_suggestions,
        api::handle_apply,
        api::handle_apply_color,
        api::handle_select,
    ),
    components(schemas(
        api::CollectionsResponse,
        api::ScanRequest,
        api::ScanResponse,
        api::CandidatesResponse,
        api::SuggestionsResponse,
        api::ApplyColorRequest,
        api::OutcomeResponse,
        api::SelectRequest,
        api::SelectResponse,
    )),
    tags(
        (name = "Catalog", description = "Collection discovery"),
        (name = "Matching", description = "Scanning and candidate ranking"),
        (name = "Binding", description = "Applying catalog entries onto elements"),
        (name = "Elements", description = "Element selection")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Scan {
            collection,
            mode,
            group_filters,
            document,
        }) => run_scan_command(&collection, &mode, group_filters, document).await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Scan a document once and print the result (no server needed)
async fn run_scan_command(
    collection: &str,
    mode: &str,
    group_filters: bool,
    document_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tokenbind=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let document_path = document_path
        .or_else(|| std::env::var("DOCUMENT_FILE").ok().map(PathBuf::from))
        .ok_or_else(|| anyhow::anyhow!("No document given; pass --document or set DOCUMENT_FILE"))?;

    let config_file = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
    let config = Arc::new(AppConfig::load(config_file.as_deref()));
    let document = Document::load(&document_path)?;

    let state = server::create_app_state(document, config);
    let result = state.orchestrator.scan(collection, mode, group_filters).await;
    let response = api::ScanResponse::from_result(&result);

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let document_file = std::env::var("DOCUMENT_FILE").ok();

    println!("Tokenbind v{VERSION}");
    println!("Color token matching and binding server for design documents\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR     = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE   = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  DOCUMENT_FILE = {}",
        document_file.as_deref().unwrap_or("(not set)")
    );

    println!("\nCommands:");
    println!("  tokenbind serve   Start the HTTP server");
    println!("  tokenbind scan    Scan a document once and print JSON");
    println!("\nRun 'tokenbind --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tokenbind=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let config_file = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
    let document_file = std::env::var("DOCUMENT_FILE").ok().map(PathBuf::from);

    let config = Arc::new(AppConfig::load(config_file.as_deref()));

    let document = match document_file {
        Some(path) => Document::load(&path)?,
        None => {
            tracing::warn!("DOCUMENT_FILE not set, serving an empty document");
            Document::default()
        }
    };

    let state = server::create_app_state(document, config);

    // Build router: shared API routes plus OpenAPI documentation
    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Tokenbind server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
