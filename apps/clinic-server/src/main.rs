use anyhow::{anyhow, Context, Result};
use api_ingress::ApiIngress;
use clap::{Parser, Subcommand};
use kvstore::{redact_credentials_in_url, KvStore, MemoryStore, RedisStore};
use modkit::{ModuleCtx, RestfulModule};
use patients::Patients;
use runtime::{AppConfig, AppConfigProvider, CliArgs, StoreConfig};
use sessions::Sessions;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

// Adapter to make AppConfigProvider implement modkit::ConfigProvider
struct ModkitConfigAdapter(Arc<AppConfigProvider>);

impl modkit::ConfigProvider for ModkitConfigAdapter {
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
        self.0.get_module_config(module_name)
    }
}

/// Clinic Server - patient records and sessions over a key-value store
#[derive(Parser)]
#[command(name = "clinic-server")]
#[command(about = "Clinic Server - patient records and sessions over a key-value store")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory store instead of Redis
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI args passed down to config/app
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    // Apply CLI overrides (port / verbosity)
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Clinic Server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(config, args).await,
    }
}

/// Reject store URLs the Redis client cannot use.
fn validate_store_url(cfg: &StoreConfig) -> Result<()> {
    let raw = cfg.url.trim();
    if raw.is_empty() {
        return Err(anyhow!("Store URL not configured"));
    }

    let url = Url::parse(raw).map_err(|e| {
        anyhow!(
            "Invalid store URL '{}': {}",
            redact_credentials_in_url(raw),
            e
        )
    })?;

    match url.scheme() {
        "redis" | "rediss" | "redis+unix" | "unix" => Ok(()),
        other => Err(anyhow!("Unsupported store type: {}", other)),
    }
}

async fn open_store(config: &AppConfig, args: &CliArgs) -> Result<Arc<dyn KvStore>> {
    if args.mock {
        tracing::info!("--mock given, using in-memory store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let Some(store_cfg) = config.store.as_ref() else {
        tracing::warn!("No store configuration found, using in-memory store");
        return Ok(Arc::new(MemoryStore::new()));
    };

    validate_store_url(store_cfg)?;
    let store = RedisStore::connect(store_cfg.url.trim())
        .await
        .context("Failed to connect to store")?;
    store.ping().await.context("Store did not answer PING")?;
    Ok(Arc::new(store))
}

/// Store handle plus each module's config section
fn module_ctx(config: &AppConfig, store: Arc<dyn KvStore>) -> ModuleCtx {
    let config_provider = Arc::new(ModkitConfigAdapter(Arc::new(AppConfigProvider::new(
        config.clone(),
    ))));
    ModuleCtx::new(store).with_config_provider(config_provider)
}

fn init_modules(ctx: &ModuleCtx) -> Result<Vec<Arc<dyn RestfulModule>>> {
    let sessions = Sessions::init(ctx).context("sessions init failed")?;
    let patients = Patients::init(ctx).context("patients init failed")?;
    Ok(vec![Arc::new(sessions), Arc::new(patients)])
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    tracing::info!("Initializing modules...");

    let store = open_store(&config, &args).await?;
    let ctx = module_ctx(&config, store);

    let modules = init_modules(&ctx)?;
    let ingress = ApiIngress::init(&ctx)?
        .with_timeout(Duration::from_secs(config.server.timeout_sec));
    let router = ingress.build_router(&modules)?;

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(e) = runtime::wait_for_shutdown().await {
                tracing::error!(error = %e, "Signal handler failed, shutting down");
            }
            cancel.cancel();
        });
    }

    ingress.serve(listener, router, cancel).await?;
    tracing::info!("Clinic Server stopped");
    Ok(())
}

async fn check_config(config: AppConfig, args: CliArgs) -> Result<()> {
    tracing::info!("Checking configuration...");

    if !args.mock {
        if let Some(store_cfg) = config.store.as_ref() {
            validate_store_url(store_cfg)?;
        }
    }

    // Module sections are validated by initializing against a throwaway store
    let ctx = module_ctx(&config, Arc::new(MemoryStore::new()));
    init_modules(&ctx)?;
    ApiIngress::init(&ctx)?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Server config:");
    println!("{}", config.to_yaml()?);

    Ok(())
}
