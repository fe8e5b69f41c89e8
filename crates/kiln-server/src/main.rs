use anyhow::Context;
use clap::Parser;
use kiln_config::KilnConfig;
use kiln_server::AppState;
use kiln_server::config_warnings::warn_unconfigured;

/// kiln asset desk server.
#[derive(Debug, Parser)]
#[command(name = "kiln", version, about = "kiln - game asset desk server")]
struct Cli {
    /// Interface to bind (overrides `server.host`).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides `server.port`).
    #[arg(short, long)]
    port: Option<u16>,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,

    /// Log at debug level.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("kiln error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let mut config = KilnConfig::load_with_dotenv().context("failed to load configuration")?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    warn_unconfigured(&config);
    config
        .validate_for_server()
        .context("configuration is incomplete")?;

    let state = AppState::new(config).context("failed to build application state")?;
    kiln_server::serve(state).await.context("server failed")
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("KILN_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
