use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use materials_explorer::routes::create_router;
use materials_explorer::state::create_state;
use materials_explorer_configuration::environment::ProcessEnvironment;
use materials_explorer_configuration::{
    make_runtime_configuration, parse_configuration, write_parsed_configuration,
    ParsedConfiguration,
};

#[derive(Parser)]
#[command(name = "materials-explorer", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the query catalog over HTTP.
    Serve(ServeArgs),
    /// Write a default configuration and its JSON schema.
    Initialize {
        #[arg(long, env = "MATERIALS_EXPLORER_CONFIGURATION", default_value = ".")]
        configuration: PathBuf,
    },
}

#[derive(Args)]
struct ServeArgs {
    #[arg(long, env = "MATERIALS_EXPLORER_CONFIGURATION", default_value = ".")]
    configuration: PathBuf,
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[tokio::main]
pub async fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Initialize { configuration } => initialize(configuration).await,
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error:#}");
            eprintln!("{error:#}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` picks the filter, defaulting to `info`. Logs go to stderr.
fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    init_logging(args.log_format);

    let parsed = parse_configuration(&args.configuration)
        .await
        .context("unable to read the configuration")?;
    let configuration = make_runtime_configuration(parsed, ProcessEnvironment)
        .context("invalid configuration")?;
    tracing::info!(
        backend = ?configuration.backend,
        queries = configuration.catalog.len(),
        bridge = configuration.bridge.is_some(),
        "configuration loaded"
    );

    let mut metrics_registry = prometheus::Registry::new();
    let state = create_state(configuration, &mut metrics_registry)
        .await
        .context("unable to initialize the server")?;

    let address = SocketAddr::new(args.host, args.port);
    tracing::info!(%address, "starting server");

    axum::Server::bind(&address)
        .serve(create_router(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn initialize(configuration_dir: PathBuf) -> anyhow::Result<()> {
    write_parsed_configuration(&ParsedConfiguration::initial(), &configuration_dir)
        .await
        .with_context(|| format!("unable to write to {}", configuration_dir.display()))?;
    println!(
        "wrote a default configuration to {}",
        configuration_dir.display()
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %error, "unable to listen for shutdown signals");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
