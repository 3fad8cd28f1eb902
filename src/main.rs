use clap::{Parser, Subcommand};
use image_probe::config::{self, HandlerMode, ServerConfig};
use image_probe::imaging::handler_for;
use image_probe::inspect::{InspectOutcome, inspect_file};
use image_probe::server;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Flags that override the listen and handler settings from config.
#[derive(clap::Args, Clone, Default)]
struct ServeArgs {
    /// Interface to bind (overrides server.host)
    #[arg(long)]
    host: Option<String>,
    /// Port to listen on (overrides server.port and PORT)
    #[arg(long)]
    port: Option<u16>,
    /// What POST /predict returns (overrides handler.mode)
    #[arg(long, value_enum)]
    mode: Option<HandlerMode>,
    /// Disable cross-origin headers
    #[arg(long)]
    no_cors: bool,
}

#[derive(clap::Args, Clone)]
struct InspectArgs {
    /// Image file to run through the handler
    file: PathBuf,
    /// Handler to use (defaults to handler.mode from config)
    #[arg(long, value_enum)]
    mode: Option<HandlerMode>,
    /// Where to write the grayscale PNG (default: <stem>-gray.png next to the input)
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "image-probe")]
#[command(version)]
#[command(about = "HTTP service that inspects uploaded images or returns them in grayscale")]
#[command(long_about = "\
HTTP service that inspects uploaded images or returns them in grayscale

Endpoints:

  GET  /         HTML page confirming the server is running
  POST /predict  multipart upload with a file field named `image`

What /predict returns depends on handler.mode:

  metadata   JSON {prediction, image_size, image_mode, message}
  grayscale  the image converted to grayscale, as image/png

Configuration precedence (lowest to highest):
  stock defaults -> --config file -> PORT env var -> CLI flags

Run 'image-probe gen-config' to print a documented config file.")]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve(ServeArgs),
    /// Run the image handler on a local file, without a server
    Inspect(InspectArgs),
    /// Print a stock config file with all options documented
    GenConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => {
            let mut config = load(cli.config.as_deref())?;
            apply_serve_args(&mut config, args);
            server::serve(config).await?;
        }
        Command::Inspect(args) => {
            let config = load(cli.config.as_deref())?;
            inspect(&config, args)?;
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise `info`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .init();
}

fn load(file: Option<&Path>) -> Result<ServerConfig, config::ConfigError> {
    config::load_config(file, |key| std::env::var(key).ok())
}

fn apply_serve_args(config: &mut ServerConfig, args: ServeArgs) {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(mode) = args.mode {
        config.handler.mode = mode;
    }
    if args.no_cors {
        config.cors.enabled = false;
    }
}

fn inspect(config: &ServerConfig, args: InspectArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mode = args.mode.unwrap_or(config.handler.mode);
    let handler = handler_for(mode, config.decode_limits());

    match inspect_file(handler.as_ref(), &args.file, args.output.as_deref())? {
        InspectOutcome::Prediction(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        InspectOutcome::WrotePng { path, bytes } => {
            println!("{} → {} ({bytes} bytes)", args.file.display(), path.display());
        }
    }
    Ok(())
}
