//! # Lantern CLI Entry Point
//!
//! Main binary for the lantern embedded-web toolkit.
//!
//! ## Usage
//!
//! ```bash
//! # Serve a document root over local HTTP (auto-selected port)
//! lantern serve -r ./site
//!
//! # Serve on a fixed port
//! lantern serve -r ./site -p 8080
//!
//! # Run a page script headlessly with the bridge attached
//! lantern run -s demos/page.js
//! ```
//!
//! `run` evaluates the script in the headless surface with the sample
//! handlers registered, answers all bridge traffic, and prints whatever the
//! script left in `globalThis.result` as raw JSON, suitable for piping
//! into `jq` and friends, which is also why logging stays disabled for it.

mod handlers;

use anyhow::{Context, Result};
use argh::FromArgs;
use lantern_bridge::{Bridge, BoaSurface, ScriptHost};
use lantern_server::{ServerConfig, StaticServer};

/// Lantern - embedded web surface toolkit
#[derive(FromArgs)]
struct Cli {
    #[argh(subcommand)]
    command: Commands,
}

/// Available subcommands: the local asset server and the headless runner.
#[derive(FromArgs)]
#[argh(subcommand)]
enum Commands {
    Serve(ServeArgs),
    Run(RunArgs),
}

/// serve a document root over local HTTP
#[derive(FromArgs)]
#[argh(subcommand, name = "serve")]
struct ServeArgs {
    /// directory to serve files from
    #[argh(option, short = 'r')]
    root: String,

    /// port to bind; 0 (the default) probes for an available one
    #[argh(option, short = 'p', default = "0")]
    port: u16,
}

/// run a page script headlessly with the bridge attached
#[derive(FromArgs)]
#[argh(subcommand, name = "run")]
struct RunArgs {
    /// path to the JavaScript file to evaluate
    #[argh(option, short = 's')]
    script: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli: Cli = argh::from_env();

    // Initialize tracing only for serve; run keeps stdout clean for piping.
    if matches!(cli.command, Commands::Serve(_)) {
        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    match cli.command {
        Commands::Serve(args) => run_serve(args).await,
        Commands::Run(args) => run_page(args),
    }
}

/// Executes the `serve` subcommand: bind, log the local URL, serve forever.
async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("serving {} over local HTTP", args.root);

    let config = ServerConfig::new(&args.root).with_port(args.port);
    let server = StaticServer::bind(config).await?;
    let addr = server.local_addr()?;
    tracing::info!("content available at http://127.0.0.1:{}/", addr.port());

    server.run().await;
    Ok(())
}

/// Executes the `run` subcommand.
///
/// Attaches the bridge (sample handlers) to a fresh headless surface,
/// evaluates the page script, answers bridge traffic until the surface is
/// quiet, then prints `globalThis.result` as raw JSON.
fn run_page(args: RunArgs) -> Result<()> {
    let source = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to load script {}", args.script))?;

    let bridge = Bridge::new(handlers::sample_registry());
    let mut surface = BoaSurface::new()?;
    bridge.attach(&mut surface)?;

    surface.eval(&source)?;
    bridge.pump(&mut surface);

    let result =
        surface.eval_value("globalThis.result === undefined ? null : globalThis.result")?;
    println!("{}", serde_json::to_string(&result)?);

    Ok(())
}
