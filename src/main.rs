use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod server;

use config::{AppState, Config, Overrides};
use server::SignalHandler;

/// Diagnostic message sink: accepts POST bodies on /sink and appends
/// them, one line per message, to a file or standard output
#[derive(Parser, Debug)]
#[command(name = "diag-sink", version, about)]
struct Args {
    /// Config file (default is $HOME/.diag-sink with any supported extension)
    #[arg(short = 'f', long)]
    config: Option<PathBuf>,

    /// [host]:port to listen for; it supports HTTP only!
    #[arg(short, long)]
    listen: Option<String>,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(short = 'L', long)]
    level: Option<String>,

    /// Output file; it will use stdout if equals -
    #[arg(short, long)]
    out: Option<String>,
}

impl From<Args> for Overrides {
    fn from(args: Args) -> Self {
        Self {
            config_file: args.config,
            listen: args.listen,
            level: args.level,
            out: args.out,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let cfg = Config::load(args.into())?;
    logger::init(&cfg)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;

    // A bind failure is fatal; report it to the operator before exit
    let listener = match server::bind(addr) {
        Ok(listener) => listener,
        Err(e) => {
            logger::log_bind_failed(&addr, &e);
            return Err(e.into());
        }
    };

    let state = Arc::new(AppState::new(&cfg));
    let signals = Arc::new(SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals));

    logger::log_server_start(&addr, &cfg);
    server::start_server_loop(listener, state, &signals).await;
    logger::log_server_stopped();

    Ok(())
}
