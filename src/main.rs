//! Echoverse CLI binary entry point.

use echoverse::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();

    let result = match cli.command {
        Commands::Voices => {
            echoverse::cli::speak::handle_voices();
            Ok(())
        }
        Commands::Speak(args) => echoverse::cli::speak::handle_speak(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
