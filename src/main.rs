//! Interactive terminal front end for the retail assistant

use clap::Parser;
use retail_assistant::agent::RetailAgent;
use retail_assistant::catalog::Catalog;
use retail_assistant::config::Cli;
use retail_assistant::shell::Shell;
use std::process::ExitCode;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    // Populate the environment before clap reads its env fallbacks
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_logging(cli.log_json);

    // One conversation, one request at a time
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("An error occurred during setup: {e}");
            return ExitCode::FAILURE;
        }
    };

    let code = runtime.block_on(run(cli));

    // A pending stdin read would otherwise hold the blocking pool open
    runtime.shutdown_background();
    code
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "retail_assistant=info".into());

    // Logs go to stderr so they don't interleave with the chat transcript
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

async fn run(cli: Cli) -> ExitCode {
    let agent = match cli
        .into_config()
        .and_then(|config| RetailAgent::from_config(&config, Catalog::electronics_store()))
    {
        Ok(agent) => agent,
        Err(e) => {
            eprintln!("An error occurred during setup: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        model = %agent.model_id(),
        products = agent.catalog().len(),
        "Retail chat agent initialized"
    );

    let shell = Shell::new(
        &agent,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    );

    match shell.run(interrupt()).await {
        Ok(exit) => {
            tracing::info!(?exit, "Session ended");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Terminal session failed");
            ExitCode::FAILURE
        }
    }
}

/// Resolves on Ctrl-C. If the handler can't be installed, never resolves.
async fn interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
