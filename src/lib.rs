pub mod commands;
pub mod modules;
pub mod shared;

use anyhow::Context;
use clap::Parser;
use commands::{dispatch, error_message, AppState, Cli};
use shared::errors::AppError;
use shared::utils::{init_logger, LogContext};
use shared::AppConfig;
use tokio_util::sync::CancellationToken;

/// Entry point of the `course-authoring` binary
pub fn run() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let code = match execute(cli) {
        Ok(()) => 0,
        Err(err) => match err.downcast_ref::<AppError>() {
            Some(app_err) => {
                LogContext::error_with_context(app_err, "Command failed");
                eprintln!("Error: {}", error_message(app_err));
                app_err.exit_code()
            }
            None => {
                eprintln!("Error: {:#}", err);
                1
            }
        },
    };
    std::process::exit(code);
}

fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let state = AppState::new(config).context("Failed to initialize services")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;

    let json = cli.json;
    let output = runtime.block_on(async {
        let cancel = CancellationToken::new();
        let ctrl_c_cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::info!("Interrupted, stopping");
                ctrl_c_cancel.cancel();
            }
        });

        dispatch(cli.command, &state, &cancel).await
    });
    log::debug!("Query cache: {:?}", state.cache.stats());
    let output = output?;

    println!("{}", output.render(json));
    Ok(())
}
