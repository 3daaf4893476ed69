use std::future::Future;
use std::pin::Pin;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use futures_util::future;
use herodraft_lib::herodraft::{store, RoundCoordinator};
use herodraft_lib::utils::{print_err, unwrap_or_def_verbose};
use herodraft_lib::{api, logging};
use log::{error, info};
use tokio::signal;

async fn terminate_on_signal() -> Result<()> {
    let interrupt_signal: Pin<Box<dyn Future<Output = _>>> = Box::pin(async {
        signal::unix::signal(signal::unix::SignalKind::interrupt())
            .context("Failed to register terminate signal handlers!")?
            .recv()
            .await;
        Ok(())
    });
    let terminate_signal = Box::pin(async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to register terminate signal handlers!")?
            .recv()
            .await;
        Ok(())
    });
    future::select_all([interrupt_signal, terminate_signal])
        .await
        .0
}

#[tokio::main]
async fn main() -> ExitCode {
    let _logger = logging::init();
    let config = unwrap_or_def_verbose(store::load_config());
    let catalog = match store::load_catalog(&config.hero_data_file) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Cannot start without hero data");
            print_err(&e);
            return ExitCode::FAILURE;
        }
    };
    let coordinator = Arc::new(RoundCoordinator::new(catalog));
    tokio::spawn(api::serve(config, coordinator));

    info!("Running");
    let _ = terminate_on_signal().await.inspect_err(print_err);
    info!("Terminating.");
    ExitCode::SUCCESS
}
