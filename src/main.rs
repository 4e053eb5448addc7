// SPDX-License-Identifier: MPL-2.0
//! `bread-demo`: runs a scripted toast sequence and logs every snapshot.
//!
//! ```text
//! bread-demo [--config <path>] [--stacking | --single]
//! ```
//!
//! Set `RUST_LOG=bread=trace` to follow the store's timer decisions.

use bread::config::{self, ToastConfig};
use bread::notifications::{Detail, ErrorMessage, Message, PromiseMessages, ToastState, Toaster};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;
use tracing_subscriber::EnvFilter;

const SETTLE_TIMEOUT: Duration = Duration::from_secs(30);

fn main() -> bread::error::Result<()> {
    init_tracing();

    let mut args = pico_args::Arguments::from_env();
    let config_path: Option<PathBuf> = match args.opt_value_from_str("--config") {
        Ok(path) => path,
        Err(err) => {
            eprintln!("bread-demo: {err}");
            std::process::exit(2);
        }
    };
    let stacking = if args.contains("--single") {
        Some(false)
    } else if args.contains("--stacking") {
        Some(true)
    } else {
        None
    };

    let mut config = match config_path {
        Some(path) => config::load_from_path(&path)?,
        None => config::load(),
    };
    if let Some(stacking) = stacking {
        config = config.stacking(stacking);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_demo(config));
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn log_snapshot(state: &ToastState) {
    let toasts: Vec<String> = state
        .visible_toasts()
        .iter()
        .map(|toast| {
            let marker = if toast.is_exiting() { " (exiting)" } else { "" };
            format!("{:?} {:?}{marker}", toast.toast_type, toast.title)
        })
        .collect();
    info!(active = state.active_count(), toasts = ?toasts, "snapshot");
}

async fn run_demo(config: ToastConfig) {
    let toaster = Toaster::new();
    let _scope = toaster.provide(Some(&config));
    let _subscription = toaster.subscribe(log_snapshot).guard();
    let driver = toaster.spawn_driver();

    toaster.success("Saved", "Your changes have been saved", None);
    toaster.info("Heads up", Detail::None, None);
    sleep(Duration::from_millis(500)).await;

    let upload = toaster
        .promise(
            async {
                sleep(Duration::from_secs(1)).await;
                Ok::<_, String>(3)
            },
            PromiseMessages::new(
                "Uploading files",
                Message::new("Upload complete").description("3 files sent"),
                ErrorMessage::from_fn(|e: &String| Message::new("Upload failed").description(e.clone())),
            ),
        )
        .await;
    info!(success = upload.is_success(), "upload settled");

    let sync = toaster
        .promise(
            async {
                sleep(Duration::from_millis(800)).await;
                Err::<(), _>("network unreachable".to_owned())
            },
            PromiseMessages::new(
                "Syncing",
                "Synced",
                ErrorMessage::from_fn(|e: &String| Message::new("Sync failed").description(e.clone())),
            ),
        )
        .await;
    info!(success = sync.is_success(), "sync settled");

    let drained = tokio::time::timeout(SETTLE_TIMEOUT, async {
        while !toaster.state().is_empty() {
            sleep(Duration::from_millis(100)).await;
        }
    })
    .await;
    if drained.is_err() {
        info!("timed out waiting for toasts to clear");
        toaster.dismiss_all();
    }

    driver.abort();
}
