pub mod core;

use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::core::config::OptimizerConfig;
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::hook::{log_reporter, HeadlessOptions, OptimizerHook, StartupHook};

/// Standalone entry: run the startup hook once and wait for it.
///
/// An optional JSON config path may be passed as the first argument.
pub fn run() -> LauncherResult<()> {
    // Initialize structured logging; an embedding host may already own it
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,yoru_optimized_lib=debug")),
        )
        .try_init();

    tracing::info!("Yoru Optimized starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => OptimizerConfig::from_json_file(&PathBuf::from(path))?,
        None => OptimizerConfig::default(),
    }
    .apply_env_overrides();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("yoru-optimized-installer")
        .build()
        .map_err(|e| LauncherError::Other(format!("failed to start runtime: {e}")))?;

    let hook = OptimizerHook::from_config(
        config,
        Arc::new(HeadlessOptions),
        log_reporter(),
        runtime.handle().clone(),
    )?;

    let installed = runtime.block_on(hook.on_initialize().wait())?;
    tracing::debug!("Install run finished, {} new", installed.len());
    Ok(())
}
