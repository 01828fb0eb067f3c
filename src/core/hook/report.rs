use std::sync::Arc;

use tracing::info;

use super::Reporter;

/// Reporter that only writes to the log.
pub fn log_reporter() -> Reporter {
    Arc::new(report_to_log)
}

pub fn report_to_log(installed: &[String]) {
    if installed.is_empty() {
        info!("All optimization mods already present.");
        return;
    }

    info!("Installed: [{}]", installed.join(", "));
    info!("Please restart Minecraft to enable new mods.");
}

/// Chat line for hosts that can show one, `None` when nothing changed.
pub fn restart_notice(installed: &[String]) -> Option<String> {
    if installed.is_empty() {
        return None;
    }
    Some(format!(
        "Yoru Optimized installed: {}. Please restart Minecraft.",
        installed.join(", ")
    ))
}
