// ─── Host Integration ───
// The host calls `StartupHook::on_initialize` once; installs run on a
// background task and report through an injected callback.

pub mod optimizer;
pub mod report;

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::core::error::LauncherResult;

pub use optimizer::{HeadlessOptions, OptimizerHook};
pub use report::{log_reporter, report_to_log, restart_notice};

/// Receives the ids installed during this run, in install order.
pub type Reporter = Arc<dyn Fn(&[String]) + Send + Sync>;

/// Host-side game options the hook is allowed to touch.
pub trait GameOptions: Send + Sync {
    fn set_max_fps(&self, fps: u32) -> LauncherResult<()>;
}

/// Entry point the host invokes once at startup.
pub trait StartupHook {
    /// Must return without waiting on the network.
    fn on_initialize(&self) -> InstallTask;
}

/// Handle to the background install run.
///
/// Awaiting it yields the installed ids; dropping it lets the run finish on
/// its own (the reporter still fires).
#[must_use = "drop the task explicitly with `detach` for fire-and-forget"]
pub struct InstallTask {
    handle: JoinHandle<Vec<String>>,
}

impl InstallTask {
    pub(crate) fn new(handle: JoinHandle<Vec<String>>) -> Self {
        Self { handle }
    }

    pub async fn wait(self) -> LauncherResult<Vec<String>> {
        Ok(self.handle.await?)
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn detach(self) {}
}
