use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{debug, error, info};

use super::{GameOptions, InstallTask, Reporter, StartupHook};
use crate::core::config::OptimizerConfig;
use crate::core::error::LauncherResult;
use crate::core::http::build_http_client;
use crate::core::modrinth::{ArtifactFetcher, HttpTransport, Transport};

/// Options sink for runs without a game client attached.
pub struct HeadlessOptions;

impl GameOptions for HeadlessOptions {
    fn set_max_fps(&self, fps: u32) -> LauncherResult<()> {
        debug!("No game client attached, skipping FPS cap {}", fps);
        Ok(())
    }
}

/// Caps the frame rate, then installs the configured mods in the background.
pub struct OptimizerHook<T: Transport> {
    config: OptimizerConfig,
    fetcher: Arc<ArtifactFetcher<T>>,
    options: Arc<dyn GameOptions>,
    reporter: Reporter,
    runtime: Handle,
}

impl OptimizerHook<HttpTransport> {
    /// Hook talking to the configured registry over HTTP.
    pub fn from_config(
        config: OptimizerConfig,
        options: Arc<dyn GameOptions>,
        reporter: Reporter,
        runtime: Handle,
    ) -> LauncherResult<Self> {
        config.validate()?;
        let client = build_http_client(config.query_timeout())?;
        let transport = HttpTransport::new(client, config.download_timeout());
        Ok(Self::new(config, transport, options, reporter, runtime))
    }
}

impl<T: Transport + 'static> OptimizerHook<T> {
    pub fn new(
        config: OptimizerConfig,
        transport: T,
        options: Arc<dyn GameOptions>,
        reporter: Reporter,
        runtime: Handle,
    ) -> Self {
        let fetcher = ArtifactFetcher::new(transport).with_api_base(config.api_base.clone());
        Self {
            config,
            fetcher: Arc::new(fetcher),
            options,
            reporter,
            runtime,
        }
    }

    fn apply_fps_cap(&self) {
        match self.options.set_max_fps(self.config.max_fps) {
            Ok(()) => info!("FPS cap set to {}.", self.config.max_fps),
            Err(e) => error!("Failed to set FPS cap: {}", e),
        }
    }
}

impl<T: Transport + 'static> StartupHook for OptimizerHook<T> {
    fn on_initialize(&self) -> InstallTask {
        self.apply_fps_cap();

        let fetcher = Arc::clone(&self.fetcher);
        let config = self.config.clone();
        let reporter = Arc::clone(&self.reporter);

        let handle = self.runtime.spawn(async move {
            let mods_dir = config.mods_dir();
            info!(
                "Checking {} mods for {} {} in {:?}",
                config.packages.len(),
                config.loader,
                config.game_version,
                mods_dir
            );

            let installed = fetcher
                .install_all(
                    &mods_dir,
                    &config.packages,
                    &config.game_version,
                    &config.loader,
                    config.query_timeout(),
                )
                .await;

            reporter(&installed);
            installed
        });

        InstallTask::new(handle)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::core::error::LauncherError;

    /// Offers `<package>-1.0.0.jar` for every package except `broken`.
    struct StubTransport;

    #[async_trait]
    impl Transport for StubTransport {
        async fn get_text(&self, url: &str, _timeout: Duration) -> LauncherResult<String> {
            let package = url
                .split("/project/")
                .nth(1)
                .and_then(|rest| rest.split('/').next())
                .unwrap_or_default();
            if package == "broken" {
                return Err(LauncherError::Other("connection reset".into()));
            }
            Ok(format!(
                r#"[{{"url":"https://cdn.example/{}-1.0.0.jar"}}]"#,
                package
            ))
        }

        async fn download(&self, _url: &str, dest: &Path) -> LauncherResult<u64> {
            if let Some(parent) = dest.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(dest, b"jar").await?;
            Ok(3)
        }
    }

    #[derive(Default)]
    struct RecordingOptions {
        fps: Mutex<Option<u32>>,
        fail: bool,
    }

    impl GameOptions for RecordingOptions {
        fn set_max_fps(&self, fps: u32) -> LauncherResult<()> {
            if self.fail {
                return Err(LauncherError::Other("options not loaded".into()));
            }
            *self.fps.lock().unwrap() = Some(fps);
            Ok(())
        }
    }

    fn config_for(dir: &Path, packages: &[&str]) -> OptimizerConfig {
        OptimizerConfig {
            packages: packages.iter().map(|p| p.to_string()).collect(),
            mods_dir: Some(dir.to_path_buf()),
            ..Default::default()
        }
    }

    fn capturing_reporter() -> (Reporter, Arc<Mutex<Option<Vec<String>>>>) {
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let reporter: Reporter = Arc::new(move |installed: &[String]| {
            *sink.lock().unwrap() = Some(installed.to_vec());
        });
        (reporter, seen)
    }

    #[tokio::test]
    async fn caps_fps_and_reports_installed_mods() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("lithium-0.11.2.jar"), b"").unwrap();
        let options = Arc::new(RecordingOptions::default());
        let (reporter, seen) = capturing_reporter();

        let hook = OptimizerHook::new(
            config_for(dir.path(), &["sodium", "lithium", "broken", "indium"]),
            StubTransport,
            options.clone(),
            reporter,
            Handle::current(),
        );

        let installed = hook.on_initialize().wait().await.unwrap();

        assert_eq!(*options.fps.lock().unwrap(), Some(150));
        assert_eq!(installed, vec!["sodium".to_string(), "indium".to_string()]);
        assert_eq!(seen.lock().unwrap().clone(), Some(installed));
        assert!(dir.path().join("sodium-1.0.0.jar").exists());
        assert!(dir.path().join("indium-1.0.0.jar").exists());
    }

    #[tokio::test]
    async fn fps_failure_does_not_stop_installs() {
        let dir = tempfile::tempdir().unwrap();
        let options = Arc::new(RecordingOptions {
            fail: true,
            ..Default::default()
        });
        let (reporter, seen) = capturing_reporter();

        let hook = OptimizerHook::new(
            config_for(dir.path(), &["sodium"]),
            StubTransport,
            options,
            reporter,
            Handle::current(),
        );

        let installed = hook.on_initialize().wait().await.unwrap();

        assert_eq!(installed, vec!["sodium".to_string()]);
        assert_eq!(seen.lock().unwrap().clone(), Some(vec!["sodium".to_string()]));
    }

    #[tokio::test]
    async fn second_startup_reports_nothing_new() {
        let dir = tempfile::tempdir().unwrap();
        let (reporter, seen) = capturing_reporter();
        let hook = OptimizerHook::new(
            config_for(dir.path(), &["sodium", "starlight"]),
            StubTransport,
            Arc::new(HeadlessOptions),
            reporter,
            Handle::current(),
        );

        let first = hook.on_initialize().wait().await.unwrap();
        let second = hook.on_initialize().wait().await.unwrap();

        assert_eq!(first.len(), 2);
        assert!(second.is_empty());
        assert_eq!(seen.lock().unwrap().clone(), Some(Vec::new()));
    }
}
