use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, error, info};

use super::api::{self, MODRINTH_API_BASE};
use super::presence::is_present;
use super::transport::Transport;
use crate::core::error::{LauncherError, LauncherResult};

/// Query timeout used when the caller does not pick one.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_millis(20_000);

/// What a single fetch attempt ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// A matching jar was already in the directory; nothing was requested.
    AlreadyPresent,
    /// The jar was downloaded to this path.
    Installed(PathBuf),
    /// The registry answered but offered no usable jar.
    NoMatch,
}

/// Fetch-if-absent against a Modrinth-compatible registry.
///
/// Holds no per-call state; every call is independent.
pub struct ArtifactFetcher<T: Transport> {
    transport: T,
    api_base: String,
}

impl<T: Transport> ArtifactFetcher<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            api_base: MODRINTH_API_BASE.to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Install `package_id` into `dir` unless a matching jar is already there.
    ///
    /// Returns `true` only when a file was newly downloaded. Errors are
    /// logged and reported as `false`.
    pub async fn ensure_installed(
        &self,
        dir: &Path,
        package_id: &str,
        platform_tag: &str,
        loader_tag: &str,
        timeout: Duration,
    ) -> bool {
        match self
            .try_install(dir, package_id, platform_tag, loader_tag, timeout)
            .await
        {
            Ok(InstallOutcome::Installed(_)) => true,
            Ok(_) => false,
            Err(e) => {
                error!("Failed to install {}: {}", package_id, e);
                false
            }
        }
    }

    /// Same routine as [`ensure_installed`](Self::ensure_installed), with the
    /// outcome and error left to the caller.
    pub async fn try_install(
        &self,
        dir: &Path,
        package_id: &str,
        platform_tag: &str,
        loader_tag: &str,
        timeout: Duration,
    ) -> LauncherResult<InstallOutcome> {
        // An empty id would match every jar in the directory
        if package_id.trim().is_empty() {
            return Err(LauncherError::InvalidPackageId(package_id.to_string()));
        }

        if is_present(dir, package_id).await? {
            debug!("{} already present in {:?}", package_id, dir);
            return Ok(InstallOutcome::AlreadyPresent);
        }

        let url = api::version_list_url(&self.api_base, package_id, platform_tag, loader_tag)?;
        debug!("Querying {}", url);

        let body = self.transport.get_text(url.as_str(), timeout).await?;
        if body.is_empty() {
            debug!("Empty version list for {}", package_id);
            return Ok(InstallOutcome::NoMatch);
        }

        let Some(jar_url) = api::first_jar_url(&body) else {
            debug!(
                "No {} jar for {} on {}",
                loader_tag, package_id, platform_tag
            );
            return Ok(InstallOutcome::NoMatch);
        };

        let Some(file_name) = api::file_name_from_url(&jar_url) else {
            debug!("Unusable file name in {}", jar_url);
            return Ok(InstallOutcome::NoMatch);
        };

        let target = dir.join(file_name);
        self.transport.download(&jar_url, &target).await?;
        info!("Downloaded: {}", file_name);

        Ok(InstallOutcome::Installed(target))
    }

    /// Run [`ensure_installed`](Self::ensure_installed) for each package in
    /// order and return the ids that were newly installed.
    pub async fn install_all<S: AsRef<str>>(
        &self,
        dir: &Path,
        packages: &[S],
        platform_tag: &str,
        loader_tag: &str,
        timeout: Duration,
    ) -> Vec<String> {
        let mut installed = Vec::new();
        for package in packages {
            let package = package.as_ref();
            if self
                .ensure_installed(dir, package, platform_tag, loader_tag, timeout)
                .await
            {
                installed.push(package.to_string());
            }
        }
        installed
    }
}
