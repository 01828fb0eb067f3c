use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::modrinth::api::MODRINTH_API_BASE;
use crate::core::paths;

/// Performance mods installed on first launch, in install order.
pub const DEFAULT_PACKAGES: [&str; 6] = [
    "sodium",        // renderer optimization
    "lithium",       // game logic optimization
    "starlight",     // light engine rewrite
    "indium",        // Fabric rendering API on top of Sodium
    "entityculling", // skip rendering of hidden entities
    "memoryleakfix",
];

pub const DEFAULT_GAME_VERSION: &str = "1.20.1";
pub const DEFAULT_LOADER: &str = "fabric";
pub const DEFAULT_MAX_FPS: u32 = 150;

const ENV_MODS_DIR: &str = "YORU_MODS_DIR";
const ENV_API_BASE: &str = "YORU_MODRINTH_API";
const ENV_GAME_VERSION: &str = "YORU_GAME_VERSION";
const ENV_LOADER: &str = "YORU_LOADER";

/// Everything the startup hook needs to know.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OptimizerConfig {
    pub packages: Vec<String>,
    pub game_version: String,
    pub loader: String,
    pub api_base: String,
    pub query_timeout_ms: u64,
    /// No limit when unset.
    pub download_timeout_ms: Option<u64>,
    pub max_fps: u32,
    /// Overrides the per-OS default mods folder.
    pub mods_dir: Option<PathBuf>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            packages: DEFAULT_PACKAGES.iter().map(|p| p.to_string()).collect(),
            game_version: DEFAULT_GAME_VERSION.to_string(),
            loader: DEFAULT_LOADER.to_string(),
            api_base: MODRINTH_API_BASE.to_string(),
            query_timeout_ms: 20_000,
            download_timeout_ms: None,
            max_fps: DEFAULT_MAX_FPS,
            mods_dir: None,
        }
    }
}

impl OptimizerConfig {
    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> LauncherResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| LauncherError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `YORU_*` environment variables on top of the current values.
    pub fn apply_env_overrides(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|v: &String| !v.trim().is_empty());

        if let Some(dir) = lookup(ENV_MODS_DIR) {
            self.mods_dir = Some(PathBuf::from(dir));
        }
        if let Some(base) = lookup(ENV_API_BASE) {
            self.api_base = base;
        }
        if let Some(version) = lookup(ENV_GAME_VERSION) {
            self.game_version = version;
        }
        if let Some(loader) = lookup(ENV_LOADER) {
            self.loader = loader;
        }
        self
    }

    pub fn validate(&self) -> LauncherResult<()> {
        if self.game_version.trim().is_empty() {
            return Err(LauncherError::Config("game_version must not be empty".into()));
        }
        if self.loader.trim().is_empty() {
            return Err(LauncherError::Config("loader must not be empty".into()));
        }
        if self.query_timeout_ms == 0 {
            return Err(LauncherError::Config("query_timeout_ms must be positive".into()));
        }
        if let Some(empty) = self.packages.iter().find(|p| p.trim().is_empty()) {
            return Err(LauncherError::InvalidPackageId(empty.clone()));
        }
        Ok(())
    }

    /// Configured mods folder, or the per-OS default.
    pub fn mods_dir(&self) -> PathBuf {
        self.mods_dir
            .clone()
            .unwrap_or_else(paths::resolve_default_directory)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    pub fn download_timeout(&self) -> Option<Duration> {
        self.download_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_match_the_fabric_1_20_1_pack() {
        let config = OptimizerConfig::default();
        assert_eq!(
            config.packages,
            vec!["sodium", "lithium", "starlight", "indium", "entityculling", "memoryleakfix"]
        );
        assert_eq!(config.game_version, "1.20.1");
        assert_eq!(config.loader, "fabric");
        assert_eq!(config.query_timeout(), Duration::from_millis(20_000));
        assert_eq!(config.download_timeout(), None);
        assert_eq!(config.max_fps, 150);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("yoru.json");
        std::fs::write(
            &path,
            r#"{ "packages": ["sodium"], "download_timeout_ms": 60000, "mods_dir": "/srv/mods" }"#,
        )
        .unwrap();

        let config = OptimizerConfig::from_json_file(&path).unwrap();

        assert_eq!(config.packages, vec!["sodium"]);
        assert_eq!(config.download_timeout(), Some(Duration::from_secs(60)));
        assert_eq!(config.mods_dir(), PathBuf::from("/srv/mods"));
        assert_eq!(config.loader, "fabric");
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("yoru.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            OptimizerConfig::from_json_file(&path),
            Err(LauncherError::Json(_))
        ));
    }

    #[test]
    fn blank_package_fails_validation() {
        let config = OptimizerConfig {
            packages: vec!["sodium".into(), " ".into()],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LauncherError::InvalidPackageId(_))
        ));
    }

    #[test]
    fn overrides_replace_only_non_empty_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("YORU_MODS_DIR", "/tmp/mods"),
            ("YORU_MODRINTH_API", "http://127.0.0.1:9999/v2"),
            ("YORU_LOADER", "  "),
        ]);

        let config = OptimizerConfig::default()
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.mods_dir, Some(PathBuf::from("/tmp/mods")));
        assert_eq!(config.api_base, "http://127.0.0.1:9999/v2");
        assert_eq!(config.loader, "fabric");
        assert_eq!(config.game_version, "1.20.1");
    }
}
