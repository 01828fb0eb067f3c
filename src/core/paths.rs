// ─── Mods Directory Locator ───
// Default `.minecraft/mods` location per OS family.

use std::path::PathBuf;

/// Operating system family, as far as the mods folder layout is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    Mac,
    Other,
}

impl OsFamily {
    /// Family of the platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::Mac
        } else {
            Self::Other
        }
    }

    /// Classify a free-form OS name such as `"Windows 11"` or `"Mac OS X"`.
    pub fn from_os_name(name: &str) -> Self {
        let name = name.to_lowercase();
        // "darwin" contains "win"
        if name.contains("mac") || name.contains("darwin") {
            Self::Mac
        } else if name.contains("win") {
            Self::Windows
        } else {
            Self::Other
        }
    }
}

/// Environment inputs the locator depends on.
#[derive(Debug, Clone)]
pub struct LocatorEnv {
    pub os: OsFamily,
    pub home: Option<PathBuf>,
    pub appdata: Option<String>,
}

impl LocatorEnv {
    pub fn from_process() -> Self {
        let os = OsFamily::current();
        let appdata = match os {
            OsFamily::Windows => std::env::var("APPDATA").ok().filter(|v| !v.is_empty()),
            _ => None,
        };

        Self {
            os,
            home: dirs::home_dir(),
            appdata,
        }
    }
}

/// Default mods directory for the running process.
pub fn resolve_default_directory() -> PathBuf {
    mods_dir_for(&LocatorEnv::from_process())
}

/// Default mods directory for the given environment.
///
/// Built as a string with the separator of `env.os`, so a Windows
/// environment always yields a backslash path.
pub fn mods_dir_for(env: &LocatorEnv) -> PathBuf {
    let home = env
        .home
        .as_ref()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|| ".".to_string());

    let mods_path = match env.os {
        OsFamily::Windows => match &env.appdata {
            Some(appdata) => format!("{}\\.minecraft\\mods", appdata),
            None => format!("{}\\AppData\\Roaming\\.minecraft\\mods", home),
        },
        OsFamily::Mac => format!("{}/Library/Application Support/minecraft/mods", home),
        OsFamily::Other => format!("{}/.minecraft/mods", home),
    };

    PathBuf::from(mods_path)
}
