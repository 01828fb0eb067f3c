use std::io::ErrorKind;
use std::path::Path;

use crate::core::error::{LauncherError, LauncherResult};

/// Whether `dir` already holds a jar for `package_id`.
///
/// Looks at direct children named `*.jar` and matches when the lowercase file
/// name contains the lowercase id. A missing directory counts as empty.
pub async fn is_present(dir: &Path, package_id: &str) -> LauncherResult<bool> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => {
            return Err(LauncherError::Io {
                path: dir.to_path_buf(),
                source: e,
            })
        }
    };

    let needle = package_id.to_lowercase();
    while let Some(entry) = entries.next_entry().await.map_err(|e| LauncherError::Io {
        path: dir.to_path_buf(),
        source: e,
    })? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(".jar") {
            continue;
        }
        if name.to_lowercase().contains(&needle) {
            return Ok(true);
        }
    }

    Ok(false)
}
