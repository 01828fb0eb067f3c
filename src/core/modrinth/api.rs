// ─── Modrinth API ───
// Version-listing URL construction and download URL selection.

use reqwest::Url;
use serde::Deserialize;

use crate::core::error::{LauncherError, LauncherResult};

pub const MODRINTH_API_BASE: &str = "https://api.modrinth.com/v2";

/// One entry of the `project/{id}/version` response array.
///
/// Every field is optional so that partial or unexpected payloads degrade to
/// "no match" instead of a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectVersion {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub version_number: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub files: Vec<VersionFile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VersionFile {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub primary: bool,
}

impl ProjectVersion {
    /// Jar URL for this version: its own `url`, then the primary file,
    /// then the first jar file.
    pub fn jar_url(&self) -> Option<&str> {
        if let Some(url) = self.url.as_deref().filter(|u| is_jar_url(u)) {
            return Some(url);
        }

        let jar_files = || {
            self.files
                .iter()
                .filter_map(|f| f.url.as_deref().filter(|u| is_jar_url(u)).map(|u| (f, u)))
        };

        jar_files()
            .find(|(f, _)| f.primary)
            .or_else(|| jar_files().next())
            .map(|(_, u)| u)
    }
}

/// Build the version-listing URL for `package_id`.
///
/// The id is percent-encoded as a single path segment; the tags go into the
/// query as literal JSON arrays, the syntax the registry expects.
pub fn version_list_url(
    api_base: &str,
    package_id: &str,
    platform_tag: &str,
    loader_tag: &str,
) -> LauncherResult<Url> {
    if package_id.trim().is_empty() {
        return Err(LauncherError::InvalidPackageId(package_id.to_string()));
    }

    let mut url = Url::parse(api_base).map_err(|e| LauncherError::InvalidUrl {
        url: api_base.to_string(),
        reason: e.to_string(),
    })?;

    url.path_segments_mut()
        .map_err(|_| LauncherError::InvalidUrl {
            url: api_base.to_string(),
            reason: "cannot be a base URL".into(),
        })?
        .pop_if_empty()
        .extend(["project", package_id, "version"]);

    url.set_query(Some(&format!(
        "game_versions=[\"{}\"]&loaders=[\"{}\"]",
        platform_tag, loader_tag
    )));

    Ok(url)
}

/// Jar URL of the first version in a version-listing body.
///
/// Empty, malformed or jar-less bodies all yield `None`.
pub fn first_jar_url(body: &str) -> Option<String> {
    let versions: Vec<ProjectVersion> = serde_json::from_str(body).ok()?;
    versions.first()?.jar_url().map(str::to_string)
}

/// File name for a download URL: everything after the last `/`.
pub fn file_name_from_url(url: &str) -> Option<&str> {
    let name = url.rsplit('/').next()?;
    if name.is_empty() || name.contains('\\') || name == "." || name == ".." {
        return None;
    }
    Some(name)
}

fn is_jar_url(url: &str) -> bool {
    (url.starts_with("https://") || url.starts_with("http://")) && url.ends_with(".jar")
}
