// ─── Yoru Optimized Core ───
// Startup helper that caps FPS and installs performance mods from Modrinth.
//
// Architecture:
//   core/
//     paths       — Default mods folder per OS family
//     modrinth/   — Presence check, version query, jar selection, fetch
//     downloader/ — Streaming downloads
//     hook/       — Startup hook, background task, reporting
//     config      — Installer settings + env overrides

pub mod config;
pub mod downloader;
pub mod error;
pub mod hook;
pub mod http;
pub mod modrinth;
pub mod paths;
