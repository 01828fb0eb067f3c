// ─── Modrinth ───
// Fetch-if-absent installation of mod jars from the Modrinth registry.

pub mod api;
pub mod fetcher;
pub mod presence;
pub mod transport;

pub use fetcher::{ArtifactFetcher, InstallOutcome, DEFAULT_QUERY_TIMEOUT};
pub use presence::is_present;
pub use transport::{HttpTransport, Transport};
