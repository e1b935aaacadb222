// Shared constants for playback routing and the external stream service

// === Provider identifiers ===
/// Provider id key under which catalog items carry their external stream content id
pub const EXTERNAL_STREAM_PROVIDER_KEY: &str = "sc";

// === External stream service ===
pub const DEFAULT_EXTERNAL_STREAMS_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 10;

/// Status reported by the resolve endpoint when a playable URL was produced
pub const RESOLVE_STATUS_OK: &str = "ok";
pub const RESOLVE_FAILED_MESSAGE: &str = "Failed to resolve stream";
