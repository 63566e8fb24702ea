//! Constants for the fetch module.

/// Location every resource path is appended to.
pub const DEFAULT_BASE_URL: &str = "https://hiquiz.co.kr";

/// Bound on a single sheet request, connect through body (10 seconds).
pub const FETCH_TIMEOUT_SECS: u64 = 10;
