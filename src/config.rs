use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Vocab Portal";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Canonical column set of a unified vocabulary table, in display order.
pub const CANONICAL_COLUMNS: [&str; 8] = [
    "concept_id",
    "concept_name",
    "concept_name_vi",
    "domain_id",
    "vocabulary_id",
    "concept_class_id",
    "standard_concept",
    "concept_code",
];

/// Columns consulted by the search engine, when present.
pub const SEARCH_COLUMNS: [&str; 4] =
    ["concept_id", "concept_name", "concept_name_vi", "concept_code"];

/// Page sizes the presentation layer may request for display truncation.
pub const ROWS_PER_PAGE_OPTIONS: [usize; 4] = [50, 100, 250, 500];

/// Page size used when the request does not specify one.
pub const DEFAULT_ROWS_PER_PAGE: usize = 100;

/// Whether `n` is one of the allowed display page sizes.
pub fn page_size_allowed(n: usize) -> bool {
    ROWS_PER_PAGE_OPTIONS.contains(&n)
}

/// Get the directory holding the vocabulary source files.
/// `VOCAB_PORTAL_DATA` overrides the default `./data`.
pub fn data_dir() -> PathBuf {
    match std::env::var("VOCAB_PORTAL_DATA") {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from("data"),
    }
}

/// Get the socket address the API server binds to.
/// `VOCAB_PORTAL_ADDR` overrides the default loopback address.
pub fn bind_addr() -> String {
    match std::env::var("VOCAB_PORTAL_ADDR") {
        Ok(addr) if !addr.is_empty() => addr,
        _ => "127.0.0.1:8600".to_string(),
    }
}

/// Default tracing filter when `RUST_LOG` is not set.
pub fn default_log_filter() -> String {
    format!("info,{}=debug", env!("CARGO_CRATE_NAME"))
}
