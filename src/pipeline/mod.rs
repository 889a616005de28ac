//! Pipeline entry points for search operations.
//!
//! - `search_by_keyword`: all pages for a keyword, ordered by time
//! - `search_all`: the full catalog, ended events last
//! - `fetch_raw`: the first keyword page without normalization

pub mod search;

pub use search::{EventSearch, SearchOutcome};
