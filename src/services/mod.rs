//! Service layer for the search application.
//!
//! This module contains the business logic for:
//! - Listing page fetching (`PageFetcher`, behind the `PageSource` seam)
//! - Raw item normalization (`EventNormalizer`)
//! - Result ordering (`ResultOrderer`)

mod fetcher;
mod normalizer;
mod orderer;

pub use fetcher::{PageFetcher, PageSource};
pub use normalizer::EventNormalizer;
pub use orderer::{ResultOrderer, SortPolicy};
