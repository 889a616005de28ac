// src/lib.rs

//! allcpp event search library.
//!
//! Fetches the paginated event listing, normalizes each item into a
//! [`models::CanonicalEvent`], and orders the aggregated result.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
