//! Core library for ytmcp
//!
//! This crate implements the **Functional Core** of the ytmcp application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! - **`ytmcp_core`** (this crate): Pure transformation functions with zero I/O
//! - **`ytmcp`**: HTTP calls, the MCP server, and orchestration (the Imperative Shell)
//!
//! Every function here is deterministic over its inputs: wire-format payloads
//! from the YouTube Data API go in, normalized records and derived analytics
//! come out. Nothing in this crate opens a socket, reads the clock, or touches
//! the filesystem, so every module is tested with plain fixture data.
//!
//! # Module Organization
//!
//! - [`video`]: wire types and normalization for video resources
//! - [`channel`]: channel URL parsing, overview flattening, topic names
//! - [`comments`]: comment thread wire types and normalization
//! - [`analytics`]: engagement rates, rankings, comparisons, tag correlation
//! - [`schedule`]: upload-schedule statistics
//! - [`seo`]: metadata heuristics scored against YouTube SEO practices
//! - [`keywords`]: stopword-filtered word frequency over comment text

pub mod analytics;
pub mod channel;
pub mod comments;
pub mod keywords;
pub mod schedule;
pub mod seo;
pub mod video;

/// Round a float to `decimals` decimal places.
///
/// Non-finite inputs collapse to 0.0, matching the zero-fill policy applied
/// to every derived numeric field.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
