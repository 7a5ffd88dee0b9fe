//! Storage for the forgetting map.
//!
//! The store owns key/value pairs and their access order; counting and
//! eviction decisions live elsewhere. This keeps the ordering mechanics
//! independent of how victims are picked.

pub mod recency;

pub use recency::RecencyStore;
