//! Carton - The artist's toolbox for Vize.
//!
//! This crate provides the small shared utilities used across the Replica
//! crates, much like a carton (artist's portfolio case) holds all the
//! essential tools and materials an artist needs for their work.
//!
//! # Modules
//!
//! - **General**: identifier case conversion shared with the Vue runtime
//!
//! # Example
//!
//! ```
//! use vize_carton::hyphenate;
//!
//! assert_eq!(hyphenate("someProp"), "some-prop");
//! ```

pub mod general;

// Re-export compact_str::CompactString for convenience
pub use compact_str::CompactString;

// Re-export rustc-hash for fast hash maps/sets
pub use rustc_hash::{FxHashMap, FxHashSet};

// Re-export shared utilities
pub use general::*;
