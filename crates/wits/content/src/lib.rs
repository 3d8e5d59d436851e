//! File loaders for authored content.
//!
//! This crate reads the files that sit next to the archive:
//! - Map definitions (JSON, validated on load)
//! - Converter configuration (TOML)
//!
//! Loaders return `anyhow` results with the offending path in the context;
//! the typed errors from `wits-core` stay reachable through `downcast_ref`.

pub mod loaders;

pub use loaders::{ConfigLoader, ContentFactory, LoadResult, MapLoader};
