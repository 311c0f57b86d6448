//! Catalog sources.

pub mod koeri;

pub use koeri::*;
