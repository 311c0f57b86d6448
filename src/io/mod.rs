//! Input/output helpers.
//!
//! - fixed-width catalog slicing (`parse`)
//! - typed record normalization (`normalize`)
//! - record/artifact exports (CSV/JSON) (`export`)

pub mod export;
pub mod normalize;
pub mod parse;

pub use export::*;
pub use normalize::*;
pub use parse::*;
