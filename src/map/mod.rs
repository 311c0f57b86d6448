//! Map document building and HTML serialization.
//!
//! - `artifact`: pure builder from classified records to a `MapArtifact`
//! - `html`: standalone Leaflet page rendering

pub mod artifact;
pub mod html;

pub use artifact::*;
pub use html::*;
