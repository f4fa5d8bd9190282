//! # mods2dot
//!
//! Convert MODS bibliographic XML into a GraphViz `dot` graph with one
//! record-shaped node per reference.
//!
//! ## Architecture
//!
//! - [`mods`]: XML reading and MODS record extraction
//! - [`models`]: Core data structures (Reference, Author, Host)
//! - [`dot`]: Graph rendering
//! - [`config`]: Configuration management
//! - [`ui`]: Terminal status output
//!
//! ```rust
//! let xml = r#"<modsCollection xmlns="http://www.loc.gov/mods/v3">
//!   <mods ID="r1"><originInfo><dateIssued>1999</dateIssued></originInfo></mods>
//! </modsCollection>"#;
//!
//! let dot = mods2dot::convert(xml).unwrap();
//! assert!(dot.contains(r#"r1 [style=filled, fillcolor=white, label="anonymous | 1999"];"#));
//! ```

pub mod config;
pub mod dot;
pub mod models;
pub mod mods;
pub mod ui;

// Re-export commonly used types
pub use dot::{DotDigraph, DotStyle};
pub use models::{Author, Host, Reference};
pub use mods::{ModsError, ModsParser};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Convert a MODS document to `dot` text using the default settings
pub fn convert(content: &str) -> Result<String, ModsError> {
    let references = mods::parse_mods(content)?;
    Ok(dot::render_references(&references))
}
