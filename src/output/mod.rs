//! Tree formatting and display
//!
//! - `config` - Output configuration and glyph styles
//! - `text` - Plain-text line formatting and the in-memory line collector
//! - `streaming` - Streaming formatter for colored console output
//! - `json` - JSON output

mod config;
mod json;
mod streaming;
mod text;

// Re-export public types and functions
pub use config::{OutputConfig, TreeStyle};
pub use json::{print_json, to_json};
pub use streaming::StreamingFormatter;
pub use text::{LineCollector, format_entry};
