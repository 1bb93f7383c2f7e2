//! # audiogate-av
//!
//! External media tool bindings for audiogate.
//!
//! This crate provides the subprocess layer for:
//! - Querying a source URL's available formats through the fetch engine
//!   (yt-dlp) and parsing them into typed entries
//! - Executing downloads with an ordered format preference and a fixed
//!   merge container
//! - Resolving the output filename a download would produce, without
//!   downloading
//! - Probing a local file's audio streams (ffprobe)
//! - Detecting which external tools are installed
//!
//! All invocations are blocking `std::process::Command` calls; the
//! download pipeline is strictly sequential by design.
//!
//! ## Example
//!
//! ```no_run
//! use audiogate_av::engine;
//!
//! let formats = engine::query_formats("https://example.com/watch?v=abc")?;
//! let audible = formats.iter().any(|f| f.has_audio());
//! println!("{} formats, audio available: {}", formats.len(), audible);
//! # Ok::<(), audiogate_av::Error>(())
//! ```

mod error;
pub mod engine;
pub mod probe;
pub mod tools;

// Re-exports
pub use engine::{DownloadRequest, FormatEntry};
pub use error::{Error, Result};
pub use probe::AudioStream;
pub use tools::{check_tool, check_tools, require_tool, ToolInfo};
