//! Format inspection for source URLs.
//!
//! Thin fail-open wrapper over the engine's metadata query: any failure
//! degrades to an empty format set so one unreachable URL can never crash
//! the batch. The orchestrator distinguishes a degraded empty set from a
//! confirmed one when it records the skip.

use audiogate_av::{engine, FormatEntry};
use tracing::warn;

/// Outcome of inspecting one URL.
#[derive(Debug, Clone)]
pub struct Inspection {
    /// Formats the source offers. Empty when none were reported or when
    /// the query failed.
    pub formats: Vec<FormatEntry>,
    /// True when the empty set stands in for a failed query rather than a
    /// confirmed answer.
    pub degraded: bool,
}

/// Query the formats a URL offers.
///
/// In verbose mode the engine's human-readable format table is printed
/// first as an operator side channel; it is never parsed.
pub fn inspect(url: &str, verbose: bool) -> Inspection {
    if verbose {
        if let Err(e) = engine::list_formats(url) {
            warn!("Format listing failed for {}: {}", url, e);
        }
    }

    match engine::query_formats(url) {
        Ok(formats) => Inspection {
            formats,
            degraded: false,
        },
        Err(e) => {
            warn!("Format query failed for {}, treating as no audio: {}", url, e);
            Inspection {
                formats: Vec::new(),
                degraded: true,
            }
        }
    }
}
