//! Audio presence classification.
//!
//! The authoritative gate of the pipeline: a URL is only worth
//! downloading if at least one of its formats carries an audio stream.
//! The verdict is computed over parsed format entries, never by pattern
//! matching the engine's serialized output.

use audiogate_av::FormatEntry;

/// Decide whether a format set contains any usable audio.
///
/// Pure function: true iff at least one entry's audio codec is present
/// and not the engine's `"none"` sentinel. An empty set means no audio.
pub fn has_audio(formats: &[FormatEntry]) -> bool {
    formats.iter().any(FormatEntry::has_audio)
}
