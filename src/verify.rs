//! Post-download audio verification.

use audiogate_av::probe;
use std::path::Path;

/// Result of the best-effort audio check on a downloaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// The prober reported at least one audio stream.
    Confirmed { codec: String },
    /// The check could not establish an audio stream.
    Inconclusive { reason: String },
}

/// Check that a downloaded file physically contains an audio stream.
///
/// This never fails a download outcome: a missing file, an unusable
/// prober, and a probe reporting zero audio streams all downgrade to
/// [`Verification::Inconclusive`]. The authoritative audio gate already
/// ran against the source's format metadata before the download.
pub fn verify(path: &Path) -> Verification {
    match probe::audio_streams(path) {
        Ok(streams) => match streams.into_iter().next() {
            Some(stream) => Verification::Confirmed {
                codec: stream.codec,
            },
            None => Verification::Inconclusive {
                reason: "prober reported no audio stream".to_string(),
            },
        },
        Err(e) => Verification::Inconclusive {
            reason: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_missing_file_is_inconclusive_not_fatal() {
        let result = verify(Path::new("/nonexistent/clip.mp4"));
        assert_matches!(result, Verification::Inconclusive { .. });
    }
}
