//! FFprobe-based audio stream probing.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

/// Executable name of the stream prober.
pub const PROBER: &str = "ffprobe";

/// One audio stream found in a local media file.
#[derive(Debug, Clone)]
pub struct AudioStream {
    /// Codec name as reported by the prober.
    pub codec: String,
    /// Channel count.
    pub channels: u32,
    /// Sample rate in Hz if reported.
    pub sample_rate: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_name: Option<String>,
    channels: Option<u32>,
    sample_rate: Option<String>,
}

/// Probe a local file for its audio streams.
///
/// Runs ffprobe restricted to audio streams and parses its JSON output.
/// An empty result means the prober saw the file but found no audio
/// stream in it.
///
/// # Errors
///
/// Returns an error if the file does not exist, the prober is missing or
/// exits non-zero, or its output cannot be parsed.
pub fn audio_streams(path: &Path) -> Result<Vec<AudioStream>> {
    if !path.exists() {
        return Err(Error::file_not_found(path));
    }

    let output = Command::new(PROBER)
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_streams",
            "-select_streams",
            "a",
        ])
        .arg(path)
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::tool_not_found(PROBER)
            } else {
                Error::Io(e)
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::tool_failed(PROBER, stderr.to_string()));
    }

    let json_str = String::from_utf8(output.stdout)
        .map_err(|e| Error::parse_error(PROBER, format!("Invalid UTF-8: {}", e)))?;

    parse_streams(&json_str)
}

fn parse_streams(json: &str) -> Result<Vec<AudioStream>> {
    let output: FfprobeOutput = serde_json::from_str(json)?;

    Ok(output
        .streams
        .into_iter()
        .map(|stream| AudioStream {
            codec: stream.codec_name.unwrap_or_default(),
            channels: stream.channels.unwrap_or(0),
            sample_rate: stream.sample_rate.and_then(|s| s.parse().ok()),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_streams() {
        let json = r#"{
            "streams": [
                {"codec_name": "aac", "channels": 2, "sample_rate": "44100"},
                {"codec_name": "opus", "channels": 6, "sample_rate": "48000"}
            ]
        }"#;

        let streams = parse_streams(json).unwrap();
        assert_eq!(streams.len(), 2);
        assert_eq!(streams[0].codec, "aac");
        assert_eq!(streams[0].channels, 2);
        assert_eq!(streams[0].sample_rate, Some(44100));
        assert_eq!(streams[1].codec, "opus");
    }

    #[test]
    fn test_parse_streams_empty() {
        let streams = parse_streams(r#"{"streams": []}"#).unwrap();
        assert!(streams.is_empty());
    }

    #[test]
    fn test_parse_streams_missing_array() {
        // ffprobe omits the array entirely for some containers.
        let streams = parse_streams("{}").unwrap();
        assert!(streams.is_empty());
    }

    #[test]
    fn test_audio_streams_missing_file() {
        let err = audio_streams(Path::new("/nonexistent/clip.mp4")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
