//! Fetch engine (yt-dlp) invocations.
//!
//! Everything the download pipeline asks of yt-dlp goes through here:
//! metadata queries, filename resolution, format listings, and the
//! download itself. Metadata is parsed from the engine's JSON output into
//! typed [`FormatEntry`] values; decisions are never made by scanning the
//! raw text.

use crate::{Error, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Executable name of the fetch engine.
pub const ENGINE: &str = "yt-dlp";

/// Output naming template: source title plus container extension.
pub const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// The engine's sentinel for an absent stream dimension.
const CODEC_NONE: &str = "none";

/// One encoding variant a source platform offers for a video.
///
/// Mirrors the entries of the engine's `formats` array. A codec field that
/// is absent or set to the `"none"` sentinel means the format carries no
/// stream of that kind.
#[derive(Debug, Clone, Deserialize)]
pub struct FormatEntry {
    /// Engine-assigned format identifier.
    #[serde(default)]
    pub format_id: Option<String>,
    /// Container extension of this format.
    #[serde(default)]
    pub ext: Option<String>,
    /// Video codec, or `"none"` for audio-only formats.
    #[serde(default)]
    pub vcodec: Option<String>,
    /// Audio codec, or `"none"` for video-only formats.
    #[serde(default)]
    pub acodec: Option<String>,
}

impl FormatEntry {
    /// Whether this format carries an audio stream.
    pub fn has_audio(&self) -> bool {
        codec_present(self.acodec.as_deref())
    }

    /// Whether this format carries a video stream.
    pub fn has_video(&self) -> bool {
        codec_present(self.vcodec.as_deref())
    }
}

fn codec_present(codec: Option<&str>) -> bool {
    match codec {
        Some(c) => !c.is_empty() && c != CODEC_NONE,
        None => false,
    }
}

/// Options for one download invocation.
#[derive(Debug, Clone)]
pub struct DownloadRequest<'a> {
    /// Source URL.
    pub url: &'a str,
    /// Ordered format preference expression, first resolvable wins.
    pub format_expr: &'a str,
    /// Container the engine merges separate streams into.
    pub container: &'a str,
    /// Directory the output file is written to.
    pub output_dir: &'a Path,
    /// Engine-internal verbose logging instead of terse progress.
    pub verbose: bool,
}

#[derive(Debug, Deserialize)]
struct EngineMetadata {
    #[serde(default)]
    formats: Vec<FormatEntry>,
    #[serde(default)]
    format_id: Option<String>,
    #[serde(default)]
    ext: Option<String>,
    #[serde(default)]
    vcodec: Option<String>,
    #[serde(default)]
    acodec: Option<String>,
}

/// Query the formats a source URL offers.
///
/// Runs the engine's metadata dump (`-J`) without any network transfer of
/// media data and parses the `formats` array.
///
/// # Errors
///
/// Returns an error if the engine is missing, exits non-zero, or emits
/// JSON we cannot parse. Callers deciding skip-vs-download are expected to
/// recover from this (see the inspector in the main crate).
pub fn query_formats(url: &str) -> Result<Vec<FormatEntry>> {
    let output = Command::new(ENGINE)
        .args(["-J", "--no-playlist", "--no-warnings"])
        .arg(url)
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::tool_not_found(ENGINE)
            } else {
                Error::Io(e)
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::tool_failed(ENGINE, stderr_excerpt(&stderr)));
    }

    let json_str = String::from_utf8(output.stdout)
        .map_err(|e| Error::parse_error(ENGINE, format!("Invalid UTF-8: {}", e)))?;

    parse_format_set(&json_str)
}

fn parse_format_set(json: &str) -> Result<Vec<FormatEntry>> {
    let meta: EngineMetadata = serde_json::from_str(json)?;

    // Some extractors report a single format inline instead of a formats
    // array.
    if meta.formats.is_empty() && (meta.vcodec.is_some() || meta.acodec.is_some()) {
        return Ok(vec![FormatEntry {
            format_id: meta.format_id,
            ext: meta.ext,
            vcodec: meta.vcodec,
            acodec: meta.acodec,
        }]);
    }

    Ok(meta.formats)
}

/// Print the engine's human-readable format table for a URL.
///
/// Operator-facing side channel only; the output is inherited, not parsed.
pub fn list_formats(url: &str) -> Result<()> {
    let status = Command::new(ENGINE)
        .args(["-F", "--no-playlist"])
        .arg(url)
        .status()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::tool_not_found(ENGINE)
            } else {
                Error::Io(e)
            }
        })?;

    if !status.success() {
        return Err(Error::tool_failed(
            ENGINE,
            format!("format listing exited with {}", status),
        ));
    }

    Ok(())
}

/// Resolve the output path a download would produce, without downloading.
///
/// Uses the engine's dry-compute mode (`--print filename`); the engine
/// still queries metadata but transfers no media. The engine prints the
/// bare filename, so the result is joined onto `output_dir` here.
pub fn resolve_output_path(
    url: &str,
    format_expr: &str,
    container: &str,
    output_dir: &Path,
) -> Result<PathBuf> {
    let output = Command::new(ENGINE)
        .args(["--print", "filename"])
        .args(["-f", format_expr])
        .args(["--merge-output-format", container])
        .args(["--no-playlist", "--no-warnings"])
        .args(["-o", OUTPUT_TEMPLATE])
        .arg(url)
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::tool_not_found(ENGINE)
            } else {
                Error::Io(e)
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::tool_failed(ENGINE, stderr_excerpt(&stderr)));
    }

    let name = String::from_utf8_lossy(&output.stdout);
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::parse_error(ENGINE, "empty filename from dry run"));
    }

    let path = PathBuf::from(name);
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(output_dir.join(path))
    }
}

/// Download one video according to the request.
///
/// The engine evaluates the format preference expression in order and uses
/// the first selector that resolves. Separate video/audio selections are
/// merged into the requested container. Playlist expansion is disabled so
/// a collection URL still yields a single video, and freely-licensed codec
/// formats are preferred when quality is equivalent.
///
/// Progress output is inherited from the engine; stderr is captured so a
/// failure can be reported with its cause.
pub fn download(request: &DownloadRequest<'_>) -> Result<()> {
    let mut args: Vec<String> = vec![
        "-f".into(),
        request.format_expr.into(),
        "--merge-output-format".into(),
        request.container.into(),
        "--no-playlist".into(),
        "--prefer-free-formats".into(),
        "-P".into(),
        request.output_dir.to_string_lossy().into_owned(),
        "-o".into(),
        OUTPUT_TEMPLATE.into(),
    ];

    if request.verbose {
        args.push("--verbose".into());
    } else {
        args.push("--no-warnings".into());
        args.push("--progress".into());
    }

    args.push(request.url.into());

    let mut child = Command::new(ENGINE)
        .args(&args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::tool_not_found(ENGINE)
            } else {
                Error::Io(e)
            }
        })?;

    let mut stderr = String::new();
    if let Some(mut pipe) = child.stderr.take() {
        pipe.read_to_string(&mut stderr)?;
    }
    let status = child.wait()?;

    if !status.success() {
        return Err(Error::tool_failed(ENGINE, stderr_excerpt(&stderr)));
    }

    // Verbose engine output goes to stderr; forward it once the run is done
    // so it does not interleave with the progress lines.
    if request.verbose && !stderr.is_empty() {
        tracing::debug!("{} stderr:\n{}", ENGINE, stderr.trim_end());
    }

    Ok(())
}

/// Reduce an engine stderr dump to the single most useful line.
fn stderr_excerpt(stderr: &str) -> String {
    stderr
        .lines()
        .map(str::trim)
        .find(|l| l.starts_with("ERROR:"))
        .or_else(|| stderr.lines().map(str::trim).rev().find(|l| !l.is_empty()))
        .unwrap_or("unknown error")
        .chars()
        .take(200)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format_set() {
        let json = r#"{
            "title": "Example",
            "formats": [
                {"format_id": "137", "ext": "mp4", "vcodec": "avc1.640028", "acodec": "none"},
                {"format_id": "251", "ext": "webm", "vcodec": "none", "acodec": "opus"},
                {"format_id": "22", "ext": "mp4", "vcodec": "avc1.64001F", "acodec": "mp4a.40.2"}
            ]
        }"#;

        let formats = parse_format_set(json).unwrap();
        assert_eq!(formats.len(), 3);
        assert!(formats[0].has_video());
        assert!(!formats[0].has_audio());
        assert!(!formats[1].has_video());
        assert!(formats[1].has_audio());
        assert!(formats[2].has_video());
        assert!(formats[2].has_audio());
    }

    #[test]
    fn test_parse_format_set_inline_single_format() {
        let json = r#"{"title": "Clip", "format_id": "0", "ext": "mp4", "vcodec": "h264", "acodec": "aac"}"#;

        let formats = parse_format_set(json).unwrap();
        assert_eq!(formats.len(), 1);
        assert!(formats[0].has_audio());
        assert_eq!(formats[0].format_id.as_deref(), Some("0"));
    }

    #[test]
    fn test_parse_format_set_no_formats() {
        let formats = parse_format_set(r#"{"title": "Nothing"}"#).unwrap();
        assert!(formats.is_empty());
    }

    #[test]
    fn test_parse_format_set_rejects_garbage() {
        assert!(parse_format_set("not json").is_err());
    }

    #[test]
    fn test_codec_sentinel_is_exact() {
        // Codec names merely containing "none" must still count as present.
        let entry = FormatEntry {
            format_id: None,
            ext: None,
            vcodec: Some("none".into()),
            acodec: Some("nonesuch-1.2".into()),
        };
        assert!(entry.has_audio());
        assert!(!entry.has_video());
    }

    #[test]
    fn test_missing_codec_fields_mean_absent() {
        let entry = FormatEntry {
            format_id: None,
            ext: None,
            vcodec: None,
            acodec: None,
        };
        assert!(!entry.has_audio());
        assert!(!entry.has_video());
    }

    #[test]
    fn test_stderr_excerpt_prefers_error_line() {
        let stderr = "WARNING: something\nERROR: no suitable format\ntrailing";
        assert_eq!(stderr_excerpt(stderr), "ERROR: no suitable format");
    }

    #[test]
    fn test_stderr_excerpt_falls_back_to_last_line() {
        let stderr = "first\n\nsecond\n";
        assert_eq!(stderr_excerpt(stderr), "second");
    }

    #[test]
    fn test_stderr_excerpt_empty() {
        assert_eq!(stderr_excerpt(""), "unknown error");
    }
}
