//! Utility functions for the Streamr client.
//!
//! - Status code classification
//! - Path segment encoding
//! - Base URL normalization

use crate::error::{Result, StreamrError};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped inside a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Check if status code is a success (200..=299)
pub fn is_success_status(status: u16) -> bool {
    (200..=299).contains(&status)
}

/// Check if status code indicates retryable error
pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 425 | 429 | 502 | 503 | 504)
}

/// Check if status code indicates access denied
pub fn is_access_denied_status(status: u16) -> bool {
    matches!(status, 401 | 403)
}

/// Percent-encode a value so it stays one path segment.
///
/// Stream ids from the API look like `7wa7APtlTq6EC5iTCBy6dw` but ids of the form
/// `0xabc.../sensors` also exist, and the slash must not split the path. Dot-segments
/// are not escaped here; see [`stream_path_segment`].
pub fn encode_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Encode a stream id for use as one path segment.
///
/// `""`, `"."` and `".."` are rejected: URL resolution would collapse them and
/// address a different endpoint.
pub fn stream_path_segment(stream_id: &str) -> Result<String> {
    if matches!(stream_id, "" | "." | "..") {
        return Err(StreamrError::InvalidStreamId(stream_id.to_string()));
    }
    Ok(encode_path_segment(stream_id))
}

/// Append a trailing slash so relative paths join below the base instead of replacing
/// its last segment.
pub fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}
