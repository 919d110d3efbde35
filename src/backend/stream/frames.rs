/**
 * SSE Frame Encoding
 *
 * This module encodes the two frame kinds the stream endpoint emits:
 * message frames carrying a published envelope, and keep-alive comment
 * frames sent while a connection is idle.
 *
 * # Frame Format
 *
 * Server-Sent Events frames are newline-delimited text, each frame
 * terminated by a blank line:
 *
 * ```text
 * data: {"id":"m1","message":"hi"}
 *
 * ```
 *
 * Lines starting with `:` are comments. Clients ignore them, which makes
 * them safe as keep-alive traffic: an idle connection stays warm through
 * proxies without the client ever seeing a message event.
 */
use bytes::Bytes;

/// Encode a published envelope as an SSE data frame
///
/// The envelope is forwarded verbatim - the relay does not parse or
/// validate its contents.
///
/// # Example
/// ```rust
/// use chatstream::backend::stream::frames::data_frame;
///
/// let frame = data_frame(r#"{"id":"m1","message":"hi"}"#);
/// assert_eq!(&frame[..], b"data: {\"id\":\"m1\",\"message\":\"hi\"}\n\n".as_slice());
/// ```
pub fn data_frame(envelope: &str) -> Bytes {
    Bytes::from(format!("data: {}\n\n", envelope))
}

/// Encode a keep-alive comment frame
///
/// Comment frames are invisible to SSE clients and exist only to keep
/// idle connections from being timed out by intermediaries.
pub fn keep_alive_frame() -> Bytes {
    Bytes::from_static(b": keep-alive\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_frame_wraps_envelope_verbatim() {
        let frame = data_frame(r#"{"id":"m1","message":"hi"}"#);
        assert_eq!(
            &frame[..],
            b"data: {\"id\":\"m1\",\"message\":\"hi\"}\n\n" as &[u8]
        );
    }

    #[test]
    fn test_data_frame_does_not_parse_envelope() {
        // Any string goes through untouched, valid JSON or not
        let frame = data_frame("not json at all");
        assert_eq!(&frame[..], b"data: not json at all\n\n" as &[u8]);
    }

    #[test]
    fn test_keep_alive_is_a_comment_frame() {
        let frame = keep_alive_frame();
        assert!(frame.starts_with(b":"));
        assert!(!frame.starts_with(b"data:"));
        assert!(frame.ends_with(b"\n\n"));
    }
}
