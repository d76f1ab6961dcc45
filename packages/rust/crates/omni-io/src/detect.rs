//! Binary detection and strict text decoding.

use memchr::memchr;

use crate::error::IoError;

/// Number of leading bytes inspected for NULL bytes.
pub const BINARY_PROBE_LEN: usize = 8192;

/// Quick binary detection - checks the first 8KB for NULL bytes.
#[must_use]
pub fn is_binary(buffer: &[u8]) -> bool {
    let check_len = buffer.len().min(BINARY_PROBE_LEN);
    memchr(0, &buffer[..check_len]).is_some()
}

/// Decode bytes to a `String`, refusing anything that is not valid UTF-8.
///
/// Files read here may be written back in full, so a lossy decode would
/// silently replace bytes on disk. Invalid sequences are an error instead.
///
/// # Errors
/// `IoError::BinaryFile` when a NULL byte is found in the probe window,
/// `IoError::Encoding` when the buffer is not valid UTF-8.
pub fn decode_buffer(buffer: Vec<u8>) -> Result<String, IoError> {
    if is_binary(&buffer) {
        return Err(IoError::BinaryFile);
    }
    String::from_utf8(buffer).map_err(|_| IoError::Encoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_byte_is_binary() {
        assert!(is_binary(b"abc\x00def"));
        assert!(!is_binary("naïve café".as_bytes()));
    }

    #[test]
    fn test_null_after_probe_window_is_text() {
        let mut buffer = vec![b'a'; BINARY_PROBE_LEN];
        buffer.push(0);
        assert!(!is_binary(&buffer));
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let result = decode_buffer(vec![b'a', 0xff, b'b']);
        assert!(matches!(result, Err(IoError::Encoding)));
    }
}
