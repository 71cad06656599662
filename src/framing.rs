//! Line framing for the instrument's text protocol
//!
//! The instrument terminates responses with `\n` or `\r` (either alone
//! is valid; some firmware revisions send only `\r`). Incoming bytes
//! accumulate in a buffer owned by the I/O loop thread and complete
//! lines are peeled off one at a time.

/// Extract at most one complete line from the front of `buffer`.
///
/// Scans for `\n` first across the whole buffer, then `\r`. On a hit
/// the prefix is decoded lossily (invalid bytes become U+FFFD), trimmed
/// and returned; the terminator plus any immediately following run of
/// terminator bytes is consumed, so `\r\n` and `\n\r` pairs collapse to
/// a single separator instead of yielding an empty line.
///
/// Returns `None` with the buffer untouched when no terminator is
/// present yet. Call in a loop until `None`: one read burst may carry
/// several lines.
///
/// NOTE: a lone `\r` inside a payload splits the line. Deliberate —
/// downstream devices may use either terminator alone.
pub fn extract_line(buffer: &mut Vec<u8>) -> Option<String> {
    for sep in [b'\n', b'\r'] {
        let Some(index) = buffer.iter().position(|&b| b == sep) else {
            continue;
        };

        let line = String::from_utf8_lossy(&buffer[..index])
            .trim()
            .to_string();

        // Consume the line, its terminator, and any leading run of
        // further terminator bytes in the remainder.
        let mut end = index + 1;
        while end < buffer.len() && (buffer[end] == b'\n' || buffer[end] == b'\r') {
            end += 1;
        }
        buffer.drain(..end);

        return Some(line);
    }
    None
}
