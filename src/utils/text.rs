//! Text decoding shared by file reads and captured process output

/// Decode bytes as UTF-8, replacing invalid sequences, with CRLF normalised to LF
pub fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).replace("\r\n", "\n")
}
