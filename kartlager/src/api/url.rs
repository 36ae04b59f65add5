//! Query-string percent-encoding.

/// Percent-encodes a query parameter value.
///
/// Unreserved characters (RFC 3986) pass through; everything else,
/// including spaces, is encoded as %XX. Swedish designations contain
/// å/ä/ö, which encode per-byte as UTF-8.
pub fn encode_query(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
