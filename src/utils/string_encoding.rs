// src/utils/string_encoding.rs

/// Decode text stored in an SDT file, replacing invalid UTF-8 sequences
pub fn decode_sdt_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Trim leading and trailing characters at or below ASCII space
///
/// Covers NUL padding, CR and tabs as well as ordinary whitespace.
pub fn trim_control(s: &str) -> &str {
    s.trim_matches(|c: char| c <= ' ')
}

/// Non-empty, trimmed, newline-delimited tokens
///
/// Runs of consecutive newlines produce no empty tokens.
pub fn line_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').filter(|t| !t.is_empty()).map(trim_control)
}
