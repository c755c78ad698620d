use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::borrow::Cow;

/// Bytes escaped in a return-to query value. Path separators and the
/// unreserved marks stay readable.
const RETURN_TO: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Request path reduced to the form the route index is keyed by.
///
/// Percent escapes are decoded, empty segments dropped and a trailing
/// `index.html` removed, so every spelling a static file server maps to the
/// same file yields the same key. Returns `None` for relative paths, invalid
/// UTF-8 and `.`/`..` segments.
pub fn canonicalize(path: &str) -> Option<String> {
    if !path.starts_with('/') {
        return None;
    }
    let decoded = percent_decode_str(path).decode_utf8().ok()?;

    let mut segments = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" => continue,
            "." | ".." => return None,
            s if s.contains('\\') || s.contains('\0') => return None,
            s => segments.push(s),
        }
    }
    if segments.last() == Some(&"index.html") {
        segments.pop();
    }

    Some(format!("/{}", segments.join("/")))
}

/// Escape a path for use as a query parameter value.
pub fn encode_return_to(path: &str) -> Cow<'_, str> {
    utf8_percent_encode(path, RETURN_TO).into()
}
