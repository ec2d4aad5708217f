//! Form-style percent encoding (space becomes `+`, not `%20`).

use percent_encoding::percent_decode_str;
use url::form_urlencoded::byte_serialize;

/// Percent-encodes `input` with the application/x-www-form-urlencoded
/// convention: space becomes `+`, reserved characters are escaped.
pub fn encode(input: &str) -> String {
    byte_serialize(input.as_bytes()).collect()
}

/// Inverse of [`encode`]: folds `+` back to space, then percent-decodes.
/// Invalid UTF-8 in the decoded bytes is replaced lossily.
pub fn decode(input: &str) -> String {
    let folded = input.replace('+', " ");
    percent_decode_str(&folded).decode_utf8_lossy().into_owned()
}
