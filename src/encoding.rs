//! Percent-encoding as required by the OAuth 1.0a signature base string, and decoding of
//! `application/x-www-form-urlencoded` provider responses.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::Parameters;

/// Everything but the unreserved characters of RFC 3986: A-Z a-z 0-9 - . _ ~
const OAUTH_ESCAPE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Escape `value` for use in a signature base string. Multi-byte characters are escaped byte
/// by byte using their UTF-8 representation, space becomes `%20`.
pub fn percent_encode(value: &str) -> String {
    utf8_percent_encode(value, OAUTH_ESCAPE_SET).to_string()
}

/// Decode a form encoded string such as `oauth_token=abc&oauth_token_secret=d%2Bf`. Empty
/// pairs are skipped, a pair without `=` yields an empty value, later keys override earlier ones.
pub fn form_decode(form: &str) -> Parameters {
    form.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next().unwrap_or_default();
            let value = parts.next().unwrap_or_default();
            (form_unescape(key), form_unescape(value))
        })
        .collect()
}

fn form_unescape(value: &str) -> String {
    percent_decode_str(&value.replace('+', " ")).decode_utf8_lossy().into_owned()
}
